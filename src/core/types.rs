/*!
 * Common Types
 * Participant identities and the elimination order
 */

use serde::Serialize;
use std::fmt;

/// Participant identity, 1-based ring position
pub type ParticipantId = usize;

/// Ids in the order they left the ring, survivor last
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EliminationOrder(Vec<ParticipantId>);

impl EliminationOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, id: ParticipantId) {
        self.0.push(id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final entry, which is the survivor of a completed run
    pub fn last(&self) -> Option<ParticipantId> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[ParticipantId] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ParticipantId> {
        self.0
    }
}

impl fmt::Display for EliminationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids = self.0.iter();
        if let Some(first) = ids.next() {
            write!(f, "{}", first)?;
            for id in ids {
                write!(f, " {}", id)?;
            }
        }
        Ok(())
    }
}

impl From<Vec<ParticipantId>> for EliminationOrder {
    fn from(ids: Vec<ParticipantId>) -> Self {
        Self(ids)
    }
}

impl FromIterator<ParticipantId> for EliminationOrder {
    fn from_iter<I: IntoIterator<Item = ParticipantId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EliminationOrder {
    type Item = &'a ParticipantId;
    type IntoIter = std::slice::Iter<'a, ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
