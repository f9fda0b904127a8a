/*!
 * Ring
 *
 * Cyclic doubly-linked arrangement of participants, stored as an arena
 * indexed by participant id. Eliminated participants stay in the arena as
 * tombstones; link repair makes living neighbours skip them.
 *
 * # Invariant
 *
 * Every participant strictly between a node and its `succ` (or `pred`) in
 * construction order is dead. Deaths are permanent, so any link written
 * while this held keeps holding under arbitrary repair interleavings.
 */

mod participant;

pub use participant::Participant;

use crate::core::errors::{EngineError, EngineResult};
use crate::core::types::ParticipantId;
use std::sync::OnceLock;
use tracing::trace;

/// Outcome of a single repair hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// The link was written on a living participant
    Linked,
    /// The participant was dead; continue at this neighbour
    Next(ParticipantId),
}

/// Traversal direction for [`Ring::live_ids`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The circle of participants plus the write-once survivor slot
#[derive(Debug)]
pub struct Ring {
    participants: Box<[Participant]>,
    outcome: OnceLock<ParticipantId>,
}

impl Ring {
    /// Build `n` participants with ids `1..=n` wired into a single cycle.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `n` or `k` is zero.
    pub fn build(n: usize, k: usize) -> EngineResult<Self> {
        if n < 1 || k < 1 {
            return Err(EngineError::InvalidConfiguration { n, k });
        }

        let participants = (1..=n)
            .map(|id| {
                let pred = if id == 1 { n } else { id - 1 };
                let succ = if id == n { 1 } else { id + 1 };
                Participant::new(id, k, pred, succ)
            })
            .collect();

        Ok(Self {
            participants,
            outcome: OnceLock::new(),
        })
    }

    /// Number of participants, living or dead
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Elimination step `k`
    pub fn step(&self) -> usize {
        self.participants[0].step()
    }

    /// Where traversal begins
    pub fn start(&self) -> ParticipantId {
        1
    }

    /// Look up a participant.
    ///
    /// # Panics
    ///
    /// If `id` is not in `1..=len`.
    #[inline]
    pub fn participant(&self, id: ParticipantId) -> &Participant {
        &self.participants[id - 1]
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Overwrite a successor link (setup only, no liveness check)
    pub fn set_succ(&self, id: ParticipantId, succ: ParticipantId) {
        self.participant(id).store_succ(succ);
    }

    /// Overwrite a predecessor link (setup only, no liveness check)
    pub fn set_pred(&self, id: ParticipantId, pred: ParticipantId) {
        self.participant(id).store_pred(pred);
    }

    /// Tombstone a participant. Returns false if it was already dead.
    pub fn kill(&self, id: ParticipantId) -> bool {
        self.participant(id).kill()
    }

    /// Record the survivor. Only the first call has any effect.
    pub fn record_survivor(&self, id: ParticipantId) -> bool {
        self.outcome.set(id).is_ok()
    }

    pub fn survivor(&self) -> Option<ParticipantId> {
        self.outcome.get().copied()
    }

    /// One step of successor repair: link `at` if alive, otherwise name the
    /// predecessor to try next.
    pub fn relink_successor(&self, at: ParticipantId, new_succ: ParticipantId) -> Hop {
        let participant = self.participant(at);
        if participant.is_alive() {
            participant.store_succ(new_succ);
            Hop::Linked
        } else {
            Hop::Next(participant.pred())
        }
    }

    /// Mirror of [`relink_successor`](Self::relink_successor), moving forward.
    pub fn relink_predecessor(&self, at: ParticipantId, new_pred: ParticipantId) -> Hop {
        let participant = self.participant(at);
        if participant.is_alive() {
            participant.store_pred(new_pred);
            Hop::Linked
        } else {
            Hop::Next(participant.succ())
        }
    }

    /// Set the successor of `from`, or of its nearest living predecessor.
    pub fn repair_successor(&self, from: ParticipantId, new_succ: ParticipantId) {
        let mut at = from;
        while let Hop::Next(next) = self.relink_successor(at, new_succ) {
            trace!(at, next, "successor repair skipping tombstone");
            at = next;
        }
    }

    /// Set the predecessor of `from`, or of its nearest living successor.
    pub fn repair_predecessor(&self, from: ParticipantId, new_pred: ParticipantId) {
        let mut at = from;
        while let Hop::Next(next) = self.relink_predecessor(at, new_pred) {
            trace!(at, next, "predecessor repair skipping tombstone");
            at = next;
        }
    }

    pub fn live_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_alive()).count()
    }

    /// Living ids reached by following links from the lowest living id,
    /// skipping tombstones. Empty if nobody is alive.
    pub fn live_ids(&self, direction: Direction) -> Vec<ParticipantId> {
        let Some(start) = self.participants.iter().find(|p| p.is_alive()) else {
            return Vec::new();
        };

        let mut ids = vec![start.id()];
        let mut at = start.id();
        // Links only move forward in ring order, so a full lap is at most len hops
        for _ in 0..self.len() {
            let participant = self.participant(at);
            at = match direction {
                Direction::Forward => participant.succ(),
                Direction::Backward => participant.pred(),
            };
            if at == start.id() {
                break;
            }
            if self.participant(at).is_alive() {
                ids.push(at);
            }
        }
        ids
    }

    /// Whether the living participants form a single cycle in both directions
    pub fn is_consistent(&self) -> bool {
        let expected: Vec<ParticipantId> = self
            .participants
            .iter()
            .filter(|p| p.is_alive())
            .map(Participant::id)
            .collect();

        let forward = self.live_ids(Direction::Forward);
        let mut backward = self.live_ids(Direction::Backward);
        if backward.len() > 1 {
            backward[1..].reverse();
        }

        forward == expected && backward == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_length_and_ids() {
        let ring = Ring::build(5, 2).unwrap();
        assert_eq!(ring.len(), 5);
        for (i, participant) in ring.participants().enumerate() {
            assert_eq!(participant.id(), i + 1);
            assert_eq!(participant.step(), 2);
            assert!(participant.is_alive());
        }
    }

    #[test]
    fn test_build_successor_links() {
        let ring = Ring::build(5, 2).unwrap();
        for id in 1..5 {
            assert_eq!(ring.participant(id).succ(), id + 1);
        }
        assert_eq!(ring.participant(5).succ(), 1);
    }

    #[test]
    fn test_build_predecessor_links() {
        let ring = Ring::build(5, 2).unwrap();
        for id in 2..=5 {
            assert_eq!(ring.participant(id).pred(), id - 1);
        }
        assert_eq!(ring.participant(1).pred(), 5);
    }

    #[test]
    fn test_single_participant_links_to_itself() {
        let ring = Ring::build(1, 7).unwrap();
        assert_eq!(ring.participant(1).succ(), 1);
        assert_eq!(ring.participant(1).pred(), 1);
        assert!(ring.is_consistent());
    }

    #[test]
    fn test_build_rejects_zero() {
        assert!(matches!(
            Ring::build(0, 1),
            Err(EngineError::InvalidConfiguration { n: 0, k: 1 })
        ));
        assert!(matches!(
            Ring::build(5, 0),
            Err(EngineError::InvalidConfiguration { n: 5, k: 0 })
        ));
    }

    #[test]
    fn test_set_links() {
        let ring = Ring::build(2, 2).unwrap();
        ring.set_succ(1, 1);
        ring.set_pred(2, 2);
        assert_eq!(ring.participant(1).succ(), 1);
        assert_eq!(ring.participant(2).pred(), 2);
    }

    #[test]
    fn test_repair_successor_live() {
        let ring = Ring::build(4, 2).unwrap();
        ring.repair_successor(2, 4);
        assert_eq!(ring.participant(2).succ(), 4);
    }

    #[test]
    fn test_repair_successor_one_tombstone() {
        let ring = Ring::build(4, 2).unwrap();
        ring.kill(3);
        ring.repair_successor(3, 4);
        assert_eq!(ring.participant(2).succ(), 4);
    }

    #[test]
    fn test_repair_successor_two_tombstones() {
        let ring = Ring::build(4, 2).unwrap();
        ring.kill(2);
        ring.kill(3);
        ring.repair_successor(3, 4);
        assert_eq!(ring.participant(1).succ(), 4);
    }

    #[test]
    fn test_repair_predecessor_live() {
        let ring = Ring::build(4, 2).unwrap();
        ring.repair_predecessor(3, 1);
        assert_eq!(ring.participant(3).pred(), 1);
    }

    #[test]
    fn test_repair_predecessor_one_tombstone() {
        let ring = Ring::build(4, 2).unwrap();
        ring.kill(2);
        ring.repair_predecessor(2, 1);
        assert_eq!(ring.participant(3).pred(), 1);
    }

    #[test]
    fn test_repair_predecessor_two_tombstones() {
        let ring = Ring::build(4, 2).unwrap();
        ring.kill(2);
        ring.kill(3);
        ring.repair_predecessor(2, 1);
        assert_eq!(ring.participant(4).pred(), 1);
    }

    #[test]
    fn test_kill_is_once() {
        let ring = Ring::build(3, 1).unwrap();
        assert!(ring.kill(2));
        assert!(!ring.kill(2));
        assert_eq!(ring.live_count(), 2);
    }

    #[test]
    fn test_survivor_written_once() {
        let ring = Ring::build(3, 1).unwrap();
        assert_eq!(ring.survivor(), None);
        assert!(ring.record_survivor(3));
        assert!(!ring.record_survivor(1));
        assert_eq!(ring.survivor(), Some(3));
    }

    #[test]
    fn test_live_ids_skip_unrepaired_tombstones() {
        let ring = Ring::build(6, 2).unwrap();
        ring.kill(2);
        ring.kill(5);
        assert_eq!(ring.live_ids(Direction::Forward), vec![1, 3, 4, 6]);
        assert_eq!(ring.live_ids(Direction::Backward), vec![1, 6, 4, 3]);
        assert!(ring.is_consistent());
    }

    #[test]
    fn test_inconsistent_when_link_skips_living() {
        let ring = Ring::build(4, 2).unwrap();
        ring.set_succ(1, 3);
        assert!(!ring.is_consistent());
    }
}
