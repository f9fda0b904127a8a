/*!
 * Participant
 * One position in the circle, alive or tombstoned
 */

use crate::core::types::ParticipantId;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A ring member.
///
/// Links are ids of neighbouring participants in the owning [`Ring`](super::Ring)
/// arena. They are atomics so concurrent repairs can rewrite them while a
/// traversal is reading; liveness only ever goes from true to false.
#[derive(Debug)]
pub struct Participant {
    id: ParticipantId,
    step: usize,
    alive: AtomicBool,
    succ: AtomicUsize,
    pred: AtomicUsize,
}

impl Participant {
    pub(super) fn new(id: ParticipantId, step: usize, pred: ParticipantId, succ: ParticipantId) -> Self {
        Self {
            id,
            step,
            alive: AtomicBool::new(true),
            succ: AtomicUsize::new(succ),
            pred: AtomicUsize::new(pred),
        }
    }

    #[inline]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Elimination step shared by the whole ring
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    #[inline]
    pub fn succ(&self) -> ParticipantId {
        self.succ.load(Ordering::Acquire)
    }

    #[inline]
    pub fn pred(&self) -> ParticipantId {
        self.pred.load(Ordering::Acquire)
    }

    #[inline]
    pub(super) fn store_succ(&self, succ: ParticipantId) {
        self.succ.store(succ, Ordering::Release);
    }

    #[inline]
    pub(super) fn store_pred(&self, pred: ParticipantId) {
        self.pred.store(pred, Ordering::Release);
    }

    /// Mark dead. Returns false if it already was.
    #[inline]
    pub(super) fn kill(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }
}
