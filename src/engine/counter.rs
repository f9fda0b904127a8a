/*!
 * Counter-Synchronized Eliminator
 *
 * Every traversal step and every repair hop is its own task. A shared
 * pending counter is raised before each dispatch and lowered when the task
 * finishes; the caller blocks until it drains.
 *
 * Racing repairs cannot corrupt liveness: each task decides from the
 * participant it stands on and never from a neighbour's state. They only
 * delay when tombstones get unlinked.
 */

use crate::core::sync::{PendingCounter, PendingGuard};
use crate::core::types::ParticipantId;
use crate::ring::{Hop, Ring};
use std::sync::Arc;
use tracing::{debug, trace};

/// Run to completion on the current runtime context and return the survivor.
///
/// Must be called with a dispatcher entered; blocks the calling thread.
pub(crate) fn eliminate(ring: &Arc<Ring>) -> Option<ParticipantId> {
    let pending = PendingCounter::new();
    let guard = pending.enter();
    spawn_step(Arc::clone(ring), ring.start(), 1, ring.len(), guard);
    pending.wait();
    ring.survivor()
}

/// Dispatch successor repair starting at `from`, one task per hop
pub(crate) fn repair_successor_async(
    ring: Arc<Ring>,
    from: ParticipantId,
    new_succ: ParticipantId,
    pending: &Arc<PendingCounter>,
) {
    let guard = pending.enter();
    tokio::spawn(async move {
        if let Hop::Next(next) = ring.relink_successor(from, new_succ) {
            trace!(at = from, next, "successor repair skipping tombstone");
            repair_successor_async(ring, next, new_succ, guard.counter());
        }
        drop(guard);
    });
}

/// Dispatch predecessor repair starting at `from`, one task per hop
pub(crate) fn repair_predecessor_async(
    ring: Arc<Ring>,
    from: ParticipantId,
    new_pred: ParticipantId,
    pending: &Arc<PendingCounter>,
) {
    let guard = pending.enter();
    tokio::spawn(async move {
        if let Hop::Next(next) = ring.relink_predecessor(from, new_pred) {
            trace!(at = from, next, "predecessor repair skipping tombstone");
            repair_predecessor_async(ring, next, new_pred, guard.counter());
        }
        drop(guard);
    });
}

fn dispatch_step(ring: Arc<Ring>, at: ParticipantId, x: usize, s: usize, pending: &Arc<PendingCounter>) {
    let guard = pending.enter();
    spawn_step(ring, at, x, s, guard);
}

fn spawn_step(ring: Arc<Ring>, at: ParticipantId, x: usize, s: usize, guard: PendingGuard) {
    tokio::spawn(async move {
        step(ring, at, x, s, &guard);
    });
}

fn step(ring: Arc<Ring>, at: ParticipantId, x: usize, s: usize, guard: &PendingGuard) {
    let pending = guard.counter();
    let participant = ring.participant(at);
    let (id, succ, pred) = (participant.id(), participant.succ(), participant.pred());

    if !participant.is_alive() {
        dispatch_step(ring, succ, x, s, pending);
    } else if s == 1 {
        ring.record_survivor(id);
        debug!(id, "Survivor found");
    } else if x % participant.step() == 0 {
        ring.kill(at);
        debug!(id, remaining = s - 1, "Eliminated");
        repair_successor_async(Arc::clone(&ring), pred, succ, pending);
        repair_predecessor_async(Arc::clone(&ring), succ, pred, pending);
        dispatch_step(ring, succ, x + 1, s - 1, pending);
    } else {
        dispatch_step(ring, succ, x + 1, s, pending);
    }
}
