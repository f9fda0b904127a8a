/*!
 * Streaming Eliminator
 *
 * Traversal steps run as tasks and report every elimination through a
 * zero-capacity channel. A send completes only when the consumer takes the
 * id, so the consumer sees events in traversal order even though repairs
 * race in the background.
 *
 * Repairs are not joined against the event they belong to: a consumer may
 * observe an id before that participant's neighbours are relinked.
 */

use super::counter::{repair_predecessor_async, repair_successor_async};
use crate::core::sync::PendingCounter;
use crate::core::types::{EliminationOrder, ParticipantId};
use crate::ring::Ring;
use flume::{Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Drive the ring on the current runtime context and consume its events.
///
/// Repair tasks register with `repairs` but are not waited on here. Returns
/// the last id received together with every id in receipt order.
pub(crate) fn eliminate(
    ring: &Arc<Ring>,
    repairs: &Arc<PendingCounter>,
) -> (Option<ParticipantId>, EliminationOrder) {
    let (events, received) = flume::bounded(0);
    dispatch_step(Arc::clone(ring), ring.start(), 1, ring.len(), events, repairs);
    consume(&received, ring.len())
}

/// Read exactly `expected` events. Reads after the channel closes come back
/// absent and are not recorded.
fn consume(received: &Receiver<ParticipantId>, expected: usize) -> (Option<ParticipantId>, EliminationOrder) {
    let mut order = EliminationOrder::with_capacity(expected);
    let mut last = None;

    for _ in 0..expected {
        match received.recv().ok() {
            Some(id) => {
                order.push(id);
                last = Some(id);
            }
            None => trace!("Event channel closed"),
        }
    }
    (last, order)
}

fn dispatch_step(
    ring: Arc<Ring>,
    at: ParticipantId,
    x: usize,
    s: usize,
    events: Sender<ParticipantId>,
    repairs: &Arc<PendingCounter>,
) {
    tokio::spawn(step(ring, at, x, s, events, Arc::clone(repairs)));
}

async fn step(
    ring: Arc<Ring>,
    at: ParticipantId,
    x: usize,
    s: usize,
    events: Sender<ParticipantId>,
    repairs: Arc<PendingCounter>,
) {
    let participant = ring.participant(at);
    let (id, alive, step_size, succ, pred) = (
        participant.id(),
        participant.is_alive(),
        participant.step(),
        participant.succ(),
        participant.pred(),
    );

    if !alive {
        dispatch_step(ring, succ, x, s, events, &repairs);
    } else if s == 1 {
        ring.record_survivor(id);
        if events.send_async(id).await.is_err() {
            warn!(id, "Consumer gone before survivor was reported");
        }
        debug!(id, "Survivor reported, closing event channel");
        // Dropping the only sender closes the channel
    } else if x % step_size == 0 {
        ring.kill(at);
        if events.send_async(id).await.is_err() {
            warn!(id, "Consumer gone, abandoning traversal");
            return;
        }
        debug!(id, remaining = s - 1, "Eliminated");
        repair_successor_async(Arc::clone(&ring), pred, succ, &repairs);
        repair_predecessor_async(Arc::clone(&ring), succ, pred, &repairs);
        dispatch_step(ring, succ, x + 1, s - 1, events, &repairs);
    } else {
        dispatch_step(ring, succ, x + 1, s, events, &repairs);
    }
}
