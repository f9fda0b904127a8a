/*!
 * Sequential Eliminator
 * Single-threaded walk with synchronous link repair
 */

use crate::core::types::ParticipantId;
use crate::ring::Ring;
use tracing::debug;

/// Walk the ring from its start until one participant is left.
///
/// `x` counts living participants visited, `s` the ones still alive. The
/// walk is the tail-recursive kill step unrolled into a loop.
pub(crate) fn eliminate(ring: &Ring) -> Option<ParticipantId> {
    let mut at = ring.start();
    let mut x: usize = 1;
    let mut s = ring.len();

    loop {
        let participant = ring.participant(at);
        if !participant.is_alive() {
            at = participant.succ();
            continue;
        }

        if s == 1 {
            ring.record_survivor(participant.id());
            return ring.survivor();
        }

        if x % participant.step() == 0 {
            ring.kill(at);
            let (pred, succ) = (participant.pred(), participant.succ());
            ring.repair_successor(pred, succ);
            ring.repair_predecessor(succ, pred);
            s -= 1;
            debug!(id = participant.id(), remaining = s, "Eliminated");
        }

        x += 1;
        at = participant.succ();
    }
}
