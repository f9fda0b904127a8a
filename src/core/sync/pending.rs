/*!
 * Pending Task Counter
 *
 * Join point for a dynamically growing set of fire-and-forget tasks.
 * Every dispatch holds a `PendingGuard`; the count drops when the guard
 * drops, so a panicking task still releases the barrier.
 */

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared count of dispatched tasks that have not finished yet
#[derive(Debug, Default)]
pub struct PendingCounter {
    count: AtomicUsize,
    lock: Mutex<()>,
    drained: Condvar,
}

impl PendingCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register one task; call before dispatching it
    pub fn enter(self: &Arc<Self>) -> PendingGuard {
        self.count.fetch_add(1, Ordering::AcqRel);
        PendingGuard {
            counter: Arc::clone(self),
        }
    }

    /// Number of tasks still outstanding
    pub fn pending(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Block until every registered task has finished
    pub fn wait(&self) {
        let mut guard = self.lock.lock();
        while self.count.load(Ordering::Acquire) != 0 {
            self.drained.wait(&mut guard);
        }
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    /// Returns true if the count reached zero.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let mut guard = self.lock.lock();
        while self.count.load(Ordering::Acquire) != 0 {
            if self.drained.wait_for(&mut guard, timeout).timed_out() {
                return self.count.load(Ordering::Acquire) == 0;
            }
        }
        true
    }

    fn leave(&self) {
        if self.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            // Waiters hold the lock between their check and park
            let _guard = self.lock.lock();
            self.drained.notify_all();
        }
    }
}

/// RAII registration of one in-flight task
#[derive(Debug)]
#[must_use = "dropping the guard marks the task finished"]
pub struct PendingGuard {
    counter: Arc<PendingCounter>,
}

impl PendingGuard {
    /// The counter this guard is registered with
    pub fn counter(&self) -> &Arc<PendingCounter> {
        &self.counter
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.counter.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_wait_returns_immediately_when_idle() {
        let counter = PendingCounter::new();
        counter.wait();
        assert_eq!(counter.pending(), 0);
    }

    #[test]
    fn test_guard_drop_decrements() {
        let counter = PendingCounter::new();
        let first = counter.enter();
        let second = first.counter().enter();
        assert_eq!(counter.pending(), 2);
        drop(first);
        assert_eq!(counter.pending(), 1);
        drop(second);
        assert_eq!(counter.pending(), 0);
    }

    #[test]
    fn test_wait_for_times_out_with_outstanding_task() {
        let counter = PendingCounter::new();
        let _guard = counter.enter();
        assert!(!counter.wait_for(Duration::from_millis(20)));
    }

    #[test]
    fn test_wait_blocks_until_chained_tasks_finish() {
        let counter = PendingCounter::new();
        let guard = counter.enter();

        // Each thread registers its successor before finishing
        let handle = thread::spawn(move || {
            let mut guard = guard;
            for _ in 0..50 {
                let next = guard.counter().enter();
                thread::sleep(Duration::from_micros(100));
                guard = next;
            }
        });

        counter.wait();
        assert_eq!(counter.pending(), 0);
        handle.join().unwrap();
    }
}
