// SPDX-License-Identifier: MPL-2.0
//! Deferred auto-dismiss timers.
//!
//! The store schedules one timer per snack with a non-zero duration and
//! cancels it on every removal path. A scheduler only reports which ids
//! fired; turning a fire into a removal is the store's job
//! ([`SnackStore::expire`](super::SnackStore::expire)), which ignores ids
//! that already left the queue.
//!
//! - [`ManualScheduler`] - virtual clock advanced by the caller (tests, headless use)
//! - [`TokioScheduler`] - one sleeping tokio task per timer, fires on a channel
//!
//! The iced integration lives in [`crate::ui::toaster::IcedScheduler`].

use super::record::SnackId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Schedules cancellable one-shot timers keyed by snack id.
pub trait Scheduler {
    /// Arms a timer for `id` that fires after `after`. Re-arming an id
    /// replaces its previous timer.
    fn schedule(&mut self, id: SnackId, after: Duration);

    /// Disarms the timer for `id`. No-op when none is pending.
    fn cancel(&mut self, id: SnackId);
}

/// Virtual-clock scheduler. Nothing fires until [`advance`](Self::advance)
/// moves the clock past a deadline.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<Deadline>,
    sequence: u64,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Duration,
    sequence: u64,
    id: SnackId,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward and returns the ids whose timers fired,
    /// earliest deadline first.
    pub fn advance(&mut self, by: Duration) -> Vec<SnackId> {
        self.now = self.now.saturating_add(by);
        let now = self.now;

        let (mut fired, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|deadline| deadline.at <= now);
        self.pending = pending;

        fired.sort_by_key(|deadline| (deadline.at, deadline.sequence));
        fired.into_iter().map(|deadline| deadline.id).collect()
    }

    #[must_use]
    pub fn is_pending(&self, id: SnackId) -> bool {
        self.pending.iter().any(|deadline| deadline.id == id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, id: SnackId, after: Duration) {
        self.cancel(id);
        self.sequence += 1;
        self.pending.push(Deadline {
            at: self.now.saturating_add(after),
            sequence: self.sequence,
            id,
        });
    }

    fn cancel(&mut self, id: SnackId) {
        self.pending.retain(|deadline| deadline.id != id);
    }
}

/// Tokio-backed scheduler: each timer is a spawned sleep that sends its id
/// on the channel returned by [`TokioScheduler::new`].
///
/// Must be used from within a tokio runtime. Pending timers are aborted
/// when the scheduler is dropped.
#[derive(Debug)]
pub struct TokioScheduler {
    fired: mpsc::UnboundedSender<SnackId>,
    timers: HashMap<SnackId, AbortHandle>,
}

impl TokioScheduler {
    /// Creates the scheduler and the receiver that yields fired ids.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SnackId>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        (
            Self {
                fired,
                timers: HashMap::new(),
            },
            receiver,
        )
    }

    #[must_use]
    pub fn is_pending(&self, id: SnackId) -> bool {
        self.timers
            .get(&id)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, id: SnackId, after: Duration) {
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // The receiver may be gone during shutdown.
            let _ = fired.send(id);
        });

        if let Some(previous) = self.timers.insert(id, handle.abort_handle()) {
            previous.abort();
        }
    }

    fn cancel(&mut self, id: SnackId) {
        if let Some(handle) = self.timers.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> SnackId {
        SnackId::from_u128(n)
    }

    #[test]
    fn manual_scheduler_fires_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(id(1), Duration::from_millis(300));
        scheduler.schedule(id(2), Duration::from_millis(100));
        scheduler.schedule(id(3), Duration::from_millis(900));

        let fired = scheduler.advance(Duration::from_millis(500));
        assert_eq!(fired, vec![id(2), id(1)]);
        assert_eq!(scheduler.pending_count(), 1);
        assert!(scheduler.is_pending(id(3)));
    }

    #[test]
    fn manual_scheduler_cancel_prevents_fire() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(id(1), Duration::from_millis(100));
        scheduler.cancel(id(1));

        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn manual_scheduler_reschedule_replaces_deadline() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(id(1), Duration::from_millis(100));
        scheduler.schedule(id(1), Duration::from_millis(1000));

        assert!(scheduler.advance(Duration::from_millis(500)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(500)), vec![id(1)]);
    }

    #[test]
    fn manual_scheduler_deadline_is_inclusive() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(id(7), Duration::from_millis(250));
        assert_eq!(scheduler.advance(Duration::from_millis(250)), vec![id(7)]);
        assert_eq!(scheduler.now(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_sends_fired_id() {
        let (mut scheduler, mut fired) = TokioScheduler::new();
        scheduler.schedule(id(1), Duration::from_millis(5000));

        tokio::time::sleep(Duration::from_millis(5001)).await;
        assert_eq!(fired.recv().await, Some(id(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_cancel_aborts_timer() {
        let (mut scheduler, mut fired) = TokioScheduler::new();
        scheduler.schedule(id(1), Duration::from_millis(100));
        scheduler.schedule(id(2), Duration::from_millis(200));
        scheduler.cancel(id(1));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(fired.recv().await, Some(id(2)));
        assert!(fired.try_recv().is_err());
        assert!(!scheduler.is_pending(id(1)));
    }
}
