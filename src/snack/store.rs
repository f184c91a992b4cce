// SPDX-License-Identifier: MPL-2.0
//! Snack queue ownership and lifecycle.
//!
//! `SnackStore` owns the ordered queue (oldest first), assigns ids, keeps
//! the queue within `max_snacks` by evicting from the front, and arms or
//! disarms auto-dismiss timers through its [`Scheduler`]. Every removal path
//! (remove, dismiss, expire, eviction, clear) cancels the snack's timer, so
//! a timer that still fires afterwards finds nothing to remove.

use super::dispatch::SnackMate;
use super::id::{IdGenerator, SequentialIds};
use super::record::{Snack, SnackDraft, SnackId};
use super::scheduler::{ManualScheduler, Scheduler};
use crate::config::Config;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Ids drawn from the generator before `add` falls back to its own.
const MAX_ID_ATTEMPTS: usize = 8;

/// Why a snack left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Removed programmatically.
    Removed,
    /// Closed by the user (close button or Escape).
    Dismissed,
    /// Its auto-dismiss timer fired.
    Expired,
    /// Pushed out by a newer snack once the queue was full.
    Evicted,
    /// Dropped by a bulk clear.
    Cleared,
}

/// Change notification delivered to store observers.
#[derive(Debug, Clone, Copy)]
pub enum StoreEvent<'a> {
    Added(&'a Snack),
    Removed {
        snack: &'a Snack,
        reason: RemovalReason,
    },
    /// Sent once after a clear, following one `Removed` per dropped snack.
    Cleared,
}

/// Handle returned by [`SnackStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&StoreEvent<'_>)>;

/// In-memory snack queue.
pub struct SnackStore<S: Scheduler = ManualScheduler> {
    config: Config,
    snacks: VecDeque<Snack>,
    ids: Box<dyn IdGenerator>,
    scheduler: S,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl<S: Scheduler> fmt::Debug for SnackStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnackStore")
            .field("config", &self.config)
            .field("snacks", &self.snacks.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: Scheduler> SnackStore<S> {
    /// Creates an empty store using sequential ids.
    pub fn new(config: Config, scheduler: S) -> Self {
        Self::with_id_generator(config, scheduler, SequentialIds::new())
    }

    pub fn with_id_generator(
        config: Config,
        scheduler: S,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        Self {
            config: config.sanitized(),
            snacks: VecDeque::new(),
            ids: Box::new(ids),
            scheduler,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Returns the dispatch façade borrowing this store.
    pub fn dispatch(&mut self) -> SnackMate<'_, S> {
        SnackMate::new(self)
    }

    /// Accepts a draft, appends it as the newest snack and evicts the oldest
    /// ones beyond `max_snacks`. Returns the new snack's id.
    pub fn add(&mut self, draft: SnackDraft) -> SnackId {
        let id = self.fresh_id();
        let snack = Snack::from_draft(
            id,
            draft,
            self.config.default_duration(),
            self.config.default_position,
        );
        tracing::debug!(
            %id,
            severity = %snack.severity(),
            position = %snack.position(),
            duration_ms = snack.duration().as_millis() as u64,
            "snack added"
        );

        let duration = snack.duration();
        self.snacks.push_back(snack);

        while self.snacks.len() > self.config.max_snacks {
            if let Some(evicted) = self.snacks.pop_front() {
                tracing::debug!(id = %evicted.id(), "snack evicted");
                self.scheduler.cancel(evicted.id());
                self.notify(&StoreEvent::Removed {
                    snack: &evicted,
                    reason: RemovalReason::Evicted,
                });
            }
        }

        if !duration.is_zero() {
            self.scheduler.schedule(id, duration);
        }

        if let Some(added) = self.snacks.back() {
            let event = StoreEvent::Added(added);
            for (_, observer) in &mut self.observers {
                observer(&event);
            }
        }

        id
    }

    /// Removes a snack without running its close callback.
    ///
    /// Returns `false` when the id is not queued.
    pub fn remove(&mut self, id: SnackId) -> bool {
        self.take(id, RemovalReason::Removed).is_some()
    }

    /// Removes a snack closed by the user and runs its close callback.
    pub fn dismiss(&mut self, id: SnackId) -> bool {
        self.take_and_close(id, RemovalReason::Dismissed)
    }

    /// Removes a snack whose timer fired and runs its close callback.
    ///
    /// Stale fires for snacks that already left the queue are ignored.
    pub fn expire(&mut self, id: SnackId) -> bool {
        let expired = self.take_and_close(id, RemovalReason::Expired);
        if !expired {
            tracing::debug!(%id, "ignoring stale expiry");
        }
        expired
    }

    /// Empties the queue and disarms every pending timer.
    pub fn clear(&mut self) {
        let cleared: Vec<Snack> = self.snacks.drain(..).collect();
        tracing::debug!(count = cleared.len(), "snacks cleared");

        for snack in &cleared {
            self.scheduler.cancel(snack.id());
            self.notify(&StoreEvent::Removed {
                snack,
                reason: RemovalReason::Cleared,
            });
        }
        self.notify(&StoreEvent::Cleared);
    }

    /// Registers an observer called after every queue change.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent<'_>) + 'static) -> ObserverId {
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() < before
    }

    /// Queued snacks, oldest first.
    pub fn snacks(&self) -> impl DoubleEndedIterator<Item = &Snack> + ExactSizeIterator {
        self.snacks.iter()
    }

    #[must_use]
    pub fn get(&self, id: SnackId) -> Option<&Snack> {
        self.snacks.iter().find(|snack| snack.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: SnackId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn newest(&self) -> Option<&Snack> {
        self.snacks.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snacks.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn fresh_id(&mut self) -> SnackId {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !self.contains(id) {
                return id;
            }
            tracing::warn!(%id, "id generator returned a queued id, retrying");
        }

        // At most `len` of these `len + 1` candidates are taken.
        let fallback = (0..=self.snacks.len() as u128)
            .map(|offset| SnackId::from_u128(u128::MAX - offset))
            .find(|id| !self.contains(*id))
            .unwrap_or_else(|| SnackId::from_u128(u128::MAX));
        tracing::warn!(%fallback, "id generator keeps colliding, using fallback id");
        fallback
    }

    fn take(&mut self, id: SnackId, reason: RemovalReason) -> Option<Snack> {
        let index = self.snacks.iter().position(|snack| snack.id() == id)?;
        let snack = self.snacks.remove(index)?;

        tracing::debug!(%id, ?reason, "snack removed");
        self.scheduler.cancel(id);
        self.notify(&StoreEvent::Removed {
            snack: &snack,
            reason,
        });
        Some(snack)
    }

    fn take_and_close(&mut self, id: SnackId, reason: RemovalReason) -> bool {
        match self.take(id, reason) {
            Some(snack) => {
                snack.run_on_close();
                true
            }
            None => false,
        }
    }

    fn notify(&mut self, event: &StoreEvent<'_>) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }
}

impl SnackStore<ManualScheduler> {
    /// Creates a store driven by a virtual clock.
    pub fn manual(config: Config) -> Self {
        Self::new(config, ManualScheduler::new())
    }

    /// Advances the virtual clock and expires every snack whose timer fired.
    /// Returns how many snacks were removed.
    pub fn advance(&mut self, by: Duration) -> usize {
        let fired = self.scheduler.advance(by);
        fired.into_iter().filter(|id| self.expire(*id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snack::{Position, Severity, SnackOptions};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn config(max_snacks: usize, default_duration_ms: u64) -> Config {
        Config {
            default_position: Position::BottomRight,
            default_duration_ms,
            max_snacks,
        }
    }

    fn info(message: &str) -> SnackDraft {
        SnackDraft::new(Severity::Info, message)
    }

    fn messages(store: &SnackStore) -> Vec<String> {
        store.snacks().map(|s| s.message().to_string()).collect()
    }

    #[test]
    fn new_store_is_empty() {
        let store = SnackStore::manual(Config::default());
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.newest().is_none());
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut store = SnackStore::manual(Config::default());
        store.add(info("A"));
        store.add(info("B"));
        assert_eq!(messages(&store), ["A", "B"]);
        assert_eq!(store.newest().map(Snack::message), Some("B"));
    }

    #[test]
    fn add_beyond_max_keeps_newest() {
        let mut store = SnackStore::manual(config(2, 5000));
        store.add(info("A"));
        store.add(info("B"));
        store.add(info("C"));
        assert_eq!(messages(&store), ["B", "C"]);
    }

    #[test]
    fn queue_never_exceeds_max_for_any_sequence() {
        let mut store = SnackStore::manual(config(3, 5000));
        for i in 0..20 {
            store.add(info(&format!("m{i}")));
            assert!(store.len() <= 3);
        }
        assert_eq!(messages(&store), ["m17", "m18", "m19"]);
    }

    #[test]
    fn ids_are_unique_among_queued_snacks() {
        let mut store = SnackStore::manual(config(10, 5000));
        let ids: Vec<_> = (0..10).map(|i| store.add(info(&i.to_string()))).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[derive(Debug)]
    struct RepeatingIds;

    impl IdGenerator for RepeatingIds {
        fn next_id(&mut self) -> SnackId {
            SnackId::from_u128(7)
        }
    }

    #[test]
    fn repeating_id_generator_still_yields_unique_ids() {
        let mut store =
            SnackStore::with_id_generator(config(5, 5000), ManualScheduler::new(), RepeatingIds);
        let ids: Vec<_> = (0..5).map(|i| store.add(info(&i.to_string()))).collect();

        assert_eq!(ids[0], SnackId::from_u128(7));
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 5);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn huge_duration_override_does_not_overflow_clock() {
        let mut store = SnackStore::manual(config(5, 1000));
        store.advance(Duration::from_millis(1));
        let id = store.add(
            info("forever").with_options(SnackOptions::new().duration(Duration::MAX)),
        );

        assert!(store.scheduler().is_pending(id));
        assert_eq!(store.advance(Duration::MAX), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn add_fills_defaults_from_config() {
        let mut store = SnackStore::manual(Config {
            default_position: Position::TopLeft,
            default_duration_ms: 1200,
            max_snacks: 5,
        });
        let id = store.add(info("defaults"));
        let snack = store.get(id).unwrap();
        assert_eq!(snack.position(), Position::TopLeft);
        assert_eq!(snack.duration(), Duration::from_millis(1200));
    }

    #[test]
    fn remove_present_id_removes_exactly_one() {
        let mut store = SnackStore::manual(Config::default());
        store.add(info("A"));
        let b = store.add(info("B"));
        store.add(info("C"));

        assert!(store.remove(b));
        assert_eq!(messages(&store), ["A", "C"]);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut store = SnackStore::manual(Config::default());
        let a = store.add(info("A"));
        assert!(store.remove(a));
        assert!(!store.remove(a));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_cancels_pending_timer() {
        let mut store = SnackStore::manual(Config::default());
        let id = store.add(info("A"));
        assert!(store.scheduler().is_pending(id));

        store.remove(id);
        assert!(!store.scheduler().is_pending(id));
    }

    #[test]
    fn clear_empties_queue_and_timers() {
        let mut store = SnackStore::manual(Config::default());
        for i in 0..4 {
            store.add(info(&i.to_string()));
        }
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.scheduler().pending_count(), 0);
    }

    #[test]
    fn eviction_cancels_timer_of_evicted_snack() {
        let mut store = SnackStore::manual(config(1, 5000));
        let first = store.add(info("first"));
        store.add(info("second"));

        assert!(!store.contains(first));
        assert!(!store.scheduler().is_pending(first));
        assert_eq!(store.scheduler().pending_count(), 1);
    }

    #[test]
    fn timer_expires_snack_after_duration() {
        let mut store = SnackStore::manual(config(5, 1000));
        store.add(info("A"));

        assert_eq!(store.advance(Duration::from_millis(999)), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.advance(Duration::from_millis(1)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn zero_duration_never_expires() {
        let mut store = SnackStore::manual(config(5, 1000));
        let id = store.add(info("sticky").with_options(SnackOptions::new().sticky()));

        assert!(!store.scheduler().is_pending(id));
        store.advance(Duration::from_secs(3600));
        assert!(store.contains(id));
    }

    #[test]
    fn zero_default_duration_disables_auto_dismiss() {
        let mut store = SnackStore::manual(config(5, 0));
        store.add(info("A"));
        store.advance(Duration::from_secs(60));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stale_expiry_is_ignored() {
        let mut store = SnackStore::manual(Config::default());
        let id = store.add(info("A"));
        store.clear();
        assert!(!store.expire(id));
        assert!(store.is_empty());
    }

    #[test]
    fn dismiss_and_expire_run_on_close_but_remove_does_not() {
        let calls = Arc::new(AtomicUsize::new(0));
        let with_callback = |message: &str| {
            let counter = Arc::clone(&calls);
            info(message).with_options(SnackOptions::new().on_close(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
        };

        let mut store = SnackStore::manual(config(5, 1000));
        let removed = store.add(with_callback("removed"));
        let dismissed = store.add(with_callback("dismissed"));
        store.add(with_callback("expired"));

        store.remove(removed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.dismiss(dismissed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.advance(Duration::from_millis(1000));
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        store.add(with_callback("cleared"));
        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn observers_see_every_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);

        let mut store = SnackStore::manual(config(1, 5000));
        store.subscribe(move |event| {
            let entry = match event {
                StoreEvent::Added(snack) => format!("added {}", snack.message()),
                StoreEvent::Removed { snack, reason } => {
                    format!("removed {} {:?}", snack.message(), reason)
                }
                StoreEvent::Cleared => "cleared".to_string(),
            };
            sink.borrow_mut().push(entry);
        });

        store.add(info("A"));
        let b = store.add(info("B"));
        store.dismiss(b);
        store.add(info("C"));
        store.clear();

        assert_eq!(
            *log.borrow(),
            [
                "added A",
                "removed A Evicted",
                "added B",
                "removed B Dismissed",
                "added C",
                "removed C Cleared",
                "cleared",
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut store = SnackStore::manual(Config::default());
        let observer = store.subscribe(move |_| *sink.borrow_mut() += 1);
        store.add(info("A"));
        assert!(store.unsubscribe(observer));
        assert!(!store.unsubscribe(observer));
        store.add(info("B"));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn config_is_sanitized_on_construction() {
        let store = SnackStore::manual(config(0, 5000));
        assert_eq!(store.config().max_snacks, 1);
    }
}
