// SPDX-License-Identifier: MPL-2.0
//! Hook-style dispatch façade.
//!
//! `SnackMate` borrows a store and forwards every call to
//! [`SnackStore::add`], [`SnackStore::remove`] or [`SnackStore::clear`].

use super::record::{Severity, SnackDraft, SnackId, SnackOptions};
use super::scheduler::Scheduler;
use super::store::SnackStore;

/// Dispatch surface returned by [`SnackProvider::snackmate`](super::SnackProvider::snackmate).
#[derive(Debug)]
pub struct SnackMate<'a, S: Scheduler> {
    store: &'a mut SnackStore<S>,
}

impl<'a, S: Scheduler> SnackMate<'a, S> {
    pub fn new(store: &'a mut SnackStore<S>) -> Self {
        Self { store }
    }

    /// Shows a snack. `None` severity means [`Severity::Info`].
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Option<Severity>,
        options: SnackOptions,
    ) -> SnackId {
        let draft = SnackDraft::new(severity.unwrap_or_default(), message).with_options(options);
        self.store.add(draft)
    }

    pub fn success(&mut self, message: impl Into<String>, options: SnackOptions) -> SnackId {
        self.show(message, Some(Severity::Success), options)
    }

    pub fn error(&mut self, message: impl Into<String>, options: SnackOptions) -> SnackId {
        self.show(message, Some(Severity::Error), options)
    }

    pub fn warning(&mut self, message: impl Into<String>, options: SnackOptions) -> SnackId {
        self.show(message, Some(Severity::Warning), options)
    }

    pub fn info(&mut self, message: impl Into<String>, options: SnackOptions) -> SnackId {
        self.show(message, Some(Severity::Info), options)
    }

    /// Removes a snack by id. Absent ids are ignored.
    pub fn remove(&mut self, id: SnackId) -> bool {
        self.store.remove(id)
    }

    /// Removes every snack.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &SnackStore<S> {
        &*self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::snack::Position;
    use std::time::Duration;

    #[test]
    fn severity_entry_points_set_severity() {
        let mut store = SnackStore::manual(Config::default());
        let mut snackmate = store.dispatch();

        let ids = [
            (snackmate.success("ok", SnackOptions::new()), Severity::Success),
            (snackmate.error("bad", SnackOptions::new()), Severity::Error),
            (snackmate.warning("hmm", SnackOptions::new()), Severity::Warning),
            (snackmate.info("fyi", SnackOptions::new()), Severity::Info),
        ];

        for (id, severity) in ids {
            assert_eq!(store.get(id).map(|s| s.severity()), Some(severity));
        }
    }

    #[test]
    fn show_without_severity_defaults_to_info() {
        let mut store = SnackStore::manual(Config::default());
        let id = store.dispatch().show("plain", None, SnackOptions::new());
        assert_eq!(store.get(id).map(|s| s.severity()), Some(Severity::Info));
    }

    #[test]
    fn options_are_forwarded() {
        let mut store = SnackStore::manual(Config::default());
        let id = store.dispatch().error(
            "custom",
            SnackOptions::new()
                .duration(Duration::from_millis(750))
                .position(Position::TopRight),
        );

        let snack = store.get(id).unwrap();
        assert_eq!(snack.duration(), Duration::from_millis(750));
        assert_eq!(snack.position(), Position::TopRight);
    }

    #[test]
    fn remove_and_clear_delegate_to_store() {
        let mut store = SnackStore::manual(Config::default());
        let mut snackmate = store.dispatch();
        let first = snackmate.info("one", SnackOptions::new());
        snackmate.info("two", SnackOptions::new());
        snackmate.info("three", SnackOptions::new());

        assert!(snackmate.remove(first));
        assert!(!snackmate.remove(first));
        assert_eq!(snackmate.store().len(), 2);

        snackmate.clear();
        assert!(store.is_empty());
    }
}
