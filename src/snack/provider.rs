// SPDX-License-Identifier: MPL-2.0
//! Configuration scope for a snack store.
//!
//! A store only exists while its provider is mounted. Asking an unmounted
//! provider for the dispatch surface is a wiring mistake in the embedding
//! application and fails with [`Error::OutsideProvider`].

use super::dispatch::SnackMate;
use super::scheduler::{ManualScheduler, Scheduler};
use super::store::SnackStore;
use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct SnackProvider<S: Scheduler = ManualScheduler> {
    store: Option<SnackStore<S>>,
}

impl<S: Scheduler> Default for SnackProvider<S> {
    fn default() -> Self {
        Self { store: None }
    }
}

impl<S: Scheduler> SnackProvider<S> {
    /// Creates an unmounted provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that is already mounted.
    pub fn mounted(config: Config, scheduler: S) -> Self {
        let mut provider = Self::new();
        provider.mount(config, scheduler);
        provider
    }

    /// Mounts a fresh store. An existing store is cleared and replaced.
    pub fn mount(&mut self, config: Config, scheduler: S) {
        self.unmount();
        let store = SnackStore::new(config, scheduler);
        tracing::info!(
            position = %store.config().default_position,
            duration_ms = store.config().default_duration_ms,
            max_snacks = store.config().max_snacks,
            "snack provider mounted"
        );
        self.store = Some(store);
    }

    /// Clears and drops the store, disarming every pending timer.
    pub fn unmount(&mut self) {
        if let Some(mut store) = self.store.take() {
            store.clear();
            tracing::info!("snack provider unmounted");
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<&SnackStore<S>> {
        self.store.as_ref().ok_or(Error::OutsideProvider)
    }

    pub fn store_mut(&mut self) -> Result<&mut SnackStore<S>> {
        self.store.as_mut().ok_or(Error::OutsideProvider)
    }

    /// Returns the dispatch surface of the mounted store.
    pub fn snackmate(&mut self) -> Result<SnackMate<'_, S>> {
        self.store_mut().map(SnackMate::new)
    }
}
