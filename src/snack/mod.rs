// SPDX-License-Identifier: MPL-2.0
//! Snack queue: records, store, timers and the dispatch façade.
//!
//! Nothing in this module depends on iced; the renderer in
//! [`crate::ui::toaster`] is one consumer of it.
//!
//! # Components
//!
//! - [`record`] - `Snack`, `Severity`, `Position` and the draft/options builders
//! - [`id`] - Id generators
//! - [`scheduler`] - Cancellable auto-dismiss timers
//! - [`store`] - `SnackStore`, the bounded queue
//! - [`provider`] - `SnackProvider`, the configuration scope
//! - [`dispatch`] - `SnackMate`, the per-severity entry points
//!
//! # Usage
//!
//! ```
//! use snackmate::config::Config;
//! use snackmate::snack::{ManualScheduler, SnackOptions, SnackProvider};
//! use std::time::Duration;
//!
//! let mut provider = SnackProvider::mounted(Config::default(), ManualScheduler::new());
//! let mut snackmate = provider.snackmate().expect("provider is mounted");
//! snackmate.success("Image saved", SnackOptions::new());
//! snackmate.error("Upload failed", SnackOptions::new().sticky());
//!
//! let store = provider.store_mut().expect("provider is mounted");
//! store.advance(Duration::from_secs(10));
//! assert_eq!(store.len(), 1);
//! ```

pub mod dispatch;
pub mod id;
pub mod provider;
pub mod record;
pub mod scheduler;
pub mod store;

pub use dispatch::SnackMate;
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use provider::SnackProvider;
pub use record::{
    OnClose, Position, Severity, Snack, SnackDraft, SnackId, SnackOptions, UnknownPosition,
};
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler};
pub use store::{ObserverId, RemovalReason, SnackStore, StoreEvent};
