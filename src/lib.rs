// SPDX-License-Identifier: MPL-2.0
//! `snackmate` provides toast/snackbar notifications for the Iced GUI framework.
//!
//! A [`SnackProvider`](snack::SnackProvider) scopes a bounded, in-memory
//! queue of snacks; the [`SnackMate`](snack::SnackMate) façade enqueues them
//! by severity; the [`Toaster`](ui::toaster::Toaster) renders them in six
//! screen anchors, auto-dismisses them and animates their entry and exit.

pub mod app;
pub mod config;
pub mod error;
pub mod snack;
pub mod telemetry;
pub mod ui;

pub use error::{Error, Result};
