// SPDX-License-Identifier: MPL-2.0
//! Core snack data structures.
//!
//! This module defines the immutable `Snack` record, its `Severity` and
//! `Position`, and the `SnackDraft`/`SnackOptions` builders used to request
//! a new snack before the store assigns it an id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a snack.
///
/// Ids are handed out by an [`IdGenerator`](super::IdGenerator) when the
/// store accepts a draft; they are never reused within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnackId(Uuid);

impl SnackId {
    /// Wraps a raw UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Builds an id from a plain counter value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SnackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Severity level drives the accent colour and icon of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully (green).
    Success,
    /// Error requiring attention (red).
    Error,
    /// Warning that doesn't block operation (amber).
    Warning,
    /// Informational message (blue). Used when no severity is given.
    #[default]
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen anchor a toast group is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Position {
    /// All anchors, in rendering order.
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }

    #[must_use]
    pub fn is_top(&self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a position name is not one of the six anchors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown position '{0}', expected one of: top-left, top-center, top-right, \
     bottom-left, bottom-center, bottom-right"
)]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == normalized)
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

/// Zero-argument callback run when a snack is closed by the user or times out.
#[derive(Clone)]
pub struct OnClose(Arc<dyn Fn() + Send + Sync>);

impl OnClose {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for OnClose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnClose(..)")
    }
}

/// Per-call overrides accepted by every dispatch entry point.
///
/// `duration: None` falls back to the configured default, while
/// `Some(Duration::ZERO)` disables auto-dismiss for that snack.
#[derive(Debug, Clone, Default)]
pub struct SnackOptions {
    pub duration: Option<Duration>,
    pub position: Option<Position>,
    pub on_close: Option<OnClose>,
}

impl SnackOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Shorthand for a zero duration: the snack stays until closed.
    #[must_use]
    pub fn sticky(self) -> Self {
        self.duration(Duration::ZERO)
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(OnClose::new(callback));
        self
    }
}

/// A snack request that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct SnackDraft {
    pub message: String,
    pub severity: Severity,
    pub options: SnackOptions,
}

impl SnackDraft {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            options: SnackOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SnackOptions) -> Self {
        self.options = options;
        self
    }
}

/// A snack accepted by the store.
#[derive(Debug, Clone)]
pub struct Snack {
    id: SnackId,
    message: String,
    severity: Severity,
    /// Zero means the snack is never auto-dismissed.
    duration: Duration,
    position: Position,
    on_close: Option<OnClose>,
    created_at: Instant,
}

impl Snack {
    /// Resolves a draft against the configured defaults.
    pub(crate) fn from_draft(
        id: SnackId,
        draft: SnackDraft,
        default_duration: Duration,
        default_position: Position,
    ) -> Self {
        let SnackDraft {
            message,
            severity,
            options,
        } = draft;

        Self {
            id,
            message,
            severity,
            duration: options.duration.unwrap_or(default_duration),
            position: options.position.unwrap_or(default_position),
            on_close: options.on_close,
            created_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> SnackId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns whether this snack removes itself after its duration.
    #[must_use]
    pub fn auto_dismisses(&self) -> bool {
        !self.duration.is_zero()
    }

    #[must_use]
    pub fn has_on_close(&self) -> bool {
        self.on_close.is_some()
    }

    pub(crate) fn run_on_close(&self) {
        if let Some(callback) = &self.on_close {
            callback.call();
        }
    }
}
