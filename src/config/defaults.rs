// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Duration**: Auto-dismiss timing
//! - **Queue**: Maximum number of simultaneous snacks

use crate::snack::Position;

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Default auto-dismiss duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Longest accepted auto-dismiss duration (10 minutes). Zero is always
/// accepted and means "never auto-dismiss".
pub const MAX_DURATION_MS: u64 = 600_000;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default maximum number of snacks kept in the queue.
pub const DEFAULT_MAX_SNACKS: usize = 5;

/// Minimum queue size; a zero-length queue would drop every snack.
pub const MIN_MAX_SNACKS: usize = 1;

/// Maximum queue size.
pub const MAX_MAX_SNACKS: usize = 50;

// ==========================================================================
// Position Defaults
// ==========================================================================

pub const DEFAULT_POSITION: Position = Position::BottomRight;

const _: () = {
    assert!(MIN_MAX_SNACKS > 0);
    assert!(DEFAULT_MAX_SNACKS >= MIN_MAX_SNACKS && DEFAULT_MAX_SNACKS <= MAX_MAX_SNACKS);
    assert!(DEFAULT_DURATION_MS <= MAX_DURATION_MS);
};
