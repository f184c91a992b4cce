// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Follows the Elm-style "state down, messages up" pattern.
//!
//! - [`toaster`] - Toast renderer for the snack queue
//! - [`design_tokens`] - Design system constants (colors, spacing, motion)

pub mod design_tokens;
pub mod toaster;
