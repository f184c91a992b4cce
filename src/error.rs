// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Queue operations never fail; the only domain error is asking for the
//! dispatch surface while no provider is mounted. The remaining variants
//! cover configuration persistence, command-line parsing and telemetry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The dispatch or imperative surface was requested outside a mounted
    /// [`SnackProvider`](crate::snack::SnackProvider).
    #[error("snackmate used outside of a mounted SnackProvider")]
    OutsideProvider,

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("invalid value for {flag}: {message}")]
    InvalidArgument { flag: &'static str, message: String },

    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
