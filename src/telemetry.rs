// SPDX-License-Identifier: MPL-2.0
//! Tracing subscriber setup for the demo binary.

use crate::error::{Error, Result};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Installs a global `fmt` subscriber.
///
/// The filter is the first valid candidate among `explicit_filter`,
/// `RUST_LOG` and `info`.
///
/// # Errors
///
/// Returns [`Error::Telemetry`] if no filter parses or a global subscriber
/// is already installed.
pub fn init_tracing(explicit_filter: Option<&str>) -> Result<()> {
    let filter = filter_candidates(explicit_filter, std::env::var("RUST_LOG").ok())
        .into_iter()
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))?;

    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn filter_candidates(explicit: Option<&str>, env: Option<String>) -> Vec<String> {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(env)
        .chain(std::iter::once("info".to_string()))
        .collect()
}
