//! Non-fatal configuration diagnostics.
//!
//! Nothing in this crate has an unrecoverable error class: a rejected
//! operation leaves the prior state untouched and surfaces one of these so
//! the host can log or ignore it.

use thiserror::Error;

/// A configuration request that was rejected without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Choice label and value lists must be the same length.
    #[error("choice list mismatch: {labels} labels vs {values} values")]
    ChoiceLengthMismatch { labels: usize, values: usize },

    /// An empty choice list has no valid index to clamp into.
    #[error("choice list is empty")]
    EmptyChoiceList,
}
