//! Error types for the wardlens engine.
//!
//! Only the top-level data load (and configuration / feed misuse at the
//! edges) can fail. Malformed fields and dangling references inside a loaded
//! dataset are recovered locally by the normalizer and the derivations, so
//! they never show up here.

use thiserror::Error;

/// The unified error type for the wardlens crates.
#[derive(Debug, Error)]
pub enum WardlensError {
    /// A raw dataset could not be fetched or decoded.
    ///
    /// The view layer shows an error state for this; no cached or partial
    /// data is substituted.
    #[error("failed to load dataset '{dataset}': {reason}")]
    LoadFailed { dataset: String, reason: String },

    /// A configuration document is malformed or holds an invalid range.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The consumer of a load was torn down before the result was applied.
    #[error("load {load_id} was cancelled; result discarded")]
    Cancelled { load_id: String },

    /// A live feed was driven through a transition it does not support.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },
}

impl WardlensError {
    /// True for failures the view layer should render as "data unavailable".
    pub fn is_load_failure(&self) -> bool {
        matches!(self, WardlensError::LoadFailed { .. })
    }
}

/// Convenience alias used throughout the wardlens crates.
pub type WardlensResult<T> = Result<T, WardlensError>;
