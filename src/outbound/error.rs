//! Outbound call error taxonomy.

use thiserror::Error;

use crate::cancel::CancelReason;

/// Failure modes of one outbound call.
///
/// None of these are retried; the handler boundary logs them and moves on.
#[derive(Debug, Error)]
pub enum CallError {
    /// The configured target is not a valid URL. Fatal to the call,
    /// surfaced before anything is issued.
    #[error("invalid target url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request (or the client it rides on) could not be constructed.
    #[error("failed to build outbound request: {0}")]
    Build(#[source] reqwest::Error),

    /// The downstream was unreachable or the connection failed mid-flight.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The caller-side bound elapsed before the downstream answered.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The call was cancelled before the downstream answered.
    #[error("canceled")]
    Canceled,

    /// The issuing task went away without delivering an outcome. Internal
    /// bookkeeping; never surfaced past the drain that observes it.
    #[error("call abandoned before completion")]
    Abandoned,
}

impl From<CancelReason> for CallError {
    fn from(reason: CancelReason) -> Self {
        match reason {
            CancelReason::DeadlineExceeded => CallError::DeadlineExceeded,
            CancelReason::Canceled => CallError::Canceled,
        }
    }
}
