//! Engine error type. Faults inside a tick are logged and isolated instead
//! of surfacing here; these are the errors callers can actually act on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown element: {0}")]
    UnknownElement(String),

    #[error("invalid element bundle: {0}")]
    InvalidBundle(String),
}
