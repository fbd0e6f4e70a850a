//! Unified error types for the regmock workspace.
//!
//! Only lifecycle failures are modeled as Rust errors. Request-level
//! problems (bad limit, unknown repository) are HTTP statuses produced by
//! the route handlers and never surface here.

use std::time::Duration;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum RegmockError {
    /// Binding the listener socket failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the listener attempted to bind.
        addr: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The server did not answer its readiness probe within the budget.
    #[error("registry at {addr} not ready after {waited:?}")]
    NotReady {
        /// Address that was being probed.
        addr: String,
        /// Total time spent polling before giving up.
        waited: Duration,
    },

    /// The background server task terminated for a reason other than a
    /// shutdown request.
    #[error("registry server exited abnormally: {message}")]
    ServerExit {
        /// Description of the abnormal termination.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RegmockError>;
