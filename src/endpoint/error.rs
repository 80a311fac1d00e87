//! Endpoint error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn the configured endpoint into a listener.
///
/// Every variant is fatal at startup. Nothing here is retried.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Variable unset, or the address is blank.
    #[error("missing endpoint: a non-empty network address is required")]
    MissingEndpoint,

    /// Implied UNIX socket path cannot be created.
    #[error("invalid implied sock file: {}: {}", .path.display(), .source)]
    InvalidSockPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Probe file was created but could not be flushed and closed.
    #[error("failed to verify network address as sock file: {}", .path.display())]
    SockFileVerificationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Probe file could not be removed.
    #[error("failed to remove verified sock file: {}", .path.display())]
    SockFileCleanupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Looks like `scheme://address` but does not fit the grammar.
    #[error("invalid network address: {address}")]
    InvalidAddressFormat { address: String },

    /// The OS refused to bind a well-formed endpoint.
    #[error("failed to listen on {transport}://{address}: {source}")]
    ListenFailed {
        transport: String,
        address: String,
        #[source]
        source: io::Error,
    },
}

impl EndpointError {
    /// True if the endpoint configuration itself is at fault, false if the
    /// OS rejected an otherwise valid endpoint.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, EndpointError::ListenFailed { .. })
    }
}
