//! Address resolution.
//!
//! # Responsibilities
//! - Reject blank addresses
//! - Treat strings that do not look like `scheme://address` as UNIX socket paths
//!   and check that the path is usable
//! - Split explicit `scheme://address` strings without normalizing them
//!
//! # Probe race
//! A path that does not exist yet is checked by creating a regular file there,
//! flushing it, and removing it again. Nothing holds the path between that
//! removal and the later bind, so another process can take it in the meantime.
//! The probe only shows that the location was writable at resolution time.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::endpoint::error::EndpointError;
use crate::endpoint::patterns;
use crate::endpoint::transport::Transport;

/// A validated endpoint, ready to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    transport: Transport,
    scheme: String,
    address: String,
}

impl ResolvedEndpoint {
    fn implied_unix(path: &str) -> Self {
        Self {
            transport: Transport::Unix,
            scheme: Transport::Unix.as_str().to_string(),
            address: path.to_string(),
        }
    }

    /// Socket family to bind.
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Scheme text as written in the endpoint string.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Address part, never empty.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Filesystem path of the socket for the UNIX families.
    pub fn sock_path(&self) -> Option<&Path> {
        self.transport
            .is_unix()
            .then(|| Path::new(self.address.as_str()))
    }

    /// Consume into `(scheme, address)`.
    pub fn into_parts(self) -> (String, String) {
        (self.scheme, self.address)
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.address)
    }
}

/// Resolve a raw endpoint string.
///
/// Blank input is `MissingEndpoint`. Input that does not look like
/// `scheme://address` is taken as a UNIX socket path: an existing entry is
/// accepted as is, otherwise a probe file is created and removed. Input that
/// looks like a scheme address but does not fit the grammar is
/// `InvalidAddressFormat`.
pub fn resolve(raw: &str) -> Result<ResolvedEndpoint, EndpointError> {
    if patterns::is_blank(raw) {
        return Err(EndpointError::MissingEndpoint);
    }

    if !patterns::looks_like_proto_addr(raw) {
        probe_sock_path(Path::new(raw))?;
        return Ok(ResolvedEndpoint::implied_unix(raw));
    }

    let invalid = || EndpointError::InvalidAddressFormat {
        address: raw.to_string(),
    };
    let (scheme, address) = patterns::split_proto_addr(raw).ok_or_else(invalid)?;
    let transport: Transport = scheme.parse().map_err(|_| invalid())?;

    tracing::debug!(%transport, address, "Resolved explicit endpoint");

    Ok(ResolvedEndpoint {
        transport,
        scheme: scheme.to_string(),
        address: address.to_string(),
    })
}

/// Check that `path` can hold a UNIX socket file.
fn probe_sock_path(path: &Path) -> Result<(), EndpointError> {
    // Any answer other than "not found" means something is already there.
    match path.metadata() {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        _ => {
            tracing::debug!(path = %path.display(), "Using existing sock path");
            return Ok(());
        }
    }

    let file = File::create(path).map_err(|source| EndpointError::InvalidSockPath {
        path: path.to_path_buf(),
        source,
    })?;

    // std closes on drop and swallows the result, so flush explicitly to
    // surface write-back errors before the handle goes away.
    let verified = file.sync_all();
    drop(file);
    if let Err(source) = verified {
        // Best effort; the verification error is the one reported.
        let _ = std::fs::remove_file(path);
        return Err(EndpointError::SockFileVerificationFailed {
            path: path.to_path_buf(),
            source,
        });
    }

    remove_probe(path)?;

    tracing::debug!(path = %path.display(), "Verified implied sock path");
    Ok(())
}

fn remove_probe(path: &Path) -> Result<(), EndpointError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(EndpointError::SockFileCleanupFailed {
            path: PathBuf::from(path),
            source,
        }),
    }
}
