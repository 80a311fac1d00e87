//! Endpoint lookup from the process environment.

use crate::endpoint::error::EndpointError;
use crate::endpoint::patterns;
use crate::endpoint::resolver::{resolve, ResolvedEndpoint};

/// Environment variable holding the plugin endpoint.
pub const CSI_ENDPOINT: &str = "CSI_ENDPOINT";

/// Resolve the endpoint named by `CSI_ENDPOINT`.
pub fn read_endpoint() -> Result<ResolvedEndpoint, EndpointError> {
    read_endpoint_from(CSI_ENDPOINT)
}

/// Resolve the endpoint named by the environment variable `var`.
///
/// Unset, non-unicode, and blank values all report `MissingEndpoint`
/// without consulting the resolver.
pub fn read_endpoint_from(var: &str) -> Result<ResolvedEndpoint, EndpointError> {
    let raw = match std::env::var(var) {
        Ok(raw) if !patterns::is_blank(&raw) => raw,
        _ => {
            tracing::error!(variable = var, "Endpoint variable is unset or blank");
            return Err(EndpointError::MissingEndpoint);
        }
    };

    tracing::debug!(variable = var, endpoint = %raw, "Read endpoint from environment");
    resolve(&raw)
}
