//! CSI hostpath plugin bootstrap library.
//!
//! Resolves the `CSI_ENDPOINT` address into a bound listener for the
//! plugin's RPC server.

pub mod config;
pub mod endpoint;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::PluginConfig;
pub use endpoint::{resolve, EndpointError, ResolvedEndpoint, Transport};
pub use net::{listen, EndpointListener};
