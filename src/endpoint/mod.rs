//! Endpoint resolution subsystem.
//!
//! # Data Flow
//! ```text
//! CSI_ENDPOINT (environment)
//!     → source.rs (read variable, reject unset/blank)
//!     → resolver.rs (classify: blank / implied sock path / scheme://address)
//!         → patterns.rs (guess + exact + empty regexes)
//!         → probe file create/verify/remove for implied sock paths
//!     → ResolvedEndpoint (transport, scheme, address)
//!     → net::listener (bind)
//! ```
//!
//! # Design Decisions
//! - Two-stage matching: a broad "looks like a scheme" guess, then a strict
//!   exact match. Strings that fail the guess fall through to path probing;
//!   strings that pass the guess but fail the exact match are rejected.
//! - Resolution is synchronous and one-shot; it runs once at startup.
//! - The probe file is the only filesystem side effect.

pub mod error;
pub mod patterns;
pub mod resolver;
pub mod source;
pub mod transport;

pub use error::EndpointError;
pub use resolver::{resolve, ResolvedEndpoint};
pub use source::{read_endpoint, read_endpoint_from, CSI_ENDPOINT};
pub use transport::Transport;
