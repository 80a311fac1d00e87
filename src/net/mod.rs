//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedEndpoint (from endpoint::resolver)
//!     → listener.rs (pick socket family, resolve host, bind)
//!     → EndpointListener
//!     → Hand off to the RPC server
//! ```
//!
//! # Design Decisions
//! - One bind attempt; failures are returned, never retried
//! - tcp4/tcp6 and udp4/udp6 only bind addresses of their own family
//! - Socket families tokio cannot open report `Unsupported` at bind time

pub mod listener;

pub use listener::{listen, listen_from, BoundSocket, EndpointListener};
