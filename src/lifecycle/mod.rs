//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Resolve endpoint → Bind listener → Hand to server
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Notify server → Wait (bounded) → Remove sock file → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then endpoint, then listener
//! - Shutdown has timeout: the server is aborted after the grace period
//! - The sock file is removed only after the server has let go of it

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, SockFileGuard};
