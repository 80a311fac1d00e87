//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (transport, address, path)
//!
//! Consumers:
//!     → logging.rs installs the fmt subscriber (stdout)
//! ```

pub mod logging;
