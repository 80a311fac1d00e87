//! CSI hostpath plugin.
//!
//! # Architecture Overview
//!
//! ```text
//!     CSI_ENDPOINT ──▶ endpoint::source ──▶ endpoint::resolver ──▶ net::listener ──▶ RPC server
//!                                                 │
//!                                                 ▼
//!                                     probe file (implied sock paths)
//! ```
//!
//! The RPC services are registered by the embedding server; this binary
//! binds the endpoint, holds it until SIGINT/SIGTERM, and removes the
//! UNIX socket file on the way out.

use std::path::PathBuf;

use clap::Parser;

use csi_hostpath::config::load_or_default;
use csi_hostpath::lifecycle::{signals, startup};
use csi_hostpath::observability::logging;

#[derive(Parser)]
#[command(name = "hostpath-plugin")]
#[command(about = "CSI hostpath plugin bootstrap", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint_variable = %config.endpoint.env_var,
        remove_sock_file_on_exit = config.endpoint.remove_sock_file_on_exit,
        "hostpath-plugin starting"
    );

    if let Err(e) = startup::run_until(&config, startup::hold_listener, signals::shutdown_signal()).await {
        tracing::error!(error = %e, config_error = e.is_config_error(), "Failed to listen");
        return Err(e.into());
    }

    Ok(())
}
