//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the configured endpoint and bind its listener
//! - Hand the listener to the server and wait for the stop signal
//! - Drain the server, then remove the socket file
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The server is passed in as a closure; this module knows nothing of RPC

use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::config::PluginConfig;
use crate::endpoint::EndpointError;
use crate::lifecycle::shutdown::{Shutdown, SockFileGuard};
use crate::net::{listen_from, EndpointListener};

/// Bind the listener for the endpoint named in `config`.
pub async fn start(config: &PluginConfig) -> Result<EndpointListener, EndpointError> {
    let listener = listen_from(&config.endpoint.env_var).await?;
    tracing::info!(
        endpoint = %listener.endpoint(),
        variable = %config.endpoint.env_var,
        "Endpoint ready"
    );
    Ok(listener)
}

/// Bind, serve until `stop` resolves, then shut down.
///
/// `serve` receives the listener and a shutdown receiver; it should return
/// once the receiver fires. If it is still running after the configured grace
/// period it is aborted. The socket file, if any, is removed last.
pub async fn run_until<S, SFut, F>(config: &PluginConfig, serve: S, stop: F) -> Result<(), EndpointError>
where
    S: FnOnce(EndpointListener, broadcast::Receiver<()>) -> SFut,
    SFut: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()>,
{
    let listener = start(config).await?;
    let _sock_file = SockFileGuard::new(&listener, config.endpoint.remove_sock_file_on_exit);

    let shutdown = Shutdown::new();
    let server = tokio::spawn(serve(listener, shutdown.subscribe()));

    stop.await;
    shutdown.trigger();

    let grace = Duration::from_secs(config.shutdown.grace_period_secs);
    let abort = server.abort_handle();
    if tokio::time::timeout(grace, server).await.is_err() {
        tracing::warn!(grace_secs = grace.as_secs(), "Server did not stop in time, aborting");
        abort.abort();
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Stand-in server: holds the listener until shutdown.
pub async fn hold_listener(listener: EndpointListener, mut shutdown: broadcast::Receiver<()>) {
    let _ = shutdown.recv().await;
    tracing::debug!(endpoint = %listener.endpoint(), "Releasing listener");
}
