//! Shutdown coordination for the plugin.

use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use crate::net::EndpointListener;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes a listener's UNIX socket file when dropped.
///
/// Inert for IP listeners, and when cleanup is disabled.
#[derive(Debug)]
pub struct SockFileGuard {
    path: Option<PathBuf>,
}

impl SockFileGuard {
    /// Guard the socket file of `listener`, if it has one and `enabled` is set.
    pub fn new(listener: &EndpointListener, enabled: bool) -> Self {
        let path = listener
            .sock_path()
            .filter(|_| enabled)
            .map(Path::to_path_buf);
        Self { path }
    }

    /// Socket file that will be removed, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Keep the socket file on disk.
    pub fn disarm(&mut self) {
        self.path = None;
    }

    /// Remove the socket file now.
    pub fn remove(&mut self) -> io::Result<()> {
        let Some(path) = self.path.take() else {
            return Ok(());
        };
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Removed sock file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for SockFileGuard {
    fn drop(&mut self) {
        let path = self.path.clone();
        if let Err(e) = self.remove() {
            tracing::warn!(
                path = ?path,
                error = %e,
                "Failed to remove sock file"
            );
        }
    }
}
