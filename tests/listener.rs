//! Listener factory and bootstrap lifecycle tests.

use std::time::Duration;
use tokio::sync::broadcast;

use csi_hostpath::config::PluginConfig;
use csi_hostpath::endpoint::{resolve, EndpointError, Transport};
use csi_hostpath::lifecycle::{startup, SockFileGuard};
use csi_hostpath::net::{listen_from, BoundSocket, EndpointListener};

mod common;

#[tokio::test]
async fn binds_tcp_from_env() {
    let var = common::set_endpoint("bind_tcp", "tcp://127.0.0.1:0");
    let listener = listen_from(&var).await.unwrap();

    assert!(matches!(listener.socket(), BoundSocket::Tcp(_)));
    let local = listener.local_endpoint().unwrap();
    assert!(local.starts_with("tcp://127.0.0.1:"));
    assert!(!local.ends_with(":0"));
    assert_eq!(listener.sock_path(), None);
}

#[tokio::test]
async fn binds_udp4_on_bare_port() {
    let listener = EndpointListener::bind(resolve("udp4://:0").unwrap()).await.unwrap();
    assert!(matches!(listener.socket(), BoundSocket::Udp(_)));
    assert!(listener.local_endpoint().unwrap().starts_with("udp4://0.0.0.0:"));
}

#[tokio::test]
async fn bare_port_tcp_prefers_dual_stack() {
    let listener = EndpointListener::bind(resolve("tcp://:0").unwrap()).await.unwrap();
    let BoundSocket::Tcp(tcp) = listener.socket() else {
        panic!("expected tcp listener");
    };
    let local = tcp.local_addr().unwrap();
    assert!(local.ip().is_unspecified());
    assert_ne!(local.port(), 0);
}

#[tokio::test]
async fn port_in_use_is_listen_failed() {
    let first = EndpointListener::bind(resolve("tcp://127.0.0.1:0").unwrap()).await.unwrap();
    let BoundSocket::Tcp(tcp) = first.socket() else {
        panic!("expected tcp listener");
    };
    let taken = tcp.local_addr().unwrap();

    let err = EndpointListener::bind(resolve(&format!("tcp://{taken}")).unwrap())
        .await
        .unwrap_err();
    match &err {
        EndpointError::ListenFailed { transport, address, source } => {
            assert_eq!(transport, "tcp");
            assert_eq!(address, &taken.to_string());
            assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
        }
        other => panic!("{other:?}"),
    }
    assert!(!err.is_config_error());
}

#[tokio::test]
async fn resolver_errors_propagate_unchanged() {
    let var = common::set_endpoint("bind_bad", "tcp6://");
    assert!(matches!(
        listen_from(&var).await,
        Err(EndpointError::InvalidAddressFormat { .. })
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn binds_implied_unix_path() {
    let (_dir, path) = common::sock_path("csi.sock");
    let var = common::set_endpoint("bind_unix", path.to_str().unwrap());

    let listener = listen_from(&var).await.unwrap();
    assert!(matches!(listener.socket(), BoundSocket::Unix(_)));
    assert_eq!(listener.endpoint().transport(), Transport::Unix);
    assert!(path.exists());

    let mut guard = SockFileGuard::new(&listener, true);
    assert_eq!(guard.path(), Some(path.as_path()));
    drop(listener);
    guard.remove().unwrap();
    assert!(!path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn unixgram_binds_datagram_socket() {
    let (_dir, path) = common::sock_path("csi.dgram");
    let raw = format!("unixgram://{}", path.display());
    let listener = EndpointListener::bind(resolve(&raw).unwrap()).await.unwrap();
    assert!(matches!(listener.socket(), BoundSocket::UnixDatagram(_)));

    let mut guard = SockFileGuard::new(&listener, false);
    assert_eq!(guard.path(), None);
    guard.remove().unwrap();
    assert!(path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn run_until_removes_sock_file_after_stop() {
    let (_dir, path) = common::sock_path("plugin.sock");
    let mut config = PluginConfig::default();
    config.endpoint.env_var = common::set_endpoint("run_unix", path.to_str().unwrap());
    config.shutdown.grace_period_secs = 1;

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();
    let serve = move |listener: EndpointListener, shutdown: broadcast::Receiver<()>| {
        let _ = ready_tx.send(listener.sock_path().map(|p| p.exists()));
        startup::hold_listener(listener, shutdown)
    };
    let stop = async move {
        assert_eq!(ready_rx.await.unwrap(), Some(true));
    };

    startup::run_until(&config, serve, stop).await.unwrap();
    assert!(!path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn run_until_keeps_sock_file_when_disabled() {
    let (_dir, path) = common::sock_path("kept.sock");
    let mut config = PluginConfig::default();
    config.endpoint.env_var = common::set_endpoint("run_keep", path.to_str().unwrap());
    config.endpoint.remove_sock_file_on_exit = false;

    startup::run_until(&config, startup::hold_listener, tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn run_until_aborts_stuck_server() {
    let mut config = PluginConfig::default();
    config.endpoint.env_var = common::set_endpoint("run_stuck", "tcp://127.0.0.1:0");
    config.shutdown.grace_period_secs = 1;

    let serve = |listener: EndpointListener, _shutdown: broadcast::Receiver<()>| async move {
        let _listener = listener;
        std::future::pending::<()>().await;
    };

    let started = std::time::Instant::now();
    startup::run_until(&config, serve, async {}).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
}
