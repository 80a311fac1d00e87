//! End-to-end resolution from the environment.

use csi_hostpath::endpoint::{read_endpoint_from, resolve, EndpointError, Transport};

mod common;

#[test]
fn env_tcp_endpoint() {
    let var = common::set_endpoint("env_tcp", "Tcp://localhost:10000");
    let ep = read_endpoint_from(&var).unwrap();
    assert_eq!(ep.transport(), Transport::Tcp);
    assert_eq!(ep.scheme(), "Tcp");
    assert_eq!(ep.address(), "localhost:10000");
}

#[test]
fn env_implied_sock_path_is_probed_and_removed() {
    let (_dir, path) = common::sock_path("csi.sock");
    let var = common::set_endpoint("env_sock", path.to_str().unwrap());

    let ep = read_endpoint_from(&var).unwrap();
    assert_eq!(ep.transport(), Transport::Unix);
    assert_eq!(ep.scheme(), "unix");
    assert_eq!(ep.sock_path(), Some(path.as_path()));
    assert!(!path.exists());
}

#[test]
fn env_blank_and_unset_are_the_same_error() {
    let var = common::set_endpoint("env_blank", "\t ");
    assert!(matches!(read_endpoint_from(&var), Err(EndpointError::MissingEndpoint)));

    std::env::remove_var(&var);
    assert!(matches!(read_endpoint_from(&var), Err(EndpointError::MissingEndpoint)));
}

#[test]
fn malformed_scheme_does_not_touch_the_filesystem() {
    let (dir, _) = common::sock_path("unused");
    let raw = "unix://";
    assert!(matches!(resolve(raw), Err(EndpointError::InvalidAddressFormat { .. })));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn path_in_missing_directory_is_rejected() {
    let (dir, _) = common::sock_path("unused");
    let path = dir.path().join("no-such-dir").join("csi.sock");
    let err = resolve(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, EndpointError::InvalidSockPath { .. }));
    assert!(err.is_config_error());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn explicit_unix_endpoint_is_not_probed() {
    let (dir, path) = common::sock_path("csi.sock");
    let raw = format!("unix://{}", path.display());
    let ep = resolve(&raw).unwrap();
    assert_eq!(ep.transport(), Transport::Unix);
    assert_eq!(ep.address(), path.to_str().unwrap());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
