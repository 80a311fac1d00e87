//! Listener factory.
//!
//! # Responsibilities
//! - Bind the socket family named by a resolved endpoint
//! - Resolve host names and keep only the requested address family
//! - Report OS bind failures as `ListenFailed`, distinct from bad configuration

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::{TcpListener, UdpSocket};
#[cfg(unix)]
use tokio::net::{UnixDatagram, UnixListener};

use crate::endpoint::{read_endpoint_from, EndpointError, ResolvedEndpoint, Transport, CSI_ENDPOINT};

/// A bound socket of whichever family the endpoint asked for.
#[derive(Debug)]
pub enum BoundSocket {
    Tcp(TcpListener),
    Udp(UdpSocket),
    #[cfg(unix)]
    Unix(UnixListener),
    #[cfg(unix)]
    UnixDatagram(UnixDatagram),
    /// `SOCK_SEQPACKET` listener. tokio has no wrapper for it, so it stays a
    /// blocking `socket2::Socket` for the server to register as it sees fit.
    #[cfg(unix)]
    UnixPacket(socket2::Socket),
}

/// A bound socket together with the endpoint it was bound from.
///
/// Handed to the RPC server, which owns it from then on.
#[derive(Debug)]
pub struct EndpointListener {
    endpoint: ResolvedEndpoint,
    socket: BoundSocket,
}

impl EndpointListener {
    /// Bind the socket described by `endpoint`.
    pub async fn bind(endpoint: ResolvedEndpoint) -> Result<Self, EndpointError> {
        let socket = bind_socket(&endpoint)
            .await
            .map_err(|source| EndpointError::ListenFailed {
                transport: endpoint.transport().to_string(),
                address: endpoint.address().to_string(),
                source,
            })?;

        let listener = Self { endpoint, socket };
        tracing::info!(
            transport = %listener.endpoint.transport(),
            address = %listener.local_endpoint().unwrap_or_else(|_| listener.endpoint.to_string()),
            "Listener bound"
        );
        Ok(listener)
    }

    /// Endpoint this listener was bound from.
    pub fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }

    /// The bound socket.
    pub fn socket(&self) -> &BoundSocket {
        &self.socket
    }

    /// Give up the endpoint and keep only the socket.
    pub fn into_socket(self) -> BoundSocket {
        self.socket
    }

    /// Socket file backing this listener, for the UNIX families.
    pub fn sock_path(&self) -> Option<&Path> {
        self.endpoint.sock_path()
    }

    /// `transport://address` as actually bound.
    ///
    /// For IP families this carries the OS-assigned port when the endpoint
    /// asked for port 0.
    pub fn local_endpoint(&self) -> io::Result<String> {
        let transport = self.endpoint.transport();
        match &self.socket {
            BoundSocket::Tcp(l) => Ok(format!("{transport}://{}", l.local_addr()?)),
            BoundSocket::Udp(s) => Ok(format!("{transport}://{}", s.local_addr()?)),
            #[cfg(unix)]
            BoundSocket::Unix(_) | BoundSocket::UnixDatagram(_) | BoundSocket::UnixPacket(_) => {
                Ok(format!("{transport}://{}", self.endpoint.address()))
            }
        }
    }
}

/// Bind the endpoint named by `CSI_ENDPOINT`.
pub async fn listen() -> Result<EndpointListener, EndpointError> {
    listen_from(CSI_ENDPOINT).await
}

/// Bind the endpoint named by the environment variable `var`.
pub async fn listen_from(var: &str) -> Result<EndpointListener, EndpointError> {
    let endpoint = read_endpoint_from(var)?;
    EndpointListener::bind(endpoint).await
}

async fn bind_socket(endpoint: &ResolvedEndpoint) -> io::Result<BoundSocket> {
    let transport = endpoint.transport();
    let address = endpoint.address();

    match transport {
        Transport::Tcp | Transport::Tcp4 | Transport::Tcp6 => {
            let addrs = socket_addrs(transport, address).await?;
            Ok(BoundSocket::Tcp(TcpListener::bind(&addrs[..]).await?))
        }
        Transport::Udp | Transport::Udp4 | Transport::Udp6 => {
            let addrs = socket_addrs(transport, address).await?;
            Ok(BoundSocket::Udp(UdpSocket::bind(&addrs[..]).await?))
        }
        #[cfg(unix)]
        Transport::Unix => Ok(BoundSocket::Unix(UnixListener::bind(address)?)),
        #[cfg(unix)]
        Transport::UnixGram => Ok(BoundSocket::UnixDatagram(UnixDatagram::bind(address)?)),
        #[cfg(unix)]
        Transport::UnixPacket => Ok(BoundSocket::UnixPacket(bind_seqpacket(address)?)),
        _ => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{transport} sockets are not supported on this platform"),
        )),
    }
}

#[cfg(unix)]
fn bind_seqpacket(path: &str) -> io::Result<socket2::Socket> {
    use socket2::{Domain, SockAddr, Socket, Type};

    let socket = Socket::new(Domain::UNIX, Type::SEQPACKET, None)?;
    socket.bind(&SockAddr::unix(path)?)?;
    socket.listen(SEQPACKET_BACKLOG)?;
    Ok(socket)
}

#[cfg(unix)]
const SEQPACKET_BACKLOG: i32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Any,
    V4,
    V6,
}

impl Family {
    fn of(transport: Transport) -> Self {
        match transport {
            Transport::Tcp4 | Transport::Udp4 | Transport::Ip4 => Family::V4,
            Transport::Tcp6 | Transport::Udp6 | Transport::Ip6 => Family::V6,
            _ => Family::Any,
        }
    }

    fn admits(&self, addr: &SocketAddr) -> bool {
        match self {
            Family::Any => true,
            Family::V4 => addr.is_ipv4(),
            Family::V6 => addr.is_ipv6(),
        }
    }

    /// Wildcard hosts, in bind preference order.
    ///
    /// `Any` tries the dual-stack `[::]` first and falls back to `0.0.0.0`
    /// on hosts without IPv6.
    fn unspecified(&self) -> &'static [&'static str] {
        match self {
            Family::Any => &["[::]", "0.0.0.0"],
            Family::V4 => &["0.0.0.0"],
            Family::V6 => &["[::]"],
        }
    }
}

/// Resolve `address` to the socket addresses allowed for `transport`.
///
/// A bare `:port` binds every interface of the family.
async fn socket_addrs(transport: Transport, address: &str) -> io::Result<Vec<SocketAddr>> {
    let family = Family::of(transport);
    let targets: Vec<String> = if address.starts_with(':') {
        family
            .unspecified()
            .iter()
            .map(|host| format!("{host}{address}"))
            .collect()
    } else {
        vec![address.to_string()]
    };

    let mut addrs = Vec::new();
    for target in targets {
        addrs.extend(
            tokio::net::lookup_host(target)
                .await?
                .filter(|a| family.admits(a)),
        );
    }

    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no {transport} address found for {address}"),
        ));
    }
    Ok(addrs)
}
