//! Transport schemes accepted in an endpoint string.

use std::fmt;
use std::str::FromStr;

/// A socket family named by the scheme part of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Tcp,
    Tcp4,
    Tcp6,
    Udp,
    Udp4,
    Udp6,
    Ip,
    Ip4,
    Ip6,
    Unix,
    UnixGram,
    UnixPacket,
}

impl Transport {
    /// Every scheme, in grammar order.
    pub const ALL: [Transport; 12] = [
        Transport::Tcp,
        Transport::Tcp4,
        Transport::Tcp6,
        Transport::Udp,
        Transport::Udp4,
        Transport::Udp6,
        Transport::Ip,
        Transport::Ip4,
        Transport::Ip6,
        Transport::Unix,
        Transport::UnixGram,
        Transport::UnixPacket,
    ];

    /// Canonical lowercase scheme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Tcp4 => "tcp4",
            Transport::Tcp6 => "tcp6",
            Transport::Udp => "udp",
            Transport::Udp4 => "udp4",
            Transport::Udp6 => "udp6",
            Transport::Ip => "ip",
            Transport::Ip4 => "ip4",
            Transport::Ip6 => "ip6",
            Transport::Unix => "unix",
            Transport::UnixGram => "unixgram",
            Transport::UnixPacket => "unixpacket",
        }
    }

    /// True for the UNIX domain families, whose address is a filesystem path.
    pub fn is_unix(&self) -> bool {
        matches!(
            self,
            Transport::Unix | Transport::UnixGram | Transport::UnixPacket
        )
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known schemes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport scheme: {0}")]
pub struct UnknownTransport(pub String);

impl FromStr for Transport {
    type Err = UnknownTransport;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transport::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTransport(s.to_string()))
    }
}
