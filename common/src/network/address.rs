use std::fmt;
use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

/// The IPv4 address of this machine as seen by a scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalAddress {
    V4(Ipv4Addr),
    /// No interface carried a usable address.
    Unknown,
}

impl LocalAddress {
    pub fn ip(&self) -> Option<Ipv4Addr> {
        match self {
            LocalAddress::V4(ip) => Some(*ip),
            LocalAddress::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LocalAddress::Unknown)
    }
}

impl From<Ipv4Addr> for LocalAddress {
    fn from(ip: Ipv4Addr) -> Self {
        LocalAddress::V4(ip)
    }
}

impl fmt::Display for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalAddress::V4(ip) => ip.fmt(f),
            LocalAddress::Unknown => f.write_str("Unknown"),
        }
    }
}

impl Serialize for LocalAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
