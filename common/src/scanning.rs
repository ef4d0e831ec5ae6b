//! Collaborator seams of a refresh cycle.
//!
//! The scheduler only talks to these traits, so the concrete resolver and
//! sweep can be swapped for fixed stand-ins in tests.

use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::network::address::LocalAddress;

/// Determines the address a cycle scans and the dashboard displays.
pub trait AddressResolver: Send + Sync {
    /// Never fails; returns [`LocalAddress::Unknown`] instead.
    fn resolve(&self) -> LocalAddress;
}

/// Produces the open TCP ports of an address.
#[async_trait]
pub trait PortScanner: Send + Sync {
    /// Returns the open ports in the order they were observed.
    ///
    /// Callers must treat the result as a set.
    async fn scan(&self, ip: Ipv4Addr) -> Vec<u16>;
}
