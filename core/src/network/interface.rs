use pnet::datalink::{self, NetworkInterface};
use tracing::{debug, warn};

use webdeck_common::network::address::LocalAddress;
use webdeck_common::network::interface::select_local_ipv4;
use webdeck_common::scanning::AddressResolver;

/// Resolves the local address from the live interface table.
///
/// Interfaces are re-read on every call; nothing is cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterfaceResolver;

impl AddressResolver for InterfaceResolver {
    fn resolve(&self) -> LocalAddress {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();

        match select_local_ipv4(&interfaces) {
            Ok(ip) => {
                debug!("local address: {ip}");
                ip.into()
            }
            Err(e) => {
                warn!("Failed to resolve local address: {e}");
                LocalAddress::Unknown
            }
        }
    }
}
