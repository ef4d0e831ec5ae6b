use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::error::ResolveError;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn first_routable_ipv4(&self) -> Option<Ipv4Addr>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn first_routable_ipv4(&self) -> Option<Ipv4Addr> {
        self.get_ipv4_nets()
            .into_iter()
            .map(|net| net.ip())
            .find(|ip| !ip.is_loopback())
    }
}

/// Picks the first non-loopback IPv4 address, walking interfaces and their
/// addresses in the order the platform reported them.
///
/// Only the address is checked for loopback, not the interface flags.
pub fn select_local_ipv4(interfaces: &[NetworkInterface]) -> Result<Ipv4Addr, ResolveError> {
    if interfaces.is_empty() {
        return Err(ResolveError::NoInterfaces);
    }

    interfaces
        .iter()
        .find_map(|intf| intf.first_routable_ipv4())
        .ok_or(ResolveError::NoQualifyingAddress {
            interfaces: interfaces.len(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::datalink::MacAddr;
    use pnet::ipnetwork::Ipv6Network;
    use std::net::Ipv6Addr;

    fn ni(name: &str, index: u32, ips: &[IpNetwork]) -> NetworkInterface {
        NetworkInterface {
            name: name.into(),
            description: "".into(),
            index,
            mac: Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
            ips: ips.to_vec(),
            flags: 0,
        }
    }

    fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
        IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
    }

    fn v6(s: &str, p: u8) -> IpNetwork {
        IpNetwork::V6(Ipv6Network::new(s.parse::<Ipv6Addr>().unwrap(), p).unwrap())
    }

    fn lo() -> NetworkInterface {
        ni("lo", 1, &[v4(127, 0, 0, 1, 8), v6("::1", 128)])
    }

    #[test]
    fn skips_loopback_and_picks_first_lan_address() {
        let interfaces = vec![
            lo(),
            ni("enp9s0", 2, &[v6("fe80::1", 64), v4(192, 168, 1, 20, 24)]),
            ni("wlan0", 3, &[v4(10, 0, 0, 7, 8)]),
        ];
        assert_eq!(
            select_local_ipv4(&interfaces),
            Ok(Ipv4Addr::new(192, 168, 1, 20))
        );
    }

    #[test]
    fn follows_platform_order_not_preference() {
        let interfaces = vec![
            ni("docker0", 4, &[v4(172, 17, 0, 1, 16)]),
            ni("eth0", 2, &[v4(192, 168, 0, 2, 24)]),
        ];
        assert_eq!(
            select_local_ipv4(&interfaces),
            Ok(Ipv4Addr::new(172, 17, 0, 1))
        );
    }

    #[test]
    fn loopback_address_on_other_interface_is_skipped() {
        let interfaces = vec![
            ni("dummy0", 5, &[v4(127, 0, 0, 2, 8), v4(10, 1, 2, 3, 8)]),
        ];
        assert_eq!(select_local_ipv4(&interfaces), Ok(Ipv4Addr::new(10, 1, 2, 3)));
    }

    #[test]
    fn only_loopback_and_ipv6_yields_error() {
        let interfaces = vec![lo(), ni("tun0", 6, &[v6("2001:db8::1", 64)])];
        assert_eq!(
            select_local_ipv4(&interfaces),
            Err(ResolveError::NoQualifyingAddress { interfaces: 2 })
        );
    }

    #[test]
    fn empty_list_yields_error() {
        assert_eq!(select_local_ipv4(&[]), Err(ResolveError::NoInterfaces));
    }
}
