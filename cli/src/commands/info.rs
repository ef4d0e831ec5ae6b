use colored::*;

use webdeck_common::network::address::LocalAddress;
use webdeck_common::scanning::AddressResolver;
use webdeck_core::network::interface::InterfaceResolver;

use crate::terminal::{colors, print};

pub fn info() -> anyhow::Result<()> {
    let address: LocalAddress = InterfaceResolver.resolve();

    let value: ColoredString = match address {
        LocalAddress::V4(ip) => ip.to_string().color(colors::IPV4_ADDR),
        LocalAddress::Unknown => address.to_string().red().bold(),
    };
    print::aligned_line("Local address", value);

    if address.is_unknown() {
        anyhow::bail!("no non-loopback IPv4 address found, scans would find nothing");
    }
    Ok(())
}
