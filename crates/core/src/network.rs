//! Wired ethernet detection.
//!
//! Interfaces are matched by name: anything that looks wireless, loopback
//! or bluetooth is skipped first, then the remaining names are checked for
//! an ethernet fragment. A candidate only counts once it is up and holds a
//! routable IPv4 address.

use std::net::{IpAddr, Ipv4Addr};

use crate::config::Config;
use crate::error::ProbeError;

/// A network interface with all of its assigned addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetInterface {
    /// OS interface name (`eth0`, `enp3s0`, `Ethernet 2`, ...).
    pub name: String,
    /// Whether the interface is up.
    pub is_up: bool,
    /// Assigned addresses, both families.
    pub addrs: Vec<IpAddr>,
}

impl NetInterface {
    /// Returns `true` if the interface is up and holds a routable IPv4
    /// address.
    pub fn has_valid_connection(&self) -> bool {
        self.is_up
            && self.addrs.iter().any(|addr| match addr {
                IpAddr::V4(ip) => is_routable_v4(ip),
                IpAddr::V6(_) => false,
            })
    }
}

/// Rejects loopback (127/8), link-local (169.254/16) and `0.0.0.0`.
pub fn is_routable_v4(ip: &Ipv4Addr) -> bool {
    !ip.is_loopback() && !ip.is_link_local() && !ip.is_unspecified()
}

/// Returns `true` if the lowercased name contains any skip pattern.
pub fn should_skip(config: &Config, name: &str) -> bool {
    let name = name.to_lowercase();
    config.skip_patterns.iter().any(|p| name.contains(p.as_str()))
}

/// Returns `true` if the lowercased name starts with or contains an
/// ethernet pattern.
pub fn is_ethernet(config: &Config, name: &str) -> bool {
    let name = name.to_lowercase();
    config
        .ethernet_patterns
        .iter()
        .any(|p| name.starts_with(p.as_str()) || name.contains(p.as_str()))
}

/// Returns the first wired interface with a valid connection.
pub fn find_wired<'a>(
    config: &Config,
    interfaces: &'a [NetInterface],
) -> Option<&'a NetInterface> {
    interfaces.iter().find(|iface| {
        !should_skip(config, &iface.name)
            && is_ethernet(config, &iface.name)
            && iface.has_valid_connection()
    })
}

/// Enumerates the host's interfaces.
///
/// `if-addrs` reports one entry per address; entries are grouped by
/// interface name in order of first appearance.
pub fn list_interfaces() -> Result<Vec<NetInterface>, ProbeError> {
    let entries = if_addrs::get_if_addrs()?;
    Ok(group_by_name(
        entries.into_iter().map(|iface| {
            let ip = iface.ip();
            (iface.name, ip)
        }),
        interface_is_up,
    ))
}

fn group_by_name(
    entries: impl IntoIterator<Item = (String, IpAddr)>,
    is_up: impl Fn(&str) -> bool,
) -> Vec<NetInterface> {
    let mut grouped: Vec<NetInterface> = Vec::new();

    for (name, ip) in entries {
        match grouped.iter_mut().find(|i| i.name == name) {
            Some(existing) => existing.addrs.push(ip),
            None => {
                let is_up = is_up(&name);
                grouped.push(NetInterface {
                    name,
                    is_up,
                    addrs: vec![ip],
                });
            }
        }
    }

    grouped
}

#[cfg(target_os = "linux")]
const SYS_CLASS_NET: &str = "/sys/class/net";

#[cfg(target_os = "linux")]
const IFF_UP: u32 = 0x1;

#[cfg(target_os = "linux")]
const IFF_RUNNING: u32 = 0x40;

#[cfg(target_os = "linux")]
fn interface_is_up(name: &str) -> bool {
    link_is_up(std::path::Path::new(SYS_CLASS_NET), name)
}

/// Linux: operational link state from a `/sys/class/net`-style directory.
///
/// `operstate` must read `up`. Drivers that report `unknown` (or no
/// `operstate` at all) fall back to `IFF_UP` and `IFF_RUNNING` in `flags`.
/// An interface admin-up without carrier reads `lowerlayerdown` and is down.
#[cfg(target_os = "linux")]
fn link_is_up(root: &std::path::Path, name: &str) -> bool {
    let dir = root.join(name);
    let read = |file: &str| {
        std::fs::read_to_string(dir.join(file))
            .ok()
            .map(|s| s.trim().to_string())
    };

    match read("operstate").as_deref() {
        Some("up") => true,
        Some("unknown") | None => read("flags")
            .and_then(|s| parse_flags(&s))
            .is_some_and(|flags| flags & IFF_UP != 0 && flags & IFF_RUNNING != 0),
        Some(_) => false,
    }
}

/// Parses the hex value in a sysfs `flags` file (e.g. `0x1003`).
#[cfg(target_os = "linux")]
fn parse_flags(content: &str) -> Option<u32> {
    let hex = content.trim().trim_start_matches("0x");
    u32::from_str_radix(hex, 16).ok()
}

/// Elsewhere only interfaces holding an address are reported, so an
/// addressed interface is treated as up.
#[cfg(not(target_os = "linux"))]
fn interface_is_up(_name: &str) -> bool {
    true
}
