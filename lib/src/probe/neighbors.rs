//! MAC address resolution via the local neighbor (ARP) table

use std::{
    io::Read,
    net::Ipv4Addr,
    process::{Command, Stdio},
    time::Duration,
};

use pnet::util::MacAddr;
use wait_timeout::ChildExt;

use super::NeighborTable;

/// A [`NeighborTable`] implementation that queries the system ARP cache
/// through the `arp` utility, falling back to `/proc/net/arp` on Linux
/// when the utility is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct ArpCommandTable;

fn is_usable_mac(mac: MacAddr) -> bool {
    mac != MacAddr::broadcast() && mac != MacAddr::zero()
}

/// Extracts the hardware address recorded for the given address from
/// neighbor table output
///
/// Handles the `arp -a` shapes emitted by Linux, macOS, and Windows as
/// well as the `/proc/net/arp` table: the matching line is located by
/// whole-token address comparison (so `192.168.1.1` never matches a
/// `192.168.1.10` entry) and the first parseable hardware address token
/// wins. Dash-separated addresses are accepted, broadcast and all-zero
/// entries are not
pub fn parse_neighbor_output(
    output: &str,
    addr: Ipv4Addr,
) -> Option<MacAddr> {
    let needle = addr.to_string();

    for line in output.lines() {
        let matches_addr = line
            .split_whitespace()
            .any(|token| token.trim_matches(|c| c == '(' || c == ')') == needle);

        if !matches_addr {
            continue;
        }

        for token in line.split_whitespace() {
            let candidate = token.replace('-', ":");
            if let Ok(mac) = candidate.parse::<MacAddr>() {
                if is_usable_mac(mac) {
                    return Some(mac);
                }
            }
        }
    }

    None
}

// Runs `arp -a <addr>` and captures stdout. Returns Some whenever the
// command ran to completion, regardless of exit status, since a missing
// entry is reported through output rather than treated as a failure.
fn run_arp_command(addr: Ipv4Addr, timeout: Duration) -> Option<String> {
    let mut child = match Command::new("arp")
        .arg("-a")
        .arg(addr.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::debug!("failed to spawn arp for {}: {}", addr, e);
            return None;
        }
    };

    match child.wait_timeout(timeout) {
        Ok(Some(_)) => {}
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            log::debug!("arp lookup timed out for {}", addr);
            return None;
        }
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            log::debug!("failed to wait on arp for {}: {}", addr, e);
            return None;
        }
    }

    let mut output = String::new();
    child.stdout.take()?.read_to_string(&mut output).ok()?;
    Some(output)
}

#[cfg(target_os = "linux")]
fn read_proc_neighbors(addr: Ipv4Addr) -> Option<MacAddr> {
    let contents = std::fs::read_to_string("/proc/net/arp").ok()?;
    parse_neighbor_output(&contents, addr)
}

#[cfg(not(target_os = "linux"))]
fn read_proc_neighbors(_addr: Ipv4Addr) -> Option<MacAddr> {
    None
}

impl NeighborTable for ArpCommandTable {
    fn lookup(&self, addr: Ipv4Addr, timeout: Duration) -> Option<MacAddr> {
        if let Some(output) = run_arp_command(addr, timeout) {
            return parse_neighbor_output(&output, addr);
        }

        read_proc_neighbors(addr)
    }
}

#[cfg(test)]
#[path = "./neighbors_tests.rs"]
mod tests;
