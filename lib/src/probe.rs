//! Provides the per-host probe and the OS-facing capabilities it relies on
//!
//! This includes:
//! - the [`Pinger`] and [`NeighborTable`] capability traits
//! - system-backed implementations of both
//! - [`host_probe::HostProbe`], which combines the two signals into a
//!   single online/offline verdict

#[cfg(test)]
use mockall::automock;

use pnet::util::MacAddr;
use std::{net::Ipv4Addr, time::Duration};

/// The default upper bound in milliseconds for a single reachability probe
pub const PING_TIMEOUT_MS: u64 = 2000;

/// The default upper bound in milliseconds for a single neighbor table lookup
pub const LOOKUP_TIMEOUT_MS: u64 = 2000;

#[cfg_attr(test, automock)]
/// Capability for checking whether a host answers at the network layer
///
/// Implementations must treat timeouts and I/O errors as an expected
/// outcome and fold them into `false` rather than surfacing them
pub trait Pinger: Sync + Send {
    /// Performs one timeout-bounded reachability check against the address
    fn ping(&self, addr: Ipv4Addr, timeout: Duration) -> bool;
}

#[cfg_attr(test, automock)]
/// Capability for resolving an address to a hardware address via the local
/// neighbor (ARP) table
///
/// Implementations must treat missing entries, timeouts, and command
/// failures as an expected outcome and fold them into `None`
pub trait NeighborTable: Sync + Send {
    /// Looks up the hardware address recorded for the given address
    fn lookup(&self, addr: Ipv4Addr, timeout: Duration) -> Option<MacAddr>;
}

pub mod host_probe;
pub mod neighbors;
pub mod ping;
