//! Combines the reachability and neighbor table signals into a single
//! per-host verdict

use derive_builder::Builder;
use std::{net::Ipv4Addr, sync::Arc, time::Duration};

use crate::scanners::HostResult;

use super::{NeighborTable, Pinger};

/// Data structure representing a single-host probe
///
/// A host is considered online if either signal fires: an ICMP-silent but
/// ARP-known host (a firewalled neighbor with prior traffic) still counts
/// as present
#[derive(Clone, Builder)]
#[builder(setter(into))]
pub struct HostProbe {
    /// Capability used for the reachability check
    pinger: Arc<dyn Pinger>,
    /// Capability used for the hardware address lookup
    neighbors: Arc<dyn NeighborTable>,
    /// Upper bound for the reachability check
    ping_timeout: Duration,
    /// Upper bound for the neighbor table lookup
    lookup_timeout: Duration,
}

impl HostProbe {
    /// Returns builder for HostProbe
    pub fn builder() -> HostProbeBuilder {
        HostProbeBuilder::default()
    }

    /// Probes one address: a single timeout-bounded reachability check and
    /// an independent hardware address lookup, no retries
    ///
    /// Failures of either signal are expected outcomes and fold into the
    /// result rather than erroring
    pub fn probe(&self, addr: Ipv4Addr, label: String) -> HostResult {
        log::debug!("probing {}", addr);

        let reachable = self.pinger.ping(addr, self.ping_timeout);
        let mac = self.neighbors.lookup(addr, self.lookup_timeout);

        HostResult::new(addr, label, reachable, mac)
    }
}

#[cfg(test)]
#[path = "./host_probe_tests.rs"]
mod tests;
