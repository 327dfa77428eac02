//! Provides data structures and implementations for sweeping host ranges
//!
//! This includes:
//! - the per-host result and status model
//! - running aggregate counters
//! - the message protocol used to stream results to consumers
//! - the range scanning engine

#[cfg(test)]
use mockall::automock;

use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    net::Ipv4Addr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
};

use crate::error::Result;

/// The default number of concurrent probe workers
pub const DEFAULT_WORKERS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Aggregate verdict for a single host
pub enum Status {
    /// The host answered the reachability probe or has a neighbor table
    /// entry
    Online,
    /// Neither signal fired
    Offline,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Online => write!(f, "Online"),
            Status::Offline => write!(f, "Offline"),
        }
    }
}

fn serialize_opt_to_string<S, T>(
    val: &Option<T>,
    s: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: Display,
{
    match val {
        Some(v) => s.serialize_some(&v.to_string()),
        None => s.serialize_none(),
    }
}

fn deserialize_opt_from_str<'de, D, T>(
    d: D,
) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: Display,
{
    let opt = Option::<String>::deserialize(d)?;
    opt.map(|s| s.parse::<T>().map_err(serde::de::Error::custom))
        .transpose()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Data structure representing the outcome of probing one host
///
/// Both raw signals are carried alongside the collapsed verdict so
/// consumers auditing a subnet can see which one fired
pub struct HostResult {
    /// IPv4 of the host
    pub ip: Ipv4Addr,
    /// Positional label of the host within the swept range ("System1" for
    /// the range start)
    pub label: String,
    /// Whether the host answered the reachability probe
    pub reachable: bool,
    /// Hardware address from the neighbor table, when one was found
    #[serde(
        serialize_with = "serialize_opt_to_string",
        deserialize_with = "deserialize_opt_from_str"
    )]
    pub mac: Option<MacAddr>,
    /// The collapsed online/offline verdict
    pub status: Status,
}

impl HostResult {
    /// Returns a new result with the status derived from the two signals:
    /// Online if the host was reachable or a hardware address was found
    pub fn new(
        ip: Ipv4Addr,
        label: String,
        reachable: bool,
        mac: Option<MacAddr>,
    ) -> Self {
        let status = if reachable || mac.is_some() {
            Status::Online
        } else {
            Status::Offline
        };

        Self {
            ip,
            label,
            reachable,
            mac,
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Running aggregate counters for one sweep
pub struct ScanCounters {
    /// Number of addresses in the swept range, fixed at scan start
    pub total: u64,
    /// Number of hosts classified online so far
    pub online: u64,
    /// Number of hosts classified offline so far
    pub offline: u64,
}

impl ScanCounters {
    /// Returns fresh counters for a range of the given size
    pub fn new(total: u64) -> Self {
        Self {
            total,
            online: 0,
            offline: 0,
        }
    }

    /// Records one completed host result
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Online => self.online += 1,
            Status::Offline => self.offline += 1,
        }
    }

    /// Returns the number of hosts processed so far
    pub fn processed(&self) -> u64 {
        self.online + self.offline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Terminal state of a sweep
pub enum ScanOutcome {
    /// Every address in the range was processed
    Complete(ScanCounters),
    /// The sweep was aborted; counters reflect only the addresses
    /// processed before the cancellation signal was observed
    Cancelled(ScanCounters),
}

impl ScanOutcome {
    /// Returns the counters recorded at termination
    pub fn counters(&self) -> ScanCounters {
        match self {
            ScanOutcome::Complete(counters) => *counters,
            ScanOutcome::Cancelled(counters) => *counters,
        }
    }

    /// Returns true if the sweep terminated through cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScanOutcome::Cancelled(_))
    }
}

#[derive(Debug)]
/// Generic enum representing the various kinds of scanning messages sent
/// over the mpsc channel
pub enum ScanMessage {
    /// Sent once per probed host, as soon as its probe completes
    Host(HostResult),
    /// Counter snapshot sent after each host message
    Progress(ScanCounters),
    /// Indicates that scanning has terminated
    Done(ScanOutcome),
}

impl ScanMessage {
    /// Returns the host result if this is a host message
    pub fn is_host_message(&self) -> Option<&HostResult> {
        match self {
            ScanMessage::Host(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the counter snapshot if this is a progress message
    pub fn is_progress_message(&self) -> Option<&ScanCounters> {
        match self {
            ScanMessage::Progress(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the outcome if this is a done message
    pub fn is_done(&self) -> Option<&ScanOutcome> {
        match self {
            ScanMessage::Done(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Cooperative cancellation signal for an in-progress sweep
///
/// Cloning yields a handle to the same underlying signal, so one copy can
/// be handed to the scanner and another kept by the caller
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Returns a new, unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the cancellation signal
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true if the signal has been raised
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg_attr(test, automock)]
/// Trait used by all scanners
pub trait Scanner: Sync + Send {
    /// Performs the sweep off the caller's thread, streaming messages to
    /// the configured notifier, and returns a handle resolving to the
    /// terminal outcome
    fn scan(&self) -> JoinHandle<Result<ScanOutcome>>;
}

pub mod range_scanner;

#[cfg(test)]
#[path = "./scanners_tests.rs"]
mod tests;
