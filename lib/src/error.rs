//! Custom Error and Result types for this library

use std::{
    any::Any,
    sync::{
        MutexGuard, PoisonError,
        mpsc::{RecvError, SendError},
    },
};
use thiserror::Error;

use crate::{
    probe::host_probe::HostProbeBuilderError,
    scanners::{ScanCounters, ScanMessage, range_scanner::RangeScannerBuilderError},
};

/// Custom Error type for this library
#[derive(Error, Debug)]
pub enum SweepLibError {
    /// Address string does not match the four-octet dotted-quad pattern
    #[error("invalid IPv4 address: {addr}")]
    InvalidAddress {
        /// The rejected address string
        addr: String,
    },

    /// Range start exceeds range end
    #[error("invalid range: start {start} exceeds end {end}")]
    InvalidRange {
        /// The rejected start address
        start: String,
        /// The rejected end address
        end: String,
    },

    /// Errors resulting from the results channel
    #[error("failed to send notification message: {:#?}", _0)]
    NotifierSendError(#[from] SendError<ScanMessage>),

    /// Error obtaining lock on the running counters
    #[error("failed to get lock on counters: {_0}")]
    CountersLock(String),

    /// Generic thread error
    #[error("thread error: {_0}")]
    ThreadError(String),

    /// Errors when consuming messages from channels
    #[error("failed to receive message from channel: {:#?}", _0)]
    ChannelReceive(#[from] RecvError),

    /// Error resulting from failure to build a host probe
    #[error("failed to build host probe: {_0}")]
    HostProbeBuild(#[from] HostProbeBuilderError),

    /// Error resulting from failure to build a range scanner
    #[error("failed to build range scanner: {_0}")]
    RangeScannerBuild(#[from] RangeScannerBuilderError),
}

impl From<Box<dyn Any + Send>> for SweepLibError {
    fn from(value: Box<dyn Any + Send>) -> Self {
        if let Some(s) = value.downcast_ref::<&'static str>() {
            Self::ThreadError(format!("Thread panicked with: {}", s))
        } else if let Some(s) = value.downcast_ref::<String>() {
            Self::ThreadError(format!("Thread panicked with: {}", s))
        } else {
            Self::ThreadError("Thread panicked with an unknown type".into())
        }
    }
}

impl<'a> From<PoisonError<MutexGuard<'a, ScanCounters>>> for SweepLibError {
    fn from(value: PoisonError<MutexGuard<'a, ScanCounters>>) -> Self {
        Self::CountersLock(value.to_string())
    }
}

/// Custom Result type for this library. All Errors exposed by this library
/// will be returned as [`SweepLibError`]
pub type Result<T> = std::result::Result<T, SweepLibError>;
