//! Provides the Scanner implementation for sweeping an address range

use derive_builder::Builder;
use std::{
    sync::{Arc, Mutex, mpsc},
    thread::{self, JoinHandle},
};
use threadpool::ThreadPool;

use crate::{
    error::Result, probe::host_probe::HostProbe, targets::range::AddressRange,
};

use super::{
    CancellationToken, DEFAULT_WORKERS, ScanCounters, ScanMessage,
    ScanOutcome, Scanner,
};

/// Data structure representing a range scanner
///
/// Probes run on a bounded worker pool, so delivery order across addresses
/// is best-effort unless the scanner is built with a single worker, in
/// which case results arrive in strictly ascending address order. Each
/// address is probed, counted, and delivered exactly once either way
#[derive(Clone, Builder)]
#[builder(setter(into))]
pub struct RangeScanner {
    /// Address range to sweep
    range: Arc<AddressRange>,
    /// Probe invoked once per address in the range
    probe: Arc<HostProbe>,
    /// Number of concurrent probe workers
    #[builder(default = "DEFAULT_WORKERS")]
    workers: usize,
    /// Channel for sending scan results and status messages
    notifier: mpsc::Sender<ScanMessage>,
    /// Cooperative cancellation signal checked before each probe begins
    #[builder(default)]
    cancellation: CancellationToken,
    /// Running counters for the sweep in progress
    #[builder(default = "Arc::new(Mutex::new(ScanCounters::default()))")]
    counters: Arc<Mutex<ScanCounters>>,
}

impl RangeScanner {
    /// Returns builder for RangeScanner
    pub fn builder() -> RangeScannerBuilder {
        RangeScannerBuilder::default()
    }

    /// Returns a handle on this scanner's cancellation signal
    ///
    /// Raising it stops new probes from starting; probes already in flight
    /// still deliver their results before the sweep reports
    /// [`ScanOutcome::Cancelled`]
    pub fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    fn process_range(&self) -> Result<ScanOutcome> {
        let total = self.range.len();

        {
            let mut counters = self.counters.lock()?;
            *counters = ScanCounters::new(total);
        }

        log::debug!(
            "sweeping {} ({} addresses) on {} workers",
            self.range,
            total,
            self.workers
        );

        let pool = ThreadPool::new(self.workers.max(1));

        for (idx, addr) in self.range.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                log::debug!("cancellation observed, no further probes");
                break;
            }

            let probe = Arc::clone(&self.probe);
            let counters = Arc::clone(&self.counters);
            let notifier = self.notifier.clone();
            let cancellation = self.cancellation.clone();
            let label = format!("System{}", idx + 1);

            pool.execute(move || {
                // jobs queue up faster than probes complete, so the signal
                // is re-checked when the job actually starts
                if cancellation.is_cancelled() {
                    return;
                }

                let result = probe.probe(addr, label);

                let snapshot = match counters.lock() {
                    Ok(mut counters) => {
                        counters.record(result.status);
                        *counters
                    }
                    Err(e) => {
                        log::error!("failed to get lock on counters: {}", e);
                        return;
                    }
                };

                // send failures surface when the coordinator sends Done
                let _ = notifier.send(ScanMessage::Host(result));
                let _ = notifier.send(ScanMessage::Progress(snapshot));
            });
        }

        pool.join();

        let counters = *self.counters.lock()?;

        let outcome = if self.cancellation.is_cancelled() {
            ScanOutcome::Cancelled(counters)
        } else {
            ScanOutcome::Complete(counters)
        };

        self.notifier.send(ScanMessage::Done(outcome))?;

        Ok(outcome)
    }
}

// Implements the Scanner trait for RangeScanner
impl Scanner for RangeScanner {
    fn scan(&self) -> JoinHandle<Result<ScanOutcome>> {
        // prevent blocking the caller's thread so messages can be freely
        // consumed while the sweep runs
        let self_clone = self.clone();
        thread::spawn(move || self_clone.process_range())
    }
}

#[cfg(test)]
#[path = "./range_scanner_tests.rs"]
mod tests;
