//! Library package for sweeping IPv4 address ranges and reporting
//! per-host online/offline status
//!
//! A sweep walks an inclusive address range, probes each host for
//! reachability, resolves its MAC address from the local neighbor table
//! when one is known, and streams one message per completed probe over an
//! mpsc channel while maintaining running totals. Consumers can render
//! progress while the range is still being processed.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::{Arc, mpsc};
//! use std::time::Duration;
//!
//! use sweeplib::probe::host_probe::HostProbe;
//! use sweeplib::probe::neighbors::ArpCommandTable;
//! use sweeplib::probe::ping::SystemPinger;
//! use sweeplib::probe::{NeighborTable, Pinger};
//! use sweeplib::scanners::range_scanner::RangeScanner;
//! use sweeplib::scanners::{ScanMessage, Scanner};
//! use sweeplib::targets::range::AddressRange;
//!
//! let range = AddressRange::new("192.168.1.1", "192.168.1.10").unwrap();
//! let (tx, rx) = mpsc::channel::<ScanMessage>();
//!
//! let pinger: Arc<dyn Pinger> = Arc::new(SystemPinger);
//! let neighbors: Arc<dyn NeighborTable> = Arc::new(ArpCommandTable);
//!
//! let probe = HostProbe::builder()
//!     .pinger(pinger)
//!     .neighbors(neighbors)
//!     .ping_timeout(Duration::from_secs(2))
//!     .lookup_timeout(Duration::from_secs(2))
//!     .build()
//!     .unwrap();
//!
//! let scanner = RangeScanner::builder()
//!     .range(Arc::new(range))
//!     .probe(Arc::new(probe))
//!     .notifier(tx)
//!     .build()
//!     .unwrap();
//!
//! let handle = scanner.scan();
//!
//! for msg in rx.iter() {
//!     match msg {
//!         ScanMessage::Host(result) => {
//!             println!("{}: {} is {}", result.label, result.ip, result.status);
//!         }
//!         ScanMessage::Progress(counters) => {
//!             println!("{}/{}", counters.processed(), counters.total);
//!         }
//!         ScanMessage::Done(outcome) => {
//!             println!("{:?}", outcome.counters());
//!             break;
//!         }
//!     }
//! }
//!
//! handle.join().unwrap().unwrap();
//! ```

#![deny(missing_docs)]
pub mod error;
pub mod probe;
pub mod scanners;
pub mod targets;
