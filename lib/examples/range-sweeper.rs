//! Sweeps a small range and prints each result as it arrives
//!
//! ```bash
//! cargo run --example range-sweeper -p sweeplib
//! ```

use std::{
    env,
    sync::{Arc, mpsc},
    time::Duration,
};

use sweeplib::{
    probe::{
        NeighborTable, Pinger, host_probe::HostProbe,
        neighbors::ArpCommandTable, ping::SystemPinger,
    },
    scanners::{ScanMessage, Scanner, range_scanner::RangeScanner},
    targets::range::AddressRange,
};

fn main() {
    let mut args = env::args().skip(1);
    let start = args.next().unwrap_or_else(|| "192.168.1.1".to_string());
    let end = args.next().unwrap_or_else(|| "192.168.1.20".to_string());

    let range = AddressRange::new(&start, &end).expect("invalid range");

    let (tx, rx) = mpsc::channel::<ScanMessage>();

    let pinger: Arc<dyn Pinger> = Arc::new(SystemPinger);
    let neighbors: Arc<dyn NeighborTable> = Arc::new(ArpCommandTable);

    let probe = HostProbe::builder()
        .pinger(pinger)
        .neighbors(neighbors)
        .ping_timeout(Duration::from_secs(1))
        .lookup_timeout(Duration::from_secs(1))
        .build()
        .expect("failed to build probe");

    let scanner = RangeScanner::builder()
        .range(Arc::new(range))
        .probe(Arc::new(probe))
        .workers(16usize)
        .notifier(tx)
        .build()
        .expect("failed to build scanner");

    let handle = scanner.scan();

    for msg in rx.iter() {
        match msg {
            ScanMessage::Host(result) => {
                println!(
                    "{}: {} is {} (mac: {:?})",
                    result.label, result.ip, result.status, result.mac
                );
            }
            ScanMessage::Progress(_) => {}
            ScanMessage::Done(outcome) => {
                let counters = outcome.counters();
                println!(
                    "total: {}, online: {}, offline: {}",
                    counters.total, counters.online, counters.offline
                );
                break;
            }
        }
    }

    handle.join().unwrap().expect("sweep failed");
}
