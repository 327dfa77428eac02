use mockall::mock;
use mpsc::channel;
use std::{
    net::Ipv4Addr,
    str::FromStr,
    thread::{self, JoinHandle},
};
use sweeplib::scanners::ScanCounters;

use super::*;

mock! {
    SweepScanner{}
    impl Scanner for SweepScanner {
        fn scan(&self) -> JoinHandle<sweeplib::error::Result<ScanOutcome>>;
    }
}

fn test_args() -> Args {
    Args {
        start: "192.168.1.1".to_string(),
        end: "192.168.1.3".to_string(),
        ping_timeout_ms: 2000,
        lookup_timeout_ms: 2000,
        workers: 4,
        ordered: false,
        json: false,
        quiet: false,
        debug: false,
    }
}

#[test]
fn prints_args() {
    let args = test_args();
    let range = AddressRange::new(&args.start, &args.end).unwrap();

    print_args(&args, &range);
}

#[test]
fn initializes_logger() {
    let args = test_args();

    initialize_logger(&args).unwrap();
}

#[test]
fn formats_mac_for_display() {
    let mac = MacAddr::from_str("aa:bb:cc:dd:ee:ff").unwrap();

    assert_eq!(format_mac(&Some(mac)), "AA:BB:CC:DD:EE:FF");
    assert_eq!(format_mac(&None), "N/A");
}

#[test]
fn prints_table_results() {
    let args = test_args();

    let results = vec![
        HostResult::new(
            Ipv4Addr::new(192, 168, 1, 1),
            "System1".to_string(),
            true,
            None,
        ),
        HostResult::new(
            Ipv4Addr::new(192, 168, 1, 2),
            "System2".to_string(),
            false,
            None,
        ),
    ];

    let outcome = ScanOutcome::Complete(ScanCounters {
        total: 2,
        online: 1,
        offline: 1,
    });

    print_results(&args, &results, &outcome).unwrap();
}

#[test]
fn prints_json_results() {
    let mut args = test_args();
    args.json = true;

    let results = vec![HostResult::new(
        Ipv4Addr::new(192, 168, 1, 1),
        "System1".to_string(),
        false,
        Some(MacAddr::from_str("aa:bb:cc:dd:ee:ff").unwrap()),
    )];

    let outcome = ScanOutcome::Complete(ScanCounters {
        total: 1,
        online: 1,
        offline: 0,
    });

    print_results(&args, &results, &outcome).unwrap();
}

#[test]
fn prints_cancelled_results() {
    let args = test_args();

    let outcome = ScanOutcome::Cancelled(ScanCounters {
        total: 10,
        online: 1,
        offline: 2,
    });

    print_results(&args, &Vec::new(), &outcome).unwrap();
}

#[test]
fn performs_scan() {
    let mut scanner = MockSweepScanner::new();

    let (tx, rx) = channel();

    let result = HostResult::new(
        Ipv4Addr::new(192, 168, 1, 1),
        "System1".to_string(),
        true,
        None,
    );

    let counters = ScanCounters {
        total: 1,
        online: 1,
        offline: 0,
    };

    let result_clone = result.clone();

    thread::spawn(move || {
        let _ = tx.send(ScanMessage::Host(result_clone));
        let _ = tx.send(ScanMessage::Progress(counters));
        thread::sleep(Duration::from_millis(500));
        let _ = tx.send(ScanMessage::Done(ScanOutcome::Complete(counters)));
    });

    scanner.expect_scan().returning(move || {
        let handle: JoinHandle<sweeplib::error::Result<ScanOutcome>> =
            thread::spawn(move || Ok(ScanOutcome::Complete(counters)));
        handle
    });

    let processed = process_scan(&scanner, rx);

    assert!(processed.is_ok());

    let (results, outcome) = processed.unwrap();

    assert_eq!(results, vec![result]);
    assert_eq!(outcome, ScanOutcome::Complete(counters));
}
