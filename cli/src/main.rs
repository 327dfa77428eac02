//! CLI for sweeping an IPv4 address range and reporting per-host
//! online/offline status
//!
//! # Examples
//!
//! ```bash
//! # help menu
//! hostsweep --help
//!
//! # sweep a range
//! hostsweep 192.168.1.1 192.168.1.254
//! ```
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use itertools::Itertools;
use log::*;
use pnet::util::MacAddr;
use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver},
    },
    time::Duration,
};
use sweeplib::{
    error::Result as LibResult,
    probe::{
        LOOKUP_TIMEOUT_MS, NeighborTable, PING_TIMEOUT_MS, Pinger,
        host_probe::HostProbe, neighbors::ArpCommandTable, ping::SystemPinger,
    },
    scanners::{
        DEFAULT_WORKERS, HostResult, ScanMessage, ScanOutcome, Scanner,
        range_scanner::RangeScanner,
    },
    targets::range::AddressRange,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// CLI for sweeping an IPv4 address range and reporting per-host
/// online/offline status
struct Args {
    /// First address of the range (dotted quad)
    start: String,

    /// Last address of the range (dotted quad, inclusive)
    end: String,

    /// Set timeout in milliseconds for each reachability probe
    #[arg(long, default_value_t = PING_TIMEOUT_MS)]
    ping_timeout_ms: u64,

    /// Set timeout in milliseconds for each neighbor table lookup
    #[arg(long, default_value_t = LOOKUP_TIMEOUT_MS)]
    lookup_timeout_ms: u64,

    /// Number of concurrent probe workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Sort results by address before printing the final report
    #[arg(long, default_value_t = false)]
    ordered: bool,

    /// Output final report in json instead of table text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Only print final output nothing else
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Prints debug logs including those from sweeplib
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[doc(hidden)]
fn initialize_logger(args: &Args) -> Result<()> {
    let filter = if args.quiet {
        simplelog::LevelFilter::Error
    } else if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    simplelog::TermLogger::init(
        filter,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[doc(hidden)]
fn print_args(args: &Args, range: &AddressRange) {
    info!("configuration:");
    info!("range:             {}", range);
    info!("size:              {}", range.len());
    info!("ping_timeout_ms:   {}", args.ping_timeout_ms);
    info!("lookup_timeout_ms: {}", args.lookup_timeout_ms);
    info!("workers:           {}", args.workers);
    info!("ordered:           {}", args.ordered);
    info!("json:              {}", args.json);
    info!("quiet:             {}", args.quiet);
}

#[doc(hidden)]
fn process_scan(
    scanner: &dyn Scanner,
    rx: Receiver<ScanMessage>,
) -> LibResult<(Vec<HostResult>, ScanOutcome)> {
    let mut results: Vec<HostResult> = Vec::new();

    info!("starting sweep...");

    let handle = scanner.scan();

    let outcome = loop {
        let msg = rx.recv()?;

        match msg {
            ScanMessage::Done(outcome) => {
                debug!("sweep complete");
                break outcome;
            }
            ScanMessage::Host(result) => {
                info!(
                    "{}: {} is {}",
                    result.label, result.ip, result.status
                );
                results.push(result);
            }
            ScanMessage::Progress(counters) => {
                debug!(
                    "progress: {}/{} processed, {} online, {} offline",
                    counters.processed(),
                    counters.total,
                    counters.online,
                    counters.offline
                );
            }
        }
    };

    handle.join()??;

    Ok((results, outcome))
}

#[doc(hidden)]
fn format_mac(mac: &Option<MacAddr>) -> String {
    match mac {
        Some(mac) => mac.to_string().to_uppercase(),
        None => "N/A".to_string(),
    }
}

#[doc(hidden)]
fn print_results(
    args: &Args,
    results: &Vec<HostResult>,
    outcome: &ScanOutcome,
) -> Result<()> {
    if args.json {
        let doc = serde_json::json!({
            "results": results,
            "outcome": outcome,
        });
        println!("{}", serde_json::to_string(&doc)?);
        return Ok(());
    }

    let mut table = prettytable::Table::new();

    table.add_row(prettytable::row!["SYSTEM", "IP", "MAC", "STATUS"]);

    for r in results.iter() {
        table.add_row(prettytable::row![
            r.label,
            r.ip,
            format_mac(&r.mac),
            r.status
        ]);
    }

    table.printstd();

    if outcome.is_cancelled() {
        warn!("sweep cancelled before completing the range");
    }

    let counters = outcome.counters();

    println!("Total Systems: {}", counters.total);
    println!("Online Systems: {}", counters.online);
    println!("Offline Systems: {}", counters.offline);

    Ok(())
}

#[doc(hidden)]
fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(&args)?;

    let range = AddressRange::new(&args.start, &args.end)
        .map_err(|e| eyre!("invalid sweep range: {}", e))?;

    print_args(&args, &range);

    let (tx, rx) = mpsc::channel::<ScanMessage>();

    let pinger: Arc<dyn Pinger> = Arc::new(SystemPinger);
    let neighbors: Arc<dyn NeighborTable> = Arc::new(ArpCommandTable);

    let probe = HostProbe::builder()
        .pinger(pinger)
        .neighbors(neighbors)
        .ping_timeout(Duration::from_millis(args.ping_timeout_ms))
        .lookup_timeout(Duration::from_millis(args.lookup_timeout_ms))
        .build()
        .map_err(|e| eyre!("failed to build host probe: {}", e))?;

    let scanner = RangeScanner::builder()
        .range(Arc::new(range))
        .probe(Arc::new(probe))
        .workers(args.workers)
        .notifier(tx)
        .build()
        .map_err(|e| eyre!("failed to build range scanner: {}", e))?;

    let (mut results, outcome) =
        process_scan(&scanner, rx).map_err(|e| eyre!("sweep failed: {}", e))?;

    if args.ordered {
        results = results.into_iter().sorted_by_key(|r| r.ip).collect();
    }

    print_results(&args, &results, &outcome)?;

    Ok(())
}

#[cfg(test)]
#[path = "./main_tests.rs"]
mod tests;
