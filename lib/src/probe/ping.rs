//! Reachability probing via the platform ping utility

use std::{
    net::Ipv4Addr,
    process::{Command, Stdio},
    time::Duration,
};

use wait_timeout::ChildExt;

use super::Pinger;

// extra headroom past the utility's own deadline before the child is
// killed outright
const KILL_GRACE: Duration = Duration::from_millis(500);

/// A [`Pinger`] implementation that shells out to the platform ping
/// utility, one echo request per probe
///
/// The spawned process carries its own deadline derived from the probe
/// timeout and is additionally killed if it overstays that deadline, so a
/// wedged utility can never block the sweep indefinitely
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPinger;

#[cfg(target_os = "windows")]
fn ping_command(addr: Ipv4Addr, timeout: Duration) -> Command {
    let mut cmd = Command::new("ping");
    cmd.args([
        "-n",
        "1",
        "-w",
        &timeout.as_millis().to_string(),
        &addr.to_string(),
    ]);
    cmd
}

#[cfg(target_os = "macos")]
fn ping_command(addr: Ipv4Addr, timeout: Duration) -> Command {
    let mut cmd = Command::new("ping");
    cmd.args([
        "-n",
        "-q",
        "-c",
        "1",
        "-t",
        &timeout.as_secs().max(1).to_string(),
        &addr.to_string(),
    ]);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn ping_command(addr: Ipv4Addr, timeout: Duration) -> Command {
    let mut cmd = Command::new("ping");
    cmd.args([
        "-n",
        "-q",
        "-c",
        "1",
        "-W",
        &timeout.as_secs().max(1).to_string(),
        &addr.to_string(),
    ]);
    cmd
}

impl Pinger for SystemPinger {
    fn ping(&self, addr: Ipv4Addr, timeout: Duration) -> bool {
        let mut cmd = ping_command(addr, timeout);

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::debug!("failed to spawn ping for {}: {}", addr, e);
                return false;
            }
        };

        match child.wait_timeout(timeout + KILL_GRACE) {
            Ok(Some(status)) => status.success(),
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                log::debug!("ping timed out for {}", addr);
                false
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                log::debug!("failed to wait on ping for {}: {}", addr, e);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "./ping_tests.rs"]
mod tests;
