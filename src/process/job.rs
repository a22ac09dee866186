//! Parent-side placement of a freshly forked job.

use super::error::{LaunchError, LaunchResult};
use crate::session::Session;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, info, warn};

/// Status reported by the shell after a job is killed or stopped by a signal.
const SIGNAL_STATUS_BASE: i32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Owns the terminal while the shell waits.
    Foreground,
    /// Runs without the terminal; the shell moves on immediately.
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Exited(i32),
    Signaled(Signal),
    Stopped(Signal),
    /// Left running in the background.
    Detached,
}

impl JobOutcome {
    /// Fold the outcome into the shell's last-status value.
    pub fn status(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::Signaled(sig) | Self::Stopped(sig) => SIGNAL_STATUS_BASE + sig as i32,
            Self::Detached => 0,
        }
    }
}

/// Place a forked child in the foreground or background.
pub fn place(session: &Session, pid: Pid, placement: Placement) -> LaunchResult<JobOutcome> {
    match placement {
        Placement::Foreground => put_in_foreground(session, pid),
        Placement::Background => {
            put_in_background(pid);
            Ok(JobOutcome::Detached)
        }
    }
}

/// Hand the terminal to the job, wait for it, then take the terminal back.
///
/// The terminal is reclaimed even when waiting fails, so the next prompt
/// always belongs to the shell.
pub fn put_in_foreground(session: &Session, pid: Pid) -> LaunchResult<JobOutcome> {
    if let Err(err) = session.give_terminal_to(pid) {
        // the child may already have exited and taken its group with it
        warn!(pid = pid.as_raw(), %err, "foreground handoff failed");
    }

    let outcome = wait_for(pid);
    if let Err(err) = session.reclaim_terminal() {
        warn!(%err, "taking the terminal back failed");
    } else if !session.owns_terminal() {
        warn!(
            pgid = session.shell_pgid().as_raw(),
            "shell is not the terminal's foreground group"
        );
    }
    outcome
}

pub fn put_in_background(pid: Pid) {
    info!(pid = pid.as_raw(), "job running in background");
}

/// Block until `pid` exits, is killed, or stops.
fn wait_for(pid: Pid) -> LaunchResult<JobOutcome> {
    loop {
        match wait::waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(JobOutcome::Exited(code)),
            Ok(WaitStatus::Signaled(_, sig, _)) => return Ok(JobOutcome::Signaled(sig)),
            Ok(WaitStatus::Stopped(_, sig)) => {
                info!(pid = pid.as_raw(), signal = ?sig, "foreground job stopped");
                return Ok(JobOutcome::Stopped(sig));
            }
            Ok(other) => debug!(?other, "ignoring wait status"),
            Err(Errno::EINTR) => continue,
            Err(source) => {
                return Err(LaunchError::Wait {
                    pid: pid.as_raw(),
                    source,
                });
            }
        }
    }
}

/// Collect any background children that have finished, without blocking.
///
/// Returns how many were reaped. Finished jobs are not announced.
pub fn reap_background() -> usize {
    let mut reaped = 0;
    loop {
        match wait::waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => return reaped,
            Ok(status) => {
                debug!(?status, "reaped background job");
                reaped += 1;
            }
            Err(Errno::EINTR) => continue,
            Err(errno) => {
                warn!(%errno, "reaping background jobs failed");
                return reaped;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_passes_through() {
        assert_eq!(JobOutcome::Exited(0).status(), 0);
        assert_eq!(JobOutcome::Exited(3).status(), 3);
    }

    #[test]
    fn signals_map_above_128() {
        assert_eq!(JobOutcome::Signaled(Signal::SIGINT).status(), 130);
        assert_eq!(JobOutcome::Stopped(Signal::SIGTSTP).status(), 148);
    }

    #[test]
    fn detached_job_counts_as_success() {
        assert_eq!(JobOutcome::Detached.status(), 0);
    }

    #[test]
    fn collected_status_survives_a_failed_reclaim() {
        let child = std::process::Command::new("/bin/sh")
            .args(["-c", "exit 7"])
            .spawn()
            .unwrap();
        let pid = Pid::from_raw(child.id() as i32);
        // no process group has the child's pid, so neither handoff can succeed
        let session = Session::unclaimed(pid);

        let outcome = put_in_foreground(&session, pid).unwrap();

        assert_eq!(outcome, JobOutcome::Exited(7));
    }
}
