//! Terminal ownership for the interactive shell.
//!
//! A [`Session`] is created once at startup and handed to everything that
//! needs to move the terminal between the shell and its jobs.

use nix::errno::Errno;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::termios::{self, SetArg, Termios};
use nix::unistd::{self, Pid};
use std::io::{self, IsTerminal, Stdin};
use std::os::fd::{AsFd, BorrowedFd};
use thiserror::Error;
use tracing::{debug, info};

/// Signals the shell ignores and every child restores to default.
pub const JOB_CONTROL_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGTSTP, Signal::SIGTTOU];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unable to query terminal foreground group: {0}")]
    TerminalQuery(Errno),
    #[error("unable to change signal disposition: {0}")]
    Signal(Errno),
    #[error("unable to place shell in its own process group: {0}")]
    ProcessGroup(Errno),
    #[error("unable to hand terminal to process group {pgid}: {source}")]
    TerminalClaim { pgid: i32, source: Errno },
    #[error("unable to save or restore terminal modes: {0}")]
    TerminalMode(Errno),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Saved terminal attributes, restored after each foreground job.
#[derive(Clone)]
pub struct TerminalModes {
    saved: Termios,
}

impl TerminalModes {
    pub fn snapshot<Fd: AsFd>(fd: Fd) -> SessionResult<Self> {
        termios::tcgetattr(fd)
            .map(|saved| Self { saved })
            .map_err(SessionError::TerminalMode)
    }

    /// Write the snapshot back once pending output has drained.
    pub fn restore<Fd: AsFd>(&self, fd: Fd) -> SessionResult<()> {
        termios::tcsetattr(fd, SetArg::TCSADRAIN, &self.saved).map_err(SessionError::TerminalMode)
    }

    pub fn termios(&self) -> &Termios {
        &self.saved
    }
}

/// Process-wide terminal state of the running shell.
pub struct Session {
    terminal: Stdin,
    interactive: bool,
    shell_pgid: Pid,
    modes: Option<TerminalModes>,
}

impl Session {
    /// Claim the controlling terminal if standard input is one.
    ///
    /// Blocks (stopped by SIGTTIN) until the shell is in the foreground, then
    /// ignores the job-control signals, leads its own process group, takes
    /// the terminal and snapshots its modes. A non-terminal input gets a
    /// batch session that never touches terminal state.
    pub fn init() -> SessionResult<Self> {
        let terminal = io::stdin();
        if !terminal.is_terminal() {
            debug!("standard input is not a terminal, job control disabled");
            return Ok(Self::batch());
        }

        loop {
            let pgid = unistd::getpgrp();
            let foreground =
                unistd::tcgetpgrp(terminal.as_fd()).map_err(SessionError::TerminalQuery)?;
            if foreground == pgid {
                break;
            }
            debug!(
                pgid = pgid.as_raw(),
                foreground = foreground.as_raw(),
                "waiting for foreground"
            );
            signal::killpg(pgid, Signal::SIGTTIN).map_err(SessionError::Signal)?;
        }

        for sig in JOB_CONTROL_SIGNALS {
            // SAFETY: installing SIG_IGN runs no handler code.
            unsafe { signal::signal(sig, SigHandler::SigIgn) }.map_err(SessionError::Signal)?;
        }

        let shell_pgid = unistd::getpid();
        if unistd::getpgrp() != shell_pgid {
            unistd::setpgid(shell_pgid, shell_pgid).map_err(SessionError::ProcessGroup)?;
        }

        unistd::tcsetpgrp(terminal.as_fd(), shell_pgid).map_err(|source| {
            SessionError::TerminalClaim {
                pgid: shell_pgid.as_raw(),
                source,
            }
        })?;

        let modes = TerminalModes::snapshot(terminal.as_fd())?;
        info!(pgid = shell_pgid.as_raw(), "shell owns the terminal");

        Ok(Self {
            terminal,
            interactive: true,
            shell_pgid,
            modes: Some(modes),
        })
    }

    /// A session for piped or scripted input: no prompt, no terminal control.
    pub fn batch() -> Self {
        Self {
            terminal: io::stdin(),
            interactive: false,
            shell_pgid: unistd::getpgrp(),
            modes: None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn shell_pgid(&self) -> Pid {
        self.shell_pgid
    }

    pub fn terminal(&self) -> BorrowedFd<'_> {
        self.terminal.as_fd()
    }

    pub fn modes(&self) -> Option<&TerminalModes> {
        self.modes.as_ref()
    }

    /// Make `pgid` the terminal's foreground process group.
    pub fn give_terminal_to(&self, pgid: Pid) -> SessionResult<()> {
        if !self.interactive {
            return Ok(());
        }
        unistd::tcsetpgrp(self.terminal(), pgid).map_err(|source| SessionError::TerminalClaim {
            pgid: pgid.as_raw(),
            source,
        })
    }

    /// Take the terminal back for the shell and restore its saved modes.
    pub fn reclaim_terminal(&self) -> SessionResult<()> {
        if !self.interactive {
            return Ok(());
        }
        self.give_terminal_to(self.shell_pgid)?;
        match &self.modes {
            Some(modes) => modes.restore(self.terminal()),
            None => Ok(()),
        }
    }

    /// Whether the shell's group currently owns the terminal.
    pub fn owns_terminal(&self) -> bool {
        !self.interactive
            || unistd::tcgetpgrp(self.terminal()).is_ok_and(|pgid| pgid == self.shell_pgid)
    }
}

#[cfg(test)]
impl Session {
    /// An interactive session for a group that never claimed standard input.
    pub(crate) fn unclaimed(shell_pgid: Pid) -> Self {
        Self {
            terminal: io::stdin(),
            interactive: true,
            shell_pgid,
            modes: None,
        }
    }
}
