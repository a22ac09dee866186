//! Forking and preparing a child for an external command.

use super::command_line::{ArgumentVector, CommandLine};
use super::error::{LaunchError, LaunchResult, RedirectError, ResolveError};
use super::job::{self, JobOutcome, Placement};
use super::resolve::{self, Execv};
use crate::session::{JOB_CONTROL_SIGNALS, Session};
use nix::errno::Errno;
use nix::sys::signal::{self, SigHandler};
use nix::unistd::{self, ForkResult, Pid};
use std::env;
use std::process;
use tracing::{debug, error};

/// Child status when no candidate could replace the image.
pub const EXIT_NOT_FOUND: i32 = 1;
/// Child status when setup before exec (groups, signals, redirection) failed.
pub const EXIT_SETUP_FAILURE: i32 = 2;

/// Run an external command line as a new job.
///
/// Forks; the child never returns from here. The parent gives the child its
/// own process group and places it according to the `&` marker.
pub fn launch(session: &Session, command_line: &CommandLine) -> LaunchResult<JobOutcome> {
    let placement = if command_line.is_background() {
        Placement::Background
    } else {
        Placement::Foreground
    };

    // SAFETY: the shell is single threaded, so the child starts from a
    // consistent heap and only runs shell code until it execs or exits.
    match unsafe { unistd::fork() } {
        Ok(ForkResult::Child) => run_child(session, command_line, placement),
        Ok(ForkResult::Parent { child }) => {
            // Mirrors the child's own call; whichever runs first wins and the
            // other fails harmlessly once the child has exec'd.
            if let Err(errno) = unistd::setpgid(child, child) {
                debug!(pid = child.as_raw(), %errno, "parent setpgid skipped");
            }
            debug!(pid = child.as_raw(), ?placement, "launched job");
            job::place(session, child, placement)
        }
        Err(errno) => Err(LaunchError::Fork(errno)),
    }
}

/// Everything the child does between fork and exec.
fn run_child(session: &Session, command_line: &CommandLine, placement: Placement) -> ! {
    if let Err(errno) = init_child_process(session, placement) {
        eprintln!("osmium: unable to prepare child: {errno}");
        exit_child(EXIT_SETUP_FAILURE);
    }

    let mut argv = ArgumentVector::from(command_line);

    if command_line.needs_redirection() {
        if let Err(err) = apply_redirections(&mut argv) {
            eprintln!("osmium: {err}");
            exit_child(EXIT_SETUP_FAILURE);
        }
    }

    if command_line.is_background() {
        argv.strip_background_marker();
    }

    let err = execute(argv);
    match &err {
        ResolveError::NotFound(name) | ResolveError::Exec { path: name, .. } => {
            debug!(%err, "exec failed");
            eprintln!("osmium: command not found: {name}");
        }
        other => eprintln!("osmium: {other}"),
    }
    exit_child(EXIT_NOT_FOUND)
}

/// End a child that never reached exec. The shell is single threaded, so
/// the forked copy can run the normal process exit path.
fn exit_child(code: i32) -> ! {
    process::exit(code)
}

/// Own process group first, then default dispositions for the signals the
/// shell ignores. A foreground child also takes the terminal itself while
/// SIGTTOU is still ignored, so it never starts reading as a background job.
fn init_child_process(session: &Session, placement: Placement) -> Result<(), Errno> {
    let pid = unistd::getpid();
    unistd::setpgid(Pid::from_raw(0), pid)?;

    if placement == Placement::Foreground && session.is_interactive() {
        if let Err(err) = session.give_terminal_to(pid) {
            error!(%err, "child could not take the terminal");
        }
    }

    for sig in JOB_CONTROL_SIGNALS {
        // SAFETY: restoring SIG_DFL runs no handler code.
        unsafe { signal::signal(sig, SigHandler::SigDfl) }?;
    }
    Ok(())
}

fn apply_redirections(argv: &mut ArgumentVector) -> Result<(), RedirectError> {
    for redirection in argv.take_redirections()? {
        redirection.apply()?;
    }
    Ok(())
}

/// Replace the image, searching PATH for bare names. Returns only on failure.
fn execute(argv: ArgumentVector) -> ResolveError {
    let mut c_argv = match argv.into_c_strings() {
        Ok(c_argv) => c_argv,
        Err(err) => return err,
    };
    let path_env = env::var_os("PATH");
    resolve::exec_resolved(&mut c_argv, path_env.as_deref(), &mut Execv)
}
