use crate::session::SessionError;
use nix::errno::Errno;
use std::ffi::NulError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures the shell itself sees while launching or waiting on a job.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("fork failed: {0}")]
    Fork(Errno),
    #[error("waiting on process {pid} failed: {source}")]
    Wait { pid: i32, source: Errno },
    #[error("terminal handoff failed: {0}")]
    Terminal(#[from] SessionError),
}

/// Failures applying `<`/`>` inside the child, always fatal to that child.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("missing file name after '{0}'")]
    MissingTarget(&'static str),
    #[error("{}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("unable to duplicate descriptor: {0}")]
    Duplicate(Errno),
}

/// Reasons an argument vector could not replace the child's image.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("empty command")]
    Empty,
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("{path}: {errno}")]
    Exec { path: String, errno: Errno },
    #[error("argument contains an interior nul byte: {0}")]
    InvalidArgument(#[from] NulError),
}

pub type LaunchResult<T> = Result<T, LaunchError>;
pub type RedirectResult<T> = Result<T, RedirectError>;
