//! Standard input/output redirection from `<` and `>` tokens.

use super::error::{RedirectError, RedirectResult};
use nix::unistd;
use std::fs::File;
use std::os::fd::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const INPUT_OPERATOR: &str = "<";
pub const OUTPUT_OPERATOR: &str = ">";

const STDIN_FILENO: RawFd = 0;
const STDOUT_FILENO: RawFd = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `< file`: read standard input from the file.
    Input,
    /// `> file`: write standard output to the file, truncating it.
    Output,
}

impl RedirectKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            INPUT_OPERATOR => Some(Self::Input),
            OUTPUT_OPERATOR => Some(Self::Output),
            _ => None,
        }
    }

    fn operator(self) -> &'static str {
        match self {
            Self::Input => INPUT_OPERATOR,
            Self::Output => OUTPUT_OPERATOR,
        }
    }

    fn target_fd(self) -> RawFd {
        match self {
            Self::Input => STDIN_FILENO,
            Self::Output => STDOUT_FILENO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    kind: RedirectKind,
    target: PathBuf,
}

impl Redirection {
    pub fn new(kind: RedirectKind, target: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }

    pub fn kind(&self) -> RedirectKind {
        self.kind
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Open the target and duplicate it over the matching standard stream.
    ///
    /// Only meaningful in a freshly forked child: the process's own stdin or
    /// stdout is replaced for the rest of its life.
    pub fn apply(&self) -> RedirectResult<()> {
        let opened = match self.kind {
            RedirectKind::Input => File::open(&self.target),
            RedirectKind::Output => File::create(&self.target),
        };
        let file = opened.map_err(|source| RedirectError::Open {
            path: self.target.clone(),
            source,
        })?;

        unistd::dup2(file.as_raw_fd(), self.kind.target_fd()).map_err(RedirectError::Duplicate)?;
        debug!(
            operator = self.kind.operator(),
            target = %self.target.display(),
            "redirected standard stream"
        );
        // `file` closes here; the duplicated descriptor stays open.
        Ok(())
    }
}

/// Whether any token is a redirection operator.
pub fn needs_redirection(tokens: &[String]) -> bool {
    tokens
        .iter()
        .any(|token| RedirectKind::from_token(token).is_some())
}

/// Split the redirections off the end of an argument vector.
///
/// The vector is truncated at the first operator. Every operator from there
/// on is paired with the token that follows it; a stray `&` is left for the
/// background stripper to ignore and any other trailing word is dropped.
pub fn extract(args: &mut Vec<String>) -> RedirectResult<Vec<Redirection>> {
    let Some(first) = args
        .iter()
        .position(|token| RedirectKind::from_token(token).is_some())
    else {
        return Ok(Vec::new());
    };

    let tail = args.split_off(first);
    let mut redirections = Vec::new();
    let mut tokens = tail.into_iter();

    while let Some(token) = tokens.next() {
        match RedirectKind::from_token(&token) {
            Some(kind) => {
                let target = tokens
                    .next()
                    .ok_or(RedirectError::MissingTarget(kind.operator()))?;
                redirections.push(Redirection::new(kind, target));
            }
            None if token == super::command_line::BACKGROUND_MARKER => {}
            None => debug!(token = %token, "ignoring word after redirection"),
        }
    }

    Ok(redirections)
}
