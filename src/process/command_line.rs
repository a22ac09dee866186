//! Tokenized input lines and the argument vectors built from them.

use super::error::{RedirectResult, ResolveError};
use super::redirect::{self, Redirection};
use shlex;
use std::ffi::CString;

/// Token that requests background placement.
pub const BACKGROUND_MARKER: &str = "&";

/// The input line could not be split into tokens (unbalanced quoting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError;

/// One input line, split into tokens in their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Use shell-like parsing rules to split the input line into tokens.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        shlex::split(line)
            .map(|tokens| Self { tokens })
            .ok_or(ParseError)
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn name(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `&` appears anywhere on the line.
    pub fn is_background(&self) -> bool {
        self.tokens.iter().any(|token| token == BACKGROUND_MARKER)
    }

    pub fn needs_redirection(&self) -> bool {
        redirect::needs_redirection(&self.tokens)
    }
}

/// Arguments handed to the program once shell syntax has been stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
    args: Vec<String>,
}

impl ArgumentVector {
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Cut the redirection operators and their targets out of the vector,
    /// returning them in token order for the caller to apply.
    pub fn take_redirections(&mut self) -> RedirectResult<Vec<Redirection>> {
        redirect::extract(&mut self.args)
    }

    /// Remove the first `&`, keeping the order of what remains.
    pub fn strip_background_marker(&mut self) -> bool {
        match self.args.iter().position(|arg| arg == BACKGROUND_MARKER) {
            Some(index) => {
                self.args.remove(index);
                true
            }
            None => false,
        }
    }

    /// Convert into the nul-terminated strings `execv` expects.
    pub fn into_c_strings(self) -> Result<Vec<CString>, ResolveError> {
        self.args
            .into_iter()
            .map(|arg| CString::new(arg).map_err(ResolveError::from))
            .collect()
    }
}

impl From<&CommandLine> for ArgumentVector {
    fn from(command_line: &CommandLine) -> Self {
        Self {
            args: command_line.tokens.clone(),
        }
    }
}
