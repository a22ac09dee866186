//! A small job-control shell.
//!
//! Lines read from standard input run either as builtins or as external
//! programs, each in its own process group, with `<`, `>` and `&` handled by
//! the shell.

pub mod conf;
pub mod control;
pub mod control_state;
pub mod logging;
pub mod process;
pub mod session;
