//! Shell builtin implementations and process execution helpers.

pub mod builtin;
pub mod cd;
pub mod command_line;
pub mod error;
pub mod exit;
pub mod help;
pub mod job;
pub mod launch;
pub mod pwd;
pub mod redirect;
pub mod resolve;
pub mod which;
use crate::process::builtin::map::BuiltinMap;
use crate::process::command_line::CommandLine;
use crate::session::Session;

/// Execute a command, dispatching to builtins or launching an external job.
pub fn execute(
    session: &Session,
    builtin_map: &BuiltinMap,
    command_line: &CommandLine,
) -> Option<i32> {
    let Some(name) = command_line.name() else {
        return Some(0);
    };

    // Determine if command is builtin, and call function
    if let Some(result) = builtin_map.invoke(name, &command_line.tokens()[1..]) {
        return result;
    }

    match launch::launch(session, command_line) {
        Ok(outcome) => Some(outcome.status()),
        Err(e) => {
            eprintln!("osmium: {}", e);
            None
        }
    }
}
