//! State machine backing the interactive control loop.

use crate::conf::{ConfigurationModel, PromptTheme};
use crate::process;
use crate::process::builtin::map::BuiltinMap;
use crate::process::command_line::CommandLine;
use crate::process::job;
use crate::session::Session;
use std::env;
use tracing::debug;

/// Signals whether the control loop should continue or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep reading user input.
    CONTINUE,
    /// Terminate the control loop.
    EXIT,
}

/// Shared state that backs the interactive control loop.
pub struct ControlState {
    session: Session,
    config: ConfigurationModel,
    status: Option<i32>,
    line_num: usize,
    builtin_map: BuiltinMap,
}

impl ControlState {
    /// Build a control state around an initialized session.
    pub fn new(session: Session, config: ConfigurationModel) -> Self {
        Self {
            session,
            config,
            status: Some(0),
            line_num: 0,
            builtin_map: BuiltinMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn builtins(&self) -> &BuiltinMap {
        &self.builtin_map
    }

    /// Status of the last line; `None` when it failed without a code.
    pub fn status(&self) -> Option<i32> {
        self.status
    }

    /// Status the shell process should end with.
    pub fn exit_status(&self) -> i32 {
        self.builtin_map.exit_requested().unwrap_or(0)
    }

    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Render the prompt. Batch sessions never show one.
    pub fn prompt(&self) -> String {
        if !self.session.is_interactive() {
            return String::new();
        }
        match self.config.ui.prompt_theme() {
            PromptTheme::Numbered => format!("{}: ", self.line_num),
            PromptTheme::Cwd => generate_prompt(self.status),
        }
    }

    /// Housekeeping done right before a prompt is shown.
    pub fn before_prompt(&mut self) {
        if self.config.control.reap_background() {
            let reaped = job::reap_background();
            if reaped > 0 {
                debug!(reaped, "collected finished background jobs");
            }
        }
    }

    /// Parse and execute a single line of user input, updating the status.
    pub fn handle_line(&mut self, line: &str) -> ControlFlow {
        self.line_num += 1;

        let command_line = match CommandLine::parse(line) {
            Ok(command_line) => command_line,
            Err(_) => {
                eprintln!("osmium: unable to parse line: {}", line);
                self.status = None;
                return ControlFlow::CONTINUE;
            }
        };

        self.status = process::execute(&self.session, &self.builtin_map, &command_line);

        if self.builtin_map.exit_requested().is_some() {
            ControlFlow::EXIT
        } else {
            ControlFlow::CONTINUE
        }
    }
}

/// Construct the shell prompt string combining status colouring and the cwd.
fn generate_prompt(status: Option<i32>) -> String {
    let arrow = 0x27A3;
    let red_text = "\u{1b}[31m";
    let green_text = "\u{1b}[32m";
    let purple_text = "\u{1b}[35m";
    let end_color_text = "\u{1b}[39m";

    let cwd = env::current_dir()
        .map(|cwd| cwd.display().to_string())
        .unwrap_or_default();

    format!(
        "{}{} {}{}{}{} ",
        purple_text,
        update_cwd(&cwd),
        end_color_text,
        match status {
            Some(0) => green_text,
            _ => red_text,
        },
        char::from_u32(arrow).unwrap_or('>'),
        end_color_text,
    )
}

/// Replace the home directory portion of the cwd with `~` for a compact prompt.
fn update_cwd(cwd: &str) -> String {
    match env::var("HOME") {
        Ok(home) if !home.is_empty() => cwd.replacen(&home, "~", 1),
        _ => cwd.to_string(),
    }
}
