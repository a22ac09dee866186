use crate::conf::ConfigurationModel;
use crate::control_state::{ControlFlow, ControlState};
use crate::session::Session;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::error::Error;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Source of input lines for the control loop.
pub trait LineEditor {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError>;
    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool>;
}

impl LineEditor for DefaultEditor {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        rustyline::Editor::readline(self, prompt)
    }

    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool> {
        rustyline::Editor::add_history_entry(self, entry)
    }
}

/// Plain line reader for piped or scripted input. Never prints a prompt.
pub struct PipedInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> PipedInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineEditor for PipedInput<R> {
    /// Bytes that are not valid UTF-8 become U+FFFD instead of ending input.
    fn readline(&mut self, _prompt: &str) -> Result<String, ReadlineError> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(ReadlineError::Eof);
        }
        while matches!(raw.last(), Some(b'\n' | b'\r')) {
            raw.pop();
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn add_history_entry(&mut self, _entry: &str) -> rustyline::Result<bool> {
        Ok(false)
    }
}

/// Claim the terminal, then read and run lines until EOF or `exit`.
///
/// Returns the status the shell should exit with.
pub fn control_loop(config: ConfigurationModel) -> Result<i32, Box<dyn Error>> {
    let session = Session::init()?;
    let interactive = session.is_interactive();
    let mut control_state = ControlState::new(session, config);
    let mut stdout = io::stdout();

    if interactive {
        let mut editor = DefaultEditor::new()?;
        run_loop_with_editor(&mut control_state, &mut editor, &mut stdout)?;
    } else {
        let mut editor = PipedInput::new(io::stdin().lock());
        run_loop_with_editor(&mut control_state, &mut editor, &mut stdout)?;
    }

    Ok(control_state.exit_status())
}

/// Drive the control loop with any line editor, flushing `sink` between lines.
pub fn run_loop_with_editor<E: LineEditor, W: Write>(
    control_state: &mut ControlState,
    editor: &mut E,
    sink: &mut W,
) -> rustyline::Result<()> {
    // Main command control loop for processing commands
    loop {
        control_state.before_prompt();
        let prompt = control_state.prompt();
        sink.flush()?;

        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(&line)?;
                }
                if control_state.handle_line(&line) == ControlFlow::EXIT {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                debug!("line discarded by interrupt");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                warn!(%err, "unable to read input");
                writeln!(sink, "Error: {:?}", err)?;
                break;
            }
        }
    }

    sink.flush()?;
    Ok(())
}
