use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

/// Destination for a builtin's standard output; stdout unless captured.
#[derive(Default)]
pub struct BuiltinOutput {
    capture: Option<Rc<RefCell<Vec<u8>>>>,
}

impl BuiltinOutput {
    /// Send all further output into `buffer` instead of stdout.
    pub fn capture(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.capture = Some(buffer);
    }

    pub fn line(&self, text: impl Display) {
        match &self.capture {
            Some(buffer) => {
                let _ = writeln!(buffer.borrow_mut(), "{text}");
            }
            None => {
                let mut stdout = io::stdout().lock();
                let _ = writeln!(stdout, "{text}");
                let _ = stdout.flush();
            }
        }
    }
}
