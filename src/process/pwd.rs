use super::builtin::Builtin;
use super::builtin::output::BuiltinOutput;
use std::cell::RefCell;
use std::env;
use std::rc::Rc;

/// The `pwd` builtin: write the absolute path of the current working
/// directory to standard output. Takes no operands.
pub struct Pwd {
    output: BuiltinOutput,
}

impl Builtin for Pwd {
    fn call(&mut self, args: &[String]) -> Option<i32> {
        if !args.is_empty() {
            eprintln!("pwd: too many arguments");
            return None;
        }

        match env::current_dir() {
            Ok(cwd) => {
                self.output.line(cwd.display());
                Some(0)
            }
            Err(e) => {
                eprintln!("pwd: {}", e);
                None
            }
        }
    }
}

impl Pwd {
    pub fn new() -> Self {
        Pwd {
            output: BuiltinOutput::default(),
        }
    }

    pub fn capture_output_buffer(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.output.capture(buffer);
    }
}
