use super::builtin::output::BuiltinOutput;
use super::builtin::{Builtin, is_builtin};
use super::resolve;
use std::cell::RefCell;
use std::env;
use std::rc::Rc;

/// `which name...`: report what running each name would do.
pub struct Which {
    output: BuiltinOutput,
}

impl Builtin for Which {
    fn call(&mut self, args: &[String]) -> Option<i32> {
        if args.is_empty() {
            eprintln!("which: missing command name");
            return None;
        }

        let path_env = env::var_os("PATH");
        let mut all_found = true;

        for name in args {
            // Check if command is a built in command
            if is_builtin(name) {
                self.output.line(format_args!("{}: shell built-in command", name));
                continue;
            }

            match resolve::lookup(name, path_env.as_deref()) {
                Some(path) => self.output.line(path.display()),
                None => {
                    eprintln!("{} not found", name);
                    all_found = false;
                }
            }
        }

        all_found.then_some(0)
    }
}

impl Which {
    pub fn new() -> Self {
        Which {
            output: BuiltinOutput::default(),
        }
    }

    pub fn capture_output_buffer(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.output.capture(buffer);
    }
}
