use super::builtin::Builtin;
use super::builtin::output::BuiltinOutput;
use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;

/// `cd [dir]`: change the working directory and print the new one.
///
/// With no operand the target is `$HOME`.
pub struct Cd {
    output: BuiltinOutput,
}

impl Builtin for Cd {
    fn call(&mut self, args: &[String]) -> Option<i32> {
        let target = match args.first() {
            Some(dir) => PathBuf::from(dir),
            None => match env::var_os("HOME") {
                Some(home) => PathBuf::from(home),
                None => {
                    eprintln!("cd: HOME not set");
                    return None;
                }
            },
        };

        if let Err(e) = env::set_current_dir(&target) {
            eprintln!("cd: {}: {}", target.display(), e);
            return None;
        }

        match env::current_dir() {
            Ok(cwd) => self.output.line(cwd.display()),
            Err(e) => eprintln!("cd: unable to read new directory: {}", e),
        }
        Some(0)
    }
}

impl Cd {
    pub fn new() -> Self {
        Cd {
            output: BuiltinOutput::default(),
        }
    }

    pub fn capture_output_buffer(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.output.capture(buffer);
    }
}
