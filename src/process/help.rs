use crate::process::builtin::output::BuiltinOutput;
use crate::process::builtin::{BUILTIN_DOCS, Builtin};
use std::cell::RefCell;
use std::rc::Rc;

/// Builtin that lists every builtin with its description.
pub struct Help {
    output: BuiltinOutput,
}

impl Builtin for Help {
    fn call(&mut self, _args: &[String]) -> Option<i32> {
        for (name, doc) in BUILTIN_DOCS {
            self.output.line(format_args!("{} - {}", name, doc));
        }
        Some(0)
    }
}

impl Help {
    pub fn new() -> Self {
        Help {
            output: BuiltinOutput::default(),
        }
    }

    pub fn capture_output_buffer(&mut self, buffer: Rc<RefCell<Vec<u8>>>) {
        self.output.capture(buffer);
    }
}
