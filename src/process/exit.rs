use crate::process::builtin::Builtin;

/// `exit [n]`: ask the control loop to stop, with shell status `n` (default 0).
///
/// The builtin only records the request; the loop polls it after each line.
#[derive(Default)]
pub struct Exit {
    requested: Option<i32>,
}

impl Builtin for Exit {
    fn call(&mut self, args: &[String]) -> Option<i32> {
        let status = match args {
            [] => 0,
            [code] => match code.parse::<i32>() {
                Ok(code) => code,
                Err(_) => {
                    eprintln!("exit: {}: numeric argument required", code);
                    return None;
                }
            },
            _ => {
                eprintln!("exit: too many arguments");
                return None;
            }
        };

        self.requested = Some(status);
        Some(status)
    }
}

impl Exit {
    pub fn new() -> Self {
        Exit { requested: None }
    }

    /// Status the shell should exit with, once `exit` has run.
    pub fn requested(&self) -> Option<i32> {
        self.requested
    }
}
