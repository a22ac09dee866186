use osmium::{conf, control, logging};
use std::process::ExitCode;
use tracing::error;

/// Entry point that starts the control loop.
fn main() -> ExitCode {
    let config = conf::load();
    if let Err(err) = logging::init(&config) {
        eprintln!("Warning: {err}");
    }

    match control::control_loop(config) {
        Ok(status) => ExitCode::from((status & 0xff) as u8),
        Err(err) => {
            error!(%err, "shell terminated");
            eprintln!("osmium: {err}");
            ExitCode::FAILURE
        }
    }
}
