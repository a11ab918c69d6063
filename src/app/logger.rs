use std::{io::Write, thread};

use env_logger::{Builder, Env};
use log::SetLoggerError;

pub const LOG_ENV: &str = "WORKER_FANOUT_LOG";

/// Logger driven by `WORKER_FANOUT_LOG` (standard env_logger directives),
/// defaulting to `info`.
pub fn builder() -> Builder {
    builder_from(Env::new().filter_or(LOG_ENV, "info"))
}

pub fn init() -> Result<(), SetLoggerError> {
    builder().try_init()
}

// Trailing \r keeps lines aligned while the prompt holds raw mode.
fn builder_from(env: Env<'_>) -> Builder {
    let mut builder = Builder::from_env(env);
    builder.format(|buf, record| {
        let current = thread::current();
        write!(
            buf,
            "[{}][{}][{}] {}\r\n",
            buf.timestamp_millis(),
            current.name().unwrap_or("unnamed"),
            record.level(),
            record.args()
        )
    });
    builder
}
