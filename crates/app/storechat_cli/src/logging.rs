pub mod formats;

use flexi_logger::{Logger, LoggerHandle};

use crate::Error;

/// Log to stderr so chat output on stdout stays clean. Level comes from
/// `RUST_LOG`, defaulting to `warn`.
pub fn init() -> Result<LoggerHandle, Error> {
    let handle = Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(handle)
}
