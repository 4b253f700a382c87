// Logging setup.
// The terminal belongs to the UI, so tracing output goes to a file.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;
use crate::error::{PostpeekError, Result};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Does nothing when
/// no log file is configured.
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };

    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| PostpeekError::Log(e.to_string()))
}

/// Like [`init`], but a failure only disables logging.
///
/// The UI owns the terminal afterwards, so the warning goes to stderr now.
pub fn init_or_warn(config: &Config) -> bool {
    match init(config) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("postpeek: logging disabled: {e}");
            false
        }
    }
}

/// Open the log file for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}
