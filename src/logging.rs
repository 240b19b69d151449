//! File logging
//!
//! The terminal belongs to the UI, so log lines go to
//! `~/.config/wiremock-tui/wiremock-tui.log`. `RUST_LOG` overrides the
//! default `info` level.

use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "wiremock-tui.log";

pub fn init(config_dir: &Path) -> Result<PathBuf> {
    let path = config_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to install logger: {e}"))?;

    Ok(path)
}
