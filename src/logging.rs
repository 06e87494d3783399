//! Diagnostics for the terminal host.
//!
//! The game owns the terminal's alternate screen, so tracing output can only go
//! to a file. Without `--log-file` no subscriber is installed and the core's
//! `tracing` calls are no-ops.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a file-backed subscriber.
///
/// Reads `RUST_LOG`; defaults to `info`.
///
/// ```bash
/// RUST_LOG=blockfall_core=debug blockfall --log-file blockfall.log
/// ```
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .compact(),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}
