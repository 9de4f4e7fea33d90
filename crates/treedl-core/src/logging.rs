//! Logging init: file under XDG state dir, or stderr when that fails.
//!
//! The per-file `HASH <path>: <sha256>` audit events are INFO level, so the
//! default filter keeps them.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,treedl=debug,treedl_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/treedl/treedl.log`; creates the directory.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("treedl")?;
    xdg_dirs
        .place_state_file("treedl.log")
        .context("create treedl state directory")
}

/// Hands out clones of the append-mode log file; falls back to stderr if a
/// clone fails (e.g. fd exhaustion under many workers).
struct AppendLog(File);

enum LogWriter {
    File(File),
    Stderr(io::Stderr),
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr(s) => s.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for AppendLog {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogWriter::File)
            .unwrap_or_else(|_| LogWriter::Stderr(io::stderr()))
    }
}

/// Initialize structured logging to the state-dir log file and return its path.
/// On failure (e.g. unwritable state dir) returns Err so the caller can fall
/// back to `init_logging_stderr`.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(AppendLog(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    tracing::info!("treedl logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
