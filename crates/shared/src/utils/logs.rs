use anyhow::{Context, Result};
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the file writer alive; drop it only at process exit.
pub struct Logger {
    _guard: WorkerGuard,
}

impl Logger {
    pub fn new(component: &str, is_dev: bool) -> Result<Self> {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(format!("rust_app_{component}"))
            .filename_suffix("log")
            .build(log_dir)
            .with_context(|| format!("Failed to open log directory {log_dir}"))?;
        let (file_writer, guard) = non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        let console_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

        let console_layer = fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(true)
            .with_filter(console_filter);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(Self { _guard: guard })
    }
}
