//! Logging setup for the qreye binary
//!
//! Rendered SVG and JSON documents go to stdout, so console diagnostics are
//! written to stderr in a compact, timestamp-free form. An optional file
//! sink keeps full RFC 3339 timestamps and targets for later inspection.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Keeps the file writer's worker thread alive for the life of the process
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the global subscriber described by `options`.
///
/// A no-op when a subscriber is already installed, so tests and embedding
/// applications keep their own.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = build_filter(&options.level)?;
    let file: Option<BoxedLayer<Layered<EnvFilter, Registry>>> = options
        .file
        .as_deref()
        .map(|path| file_layer(path, options.rotation))
        .transpose()?;

    Registry::default()
        .with(filter)
        .with(file)
        .with(console_layer(options.color))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Parse a level or directive list such as `debug` or `qreye=trace,warn`.
fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level.trim())
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}

fn file_layer<S>(path: &Path, rotation: Option<LogRotation>) -> Result<BoxedLayer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let writer = file_writer(path, rotation)?;
    Ok(fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_writer(writer)
        .with_target(true)
        .boxed())
}

fn file_writer(path: &Path, rotation: Option<LogRotation>) -> Result<NonBlocking> {
    let dir = log_dir(path);
    fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!("Failed to create log directory {}: {e}", dir.display()))
    })?;

    let builder = NonBlockingBuilder::default().lossy(false);
    let (writer, guard) = match rotation {
        Some(rotation) => {
            let file_name = path.file_name().ok_or_else(|| {
                Error::Config(format!(
                    "Log file path '{}' needs a file name for rotation",
                    path.display()
                ))
            })?;
            let appender = match rotation {
                LogRotation::Hourly => rolling::hourly(dir, file_name),
                LogRotation::Daily => rolling::daily(dir, file_name),
            };
            builder.finish(appender)
        }
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;
            builder.finish(file)
        }
    };

    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}

fn log_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn console_layer<S>(color: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    fmt::layer()
        .compact()
        .without_time()
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(false)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_defaults_to_cwd() {
        assert_eq!(log_dir(Path::new("qreye.log")), Path::new("."));
        assert_eq!(
            log_dir(Path::new("/var/log/qreye/render.log")),
            Path::new("/var/log/qreye")
        );
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("warn").is_ok());
        assert!(build_filter(" qreye=debug,warn ").is_ok());
    }

    #[test]
    fn test_file_writer_creates_directory() {
        let dir = std::env::temp_dir().join(format!("qreye-log-{}", std::process::id()));
        let path = dir.join("nested").join("render.log");
        assert!(file_writer(&path, None).is_ok());
        assert!(path.exists());
    }
}
