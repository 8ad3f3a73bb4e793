use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Overrides the log directory.
pub const LOG_DIR_ENV: &str = "CLIENTSPEC_LOG_DIR";
/// Filter directives, checked before `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "CLIENTSPEC_LOG";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// lifetime of the process, or buffered file output is lost.
///
/// Files go to `$CLIENTSPEC_LOG_DIR`, else `~/.clientspec/logs`, one per
/// component and day (`generate.log.2026-10-19`). When that directory
/// cannot be created only the stderr layer, if any, receives events.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".clientspec").join("logs")))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, component);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), guard)
        }
        None => {
            let (_, guard) = tracing_appender::non_blocking(std::io::sink());
            (None, guard)
        }
    };

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(filter_from_env())
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}
