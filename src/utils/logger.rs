//! Logging infrastructure
//!
//! Structured logging setup with an env-filter (`RUST_LOG`) and optional
//! daily-rotated file output under the work directory.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Logs to stdout; if `log_dir` exists, a daily-rotated file appender is
/// used instead. `RUST_LOG` overrides the default `info` level.
pub fn init_logger(log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if dir.exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "qrdine-server");
            subscriber.with_writer(file_appender).with_ansi(false).init();
            return;
        }
    }

    subscriber.init();
}
