//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! this crate and to tower-http request spans.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber, optionally writing daily files under `log_dir`
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("order_server={log_level},tower_http={log_level}"))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "order-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("Cannot create log directory {dir}, logging to stdout");
    }

    subscriber.init();
}
