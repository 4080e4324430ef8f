use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Installs the global tracing subscriber
///
/// The level is read from the `LOGLEVEL` environment variable (`DEBUG`, `INFO`,
/// `WARN`, `ERROR` or `TRACE`) and defaults to `INFO`. Calling it more than once
/// is harmless.
pub fn setup_logger() {
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level())
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}

fn log_level() -> Level {
    match env::var("LOGLEVEL")
        .unwrap_or_else(|_| "INFO".to_string())
        .to_uppercase()
        .as_str()
    {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
