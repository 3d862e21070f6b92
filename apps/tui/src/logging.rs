use color_eyre::eyre::{eyre, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Keeps log lines off the alternate screen.
    File(PathBuf),
}

pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "covid_dashboard_tui=debug,covid_dashboard_core=debug"
    } else {
        "covid_dashboard_tui=info,covid_dashboard_core=info"
    }
}

pub fn init_logging(config: &AppConfig, target: &LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.debug)));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| eyre!("Failed to open log file {}: {e}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    }
    .map_err(|e| eyre!("Failed to initialise logging: {e}"))
}
