use color_eyre::eyre::{eyre, Result};
use covid_dashboard_core::api::DEFAULT_BASE_URL;
use covid_dashboard_core::view::CHART_WINDOW;
use covid_dashboard_core::DashboardOptions;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL_VAR: &str = "COVID_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "COVID_REQUEST_TIMEOUT_SECS";
pub const BREAKDOWN_VAR: &str = "COVID_DETAIL_BREAKDOWN";
pub const LOG_FILE_VAR: &str = "COVID_LOG_FILE";
pub const DEBUG_VAR: &str = "DEBUG";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILE: &str = "covid-dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub breakdown: bool,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Builds the configuration from a variable lookup so tests can avoid the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(eyre!("{BASE_URL_VAR} must be an http(s) URL, got {base_url:?}"));
        }

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => parse_timeout(&value)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_file = lookup(LOG_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        Ok(Self {
            base_url,
            request_timeout,
            breakdown: lookup(BREAKDOWN_VAR).is_some_and(|value| is_enabled(&value)),
            log_file,
            debug: lookup(DEBUG_VAR).is_some_and(|value| is_enabled(&value)),
        })
    }

    pub const fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            breakdown: self.breakdown,
            chart_window: CHART_WINDOW,
        }
    }
}

/// Loads `.env` and reads the configuration from the environment
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

fn parse_timeout(value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(eyre!(
            "{TIMEOUT_VAR} must be a positive number of seconds, got {value:?}"
        )),
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() -> Result<()> {
        let config = config_from(&[])?;

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.breakdown);
        assert!(!config.debug);
        assert_eq!(config.log_file, PathBuf::from("covid-dashboard.log"));
        assert_eq!(config.dashboard_options().chart_window, 14);

        Ok(())
    }

    #[test]
    fn reads_overrides() -> Result<()> {
        let config = config_from(&[
            (BASE_URL_VAR, "http://localhost:3000/"),
            (TIMEOUT_VAR, " 3 "),
            (BREAKDOWN_VAR, "Yes"),
            (LOG_FILE_VAR, "/tmp/covid.log"),
            (DEBUG_VAR, "1"),
        ])?;

        assert_eq!(config.base_url, "http://localhost:3000/");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(config.breakdown);
        assert!(config.dashboard_options().breakdown);
        assert!(config.debug);
        assert_eq!(config.log_file, PathBuf::from("/tmp/covid.log"));

        Ok(())
    }

    #[test]
    fn rejects_invalid_timeout() {
        assert!(config_from(&[(TIMEOUT_VAR, "soon")]).is_err());
        assert!(config_from(&[(TIMEOUT_VAR, "0")]).is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(config_from(&[(BASE_URL_VAR, "ftp://example.com")]).is_err());
    }

    #[test]
    fn blank_base_url_falls_back_to_default() -> Result<()> {
        let config = config_from(&[(BASE_URL_VAR, "   ")])?;
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        Ok(())
    }
}
