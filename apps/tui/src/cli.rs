use clap::{CommandFactory, Parser};

use crate::config::{BASE_URL_VAR, BREAKDOWN_VAR, DEBUG_VAR, LOG_FILE_VAR, TIMEOUT_VAR};

#[derive(Debug, Parser)]
#[command(name = "covid-dashboard", version, about = "COVID-19 summary dashboard")]
pub struct CliArgs {
    /// Print totals and the top countries, then exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Load this country's detail once the summary arrives
    #[arg(long, value_name = "SLUG")]
    pub country: Option<String>,

    /// Also fetch deaths and recovered series for the selected country
    #[arg(long)]
    pub breakdown: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log file used while the dashboard is on screen
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var(BASE_URL_VAR, url);
        }
        if let Some(secs) = self.timeout {
            std::env::set_var(TIMEOUT_VAR, secs.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_VAR, path);
        }
        if self.breakdown {
            std::env::set_var(BREAKDOWN_VAR, "1");
        }
        if self.debug {
            std::env::set_var(DEBUG_VAR, "1");
        }
    }

    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = CliArgs::parse_from([
            "covid-dashboard",
            "--json",
            "--country",
            "spain",
            "--base-url",
            "http://localhost:3000",
            "--timeout",
            "5",
            "--breakdown",
        ]);

        assert!(args.wants_headless());
        assert_eq!(args.country.as_deref(), Some("spain"));
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(args.timeout, Some(5));
        assert!(args.breakdown);
        assert!(!args.debug);
    }

    #[test]
    fn interactive_by_default() {
        let args = CliArgs::parse_from(["covid-dashboard"]);
        assert!(!args.wants_headless());
    }

    #[test]
    fn help_mentions_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--headless"));
        assert!(help.contains("--country"));
    }
}
