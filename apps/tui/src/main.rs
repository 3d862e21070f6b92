use clap::Parser;
use color_eyre::Result;
use covid_dashboard_core::ApiConfig;
use covid_dashboard_tui::app::App;
use covid_dashboard_tui::cli::CliArgs;
use covid_dashboard_tui::client::ApiClient;
use covid_dashboard_tui::config::init_app_config;
use covid_dashboard_tui::logging::{init_logging, LogTarget};
use covid_dashboard_tui::{event, terminal};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.wants_headless() || !is_terminal();
    let target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone())
    };
    init_logging(&config, &target)?;
    info!(base_url = %config.base_url, headless, "starting covid dashboard");

    let client = ApiClient::new(ApiConfig::new(&config.base_url), config.request_timeout)?;

    if headless {
        return event::run_headless(
            &client,
            config.dashboard_options(),
            args.json,
            args.country.as_deref(),
        )
        .await;
    }

    let mut app = App::new(config.dashboard_options()).with_initial_country(args.country);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &client).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
