// src/main.rs — roas-dash entry point

use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use roas_dash::cli::{Cli, Commands};
use roas_dash::client::{ApiClient, PredictionBackend};
use roas_dash::infra::config::Config;
use roas_dash::infra::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(Path::new(path))?
    } else {
        Config::load()?
    };

    let backend: Arc<dyn PredictionBackend> = Arc::new(ApiClient::new(&config.http)?);

    match cli.command {
        Some(Commands::Load { url, json }) => {
            logger::init_logging(&config.logging.level);
            let url = resolve_url(url)?;
            roas_dash::cli::load::run_load(
                backend.as_ref(),
                &url,
                json,
                config.dashboard.top_features,
            )
            .await
        }
        Some(Commands::Predict { url, inputs }) => {
            logger::init_logging(&config.logging.level);
            let url = resolve_url(url)?;
            roas_dash::cli::predict::run_predict(backend.as_ref(), &url, &inputs).await
        }
        Some(Commands::Dashboard { url }) => launch_dashboard(config, backend, url.or(cli.url)).await,
        None => launch_dashboard(config, backend, cli.url).await,
    }
}

/// The dashboard owns the terminal: logs go to a file and the event loop
/// runs on a blocking thread while HTTP calls stay on the runtime.
async fn launch_dashboard(
    config: Config,
    backend: Arc<dyn PredictionBackend>,
    initial_url: Option<String>,
) -> anyhow::Result<()> {
    let log_path = config.logging.file_path();
    if let Err(e) = logger::init_file_logging(&config.logging.level, &log_path) {
        eprintln!(
            "warning: logging to {} disabled: {e}",
            log_path.display()
        );
    }

    let runtime = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || {
        roas_dash::tui::run_dashboard(&config, backend, runtime, initial_url)
    })
    .await?
}

/// Use the given URL, or prompt for one when running in a terminal.
fn resolve_url(url: Option<String>) -> anyhow::Result<String> {
    use std::io::IsTerminal;

    if let Some(url) = url {
        return Ok(url);
    }
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("A backend URL is required. Run roas-dash --help for usage.");
    }

    let url = inquire::Text::new("Backend URL:")
        .with_placeholder("https://your-url.ngrok.io")
        .with_help_message("Base URL of the prediction API, or press Esc to cancel")
        .prompt()
        .map_err(|_| anyhow::anyhow!("URL input cancelled"))?;
    Ok(url.trim().to_string())
}
