use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_agenda_mode};
mod tui;
use tui::run_tui;

use daybook::storage::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let mut config = Config::load_or_create().context("Failed to load configuration")?;
    if let Some(server) = options.server {
        tracing::info!("Using server override {}", server);
        config.server.base_url = server;
    }

    match options.mode {
        CliMode::AgendaDate(date) => run_agenda_mode(&config, date).await,
        CliMode::Default { sample } => run_tui(&config, sample)
            .await
            .context("Terminal session failed"),
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "daybook.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("daybook started");
}
