mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use cli::{Cli, Command, JournalArgs};
use cli_modes::{clock_mode, journal_mode, timeline_mode};
use daypane_core::Daypane;
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("daypane: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr, filtered by `DAYPANE_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DAYPANE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::new();
    let daypane = Daypane::new()?;
    let config = &daypane.config;

    let command = cli.command.unwrap_or(Command::Journal(JournalArgs::default()));
    let short_mode = matches!(&command, Command::Journal(args) if args.short);
    let renderer = Renderer::new(RenderOptions {
        date_format: config.date_format.clone(),
        use_color: cli.color.enabled(),
        short_mode,
        chart_title: config.chart_title.clone(),
        symbol: config.symbol.clone(),
        timezone: config.timezone,
        note_placeholder: config.note_placeholder.clone(),
    });

    match command {
        Command::Journal(args) => journal_mode(&daypane, &renderer, &args).await,
        Command::Clock { watch } => clock_mode(&renderer, watch).await,
        Command::Timeline { watch } => timeline_mode(&renderer, watch).await,
    }
}
