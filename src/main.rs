use clap::Parser;
use flatsearch::{cli::Cli, output};
use flatsearch_core::{config::Config, Query};
use flatsearch_feeds::Source;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        init_tracing(cli.headless)?;
    }

    let config = cli.load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });

    if cli.fields {
        for field in &config.search.fields {
            println!("{field}");
        }
        return Ok(());
    }

    let source = cli.resolve_source(&config)?;
    tracing::info!(source = %source, headless = cli.headless, "starting");

    if cli.headless {
        let listings = source.load().await?;
        let matched = Query::parse(&cli.query).filter(&listings);
        tracing::debug!(matched = matched.len(), total = listings.len(), "headless filter");
        output::write(cli.format, &matched, &mut std::io::stdout().lock())?;
        return Ok(());
    }

    // Stdin can only be read once, and must be drained before the terminal
    // takes over; other sources load in the background.
    let listings = match source {
        Source::Stdin => Some(source.load().await?),
        _ => None,
    };
    let opts = flatsearch_tui::RunOptions {
        listings,
        source: Arc::new(source),
        config,
        query: cli.query,
        watch: cli.watch,
    };
    tokio::task::block_in_place(|| flatsearch_tui::run(opts))
}

fn init_tracing(headless: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    if headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
        return Ok(());
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/flatsearch-debug.log")?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    tracing::info!("flatsearch debug log started, tail -f /tmp/flatsearch-debug.log");
    Ok(())
}
