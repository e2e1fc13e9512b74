// Draft scout entry point.
//
// Startup sequence:
// 1. Parse CLI arguments
// 2. Initialize tracing (stderr, so stdout stays clean for the report)
// 3. Load config
// 4. Connect the live feed if requested and a credential is available
// 5. Build the draft board (sequential valuation over the candidate pool)
// 6. Release the live feed, render the report
// 7. Exit non-zero if nothing could be valued

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use draft_scout::board::{self, BoardRequest, RankedCandidate};
use draft_scout::config;
use draft_scout::live::{self, LiveFeed};
use draft_scout::report;
use draft_scout::stats::{ProviderSet, Sport};
use draft_scout::valuation::scoring::ScoringFormat;

/// Rank available fantasy draft players by season stats, recent trend, and
/// live-game signals.
#[derive(Debug, Parser)]
#[command(name = "draftscout", version)]
struct Cli {
    /// Sport to draft for.
    #[arg(long, value_enum)]
    sport: Sport,

    /// Scoring format. Categories and roto reuse the points composite as a
    /// simplified proxy.
    #[arg(long, value_enum, default_value_t = ScoringFormat::Points)]
    format: ScoringFormat,

    /// Comma-separated list of already-drafted players.
    #[arg(long, default_value = "")]
    drafted: String,

    /// Comma-separated list of your current roster.
    #[arg(long, default_value = "")]
    roster: String,

    /// Number of recommendations to show.
    #[arg(long, default_value_t = 15)]
    top: usize,

    /// Skip live game context (faster, offline-friendly).
    #[arg(long)]
    no_live: bool,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("fatal: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    use anyhow::Context;

    let config = config::load_config().context("failed to load configuration")?;
    let providers = ProviderSet::from_config(&config);

    // Live context is best-effort: no key or a failed connect just means the
    // board is built from season stats alone.
    let mut live_feed: Option<LiveFeed> = None;
    if !cli.no_live {
        match &config.credentials.live_api_key {
            Some(key) => {
                println!("Connecting to live game feed...");
                let mut feed = LiveFeed::new(&config.live, key.clone());
                if feed.connect(cli.sport).await {
                    println!("  Connected. Live game context active.");
                    live_feed = Some(feed);
                } else {
                    println!("  No live connection. Proceeding with stats only.");
                }
            }
            None => {
                println!(
                    "No {} set. Running without live context.\n\
                     Set your key for real-time game signals.",
                    config::LIVE_API_KEY_ENV
                );
            }
        }
    }

    let hot_players = match live_feed.as_mut() {
        Some(feed) => {
            let events = feed.poll_events().await;
            let hot = live::extract_hot_players(&events);
            info!(events = events.len(), hot = hot.len(), "live context polled");
            hot
        }
        None => HashMap::new(),
    };

    let request = BoardRequest {
        drafted: split_names(&cli.drafted),
        roster: split_names(&cli.roster),
        ..BoardRequest::new(cli.sport, cli.format)
    };
    let ranked: Vec<RankedCandidate> =
        board::build_draft_board(&providers, &request, &hot_players).await;

    if let Some(feed) = live_feed.as_mut() {
        feed.close().await;
    }

    if ranked.is_empty() {
        eprintln!("\nNo player data available. Check your internet connection.");
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "{}",
        report::format_draft_board(&ranked, cli.sport, cli.format, cli.top)
    );
    Ok(ExitCode::SUCCESS)
}

/// Split a comma-separated name list, dropping empty entries.
fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Initialize tracing to stderr; the report owns stdout.
fn init_tracing(debug: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if debug {
        "draft_scout=debug,info"
    } else {
        "draft_scout=info,warn"
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    // Ignore the error if a subscriber is already installed (tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
