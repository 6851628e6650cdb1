// courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout stays clean for the report)
// 2. Load config, seeding config/ from defaults/ when missing; optional when
//    both fixture paths come from flags
// 3. Load both fixtures; derivation does not start until both parse
// 4. Derive the game report
// 5. Emit it as text tables, JSON or CSV

mod output;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use courtside_core::config::{self, ConfigError, ShotChartConfig};
use courtside_core::fixtures;
use courtside_core::report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Debug, clap::Parser)]
#[command(name = "courtside", about = "Box-score comparisons and derived metrics for one basketball game")]
struct Args {
    /// directory holding config/ and defaults/ (default: current directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// box-score JSON, overriding the configured path
    #[arg(long)]
    box_score: Option<PathBuf>,

    /// play-by-play JSON, overriding the configured path
    #[arg(long)]
    play_by_play: Option<PathBuf>,

    /// output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// write to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();
    debug!("args: {args:?}");

    let (box_score_path, play_by_play_path, canvas) = resolve_inputs(&args)?;
    info!(
        "loading fixtures: box score {}, play-by-play {}",
        box_score_path.display(),
        play_by_play_path.display()
    );

    let game = fixtures::load_game(&box_score_path, &play_by_play_path)
        .context("failed to load game fixtures")?;
    let report = report::build_report(&game, &canvas)
        .context("failed to derive game report")?;

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        Format::Text => output::write_text(&report, &mut out)?,
        Format::Json => output::write_json(&report, &mut out)?,
        Format::Csv => output::write_csv(&report, &mut out)?,
    }
    out.flush().context("failed to flush output")?;

    if let Some(path) = &args.out {
        info!("report written to {}", path.display());
    }
    Ok(())
}

/// Fixture paths and shot-chart canvas. Flags win over the config file, and
/// with both fixture flags given a missing config falls back to the default
/// canvas.
fn resolve_inputs(args: &Args) -> anyhow::Result<(PathBuf, PathBuf, ShotChartConfig)> {
    let loaded = match &args.config_dir {
        Some(dir) => config::load_config_in(dir),
        None => config::load_config(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(ConfigError::DefaultsCopyError { message }) => {
            if let (Some(box_score), Some(play_by_play)) = (&args.box_score, &args.play_by_play) {
                info!("no configuration found, using the default shot-chart canvas: {message}");
                return Ok((box_score.clone(), play_by_play.clone(), ShotChartConfig::default()));
            }
            return Err(ConfigError::DefaultsCopyError { message })
                .context("failed to load configuration");
        }
        Err(e) => return Err(e).context("failed to load configuration"),
    };

    let box_score = args
        .box_score
        .clone()
        .unwrap_or_else(|| config.box_score_path());
    let play_by_play = args
        .play_by_play
        .clone()
        .unwrap_or_else(|| config.play_by_play_path());
    Ok((box_score, play_by_play, config.shot_chart))
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("courtside=info,warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
