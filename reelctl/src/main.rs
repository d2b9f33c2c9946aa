mod pool;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reel_config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions};
use reel_core::{
    HeadlessScheduler, RecordingObserver, Reel, SpinStatus,
    build_working_set_with, rotate_to_winner_front, run_until_idle,
};
use reel_model::{Deceleration, SpinDuration};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::{SpinReport, WindowReport};

#[derive(Parser)]
#[command(name = "reelctl", about = "Run and inspect reel spins headlessly")]
struct Cli {
    /// Configuration file (TOML or JSON). Falls back to REEL_CONFIG_PATH,
    /// REEL_CONFIG_JSON and ./reel.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Spin a reel to completion and print a summary
    Spin {
        #[command(flatten)]
        pool: PoolArgs,
        /// Ticket that has to end up in the centre slot
        #[arg(long)]
        winner: String,
        #[arg(long, value_enum)]
        duration: Option<DurationArg>,
        #[arg(long, value_enum)]
        deceleration: Option<DecelerationArg>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the working set a pool produces for a winner
    Window {
        #[command(flatten)]
        pool: PoolArgs,
        #[arg(long)]
        winner: String,
        /// Entries to list on each side of the winner
        #[arg(long, default_value_t = 3)]
        context: usize,
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct PoolArgs {
    /// Generate a pool with tickets 1..=N
    #[arg(long)]
    entries: Option<usize>,
    /// JSON array of entries
    #[arg(long)]
    pool: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DurationArg {
    Short,
    Medium,
    Long,
}

#[derive(Clone, Copy, ValueEnum)]
enum DecelerationArg {
    Slow,
    Medium,
    Fast,
}

impl From<DurationArg> for SpinDuration {
    fn from(val: DurationArg) -> Self {
        match val {
            DurationArg::Short => SpinDuration::Short,
            DurationArg::Medium => SpinDuration::Medium,
            DurationArg::Long => SpinDuration::Long,
        }
    }
}

impl From<DecelerationArg> for Deceleration {
    fn from(val: DecelerationArg) -> Self {
        match val {
            DecelerationArg::Slow => Deceleration::Slow,
            DecelerationArg::Medium => Deceleration::Medium,
            DecelerationArg::Fast => Deceleration::Fast,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let load = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Spin {
            pool,
            winner,
            duration,
            deceleration,
            json,
        } => {
            let duration =
                duration.map(Into::into).unwrap_or(load.config.spin.duration);
            let deceleration = deceleration
                .map(Into::into)
                .unwrap_or(load.config.spin.deceleration);
            let report =
                run_spin(&load, &pool, &winner, duration, deceleration)?;
            emit(&report, json)?;
        }
        Command::Window {
            pool,
            winner,
            context,
            json,
        } => {
            let entries = pool::resolve(pool.entries, pool.pool.as_deref())?;
            let mut set =
                build_working_set_with(&entries, &winner, &load.config.window)?;
            if load.config.spin.align_winner_front {
                set = rotate_to_winner_front(&set);
            }
            emit(&WindowReport::new(&set, context), json)?;
        }
        Command::Config => {
            print!("{}", load.config.to_toml_string()?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ConfigLoad> {
    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: path.map(Path::to_path_buf),
        ..ConfigLoaderOptions::default()
    });
    let load = loader.load().context("failed to load reel configuration")?;
    debug!(source = ?load.source, "using reel configuration");
    Ok(load)
}

fn run_spin(
    load: &ConfigLoad,
    pool: &PoolArgs,
    winner: &str,
    duration: SpinDuration,
    deceleration: Deceleration,
) -> Result<SpinReport> {
    let entries = pool::resolve(pool.entries, pool.pool.as_deref())?;
    let mut reel = Reel::new(
        load.config.clone().into_settings(),
        HeadlessScheduler::new(),
        RecordingObserver::new(),
    );

    match reel.spin(&entries, winner, duration, deceleration) {
        SpinStatus::Started => {}
        SpinStatus::Rejected => {
            let err = reel
                .observer()
                .errors
                .last()
                .cloned()
                .ok_or_else(|| anyhow!("spin rejected"))?;
            return Err(err).context("spin rejected");
        }
        SpinStatus::AlreadySpinning => bail!("reel is already spinning"),
    }

    let start_position = reel.position();
    let set = reel
        .working_set()
        .cloned()
        .ok_or_else(|| anyhow!("spin started without a working set"))?;

    let summary = run_until_idle(&mut reel, load.config.diagnostics.max_frames)
        .context("spin did not settle")?;
    info!(frames = summary.frames, "headless spin finished");

    let centered = reel.observer().final_center().map(str::to_owned);
    Ok(SpinReport::new(
        &set,
        duration,
        deceleration,
        start_position,
        summary,
        centered,
    ))
}

fn emit<T>(report: &T, json: bool) -> Result<()>
where
    T: serde::Serialize + std::fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
