use anyhow::{bail, Context};
use runner_core::{GameConfig, Result};
use runner_pose::{PoseController, ReplaySource};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod game;
mod terminal;

const LOG_FILE: &str = "kids-runner.log";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    replay: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().context("--config needs a path")?.into()),
            "--replay" => args.replay = Some(it.next().context("--replay needs a path")?.into()),
            "--seed" => {
                let value = it.next().context("--seed needs a number")?;
                let seed = value
                    .parse()
                    .with_context(|| format!("Invalid seed: {}", value))?;
                args.seed = Some(seed);
            }
            "-h" | "--help" => {
                println!("usage: kids-runner [--config PATH] [--replay PATH] [--seed N]");
                std::process::exit(0);
            }
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(args)
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE)
        .with_context(|| format!("Failed to create log file: {}", LOG_FILE))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;
    init_logging()?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let pose = match &args.replay {
        Some(path) => Some(PoseController::new(ReplaySource::open(path)?, &config)),
        None => None,
    };
    info!(config = ?args.config, replay = ?args.replay, seed = ?config.seed, "starting");

    let summary = game::run(&config, pose)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
