use anyhow::{bail, Context, Result};
use clap::Parser;
use robo_trajectory::config::RunConfig;
use robo_trajectory::visualization::RecordingSink;
use robo_trajectory::TrajectoryRunner;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Generate trajectories and drive an entity along them
#[derive(Debug, Parser)]
#[command(name = "trajectory_demo", version)]
struct Args {
    /// TOML run configuration, defaults to the circle + figure eight run
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulation ticks per waypoint
    #[arg(long)]
    steps: Option<u32>,

    /// Follower parameter override, e.g. `progress_every=10`
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level `{}`", level))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
    Ok(())
}

fn parse_params(raw: &[String]) -> Result<HashMap<String, f64>> {
    let mut params = HashMap::new();
    for entry in raw {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("expected KEY=VALUE, got `{}`", entry);
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("parameter `{}` is not a number", key))?;
        params.insert(key.trim().to_string(), value);
    }
    Ok(params)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps_per_waypoint = steps;
    }

    let mut runner = TrajectoryRunner::new(config).context("invalid run configuration")?;

    let params = parse_params(&args.params)?;
    if !params.is_empty() {
        runner
            .follower_mut()
            .configure(&params)
            .context("failed to configure path follower")?;
    }

    info!(
        "Driving {} from {:?} through {} trajectories",
        runner.config().model,
        runner.config().spawn_position,
        runner.config().trajectories.len()
    );
    warn!("No visualization backend attached, recording sink calls only");

    let mut sink = RecordingSink::new();
    let summary = runner.run(&mut sink)?;

    info!(
        "Recorded {} sink calls over {} ticks",
        sink.events().len(),
        summary.ticks
    );
    println!("{}", summary);

    Ok(())
}
