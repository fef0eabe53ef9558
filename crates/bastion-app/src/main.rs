use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use bastion_app::diffusion_worker::spawn_diffusion_worker;
use bastion_app::TickScheduler;
use bastion_core::commands::PlayerCommand;
use bastion_core::config::SimConfig;
use bastion_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(name = "bastion", about = "Run the bastion simulation headless")]
struct Args {
    /// JSON config file. Defaults apply when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall-clock seconds to run before stopping.
    #[arg(long, default_value_t = 5)]
    seconds: u64,

    /// Aim the towers at this point for the whole run.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    crosshair: Option<Vec<f64>>,

    /// Write the final snapshot here as JSON.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) if path.exists() => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        Some(path) => {
            warn!(path = %path.display(), "config file not found, using defaults");
            SimConfig::default()
        }
        None => SimConfig::default(),
    };
    info!(seed = config.seed, ms_per_tick = config.ms_per_tick, "starting");

    let mut engine = SimulationEngine::new(config.clone());
    engine.setup_level();
    let (diffusion_tx, diffusion_rx) = mpsc::channel();
    engine.attach_diffusion(diffusion_tx);

    let mut scheduler = TickScheduler::new(engine, Duration::from_millis(config.ms_per_tick));
    let worker = spawn_diffusion_worker(diffusion_rx, scheduler.sender())
        .context("spawning diffusion worker")?;

    if let Some([x, y]) = args.crosshair.as_deref() {
        scheduler.send(PlayerCommand::SetCrosshair { x: *x, y: *y });
    }

    scheduler.start().context("starting scheduler")?;
    std::thread::sleep(Duration::from_secs(args.seconds));
    scheduler.stop().context("stopping scheduler")?;

    if let Some(path) = &args.snapshot {
        let snapshot = scheduler
            .latest_snapshot()
            .context("no tick completed before stopping")?;
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    let engine = scheduler.into_engine().context("stopping scheduler")?;

    let world = engine.world();
    println!(
        "ticks={} entities={} money={} game_over={}",
        world.time,
        world.entity_count(),
        world.money,
        world.game_over
    );

    // Dropping the engine closes the diffusion channel.
    drop(engine);
    if worker.join().is_err() {
        warn!("diffusion worker panicked");
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}
