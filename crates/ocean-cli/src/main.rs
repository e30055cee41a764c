//! Terminal front end: reads the grid size, then draws one frame per tick.

mod display;
mod input;
mod telemetry;

use anyhow::{Context, Result};
use ocean_core::{SimulationConfig, WorldConfig};
use ocean_world::{simulation::emit_summary, Simulation};
use std::io;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let mut config = load_config()?;

    let (rows, cols) = input::read_dimensions(io::stdin().lock())
        .context("failed to read grid dimensions from stdin")?;
    config.world = WorldConfig::new(rows, cols);

    let mut simulation = Simulation::new(&config)?;
    info!(
        seed = simulation.seed(),
        rows,
        cols,
        tick_interval_ms = config.display.tick_interval_ms,
        "Starting ocean"
    );

    let mut terminal = display::Terminal::new(io::stdout(), config.display.clear_screen);
    terminal.draw(&display::frame(
        &simulation.render(),
        simulation.tick(),
        &simulation.census(),
    ))?;

    run_loop(&mut simulation, &mut terminal, &config).await?;

    emit_summary(&simulation.summary());
    info!("Ocean stopped");

    Ok(())
}

/// Configuration from the JSON file named by the first argument, if any,
/// with `OCEAN_SEED` taking precedence over the file's seed.
fn load_config() -> Result<SimulationConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => SimulationConfig::default(),
    };

    if let Ok(seed) = std::env::var("OCEAN_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("OCEAN_SEED must be an unsigned integer, got '{}'", seed))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

async fn run_loop<W: io::Write>(
    simulation: &mut Simulation,
    terminal: &mut display::Terminal<W>,
    config: &SimulationConfig,
) -> Result<()> {
    let period = Duration::from_millis(config.display.tick_interval_ms.max(1));
    let mut pacing = interval(period);
    pacing.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately
    pacing.tick().await;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        if config.max_ticks.is_some_and(|max| simulation.tick() >= max) {
            info!(ticks = simulation.tick(), "Tick limit reached");
            break;
        }

        tokio::select! {
            _ = pacing.tick() => {
                let report = simulation.step();
                terminal.draw(&display::frame(&simulation.render(), report.tick, &report.census))?;
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
