use anyhow::{Context, Result};
use clap::Parser;
use posture::config::SimulationConfig;
use posture::driver::DriverEvent;
use posture::simulation::Simulator;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Run the security posture automaton against simulated attacks.
#[derive(Debug, Parser)]
#[command(name = "posture-sim", version, about)]
struct Cli {
    /// TOML file with simulation settings
    #[arg(short, long, env = "POSTURE_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for the attack generator
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks instead of waiting for Ctrl-C
    #[arg(long)]
    ticks: Option<usize>,

    /// Override the tick interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Print the final diagram snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(interval) = cli.interval_ms {
        config.tick_interval_ms = interval;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut sim = Simulator::from_config(&config)?;
    sim.driver_mut().subscribe(|event| {
        if let DriverEvent::Transitioned(t) = event {
            if t.critical {
                tracing::warn!(state = %t.to, "Critical alert");
            }
        }
    });

    match cli.ticks {
        Some(ticks) => {
            let processed = sim.run_ticks(ticks);
            tracing::info!(ticks, processed, "Simulation finished");
        }
        None => {
            let (tx, rx) = watch::channel(false);
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        let _ = tx.send(true);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Ctrl-C handler unavailable, stopping simulation");
                    }
                }
            });
            sim.run(config.tick_interval(), rx).await;
        }
    }

    for entry in sim.log().entries() {
        println!(
            "{}  {:<15}  {:<10}  {:?}  {}ms",
            entry.timestamp.format("%H:%M:%S"),
            entry.ip,
            entry.kind,
            entry.status,
            entry.response_time_ms
        );
    }
    println!(
        "state={} transitions={} active_threats={}",
        sim.driver().current_state(),
        sim.driver().transition_count(),
        sim.active_threats()
    );

    if cli.json {
        println!("{}", sim.snapshot().to_json()?);
    }

    Ok(())
}
