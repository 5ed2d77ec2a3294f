mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lbsim_core::{MetricsCollector, ServerClass, Simulation, SimulationConfig, TICKS_PER_SECOND};
use log::info;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Simulate sequential clients routed uniformly at random across a server pool.
#[derive(Parser, Debug)]
#[command(name = "lbsim", version)]
struct Args {
    /// JSON configuration file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of sequential clients
    #[arg(long)]
    clients: Option<u32>,

    /// Simulated duration in ticks (milliseconds)
    #[arg(short, long)]
    duration: Option<u64>,

    /// Routing seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Server class as COUNTxLATENCY, e.g. 99x1; repeat for several classes
    #[arg(long = "servers", value_parser = parse_server_class)]
    servers: Vec<ServerClass>,

    /// Print a throughput timeline sampled every N ticks
    #[arg(long, value_name = "TICKS")]
    sample_every: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_server_class(value: &str) -> std::result::Result<ServerClass, String> {
    let (count, latency) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COUNTxLATENCY, got {value:?}"))?;
    let count = count
        .trim()
        .parse()
        .map_err(|e| format!("bad server count {count:?}: {e}"))?;
    let latency = latency
        .trim()
        .parse()
        .map_err(|e| format!("bad latency {latency:?}: {e}"))?;
    Ok(ServerClass::new(count, latency))
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SimulationConfig::from_json_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(clients) = args.clients {
        config.client_count = clients;
    }
    if let Some(duration) = args.duration {
        config.duration_ticks = duration;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if !args.servers.is_empty() {
        config.server_classes = args.servers.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(&args)?;
    info!(
        "simulating {} clients over {} servers for {} ticks",
        config.client_count,
        config.server_count(),
        config.duration_ticks
    );

    let mut sim = Simulation::from_config(&config).context("building simulation")?;

    let timeline = match args.sample_every {
        Some(step) => {
            let mut collector = MetricsCollector::new(step, TICKS_PER_SECOND, usize::MAX);
            for _ in 0..config.duration_ticks {
                sim.step().context("simulation aborted")?;
                collector.update(&sim);
            }
            Some(collector.history.into_iter().collect::<Vec<_>>())
        }
        None => {
            sim.run(config.duration_ticks).context("simulation aborted")?;
            None
        }
    };

    let output = report::Output::new(&sim.snapshot(), timeline);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Text => report::write_text(&mut out, &output)?,
        Format::Json => report::write_json(&mut out, &output)?,
    }
    Ok(())
}
