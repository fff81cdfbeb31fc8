//! npc-sim: run tank NPCs against a scripted player
//!
//! Run with: cargo run -p npc_sim -- --config sim.toml --ticks 900

use clap::Parser;
use npc_fsm::LogSink;
use npc_sim::{SimConfig, World};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "npc-sim")]
#[command(version)]
#[command(about = "Deterministic table-driven FSM tank simulation")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticks to run (overrides config and NPC_SIM_TICKS)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// RNG seed (overrides config and NPC_SIM_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of tanks (overrides config and NPC_SIM_AGENTS)
    #[arg(short, long)]
    agents: Option<usize>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = match SimConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ticks) = args.ticks {
        config.sim.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    if let Some(agents) = args.agents {
        config.sim.agents = agents;
    }
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    let mut world = match World::new(&config, Arc::new(LogSink)) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to build agents: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ticks = config.sim.ticks;
    log::info!("Running {} ticks at {:.4}s", ticks, config.sim.delta_time);
    let summary = world.run(ticks);

    println!("tick {}  player at {:?}", world.tick(), world.player().position.to_array());
    for agent in &summary {
        let state = agent
            .state
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "agent {:>2}  {:<7} health {:>6.1}  shots {:>4}  switches {:>3}  at [{:.1}, {:.1}, {:.1}]",
            agent.agent,
            state,
            agent.health,
            agent.shots_fired,
            agent.switches,
            agent.position.x,
            agent.position.y,
            agent.position.z,
        );
    }

    ExitCode::SUCCESS
}
