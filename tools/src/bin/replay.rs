use clap::Parser;
use spacefighter_simulator::scenario;
use spacefighter_simulator::simulation::Simulation;
use spacefighter_simulator::snapshot::Timing;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap()]
struct Arguments {
    scenario: String,

    #[clap(short, long, default_value = "0")]
    seed: u32,

    /// Stop after this many ticks even if the scenario is still running.
    #[clap(short, long)]
    ticks: Option<u32>,

    /// JSON ship configuration.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON snapshot per line instead of a table.
    #[clap(long)]
    json: bool,

    /// Record every Nth tick.
    #[clap(long, default_value = "1")]
    every: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    let Some(loaded) = scenario::load_safe(&args.scenario) else {
        anyhow::bail!(
            "Unknown scenario {:?}, expected one of {:?}",
            args.scenario,
            scenario::list()
        );
    };
    let max_ticks = args.ticks.unwrap_or_else(|| loaded.max_ticks());
    let config = match args.config.as_deref() {
        Some(path) => spacefighter_tools::load_config(path)?,
        None => Default::default(),
    };
    let every = args.every.max(1);

    let mut sim = Simulation::with_scenario(loaded, args.seed, config);
    let mut table = spacefighter_tools::new_table();
    let mut timing = Timing::default();
    while sim.status() == scenario::Status::Running && sim.tick() < max_ticks {
        sim.step();
        let snapshot = sim.snapshot(sim.tick());
        timing += snapshot.timing.clone();
        if sim.tick() % every != 0 {
            continue;
        }
        if args.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            spacefighter_tools::add_rows(&mut table, &snapshot);
        }
    }

    if !args.json {
        println!("{table}");
    }
    log::info!(
        "{} (seed {}) finished with {:?} after {} ticks ({:.3}s simulated, {:.3}ms wall)",
        sim.scenario_name(),
        sim.seed(),
        sim.status(),
        sim.tick(),
        sim.time(),
        timing.total() * 1e3
    );
    Ok(())
}
