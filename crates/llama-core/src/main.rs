//! Headless llama habitat.
//!
//! Loads the saved habitat (or seeds founders), runs a number of ticks,
//! optionally plays keeper via the autopilot, autosaves, and prints the
//! roster.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use llama_core::audio::{dispatch, TraceSink};
use llama_core::config::{Config, DEFAULT_TUNING_PATH};
use llama_core::events::EventLogger;
use llama_core::random::rand_range;
use llama_core::{Habitat, ItemKind, Llama, LlamaId, Simulation};

/// Command line arguments for the habitat
#[derive(Parser, Debug)]
#[command(name = "llamasim")]
#[command(about = "A headless llama habitat simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (defaults to the tuning file)
    #[arg(long)]
    ticks: Option<u64>,

    /// Tuning file
    #[arg(long, default_value = DEFAULT_TUNING_PATH)]
    config: PathBuf,

    /// Save file (defaults to the tuning file)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Ignore any saved habitat
    #[arg(long)]
    fresh: bool,

    /// Pace ticks at the configured tick period
    #[arg(long)]
    realtime: bool,

    /// Habitat width
    #[arg(long)]
    width: Option<f32>,

    /// Habitat height
    #[arg(long)]
    height: Option<f32>,

    /// Write every event as JSONL to this file
    #[arg(long)]
    events_log: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(&args.config);
    let ticks = args.ticks.unwrap_or(config.simulation.default_ticks);
    let state_path = args
        .state
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.storage.path));
    let habitat = Habitat::new(
        args.width.unwrap_or(config.habitat.width),
        args.height.unwrap_or(config.habitat.height),
    );

    println!("Llama Habitat");
    println!("=============");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", ticks);
    println!("Habitat: {}x{}", habitat.width, habitat.height);
    println!("Save file: {}", state_path.display());
    println!();

    let mut sim = if args.fresh {
        Simulation::new(args.seed, habitat)
    } else {
        Simulation::load_or_default(&state_path, args.seed, habitat)
    };
    sim.set_founders(config.simulation.founders);
    if sim.herd().is_empty() {
        let founders = sim.seed_founders();
        println!("Seeded {} founders", founders.len());
    }

    let mut logger = match &args.events_log {
        Some(path) => EventLogger::new(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %path.display(), "event log disabled");
            EventLogger::null()
        }),
        None => EventLogger::null(),
    };
    let mut sink = TraceSink::new();
    // Autopilot decisions draw from their own stream so the habitat's RNG
    // sequence only depends on the seed and the commands issued.
    let mut keeper_rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1));

    for step in 1..=ticks {
        run_autopilot(&mut sim, &config, step, &mut keeper_rng);
        sim.tick();

        let events = sim.drain_events();
        dispatch(&mut sink, &events, sim.music_playing());
        if let Err(e) = logger.log_batch(&events) {
            tracing::warn!(error = %e, "failed to write events");
        }

        let interval = config.simulation.autosave_interval;
        if interval > 0 && step % interval == 0 {
            if let Err(e) = sim.save(&state_path) {
                tracing::warn!(error = %e, "autosave failed");
            }
        }

        let progress = config.simulation.progress_interval;
        if progress > 0 && step % progress == 0 {
            println!(
                "[Tick {:>4}] {} - {} alive of {}, {} items ({} food)",
                step,
                sim.clock(),
                sim.herd().living().count(),
                sim.herd().len(),
                sim.items().len(),
                sim.items().count_of_kind(ItemKind::Food)
            );
        }

        if args.realtime {
            thread::sleep(Duration::from_millis(config.simulation.tick_ms));
        }
    }

    if let Err(e) = logger.flush() {
        tracing::warn!(error = %e, "failed to flush event log");
    }
    match sim.save(&state_path) {
        Ok(()) => tracing::info!(path = %state_path.display(), "habitat saved"),
        Err(e) => tracing::warn!(error = %e, "final save failed"),
    }

    println!();
    println!("Finished on {} after {} ticks.", sim.clock(), ticks);
    println!();
    print_roster(&sim);
}

/// Plays keeper: breeds two random living llamas and drops snacks on a timer.
fn run_autopilot(sim: &mut Simulation, config: &Config, step: u64, rng: &mut SmallRng) {
    let autopilot = &config.autopilot;

    if autopilot.breed_interval > 0 && step % autopilot.breed_interval == 0 {
        let living: Vec<LlamaId> = sim.herd().living().map(|l| l.id.clone()).collect();
        if living.len() >= 2 {
            let first = rng.gen_range(0..living.len());
            let mut second = rng.gen_range(0..living.len() - 1);
            if second >= first {
                second += 1;
            }
            sim.clear_selection();
            sim.select(&living[first]);
            sim.select(&living[second]);
            match sim.breed_selected() {
                Ok(child) => {
                    if let Some(llama) = sim.llama(&child) {
                        println!("  {} was born (gen {})", llama.name, llama.generation);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "autopilot breeding rejected"),
            }
        }
    }

    if autopilot.snack_interval > 0 && step % autopilot.snack_interval == 0 {
        let habitat = sim.habitat();
        let x = rand_range(rng, 0.0, habitat.width);
        let y = rand_range(rng, 0.0, habitat.height);
        sim.place_item(x, y, ItemKind::Food);
    }
}

fn parent_names(sim: &Simulation, llama: &Llama) -> String {
    if llama.is_founder() {
        return "founder".to_string();
    }
    let names: Vec<&str> = llama
        .parents
        .iter()
        .filter_map(|id| sim.llama(id))
        .map(|parent| parent.name.as_str())
        .collect();
    if names.is_empty() {
        "Unknown".to_string()
    } else {
        names.join(" + ")
    }
}

fn print_roster(sim: &Simulation) {
    println!("Roster");
    println!("------");
    for llama in sim.herd().iter() {
        println!(
            "{:<18} {:<16} gen {:<3} {:>4.0}% stable  parents: {}",
            llama.name,
            llama.status(),
            llama.generation,
            llama.stability() * 100.0,
            parent_names(sim, llama)
        );
        println!("{:<18} {}", "", llama.dna.traits.summary());
    }
}
