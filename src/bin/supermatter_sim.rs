//! Headless Supermatter Runner
//!
//! Builds a small engine room, runs the crystal for a fixed number of ticks
//! and prints a JSON summary of how it ended.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use supermatter_sim::core::error::Result;
use supermatter_sim::core::types::{LocalityId, Position};
use supermatter_sim::core::SupermatterConfig;
use supermatter_sim::gas::{Gas, GasMixture};
use supermatter_sim::grid::StorageKind;
use supermatter_sim::simulation::{run_simulation_tick, Station};
use supermatter_sim::supermatter::{CascadeReport, ImpactKind, Impactor, SupermatterEvent};

/// Headless Supermatter Runner - run the crystal and report the outcome
#[derive(Parser, Debug)]
#[command(name = "supermatter_sim")]
#[command(about = "Run a supermatter crystal for N ticks and output a JSON summary")]
struct Args {
    /// Crystal config (TOML). Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.5)]
    frame_time: f32,

    /// Temperature (K) of the gas around the crystal
    #[arg(long, default_value_t = 293.15)]
    temperature: f32,

    /// Oxygen moles on the crystal's tile
    #[arg(long, default_value_t = 21.0)]
    oxygen: f32,

    /// Nitrogen moles on the crystal's tile
    #[arg(long, default_value_t = 79.0)]
    nitrogen: f32,

    /// Leave the crystal's tile in vacuum
    #[arg(long)]
    vacuum: bool,

    /// Feed pellets thrown at the crystal before the first tick
    #[arg(long, default_value_t = 0)]
    feeds: u32,

    /// Power carried by each feed pellet
    #[arg(long, default_value_t = 2000.0)]
    feed_power: f32,

    /// Lights, breakers, batteries, SMES units and solar panels to place
    #[arg(long, default_value_t = 20)]
    lights: u32,
    #[arg(long, default_value_t = 4)]
    apcs: u32,
    #[arg(long, default_value_t = 6)]
    batteries: u32,
    #[arg(long, default_value_t = 2)]
    smes: u32,
    #[arg(long, default_value_t = 8)]
    solars: u32,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks_run: u64,
    seconds: f64,
    final_damage: f32,
    final_power: f32,
    integrity: u32,
    exploded: bool,
    radio_messages: usize,
    cascade: Option<CascadeReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("supermatter_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => SupermatterConfig::load_from_toml(path)?,
        None => SupermatterConfig::default(),
    };

    let mut station = Station::new(seed);
    let engine_room = LocalityId(1);
    let core_pos = Position::new(engine_room, 0, 0);
    let id = station.spawn_supermatter(core_pos, config);

    if !args.vacuum {
        station.atmosphere.set_tile(
            core_pos,
            GasMixture::new(args.temperature)
                .with_moles(Gas::Oxygen, args.oxygen)
                .with_moles(Gas::Nitrogen, args.nitrogen),
        );
    }
    populate_grid(&mut station, engine_room, &args);

    for _ in 0..args.feeds {
        let pellet = Impactor::new(ImpactKind::Feed {
            power: args.feed_power,
        });
        station.collide(id, &pellet)?;
    }

    tracing::info!(?seed, ticks = args.ticks, "starting supermatter run");

    let mut radio_messages = 0;
    let mut cascade = None;
    let mut ticks_run = 0;
    for _ in 0..args.ticks {
        let events = run_simulation_tick(&mut station, args.frame_time);
        ticks_run += 1;
        for event in &events {
            match event {
                SupermatterEvent::Radio { .. } => radio_messages += 1,
                SupermatterEvent::CascadeFired { report, .. } => cascade = Some(*report),
                _ => {}
            }
        }
        if cascade.is_some() {
            break;
        }
    }

    let sm = station
        .get(id)
        .ok_or(supermatter_sim::core::SupermatterError::EntityNotFound(id))?;
    let summary = RunSummary {
        seed,
        ticks_run,
        seconds: station.clock.now(),
        final_damage: sm.state.damage,
        final_power: sm.state.power,
        integrity: sm.integrity(),
        exploded: sm.state.exploded,
        radio_messages,
        cascade,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn populate_grid(station: &mut Station, locality: LocalityId, args: &Args) {
    let spot = |i: u32| Position::new(locality, 2 + i as i32, 3);
    for i in 0..args.lights {
        station.grid.spawn_light(spot(i));
    }
    for i in 0..args.apcs {
        station.grid.spawn_apc(spot(i));
    }
    for i in 0..args.batteries {
        station.grid.spawn_storage(spot(i), StorageKind::Battery, 1_000.0);
    }
    for i in 0..args.smes {
        station.grid.spawn_storage(spot(i), StorageKind::Smes, 8_000_000.0);
    }
    for i in 0..args.solars {
        station.grid.spawn_solar_panel(spot(i));
    }
}
