//! Robot Arena headless runner
//!
//! Builds an arena from a parameter bundle and drives it until the game ends
//! or the tick limit is reached. A viewer would sit where the autopilot does.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use robot_arena::ArenaParams;
use robot_arena::consts::{MAX_SUBSTEPS, REALTIME_TICK_SECS};
use robot_arena::sim::{Arena, GameStatus, autopilot_command};

/// Ticks between battery reports
const BATTERY_LOG_INTERVAL: u64 = 100;

#[derive(Parser)]
#[command(about = "Headless robot arena runner")]
struct Args {
    /// JSON parameter bundle (stock arena when omitted)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Override the home base seed
    #[arg(long)]
    seed: Option<u64>,

    /// Pace ticks at the viewer's cadence instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Steer the player toward the nearest moving robot
    #[arg(long)]
    autopilot: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => ArenaParams::load(path)
            .with_context(|| format!("failed to load arena params from {}", path.display()))?,
        None => ArenaParams::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let mut arena = Arena::try_new(params).context("invalid arena params")?;

    log::info!(
        "Robot Arena starting (max {} ticks{}{})",
        args.max_ticks,
        if args.realtime { ", realtime" } else { "" },
        if args.autopilot { ", autopilot" } else { "" }
    );

    let status = if args.realtime {
        run_realtime(&mut arena, &args)
    } else {
        run(&mut arena, &args)
    };

    match status {
        GameStatus::Win => log::info!("Player wins after {} ticks", arena.ticks()),
        GameStatus::Lose => log::info!("Player loses after {} ticks", arena.ticks()),
        GameStatus::Continue => log::info!("Stopped at tick limit ({} ticks)", arena.ticks()),
    }

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&arena.snapshot())?);
    }
    Ok(())
}

/// One tick, with autopilot input first when enabled
fn step(arena: &mut Arena, autopilot: bool) -> GameStatus {
    let input = if autopilot { autopilot_command(arena) } else { None };
    if let Some(cmd) = input {
        arena.accept(cmd.key_code());
    }

    let status = arena.advance_time();
    if arena.ticks() % BATTERY_LOG_INTERVAL == 0 {
        log::info!(
            "Tick {}: battery {:.2}, {} robots in play, {} superbots",
            arena.ticks(),
            arena.player_battery_level(),
            arena.robots().count(),
            arena.n_superbots()
        );
    }
    status
}

fn run(arena: &mut Arena, args: &Args) -> GameStatus {
    let mut status = arena.status();
    while !status.is_over() && arena.ticks() < args.max_ticks {
        status = step(arena, args.autopilot);
    }
    status
}

/// Accumulate real elapsed time and tick each time it crosses the cadence
fn run_realtime(arena: &mut Arena, args: &Args) -> GameStatus {
    let mut status = arena.status();
    let mut accumulator = 0.0;
    let mut last_time = Instant::now();

    while !status.is_over() && arena.ticks() < args.max_ticks {
        let now = Instant::now();
        accumulator += now.duration_since(last_time).as_secs_f64().min(0.25);
        last_time = now;

        let mut substeps = 0;
        while accumulator >= REALTIME_TICK_SECS && substeps < MAX_SUBSTEPS {
            status = step(arena, args.autopilot);
            accumulator -= REALTIME_TICK_SECS;
            substeps += 1;
            if status.is_over() || arena.ticks() >= args.max_ticks {
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    status
}
