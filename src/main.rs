//! Meteor Dash headless runner
//!
//! Drives the simulation with the demo autopilot for a fixed number of
//! frames. Sound goes to the log backend and each frame is drawn into a
//! recording renderer, so the whole frontend path is exercised without a
//! window.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use meteor_dash::audio::{AudioManager, LogBackend};
use meteor_dash::input::InputState;
use meteor_dash::renderer::{DrawList, render_frame};
use meteor_dash::sim::GameEvent;
use meteor_dash::{ConfigError, GameConfig, GameMode, GameSession, tick};

#[derive(Parser)]
#[command(name = "meteor-dash")]
#[command(about = "Run Meteor Dash headless with the demo autopilot")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,

    /// Simulation rate in frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// JSON game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.fps == 0 {
        return Err(ConfigError::Invalid("fps must be at least 1".into()));
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    let dt = 1.0 / args.fps as f32;

    let mut session = GameSession::new(config, seed)?;
    log::info!("Meteor Dash starting with seed: {}", seed);

    let mut input = InputState::new();
    input.idle_mode = true;
    let mut audio = AudioManager::new(LogBackend);
    let mut frame = DrawList::new();

    let mut runs = 0u32;
    let mut best_score = 0u64;
    let mut best_level = 0u32;
    let mut draw_calls = 0usize;

    for _ in 0..args.frames {
        let frame_input = input.frame_input();
        tick(&mut session, &frame_input, dt);

        let events = session.drain_events();
        for event in &events {
            if let GameEvent::ModeChanged { to: GameMode::GameOver, .. } = event {
                runs += 1;
                best_score = best_score.max(session.player.score);
                best_level = best_level.max(session.level);
                log::info!(
                    "Run {} over: score {} at level {}",
                    runs,
                    session.player.score,
                    session.level
                );
            }
        }
        audio.handle_events(&events);

        frame.clear();
        render_frame(&session, &mut frame);
        draw_calls += frame.commands.len();
    }

    if session.mode == GameMode::InGame {
        best_score = best_score.max(session.player.score);
        best_level = best_level.max(session.level);
    }

    log::info!(
        "Simulated {} frames ({:.1}s): {} finished runs, best score {}, best level {}, {} draw calls",
        args.frames,
        args.frames as f32 * dt,
        runs,
        best_score,
        best_level,
        draw_calls
    );
    log::info!(
        "Final state: mode {}, level {}, score {}, lives {}",
        session.mode.as_str(),
        session.level,
        session.player.score,
        session.player.lives
    );

    Ok(())
}
