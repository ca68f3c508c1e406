//! holdout-harness: headless seeded runs and matrix inspection.
//!
//! Usage:
//!   holdout-harness run --seed 42 --ticks 3600 [--config game.json]
//!   holdout-harness matrix [--config game.json]
//!
//! Logs go to stderr (filter with RUST_LOG); JSON results go to stdout.

use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use holdout_core::commands::PlayerCommand;
use holdout_core::config::GameConfig;
use holdout_core::enums::{GamePhase, TowerKind, ZombieKind};
use holdout_sim::effectiveness::EffectivenessMatrix;
use holdout_sim::scene::RetainedScene;
use holdout_sim::{SimConfig, SimulationEngine};

/// Default defense for `run`: one of each tower along the route.
const DEFENSE: [(TowerKind, f32, f32); 5] = [
    (TowerKind::Gunner, 150.0, 130.0),
    (TowerKind::Shotgun, 340.0, 160.0),
    (TowerKind::Sniper, 480.0, 220.0),
    (TowerKind::Tesla, 620.0, 380.0),
    (TowerKind::Flamethrower, 700.0, 410.0),
];

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "matrix" => cmd_matrix(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(message) = result {
        error!("{message}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "holdout-harness: HOLDOUT headless simulation runner\n\
         \n\
         Commands:\n\
         \n\
         run       Play the default wave schedule against a fixed defense\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --ticks <N>        Frames to simulate (default: 3600)\n\
           --config <path>    Game configuration JSON (optional)\n\
         \n\
         matrix    Print weaknesses and resistances for every zombie kind\n\
         \n\
           --config <path>    Game configuration JSON (optional)\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T, String> {
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("invalid value for {flag}: {raw}")),
        None => Ok(default),
    }
}

fn load_config(args: &[String]) -> Result<GameConfig, String> {
    let Some(path) = flag_value(args, "--config") else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    let config = GameConfig::from_json(&text).map_err(|e| format!("{path}: {e}"))?;
    info!(path, entries = config.effectiveness.len(), "configuration loaded");
    Ok(config)
}

fn cmd_run(args: &[String]) -> Result<(), String> {
    let seed: u64 = parse_flag(args, "--seed", 42)?;
    let ticks: u64 = parse_flag(args, "--ticks", 3600)?;
    let game = load_config(args)?;

    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        game,
        ..SimConfig::default()
    });
    let mut scene = RetainedScene::new();
    for (kind, x, y) in DEFENSE {
        engine.queue_command(PlayerCommand::PlaceTower { kind, x, y });
    }
    engine.queue_command(PlayerCommand::StartWaves);

    let mut snapshot = engine.tick(&mut scene);
    let mut events = snapshot.events.len();
    for _ in 1..ticks {
        snapshot = engine.tick(&mut scene);
        events += snapshot.events.len();
        if snapshot.phase == GamePhase::GameOver
            || (engine.wave_schedule().is_finished() && snapshot.zombies.is_empty())
        {
            break;
        }
    }

    info!(
        tick = snapshot.time.tick,
        kills = snapshot.score.kills,
        escaped = snapshot.score.escaped,
        lives = snapshot.lives,
        events,
        visuals_attached = scene.attached(),
        "run finished"
    );
    let report = engine.teardown(&mut scene);
    info!(
        particles = report.particles,
        entities = report.entities,
        "scene released"
    );

    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn cmd_matrix(args: &[String]) -> Result<(), String> {
    let matrix = EffectivenessMatrix::from_config(&load_config(args)?);

    let rows: Vec<serde_json::Value> = ZombieKind::ALL
        .iter()
        .map(|&defender| {
            let list = |pairs: Vec<(TowerKind, f32)>| {
                pairs
                    .into_iter()
                    .map(|(tower, m)| {
                        serde_json::json!({
                            "tower": tower.as_str(),
                            "multiplier": m,
                            "tier": holdout_sim::effectiveness::classify(m).label(),
                        })
                    })
                    .collect::<Vec<_>>()
            };
            serde_json::json!({
                "zombie": defender.as_str(),
                "weaknesses": list(matrix.weaknesses_of(defender)),
                "resistances": list(matrix.resistances_of(defender)),
            })
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
