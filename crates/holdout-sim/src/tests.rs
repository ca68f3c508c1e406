//! Tests for the simulation engine: phases, commands, combat flow and teardown.

use std::sync::{Arc, Mutex};

use holdout_core::commands::PlayerCommand;
use holdout_core::config::GameConfig;
use holdout_core::enums::*;
use holdout_core::events::CombatEvent;
use holdout_core::layout::Viewport;

use crate::engine::{SimConfig, SimulationEngine};
use crate::navigation::WaypointPath;
use crate::scene::RetainedScene;
use crate::systems::wave_spawner::{WaveEntry, WaveSchedule};

fn short_path_engine(lives: u32) -> SimulationEngine {
    let config = SimConfig {
        game: GameConfig {
            starting_lives: lives,
            ..GameConfig::default()
        },
        ..SimConfig::default()
    };
    let path = WaypointPath::from_tuples(&[(0.0, 100.0), (10.0, 100.0)]).unwrap();
    SimulationEngine::with_path(config, path)
}

// ---- Determinism ----

fn defended_run(seed: u64, ticks: usize) -> Vec<String> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: 150.0,
            y: 120.0,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Sniper,
            x: 320.0,
            y: 200.0,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Tesla,
            x: 280.0,
            y: 60.0,
        },
        PlayerCommand::StartWaves,
    ]);
    (0..ticks)
        .map(|_| serde_json::to_string(&engine.tick(&mut scene)).unwrap())
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    let a = defended_run(12345, 900);
    let b = defended_run(12345, 900);
    for (tick, (snap_a, snap_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(snap_a, snap_b, "Snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    // Seeds only affect burst randomization, so divergence starts at the first kill.
    let a = defended_run(111, 1500);
    let b = defended_run(222, 1500);
    assert!(a != b, "Different seeds should produce divergent output");
}

// ---- Tick timing ----

#[test]
fn test_tick_timing_60_ticks_one_second() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    for _ in 0..60 {
        engine.tick(&mut scene);
    }
    assert_eq!(engine.time().tick, 60);
    assert!((engine.time().elapsed_secs() - 1.0).abs() < 1e-10);
}

#[test]
fn test_invalid_delta_advances_nothing() {
    let mut engine = short_path_engine(5);
    let mut scene = RetainedScene::new();
    engine.queue_command(PlayerCommand::SpawnZombie {
        kind: ZombieKind::Walker,
    });
    let before = engine.tick_with_delta(0.0, &mut scene);
    let after = engine.tick_with_delta(f32::NAN, &mut scene);
    assert_eq!(after.zombies[0].position, before.zombies[0].position);
    assert_eq!(engine.time().elapsed_frames, 0.0);
}

// ---- Pause/Resume ----

#[test]
fn test_pause_stops_simulation() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_command(PlayerCommand::StartWaves);
    for _ in 0..10 {
        engine.tick(&mut scene);
    }
    assert_eq!(engine.phase(), GamePhase::Active);
    let zombie_pos = engine.tick(&mut scene).zombies[0].position;

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        let snap = engine.tick(&mut scene);
        assert_eq!(snap.zombies[0].position, zombie_pos);
    }
    assert_eq!(engine.time().tick, 11, "Time should not advance while paused");
    assert_eq!(engine.phase(), GamePhase::Paused);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick(&mut scene);
    assert_eq!(engine.time().tick, 12);
    assert_eq!(engine.phase(), GamePhase::Active);
}

#[test]
fn test_resume_returns_to_setup() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_commands([PlayerCommand::Pause, PlayerCommand::Resume]);
    let snap = engine.tick(&mut scene);
    assert_eq!(snap.phase, GamePhase::Setup);
}

// ---- Phase gating ----

#[test]
fn test_start_waves_phase_gating() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();

    let snap = engine.tick(&mut scene);
    assert_eq!(snap.phase, GamePhase::Setup);
    assert!(snap.zombies.is_empty(), "No waves before StartWaves");

    engine.queue_command(PlayerCommand::StartWaves);
    let snap = engine.tick(&mut scene);
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.events.contains(&CombatEvent::WaveStarted { wave: 1 }));
    assert_eq!(snap.zombies.len(), 1);

    // Starting again while Active is rejected and changes nothing.
    engine.queue_command(PlayerCommand::StartWaves);
    let snap = engine.tick(&mut scene);
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.events.is_empty());
}

#[test]
fn test_resume_without_pause_is_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_command(PlayerCommand::Resume);
    assert_eq!(engine.tick(&mut scene).phase, GamePhase::Setup);
}

// ---- Commands ----

#[test]
fn test_place_tower_bounds() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: 400.0,
            y: 200.0,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: -5.0,
            y: 200.0,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: 400.0,
            y: 2.0,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: f32::NAN,
            y: 200.0,
        },
    ]);
    let snap = engine.tick(&mut scene);
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].position.0.x, 400.0);
}

#[test]
fn test_spawn_zombie_command() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_command(PlayerCommand::SpawnZombie {
        kind: ZombieKind::Brute,
    });
    let snap = engine.tick(&mut scene);
    assert_eq!(snap.zombies.len(), 1);
    assert_eq!(snap.zombies[0].kind, ZombieKind::Brute);
    assert!(snap.zombies[0].progress > 0.0);
}

// ---- Combat ----

#[test]
fn test_kill_awards_points_and_spawns_burst() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::SpawnZombie {
            kind: ZombieKind::Walker,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Sniper,
            x: 60.0,
            y: 120.0,
        },
    ]);

    // Sniper: 60 damage every 90 frames, Walker: 100 health.
    let mut killed = false;
    let mut max_particles = 0;
    for _ in 0..200 {
        let snap = engine.tick(&mut scene);
        max_particles = max_particles.max(snap.particles);
        if snap
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Killed { zombie: ZombieKind::Walker, .. }))
        {
            killed = true;
            assert!(snap.zombies.is_empty(), "Killed zombie removed in the same tick");
            break;
        }
    }
    assert!(killed);
    let snap = engine.tick(&mut scene);
    assert!(!snap.towers[0].targeting, "Targeting line released once no target remains");
    assert!(max_particles > 10);
    assert_eq!(engine.score().kills, 1);
    assert_eq!(engine.score().shots_fired, 2);
    assert_eq!(engine.score().points, 5);
}

#[test]
fn test_hit_flash_visible_in_snapshot() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::SpawnZombie {
            kind: ZombieKind::Brute,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: 40.0,
            y: 100.0,
        },
    ]);
    let snap = engine.tick(&mut scene);
    let filters = &snap.zombies[0].filters;
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].kind, FilterKind::HitFlash);
    assert!(filters[0].intensity > 0.0 && filters[0].intensity < 1.0);
}

#[test]
fn test_snapshot_reports_only_live_particles() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Flamethrower,
            x: 40.0,
            y: 110.0,
        },
        PlayerCommand::StartWaves,
    ]);
    for _ in 0..400 {
        let snap = engine.tick(&mut scene);
        assert_eq!(snap.particles, engine.particles().len());
        assert_eq!(scene.dot_count(), snap.particles);
        assert!(engine.particles().iter().all(|p| p.life > 0.0));
    }
}

// ---- Lives and game over ----

#[test]
fn test_escapes_cost_lives_until_game_over() {
    let mut engine = short_path_engine(2);
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::SpawnZombie {
            kind: ZombieKind::Runner,
        },
        PlayerCommand::SpawnZombie {
            kind: ZombieKind::Runner,
        },
    ]);

    let mut events = Vec::new();
    for _ in 0..20 {
        events.extend(engine.tick(&mut scene).events);
    }

    let escaped: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::Escaped {
                lives_remaining, ..
            } => Some(*lives_remaining),
            _ => None,
        })
        .collect();
    assert_eq!(escaped, vec![1, 0]);
    assert_eq!(
        events.iter().filter(|e| **e == CombatEvent::GameOver).count(),
        1
    );
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.lives(), 0);
    assert_eq!(engine.score().escaped, 2);
}

#[test]
fn test_game_over_rejects_commands_but_finishes_effects() {
    let mut engine = short_path_engine(1);
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Gunner,
            x: 20.0,
            y: 120.0,
        },
        PlayerCommand::SpawnZombie {
            kind: ZombieKind::Runner,
        },
    ]);
    while engine.phase() != GamePhase::GameOver {
        engine.tick(&mut scene);
        assert!(engine.time().tick < 100);
    }

    engine.queue_commands([
        PlayerCommand::SpawnZombie {
            kind: ZombieKind::Walker,
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Tesla,
            x: 200.0,
            y: 200.0,
        },
        PlayerCommand::StartWaves,
    ]);
    let snap = engine.tick(&mut scene);
    assert!(snap.zombies.is_empty());
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.phase, GamePhase::GameOver);

    // Hit sparks keep fading after the game ends.
    for _ in 0..30 {
        engine.tick(&mut scene);
    }
    assert!(engine.particles().is_empty());
}

// ---- Waves ----

#[test]
fn test_custom_wave_schedule() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.set_wave_schedule(WaveSchedule::new(vec![WaveEntry {
        start_after: 5,
        groups: vec![(ZombieKind::Spitter, 1)],
        spawned: false,
    }]));
    engine.queue_command(PlayerCommand::StartWaves);

    for _ in 0..5 {
        assert!(engine.tick(&mut scene).zombies.is_empty());
    }
    let snap = engine.tick(&mut scene);
    assert_eq!(snap.zombies.len(), 1);
    assert!(engine.wave_schedule().is_finished());
}

#[test]
fn test_wave_spacing_follows_elapsed_frames() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.set_wave_schedule(WaveSchedule::new(vec![WaveEntry {
        start_after: 0,
        groups: vec![(ZombieKind::Walker, 2)],
        spawned: false,
    }]));
    engine.queue_command(PlayerCommand::StartWaves);

    // The second walker is due 45 frames in, which is 23 ticks of 2 frames.
    let mut snap = engine.tick_with_delta(2.0, &mut scene);
    assert_eq!(snap.zombies.len(), 1);
    for _ in 1..23 {
        snap = engine.tick_with_delta(2.0, &mut scene);
    }
    assert_eq!(snap.zombies.len(), 1);
    for _ in 23..30 {
        snap = engine.tick_with_delta(2.0, &mut scene);
    }
    assert_eq!(engine.time().elapsed_frames, 60.0);
    assert_eq!(snap.zombies.len(), 2);
    assert!(engine.wave_schedule().is_finished());
}

// ---- Layout ----

#[test]
fn test_resize_notifies_subscribers() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let id = engine.subscribe_layout(move |layout| sink.lock().unwrap().push(layout.scale));

    let layout = engine.resize(Viewport {
        width: 1920.0,
        height: 1080.0,
    });
    assert_eq!(layout.scale, 2.0);
    assert_eq!(engine.layout().scale, 2.0);
    assert_eq!(*seen.lock().unwrap(), vec![2.0]);

    assert!(engine.unsubscribe_layout(id));
    engine.resize(Viewport {
        width: 480.0,
        height: 270.0,
    });
    assert_eq!(*seen.lock().unwrap(), vec![2.0]);
    assert_eq!(engine.layout().scale, 0.5);
    assert!(!engine.unsubscribe_layout(id));
}

// ---- Teardown ----

#[test]
fn test_teardown_releases_every_visual() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut scene = RetainedScene::new();
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Sniper,
            x: 150.0,
            y: 150.0,
        },
        PlayerCommand::StartWaves,
    ]);
    for _ in 0..200 {
        engine.tick(&mut scene);
    }
    assert!(scene.line_count() > 0, "Sniper should be painting a target");

    let report = engine.teardown(&mut scene);
    assert!(report.entities > 0);
    assert!(scene.is_empty());
    assert_eq!(scene.attached(), scene.detached());
    assert!(engine.particles().is_empty());

    let again = engine.teardown(&mut scene);
    assert_eq!(again.particles, 0);
    assert_eq!(again.entities, 0);
}
