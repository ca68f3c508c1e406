//! Simulation engine for HOLDOUT.
//!
//! `SimulationEngine` owns the hecs world, the particle system, the shared
//! path and the screen layout. It processes player commands, runs all
//! systems in a fixed order and produces `GameStateSnapshot`s. It never
//! draws; every visual goes through the [`SceneGraph`] passed to `tick`.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use holdout_core::commands::PlayerCommand;
use holdout_core::config::GameConfig;
use holdout_core::constants::*;
use holdout_core::enums::GamePhase;
use holdout_core::error::CommandError;
use holdout_core::events::CombatEvent;
use holdout_core::layout::{Layout, LayoutSubscribers, SubscriptionId, Viewport};
use holdout_core::state::{GameStateSnapshot, ScoreView};
use holdout_core::types::SimTime;

use crate::effectiveness::EffectivenessMatrix;
use crate::navigation::WaypointPath;
use crate::particles::ParticleSystem;
use crate::scene::SceneGraph;
use crate::systems;
use crate::systems::snapshot::SnapshotMeta;
use crate::systems::tower_fire::FireContext;
use crate::systems::wave_spawner::WaveSchedule;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
    /// Initial viewport used to compute the layout.
    pub viewport: Viewport,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
            viewport: Viewport::default(),
        }
    }
}

/// What [`SimulationEngine::teardown`] released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub particles: usize,
    pub entities: usize,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    /// Phase to return to on resume.
    resume_phase: GamePhase,
    rng: ChaCha8Rng,
    matrix: EffectivenessMatrix,
    particles: ParticleSystem,
    path: Arc<WaypointPath>,
    layout: Layout,
    layout_subscribers: LayoutSubscribers,
    wave_schedule: WaveSchedule,
    lives: u32,
    score: ScoreView,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create an engine on the built-in route.
    pub fn new(config: SimConfig) -> Self {
        Self::with_path(config, WaypointPath::default_route())
    }

    /// Create an engine whose zombies follow `path`.
    pub fn with_path(config: SimConfig, path: WaypointPath) -> Self {
        let matrix = EffectivenessMatrix::from_config(&config.game);
        info!(
            seed = config.seed,
            matrix_entries = matrix.len(),
            waypoints = path.len(),
            "simulation created"
        );
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            resume_phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            matrix,
            particles: ParticleSystem::new(config.game.burst),
            path: Arc::new(path),
            layout: Layout::compute(config.viewport),
            layout_subscribers: LayoutSubscribers::new(),
            wave_schedule: WaveSchedule::default_schedule(),
            lives: config.game.starting_lives.max(1),
            score: ScoreView::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Replace the wave schedule. Only meaningful before waves start.
    pub fn set_wave_schedule(&mut self, schedule: WaveSchedule) {
        self.wave_schedule = schedule;
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one nominal frame.
    pub fn tick(&mut self, scene: &mut dyn SceneGraph) -> GameStateSnapshot {
        self.tick_with_delta(FRAME_DT, scene)
    }

    /// Advance the simulation by `dt` frames and return the resulting snapshot.
    ///
    /// A non-finite or negative `dt` advances nothing but still processes
    /// commands and produces a snapshot.
    pub fn tick_with_delta(&mut self, dt: f32, scene: &mut dyn SceneGraph) -> GameStateSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.process_commands();

        match self.phase {
            GamePhase::Setup | GamePhase::Active => {
                self.run_systems(dt, scene);
                self.time.advance(dt);
            }
            GamePhase::GameOver => {
                // Let in-flight effects finish.
                systems::effects::run(&mut self.world, dt, scene);
                self.particles.tick(dt, scene);
                self.time.advance(dt);
            }
            GamePhase::Paused => {}
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotMeta {
                time: self.time,
                phase: self.phase,
                lives: self.lives,
                particles: self.particles.len(),
                score: &self.score,
            },
            events,
        )
    }

    /// Recompute the layout for a new viewport and notify subscribers.
    pub fn resize(&mut self, viewport: Viewport) -> Layout {
        self.layout = Layout::compute(viewport);
        debug!(scale = self.layout.scale, "layout recomputed");
        self.layout_subscribers.notify(&self.layout);
        self.layout
    }

    pub fn subscribe_layout(
        &mut self,
        callback: impl FnMut(&Layout) + Send + 'static,
    ) -> SubscriptionId {
        self.layout_subscribers.subscribe(callback)
    }

    pub fn unsubscribe_layout(&mut self, id: SubscriptionId) -> bool {
        self.layout_subscribers.unsubscribe(id)
    }

    /// Release every visual and entity and drop layout subscribers.
    ///
    /// Safe to call repeatedly; later calls release nothing.
    pub fn teardown(&mut self, scene: &mut dyn SceneGraph) -> TeardownReport {
        let report = TeardownReport {
            particles: self.particles.clear(scene),
            entities: systems::cleanup::despawn_all(&mut self.world, scene),
        };
        self.layout_subscribers.clear();
        self.command_queue.clear();
        info!(
            particles = report.particles,
            entities = report.entities,
            "simulation torn down"
        );
        report
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> &ScoreView {
        &self.score
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn matrix(&self) -> &EffectivenessMatrix {
        &self.matrix
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn path(&self) -> &Arc<WaypointPath> {
        &self.path
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn wave_schedule(&self) -> &WaveSchedule {
        &self.wave_schedule
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(&command) {
                warn!(?command, %err, "command rejected");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: &PlayerCommand) -> Result<(), CommandError> {
        match *command {
            PlayerCommand::PlaceTower { kind, x, y } => {
                if self.phase == GamePhase::GameOver {
                    return Err(CommandError::WrongPhase(self.phase));
                }
                let at = Vec2::new(x, y);
                if !placeable(at) {
                    return Err(CommandError::OutOfBounds { x, y });
                }
                world_setup::spawn_tower(&mut self.world, kind, at);
                debug!(tower = kind.as_str(), x, y, "tower placed");
            }
            PlayerCommand::SpawnZombie { kind } => {
                if !matches!(self.phase, GamePhase::Setup | GamePhase::Active) {
                    return Err(CommandError::WrongPhase(self.phase));
                }
                world_setup::spawn_zombie(&mut self.world, kind, &self.path);
            }
            PlayerCommand::StartWaves => {
                if self.phase != GamePhase::Setup {
                    return Err(CommandError::WrongPhase(self.phase));
                }
                self.wave_schedule.start(self.time.elapsed_frames);
                self.set_phase(GamePhase::Active);
            }
            PlayerCommand::Pause => {
                if !matches!(self.phase, GamePhase::Setup | GamePhase::Active) {
                    return Err(CommandError::WrongPhase(self.phase));
                }
                self.resume_phase = self.phase;
                self.set_phase(GamePhase::Paused);
            }
            PlayerCommand::Resume => {
                if self.phase != GamePhase::Paused {
                    return Err(CommandError::WrongPhase(self.phase));
                }
                self.set_phase(self.resume_phase);
            }
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, tick = self.time.tick, "phase change");
            self.phase = phase;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, scene: &mut dyn SceneGraph) {
        // 1. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.wave_schedule,
            &self.path,
            self.time.elapsed_frames,
            &mut self.events,
        );
        // 2. Movement along the path
        systems::movement::run(&mut self.world, dt);
        // 3. Targeting, targeting lines and fire
        let mut fire = FireContext {
            matrix: &self.matrix,
            particles: &mut self.particles,
            rng: &mut self.rng,
            events: &mut self.events,
            score: &mut self.score,
            scene: &mut *scene,
        };
        systems::tower_fire::run(&mut self.world, dt, &mut fire);
        // 4. Filter fades and line pulses
        systems::effects::run(&mut self.world, dt, scene);
        // 5. Particle integration and pruning
        self.particles.tick(dt, scene);
        // 6. Cleanup (killed, escaped)
        let escaped = systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, scene);
        for kind in escaped {
            self.lives = self.lives.saturating_sub(1);
            self.score.escaped += 1;
            info!(zombie = kind.as_str(), lives = self.lives, "zombie escaped");
            self.events.push(CombatEvent::Escaped {
                zombie: kind,
                lives_remaining: self.lives,
            });
        }
        if self.lives == 0 && self.phase != GamePhase::GameOver {
            self.set_phase(GamePhase::GameOver);
            self.events.push(CombatEvent::GameOver);
        }
    }
}

/// Towers must sit inside the world, clear of the edges.
fn placeable(at: Vec2) -> bool {
    at.is_finite()
        && (TOWER_PLACEMENT_MARGIN..=WORLD_WIDTH - TOWER_PLACEMENT_MARGIN).contains(&at.x)
        && (TOWER_PLACEMENT_MARGIN..=WORLD_HEIGHT - TOWER_PLACEMENT_MARGIN).contains(&at.y)
}
