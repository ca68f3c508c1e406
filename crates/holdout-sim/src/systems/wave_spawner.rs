//! Wave spawning system: releases scheduled zombie groups along the path.
//!
//! Timing is measured in elapsed nominal frames, so a schedule keeps pace
//! with movement and cooldowns under any tick delta.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::World;
use tracing::info;

use holdout_core::constants::{TICK_RATE, WAVE_SPAWN_SPACING_FRAMES};
use holdout_core::enums::ZombieKind;
use holdout_core::events::CombatEvent;

use crate::navigation::WaypointPath;

/// A single wave definition.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    /// Frames after the schedule starts at which this wave begins.
    pub start_after: u64,
    /// Zombies to release: (kind, count), in order.
    pub groups: Vec<(ZombieKind, u32)>,
    pub spawned: bool,
}

/// The wave schedule for one game.
#[derive(Debug, Clone, Default)]
pub struct WaveSchedule {
    pub waves: Vec<WaveEntry>,
    started_at: Option<f64>,
    /// Pending spawns: (due frame, kind).
    pending: VecDeque<(f64, ZombieKind)>,
}

impl WaveSchedule {
    pub fn new(waves: Vec<WaveEntry>) -> Self {
        Self {
            waves,
            ..Self::default()
        }
    }

    /// Three waves of escalating difficulty, 15 seconds apart.
    pub fn default_schedule() -> Self {
        let gap = 15 * u64::from(TICK_RATE);
        let wave = |n: u64, groups: Vec<(ZombieKind, u32)>| WaveEntry {
            start_after: n * gap,
            groups,
            spawned: false,
        };
        Self::new(vec![
            wave(0, vec![(ZombieKind::Walker, 5)]),
            wave(1, vec![(ZombieKind::Walker, 4), (ZombieKind::Runner, 3)]),
            wave(
                2,
                vec![
                    (ZombieKind::Brute, 2),
                    (ZombieKind::Armored, 3),
                    (ZombieKind::Spitter, 2),
                ],
            ),
        ])
    }

    /// Start the schedule at `now` elapsed frames. Later calls are ignored.
    pub fn start(&mut self, now: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Every wave released and every zombie spawned.
    pub fn is_finished(&self) -> bool {
        self.is_started() && self.pending.is_empty() && self.waves.iter().all(|w| w.spawned)
    }

    pub fn total_zombies(&self) -> u32 {
        self.waves
            .iter()
            .flat_map(|w| w.groups.iter())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Start due waves and spawn any zombies whose slot has come up.
pub fn run(
    world: &mut World,
    schedule: &mut WaveSchedule,
    path: &Arc<WaypointPath>,
    now: f64,
    events: &mut Vec<CombatEvent>,
) -> usize {
    let Some(started_at) = schedule.started_at else {
        return 0;
    };
    let elapsed = (now - started_at).max(0.0);

    for (index, wave) in schedule.waves.iter_mut().enumerate() {
        if wave.spawned || elapsed < wave.start_after as f64 {
            continue;
        }
        wave.spawned = true;
        // Slots are laid out from the wave's nominal start, not from `now`.
        let mut due = started_at + wave.start_after as f64;
        for &(kind, count) in &wave.groups {
            for _ in 0..count {
                schedule.pending.push_back((due, kind));
                due += WAVE_SPAWN_SPACING_FRAMES as f64;
            }
        }
        let number = index as u32 + 1;
        info!(wave = number, zombies = schedule.pending.len(), "wave started");
        events.push(CombatEvent::WaveStarted { wave: number });
    }

    // Overlapping waves interleave, so the queue is not sorted by due frame.
    let mut spawned = 0;
    schedule.pending.retain(|&(due, kind)| {
        if due > now {
            return true;
        }
        crate::world_setup::spawn_zombie(world, kind, path);
        spawned += 1;
        false
    });
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::components::Zombie;

    fn zombie_count(world: &World) -> usize {
        world.query::<&Zombie>().iter().count()
    }

    #[test]
    fn nothing_spawns_before_start() {
        let mut world = World::new();
        let mut schedule = WaveSchedule::default_schedule();
        let path = Arc::new(WaypointPath::default_route());
        let mut events = Vec::new();
        for tick in 0..100 {
            run(&mut world, &mut schedule, &path, tick as f64, &mut events);
        }
        assert_eq!(zombie_count(&world), 0);
        assert!(events.is_empty());
        assert!(!schedule.is_finished());
    }

    #[test]
    fn group_members_are_spaced_out() {
        let mut world = World::new();
        let mut schedule = WaveSchedule::new(vec![WaveEntry {
            start_after: 0,
            groups: vec![(ZombieKind::Walker, 3)],
            spawned: false,
        }]);
        let path = Arc::new(WaypointPath::default_route());
        let mut events = Vec::new();
        let spacing = WAVE_SPAWN_SPACING_FRAMES as f64;
        schedule.start(10.0);

        assert_eq!(run(&mut world, &mut schedule, &path, 10.0, &mut events), 1);
        assert_eq!(events, vec![CombatEvent::WaveStarted { wave: 1 }]);
        for tick in 11..10 + WAVE_SPAWN_SPACING_FRAMES {
            assert_eq!(run(&mut world, &mut schedule, &path, tick as f64, &mut events), 0);
        }
        assert_eq!(
            run(&mut world, &mut schedule, &path, spacing + 10.0, &mut events),
            1
        );
        run(&mut world, &mut schedule, &path, 2.0 * spacing + 10.0, &mut events);
        assert_eq!(zombie_count(&world), 3);
        assert!(schedule.is_finished());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn large_steps_release_every_slot_that_came_due() {
        let mut world = World::new();
        let mut schedule = WaveSchedule::new(vec![WaveEntry {
            start_after: 0,
            groups: vec![(ZombieKind::Walker, 3)],
            spawned: false,
        }]);
        let path = Arc::new(WaypointPath::default_route());
        let mut events = Vec::new();
        schedule.start(0.0);

        let spacing = WAVE_SPAWN_SPACING_FRAMES as f64;
        assert_eq!(run(&mut world, &mut schedule, &path, 0.0, &mut events), 1);
        assert_eq!(
            run(&mut world, &mut schedule, &path, 2.0 * spacing + 0.5, &mut events),
            2
        );
        assert!(schedule.is_finished());
    }

    #[test]
    fn overlapping_waves_do_not_block_each_other() {
        let mut world = World::new();
        let mut schedule = WaveSchedule::new(vec![
            WaveEntry {
                start_after: 0,
                groups: vec![(ZombieKind::Walker, 4)],
                spawned: false,
            },
            WaveEntry {
                start_after: 50,
                groups: vec![(ZombieKind::Runner, 1)],
                spawned: false,
            },
        ]);
        let path = Arc::new(WaypointPath::default_route());
        let mut events = Vec::new();
        schedule.start(0.0);

        // Walkers are due at 0, 45, 90 and 135. The runner is due at 50.
        run(&mut world, &mut schedule, &path, 0.0, &mut events);
        run(&mut world, &mut schedule, &path, 45.0, &mut events);
        assert_eq!(run(&mut world, &mut schedule, &path, 50.0, &mut events), 1);
        assert_eq!(zombie_count(&world), 3);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn default_schedule_spawns_everything() {
        let mut world = World::new();
        let mut schedule = WaveSchedule::default_schedule();
        let path = Arc::new(WaypointPath::default_route());
        let mut events = Vec::new();
        schedule.start(0.0);

        let mut tick = 0;
        while !schedule.is_finished() {
            run(&mut world, &mut schedule, &path, tick as f64, &mut events);
            tick += 1;
            assert!(tick < 10_000, "schedule never finished");
        }
        assert_eq!(zombie_count(&world), schedule.total_zombies() as usize);
        let waves: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::WaveStarted { wave } => Some(*wave),
                _ => None,
            })
            .collect();
        assert_eq!(waves, vec![1, 2, 3]);
    }
}
