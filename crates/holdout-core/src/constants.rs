//! Simulation constants and tuning parameters.
//!
//! Distances are logical world pixels, time is nominal frames.

/// Nominal frame rate (Hz). A tick delta of 1.0 is one frame at this rate.
pub const TICK_RATE: u32 = 60;

/// Delta used by the fixed-step engine tick.
pub const FRAME_DT: f32 = 1.0;

// --- World ---

/// Logical world width.
pub const WORLD_WIDTH: f32 = 960.0;

/// Logical world height.
pub const WORLD_HEIGHT: f32 = 540.0;

/// Lives the defender starts with.
pub const STARTING_LIVES: u32 = 20;

/// Default route zombies follow from spawn to goal.
pub const DEFAULT_PATH: [(f32, f32); 6] = [
    (0.0, 90.0),
    (300.0, 90.0),
    (300.0, 300.0),
    (660.0, 300.0),
    (660.0, 450.0),
    (960.0, 450.0),
];

// --- Particles ---

/// Downward acceleration applied to particle vertical velocity (px/frame²).
pub const PARTICLE_GRAVITY: f32 = 0.1;

/// Smallest radius a particle may be spawned with.
pub const PARTICLE_MIN_RADIUS: f32 = 0.5;

/// Largest radius a particle may be spawned with.
pub const PARTICLE_MAX_RADIUS: f32 = 16.0;

/// Fastest a particle may be spawned (px/frame).
pub const PARTICLE_MAX_SPEED: f32 = 20.0;

/// Inclusive burst size range.
pub const BURST_COUNT_MIN: u32 = 10;
pub const BURST_COUNT_MAX: u32 = 19;

/// Burst particle initial speed band (px/frame).
pub const BURST_SPEED_MIN: f32 = 1.0;
pub const BURST_SPEED_MAX: f32 = 4.0;

/// Burst particle life lost per frame.
pub const BURST_DECAY_MIN: f32 = 0.02;
pub const BURST_DECAY_MAX: f32 = 0.04;

/// Burst particle radius band.
pub const BURST_RADIUS_MIN: f32 = 1.5;
pub const BURST_RADIUS_MAX: f32 = 4.0;

/// Hit spark: a single fast, short-lived particle.
pub const SPARK_SPEED: f32 = 2.5;
pub const SPARK_DECAY: f32 = 0.08;
pub const SPARK_RADIUS: f32 = 1.5;

// --- Targeting line ---

/// Distance between marker dots along a targeting line.
pub const TARGETING_MARKER_SPACING: f32 = 12.0;

/// Upper bound on markers along one line. Longer lines spread them out.
pub const TARGETING_MAX_MARKERS: usize = 128;

/// Marker dot radius.
pub const TARGETING_MARKER_RADIUS: f32 = 1.5;

/// Terminal marker radius at the target end.
pub const TARGETING_TERMINAL_RADIUS: f32 = 4.0;

/// Pulse phase advance per frame (radians).
pub const TARGETING_PULSE_RATE: f32 = 0.15;

/// Pulse opacity oscillates around this value.
pub const TARGETING_PULSE_CENTER: f32 = 0.85;

/// Pulse opacity amplitude.
pub const TARGETING_PULSE_AMPLITUDE: f32 = 0.15;

// --- Filters ---

/// Frames a hit flash stays visible.
pub const HIT_FLASH_FRAMES: f32 = 8.0;

// --- Waves ---

/// Frames between zombies of the same wave group.
pub const WAVE_SPAWN_SPACING_FRAMES: u64 = 45;

/// Margin around the world in which towers may not be placed.
pub const TOWER_PLACEMENT_MARGIN: f32 = 8.0;
