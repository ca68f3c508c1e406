//! Fundamental geometric and simulation types.
//!
//! Coordinates are logical world pixels with the origin at the top-left
//! corner and y growing downward (screen space). Time is measured in
//! nominal frames: a delta of 1.0 is one frame at [`TICK_RATE`].
//!
//! [`TICK_RATE`]: crate::constants::TICK_RATE

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World position component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

/// 24-bit RGB color handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const LASER_RED: Color = Color::rgb(0xff, 0x20, 0x20);
    pub const SPARK: Color = Color::rgb(0xff, 0xd8, 0x6b);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in nominal frames.
    pub elapsed_frames: f64,
}

impl SimTime {
    /// Advance by one tick covering `dt` frames.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_frames += f64::from(dt);
    }

    /// Elapsed simulation time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_frames / f64::from(crate::constants::TICK_RATE)
    }
}
