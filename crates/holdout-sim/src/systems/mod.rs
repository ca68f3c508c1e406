//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whatever engine state
//! they need passed in explicitly. They own no state themselves.

pub mod cleanup;
pub mod effects;
pub mod movement;
pub mod snapshot;
pub mod tower_fire;
pub mod wave_spawner;
