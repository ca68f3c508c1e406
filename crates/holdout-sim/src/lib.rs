//! Combat simulation for HOLDOUT.
//!
//! Owns the hecs ECS world, the particle system and the navigation and
//! targeting effects. Runs systems once per frame and produces
//! `GameStateSnapshot`s for the host. Rendering is delegated to a
//! [`scene::SceneGraph`] implementation.

pub mod combat;
pub mod effectiveness;
pub mod effects;
pub mod engine;
pub mod navigation;
pub mod particles;
pub mod scene;
pub mod systems;
pub mod targeting_line;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use holdout_core as core;

#[cfg(test)]
mod tests;
