//! Core types and definitions for the HOLDOUT combat simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometry and color types, unit kinds, tuning constants, per-kind
//! profiles, configuration, errors, commands, events and snapshots.
//! It has no dependency on any rendering or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod layout;
pub mod profiles;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
