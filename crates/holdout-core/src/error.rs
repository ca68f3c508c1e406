//! Error types shared across the workspace.

use thiserror::Error;

/// Rejected particle spawn. Raised before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpawnError {
    #[error("particle life must be finite and positive, got {0}")]
    InvalidLife(f32),
    #[error("particle decay must be finite and positive, got {0}")]
    InvalidDecay(f32),
    #[error("particle velocity must be finite, got ({0}, {1})")]
    InvalidVelocity(f32, f32),
    #[error("particle position must be finite, got ({0}, {1})")]
    InvalidPosition(f32, f32),
}

/// Rejected waypoint path construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PathError {
    #[error("waypoint {index} is not finite: ({x}, {y})")]
    NonFiniteWaypoint { index: usize, x: f32, y: f32 },
}

/// Configuration document could not be used at all.
///
/// Individual bad entries never produce this; they fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player command that could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CommandError {
    #[error("position ({x}, {y}) is outside the placeable area")]
    OutOfBounds { x: f32, y: f32 },
    #[error("command not allowed during {0:?}")]
    WrongPhase(crate::enums::GamePhase),
}
