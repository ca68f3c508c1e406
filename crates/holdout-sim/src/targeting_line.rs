//! Laser-sight line from a tower to its current target.

use glam::Vec2;

use holdout_core::constants::*;
use holdout_core::types::Color;

use crate::scene::{LineVisual, SceneGraph, Visual, VisualHandle};

/// Marker layout derived from two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub markers: Vec<Vec2>,
    pub terminal: Option<Vec2>,
}

/// Evenly spaced markers along `start -> end` plus a terminal marker at `end`.
///
/// A zero-length line yields a single marker at `start` and no terminal.
/// At most [`TARGETING_MAX_MARKERS`] markers are laid out; a length that
/// overflows `f32` collapses to the start marker plus the terminal.
pub fn compute_geometry(start: Vec2, end: Vec2) -> LineGeometry {
    if start == end {
        return LineGeometry {
            markers: vec![start],
            terminal: None,
        };
    }
    let delta = end - start;
    let length = delta.length();
    if !length.is_finite() || !delta.is_finite() {
        return LineGeometry {
            markers: vec![start],
            terminal: Some(end),
        };
    }

    let count =
        ((length / TARGETING_MARKER_SPACING).floor() as usize).clamp(1, TARGETING_MAX_MARKERS);
    let step = delta / count as f32;
    LineGeometry {
        markers: (0..count).map(|i| start + step * i as f32).collect(),
        terminal: Some(end),
    }
}

/// Pulsing targeting line owned by one tower.
///
/// Holds exactly one scene node from [`TargetingLine::new`] until
/// [`TargetingLine::remove`]. Geometry is rebuilt from scratch on every
/// reposition.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetingLine {
    handle: VisualHandle,
    start: Vec2,
    end: Vec2,
    phase: f32,
    alpha: f32,
    geometry: LineGeometry,
}

impl TargetingLine {
    pub fn new(start: Vec2, end: Vec2, scene: &mut dyn SceneGraph) -> Self {
        let start = finite_or(start, Vec2::ZERO);
        let end = finite_or(end, start);
        let mut line = Self {
            handle: VisualHandle(0),
            start,
            end,
            phase: 0.0,
            alpha: TARGETING_PULSE_CENTER,
            geometry: compute_geometry(start, end),
        };
        line.handle = scene.attach(line.visual());
        line
    }

    /// Move both endpoints and rebuild the marker layout.
    ///
    /// Non-finite coordinates keep the previous endpoint.
    pub fn reposition(&mut self, start: Vec2, end: Vec2, scene: &mut dyn SceneGraph) {
        self.start = finite_or(start, self.start);
        self.end = finite_or(end, self.end);
        self.geometry = compute_geometry(self.start, self.end);
        scene.update(self.handle, self.visual());
    }

    /// Advance the pulse. Opacity stays within center ± amplitude.
    pub fn tick(&mut self, dt: f32, scene: &mut dyn SceneGraph) {
        if dt.is_finite() && dt > 0.0 {
            self.phase += TARGETING_PULSE_RATE * dt;
        }
        self.alpha = TARGETING_PULSE_CENTER + TARGETING_PULSE_AMPLITUDE * self.phase.sin();
        scene.update(self.handle, self.visual());
    }

    pub fn remove(self, scene: &mut dyn SceneGraph) {
        scene.detach(self.handle);
    }

    pub fn handle(&self) -> VisualHandle {
        self.handle
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn geometry(&self) -> &LineGeometry {
        &self.geometry
    }

    fn visual(&self) -> Visual {
        Visual::Line(LineVisual {
            start: self.start,
            end: self.end,
            markers: self.geometry.markers.clone(),
            marker_radius: TARGETING_MARKER_RADIUS,
            terminal: self.geometry.terminal,
            terminal_radius: TARGETING_TERMINAL_RADIUS,
            color: Color::LASER_RED,
            alpha: self.alpha,
        })
    }
}

fn finite_or(v: Vec2, fallback: Vec2) -> Vec2 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}
