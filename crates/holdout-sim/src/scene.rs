//! Rendering collaborator interface.
//!
//! The simulation never draws. It describes each visual it owns (position,
//! color, radius, opacity) and hands that description to a [`SceneGraph`].
//! Every visual is attached exactly once and detached exactly once.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use holdout_core::types::Color;

/// Opaque identity of a visual node, issued by the scene on attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// A filled circle: particles and sparks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotVisual {
    pub position: Vec2,
    pub color: Color,
    pub radius: f32,
    /// Opacity (0.0 - 1.0).
    pub alpha: f32,
}

/// A laser-sight line with marker dots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineVisual {
    /// Core segment endpoints.
    pub start: Vec2,
    pub end: Vec2,
    pub markers: Vec<Vec2>,
    pub marker_radius: f32,
    /// Highlighted marker at the target, absent for a zero-length line.
    pub terminal: Option<Vec2>,
    pub terminal_radius: f32,
    pub color: Color,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Dot(DotVisual),
    Line(LineVisual),
}

/// Scene graph owned by the rendering backend.
pub trait SceneGraph {
    /// Add a node and return its handle.
    fn attach(&mut self, visual: Visual) -> VisualHandle;
    /// Replace the parameters of an attached node.
    fn update(&mut self, handle: VisualHandle, visual: Visual);
    /// Remove a node. The handle is never used again.
    fn detach(&mut self, handle: VisualHandle);
}

/// Headless retained scene: keeps the latest description of every node.
///
/// Used by the harness and tests; also a reference for real backends.
#[derive(Debug, Default)]
pub struct RetainedScene {
    next_handle: u64,
    nodes: BTreeMap<VisualHandle, Visual>,
    attached: u64,
    detached: u64,
}

impl RetainedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.nodes.get(&handle)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&VisualHandle, &Visual)> {
        self.nodes.iter()
    }

    /// Nodes currently in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total attach calls received.
    pub fn attached(&self) -> u64 {
        self.attached
    }

    /// Total detach calls received.
    pub fn detached(&self) -> u64 {
        self.detached
    }

    pub fn dot_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|v| matches!(v, Visual::Dot(_)))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|v| matches!(v, Visual::Line(_)))
            .count()
    }
}

impl SceneGraph for RetainedScene {
    fn attach(&mut self, visual: Visual) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.attached += 1;
        self.nodes.insert(handle, visual);
        handle
    }

    fn update(&mut self, handle: VisualHandle, visual: Visual) {
        match self.nodes.get_mut(&handle) {
            Some(node) => *node = visual,
            None => warn!(?handle, "update for a visual that is not attached"),
        }
    }

    fn detach(&mut self, handle: VisualHandle) {
        self.detached += 1;
        if self.nodes.remove(&handle).is_none() {
            warn!(?handle, "detach for a visual that is not attached");
        }
    }
}
