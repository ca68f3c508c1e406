//! Screen layout derived from the viewport size.
//!
//! The layout is an explicit value owned by the composition root. Whoever
//! owns the viewport size calls [`Layout::compute`] when it changes and then
//! [`LayoutSubscribers::notify`] so registered consumers can react.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};

/// Physical viewport size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Letterboxed mapping from the logical world onto a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Viewport,
    /// Uniform world-to-screen scale.
    pub scale: f32,
    /// Screen-space offset of the world origin.
    pub offset: Vec2,
}

impl Default for Layout {
    fn default() -> Self {
        Self::compute(Viewport::default())
    }
}

impl Layout {
    /// Fit the world into `viewport` preserving aspect ratio, centered.
    ///
    /// A zero, negative or non-finite viewport falls back to the world size.
    pub fn compute(viewport: Viewport) -> Self {
        let usable = viewport.width.is_finite()
            && viewport.height.is_finite()
            && viewport.width > 0.0
            && viewport.height > 0.0;
        let viewport = if usable { viewport } else { Viewport::default() };

        let scale = (viewport.width / WORLD_WIDTH).min(viewport.height / WORLD_HEIGHT);
        let offset = Vec2::new(
            (viewport.width - WORLD_WIDTH * scale) * 0.5,
            (viewport.height - WORLD_HEIGHT * scale) * 0.5,
        );
        Self {
            viewport,
            scale,
            offset,
        }
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    /// Whether a world-space point lies inside the logical world.
    pub fn contains(&self, world: Vec2) -> bool {
        (0.0..=WORLD_WIDTH).contains(&world.x) && (0.0..=WORLD_HEIGHT).contains(&world.y)
    }
}

/// Handle returned by [`LayoutSubscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type LayoutCallback = Box<dyn FnMut(&Layout) + Send>;

/// Explicit list of layout-change callbacks.
#[derive(Default)]
pub struct LayoutSubscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, LayoutCallback)>,
}

impl LayoutSubscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, invoked in registration order on every notify.
    pub fn subscribe(&mut self, callback: impl FnMut(&Layout) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, layout: &Layout) {
        for (_, callback) in &mut self.callbacks {
            callback(layout);
        }
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for LayoutSubscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutSubscribers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
