//! Waypoint paths and the movers that consume them.
//!
//! A [`WaypointPath`] is built once and shared through an `Arc`; movers
//! only read it. Each [`PathFollower`] owns its own progress (segment index
//! and distance along that segment), which only ever moves forward.

use std::sync::Arc;

use glam::Vec2;

use holdout_core::constants::DEFAULT_PATH;
use holdout_core::error::PathError;

/// Ordered, immutable route.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPath {
    points: Vec<Vec2>,
    /// Distance from the first point to each point.
    cumulative: Vec<f32>,
}

impl WaypointPath {
    pub fn new(points: Vec<Vec2>) -> Result<Self, PathError> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(PathError::NonFiniteWaypoint {
                index,
                x: p.x,
                y: p.y,
            });
        }

        let cumulative = cumulative_lengths(&points);
        Ok(Self { points, cumulative })
    }

    pub fn from_tuples(points: &[(f32, f32)]) -> Result<Self, PathError> {
        Self::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    /// The built-in map route.
    pub fn default_route() -> Self {
        let points: Vec<Vec2> = DEFAULT_PATH.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        let cumulative = cumulative_lengths(&points);
        Self { points, cumulative }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn segment_length(&self, segment: usize) -> f32 {
        self.cumulative[segment + 1] - self.cumulative[segment]
    }
}

fn cumulative_lengths(points: &[Vec2]) -> Vec<f32> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(points.len());
    out.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance(pair[1]);
        out.push(total);
    }
    out.truncate(points.len());
    out
}

/// Outcome of one [`Mover::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub position: Vec2,
    pub arrived: bool,
}

/// Something that moves along a route.
pub trait Mover {
    /// Move `speed * dt` along the route, carrying overshoot across waypoints.
    fn advance(&mut self, dt: f32, speed: f32) -> Advance;
    fn position(&self) -> Vec2;
    fn has_arrived(&self) -> bool;
}

/// Progress of one unit along a shared path.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Arc<WaypointPath>,
    segment: usize,
    offset: f32,
    position: Vec2,
    arrived: bool,
}

impl PathFollower {
    /// Start at the first waypoint. Paths with fewer than two points have
    /// nowhere to go, so the follower starts out arrived.
    pub fn new(path: Arc<WaypointPath>) -> Self {
        let position = path.points().first().copied().unwrap_or(Vec2::ZERO);
        let arrived = path.len() < 2;
        Self {
            path,
            segment: 0,
            offset: 0.0,
            position,
            arrived,
        }
    }

    pub fn path(&self) -> &Arc<WaypointPath> {
        &self.path
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    pub fn distance_travelled(&self) -> f32 {
        if self.arrived {
            return self.path.total_length();
        }
        self.path.cumulative[self.segment] + self.offset
    }

    /// Fraction of the route covered, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.arrived {
            return 1.0;
        }
        let total = self.path.total_length();
        if total <= 0.0 {
            return 0.0;
        }
        (self.distance_travelled() / total).clamp(0.0, 1.0)
    }

    fn state(&self) -> Advance {
        Advance {
            position: self.position,
            arrived: self.arrived,
        }
    }
}

impl Mover for PathFollower {
    fn advance(&mut self, dt: f32, speed: f32) -> Advance {
        if self.arrived {
            return self.state();
        }
        let step = dt * speed;
        let mut remaining = if step.is_finite() { step.max(0.0) } else { 0.0 };

        let last = self.path.len() - 1;
        loop {
            let from = self.path.points[self.segment];
            let to = self.path.points[self.segment + 1];
            let seg_len = self.path.segment_length(self.segment);
            let left = seg_len - self.offset;

            if remaining < left {
                self.offset += remaining;
                self.position = from + (to - from) * (self.offset / seg_len);
                break;
            }

            remaining -= left;
            self.segment += 1;
            self.offset = 0.0;
            self.position = to;
            if self.segment == last {
                self.arrived = true;
                break;
            }
        }
        self.state()
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn has_arrived(&self) -> bool {
        self.arrived
    }
}
