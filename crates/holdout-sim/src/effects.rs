//! Per-entity sub-effects: cosmetic filters and owned targeting lines.
//!
//! Every effect an entity carries lives in its [`ActiveEffects`] component,
//! so teardown can find and release them without probing for ad hoc
//! fields.

use std::mem::discriminant;

use holdout_core::constants::HIT_FLASH_FRAMES;
use holdout_core::enums::FilterKind;
use holdout_core::state::FilterView;

use crate::scene::SceneGraph;
use crate::targeting_line::TargetingLine;

const MAX_SHAKE_MAGNITUDE: f32 = 32.0;

/// A cosmetic filter with an optional lifetime in frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterEffect {
    kind: FilterKind,
    intensity: f32,
    remaining: Option<f32>,
    duration: Option<f32>,
}

impl FilterEffect {
    /// Timed filter that fades linearly to nothing over `frames`.
    pub fn timed(kind: FilterKind, intensity: f32, frames: f32) -> Self {
        let frames = if frames.is_finite() { frames.max(0.0) } else { 0.0 };
        Self {
            kind: sanitize_kind(kind),
            intensity: clamp_unit(intensity),
            remaining: Some(frames),
            duration: Some(frames),
        }
    }

    /// Filter that stays until removed.
    pub fn persistent(kind: FilterKind, intensity: f32) -> Self {
        Self {
            kind: sanitize_kind(kind),
            intensity: clamp_unit(intensity),
            remaining: None,
            duration: None,
        }
    }

    pub fn hit_flash() -> Self {
        Self::timed(FilterKind::HitFlash, 1.0, HIT_FLASH_FRAMES)
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Count down; returns false once expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.remaining.as_mut() {
            Some(remaining) => {
                *remaining = (*remaining - dt).max(0.0);
                *remaining > 0.0
            }
            None => true,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.remaining, Some(r) if r <= 0.0)
    }

    pub fn current_intensity(&self) -> f32 {
        match (self.remaining, self.duration) {
            (Some(remaining), Some(duration)) if duration > 0.0 => {
                clamp_unit(self.intensity * remaining / duration)
            }
            (Some(_), Some(_)) => 0.0,
            _ => self.intensity,
        }
    }

    pub fn view(&self) -> FilterView {
        FilterView {
            kind: self.kind,
            intensity: self.current_intensity(),
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn sanitize_kind(kind: FilterKind) -> FilterKind {
    match kind {
        FilterKind::Shake { magnitude } => FilterKind::Shake {
            magnitude: if magnitude.is_finite() {
                magnitude.abs().min(MAX_SHAKE_MAGNITUDE)
            } else {
                0.0
            },
        },
        other => other,
    }
}

/// One owned sub-effect.
#[derive(Debug, Clone, PartialEq)]
pub enum SubEffect {
    TargetingLine(TargetingLine),
    Filter(FilterEffect),
}

/// Ordered collection of sub-effects attached to one entity.
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    effects: Vec<SubEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. A filter of the same kind is replaced, so repeated hits
    /// restart the flash instead of stacking.
    pub fn push_filter(&mut self, filter: FilterEffect) {
        let tag = discriminant(&filter.kind);
        self.effects
            .retain(|e| !matches!(e, SubEffect::Filter(f) if discriminant(&f.kind) == tag));
        self.effects.push(SubEffect::Filter(filter));
    }

    /// Install a targeting line, removing any previous one from the scene.
    pub fn set_targeting_line(&mut self, line: TargetingLine, scene: &mut dyn SceneGraph) {
        if let Some(old) = self.take_targeting_line() {
            old.remove(scene);
        }
        self.effects.push(SubEffect::TargetingLine(line));
    }

    pub fn targeting_line(&self) -> Option<&TargetingLine> {
        self.effects.iter().find_map(|e| match e {
            SubEffect::TargetingLine(line) => Some(line),
            SubEffect::Filter(_) => None,
        })
    }

    pub fn targeting_line_mut(&mut self) -> Option<&mut TargetingLine> {
        self.effects.iter_mut().find_map(|e| match e {
            SubEffect::TargetingLine(line) => Some(line),
            SubEffect::Filter(_) => None,
        })
    }

    /// Detach ownership of the targeting line. The caller must remove it.
    pub fn take_targeting_line(&mut self) -> Option<TargetingLine> {
        let index = self
            .effects
            .iter()
            .position(|e| matches!(e, SubEffect::TargetingLine(_)))?;
        match self.effects.remove(index) {
            SubEffect::TargetingLine(line) => Some(line),
            SubEffect::Filter(_) => None,
        }
    }

    pub fn has_targeting_line(&self) -> bool {
        self.targeting_line().is_some()
    }

    pub fn filters(&self) -> impl Iterator<Item = &FilterEffect> {
        self.effects.iter().filter_map(|e| match e {
            SubEffect::Filter(f) => Some(f),
            SubEffect::TargetingLine(_) => None,
        })
    }

    pub fn filter_views(&self) -> Vec<FilterView> {
        self.filters().map(FilterEffect::view).collect()
    }

    /// Pulse lines and age filters, dropping expired filters.
    pub fn tick(&mut self, dt: f32, scene: &mut dyn SceneGraph) {
        self.effects.retain_mut(|effect| match effect {
            SubEffect::TargetingLine(line) => {
                line.tick(dt, scene);
                true
            }
            SubEffect::Filter(filter) => filter.tick(dt),
        });
    }

    /// Release everything. Returns the number of sub-effects dropped.
    pub fn clear(&mut self, scene: &mut dyn SceneGraph) -> usize {
        let count = self.effects.len();
        for effect in self.effects.drain(..) {
            if let SubEffect::TargetingLine(line) = effect {
                line.remove(scene);
            }
        }
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RetainedScene;
    use glam::Vec2;
    use holdout_core::types::Color;

    #[test]
    fn hit_flash_fades_and_expires() {
        let mut flash = FilterEffect::hit_flash();
        assert_eq!(flash.current_intensity(), 1.0);
        assert!(flash.tick(4.0));
        assert!((flash.current_intensity() - 0.5).abs() < 1e-6);
        assert!(!flash.tick(4.0));
        assert!(flash.is_expired());
        assert_eq!(flash.current_intensity(), 0.0);
    }

    #[test]
    fn parameters_are_clamped() {
        let glow = FilterEffect::persistent(FilterKind::Glow, 7.0);
        assert_eq!(glow.current_intensity(), 1.0);

        let tint = FilterEffect::persistent(FilterKind::Tint { color: Color::WHITE }, f32::NAN);
        assert_eq!(tint.current_intensity(), 0.0);

        let shake = FilterEffect::timed(FilterKind::Shake { magnitude: -500.0 }, 0.5, 10.0);
        assert_eq!(shake.kind(), FilterKind::Shake { magnitude: MAX_SHAKE_MAGNITUDE });
    }

    #[test]
    fn persistent_filter_never_expires() {
        let mut glow = FilterEffect::persistent(FilterKind::Glow, 0.4);
        for _ in 0..1000 {
            assert!(glow.tick(1.0));
        }
        assert_eq!(glow.current_intensity(), 0.4);
    }

    #[test]
    fn same_kind_filter_is_replaced() {
        let mut effects = ActiveEffects::new();
        let mut flash = FilterEffect::hit_flash();
        flash.tick(6.0);
        effects.push_filter(flash);
        effects.push_filter(FilterEffect::hit_flash());
        effects.push_filter(FilterEffect::persistent(FilterKind::Glow, 0.3));

        assert_eq!(effects.len(), 2);
        let flash = effects.filters().find(|f| f.kind() == FilterKind::HitFlash).unwrap();
        assert_eq!(flash.current_intensity(), 1.0);
    }

    #[test]
    fn tick_drops_expired_filters_only() {
        let mut scene = RetainedScene::new();
        let mut effects = ActiveEffects::new();
        effects.push_filter(FilterEffect::hit_flash());
        effects.set_targeting_line(
            TargetingLine::new(Vec2::ZERO, Vec2::new(50.0, 0.0), &mut scene),
            &mut scene,
        );

        effects.tick(HIT_FLASH_FRAMES, &mut scene);
        assert_eq!(effects.len(), 1);
        assert!(effects.has_targeting_line());
        assert_eq!(effects.filters().count(), 0);
    }

    #[test]
    fn replacing_a_line_removes_the_old_one() {
        let mut scene = RetainedScene::new();
        let mut effects = ActiveEffects::new();
        let first = TargetingLine::new(Vec2::ZERO, Vec2::X, &mut scene);
        let first_handle = first.handle();
        effects.set_targeting_line(first, &mut scene);
        effects.set_targeting_line(TargetingLine::new(Vec2::ZERO, Vec2::Y, &mut scene), &mut scene);

        assert!(scene.get(first_handle).is_none());
        assert_eq!(scene.line_count(), 1);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn clear_releases_lines() {
        let mut scene = RetainedScene::new();
        let mut effects = ActiveEffects::new();
        effects.push_filter(FilterEffect::hit_flash());
        effects.set_targeting_line(TargetingLine::new(Vec2::ZERO, Vec2::ONE, &mut scene), &mut scene);

        assert_eq!(effects.clear(&mut scene), 2);
        assert!(effects.is_empty());
        assert!(scene.is_empty());
        assert_eq!(effects.clear(&mut scene), 0);
        assert_eq!(scene.detached(), 1);
    }

    #[test]
    fn take_transfers_ownership() {
        let mut scene = RetainedScene::new();
        let mut effects = ActiveEffects::new();
        effects.set_targeting_line(TargetingLine::new(Vec2::ZERO, Vec2::ONE, &mut scene), &mut scene);
        let line = effects.take_targeting_line().unwrap();
        assert!(!effects.has_targeting_line());
        assert!(effects.take_targeting_line().is_none());
        line.remove(&mut scene);
        assert!(scene.is_empty());
    }
}
