#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use glam::Vec2;

    use crate::config::{BurstConfig, GameConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::layout::{Layout, LayoutSubscribers, Viewport};
    use crate::profiles::{tower_profile, zombie_profile, DEFAULT_EFFECTIVENESS};
    use crate::types::{Color, SimTime};

    #[test]
    fn test_kind_names_parse_back() {
        for kind in TowerKind::ALL {
            assert_eq!(TowerKind::parse(kind.as_str()), Some(kind));
        }
        for kind in ZombieKind::ALL {
            assert_eq!(ZombieKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TowerKind::parse("Catapult"), None);
        assert_eq!(ZombieKind::parse("walker"), None);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(EffectivenessTier::VeryEffective.to_string(), "Very Effective");
        assert_eq!(EffectivenessTier::Normal.label(), "Normal");
        assert_eq!(EffectivenessTier::HighlyResisted.label(), "Highly Resisted");
        assert!(EffectivenessTier::Effective < EffectivenessTier::Resisted);
        assert!(!EffectivenessTier::Normal.is_favorable());
        assert!(!EffectivenessTier::Normal.is_unfavorable());
    }

    #[test]
    fn test_color_hex() {
        let c = Color::from_hex(0x12ab34);
        assert_eq!(c, Color::rgb(0x12, 0xab, 0x34));
        assert_eq!(c.to_hex(), 0x12ab34);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance(FRAME_DT);
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_table_is_positive_and_bounded() {
        for (_, _, m) in DEFAULT_EFFECTIVENESS {
            assert!(m.is_finite() && *m > 0.0);
            assert!((0.25..=2.0).contains(m));
        }
    }

    #[test]
    fn test_profiles_are_sane() {
        for kind in TowerKind::ALL {
            let p = tower_profile(kind);
            assert!(p.damage > 0.0 && p.range > 0.0 && p.fire_interval > 0.0);
        }
        assert!(tower_profile(TowerKind::Sniper).laser_sight);
        for kind in ZombieKind::ALL {
            let p = zombie_profile(kind);
            assert!(p.health > 0.0 && p.speed > 0.0);
        }
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "starting_lives": 3 }"#).unwrap();
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.burst, BurstConfig::default());
        assert_eq!(config.effectiveness.len(), DEFAULT_EFFECTIVENESS.len());
    }

    #[test]
    fn test_config_malformed_document_is_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_config_sanitizes_burst() {
        let json = r#"{ "burst": { "count_min": 19, "count_max": 10, "decay_min": 0.0 } }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.burst.count_min, 10);
        assert_eq!(config.burst.count_max, 19);
        assert!(config.burst.decay_min > 0.0);
        assert!(config.burst.decay_min <= config.burst.decay_max);
    }

    #[test]
    fn test_layout_letterboxes_wide_viewport() {
        let layout = Layout::compute(Viewport {
            width: WORLD_WIDTH * 3.0,
            height: WORLD_HEIGHT * 2.0,
        });
        assert_eq!(layout.scale, 2.0);
        assert_eq!(layout.offset, Vec2::new(WORLD_WIDTH * 0.5, 0.0));

        let p = Vec2::new(100.0, 50.0);
        let back = layout.to_world(layout.to_screen(p));
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn test_layout_degenerate_viewport_falls_back() {
        let layout = Layout::compute(Viewport {
            width: 0.0,
            height: f32::NAN,
        });
        assert_eq!(layout, Layout::default());
        assert_eq!(layout.scale, 1.0);
        assert!(layout.contains(Vec2::new(10.0, 10.0)));
        assert!(!layout.contains(Vec2::new(-1.0, 10.0)));
    }

    #[test]
    fn test_layout_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subs = LayoutSubscribers::new();

        let sink = Arc::clone(&seen);
        let id = subs.subscribe(move |layout| sink.lock().unwrap().push(layout.scale));
        assert_eq!(subs.len(), 1);

        subs.notify(&Layout::compute(Viewport {
            width: WORLD_WIDTH * 2.0,
            height: WORLD_HEIGHT * 2.0,
        }));
        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.notify(&Layout::default());

        assert_eq!(*seen.lock().unwrap(), vec![2.0]);
        assert!(subs.is_empty());
    }
}
