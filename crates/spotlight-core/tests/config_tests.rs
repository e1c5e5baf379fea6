use spotlight_core::config::{FieldConfig, RevealConfig, SpotlightConfig};
use spotlight_core::error::ConfigError;

#[test]
fn test_defaults_match_tuned_constants() {
    let config = SpotlightConfig::default();

    assert_eq!(config.field.particle_count, 40);
    assert_eq!(config.field.max_speed, 0.75);
    assert_eq!(config.field.radius_min, 1.0);
    assert_eq!(config.field.radius_max, 3.0);
    assert_eq!(config.field.link_distance, 150.0);
    assert_eq!(config.field.attraction, 0.02);
    assert_eq!(config.reveal.threshold, 0.15);
    assert_eq!(config.reveal.root_margin, "0px");
    assert_eq!(config.focus.page_class, "has-focus");
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_yields_defaults() {
    let config = SpotlightConfig::from_json("{}").unwrap();
    assert_eq!(config, SpotlightConfig::default());
}

#[test]
fn test_partial_json_overrides() {
    let json = r#"{
        "field": { "particle_count": 80, "link_distance": 120.0 },
        "focus": { "section_selector": ".panel" },
        "log_level": "debug"
    }"#;
    let config = SpotlightConfig::from_json(json).unwrap();

    assert_eq!(config.field.particle_count, 80);
    assert_eq!(config.field.link_distance, 120.0);
    assert_eq!(config.field.attraction, 0.02);
    assert_eq!(config.focus.section_selector, ".panel");
    assert_eq!(config.focus.focused_class, "focused");
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = SpotlightConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn test_threshold_out_of_range_rejected() {
    let config = RevealConfig {
        threshold: 1.5,
        ..RevealConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::OutOfRange {
            field: "reveal.threshold",
            min: 0.0,
            max: 1.0,
            value: 1.5,
        })
    );
}

#[test]
fn test_inverted_radius_rejected() {
    let config = FieldConfig {
        radius_min: 4.0,
        radius_max: 2.0,
        ..FieldConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::InvertedRadius { min: 4.0, max: 2.0 })
    );
}

#[test]
fn test_non_positive_link_distance_rejected() {
    let config = FieldConfig {
        link_distance: 0.0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPositive { field: "field.link_distance", .. })
    ));
}

#[test]
fn test_validation_runs_on_json() {
    let err = SpotlightConfig::from_json(r#"{ "field": { "attraction": 2.0 } }"#).unwrap_err();
    assert!(err.to_string().contains("field.attraction"), "got {err}");
}

#[test]
fn test_blank_class_name_rejected() {
    let err = SpotlightConfig::from_json(r#"{ "reveal": { "visible_class": "  " } }"#).unwrap_err();
    assert_eq!(err, ConfigError::Empty("reveal.visible_class"));
}

// ---------------------------------------------------------------------------
// Non-finite and oversized extents
// ---------------------------------------------------------------------------

fn assert_out_of_range(config: &FieldConfig, expected_field: &str) {
    match config.validate() {
        Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("{expected_field}: expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn test_huge_speed_rejected_before_sampling() {
    let err = SpotlightConfig::from_json(r#"{ "field": { "max_speed": 2e38 } }"#).unwrap_err();
    assert!(
        matches!(err, ConfigError::OutOfRange { field: "field.max_speed", .. }),
        "got {err:?}",
    );
}

#[test]
fn test_overflowing_radius_rejected() {
    // 1e39 does not fit in f32 and parses as infinity.
    let err = SpotlightConfig::from_json(r#"{ "field": { "radius_max": 1e39 } }"#).unwrap_err();
    assert!(
        matches!(err, ConfigError::OutOfRange { field: "field.radius_max", .. }),
        "got {err:?}",
    );
}

#[test]
fn test_non_finite_extents_rejected() {
    let cases: [(&str, fn(&mut FieldConfig, f32)); 4] = [
        ("field.max_speed", |c, v| c.max_speed = v),
        ("field.radius_min", |c, v| c.radius_min = v),
        ("field.radius_max", |c, v| c.radius_max = v),
        ("field.link_distance", |c, v| c.link_distance = v),
    ];
    for (name, set) in cases {
        for value in [f32::INFINITY, f32::NAN, 2e38] {
            let mut config = FieldConfig::default();
            set(&mut config, value);
            assert_out_of_range(&config, name);
        }
    }
}

#[test]
fn test_accepted_extremes_still_seed_a_field() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use spotlight_core::{ParticleField, Size};

    let config = FieldConfig {
        max_speed: FieldConfig::MAX_EXTENT,
        radius_max: FieldConfig::MAX_EXTENT,
        link_distance: FieldConfig::MAX_EXTENT,
        ..FieldConfig::default()
    };
    assert!(config.validate().is_ok());

    let mut rng = StdRng::seed_from_u64(3);
    let field = ParticleField::new(Size::new(400.0, 300.0), config, &mut rng);
    assert_eq!(field.particles.len(), 40);
}
