use super::*;

#[test]
fn defaults_match_documented_surface() {
    let cfg = TransitionConfig::default();
    assert_eq!(cfg.num_frames, 10);
    assert_eq!(cfg.animation, AnimationFamily::Rotation);
    assert_eq!(cfg.max_rotation, 45.0);
    assert_eq!(cfg.max_distortion, 0.7);
    assert_eq!(cfg.max_blur, 0.2);
    assert_eq!(cfg.max_brightness, 1.0);
    assert_eq!(cfg.max_zoom, 2.0);
    assert!(!cfg.debug);
    cfg.validate().unwrap();
}

#[test]
fn family_names_parse_with_aliases() {
    for family in AnimationFamily::ALL {
        assert_eq!(family.name().parse::<AnimationFamily>().unwrap(), family);
    }
    assert_eq!(
        "rotation_inv".parse::<AnimationFamily>().unwrap(),
        AnimationFamily::RotationInverse
    );
    assert_eq!(
        "Long-Translation-Inv".parse::<AnimationFamily>().unwrap(),
        AnimationFamily::LongTranslationInverse
    );
    let err = "spin".parse::<AnimationFamily>().unwrap_err();
    assert!(matches!(err, TransitionError::Validation(_)));
    assert!(err.to_string().contains("zoom_in"));
}

#[test]
fn long_translation_needs_twice_the_incoming_frames() {
    assert_eq!(AnimationFamily::ZoomOut.frames_needed(7), (7, 7));
    assert_eq!(AnimationFamily::LongTranslation.frames_needed(7), (7, 14));
    assert_eq!(AnimationFamily::LongTranslationInverse.phase2_multiplier(), 2);
}

#[test]
fn frame_count_bounds_are_enforced() {
    for n in [0, 1, 101] {
        let cfg = TransitionConfig {
            num_frames: n,
            ..TransitionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(TransitionError::Validation(_))));
    }
    for n in [2, 100] {
        let cfg = TransitionConfig {
            num_frames: n,
            ..TransitionConfig::default()
        };
        cfg.validate().unwrap();
    }
}

#[test]
fn non_finite_magnitudes_are_rejected() {
    let cfg = TransitionConfig {
        max_blur: f64::NAN,
        ..TransitionConfig::default()
    };
    assert!(cfg.validate().unwrap_err().to_string().contains("max_blur"));
}

#[test]
fn json_config_fills_missing_fields_with_defaults() {
    let cfg =
        TransitionConfig::from_json_str(r#"{ "animation": "zoom_in", "num_frames": 6 }"#).unwrap();
    assert_eq!(cfg.animation, AnimationFamily::ZoomIn);
    assert_eq!(cfg.num_frames, 6);
    assert_eq!(cfg.max_zoom, 2.0);

    let cfg = TransitionConfig::from_json_str(r#"{ "animation": "translation_inv" }"#).unwrap();
    assert_eq!(cfg.animation, AnimationFamily::TranslationInverse);

    assert!(matches!(
        TransitionConfig::from_json_str(r#"{ "frames": 6 }"#),
        Err(TransitionError::Serde(_))
    ));
    assert!(matches!(
        TransitionConfig::from_json_str(r#"{ "num_frames": 1 }"#),
        Err(TransitionError::Validation(_))
    ));
}

#[test]
fn effect_limits_respect_open_and_closed_ends() {
    assert!(!EffectLimit::ROTATION.contains(5.0));
    assert!(EffectLimit::ROTATION.contains(90.0));
    assert!(EffectLimit::ZOOM.contains(1.2));
    assert!(!EffectLimit::ZOOM.contains(2.01));
    assert!(!EffectLimit::BLUR.contains(0.001));
    assert!(!EffectLimit::BRIGHTNESS.contains(0.0));
    assert_eq!(EffectLimit::ZOOM.to_string(), "[1.2, 2]");
    assert_eq!(EffectLimit::DISTORTION.to_string(), "(0.3, 1]");
}
