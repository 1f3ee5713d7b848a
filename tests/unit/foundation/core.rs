use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(25, 1).unwrap().as_f64(), 25.0);
}

#[test]
fn fps_parses_ffmpeg_ratios() {
    assert_eq!(Fps::parse_ratio("30000/1001"), Some(Fps { num: 30000, den: 1001 }));
    assert_eq!(Fps::parse_ratio(" 24 "), Some(Fps { num: 24, den: 1 }));
    assert_eq!(Fps::parse_ratio("0/0"), None);
    assert_eq!(Fps::parse_ratio("abc"), None);
}

#[test]
fn fps_display_omits_unit_denominator() {
    assert_eq!(Fps::FALLBACK.to_string(), "30");
    assert_eq!(Fps { num: 30000, den: 1001 }.to_string(), "30000/1001");
}

#[test]
fn frame_size_center_is_half_extent() {
    let c = FrameSize::new(100, 50).center();
    assert_eq!((c.x, c.y), (50.0, 25.0));
    assert!(FrameSize::new(0, 10).is_empty());
}

#[test]
fn phase_numbers_are_one_based() {
    assert_eq!(PhaseId::Phase1.number(), 1);
    assert_eq!(PhaseId::Phase2.to_string(), "phase2");
}
