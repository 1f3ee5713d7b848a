use super::*;
use crate::plan::config::AnimationFamily;
use image::Rgb;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit-scratch")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn write_clip(dir: &Path, count: usize, color: [u8; 3]) {
    std::fs::create_dir_all(dir).unwrap();
    for i in 0..count {
        Frame::from_pixel(20, 20, Rgb(color))
            .save(dir.join(format!("f{:03}.png", i + 1)))
            .unwrap();
    }
}

#[test]
fn frames_job_layout() {
    let job = FramesJob {
        first_dir: "a".into(),
        second_dir: "b".into(),
        out_dir: "out".into(),
    };
    assert_eq!(job.phase_dir(PhaseId::Phase1), PathBuf::from("out/phase1"));
    assert_eq!(job.phase_dir(PhaseId::Phase2), PathBuf::from("out/phase2"));
    assert_eq!(job.debug_dir(), PathBuf::from("out/debug"));
}

#[test]
fn long_translation_takes_twice_the_second_clip() {
    let root = scratch_dir("session_long_translation");
    write_clip(&root.join("a"), 5, [200, 40, 40]);
    write_clip(&root.join("b"), 6, [40, 40, 200]);
    let job = FramesJob {
        first_dir: root.join("a"),
        second_dir: root.join("b"),
        out_dir: root.join("out"),
    };
    let cfg = TransitionConfig {
        num_frames: 3,
        animation: AnimationFamily::LongTranslation,
        ..TransitionConfig::default()
    };

    let outcome = render_frame_dirs(&cfg, &job, &RenderThreading::default()).unwrap();
    assert_eq!(outcome.frames, (3, 6));
    for name in ["f003", "f004", "f005"] {
        assert!(outcome.phase1_dir.join(format!("{name}.png")).is_file());
    }
    assert!(outcome.phase2_dir.join("f001.png").is_file());
    assert!(outcome.phase2_dir.join("f006.png").is_file());
    assert!(!job.debug_dir().exists());
}

#[test]
fn debug_mode_writes_step_folders() {
    let root = scratch_dir("session_debug");
    write_clip(&root.join("a"), 2, [10, 120, 10]);
    write_clip(&root.join("b"), 2, [120, 10, 10]);
    let job = FramesJob {
        first_dir: root.join("a"),
        second_dir: root.join("b"),
        out_dir: root.join("out"),
    };
    let cfg = TransitionConfig {
        num_frames: 2,
        animation: AnimationFamily::Translation,
        debug: true,
        ..TransitionConfig::default()
    };

    render_frame_dirs(&cfg, &job, &RenderThreading::default()).unwrap();

    let debug = job.debug_dir();
    assert!(debug.join("1_phase1_raw").join("f001.png").is_file());
    assert!(debug.join("1_phase2_raw").join("f002.png").is_file());
    assert!(debug.join("2_phase1_mirror").join("f002.png").is_file());
    assert!(debug.join("2_phase2_mirror").join("f001.png").is_file());

    let folders: Vec<String> = std::fs::read_dir(&debug)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    for phase in ["phase1", "phase2"] {
        let finals = folders
            .iter()
            .filter(|f| f.contains(phase) && f.ends_with("_final"))
            .count();
        assert_eq!(finals, 1, "{folders:?}");
    }
}

#[test]
fn missing_frames_fail_before_rendering() {
    let root = scratch_dir("session_short");
    write_clip(&root.join("a"), 1, [0, 0, 0]);
    write_clip(&root.join("b"), 4, [0, 0, 0]);
    let job = FramesJob {
        first_dir: root.join("a"),
        second_dir: root.join("b"),
        out_dir: root.join("out"),
    };
    let cfg = TransitionConfig {
        num_frames: 2,
        ..TransitionConfig::default()
    };
    let err = render_frame_dirs(&cfg, &job, &RenderThreading::default()).unwrap_err();
    assert!(matches!(err, crate::foundation::error::TransitionError::Media(_)));
    assert!(!job.phase_dir(PhaseId::Phase1).exists());
}
