use super::*;
use crate::media::sink::InMemorySink;
use crate::plan::config::{AnimationFamily, TransitionConfig};
use crate::plan::planner::plan;
use image::Rgb;

fn inputs(n: usize, w: u32, h: u32) -> Vec<Frame> {
    (0..n)
        .map(|i| {
            Frame::from_fn(w, h, |x, y| {
                Rgb([(x * 9) as u8, (y * 7) as u8, (i * 20 + (x ^ y) as usize) as u8])
            })
        })
        .collect()
}

fn rotation_plan(n: usize) -> crate::plan::planner::TransitionPlan {
    plan(&TransitionConfig {
        num_frames: n,
        animation: AnimationFamily::Rotation,
        ..TransitionConfig::default()
    })
    .unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let plan = rotation_plan(6);
    let frames = inputs(6, 24, 16);

    let sequential = render_phase_frames(
        &frames,
        &plan.phase1,
        PhaseId::Phase1,
        &RenderThreading::default(),
        None,
    )
    .unwrap();
    let parallel = render_phase_frames(
        &frames,
        &plan.phase1,
        PhaseId::Phase1,
        &RenderThreading {
            parallel: true,
            chunk_size: 4,
            threads: Some(3),
        },
        None,
    )
    .unwrap();

    assert_eq!(sequential.len(), 6);
    assert_eq!(sequential, parallel);
    assert!(sequential.iter().all(|f| f.dimensions() == (24, 16)));
}

#[test]
fn sink_receives_frames_in_order_per_chunk() {
    let plan = rotation_plan(5);
    let frames = inputs(5, 10, 10);
    let mut sink = InMemorySink::new();
    let stats = render_phase(
        &frames,
        &plan.phase2,
        PhaseId::Phase2,
        Fps::new(25, 1).unwrap(),
        &RenderThreading {
            parallel: true,
            chunk_size: 2,
            threads: Some(2),
        },
        None,
        &mut sink,
    )
    .unwrap();

    assert_eq!(
        stats,
        RenderStats {
            frames_total: 5,
            chunks: 3
        }
    );
    let idx: Vec<usize> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    let cfg = sink.config().unwrap();
    assert_eq!(cfg.size, FrameSize::new(10, 10));
    assert_eq!(cfg.frame_count, 5);
    assert!(sink.is_finished());
}

#[test]
fn input_count_and_size_are_checked() {
    let plan = rotation_plan(3);
    let err = render_phase_frames(
        &inputs(2, 8, 8),
        &plan.phase1,
        PhaseId::Phase1,
        &RenderThreading::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, TransitionError::Render(_)));

    let mut mixed = inputs(3, 8, 8);
    mixed[2] = Frame::new(8, 6);
    let err = render_phase_frames(
        &mixed,
        &plan.phase1,
        PhaseId::Phase1,
        &RenderThreading::default(),
        None,
    )
    .unwrap_err();
    assert!(err.to_string().contains("8x6"));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(Some(1)).is_ok());
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(64), 64);
}
