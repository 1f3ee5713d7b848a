use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;

use crate::{
    animation::action::EffectKind,
    effects::engine::FrameObserver,
    effects::lens::PincushionDeformation,
    foundation::core::{Fps, Frame, FrameSize, PhaseId},
    foundation::error::TransitionResult,
    media::ffmpeg::{FfmpegSink, FfmpegSinkOpts, concat_videos, require_ffmpeg_tools},
    media::frames::{NamedFrame, load_head, load_tail},
    media::output::{OutputPaths, format_duration},
    media::sink::PngDirSink,
    media::video::{decode_head_frames, decode_tail_frames, probe_video},
    plan::config::TransitionConfig,
    plan::planner::{TransitionPlan, plan},
    render::debug::DebugFolderObserver,
    render::pipeline::{RenderThreading, render_phase},
};

/// A transition between two video files.
#[derive(Clone, Debug)]
pub struct VideoJob {
    /// Outgoing clip; its last frames form phase 1.
    pub first: PathBuf,
    /// Incoming clip; its first frames form phase 2.
    pub second: PathBuf,
    /// Where the phase (or merged) videos go.
    pub outputs: OutputPaths,
    /// Concatenate both phases into one video and delete the phase files.
    pub merge: bool,
    /// Delete both input videos after success.
    pub remove_inputs: bool,
}

/// Result of [`render_videos`].
#[derive(Clone, Debug)]
pub struct VideoOutcome {
    /// Videos left on disk.
    pub videos: Vec<PathBuf>,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Render a transition between two videos with the system `ffmpeg`.
///
/// Phase 1 is encoded from the tail of `first`, phase 2 from the head of `second`, both at the
/// frame rate of `first`. With `cfg.debug` every intermediate frame is written below
/// [`OutputPaths::debug_dir`].
#[tracing::instrument(skip_all, fields(first = %job.first.display(), second = %job.second.display()))]
pub fn render_videos(
    cfg: &TransitionConfig,
    job: &VideoJob,
    threading: &RenderThreading,
) -> TransitionResult<VideoOutcome> {
    let started = Instant::now();
    let plan = plan(cfg)?;
    require_ffmpeg_tools()?;

    let first = probe_video(&job.first)?;
    let second = probe_video(&job.second)?;
    tracing::info!(
        "first video: {} ({}, {} fps)",
        first.path.display(),
        first.size,
        first.fps
    );
    tracing::info!(
        "second video: {} ({}, {} fps)",
        second.path.display(),
        second.size,
        second.fps
    );
    if first.size != second.size {
        tracing::warn!(
            "clip sizes differ ({} vs {}), merged output may fail",
            first.size,
            second.size
        );
    }
    plan.log_summary();

    let (n1, n2) = plan.frames_needed();
    let inputs = [
        decode_tail_frames(&first, n1)?,
        decode_head_frames(&second, n2)?,
    ];

    let observer = cfg
        .debug
        .then(|| DebugFolderObserver::new(job.outputs.debug_dir()));
    log_lens_report(&plan, first.size);

    for (id, frames) in PhaseId::ALL.into_iter().zip(&inputs) {
        if let Some(observer) = observer.as_ref() {
            observer.write_raw(id, frames)?;
        }
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(job.outputs.phase(id)));
        render_phase(
            frames,
            plan.phase(id),
            id,
            first.fps,
            threading,
            observer.as_ref().map(|o| o as &dyn FrameObserver),
            &mut sink,
        )?;
        tracing::info!("{id} written to {}", sink.out_path().display());
    }

    let videos = if job.merge {
        concat_videos(&job.outputs.phase1, &job.outputs.phase2, &job.outputs.merged)?;
        for id in PhaseId::ALL {
            remove_file(job.outputs.phase(id))?;
        }
        tracing::info!("merged video written to {}", job.outputs.merged.display());
        vec![job.outputs.merged.clone()]
    } else {
        vec![job.outputs.phase1.clone(), job.outputs.phase2.clone()]
    };

    if job.remove_inputs {
        remove_file(&job.first)?;
        remove_file(&job.second)?;
        tracing::info!("input videos removed");
    }

    let elapsed = started.elapsed();
    tracing::info!("transition rendered in {}", format_duration(elapsed));
    Ok(VideoOutcome { videos, elapsed })
}

/// A transition between two directories of frames.
#[derive(Clone, Debug)]
pub struct FramesJob {
    /// Directory whose last frames form phase 1.
    pub first_dir: PathBuf,
    /// Directory whose first frames form phase 2.
    pub second_dir: PathBuf,
    /// Output root; receives `phase1/`, `phase2/` and, in debug mode, `debug/`.
    pub out_dir: PathBuf,
}

impl FramesJob {
    /// Output folder of one phase.
    pub fn phase_dir(&self, id: PhaseId) -> PathBuf {
        self.out_dir.join(id.to_string())
    }

    /// Debug root.
    pub fn debug_dir(&self) -> PathBuf {
        self.out_dir.join("debug")
    }
}

/// Result of [`render_frame_dirs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramesOutcome {
    /// Folder of the rendered phase 1 frames.
    pub phase1_dir: PathBuf,
    /// Folder of the rendered phase 2 frames.
    pub phase2_dir: PathBuf,
    /// Frames written per phase.
    pub frames: (usize, usize),
}

/// Render a transition between two frame directories into two folders of PNGs.
///
/// Output files keep the stems of their inputs.
#[tracing::instrument(skip_all, fields(first = %job.first_dir.display(), second = %job.second_dir.display()))]
pub fn render_frame_dirs(
    cfg: &TransitionConfig,
    job: &FramesJob,
    threading: &RenderThreading,
) -> TransitionResult<FramesOutcome> {
    let plan = plan(cfg)?;
    plan.log_summary();

    let (n1, n2) = plan.frames_needed();
    let inputs = [load_tail(&job.first_dir, n1)?, load_head(&job.second_dir, n2)?];

    let mut observer = cfg.debug.then(|| DebugFolderObserver::new(job.debug_dir()));
    if let Some(first) = inputs[0].first() {
        log_lens_report(&plan, FrameSize::of(&first.image));
    }

    let mut split = Vec::with_capacity(2);
    for (id, named) in PhaseId::ALL.into_iter().zip(inputs) {
        let (names, frames): (Vec<String>, Vec<Frame>) = named
            .into_iter()
            .map(|NamedFrame { name, image }| (name, image))
            .unzip();
        observer = observer.map(|o| o.with_names(id, names.clone()));
        split.push((id, names, frames));
    }

    let mut written = [0usize; 2];
    for (slot, (id, names, frames)) in split.into_iter().enumerate() {
        if let Some(observer) = observer.as_ref() {
            observer.write_raw(id, &frames)?;
        }
        let mut sink = PngDirSink::new(job.phase_dir(id), names);
        let stats = render_phase(
            &frames,
            plan.phase(id),
            id,
            Fps::FALLBACK,
            threading,
            observer.as_ref().map(|o| o as &dyn FrameObserver),
            &mut sink,
        )?;
        written[slot] = stats.frames_total as usize;
        tracing::info!("{id} frames written to {}", sink.dir().display());
    }

    Ok(FramesOutcome {
        phase1_dir: job.phase_dir(PhaseId::Phase1),
        phase2_dir: job.phase_dir(PhaseId::Phase2),
        frames: (written[0], written[1]),
    })
}

fn log_lens_report(plan: &TransitionPlan, size: FrameSize) {
    if let Some(peak) = plan.peak(EffectKind::Distortion) {
        tracing::debug!(
            "{}",
            PincushionDeformation::for_effect(peak).report(size)
        );
    }
}

fn remove_file(path: &Path) -> TransitionResult<()> {
    std::fs::remove_file(path)
        .with_context(|| format!("failed to remove '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
