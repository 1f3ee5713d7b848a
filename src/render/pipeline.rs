use rayon::prelude::*;

use crate::{
    animation::action::Phase,
    effects::engine::{FrameObserver, apply_phase},
    foundation::core::{Fps, Frame, FrameSize, PhaseId},
    foundation::error::{TransitionError, TransitionResult},
    media::sink::{FrameSink, SinkConfig},
};

/// Frame-level threading for [`render_phase`].
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render the frames of a chunk on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames rendered before they are handed to the sink.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Phase render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed into the sink.
    pub frames_total: u64,
    /// Chunks the phase was split into.
    pub chunks: u64,
}

/// Apply `phase` to every input frame and stream the results into `sink`.
///
/// `inputs[i]` is rendered with the values of frame `i`; every input must have the same size,
/// which is also the size announced to the sink. The sink receives frames in index order for
/// both the sequential and the parallel path, and both paths produce the same pixels.
#[tracing::instrument(skip_all, fields(phase = %phase_id, frames = inputs.len()))]
pub fn render_phase(
    inputs: &[Frame],
    phase: &Phase,
    phase_id: PhaseId,
    fps: Fps,
    threading: &RenderThreading,
    observer: Option<&dyn FrameObserver>,
    sink: &mut dyn FrameSink,
) -> TransitionResult<RenderStats> {
    let size = check_inputs(inputs, phase, phase_id)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    sink.begin(SinkConfig {
        size,
        fps,
        frame_count: inputs.len(),
    })?;

    let mut stats = RenderStats::default();
    let mut chunk_start = 0;
    while chunk_start < inputs.len() {
        let chunk_end = (chunk_start + chunk_size).min(inputs.len());
        let frames = match pool.as_ref() {
            Some(pool) => pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|idx| apply_phase(&inputs[idx], phase, phase_id, idx, observer))
                    .collect::<TransitionResult<Vec<_>>>()
            })?,
            None => (chunk_start..chunk_end)
                .map(|idx| apply_phase(&inputs[idx], phase, phase_id, idx, observer))
                .collect::<TransitionResult<Vec<_>>>()?,
        };

        for (offset, frame) in frames.iter().enumerate() {
            sink.push_frame(chunk_start + offset, frame)?;
        }
        tracing::debug!(
            "{phase_id} - frames [{}..{}] of {} rendered",
            chunk_start + 1,
            chunk_end,
            inputs.len()
        );

        stats.frames_total += frames.len() as u64;
        stats.chunks += 1;
        chunk_start = chunk_end;
    }

    sink.end()?;
    Ok(stats)
}

/// Render a whole phase into memory.
pub fn render_phase_frames(
    inputs: &[Frame],
    phase: &Phase,
    phase_id: PhaseId,
    threading: &RenderThreading,
    observer: Option<&dyn FrameObserver>,
) -> TransitionResult<Vec<Frame>> {
    let mut sink = crate::media::sink::InMemorySink::new();
    render_phase(
        inputs,
        phase,
        phase_id,
        Fps::FALLBACK,
        threading,
        observer,
        &mut sink,
    )?;
    Ok(sink.frames().iter().map(|(_, f)| f.clone()).collect())
}

fn check_inputs(inputs: &[Frame], phase: &Phase, phase_id: PhaseId) -> TransitionResult<FrameSize> {
    if inputs.len() != phase.frame_count() {
        return Err(TransitionError::render(format!(
            "{phase_id} expects {} frames, got {}",
            phase.frame_count(),
            inputs.len()
        )));
    }
    let first = inputs
        .first()
        .ok_or_else(|| TransitionError::render(format!("{phase_id} has no input frames")))?;
    let size = FrameSize::of(first);
    if let Some((idx, other)) = inputs
        .iter()
        .enumerate()
        .find(|(_, f)| FrameSize::of(*f) != size)
    {
        return Err(TransitionError::render(format!(
            "{phase_id} frame {} is {}, expected {size}",
            idx + 1,
            FrameSize::of(other)
        )));
    }
    Ok(size)
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> TransitionResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TransitionError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TransitionError::render(format!("failed to build rayon thread pool: {e}")))
}

pub(crate) fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
