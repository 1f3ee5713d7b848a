use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::core::{Fps, Frame, FrameSize};
use crate::foundation::error::{TransitionError, TransitionResult};

/// Configuration provided to a [`FrameSink`] before the first frame of a phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Frame size.
    pub size: FrameSize,
    /// Output frame rate.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing index order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TransitionResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: &Frame) -> TransitionResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> TransitionResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, Frame)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(usize, Frame)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TransitionResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Frame) -> TransitionResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TransitionResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes every frame as a PNG file into one directory.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    names: Vec<String>,
    last_idx: Option<usize>,
}

impl PngDirSink {
    /// Sink writing into `dir`. Frame `i` is saved as `names[i].png`, or as a zero-padded
    /// index when no name is given for it.
    pub fn new(dir: impl Into<PathBuf>, names: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            names,
            last_idx: None,
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn file_name(&self, idx: usize) -> String {
        match self.names.get(idx) {
            Some(stem) => format!("{stem}.png"),
            None => format!("{:04}.png", idx + 1),
        }
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> TransitionResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frame directory '{}'", self.dir.display()))?;
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Frame) -> TransitionResult<()> {
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(TransitionError::media(
                "png sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        let path = self.dir.join(self.file_name(idx));
        frame
            .save(&path)
            .with_context(|| format!("failed to write frame '{}'", path.display()))?;
        Ok(())
    }

    fn end(&mut self) -> TransitionResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/sink.rs"]
mod tests;
