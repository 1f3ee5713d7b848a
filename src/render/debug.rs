use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    effects::engine::{FrameObserver, StepInfo},
    foundation::core::{Frame, PhaseId},
    foundation::error::TransitionResult,
};

/// Empty `dir`, creating it when missing.
pub fn prepare_debug_dir(dir: &Path) -> TransitionResult<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("failed to clear debug directory '{}'", dir.display()))?;
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create debug directory '{}'", dir.display()))?;
    Ok(())
}

/// Folder holding the output of one effect step, e.g. `3_phase1_rotation` or
/// `5_phase2_brightness_final`.
pub fn step_folder_name(step: &StepInfo) -> String {
    let suffix = if step.is_final { "_final" } else { "" };
    format!(
        "{}_{}_{}{suffix}",
        step.step_index + 2,
        step.phase,
        step.kind
    )
}

/// Folder holding the frames of a phase before any effect.
pub fn raw_folder_name(phase: PhaseId) -> String {
    format!("1_{phase}_raw")
}

/// Writes every intermediate frame into per-step folders below a debug root.
#[derive(Debug)]
pub struct DebugFolderObserver {
    root: PathBuf,
    names: [Vec<String>; 2],
}

impl DebugFolderObserver {
    /// Observer writing below `root`. Frames are named by their 1-based index until
    /// [`Self::with_names`] provides names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            names: [Vec::new(), Vec::new()],
        }
    }

    /// File stems for the frames of `phase`.
    pub fn with_names(mut self, phase: PhaseId, names: Vec<String>) -> Self {
        self.names[slot(phase)] = names;
        self
    }

    /// Directory for one effect step.
    pub fn step_dir(&self, step: &StepInfo) -> PathBuf {
        self.root.join(step_folder_name(step))
    }

    /// Directory for the raw frames of `phase`.
    pub fn raw_dir(&self, phase: PhaseId) -> PathBuf {
        self.root.join(raw_folder_name(phase))
    }

    /// Save the frames of `phase` as they were extracted.
    pub fn write_raw(&self, phase: PhaseId, frames: &[Frame]) -> TransitionResult<()> {
        let dir = self.raw_dir(phase);
        for (idx, frame) in frames.iter().enumerate() {
            self.save(&dir, phase, idx, frame)?;
        }
        Ok(())
    }

    fn file_name(&self, phase: PhaseId, idx: usize) -> String {
        match self.names[slot(phase)].get(idx) {
            Some(stem) => format!("{stem}.png"),
            None => format!("{:04}.png", idx + 1),
        }
    }

    fn save(&self, dir: &Path, phase: PhaseId, idx: usize, frame: &Frame) -> TransitionResult<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create debug folder '{}'", dir.display()))?;
        let path = dir.join(self.file_name(phase, idx));
        frame
            .save(&path)
            .with_context(|| format!("failed to write debug frame '{}'", path.display()))?;
        Ok(())
    }
}

impl FrameObserver for DebugFolderObserver {
    fn on_step(&self, step: &StepInfo, image: &Frame) -> TransitionResult<()> {
        self.save(&self.step_dir(step), step.phase, step.frame_index, image)
    }
}

fn slot(phase: PhaseId) -> usize {
    match phase {
        PhaseId::Phase1 => 0,
        PhaseId::Phase2 => 1,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/debug.rs"]
mod tests;
