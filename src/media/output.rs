use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::foundation::core::PhaseId;
use crate::foundation::error::TransitionResult;

/// Container extension of every produced video.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Files produced by one `render` run, derived from a common stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    /// Directory plus stem, without extension.
    pub stem: PathBuf,
    /// Phase 1 video.
    pub phase1: PathBuf,
    /// Phase 2 video.
    pub phase2: PathBuf,
    /// Concatenation of both phases.
    pub merged: PathBuf,
}

impl OutputPaths {
    /// Paths for the stem `dir/stem`.
    pub fn from_stem(stem: impl Into<PathBuf>) -> Self {
        let stem = stem.into();
        let with_suffix = |suffix: &str| {
            let mut name = stem
                .file_name()
                .map(|s| s.to_os_string())
                .unwrap_or_default();
            name.push(format!("_{suffix}.{VIDEO_EXTENSION}"));
            stem.with_file_name(name)
        };
        Self {
            phase1: with_suffix("phase1"),
            phase2: with_suffix("phase2"),
            merged: with_suffix("merged"),
            stem,
        }
    }

    /// Paths derived from a user-supplied `--output`; its extension is dropped.
    pub fn for_output(output: &Path) -> Self {
        Self::from_stem(output.with_extension(""))
    }

    /// First free `vt{N}` stem in `dir`.
    pub fn suggest(dir: &Path) -> TransitionResult<Self> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read output directory '{}'", dir.display()))?
        {
            let entry = entry.with_context(|| format!("failed to list '{}'", dir.display()))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(Self::from_stem(dir.join(format!(
            "vt{}",
            first_free_index(&names)
        ))))
    }

    /// Video of one phase.
    pub fn phase(&self, id: PhaseId) -> &Path {
        match id {
            PhaseId::Phase1 => &self.phase1,
            PhaseId::Phase2 => &self.phase2,
        }
    }

    /// Directory holding intermediate frames and the log file in debug mode.
    pub fn debug_dir(&self) -> PathBuf {
        let mut name = self
            .stem
            .file_name()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        name.push("_debug");
        self.stem.with_file_name(name)
    }
}

/// Smallest `N >= 1` such that no `vt{N}_*.mp4` is among `names`.
pub(crate) fn first_free_index(names: &[String]) -> usize {
    let taken = |n: usize| {
        let prefix = format!("vt{n}_");
        let suffix = format!(".{VIDEO_EXTENSION}");
        names
            .iter()
            .any(|name| name.starts_with(&prefix) && name.ends_with(&suffix))
    };
    (1..).find(|&n| !taken(n)).unwrap_or(1)
}

/// Format a run duration as `"1 d 2 h 3 m 4 s"`, omitting leading zero units.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (days, rest) = (secs / 86_400, secs % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    if days > 0 {
        format!("{days} d {hours} h {minutes} m {seconds} s")
    } else if hours > 0 {
        format!("{hours} h {minutes} m {seconds} s")
    } else if minutes > 0 {
        format!("{minutes} m {seconds} s")
    } else {
        format!("{seconds} s")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/output.rs"]
mod tests;
