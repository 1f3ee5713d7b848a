use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Frame;
use crate::foundation::error::{TransitionError, TransitionResult};

/// File extensions recognised as frames (compared case-insensitively).
pub const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// A frame with the file stem it was loaded from.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedFrame {
    /// File stem, reused for the output file.
    pub name: String,
    /// Pixels.
    pub image: Frame,
}

/// Frame files in `dir`, sorted by file name.
pub fn list_frame_files(dir: &Path) -> TransitionResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read frame directory '{}'", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list frame directory '{}'", dir.display()))?
            .path();
        if path.is_file() && is_frame_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            FRAME_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
}

/// Load frames as 8-bit RGB.
pub fn load_frames(paths: &[PathBuf]) -> TransitionResult<Vec<NamedFrame>> {
    paths
        .iter()
        .map(|path| {
            let image = image::open(path)
                .with_context(|| format!("failed to decode frame '{}'", path.display()))?
                .to_rgb8();
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(NamedFrame { name, image })
        })
        .collect()
}

/// Load the last `n` frames of `dir`.
pub fn load_tail(dir: &Path, n: usize) -> TransitionResult<Vec<NamedFrame>> {
    let files = list_frame_files(dir)?;
    check_available(dir, n, files.len())?;
    load_frames(&files[files.len() - n..])
}

/// Load the first `n` frames of `dir`.
pub fn load_head(dir: &Path, n: usize) -> TransitionResult<Vec<NamedFrame>> {
    let files = list_frame_files(dir)?;
    check_available(dir, n, files.len())?;
    load_frames(&files[..n])
}

fn check_available(dir: &Path, wanted: usize, found: usize) -> TransitionResult<()> {
    if found < wanted {
        return Err(TransitionError::media(format!(
            "could not take {wanted} frames from '{}' ({found} found)",
            dir.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/media/frames.rs"]
mod tests;
