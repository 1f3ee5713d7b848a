use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::foundation::core::{Fps, Frame};
use crate::foundation::error::{TransitionError, TransitionResult};
use crate::media::sink::{FrameSink, SinkConfig};

const EVEN_PAD_FILTER: &str = "pad=ceil(iw/2)*2:ceil(ih/2)*2";

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGB frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<usize>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
        }
    }

    /// Output path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    /// `ffmpeg` invocation reading raw RGB frames of `cfg.size` from stdin.
    ///
    /// yuv420p needs even dimensions; odd sizes are padded by one black row or column.
    pub(crate) fn encode_command(&self, cfg: &SinkConfig) -> Command {
        let size = cfg.size;
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &size.to_string(),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an"]);
        if !size.width.is_multiple_of(2) || !size.height.is_multiple_of(2) {
            cmd.args(["-vf", EVEN_PAD_FILTER]);
        }
        cmd.args([
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> TransitionResult<()> {
        if cfg.size.is_empty() {
            return Err(TransitionError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(TransitionError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let mut cmd = self.encode_command(&cfg);
        tracing::debug!("encode command: {cmd:?}");

        let mut child = cmd.spawn().map_err(|e| {
            TransitionError::media(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TransitionError::media("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TransitionError::media("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Frame) -> TransitionResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TransitionError::media("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(TransitionError::media(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        let (w, h) = frame.dimensions();
        if w != cfg.size.width || h != cfg.size.height {
            return Err(TransitionError::validation(format!(
                "frame size mismatch: got {w}x{h}, expected {}",
                cfg.size
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TransitionError::media("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(frame.as_raw()).map_err(|e| {
            TransitionError::media(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> TransitionResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| TransitionError::media("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            TransitionError::media(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TransitionError::media("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| TransitionError::media(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(TransitionError::media(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // rawvideo input: `-r` before `-i` sets the input frame rate.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Concatenate two clips into `out` with the `concat` filter.
pub fn concat_videos(first: &Path, second: &Path, out: &Path) -> TransitionResult<()> {
    ensure_parent_dir(out)?;
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-v", "error", "-i"])
        .arg(first)
        .arg("-i")
        .arg(second)
        .args([
            "-filter_complex",
            "[0:v] [1:v] concat=n=2:v=1 [v]",
            "-map",
            "[v]",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
        ])
        .arg(out);
    tracing::debug!("merge command: {cmd:?}");

    let result = cmd
        .output()
        .map_err(|e| TransitionError::media(format!("failed to run ffmpeg for merge: {e}")))?;
    if !result.status.success() || !out.is_file() {
        return Err(TransitionError::media(format!(
            "ffmpeg failed to merge video phases into '{}': {}",
            out.display(),
            String::from_utf8_lossy(&result.stderr).trim()
        )));
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TransitionResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    tool_on_path("ffmpeg")
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    tool_on_path("ffprobe")
}

fn tool_on_path(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Fail with a media error unless both `ffmpeg` and `ffprobe` are available.
pub fn require_ffmpeg_tools() -> TransitionResult<()> {
    for (tool, found) in [
        ("ffmpeg", is_ffmpeg_on_path()),
        ("ffprobe", is_ffprobe_on_path()),
    ] {
        if !found {
            return Err(TransitionError::media(format!(
                "'{tool}' is required but was not found on PATH"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/media/ffmpeg.rs"]
mod tests;
