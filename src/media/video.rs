use std::collections::VecDeque;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::core::{Fps, Frame, FrameSize};
use crate::foundation::error::{TransitionError, TransitionResult};

/// Basic metadata about a source video file.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
    /// Path used for probing and decoding.
    pub path: PathBuf,
    /// Frame size in pixels.
    pub size: FrameSize,
    /// Frame rate; [`Fps::FALLBACK`] when the stream does not report one.
    pub fps: Fps,
}

/// Probe source video metadata through `ffprobe`.
pub fn probe_video(path: &Path) -> TransitionResult<VideoInfo> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| TransitionError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(TransitionError::media(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_output(path, &out.stdout)
}

pub(crate) fn parse_probe_output(path: &Path, json: &[u8]) -> TransitionResult<VideoInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        avg_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| TransitionError::media(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            TransitionError::media(format!("no video stream found in '{}'", path.display()))
        })?;
    let width = stream
        .width
        .ok_or_else(|| TransitionError::media("missing video width from ffprobe"))?;
    let height = stream
        .height
        .ok_or_else(|| TransitionError::media("missing video height from ffprobe"))?;

    let fps = [stream.r_frame_rate.as_deref(), stream.avg_frame_rate.as_deref()]
        .into_iter()
        .flatten()
        .find_map(Fps::parse_ratio)
        .unwrap_or_else(|| {
            tracing::warn!(
                "could not retrieve the frame rate of {}, falling back to {} fps",
                path.display(),
                Fps::FALLBACK
            );
            Fps::FALLBACK
        });

    Ok(VideoInfo {
        path: path.to_path_buf(),
        size: FrameSize::new(width, height),
        fps,
    })
}

/// Milliseconds before the end of a clip to start decoding so that `n` tail frames are covered.
pub(crate) fn tail_window_ms(n: usize, fps: Fps) -> u64 {
    (1000.0 * (n as f64 + 2.0) / fps.as_f64()).ceil() as u64
}

/// Decode the last `n` frames of `video`.
pub fn decode_tail_frames(video: &VideoInfo, n: usize) -> TransitionResult<Vec<Frame>> {
    let window = tail_window_ms(n, video.fps);
    let frames = decode_rgb_frames(video, &["-sseof", &format!("-{window}ms")], None, n)?;
    check_frame_count(video, n, frames.len())?;
    Ok(frames)
}

/// Decode the first `n` frames of `video`.
pub fn decode_head_frames(video: &VideoInfo, n: usize) -> TransitionResult<Vec<Frame>> {
    let frames = decode_rgb_frames(video, &[], Some(n), n)?;
    check_frame_count(video, n, frames.len())?;
    Ok(frames)
}

fn check_frame_count(video: &VideoInfo, wanted: usize, got: usize) -> TransitionResult<()> {
    if got < wanted {
        return Err(TransitionError::media(format!(
            "could not extract {wanted} frames from '{}' ({got} extracted)",
            video.path.display()
        )));
    }
    Ok(())
}

fn decode_rgb_frames(
    video: &VideoInfo,
    input_args: &[&str],
    limit: Option<usize>,
    keep_last: usize,
) -> TransitionResult<Vec<Frame>> {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error"]).args(input_args).arg("-i").arg(&video.path);
    if let Some(n) = limit {
        cmd.args(["-frames:v", &n.to_string()]);
    }
    cmd.args([
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgb24",
        "-s",
        &video.size.to_string(),
        "pipe:1",
    ]);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    tracing::debug!("decode command: {cmd:?}");

    let mut child = cmd
        .spawn()
        .map_err(|e| TransitionError::media(format!("failed to run ffmpeg for video decode: {e}")))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| TransitionError::media("failed to open ffmpeg stderr (unexpected)"))?;
    let stderr_drain = std::thread::spawn(move || {
        let mut stderr_bytes = Vec::new();
        stderr.read_to_end(&mut stderr_bytes)?;
        Ok::<_, std::io::Error>(stderr_bytes)
    });
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| TransitionError::media("failed to open ffmpeg stdout (unexpected)"))?;

    let frames = read_rgb_frames(BufReader::new(stdout), video.size, keep_last);
    let status = child
        .wait()
        .map_err(|e| TransitionError::media(format!("failed to wait for ffmpeg to finish: {e}")))?;
    let stderr_bytes = stderr_drain
        .join()
        .map_err(|_| TransitionError::media("ffmpeg stderr drain thread panicked"))?
        .map_err(|e| TransitionError::media(format!("ffmpeg stderr read failed: {e}")))?;
    if !status.success() {
        return Err(TransitionError::media(format!(
            "ffmpeg video decode failed for '{}': {}",
            video.path.display(),
            String::from_utf8_lossy(&stderr_bytes).trim()
        )));
    }
    frames
}

/// Read raw `rgb24` frames of `size` from `reader` until EOF, keeping only the last `keep_last`.
///
/// Each frame is read straight into its own buffer; a truncated trailing frame is an error.
pub(crate) fn read_rgb_frames<R: Read>(
    mut reader: R,
    size: FrameSize,
    keep_last: usize,
) -> TransitionResult<Vec<Frame>> {
    let frame_len = size.width as usize * size.height as usize * 3;
    if frame_len == 0 {
        return Err(TransitionError::media(
            "decoded video frame size is zero (invalid source dimensions)",
        ));
    }

    let mut frames = VecDeque::with_capacity(keep_last.saturating_add(1).min(256));
    loop {
        let mut buf = vec![0u8; frame_len];
        let filled = fill_buffer(&mut reader, &mut buf)?;
        if filled == 0 {
            break;
        }
        if filled < frame_len {
            return Err(TransitionError::media(format!(
                "decoded video stream ended mid-frame: got {filled} of {frame_len} bytes"
            )));
        }
        let frame = Frame::from_raw(size.width, size.height, buf)
            .ok_or_else(|| TransitionError::media("decoded frame buffer has the wrong length"))?;
        frames.push_back(frame);
        if frames.len() > keep_last {
            frames.pop_front();
        }
    }
    Ok(frames.into())
}

fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> TransitionResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => {
                return Err(TransitionError::media(format!(
                    "failed to read decoded frames: {e}"
                )));
            }
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "../../tests/unit/media/video.rs"]
mod tests;
