//! Procedural transitions between two clips.
//!
//! A transition has two phases: the tail of the outgoing clip and the head of the incoming one.
//! Each frame of a phase goes through a chain of effects (mirror-tiling, zoom, rotation, crop,
//! blur, lens distortion, brightness) whose per-frame values are sampled from interpolation
//! curves. The API is plan-oriented:
//!
//! - Build a [`TransitionConfig`] and turn it into a [`TransitionPlan`] with [`plan`]
//! - Apply a [`Phase`] to frames with [`apply_phase`] or stream it with [`render_phase`]
//! - Drive whole runs over frame directories ([`render_frame_dirs`]) or videos
//!   ([`render_videos`], requires `ffmpeg` and `ffprobe` on `PATH`)
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod effects;
pub(crate) mod media;
pub(crate) mod plan;
pub(crate) mod render;

pub use crate::foundation::core::{Affine, Fps, Frame, FrameSize, PhaseId, Point, Vec2};
pub use crate::foundation::error::{TransitionError, TransitionResult};

pub use crate::animation::action::{
    ActionValues, CropOrigin, Effect, EffectKind, FrameAction, MirrorDirection, Phase,
};
pub use crate::animation::curve::{CurveKind, DEFAULT_STEEPNESS, InterpolationCurve};

pub use crate::effects::engine::{FrameObserver, StepInfo, apply_effect, apply_phase};
pub use crate::effects::geometry::{crop, crop_padded, rotate, sample_bilinear, zoom};
pub use crate::effects::lens::{
    LensParameters, LensReport, MESH_CELL, MeshCell, PincushionDeformation, ReferencePoint,
};
pub use crate::effects::mirror::{grid_size, mirror_tile};
pub use crate::effects::photometric::{blur, blur_sigma, brightness};
pub use crate::effects::warp::{distort, warp_mesh};

pub use crate::media::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, concat_videos, is_ffmpeg_on_path, is_ffprobe_on_path,
    require_ffmpeg_tools,
};
pub use crate::media::frames::{
    FRAME_EXTENSIONS, NamedFrame, list_frame_files, load_frames, load_head, load_tail,
};
pub use crate::media::output::{OutputPaths, VIDEO_EXTENSION, format_duration};
pub use crate::media::sink::{FrameSink, InMemorySink, PngDirSink, SinkConfig};
pub use crate::media::video::{VideoInfo, decode_head_frames, decode_tail_frames, probe_video};

pub use crate::plan::config::{
    AnimationFamily, EffectLimit, MAX_NUM_FRAMES, MIN_NUM_FRAMES, TransitionConfig,
};
pub use crate::plan::planner::{TransitionPlan, plan};

pub use crate::render::debug::{
    DebugFolderObserver, prepare_debug_dir, raw_folder_name, step_folder_name,
};
pub use crate::render::pipeline::{RenderStats, RenderThreading, render_phase, render_phase_frames};
pub use crate::render::session::{
    FramesJob, FramesOutcome, VideoJob, VideoOutcome, render_frame_dirs, render_videos,
};
