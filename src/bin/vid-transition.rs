use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use vid_transition::{
    AnimationFamily, FramesJob, OutputPaths, RenderThreading, TransitionConfig, VideoJob,
    format_duration, prepare_debug_dir, render_frame_dirs, render_videos,
};

const LOG_FILE: &str = "vid_transition.log";

#[derive(Parser, Debug)]
#[command(name = "vid-transition", version, about = "Procedural transitions between two clips")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a transition between two videos (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Render a transition between two directories of frames.
    Frames(FramesArgs),
    /// Print the transition plan as JSON.
    Plan(TransitionArgs),
    /// List the animation families.
    Animations,
}

#[derive(Args, Debug)]
struct TransitionArgs {
    /// Frames per phase (2 to 100).
    #[arg(short = 'n', long)]
    num_frames: Option<usize>,

    /// Animation family (see `vid-transition animations`).
    #[arg(short = 'a', long)]
    animation: Option<AnimationFamily>,

    /// Peak rotation in degrees.
    #[arg(short = 'r', long)]
    max_rotation: Option<f64>,

    /// Peak lens distortion strength.
    #[arg(short = 'd', long)]
    max_distortion: Option<f64>,

    /// Peak blur, as a fraction of the shorter frame side.
    #[arg(short = 'b', long)]
    max_blur: Option<f64>,

    /// Peak brightness factor.
    #[arg(short = 's', long)]
    max_brightness: Option<f64>,

    /// Peak zoom factor.
    #[arg(short = 'z', long)]
    max_zoom: Option<f64>,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level and keep every intermediate frame.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

impl TransitionArgs {
    fn resolve(&self) -> anyhow::Result<TransitionConfig> {
        let mut cfg = match &self.config {
            Some(path) => TransitionConfig::from_json_path(path)?,
            None => TransitionConfig::default(),
        };
        if let Some(n) = self.num_frames {
            cfg.num_frames = n;
        }
        if let Some(animation) = self.animation {
            cfg.animation = animation;
        }
        if let Some(v) = self.max_rotation {
            cfg.max_rotation = v;
        }
        if let Some(v) = self.max_distortion {
            cfg.max_distortion = v;
        }
        if let Some(v) = self.max_blur {
            cfg.max_blur = v;
        }
        if let Some(v) = self.max_brightness {
            cfg.max_brightness = v;
        }
        if let Some(v) = self.max_zoom {
            cfg.max_zoom = v;
        }
        cfg.debug |= self.debug;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames rendered per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl ThreadingArgs {
    fn threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input videos: the outgoing clip, then the incoming clip (`-i a -i b` or `-i a b`).
    #[arg(short = 'i', long = "input", required = true, num_args = 1..=2)]
    inputs: Vec<PathBuf>,

    /// Output path; `_phase1`, `_phase2` or `_merged` is appended to its stem.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Concatenate both phases into a single video.
    #[arg(long, default_value_t = false)]
    merge: bool,

    /// Delete the input videos after a successful render.
    #[arg(long, default_value_t = false)]
    remove: bool,

    #[command(flatten)]
    transition: TransitionArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Args, Debug)]
struct FramesArgs {
    /// Directory of the outgoing clip's frames.
    #[arg(long)]
    first: PathBuf,

    /// Directory of the incoming clip's frames.
    #[arg(long)]
    second: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    transition: TransitionArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Animations => cmd_animations(),
    }
}

fn init_logging(debug: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let file_layer = match log_dir {
        Some(dir) => {
            let path = dir.join(LOG_FILE);
            let file = File::create(&path)
                .with_context(|| format!("create log file '{}'", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .with(level)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let [first, second] = <[PathBuf; 2]>::try_from(args.inputs).map_err(|inputs| {
        anyhow::anyhow!(
            "expected exactly two --input videos, got {}",
            inputs.len()
        )
    })?;
    let cfg = args.transition.resolve()?;
    let outputs = match &args.output {
        Some(path) => OutputPaths::for_output(path),
        None => OutputPaths::suggest(Path::new("."))?,
    };

    let debug_dir = cfg.debug.then(|| outputs.debug_dir());
    if let Some(dir) = &debug_dir {
        prepare_debug_dir(dir)?;
    }
    init_logging(cfg.debug, debug_dir.as_deref())?;

    let job = VideoJob {
        first,
        second,
        outputs,
        merge: args.merge,
        remove_inputs: args.remove,
    };
    let outcome = render_videos(&cfg, &job, &args.threading.threading())?;
    for video in &outcome.videos {
        println!("{}", video.display());
    }
    eprintln!("done in {}", format_duration(outcome.elapsed));
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = args.transition.resolve()?;
    let job = FramesJob {
        first_dir: args.first,
        second_dir: args.second,
        out_dir: args.out,
    };

    let debug_dir = cfg.debug.then(|| job.debug_dir());
    if let Some(dir) = &debug_dir {
        prepare_debug_dir(dir)?;
    }
    init_logging(cfg.debug, debug_dir.as_deref())?;

    let outcome = render_frame_dirs(&cfg, &job, &args.threading.threading())?;
    println!("{}", outcome.phase1_dir.display());
    println!("{}", outcome.phase2_dir.display());
    Ok(())
}

fn cmd_plan(args: TransitionArgs) -> anyhow::Result<()> {
    let cfg = args.resolve()?;
    init_logging(cfg.debug, None)?;
    let plan = vid_transition::plan(&cfg)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_animations() -> anyhow::Result<()> {
    for family in AnimationFamily::ALL {
        let second = match family.phase2_multiplier() {
            1 => "n".to_owned(),
            m => format!("{m}n"),
        };
        println!(
            "{:<26} {} (n frames from the first clip, {second} from the second)",
            family.name(),
            family.description()
        );
    }
    Ok(())
}
