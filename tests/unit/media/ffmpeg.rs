use super::*;
use crate::foundation::core::FrameSize;

fn encode_args(width: u32, height: u32) -> Vec<String> {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit-scratch/encode.mp4"));
    let cmd = sink.encode_command(&SinkConfig {
        size: FrameSize::new(width, height),
        fps: Fps::FALLBACK,
        frame_count: 10,
    });
    cmd.get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn odd_sizes_are_padded_to_even() {
    let args = encode_args(853, 480);
    let vf = args.iter().position(|a| a == "-vf").unwrap();
    assert_eq!(args[vf + 1], "pad=ceil(iw/2)*2:ceil(ih/2)*2");
    let size = args.iter().position(|a| a == "-s").unwrap();
    assert_eq!(args[size + 1], "853x480");
    let pix_fmt = args.iter().rposition(|a| a == "-pix_fmt").unwrap();
    assert!(vf < pix_fmt);
    assert_eq!(args[pix_fmt + 1], "yuv420p");

    assert!(encode_args(64, 49).iter().any(|a| a == "-vf"));
}

#[test]
fn even_sizes_are_encoded_unchanged() {
    let args = encode_args(64, 48);
    assert!(!args.iter().any(|a| a == "-vf"));
    assert!(args.iter().any(|a| a == "libx264"));
}

#[test]
fn empty_size_is_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit-scratch/empty.mp4"));
    let err = sink
        .begin(SinkConfig {
            size: FrameSize::new(0, 100),
            fps: Fps::FALLBACK,
            frame_count: 1,
        })
        .unwrap_err();
    assert!(matches!(err, TransitionError::Validation(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit-scratch/never.mp4"));
    assert!(sink.push_frame(0, &Frame::new(2, 2)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("out.mp4")).unwrap();
}
