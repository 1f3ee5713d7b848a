use super::*;

#[test]
fn probe_output_reads_size_and_rational_fps() {
    let json = br#"{"streams":[
        {"codec_type":"audio"},
        {"codec_type":"video","width":1280,"height":720,"r_frame_rate":"30000/1001"}
    ]}"#;
    let info = parse_probe_output(Path::new("a.mp4"), json).unwrap();
    assert_eq!(info.size, FrameSize::new(1280, 720));
    assert_eq!(info.fps, Fps::new(30000, 1001).unwrap());
    assert_eq!(info.path, PathBuf::from("a.mp4"));
}

#[test]
fn unknown_frame_rate_falls_back() {
    let json = br#"{"streams":[{"codec_type":"video","width":64,"height":48,"r_frame_rate":"0/0"}]}"#;
    let info = parse_probe_output(Path::new("b.mp4"), json).unwrap();
    assert_eq!(info.fps, Fps::FALLBACK);

    let json = br#"{"streams":[{"codec_type":"video","width":64,"height":48,
        "r_frame_rate":"0/0","avg_frame_rate":"25/1"}]}"#;
    let info = parse_probe_output(Path::new("b.mp4"), json).unwrap();
    assert_eq!(info.fps, Fps::new(25, 1).unwrap());
}

#[test]
fn probe_output_without_video_is_a_media_error() {
    let err = parse_probe_output(Path::new("c.wav"), br#"{"streams":[{"codec_type":"audio"}]}"#)
        .unwrap_err();
    assert!(matches!(err, TransitionError::Media(_)));
    assert!(parse_probe_output(Path::new("c"), b"not json").is_err());
}

#[test]
fn tail_window_covers_two_extra_frames() {
    assert_eq!(tail_window_ms(10, Fps::new(30, 1).unwrap()), 400);
    assert_eq!(tail_window_ms(10, Fps::new(24, 1).unwrap()), 500);
    assert_eq!(tail_window_ms(4, Fps::new(30000, 1001).unwrap()), 201);
}

#[test]
fn raw_stream_reads_one_frame_at_a_time() {
    let size = FrameSize::new(2, 1);
    let bytes: Vec<u8> = (0..12).collect();
    let frames = read_rgb_frames(std::io::Cursor::new(bytes), size, 10).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].get_pixel(0, 0).0, [0, 1, 2]);
    assert_eq!(frames[1].get_pixel(1, 0).0, [9, 10, 11]);
}

#[test]
fn raw_stream_keeps_only_the_last_frames() {
    let size = FrameSize::new(1, 1);
    let bytes: Vec<u8> = (0..15).collect();
    let frames = read_rgb_frames(std::io::Cursor::new(bytes), size, 2).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].get_pixel(0, 0).0, [9, 10, 11]);
    assert_eq!(frames[1].get_pixel(0, 0).0, [12, 13, 14]);
}

#[test]
fn truncated_or_empty_streams() {
    let size = FrameSize::new(2, 1);
    let err = read_rgb_frames(std::io::Cursor::new(vec![0u8; 7]), size, 4).unwrap_err();
    assert!(matches!(err, TransitionError::Media(_)));
    assert!(err.to_string().contains("mid-frame"));

    let none = read_rgb_frames(std::io::Cursor::new(Vec::new()), size, 4).unwrap();
    assert!(none.is_empty());

    assert!(read_rgb_frames(std::io::Cursor::new(vec![0u8; 3]), FrameSize::new(0, 4), 4).is_err());
}
