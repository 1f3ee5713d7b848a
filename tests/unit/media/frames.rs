use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit-scratch")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_frames(dir: &Path, names: &[&str]) {
    for (i, name) in names.iter().enumerate() {
        Frame::from_pixel(3, 2, image::Rgb([i as u8 * 10, 0, 0]))
            .save(dir.join(name))
            .unwrap();
    }
}

#[test]
fn listing_filters_extensions_and_sorts_by_name() {
    let dir = scratch_dir("frames_listing");
    write_frames(&dir, &["0003.png", "0001.png", "0002.bmp"]);
    std::fs::write(dir.join("notes.txt"), "x").unwrap();
    std::fs::create_dir_all(dir.join("sub.png")).unwrap();

    let names: Vec<String> = list_frame_files(&dir)
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["0001.png", "0002.bmp", "0003.png"]);
}

#[test]
fn tail_and_head_pick_the_right_end() {
    let dir = scratch_dir("frames_ends");
    write_frames(&dir, &["a.png", "b.png", "c.png", "d.png"]);

    let tail = load_tail(&dir, 2).unwrap();
    assert_eq!(
        tail.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["c", "d"]
    );
    assert_eq!(tail[1].image.get_pixel(0, 0).0, [30, 0, 0]);

    let head = load_head(&dir, 3).unwrap();
    assert_eq!(head[0].name, "a");
    assert_eq!(head.len(), 3);
}

#[test]
fn too_few_frames_is_a_media_error() {
    let dir = scratch_dir("frames_short");
    write_frames(&dir, &["a.png"]);
    let err = load_head(&dir, 2).unwrap_err();
    assert!(matches!(err, TransitionError::Media(_)));
    assert!(err.to_string().contains("1 found"));
    assert!(load_tail(&dir.join("missing"), 1).is_err());
}
