use super::*;
use image::Rgb;

fn gradient(w: u32, h: u32) -> Frame {
    Frame::from_fn(w, h, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 90]))
}

fn identity_cells(size: FrameSize) -> Vec<MeshCell> {
    let mut cells = Vec::new();
    for x0 in (0..size.width).step_by(16) {
        for y0 in (0..size.height).step_by(16) {
            let x1 = (x0 + 16).min(size.width);
            let y1 = (y0 + 16).min(size.height);
            let p = |x: u32, y: u32| Point::new(f64::from(x), f64::from(y));
            cells.push(MeshCell {
                target: [x0, y0, x1, y1],
                quad: [p(x0, y0), p(x0, y1), p(x1, y1), p(x1, y0)],
            });
        }
    }
    cells
}

#[test]
fn identity_mesh_reproduces_source() {
    let img = gradient(40, 24);
    let size = FrameSize::of(&img);
    let out = warp_mesh(&img, size, &identity_cells(size)).unwrap();
    assert_eq!(out, img);
}

#[test]
fn cells_outside_the_frame_are_rejected() {
    let img = gradient(8, 8);
    let cell = MeshCell {
        target: [0, 0, 9, 8],
        quad: [Point::ORIGIN; 4],
    };
    assert!(warp_mesh(&img, FrameSize::new(8, 8), &[cell]).is_err());
}

#[test]
fn weak_distortion_is_near_identity() {
    let img = gradient(60, 40);
    let out = distort(&img, 1e-9).unwrap();
    let max_diff = img
        .as_raw()
        .iter()
        .zip(out.as_raw())
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap_or(0);
    assert!(max_diff <= 2, "max channel difference {max_diff}");
}

#[test]
fn strong_distortion_keeps_size_and_centre() {
    let img = gradient(60, 40);
    let out = distort(&img, 0.9).unwrap();
    assert_eq!(out.dimensions(), (60, 40));
    let c = out.get_pixel(30, 20).0;
    let o = img.get_pixel(30, 20).0;
    assert!(c[0].abs_diff(o[0]) <= 4 && c[1].abs_diff(o[1]) <= 4);
    assert_ne!(out, img);
}
