use super::*;

fn solid(w: u32, h: u32, v: u8) -> Frame {
    Frame::from_pixel(w, h, Rgb([v, v, v]))
}

fn marker(w: u32, h: u32) -> Frame {
    let mut img = solid(w, h, 0);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img
}

#[test]
fn crop_padded_fills_outside_with_black() {
    let img = solid(4, 4, 200);
    let out = crop_padded(&img, -2, 1, 4, 4);
    assert_eq!(out.dimensions(), (4, 4));
    assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(out.get_pixel(2, 0), &Rgb([200, 200, 200]));
    assert_eq!(out.get_pixel(2, 3), &Rgb([0, 0, 0]));

    let empty = crop_padded(&img, 10, 10, 2, 2);
    assert!(empty.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn crop_uses_original_size_fractions() {
    let img = Frame::from_fn(6, 2, |x, _| Rgb([x as u8, 0, 0]));
    let out = crop(&img, CropOrigin::new(0.5, 0.0), FrameSize::new(2, 2));
    assert_eq!(out.dimensions(), (2, 2));
    assert_eq!(out.get_pixel(0, 0).0[0], 1);
    assert_eq!(out.get_pixel(1, 1).0[0], 2);
}

#[test]
fn unit_zoom_is_identity() {
    let img = marker(6, 4);
    assert_eq!(zoom(&img, 1.0).unwrap(), img);
    assert!(zoom(&img, 0.0).is_err());
    assert!(zoom(&img, f64::INFINITY).is_err());
}

#[test]
fn zoom_out_adds_black_border_and_keeps_size() {
    let img = solid(20, 20, 120);
    let out = zoom(&img, 0.5).unwrap();
    assert_eq!(out.dimensions(), (20, 20));
    assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(out.get_pixel(10, 10), &Rgb([120, 120, 120]));

    let zoomed_in = zoom(&img, 2.0).unwrap();
    assert!(zoomed_in.pixels().all(|p| p.0 == [120, 120, 120]));
}

#[test]
fn rotation_is_clockwise_and_keeps_size() {
    let img = marker(4, 4);
    let out = rotate(&img, 90.0).unwrap();
    assert_eq!(out.dimensions(), (4, 4));
    assert_eq!(out.get_pixel(3, 0), &Rgb([255, 0, 0]));
    assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));

    let ccw = rotate(&img, -90.0).unwrap();
    assert_eq!(ccw.get_pixel(0, 3), &Rgb([255, 0, 0]));

    assert_eq!(rotate(&img, 0.0).unwrap(), img);
    assert!(rotate(&img, f64::NAN).is_err());
}

#[test]
fn rotation_blackens_uncovered_corners() {
    let img = solid(10, 10, 255);
    let out = rotate(&img, 45.0).unwrap();
    assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(out.get_pixel(5, 5), &Rgb([255, 255, 255]));
}

#[test]
fn bilinear_sampling_hits_pixel_centres_exactly() {
    let img = Frame::from_fn(3, 1, |x, _| Rgb([(x * 100) as u8, 0, 0]));
    assert_eq!(sample_bilinear(&img, Point::new(1.5, 0.5)).0[0], 100);
    assert_eq!(sample_bilinear(&img, Point::new(2.0, 0.5)).0[0], 150);
    assert_eq!(sample_bilinear(&img, Point::new(-0.1, 0.5)).0, [0, 0, 0]);
    assert_eq!(sample_bilinear(&img, Point::new(3.0, 1.0)).0[0], 200);
}
