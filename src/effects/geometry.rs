use image::{Rgb, imageops};

use crate::{
    animation::action::CropOrigin,
    foundation::core::{Affine, Frame, FrameSize, Point},
    foundation::error::{TransitionError, TransitionResult},
    foundation::math::{round_half_even, to_u8_sat},
};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Copy a `width x height` window whose top-left corner is `(x, y)`.
///
/// Parts of the window outside `img` are black.
pub fn crop_padded(img: &Frame, x: i64, y: i64, width: u32, height: u32) -> Frame {
    let mut out = Frame::from_pixel(width, height, BLACK);
    let (src_w, src_h) = img.dimensions();

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(width)).min(i64::from(src_w));
    let y1 = (y + i64::from(height)).min(i64::from(src_h));
    if x0 >= x1 || y0 >= y1 {
        return out;
    }

    let row_len = ((x1 - x0) as usize) * 3;
    let src = img.as_raw();
    let dst_stride = width as usize * 3;
    let src_stride = src_w as usize * 3;
    let dst = &mut *out;
    for sy in y0..y1 {
        let dy = (sy - y) as usize;
        let dx = (x0 - x) as usize;
        let s = sy as usize * src_stride + x0 as usize * 3;
        let d = dy * dst_stride + dx * 3;
        dst[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
    }
    out
}

/// Crop an `original`-sized box at `origin`, given in fractions of `original`.
pub fn crop(img: &Frame, origin: CropOrigin, original: FrameSize) -> Frame {
    let x = round_half_even(origin.x * f64::from(original.width));
    let y = round_half_even(origin.y * f64::from(original.height));
    crop_padded(img, x, y, original.width, original.height)
}

/// Centred zoom: `zoom > 1` magnifies, `zoom < 1` shrinks with a black surround.
pub fn zoom(img: &Frame, zoom: f64) -> TransitionResult<Frame> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(TransitionError::render(format!(
            "zoom factor must be finite and > 0 (got {zoom})"
        )));
    }
    if zoom == 1.0 {
        return Ok(img.clone());
    }

    let (w, h) = img.dimensions();
    let box_w = ((f64::from(w) / zoom).round() as u32).max(1);
    let box_h = ((f64::from(h) / zoom).round() as u32).max(1);
    let x = ((f64::from(w) - f64::from(box_w)) / 2.0).round() as i64;
    let y = ((f64::from(h) - f64::from(box_h)) / 2.0).round() as i64;

    let window = crop_padded(img, x, y, box_w, box_h);
    Ok(imageops::resize(
        &window,
        w,
        h,
        imageops::FilterType::CatmullRom,
    ))
}

/// Rotate about the canvas centre by `degrees`, clockwise positive.
///
/// The canvas keeps its size; pixels that map outside the source are black.
pub fn rotate(img: &Frame, degrees: f64) -> TransitionResult<Frame> {
    if !degrees.is_finite() {
        return Err(TransitionError::render(format!(
            "rotation must be finite (got {degrees})"
        )));
    }
    if degrees == 0.0 {
        return Ok(img.clone());
    }

    let size = FrameSize::of(img);
    // y points down, so a positive angle turns content clockwise on screen.
    let forward = Affine::rotate_about(degrees.to_radians(), size.center());
    let inverse = forward.inverse();

    Ok(Frame::from_fn(size.width, size.height, |x, y| {
        let target = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let src = inverse * target;
        sample_bilinear(img, src)
    }))
}

/// Sample `img` at continuous coordinates (pixel `i` covers `[i, i + 1)`).
///
/// Points outside the image are black; neighbours past the border clamp to the edge.
pub fn sample_bilinear(img: &Frame, p: Point) -> Rgb<u8> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return BLACK;
    }
    if !(p.x >= 0.0 && p.y >= 0.0 && p.x <= f64::from(w) && p.y <= f64::from(h)) {
        return BLACK;
    }

    let fx = p.x - 0.5;
    let fy = p.y - 0.5;
    let x0f = fx.floor();
    let y0f = fy.floor();
    let tx = fx - x0f;
    let ty = fy - y0f;

    let max_x = i64::from(w) - 1;
    let max_y = i64::from(h) - 1;
    let x0 = (x0f as i64).clamp(0, max_x) as u32;
    let x1 = (x0f as i64 + 1).clamp(0, max_x) as u32;
    let y0 = (y0f as i64).clamp(0, max_y) as u32;
    let y1 = (y0f as i64 + 1).clamp(0, max_y) as u32;

    let p00 = img.get_pixel(x0, y0).0;
    let p10 = img.get_pixel(x1, y0).0;
    let p01 = img.get_pixel(x0, y1).0;
    let p11 = img.get_pixel(x1, y1).0;

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = f64::from(p00[c]) * (1.0 - tx) + f64::from(p10[c]) * tx;
        let bottom = f64::from(p01[c]) * (1.0 - tx) + f64::from(p11[c]) * tx;
        out[c] = to_u8_sat(top * (1.0 - ty) + bottom * ty);
    }
    Rgb(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/geometry.rs"]
mod tests;
