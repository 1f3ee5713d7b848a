use image::imageops;

use crate::{
    foundation::core::Frame,
    foundation::error::{TransitionError, TransitionResult},
    foundation::math::to_u8_sat,
};

/// Blur sigma for a strength `value`: a tenth of `value` times the smaller image side.
pub fn blur_sigma(img: &Frame, value: f64) -> f64 {
    let (w, h) = img.dimensions();
    f64::from(w.min(h)) * value * 0.1
}

/// Gaussian blur scaled to the image size. Non-positive strengths leave the frame untouched.
pub fn blur(img: &Frame, value: f64) -> TransitionResult<Frame> {
    if !value.is_finite() {
        return Err(TransitionError::render(format!(
            "blur strength must be finite (got {value})"
        )));
    }
    let sigma = blur_sigma(img, value);
    if sigma <= 0.0 {
        return Ok(img.clone());
    }
    Ok(imageops::fast_blur(img, sigma as f32))
}

/// Multiply every channel by `factor`, saturating at 255.
pub fn brightness(img: &Frame, factor: f64) -> TransitionResult<Frame> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(TransitionError::render(format!(
            "brightness factor must be finite and >= 0 (got {factor})"
        )));
    }
    if factor == 1.0 {
        return Ok(img.clone());
    }
    let mut out = img.clone();
    for c in out.iter_mut() {
        *c = to_u8_sat(f64::from(*c) * factor);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/photometric.rs"]
mod tests;
