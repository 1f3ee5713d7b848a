use crate::{
    effects::geometry::sample_bilinear,
    effects::lens::{MeshCell, PincushionDeformation},
    foundation::core::{Frame, FrameSize, Point},
    foundation::error::{TransitionError, TransitionResult},
};

/// Render a `size` frame by mapping each mesh cell onto its source quad.
///
/// Target pixel centres are placed bilinearly inside the quad and the source is sampled
/// bilinearly. Pixels not covered by any cell stay black.
pub fn warp_mesh(src: &Frame, size: FrameSize, cells: &[MeshCell]) -> TransitionResult<Frame> {
    let mut out = Frame::new(size.width, size.height);
    for cell in cells {
        let [x0, y0, x1, y1] = cell.target;
        if x1 > size.width || y1 > size.height || x0 >= x1 || y0 >= y1 {
            return Err(TransitionError::render(format!(
                "mesh cell {:?} does not fit a {size} frame",
                cell.target
            )));
        }
        let [ul, ll, lr, ur] = cell.quad;
        let cw = f64::from(x1 - x0);
        let ch = f64::from(y1 - y0);
        for y in y0..y1 {
            let v = (f64::from(y - y0) + 0.5) / ch;
            let left = ul.lerp(ll, v);
            let right = ur.lerp(lr, v);
            for x in x0..x1 {
                let u = (f64::from(x - x0) + 0.5) / cw;
                let p: Point = left.lerp(right, u);
                out.put_pixel(x, y, sample_bilinear(src, p));
            }
        }
    }
    Ok(out)
}

/// Lens distortion of strength `value` at unit zoom.
pub fn distort(img: &Frame, value: f64) -> TransitionResult<Frame> {
    if !value.is_finite() {
        return Err(TransitionError::render(format!(
            "distortion strength must be finite (got {value})"
        )));
    }
    let size = FrameSize::of(img);
    let lens = PincushionDeformation::for_effect(value);
    warp_mesh(img, size, &lens.mesh(size))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/warp.rs"]
mod tests;
