use crate::foundation::core::{FrameSize, Point, Vec2};

/// Side of a mesh cell in pixels.
pub const MESH_CELL: u32 = 20;

/// Nonlinear lens remap: each target pixel samples from a point pulled towards the centre
/// by `atan(r) / r`, where `r` is its distance from the centre over the correction radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PincushionDeformation {
    strength: f64,
    zoom: f64,
    auto_zoom: bool,
}

impl PincushionDeformation {
    /// Floor applied to non-positive strengths.
    pub const MIN_STRENGTH: f64 = 1e-5;

    /// Create a deformation. `strength <= 0` is replaced by [`Self::MIN_STRENGTH`].
    pub fn new(strength: f64, zoom: f64, auto_zoom: bool) -> Self {
        let strength = if strength <= 0.0 {
            Self::MIN_STRENGTH
        } else {
            strength
        };
        Self {
            strength,
            zoom,
            auto_zoom,
        }
    }

    /// Deformation used by the distortion effect: fixed unit zoom.
    pub fn for_effect(strength: f64) -> Self {
        Self::new(strength, 1.0, false)
    }

    /// Effective strength.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Whether the zoom is derived from the image size.
    pub fn auto_zoom(&self) -> bool {
        self.auto_zoom
    }

    /// Derive the per-size parameters.
    pub fn parameters_for(&self, size: FrameSize) -> LensParameters {
        let half_width = f64::from(size.width) / 2.0;
        let half_height = f64::from(size.height) / 2.0;
        let correction_radius =
            half_width.min(half_height) * 10.0 * (1.0 - self.strength).powi(2) + 1.0;

        let zoom = if self.auto_zoom {
            let r = half_width.hypot(half_height) / correction_radius;
            if r > 0.0 { r / r.atan() } else { 1.0 }
        } else {
            self.zoom
        };

        LensParameters {
            half_width,
            half_height,
            correction_radius,
            zoom,
        }
    }

    /// Pair every `MESH_CELL`-sized target cell with the source quad of its remapped corners.
    pub fn mesh(&self, size: FrameSize) -> Vec<MeshCell> {
        let params = self.parameters_for(size);
        let mut cells = Vec::new();
        for x0 in (0..size.width).step_by(MESH_CELL as usize) {
            let x1 = (x0 + MESH_CELL).min(size.width);
            for y0 in (0..size.height).step_by(MESH_CELL as usize) {
                let y1 = (y0 + MESH_CELL).min(size.height);
                let (fx0, fy0, fx1, fy1) = (
                    f64::from(x0),
                    f64::from(y0),
                    f64::from(x1),
                    f64::from(y1),
                );
                cells.push(MeshCell {
                    target: [x0, y0, x1, y1],
                    quad: [
                        params.source_coordinate(fx0, fy0),
                        params.source_coordinate(fx0, fy1),
                        params.source_coordinate(fx1, fy1),
                        params.source_coordinate(fx1, fy0),
                    ],
                });
            }
        }
        cells
    }

    /// Displacement of the border reference points for `size`.
    pub fn report(&self, size: FrameSize) -> LensReport {
        let params = self.parameters_for(size);
        let (w, h) = (f64::from(size.width), f64::from(size.height));
        let (hw, hh) = (params.half_width, params.half_height);
        let anchors = [
            ("top-left", 0.0, 0.0),
            ("top-center", hw, 0.0),
            ("top-right", w, 0.0),
            ("left", 0.0, hh),
            ("right", w, hh),
            ("bottom-left", 0.0, h),
            ("bottom-center", hw, h),
            ("bottom-right", w, h),
        ];
        let points = anchors
            .into_iter()
            .map(|(label, x, y)| ReferencePoint {
                label,
                target: Point::new(x, y),
                source: params.source_coordinate(x, y),
            })
            .collect();

        LensReport {
            size,
            strength: self.strength,
            auto_zoom: self.auto_zoom,
            zoom: params.zoom,
            points,
        }
    }
}

/// Parameters derived from one image size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensParameters {
    /// Half the image width.
    pub half_width: f64,
    /// Half the image height.
    pub half_height: f64,
    /// Distance scale of the `atan` falloff.
    pub correction_radius: f64,
    /// Zoom applied after the falloff.
    pub zoom: f64,
}

impl LensParameters {
    /// Source point sampled for target point `(x, y)`.
    pub fn source_coordinate(&self, x: f64, y: f64) -> Point {
        let d = Vec2::new(x - self.half_width, y - self.half_height);
        let r = d.hypot() / self.correction_radius;
        let theta = if r == 0.0 { 1.0 } else { r.atan() / r };
        let s = d * (theta * self.zoom);
        Point::new(self.half_width + s.x, self.half_height + s.y)
    }
}

/// One cell of a warp mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCell {
    /// Target rectangle `[x0, y0, x1, y1]`, end-exclusive.
    pub target: [u32; 4],
    /// Source quad corners: upper-left, lower-left, lower-right, upper-right.
    pub quad: [Point; 4],
}

/// Where one border reference point samples from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePoint {
    /// Position name.
    pub label: &'static str,
    /// Target position.
    pub target: Point,
    /// Sampled source position.
    pub source: Point,
}

/// Lens debug report.
#[derive(Clone, Debug, PartialEq)]
pub struct LensReport {
    /// Image size the report was computed for.
    pub size: FrameSize,
    /// Effective strength.
    pub strength: f64,
    /// Whether the zoom was derived.
    pub auto_zoom: bool,
    /// Zoom in use.
    pub zoom: f64,
    /// The eight border reference points.
    pub points: Vec<ReferencePoint>,
}

impl std::fmt::Display for LensReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "lens distortion report, image size {}", self.size)?;
        let mode = if self.auto_zoom { "auto" } else { "fixed" };
        writeln!(
            f,
            "strength {:.0}%, {mode} zoom {:.0}%",
            self.strength * 100.0,
            self.zoom * 100.0
        )?;
        for p in &self.points {
            writeln!(
                f,
                "* {:<13} [x:{:<6.1}, y:{:<6.1}] => [{:<4.0}, {:<4.0}]",
                p.label, p.source.x, p.source.y, p.target.x, p.target.y
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/lens.rs"]
mod tests;
