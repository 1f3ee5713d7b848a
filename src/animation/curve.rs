use crate::foundation::error::{TransitionError, TransitionResult};

/// Default exponent of the polynomial curve kinds.
pub const DEFAULT_STEEPNESS: f64 = 3.0;

/// Shape of an [`InterpolationCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Straight line through both boundary points.
    Linear,
    /// `c1 * (x - a)^s + c2`: slow start, fast finish.
    Polynomial,
    /// `c1 * (x - a)^(1/s) + c2`: fast start, slow finish.
    PolynomialInverse,
}

impl CurveKind {
    /// Kind used for the time-mirrored ramp of the opposite phase.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Linear => Self::Linear,
            Self::Polynomial => Self::PolynomialInverse,
            Self::PolynomialInverse => Self::Polynomial,
        }
    }

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Polynomial => "polynomial",
            Self::PolynomialInverse => "polynomial_inverse",
        }
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed-form mapping from a frame index to an effect intensity.
///
/// The curve passes through `(a, f_a)` and `(b, f_b)`. Inputs at or beyond either boundary
/// return the boundary value exactly, independent of what the algebra would produce there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolationCurve {
    kind: CurveKind,
    a: f64,
    f_a: f64,
    b: f64,
    f_b: f64,
    exponent: f64,
    c1: f64,
    c2: f64,
}

impl InterpolationCurve {
    /// Build a curve through `(a, f_a)` and `(b, f_b)`.
    ///
    /// `steepness` is the polynomial exponent (ignored for [`CurveKind::Linear`]).
    pub fn new(
        kind: CurveKind,
        (a, f_a): (f64, f64),
        (b, f_b): (f64, f64),
        steepness: f64,
    ) -> TransitionResult<Self> {
        if !(a.is_finite() && b.is_finite() && f_a.is_finite() && f_b.is_finite()) {
            return Err(TransitionError::validation(
                "interpolation bounds and values must be finite",
            ));
        }
        if a < 0.0 {
            return Err(TransitionError::validation(format!(
                "interpolation start must be >= 0 (got {a})"
            )));
        }
        if a >= b {
            return Err(TransitionError::validation(format!(
                "interpolation start must be < end (got a={a}, b={b})"
            )));
        }
        if !steepness.is_finite() || steepness <= 0.0 {
            return Err(TransitionError::validation(format!(
                "interpolation steepness must be finite and > 0 (got {steepness})"
            )));
        }

        let (exponent, c1, c2) = match kind {
            CurveKind::Linear => {
                let c1 = (f_b - f_a) / (b - a);
                (1.0, c1, f_a - c1 * a)
            }
            CurveKind::Polynomial => (steepness, (f_b - f_a) / (b - a).powf(steepness), f_a),
            CurveKind::PolynomialInverse => {
                let e = 1.0 / steepness;
                (e, (f_b - f_a) / (b - a).powf(e), f_a)
            }
        };

        Ok(Self {
            kind,
            a,
            f_a,
            b,
            f_b,
            exponent,
            c1,
            c2,
        })
    }

    /// Curve over frame indices `0..len` with the default steepness.
    pub fn over_frames(kind: CurveKind, from: f64, to: f64, len: usize) -> TransitionResult<Self> {
        let last = len.saturating_sub(1) as f64;
        Self::new(kind, (0.0, from), (last, to), DEFAULT_STEEPNESS)
    }

    /// Shape of this curve.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Evaluate at `x`, clamping to the boundary values outside `(a, b)`.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x <= self.a {
            return self.f_a;
        }
        if x >= self.b {
            return self.f_b;
        }
        match self.kind {
            CurveKind::Linear => self.c1 * x + self.c2,
            CurveKind::Polynomial | CurveKind::PolynomialInverse => {
                self.c1 * (x - self.a).powf(self.exponent) + self.c2
            }
        }
    }

    /// Evaluate a sequence of integer inputs.
    pub fn evaluate_many(&self, xs: &[i64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x as f64)).collect()
    }

    /// Evaluate at `0, 1, .., len - 1`.
    pub fn sample(&self, len: usize) -> Vec<f64> {
        (0..len).map(|x| self.evaluate(x as f64)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
