use crate::foundation::error::{TransitionError, TransitionResult};

pub use kurbo::{Affine, Point, Vec2};

/// 8-bit RGB frame, the pixel format every effect reads and writes.
pub type Frame = image::RgbImage;

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> TransitionResult<Self> {
        if den == 0 {
            return Err(TransitionError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TransitionError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Fallback used when a clip does not report its frame rate.
    pub const FALLBACK: Self = Self { num: 30, den: 1 };

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Parse an ffmpeg-style ratio (`"30000/1001"`) or plain number (`"25"`).
    pub fn parse_ratio(s: &str) -> Option<Self> {
        let s = s.trim();
        let (num, den) = match s.split_once('/') {
            Some((n, d)) => (n.trim().parse::<u32>().ok()?, d.trim().parse::<u32>().ok()?),
            None => (s.parse::<u32>().ok()?, 1),
        };
        Self::new(num, den).ok()
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Pixel dimensions of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a size value.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of an `image` buffer.
    pub fn of<I: image::GenericImageView>(img: &I) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Centre point in continuous pixel coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One half of a transition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    /// Tail frames of the outgoing clip.
    Phase1,
    /// Head frames of the incoming clip.
    Phase2,
}

impl PhaseId {
    /// Both phases in playback order.
    pub const ALL: [PhaseId; 2] = [PhaseId::Phase1, PhaseId::Phase2];

    /// 1-based phase number used in file and folder names.
    pub fn number(self) -> u32 {
        match self {
            Self::Phase1 => 1,
            Self::Phase2 => 2,
        }
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "phase{}", self.number())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
