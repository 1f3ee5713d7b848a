use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{TransitionError, TransitionResult};

/// Smallest accepted frame count per phase.
pub const MIN_NUM_FRAMES: usize = 2;
/// Largest accepted frame count per phase.
pub const MAX_NUM_FRAMES: usize = 100;

/// Transition animation family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationFamily {
    /// Clockwise rotation through a mirrored 3x3 grid.
    #[default]
    Rotation,
    /// Anticlockwise rotation.
    #[serde(alias = "rotation_inv")]
    RotationInverse,
    /// Zoom into the outgoing clip, out of the incoming one.
    ZoomIn,
    /// Zoom out of the outgoing clip, into the incoming one.
    ZoomOut,
    /// Slide left to right through a mirrored copy.
    Translation,
    /// Slide right to left.
    #[serde(alias = "translation_inv")]
    TranslationInverse,
    /// Slide left to right across three mirrored copies of the incoming clip.
    LongTranslation,
    /// Slide right to left across three mirrored copies.
    #[serde(alias = "long_translation_inv")]
    LongTranslationInverse,
}

impl AnimationFamily {
    /// Every family, in the order they are listed to users.
    pub const ALL: [AnimationFamily; 8] = [
        AnimationFamily::Rotation,
        AnimationFamily::RotationInverse,
        AnimationFamily::ZoomIn,
        AnimationFamily::ZoomOut,
        AnimationFamily::Translation,
        AnimationFamily::TranslationInverse,
        AnimationFamily::LongTranslation,
        AnimationFamily::LongTranslationInverse,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::RotationInverse => "rotation_inverse",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::Translation => "translation",
            Self::TranslationInverse => "translation_inverse",
            Self::LongTranslation => "long_translation",
            Self::LongTranslationInverse => "long_translation_inverse",
        }
    }

    /// Human readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Rotation => "clockwise rotation",
            Self::RotationInverse => "anticlockwise rotation",
            Self::ZoomIn => "zoom in",
            Self::ZoomOut => "zoom out",
            Self::Translation => "translation (left to right)",
            Self::TranslationInverse => "translation (right to left)",
            Self::LongTranslation => "long translation (left to right)",
            Self::LongTranslationInverse => "long translation (right to left)",
        }
    }

    /// Phase 2 length as a multiple of the phase 1 length.
    pub fn phase2_multiplier(self) -> usize {
        match self {
            Self::LongTranslation | Self::LongTranslationInverse => 2,
            _ => 1,
        }
    }

    /// Frames consumed from each clip for `num_frames`.
    pub fn frames_needed(self, num_frames: usize) -> (usize, usize) {
        (num_frames, num_frames * self.phase2_multiplier())
    }
}

impl std::fmt::Display for AnimationFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AnimationFamily {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let family = match normalized.as_str() {
            "rotation" => Self::Rotation,
            "rotation_inverse" | "rotation_inv" => Self::RotationInverse,
            "zoom_in" => Self::ZoomIn,
            "zoom_out" => Self::ZoomOut,
            "translation" => Self::Translation,
            "translation_inverse" | "translation_inv" => Self::TranslationInverse,
            "long_translation" => Self::LongTranslation,
            "long_translation_inverse" | "long_translation_inv" => Self::LongTranslationInverse,
            _ => {
                let known = Self::ALL.map(Self::name).join(", ");
                return Err(TransitionError::validation(format!(
                    "unknown animation '{s}' (expected one of: {known})"
                )));
            }
        };
        Ok(family)
    }
}

/// Range in which an effect magnitude activates the effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectLimit {
    /// Lower bound.
    pub min: f64,
    /// Upper bound (always inclusive).
    pub max: f64,
    /// Whether `min` itself activates the effect.
    pub min_inclusive: bool,
}

impl EffectLimit {
    /// Rotation in degrees, `(5, 90]`.
    pub const ROTATION: Self = Self::new(5.0, 90.0, false);
    /// Blur fraction, `(0.005, 1]`.
    pub const BLUR: Self = Self::new(0.005, 1.0, false);
    /// Lens strength, `(0.3, 1]`.
    pub const DISTORTION: Self = Self::new(0.3, 1.0, false);
    /// Zoom factor, `[1.2, 2]`.
    pub const ZOOM: Self = Self::new(1.2, 2.0, true);
    /// Brightness multiplier, `(0, 2]`. The planner also skips the no-op value `1`.
    pub const BRIGHTNESS: Self = Self::new(0.0, 2.0, false);

    const fn new(min: f64, max: f64, min_inclusive: bool) -> Self {
        Self {
            min,
            max,
            min_inclusive,
        }
    }

    /// Return `true` when `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && value <= self.max
    }
}

impl std::fmt::Display for EffectLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        write!(f, "{open}{}, {}]", self.min, self.max)
    }
}

/// User-facing transition configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Frames per phase (phase 2 of the long translations uses twice as many).
    pub num_frames: usize,
    /// Animation family.
    pub animation: AnimationFamily,
    /// Peak rotation in degrees.
    pub max_rotation: f64,
    /// Peak lens distortion strength.
    pub max_distortion: f64,
    /// Peak blur as a fraction of the smaller image side.
    pub max_blur: f64,
    /// Peak brightness multiplier.
    pub max_brightness: f64,
    /// Peak zoom factor.
    pub max_zoom: f64,
    /// Write intermediate frames and a log file.
    pub debug: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            num_frames: 10,
            animation: AnimationFamily::Rotation,
            max_rotation: 45.0,
            max_distortion: 0.7,
            max_blur: 0.2,
            max_brightness: 1.0,
            max_zoom: 2.0,
            debug: false,
        }
    }
}

impl TransitionConfig {
    /// Parse a JSON configuration. Missing fields take their default value.
    pub fn from_json_str(s: &str) -> TransitionResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TransitionError::serde(format!("invalid transition config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_path(path: &Path) -> TransitionResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read transition config {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check the configuration before any frame is processed.
    ///
    /// Magnitudes outside their activation range are not errors; the planner drops those
    /// effects. Non-finite magnitudes are.
    pub fn validate(&self) -> TransitionResult<()> {
        if !(MIN_NUM_FRAMES..=MAX_NUM_FRAMES).contains(&self.num_frames) {
            return Err(TransitionError::validation(format!(
                "num_frames must be in [{MIN_NUM_FRAMES}, {MAX_NUM_FRAMES}] (got {})",
                self.num_frames
            )));
        }
        for (name, v) in [
            ("max_rotation", self.max_rotation),
            ("max_distortion", self.max_distortion),
            ("max_blur", self.max_blur),
            ("max_brightness", self.max_brightness),
            ("max_zoom", self.max_zoom),
        ] {
            if !v.is_finite() {
                return Err(TransitionError::validation(format!(
                    "{name} must be finite (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// Frames consumed from each clip.
    pub fn frames_needed(&self) -> (usize, usize) {
        self.animation.frames_needed(self.num_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/config.rs"]
mod tests;
