use crate::{
    animation::curve::CurveKind,
    foundation::error::{TransitionError, TransitionResult},
};

/// Effect kinds, declared in the order they are applied to a frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Tile the frame with flipped copies of itself.
    Mirror,
    /// Centred zoom in/out.
    Zoom,
    /// Rotation about the canvas centre.
    Rotation,
    /// Crop back to the original frame size.
    Crop,
    /// Gaussian blur.
    Blur,
    /// Pincushion lens distortion.
    Distortion,
    /// Brightness multiplier.
    Brightness,
}

impl EffectKind {
    /// All kinds in application order.
    pub const ORDER: [EffectKind; 7] = [
        EffectKind::Mirror,
        EffectKind::Zoom,
        EffectKind::Rotation,
        EffectKind::Crop,
        EffectKind::Blur,
        EffectKind::Distortion,
        EffectKind::Brightness,
    ];

    /// Stable snake_case name, used in logs and debug folder names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mirror => "mirror",
            Self::Zoom => "zoom",
            Self::Rotation => "rotation",
            Self::Crop => "crop",
            Self::Blur => "blur",
            Self::Distortion => "distortion",
            Self::Brightness => "brightness",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Layout of the mirrored tiles produced by the mirror effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorDirection {
    /// 3x3 grid with the original in the middle.
    AllDirections1,
    /// 2x1: mirrored copy on the left.
    Left1,
    /// 2x1: mirrored copy on the right.
    Right1,
    /// 4x1 starting with a mirrored copy.
    Left3,
    /// 4x1 starting with the original.
    Right3,
}

impl MirrorDirection {
    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AllDirections1 => "all_directions_1",
            Self::Left1 => "left_1",
            Self::Right1 => "right_1",
            Self::Left3 => "left_3",
            Self::Right3 => "right_3",
        }
    }
}

/// Top-left corner of the crop box, in fractions of the original (pre-mirror) frame size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropOrigin {
    /// Horizontal offset in frame widths.
    pub x: f64,
    /// Vertical offset in frame heights.
    pub y: f64,
}

impl CropOrigin {
    /// Create a crop origin.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The centre tile of a 3x3 mirror grid.
    pub const CENTER_TILE: Self = Self::new(1.0, 1.0);
}

/// Per-frame values of one action, one variant per effect kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ActionValues {
    /// Mirror layouts.
    Mirror(Vec<MirrorDirection>),
    /// Zoom factors (`> 1` zooms in).
    Zoom(Vec<f64>),
    /// Rotation in degrees, positive is clockwise.
    Rotation(Vec<f64>),
    /// Crop origins.
    Crop(Vec<CropOrigin>),
    /// Blur strength as a fraction of the smaller image side.
    Blur(Vec<f64>),
    /// Lens distortion strength.
    Distortion(Vec<f64>),
    /// Brightness multipliers.
    Brightness(Vec<f64>),
}

impl ActionValues {
    /// Effect kind of these values.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Mirror(_) => EffectKind::Mirror,
            Self::Zoom(_) => EffectKind::Zoom,
            Self::Rotation(_) => EffectKind::Rotation,
            Self::Crop(_) => EffectKind::Crop,
            Self::Blur(_) => EffectKind::Blur,
            Self::Distortion(_) => EffectKind::Distortion,
            Self::Brightness(_) => EffectKind::Brightness,
        }
    }

    /// Number of frames covered.
    pub fn len(&self) -> usize {
        match self {
            Self::Mirror(v) => v.len(),
            Self::Crop(v) => v.len(),
            Self::Zoom(v)
            | Self::Rotation(v)
            | Self::Blur(v)
            | Self::Distortion(v)
            | Self::Brightness(v) => v.len(),
        }
    }

    /// Return `true` when no frame is covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar values for the scalar kinds, `None` for mirror and crop.
    pub fn scalars(&self) -> Option<&[f64]> {
        match self {
            Self::Mirror(_) | Self::Crop(_) => None,
            Self::Zoom(v)
            | Self::Rotation(v)
            | Self::Blur(v)
            | Self::Distortion(v)
            | Self::Brightness(v) => Some(v),
        }
    }
}

/// A single effect with its value for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Tile with mirrored copies.
    Mirror(MirrorDirection),
    /// Zoom by a factor.
    Zoom(f64),
    /// Rotate by degrees (clockwise positive).
    Rotation(f64),
    /// Crop an original-sized box at the origin.
    Crop(CropOrigin),
    /// Gaussian blur strength.
    Blur(f64),
    /// Lens distortion strength.
    Distortion(f64),
    /// Brightness multiplier.
    Brightness(f64),
}

impl Effect {
    /// Kind of this effect.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Mirror(_) => EffectKind::Mirror,
            Self::Zoom(_) => EffectKind::Zoom,
            Self::Rotation(_) => EffectKind::Rotation,
            Self::Crop(_) => EffectKind::Crop,
            Self::Blur(_) => EffectKind::Blur,
            Self::Distortion(_) => EffectKind::Distortion,
            Self::Brightness(_) => EffectKind::Brightness,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mirror(d) => write!(f, "mirror => {}", d.name()),
            Self::Crop(o) => write!(f, "crop => ({:.1}%, {:.1}%)", o.x * 100.0, o.y * 100.0),
            Self::Zoom(v)
            | Self::Rotation(v)
            | Self::Blur(v)
            | Self::Distortion(v)
            | Self::Brightness(v) => write!(f, "{} => {v}", self.kind()),
        }
    }
}

/// One effect's per-frame parameter sequence for a phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameAction {
    /// Per-frame values.
    pub values: ActionValues,
    /// Shape of the last ramp that produced the values, `None` for constant actions.
    pub curve: Option<CurveKind>,
}

impl FrameAction {
    /// Action whose values do not come from a curve.
    pub fn constant(values: ActionValues) -> Self {
        Self {
            values,
            curve: None,
        }
    }

    /// Action whose values were produced by a `curve` ramp.
    pub fn curved(values: ActionValues, curve: CurveKind) -> Self {
        Self {
            values,
            curve: Some(curve),
        }
    }

    /// Effect kind of this action.
    pub fn kind(&self) -> EffectKind {
        self.values.kind()
    }

    /// Number of frames covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` when no frame is covered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The effect for frame `idx`, or `None` when out of range.
    pub fn effect_at(&self, idx: usize) -> Option<Effect> {
        Some(match &self.values {
            ActionValues::Mirror(v) => Effect::Mirror(*v.get(idx)?),
            ActionValues::Zoom(v) => Effect::Zoom(*v.get(idx)?),
            ActionValues::Rotation(v) => Effect::Rotation(*v.get(idx)?),
            ActionValues::Crop(v) => Effect::Crop(*v.get(idx)?),
            ActionValues::Blur(v) => Effect::Blur(*v.get(idx)?),
            ActionValues::Distortion(v) => Effect::Distortion(*v.get(idx)?),
            ActionValues::Brightness(v) => Effect::Brightness(*v.get(idx)?),
        })
    }
}

/// Ordered actions applied to every frame of one phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<FrameAction>", into = "Vec<FrameAction>")]
pub struct Phase {
    actions: Vec<FrameAction>,
    frame_count: usize,
}

impl Phase {
    /// Build a phase, sorting actions into application order.
    ///
    /// Fails when the list is empty, when two actions share a kind, or when action lengths
    /// differ.
    pub fn new(mut actions: Vec<FrameAction>) -> TransitionResult<Self> {
        let Some(first) = actions.first() else {
            return Err(TransitionError::validation(
                "a phase needs at least one action",
            ));
        };
        let frame_count = first.len();
        if frame_count == 0 {
            return Err(TransitionError::validation(
                "phase actions must cover at least one frame",
            ));
        }
        for action in &actions {
            if action.len() != frame_count {
                return Err(TransitionError::validation(format!(
                    "phase action '{}' covers {} frames, expected {frame_count}",
                    action.kind(),
                    action.len()
                )));
            }
        }

        actions.sort_by_key(FrameAction::kind);
        if let Some(dup) = actions.windows(2).find(|w| w[0].kind() == w[1].kind()) {
            return Err(TransitionError::validation(format!(
                "phase has more than one '{}' action",
                dup[0].kind()
            )));
        }

        Ok(Self {
            actions,
            frame_count,
        })
    }

    /// Actions in application order.
    pub fn actions(&self) -> &[FrameAction] {
        &self.actions
    }

    /// Number of frames in this phase.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Active effect kinds in application order.
    pub fn kinds(&self) -> Vec<EffectKind> {
        self.actions.iter().map(FrameAction::kind).collect()
    }

    /// The action of `kind`, if active.
    pub fn action(&self, kind: EffectKind) -> Option<&FrameAction> {
        self.actions.iter().find(|a| a.kind() == kind)
    }

    /// Effects for frame `idx` in application order.
    pub fn effects_at(&self, idx: usize) -> TransitionResult<Vec<Effect>> {
        if idx >= self.frame_count {
            return Err(TransitionError::render(format!(
                "frame index {idx} is outside the phase ({} frames)",
                self.frame_count
            )));
        }
        Ok(self
            .actions
            .iter()
            .filter_map(|a| a.effect_at(idx))
            .collect())
    }
}

impl TryFrom<Vec<FrameAction>> for Phase {
    type Error = TransitionError;

    fn try_from(actions: Vec<FrameAction>) -> TransitionResult<Self> {
        Self::new(actions)
    }
}

impl From<Phase> for Vec<FrameAction> {
    fn from(phase: Phase) -> Self {
        phase.actions
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
