use crate::{
    animation::action::{Effect, EffectKind, Phase},
    effects::{geometry, mirror, photometric, warp},
    foundation::core::{Frame, FrameSize, PhaseId},
    foundation::error::{TransitionError, TransitionResult},
};

/// Position of one effect step inside a phase render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepInfo {
    /// Phase being rendered.
    pub phase: PhaseId,
    /// Frame index within the phase.
    pub frame_index: usize,
    /// Index of the action within the phase.
    pub step_index: usize,
    /// Effect kind of the action.
    pub kind: EffectKind,
    /// `true` for the last action of the phase.
    pub is_final: bool,
}

/// Receives every intermediate frame of a phase render.
///
/// Observers are shared between worker threads and must not rely on call order across frames.
pub trait FrameObserver: Sync {
    /// Called after each effect step with the image it produced.
    fn on_step(&self, step: &StepInfo, image: &Frame) -> TransitionResult<()>;
}

/// Apply one effect. `original` is the frame size before any effect of the chain ran.
pub fn apply_effect(img: &Frame, effect: Effect, original: FrameSize) -> TransitionResult<Frame> {
    match effect {
        Effect::Mirror(direction) => Ok(mirror::mirror_tile(img, direction)),
        Effect::Zoom(z) => geometry::zoom(img, z),
        Effect::Rotation(deg) => geometry::rotate(img, deg),
        Effect::Crop(origin) => Ok(geometry::crop(img, origin, original)),
        Effect::Blur(v) => photometric::blur(img, v),
        Effect::Distortion(v) => warp::distort(img, v),
        Effect::Brightness(v) => photometric::brightness(img, v),
    }
}

/// Apply every action of `phase` at `frame_index` to `img`, in application order.
pub fn apply_phase(
    img: &Frame,
    phase: &Phase,
    phase_id: PhaseId,
    frame_index: usize,
    observer: Option<&dyn FrameObserver>,
) -> TransitionResult<Frame> {
    let original = FrameSize::of(img);
    if original.is_empty() {
        return Err(TransitionError::render(format!(
            "{phase_id} frame {frame_index} is empty"
        )));
    }

    let effects = phase.effects_at(frame_index)?;
    let last = effects.len().saturating_sub(1);
    let mut current = img.clone();
    for (step_index, effect) in effects.into_iter().enumerate() {
        tracing::debug!(
            "{phase_id} - frame [{}/{}] - action [{effect}]",
            frame_index + 1,
            phase.frame_count()
        );
        current = apply_effect(&current, effect, original)?;
        if let Some(observer) = observer {
            let step = StepInfo {
                phase: phase_id,
                frame_index,
                step_index,
                kind: effect.kind(),
                is_final: step_index == last,
            };
            observer.on_step(&step, &current)?;
        }
    }
    Ok(current)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/engine.rs"]
mod tests;
