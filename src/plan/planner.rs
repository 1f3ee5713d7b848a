use crate::{
    animation::action::{
        ActionValues, CropOrigin, EffectKind, FrameAction, MirrorDirection, Phase,
    },
    animation::curve::{CurveKind, InterpolationCurve},
    foundation::core::PhaseId,
    foundation::error::TransitionResult,
    foundation::math::frames_fraction,
    plan::config::{AnimationFamily, EffectLimit, TransitionConfig},
};

/// Both phases of a transition, fully computed before any frame is touched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionPlan {
    /// Family the plan was built for.
    pub family: AnimationFamily,
    /// Frames per phase as configured.
    pub num_frames: usize,
    /// Actions applied to the tail of the outgoing clip.
    pub phase1: Phase,
    /// Actions applied to the head of the incoming clip.
    pub phase2: Phase,
}

impl TransitionPlan {
    /// Phase by id.
    pub fn phase(&self, id: PhaseId) -> &Phase {
        match id {
            PhaseId::Phase1 => &self.phase1,
            PhaseId::Phase2 => &self.phase2,
        }
    }

    /// Frames consumed from each clip.
    pub fn frames_needed(&self) -> (usize, usize) {
        (self.phase1.frame_count(), self.phase2.frame_count())
    }

    /// Largest value of a scalar effect over both phases, `None` when the effect is inactive.
    pub fn peak(&self, kind: EffectKind) -> Option<f64> {
        PhaseId::ALL
            .iter()
            .filter_map(|&id| self.phase(id).action(kind))
            .filter_map(|a| a.values.scalars())
            .flatten()
            .copied()
            .reduce(f64::max)
    }

    /// Log the activated effects (info) and every action's values (debug).
    pub fn log_summary(&self) {
        tracing::info!(
            animation = %self.family,
            "transition animation type: [{}]",
            self.family.description()
        );
        for id in PhaseId::ALL {
            let phase = self.phase(id);
            let names: Vec<&str> = phase.kinds().into_iter().map(EffectKind::name).collect();
            tracing::info!(
                "{id} activated effects ({} frames): [{}]",
                phase.frame_count(),
                names.join(", ")
            );
            for action in phase.actions() {
                let curve = action.curve.map_or("constant", CurveKind::name);
                tracing::debug!(
                    "{id} {} ({curve}): {}",
                    action.kind(),
                    format_values(&action.values)
                );
            }
        }
    }
}

fn format_values(values: &ActionValues) -> String {
    let items: Vec<String> = match values {
        ActionValues::Mirror(v) => v.iter().map(|d| d.name().to_owned()).collect(),
        ActionValues::Crop(v) => v
            .iter()
            .map(|o| format!("({:.3}, {:.3})", o.x, o.y))
            .collect(),
        ActionValues::Rotation(v) => v.iter().map(|x| format!("{x:.1}")).collect(),
        ActionValues::Zoom(v)
        | ActionValues::Blur(v)
        | ActionValues::Distortion(v)
        | ActionValues::Brightness(v) => v.iter().map(|x| format!("{:.1}%", x * 100.0)).collect(),
    };
    format!("[{}]", items.join(", "))
}

/// Build the transition plan for `cfg`.
///
/// Effects whose magnitude falls outside its activation range are left out of both phases.
#[tracing::instrument(skip(cfg), fields(animation = %cfg.animation, num_frames = cfg.num_frames))]
pub fn plan(cfg: &TransitionConfig) -> TransitionResult<TransitionPlan> {
    cfg.validate()?;
    let (phase1, phase2) = match cfg.animation {
        AnimationFamily::Rotation => rotation_actions(cfg, true)?,
        AnimationFamily::RotationInverse => rotation_actions(cfg, false)?,
        AnimationFamily::ZoomIn => zoom_actions(cfg, true)?,
        AnimationFamily::ZoomOut => zoom_actions(cfg, false)?,
        AnimationFamily::Translation => translation_actions(cfg, true)?,
        AnimationFamily::TranslationInverse => translation_actions(cfg, false)?,
        AnimationFamily::LongTranslation => long_translation_actions(cfg, true)?,
        AnimationFamily::LongTranslationInverse => long_translation_actions(cfg, false)?,
    };
    Ok(TransitionPlan {
        family: cfg.animation,
        num_frames: cfg.num_frames,
        phase1: Phase::new(phase1)?,
        phase2: Phase::new(phase2)?,
    })
}

type ActionLists = (Vec<FrameAction>, Vec<FrameAction>);

fn rotation_actions(cfg: &TransitionConfig, clockwise: bool) -> TransitionResult<ActionLists> {
    let n = cfg.num_frames;
    let mut p1 = vec![mirror(MirrorDirection::AllDirections1, n)];
    let mut p2 = vec![mirror(MirrorDirection::AllDirections1, n)];

    if active(EffectKind::Rotation, cfg.max_rotation, EffectLimit::ROTATION) {
        let peak = if clockwise {
            cfg.max_rotation
        } else {
            -cfg.max_rotation
        };
        p1.push(FrameAction::curved(
            ActionValues::Rotation(ramp(CurveKind::Polynomial, 0.0, peak, n, PhaseId::Phase1)?),
            CurveKind::Polynomial,
        ));
        p2.push(FrameAction::curved(
            ActionValues::Rotation(ramp(
                CurveKind::PolynomialInverse,
                -peak,
                0.0,
                n,
                PhaseId::Phase2,
            )?),
            CurveKind::PolynomialInverse,
        ));
    }

    p1.push(center_crop(n));
    p2.push(center_crop(n));
    symmetric_photometric(cfg, &mut p1, &mut p2)?;
    Ok((p1, p2))
}

fn zoom_actions(cfg: &TransitionConfig, inward: bool) -> TransitionResult<ActionLists> {
    let n = cfg.num_frames;
    let mut p1 = vec![mirror(MirrorDirection::AllDirections1, n)];
    let mut p2 = vec![mirror(MirrorDirection::AllDirections1, n)];

    if active(EffectKind::Zoom, cfg.max_zoom, EffectLimit::ZOOM) {
        let (z1, z2) = if inward {
            (cfg.max_zoom, 1.0 / cfg.max_zoom)
        } else {
            (1.0 / cfg.max_zoom, cfg.max_zoom)
        };
        p1.push(FrameAction::curved(
            ActionValues::Zoom(ramp(CurveKind::Polynomial, 1.0, z1, n, PhaseId::Phase1)?),
            CurveKind::Polynomial,
        ));
        p2.push(FrameAction::curved(
            ActionValues::Zoom(ramp(
                CurveKind::PolynomialInverse,
                z2,
                1.0,
                n,
                PhaseId::Phase2,
            )?),
            CurveKind::PolynomialInverse,
        ));
    }

    p1.push(center_crop(n));
    p2.push(center_crop(n));
    symmetric_photometric(cfg, &mut p1, &mut p2)?;
    Ok((p1, p2))
}

fn translation_actions(cfg: &TransitionConfig, left_to_right: bool) -> TransitionResult<ActionLists> {
    let n = cfg.num_frames;
    let (dir1, dir2, from, to) = if left_to_right {
        (MirrorDirection::Right1, MirrorDirection::Left1, 0.0, 1.0)
    } else {
        (MirrorDirection::Left1, MirrorDirection::Right1, 1.0, 0.0)
    };

    let mut p1 = vec![
        mirror(dir1, n),
        horizontal_crop(
            ramp(CurveKind::Polynomial, from, to, n, PhaseId::Phase1)?,
            CurveKind::Polynomial,
        ),
    ];
    let mut p2 = vec![
        mirror(dir2, n),
        horizontal_crop(
            ramp(CurveKind::PolynomialInverse, from, to, n, PhaseId::Phase2)?,
            CurveKind::PolynomialInverse,
        ),
    ];
    symmetric_photometric(cfg, &mut p1, &mut p2)?;
    Ok((p1, p2))
}

fn long_translation_actions(
    cfg: &TransitionConfig,
    left_to_right: bool,
) -> TransitionResult<ActionLists> {
    let n = cfg.num_frames;
    let n2 = n * AnimationFamily::LongTranslation.phase2_multiplier();
    let p30 = frames_fraction(n, 0.3);
    let p50 = frames_fraction(n, 0.5);

    let (dir1, dir2, crop1, crop2) = if left_to_right {
        (
            MirrorDirection::Right1,
            MirrorDirection::Left3,
            (0.0, 1.0),
            (0.0, 3.0),
        )
    } else {
        (
            MirrorDirection::Left1,
            MirrorDirection::Right3,
            (1.0, 0.0),
            (3.0, 0.0),
        )
    };

    let mut p1 = vec![
        mirror(dir1, n),
        horizontal_crop(
            ramp(CurveKind::Polynomial, crop1.0, crop1.1, n, PhaseId::Phase1)?,
            CurveKind::Polynomial,
        ),
    ];
    let mut p2 = vec![
        mirror(dir2, n2),
        horizontal_crop(
            ramp(
                CurveKind::PolynomialInverse,
                crop2.0,
                crop2.1,
                n2,
                PhaseId::Phase2,
            )?,
            CurveKind::PolynomialInverse,
        ),
    ];

    let b = cfg.max_brightness;
    if brightness_active(b) {
        let v1 = ramp(CurveKind::Polynomial, 1.0, b, n, PhaseId::Phase1)?;
        let mut v2 = vec![b; n];
        v2.extend(ramp(CurveKind::PolynomialInverse, b, 1.0, n, PhaseId::Phase2)?);
        p1.push(FrameAction::curved(
            ActionValues::Brightness(v1),
            CurveKind::Polynomial,
        ));
        p2.push(FrameAction::curved(
            ActionValues::Brightness(v2),
            CurveKind::PolynomialInverse,
        ));
    }

    let blur = cfg.max_blur;
    if active(EffectKind::Blur, blur, EffectLimit::BLUR) {
        let mut v1 = vec![0.0; p30];
        v1.extend(ramp(CurveKind::Polynomial, 0.0, blur, n - p30, PhaseId::Phase1)?);
        let v2 = ramp(CurveKind::Polynomial, blur, 0.0, n2, PhaseId::Phase2)?;
        p1.push(FrameAction::curved(ActionValues::Blur(v1), CurveKind::Polynomial));
        p2.push(FrameAction::curved(ActionValues::Blur(v2), CurveKind::Polynomial));
    }

    let d = cfg.max_distortion;
    if active(EffectKind::Distortion, d, EffectLimit::DISTORTION) {
        let mut v1 = ramp(CurveKind::Polynomial, 0.0, d, n - p50, PhaseId::Phase1)?;
        v1.extend(std::iter::repeat_n(d, p50));
        let mut v2 = vec![d; n + p50];
        v2.extend(ramp(CurveKind::Polynomial, d, 0.0, n - p50, PhaseId::Phase2)?);
        p1.push(FrameAction::curved(
            ActionValues::Distortion(v1),
            CurveKind::Polynomial,
        ));
        p2.push(FrameAction::curved(
            ActionValues::Distortion(v2),
            CurveKind::Polynomial,
        ));
    }

    Ok((p1, p2))
}

/// Brightness, blur and distortion as used by every two-phase family of equal length.
fn symmetric_photometric(
    cfg: &TransitionConfig,
    p1: &mut Vec<FrameAction>,
    p2: &mut Vec<FrameAction>,
) -> TransitionResult<()> {
    let n = cfg.num_frames;

    if brightness_active(cfg.max_brightness) {
        let (a, b) = symmetric(CurveKind::Linear, 1.0, cfg.max_brightness, n, 0, 0)?;
        p1.push(a.into_action(ActionValues::Brightness));
        p2.push(b.into_action(ActionValues::Brightness));
    }
    if active(EffectKind::Blur, cfg.max_blur, EffectLimit::BLUR) {
        let hold = frames_fraction(n, 0.3);
        let (a, b) = symmetric(CurveKind::Polynomial, 0.0, cfg.max_blur, n, hold, 0)?;
        p1.push(a.into_action(ActionValues::Blur));
        p2.push(b.into_action(ActionValues::Blur));
    }
    if active(EffectKind::Distortion, cfg.max_distortion, EffectLimit::DISTORTION) {
        let hold = frames_fraction(n, 0.5);
        let (a, b) = symmetric(
            CurveKind::PolynomialInverse,
            0.0,
            cfg.max_distortion,
            n,
            0,
            hold,
        )?;
        p1.push(a.into_action(ActionValues::Distortion));
        p2.push(b.into_action(ActionValues::Distortion));
    }
    Ok(())
}

struct Ramped {
    values: Vec<f64>,
    curve: CurveKind,
}

impl Ramped {
    fn into_action(self, wrap: fn(Vec<f64>) -> ActionValues) -> FrameAction {
        FrameAction::curved(wrap(self.values), self.curve)
    }
}

/// Phase 1 holds `f_a` for `hold_a` frames, ramps to `f_b`, then holds `f_b` for `hold_b`
/// frames. Phase 2 is its time mirror with the mirrored curve kind.
fn symmetric(
    kind: CurveKind,
    f_a: f64,
    f_b: f64,
    n: usize,
    hold_a: usize,
    hold_b: usize,
) -> TransitionResult<(Ramped, Ramped)> {
    let len = n.saturating_sub(hold_a + hold_b);

    let mut v1 = vec![f_a; hold_a];
    v1.extend(ramp(kind, f_a, f_b, len, PhaseId::Phase1)?);
    v1.extend(std::iter::repeat_n(f_b, hold_b));

    let mut v2 = vec![f_b; hold_b];
    v2.extend(ramp(kind.mirrored(), f_b, f_a, len, PhaseId::Phase2)?);
    v2.extend(std::iter::repeat_n(f_a, hold_a));

    Ok((
        Ramped {
            values: v1,
            curve: kind,
        },
        Ramped {
            values: v2,
            curve: kind.mirrored(),
        },
    ))
}

/// `len` samples of a `from -> to` curve.
///
/// A single-frame ramp holds the value at the phase junction: the end value in phase 1 and the
/// start value in phase 2.
fn ramp(
    kind: CurveKind,
    from: f64,
    to: f64,
    len: usize,
    side: PhaseId,
) -> TransitionResult<Vec<f64>> {
    match len {
        0 => Ok(Vec::new()),
        1 => Ok(vec![match side {
            PhaseId::Phase1 => to,
            PhaseId::Phase2 => from,
        }]),
        _ => Ok(InterpolationCurve::over_frames(kind, from, to, len)?.sample(len)),
    }
}

fn mirror(direction: MirrorDirection, n: usize) -> FrameAction {
    FrameAction::constant(ActionValues::Mirror(vec![direction; n]))
}

fn center_crop(n: usize) -> FrameAction {
    FrameAction::constant(ActionValues::Crop(vec![CropOrigin::CENTER_TILE; n]))
}

fn horizontal_crop(xs: Vec<f64>, curve: CurveKind) -> FrameAction {
    FrameAction::curved(
        ActionValues::Crop(xs.into_iter().map(|x| CropOrigin::new(x, 0.0)).collect()),
        curve,
    )
}

fn active(kind: EffectKind, value: f64, limit: EffectLimit) -> bool {
    let on = limit.contains(value);
    if !on {
        tracing::debug!("{kind} disabled: {value} outside {limit}");
    }
    on
}

fn brightness_active(value: f64) -> bool {
    if value == 1.0 {
        tracing::debug!("brightness disabled: 1 is a no-op");
        return false;
    }
    active(EffectKind::Brightness, value, EffectLimit::BRIGHTNESS)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
