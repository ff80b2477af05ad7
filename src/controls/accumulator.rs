//! Converts gesture deltas into target mutations.
//!
//! Handlers push this frame's rotate/translate/scale contributions into the
//! accumulator, then [`TransformAccumulator::flush`] applies them to the
//! target in one pass and clears them.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{EulerRot, Quat, Vec2, Vec3};

use super::conventions::AxisConventions;
use crate::options::ControlOptions;
use crate::target::Target;

/// Contributions collected since the last flush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Rotation in degrees (`x` yaw, `y` pitch).
    pub rotate: Vec2,
    /// Translation in screen pixels, already speed-scaled.
    pub translate: Vec2,
    /// Multiplicative scale factor, if any scale input arrived.
    pub scale: Option<f32>,
}

impl FrameDelta {
    /// No contribution.
    pub const ZERO: Self = Self {
        rotate: Vec2::ZERO,
        translate: Vec2::ZERO,
        scale: None,
    };
}

impl Default for FrameDelta {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Scale clamp plus optional orientation bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower scale clamp.
    pub min_scale: f32,
    /// Upper scale clamp.
    pub max_scale: f32,
    /// Polar (pitch + π/2) range, when narrower than `0..=π`.
    pub polar: Option<(f32, f32)>,
    /// Azimuth (yaw) range, when finite.
    pub azimuth: Option<(f32, f32)>,
}

impl Bounds {
    /// Bounds described by already-sanitized options.
    #[must_use]
    pub fn from_options(options: &ControlOptions) -> Self {
        Self {
            min_scale: options.min_scale,
            max_scale: options.max_scale,
            polar: options.polar_bounds(),
            azimuth: options.azimuth_bounds(),
        }
    }

    /// Clamp an orientation's yaw/polar decomposition into range.
    #[must_use]
    pub fn clamp_orientation(&self, orientation: Quat) -> Quat {
        if self.polar.is_none() && self.azimuth.is_none() {
            return orientation;
        }
        let (mut yaw, pitch, roll) = orientation.to_euler(EulerRot::YXZ);
        let mut polar = pitch + FRAC_PI_2;
        if let Some((min, max)) = self.polar {
            polar = polar.clamp(min, max);
        }
        if let Some((min, max)) = self.azimuth {
            yaw = clamp_azimuth(yaw, min, max);
        }
        Quat::from_euler(EulerRot::YXZ, yaw, polar - FRAC_PI_2, roll)
    }
}

/// Clamp a yaw in `[-π, π]` into a range that may reach past ±π.
///
/// Both ends are folded into `[-π, π]` first. If the folded range wraps
/// through ±π, a yaw outside it goes to whichever end is nearer.
fn clamp_azimuth(yaw: f32, min: f32, max: f32) -> f32 {
    let fold = |angle: f32| {
        if angle < -PI {
            angle + TAU
        } else if angle > PI {
            angle - TAU
        } else {
            angle
        }
    };
    let (min, max) = (fold(min), fold(max));
    if min <= max {
        yaw.clamp(min, max)
    } else if yaw > (min + max) / 2.0 {
        yaw.max(min)
    } else {
        yaw.min(max)
    }
}

/// Applies accumulated deltas to a target.
#[derive(Debug, Clone)]
pub struct TransformAccumulator {
    conventions: AxisConventions,
    bounds: Bounds,
    pending: FrameDelta,
}

impl TransformAccumulator {
    /// Create an accumulator with nothing pending.
    #[must_use]
    pub fn new(conventions: AxisConventions, bounds: Bounds) -> Self {
        Self {
            conventions,
            bounds,
            pending: FrameDelta::ZERO,
        }
    }

    /// Conventions in use.
    #[must_use]
    pub fn conventions(&self) -> &AxisConventions {
        &self.conventions
    }

    /// Bounds in use.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Contributions waiting for the next flush.
    #[must_use]
    pub fn pending(&self) -> FrameDelta {
        self.pending
    }

    /// Queue a rotation in degrees.
    pub fn rotate(&mut self, degrees: Vec2) {
        if degrees.is_finite() {
            self.pending.rotate += degrees;
        }
    }

    /// Queue a translation in screen pixels.
    pub fn translate(&mut self, pixels: Vec2) {
        if pixels.is_finite() {
            self.pending.translate += pixels;
        }
    }

    /// Queue a multiplicative scale factor. NaN factors are dropped.
    pub fn scale_by(&mut self, factor: f32) {
        if factor.is_nan() {
            return;
        }
        self.pending.scale = Some(self.pending.scale.unwrap_or(1.0) * factor);
    }

    /// Drop everything pending.
    pub fn clear(&mut self) {
        self.pending = FrameDelta::ZERO;
    }

    /// Apply and clear pending contributions. Returns whether the target
    /// changed.
    pub fn flush<T: Target + ?Sized>(&mut self, target: &mut T) -> bool {
        let pending = std::mem::take(&mut self.pending);
        let rotated = self.apply_rotation(target, pending.rotate);
        let translated = self.apply_translation(target, pending.translate);
        let scaled = pending
            .scale
            .is_some_and(|factor| self.apply_scale(target, factor));
        rotated || translated || scaled
    }

    /// Pre-multiply this frame's rotation onto the current orientation.
    fn apply_rotation<T: Target + ?Sized>(
        &self,
        target: &mut T,
        degrees: Vec2,
    ) -> bool {
        if degrees == Vec2::ZERO {
            return false;
        }
        let increment = self.conventions.rotation_order.compose(degrees);
        let composed = (increment * target.orientation()).normalize();
        if !composed.is_finite() {
            return false;
        }
        target.set_orientation(self.bounds.clamp_orientation(composed));
        true
    }

    fn apply_translation<T: Target + ?Sized>(
        &self,
        target: &mut T,
        pixels: Vec2,
    ) -> bool {
        if pixels == Vec2::ZERO {
            return false;
        }
        let offset = self
            .conventions
            .translate_offset(pixels, target.orientation());
        target.set_position(target.position() + offset);
        true
    }

    /// Clamp `current * factor` and write it to all three axes.
    fn apply_scale<T: Target + ?Sized>(&self, target: &mut T, factor: f32) -> bool {
        let current = target.scale();
        let candidate = current.x * factor;
        if candidate.is_nan() {
            return false;
        }
        let clamped = candidate.clamp(self.bounds.min_scale, self.bounds.max_scale);
        let next = Vec3::splat(clamped);
        if next == current {
            return false;
        }
        target.set_scale(next);
        true
    }
}
