//! Per-variant axis conventions.
//!
//! The object controls and the orbit-style controls share one state machine
//! and differ only in the constants collected here. Conventions are fixed
//! when a controller is built and are not part of the user-facing options.

use glam::{Quat, Vec2, Vec3};

/// Screen pixels per world unit for translate gestures.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Order in which the yaw (horizontal delta) and pitch (vertical delta)
/// parts of one frame's rotation are composed.
///
/// When both deltas are non-zero in the same frame the order decides
/// whether pitch or yaw dominates, so the two variants produce visibly
/// different orientations for identical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOrder {
    /// `yaw * pitch`: pitch about the local X axis first, then yaw about Y
    /// (intrinsic Y-X-Z Euler order).
    YawPitch,
    /// `pitch * yaw`: yaw about the local Y axis first, then pitch about X
    /// (intrinsic X-Y-Z Euler order).
    PitchYaw,
}

impl RotationOrder {
    /// Incremental rotation for a frame delta given in degrees
    /// (`x` = horizontal, `y` = vertical).
    #[must_use]
    pub fn compose(self, degrees: Vec2) -> Quat {
        let yaw = Quat::from_rotation_y(degrees.x.to_radians());
        let pitch = Quat::from_rotation_x(degrees.y.to_radians());
        match self {
            Self::YawPitch => yaw * pitch,
            Self::PitchYaw => pitch * yaw,
        }
    }
}

/// Axes a translate delta is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateBasis {
    /// World X/Y, aligned with the screen.
    Screen,
    /// The target's own right/up axes.
    Object,
}

/// Which vertical drag direction enlarges during a pointer scale gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDragDirection {
    /// Dragging down (positive `y`) shrinks, dragging up enlarges.
    DownShrinks,
    /// Dragging down enlarges, dragging up shrinks.
    DownGrows,
}

impl ScaleDragDirection {
    /// Scale factor for a vertical drag of `delta_y` pixels.
    ///
    /// Large drags can produce a non-positive factor; the accumulator's
    /// clamp turns that into `min_scale`.
    #[must_use]
    pub fn factor(self, delta_y: f32, rate: f32) -> f32 {
        match self {
            Self::DownShrinks => 1.0 - rate * delta_y,
            Self::DownGrows => 1.0 + rate * delta_y,
        }
    }
}

/// Fixed constants that distinguish controller variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConventions {
    /// Composition order of the per-frame rotation.
    pub rotation_order: RotationOrder,
    /// Screen Y grows downward; world Y grows upward.
    pub invert_y: bool,
    /// Axes translate deltas are applied along.
    pub translate_basis: TranslateBasis,
    /// Drag direction that enlarges in a pointer scale gesture.
    pub scale_drag: ScaleDragDirection,
}

impl AxisConventions {
    /// Object controls: yaw-then-pitch composition, screen-aligned
    /// translation.
    pub const OBJECT: Self = Self {
        rotation_order: RotationOrder::YawPitch,
        invert_y: true,
        translate_basis: TranslateBasis::Screen,
        scale_drag: ScaleDragDirection::DownShrinks,
    };

    /// Orbit-style controls: pitch-then-yaw composition, translation along
    /// the target's own axes.
    pub const ORBIT: Self = Self {
        rotation_order: RotationOrder::PitchYaw,
        invert_y: true,
        translate_basis: TranslateBasis::Object,
        scale_drag: ScaleDragDirection::DownGrows,
    };

    /// World-space offset for a screen-space translate delta in pixels.
    #[must_use]
    pub fn translate_offset(self, pixels: Vec2, orientation: Quat) -> Vec3 {
        let units = pixels / PIXELS_PER_UNIT;
        let up_amount = if self.invert_y { -units.y } else { units.y };
        match self.translate_basis {
            TranslateBasis::Screen => Vec3::new(units.x, up_amount, 0.0),
            TranslateBasis::Object => {
                let right = orientation * Vec3::X;
                let up = orientation * Vec3::Y;
                right * units.x + up * up_amount
            }
        }
    }
}

impl Default for AxisConventions {
    fn default() -> Self {
        Self::OBJECT
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn single_axis_rotation_ignores_order() {
        let yaw_only = Vec2::new(30.0, 0.0);
        let a = RotationOrder::YawPitch.compose(yaw_only);
        let b = RotationOrder::PitchYaw.compose(yaw_only);
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn combined_rotation_depends_on_order() {
        let both = Vec2::new(30.0, 20.0);
        let a = RotationOrder::YawPitch.compose(both);
        let b = RotationOrder::PitchYaw.compose(both);
        assert!(!a.abs_diff_eq(b, 1e-3));
    }

    #[test]
    fn screen_translation_inverts_y() {
        let offset = AxisConventions::OBJECT
            .translate_offset(Vec2::new(100.0, 50.0), Quat::IDENTITY);
        assert!(offset.abs_diff_eq(Vec3::new(1.0, -0.5, 0.0), 1e-6));
    }

    #[test]
    fn object_translation_follows_orientation() {
        // Quarter turn about Z: the object's right axis points along +Y.
        let q = Quat::from_rotation_z(FRAC_PI_2);
        let offset =
            AxisConventions::ORBIT.translate_offset(Vec2::new(100.0, 0.0), q);
        assert!(offset.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn drag_direction_sign() {
        let shrink = ScaleDragDirection::DownShrinks.factor(10.0, 0.01);
        let grow = ScaleDragDirection::DownGrows.factor(10.0, 0.01);
        assert!((shrink - 0.9).abs() < 1e-6);
        assert!((grow - 1.1).abs() < 1e-6);
        assert!(ScaleDragDirection::DownShrinks.factor(-10.0, 0.01) > 1.0);
    }
}
