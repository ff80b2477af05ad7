use std::f32::consts::{PI, TAU};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigWarning;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
/// Feature switches, gesture speeds and transform bounds.
pub struct ControlOptions {
    /// Master switch. When false every input event is ignored.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Allow rotate gestures.
    #[schemars(title = "Rotate")]
    pub enable_rotate: bool,
    /// Allow translate (pan) gestures, including arrow keys.
    #[schemars(title = "Translate")]
    pub enable_translate: bool,
    /// Allow scale gestures (drag, pinch and wheel).
    #[schemars(title = "Zoom")]
    pub enable_zoom: bool,
    /// Degrees of rotation per pixel of pointer travel.
    #[schemars(title = "Rotate Speed", range(min = 0.05, max = 4.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Translate sensitivity multiplier.
    #[schemars(title = "Translate Speed", range(min = 0.05, max = 4.0), extend("step" = 0.05))]
    pub translate_speed: f32,
    /// Exponent applied to pinch ratios and wheel steps.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 4.0), extend("step" = 0.1))]
    pub zoom_speed: f32,
    /// Scale change per pixel of vertical scale-drag. At 1.0 the raw pixel
    /// delta is used, so any drag of a pixel or more saturates to a clamp.
    #[schemars(skip)]
    pub drag_zoom_rate: f32,
    /// Lower scale clamp.
    #[schemars(title = "Min Scale", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub min_scale: f32,
    /// Upper scale clamp.
    #[schemars(title = "Max Scale", range(min = 1.0, max = 100.0), extend("step" = 0.5))]
    pub max_scale: f32,
    /// Lower polar (pitch) bound in radians, `0..=π`.
    #[schemars(skip)]
    pub min_polar_angle: f32,
    /// Upper polar (pitch) bound in radians, `0..=π`.
    #[schemars(skip)]
    pub max_polar_angle: f32,
    /// Lower azimuth (yaw) bound in radians. `-inf` leaves yaw unbounded.
    #[schemars(skip)]
    pub min_azimuth_angle: f32,
    /// Upper azimuth (yaw) bound in radians. `inf` leaves yaw unbounded.
    #[schemars(skip)]
    pub max_azimuth_angle: f32,
    /// Pixels translated per arrow key press.
    #[schemars(title = "Key Translate Speed", range(min = 1.0, max = 50.0), extend("step" = 1.0))]
    pub key_translate_speed: f32,
    /// Two-finger pinches only ever enlarge, whichever way the fingers
    /// move. Turn off for conventional pinch-to-zoom.
    #[schemars(title = "Pinch Enlarges Only")]
    pub pinch_enlarge_only: bool,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_rotate: true,
            enable_translate: true,
            enable_zoom: true,
            rotate_speed: 1.0,
            translate_speed: 1.0,
            zoom_speed: 1.0,
            drag_zoom_rate: 1.0,
            min_scale: 0.5,
            max_scale: 2.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
            key_translate_speed: 7.0,
            pinch_enlarge_only: true,
        }
    }
}

impl ControlOptions {
    /// Replace unusable values with their defaults.
    ///
    /// Returns one warning per field group that had to be repaired; the
    /// caller decides how to surface them.
    pub fn sanitize(&mut self) -> Vec<ConfigWarning> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        for (name, value, fallback) in [
            ("rotate_speed", &mut self.rotate_speed, defaults.rotate_speed),
            (
                "translate_speed",
                &mut self.translate_speed,
                defaults.translate_speed,
            ),
            ("zoom_speed", &mut self.zoom_speed, defaults.zoom_speed),
            (
                "drag_zoom_rate",
                &mut self.drag_zoom_rate,
                defaults.drag_zoom_rate,
            ),
            (
                "key_translate_speed",
                &mut self.key_translate_speed,
                defaults.key_translate_speed,
            ),
        ] {
            if !value.is_finite() || *value < 0.0 {
                warnings.push(ConfigWarning::InvalidSpeed {
                    name,
                    value: *value,
                });
                *value = fallback;
            }
        }

        let scale_ok = self.min_scale.is_finite()
            && self.min_scale > 0.0
            && !self.max_scale.is_nan()
            && self.max_scale >= self.min_scale;
        if !scale_ok {
            warnings.push(ConfigWarning::InvalidScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
            self.min_scale = defaults.min_scale;
            self.max_scale = defaults.max_scale;
        }

        let polar_ok = (0.0..=PI).contains(&self.min_polar_angle)
            && (0.0..=PI).contains(&self.max_polar_angle)
            && self.min_polar_angle <= self.max_polar_angle;
        if !polar_ok {
            warnings.push(ConfigWarning::InvalidPolarBounds {
                min: self.min_polar_angle,
                max: self.max_polar_angle,
            });
            self.min_polar_angle = defaults.min_polar_angle;
            self.max_polar_angle = defaults.max_polar_angle;
        }

        if !azimuth_range_valid(self.min_azimuth_angle, self.max_azimuth_angle)
        {
            warnings.push(ConfigWarning::InvalidAzimuthBounds {
                min: self.min_azimuth_angle,
                max: self.max_azimuth_angle,
            });
            self.min_azimuth_angle = defaults.min_azimuth_angle;
            self.max_azimuth_angle = defaults.max_azimuth_angle;
        }

        warnings
    }

    /// Azimuth bounds, if both ends are finite.
    #[must_use]
    pub fn azimuth_bounds(&self) -> Option<(f32, f32)> {
        (self.min_azimuth_angle.is_finite()
            && self.max_azimuth_angle.is_finite())
        .then_some((self.min_azimuth_angle, self.max_azimuth_angle))
    }

    /// Polar bounds, if narrower than the full `0..=π` range.
    #[must_use]
    pub fn polar_bounds(&self) -> Option<(f32, f32)> {
        (self.min_polar_angle > 0.0 || self.max_polar_angle < PI)
            .then_some((self.min_polar_angle, self.max_polar_angle))
    }
}

/// Unbounded (`-inf..inf`) or a finite sub-range of `[-2π, 2π]` narrower
/// than a full turn.
fn azimuth_range_valid(min: f32, max: f32) -> bool {
    if min == f32::NEG_INFINITY && max == f32::INFINITY {
        return true;
    }
    min.is_finite()
        && max.is_finite()
        && min >= -TAU
        && max <= TAU
        && min <= max
        && max - min < TAU
}
