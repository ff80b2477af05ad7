use glam::Vec2;

use super::tracker::{DeltaTracker, ScaleTracker};

/// Gesture currently driving the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureKind {
    /// No gesture in progress.
    #[default]
    None,
    /// Pointer drag rotating the target.
    Rotate,
    /// Pointer drag translating the target.
    Translate,
    /// Pointer drag scaling the target.
    Scale,
    /// One finger rotating.
    TouchRotate,
    /// One finger translating.
    TouchTranslate,
    /// Two fingers: separation scales, midpoint translates.
    TouchScaleTranslate,
    /// Two fingers: separation scales, midpoint rotates.
    TouchScaleRotate,
}

impl GestureKind {
    /// Started by a pointer-down.
    #[must_use]
    pub fn is_pointer(self) -> bool {
        matches!(self, Self::Rotate | Self::Translate | Self::Scale)
    }

    /// Started by a touch-start.
    #[must_use]
    pub fn is_touch(self) -> bool {
        matches!(
            self,
            Self::TouchRotate
                | Self::TouchTranslate
                | Self::TouchScaleTranslate
                | Self::TouchScaleRotate
        )
    }

    /// Two-finger gestures that also scale.
    #[must_use]
    pub fn is_pinch(self) -> bool {
        matches!(self, Self::TouchScaleTranslate | Self::TouchScaleRotate)
    }
}

/// Live state of the active gesture.
///
/// `point` follows the pointer, the single finger, or the two-finger
/// midpoint. It is `None` for a two-finger gesture whose rotate/translate
/// half was disabled at start, and is seeded on the first move once that
/// half becomes usable. `pinch` works the same way for the separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    kind: GestureKind,
    pub(crate) point: Option<DeltaTracker>,
    pub(crate) pinch: Option<ScaleTracker>,
}

impl GestureSession {
    /// Pointer or one-finger session starting at `point`.
    #[must_use]
    pub fn new(kind: GestureKind, point: Vec2) -> Self {
        Self {
            kind,
            point: Some(DeltaTracker::new(point)),
            pinch: None,
        }
    }

    /// Two-finger session; either tracker may be absent.
    #[must_use]
    pub fn pinch(
        kind: GestureKind,
        midpoint: Option<Vec2>,
        separation: Option<f32>,
    ) -> Self {
        Self {
            kind,
            point: midpoint.map(DeltaTracker::new),
            pinch: separation.map(ScaleTracker::new),
        }
    }

    /// Kind fixed at start.
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Advance the point tracker, seeding it if absent. Seeding yields a
    /// zero delta.
    pub(crate) fn advance_point(&mut self, point: Vec2, speed: f32) -> Vec2 {
        match &mut self.point {
            Some(tracker) => tracker.advance(point, speed),
            None => {
                self.point = Some(DeltaTracker::new(point));
                Vec2::ZERO
            }
        }
    }

    /// Advance the separation tracker, seeding it if absent.
    pub(crate) fn advance_pinch(&mut self, separation: f32) -> Option<f32> {
        match &mut self.pinch {
            Some(tracker) => tracker.advance(separation),
            None => {
                self.pinch = Some(ScaleTracker::new(separation));
                None
            }
        }
    }
}
