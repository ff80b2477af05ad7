//! Gesture controls for a single 3D target.
//!
//! Pointer drags rotate, translate or scale the target; the wheel and
//! two-finger pinches scale it; one-finger touches rotate or translate it;
//! arrow keys nudge it. Each mutation is reported to observers as a
//! [`ControlEvent`].

/// Per-frame delta application and bounds.
pub mod accumulator;
/// Button, modifier and finger-count resolution.
pub mod binding;
/// The gesture state machine.
pub mod controller;
/// Constants that distinguish the object and orbit variants.
pub mod conventions;
/// Start/change/end observer list.
pub mod notify;
/// Gesture kinds and the live session.
pub mod session;
/// Point and separation trackers.
pub mod tracker;

pub use accumulator::{Bounds, FrameDelta, TransformAccumulator};
pub use binding::{BindingTable, Intent};
pub use controller::GestureController;
pub use conventions::{
    AxisConventions, RotationOrder, ScaleDragDirection, TranslateBasis,
    PIXELS_PER_UNIT,
};
pub use notify::{ControlEvent, Notifier, Subscription};
pub use session::{GestureKind, GestureSession};
pub use tracker::{touch_center, touch_separation, DeltaTracker, ScaleTracker};
