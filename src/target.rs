//! The object being manipulated.
//!
//! The controller never owns a private copy of the target's transform. It
//! reads and writes through [`Target`], so any scene-graph node can be
//! driven by implementing four accessors.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Externally owned orientation, position and scale.
pub trait Target {
    /// Current orientation.
    fn orientation(&self) -> Quat;
    /// Replace the orientation.
    fn set_orientation(&mut self, orientation: Quat);
    /// Current position.
    fn position(&self) -> Vec3;
    /// Replace the position.
    fn set_position(&mut self, position: Vec3);
    /// Current per-axis scale.
    fn scale(&self) -> Vec3;
    /// Replace the per-axis scale.
    fn set_scale(&mut self, scale: Vec3);

    /// Called after a wholesale restore so the target can rebuild derived
    /// state (world matrices, projection, ...).
    fn refresh(&mut self) {}
}

/// Plain transform value, usable directly as a [`Target`] and as the saved
/// snapshot behind `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Orientation.
    pub orientation: Quat,
    /// Position in world units.
    pub position: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// Identity orientation, origin, unit scale.
    pub const IDENTITY: Self = Self {
        orientation: Quat::IDENTITY,
        position: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Copy the current state of any target.
    #[must_use]
    pub fn capture<T: Target + ?Sized>(target: &T) -> Self {
        Self {
            orientation: target.orientation(),
            position: target.position(),
            scale: target.scale(),
        }
    }

    /// Write this state back into a target.
    pub fn apply_to<T: Target + ?Sized>(&self, target: &mut T) {
        target.set_position(self.position);
        target.set_orientation(self.orientation);
        target.set_scale(self.scale);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Target for Transform {
    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}

/// Shared scene nodes: the application keeps one handle, the controller
/// the other.
impl<T: Target> Target for Rc<RefCell<T>> {
    fn orientation(&self) -> Quat {
        self.borrow().orientation()
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.borrow_mut().set_orientation(orientation);
    }

    fn position(&self) -> Vec3 {
        self.borrow().position()
    }

    fn set_position(&mut self, position: Vec3) {
        self.borrow_mut().set_position(position);
    }

    fn scale(&self) -> Vec3 {
        self.borrow().scale()
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.borrow_mut().set_scale(scale);
    }

    fn refresh(&mut self) {
        self.borrow_mut().refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_and_apply_round_trip() {
        let source = Transform {
            orientation: Quat::from_rotation_y(0.7),
            position: Vec3::new(1.0, -2.0, 3.0),
            scale: Vec3::splat(1.5),
        };
        let mut sink = Transform::IDENTITY;
        Transform::capture(&source).apply_to(&mut sink);
        assert_eq!(sink, source);
    }

    #[test]
    fn shared_handle_writes_through() {
        let node = Rc::new(RefCell::new(Transform::IDENTITY));
        let mut handle = Rc::clone(&node);
        handle.set_position(Vec3::X);
        assert_eq!(node.borrow().position, Vec3::X);
    }
}
