//! Resolves raw device input into the action it is bound to.

use super::session::GestureKind;
use crate::input::{Modifiers, MouseButton};
use crate::options::{
    BindingConfig, MouseAction, TouchAction, TwoFingerAction,
};

/// Action a pointer press resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Rotate the target.
    Rotate,
    /// Translate the target.
    Translate,
    /// Scale the target.
    Scale,
}

impl Intent {
    /// Pointer gesture started by this intent.
    #[must_use]
    pub fn gesture(self) -> GestureKind {
        match self {
            Self::Rotate => GestureKind::Rotate,
            Self::Translate => GestureKind::Translate,
            Self::Scale => GestureKind::Scale,
        }
    }
}

/// Stateless lookup over a [`BindingConfig`].
#[derive(Debug, Clone)]
pub struct BindingTable {
    config: BindingConfig,
}

impl BindingTable {
    /// Build a table from configuration.
    #[must_use]
    pub fn new(config: BindingConfig) -> Self {
        Self { config }
    }

    /// Underlying configuration.
    #[must_use]
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Resolve a button index and modifier state.
    ///
    /// Unknown button indices resolve to `None`. With a modifier held,
    /// rotate and translate bindings trade places; scale stays scale.
    #[must_use]
    pub fn resolve_pointer(
        &self,
        button: i16,
        modifiers: Modifiers,
    ) -> Option<Intent> {
        let action = match MouseButton::from_index(button)? {
            MouseButton::Left => self.config.mouse.left,
            MouseButton::Middle => self.config.mouse.middle,
            MouseButton::Right => self.config.mouse.right,
        };
        Some(match (action, modifiers.any()) {
            (MouseAction::Scale, _) => Intent::Scale,
            (MouseAction::Rotate, false) | (MouseAction::Translate, true) => {
                Intent::Rotate
            }
            (MouseAction::Translate, false) | (MouseAction::Rotate, true) => {
                Intent::Translate
            }
        })
    }

    /// Resolve a touch-start by finger count. Only one and two fingers are
    /// recognised.
    #[must_use]
    pub fn resolve_touch(&self, finger_count: usize) -> Option<GestureKind> {
        match finger_count {
            1 => Some(match self.config.touch.one {
                TouchAction::Rotate => GestureKind::TouchRotate,
                TouchAction::Translate => GestureKind::TouchTranslate,
            }),
            2 => Some(match self.config.touch.two {
                TwoFingerAction::ScaleTranslate => {
                    GestureKind::TouchScaleTranslate
                }
                TwoFingerAction::ScaleRotate => GestureKind::TouchScaleRotate,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MouseBindings;

    fn table() -> BindingTable {
        BindingTable::new(BindingConfig::default())
    }

    #[test]
    fn default_buttons() {
        let table = table();
        let none = Modifiers::default();
        assert_eq!(table.resolve_pointer(0, none), Some(Intent::Rotate));
        assert_eq!(table.resolve_pointer(1, none), Some(Intent::Scale));
        assert_eq!(table.resolve_pointer(2, none), Some(Intent::Translate));
    }

    #[test]
    fn unknown_button_is_ignored() {
        let table = table();
        assert_eq!(table.resolve_pointer(3, Modifiers::default()), None);
        assert_eq!(table.resolve_pointer(-1, Modifiers::SHIFT), None);
    }

    #[test]
    fn modifier_flips_rotate_and_translate_only() {
        let table = table();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert_eq!(table.resolve_pointer(0, ctrl), Some(Intent::Translate));
        assert_eq!(table.resolve_pointer(2, ctrl), Some(Intent::Rotate));
        assert_eq!(table.resolve_pointer(1, ctrl), Some(Intent::Scale));
    }

    #[test]
    fn rebinding_scale_to_left_never_swaps() {
        let config = BindingConfig {
            mouse: MouseBindings {
                left: MouseAction::Scale,
                ..MouseBindings::default()
            },
            ..BindingConfig::default()
        };
        let table = BindingTable::new(config);
        assert_eq!(table.resolve_pointer(0, Modifiers::SHIFT), Some(Intent::Scale));
    }

    #[test]
    fn finger_counts() {
        let table = table();
        assert_eq!(table.resolve_touch(1), Some(GestureKind::TouchRotate));
        assert_eq!(table.resolve_touch(2), Some(GestureKind::TouchScaleRotate));
        assert_eq!(table.resolve_touch(0), None);
        assert_eq!(table.resolve_touch(3), None);
    }
}
