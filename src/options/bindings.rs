use serde::{Deserialize, Serialize};

/// Base action a mouse button is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    /// Rotate the target; the modifier key turns this into translate.
    Rotate,
    /// Scale the target by vertical drag; never modifier-swapped.
    Scale,
    /// Translate the target; the modifier key turns this into rotate.
    Translate,
}

/// Action for a one-finger touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    /// One finger rotates.
    Rotate,
    /// One finger translates.
    Translate,
}

/// Combined action for a two-finger touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoFingerAction {
    /// Finger separation scales, the midpoint translates.
    ScaleTranslate,
    /// Finger separation scales, the midpoint rotates.
    ScaleRotate,
}

/// Mouse button → action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseBindings {
    /// Primary button (index 0).
    pub left: MouseAction,
    /// Wheel button (index 1).
    pub middle: MouseAction,
    /// Secondary button (index 2).
    pub right: MouseAction,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            left: MouseAction::Rotate,
            middle: MouseAction::Scale,
            right: MouseAction::Translate,
        }
    }
}

/// Finger count → action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchBindings {
    /// Single finger.
    pub one: TouchAction,
    /// Two fingers.
    pub two: TwoFingerAction,
}

impl Default for TouchBindings {
    fn default() -> Self {
        Self {
            one: TouchAction::Rotate,
            two: TwoFingerAction::ScaleRotate,
        }
    }
}

/// Arrow directions that translate the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    /// Move left.
    Left,
    /// Move up.
    Up,
    /// Move right.
    Right,
    /// Move down.
    Down,
}

/// Key codes for the four translate directions.
///
/// Key strings use the DOM `KeyboardEvent.code` / winit `KeyCode` debug
/// format: `"ArrowUp"`, `"KeyW"`, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Key that moves the target left.
    pub left: String,
    /// Key that moves the target up.
    pub up: String,
    /// Key that moves the target right.
    pub right: String,
    /// Key that moves the target down.
    pub down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "ArrowLeft".into(),
            up: "ArrowUp".into(),
            right: "ArrowRight".into(),
            down: "ArrowDown".into(),
        }
    }
}

impl KeyBindings {
    /// Look up the arrow direction for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ArrowKey> {
        [
            (&self.left, ArrowKey::Left),
            (&self.up, ArrowKey::Up),
            (&self.right, ArrowKey::Right),
            (&self.down, ArrowKey::Down),
        ]
        .into_iter()
        .find_map(|(code, arrow)| (code == key).then_some(arrow))
    }
}

/// Complete input binding configuration. Read-only once a controller has
/// been built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Mouse button bindings.
    pub mouse: MouseBindings,
    /// Touch finger-count bindings.
    pub touch: TouchBindings,
    /// Arrow key bindings.
    pub keys: KeyBindings,
}
