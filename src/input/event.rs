/// Platform-agnostic input events.
///
/// These are fed into a
/// [`GestureController`](crate::controls::GestureController), either
/// directly or through one of the platform adapters.
///
/// # Example
///
/// ```ignore
/// let consumed = controller.handle_event(&InputEvent::Wheel { delta_y: -1.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A pointer button was pressed over the viewport.
    PointerDown(PointerInput),
    /// A pointer moved (delivered while a pointer gesture is listening).
    PointerMove(PointerInput),
    /// A pointer button was released.
    PointerUp(PointerInput),
    /// Scroll wheel.
    Wheel {
        /// Vertical scroll amount; positive scrolls down (reduces scale).
        /// Only the sign is used.
        delta_y: f32,
    },
    /// One or more fingers touched the viewport.
    TouchStart {
        /// All touch points currently on the surface, in contact order.
        touches: Vec<TouchPoint>,
    },
    /// Fingers moved.
    TouchMove {
        /// All touch points currently on the surface, in contact order.
        touches: Vec<TouchPoint>,
    },
    /// A finger was lifted.
    TouchEnd {
        /// Touch points still on the surface.
        touches: Vec<TouchPoint>,
    },
    /// A key was pressed on the key-event source.
    KeyDown {
        /// Physical key code, e.g. `"ArrowUp"`.
        code: String,
    },
    /// The platform asked to open a context menu over the viewport.
    ContextMenu,
}

/// Pointer sample shared by down/move/up events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Device that produced the event.
    pub pointer_type: PointerType,
    /// Raw button index: 0 primary, 1 auxiliary, 2 secondary. Other values
    /// are carried through and ignored by the binding table.
    pub button: i16,
    /// Horizontal position in device pixels.
    pub x: f32,
    /// Vertical position in device pixels (down is positive).
    pub y: f32,
    /// Modifier keys held at the time of the event.
    pub modifiers: Modifiers,
}

impl PointerInput {
    /// Mouse sample with no modifiers held.
    #[must_use]
    pub fn mouse(button: i16, x: f32, y: f32) -> Self {
        Self {
            pointer_type: PointerType::Mouse,
            button,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    /// Same sample with the given modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Screen position as a vector.
    #[must_use]
    pub fn position(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}

/// Kind of device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// Mouse or trackpad.
    Mouse,
    /// Stylus.
    Pen,
    /// Touch screen. Touch gestures arrive as touch events instead, so
    /// pointer events of this type are ignored.
    Touch,
}

/// Modifier key state. Any held modifier counts as "the modifier".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Meta / command key.
    pub meta: bool,
    /// Shift key.
    pub shift: bool,
}

impl Modifiers {
    /// Only shift held.
    pub const SHIFT: Self = Self {
        ctrl: false,
        meta: false,
        shift: true,
    };

    /// Whether any modifier is held.
    #[must_use]
    pub fn any(self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Middle mouse button (wheel click).
    Middle,
    /// Secondary (right) mouse button.
    Right,
}

impl MouseButton {
    /// Map a raw button index to a button. Unknown indices yield `None`.
    #[must_use]
    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// A single finger on the touch surface, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position as a vector.
    #[must_use]
    pub fn position(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}
