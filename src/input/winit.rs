//! Converts winit window events into [`InputEvent`]s.
//!
//! winit delivers cursor motion, buttons and touches as independent events
//! without the pointer position attached to presses, so [`WinitInput`]
//! keeps the little state needed to fill in the gaps: cursor position,
//! modifier keys, the last pressed button and the set of live touches.

use ::winit::event::{
    ElementState, KeyEvent, MouseButton as WinitButton, MouseScrollDelta,
    TouchPhase, WindowEvent,
};
use ::winit::keyboard::PhysicalKey;
use glam::Vec2;

use super::event::{InputEvent, Modifiers, PointerInput, TouchPoint};

/// Stateful translator from [`WindowEvent`] to [`InputEvent`].
#[derive(Debug, Default)]
pub struct WinitInput {
    cursor: Vec2,
    modifiers: Modifiers,
    button: i16,
    touches: Vec<(u64, TouchPoint)>,
}

impl WinitInput {
    /// Create a translator with no cursor history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Translate one window event. Returns `None` for events that carry no
    /// gesture input (or only update internal state).
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    ctrl: state.control_key(),
                    meta: state.super_key(),
                    shift: state.shift_key(),
                };
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::PointerMove(self.pointer(self.button)))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let index = button_index(*button);
                let input = self.pointer(index);
                Some(match state {
                    ElementState::Pressed => {
                        self.button = index;
                        InputEvent::PointerDown(input)
                    }
                    ElementState::Released => InputEvent::PointerUp(input),
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                wheel_delta(*delta).map(|delta_y| InputEvent::Wheel { delta_y })
            }
            WindowEvent::Touch(touch) => Some(self.touch(
                touch.id,
                touch.phase,
                Vec2::new(touch.location.x as f32, touch.location.y as f32),
            )),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => Some(InputEvent::KeyDown {
                code: format!("{code:?}"),
            }),
            _ => None,
        }
    }

    fn pointer(&self, button: i16) -> PointerInput {
        PointerInput::mouse(button, self.cursor.x, self.cursor.y)
            .with_modifiers(self.modifiers)
    }

    /// Update the live touch list and report it in contact order.
    fn touch(&mut self, id: u64, phase: TouchPhase, location: Vec2) -> InputEvent {
        let point = TouchPoint::new(location.x, location.y);
        let slot = self.touches.iter().position(|(live, _)| *live == id);
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|(live, _)| *live != id);
                self.touches.push((id, point));
                InputEvent::TouchStart {
                    touches: self.live_touches(),
                }
            }
            TouchPhase::Moved => {
                if let Some(index) = slot {
                    self.touches[index].1 = point;
                }
                InputEvent::TouchMove {
                    touches: self.live_touches(),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(index) = slot {
                    let _ = self.touches.remove(index);
                }
                InputEvent::TouchEnd {
                    touches: self.live_touches(),
                }
            }
        }
    }

    fn live_touches(&self) -> Vec<TouchPoint> {
        self.touches.iter().map(|(_, point)| *point).collect()
    }
}

/// DOM-style button index for a winit button.
fn button_index(button: WinitButton) -> i16 {
    match button {
        WinitButton::Left => 0,
        WinitButton::Middle => 1,
        WinitButton::Right => 2,
        WinitButton::Back => 3,
        WinitButton::Forward => 4,
        WinitButton::Other(n) => i16::try_from(n).unwrap_or(i16::MAX),
    }
}

/// DOM-style wheel delta: positive scrolls down. winit reports scrolling
/// up as positive, so the sign flips.
fn wheel_delta(delta: MouseScrollDelta) -> Option<f32> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32,
    };
    (y != 0.0).then_some(-y)
}
