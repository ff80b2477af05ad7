//! Browser DOM event conversion.
//!
//! The embedding page registers a DOM listener for each
//! [`ListenerChannel`] the controller attaches (see [`dom_event_name`])
//! and forwards what arrives through the `from_*` helpers here.

use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{KeyboardEvent, PointerEvent, TouchEvent, TouchList, WheelEvent};

use super::event::{InputEvent, Modifiers, PointerInput, PointerType, TouchPoint};
use super::source::ListenerChannel;

/// Route `log` output to the browser console and install the panic hook.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

/// DOM event type for a listener channel.
#[must_use]
pub fn dom_event_name(channel: ListenerChannel) -> &'static str {
    match channel {
        ListenerChannel::ContextMenu => "contextmenu",
        ListenerChannel::PointerDown => "pointerdown",
        ListenerChannel::Wheel => "wheel",
        ListenerChannel::TouchStart => "touchstart",
        ListenerChannel::TouchEnd => "touchend",
        ListenerChannel::TouchMove => "touchmove",
        ListenerChannel::PointerMove => "pointermove",
        ListenerChannel::PointerUp => "pointerup",
        ListenerChannel::KeyDown => "keydown",
    }
}

/// Pointer sample from a DOM pointer event.
#[must_use]
pub fn pointer_input(event: &PointerEvent) -> PointerInput {
    PointerInput {
        pointer_type: pointer_type(&event.pointer_type()),
        button: event.button(),
        x: event.client_x() as f32,
        y: event.client_y() as f32,
        modifiers: Modifiers {
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            shift: event.shift_key(),
        },
    }
}

/// `pointerdown` event.
#[must_use]
pub fn from_pointer_down(event: &PointerEvent) -> InputEvent {
    InputEvent::PointerDown(pointer_input(event))
}

/// `pointermove` event.
#[must_use]
pub fn from_pointer_move(event: &PointerEvent) -> InputEvent {
    InputEvent::PointerMove(pointer_input(event))
}

/// `pointerup` event.
#[must_use]
pub fn from_pointer_up(event: &PointerEvent) -> InputEvent {
    InputEvent::PointerUp(pointer_input(event))
}

/// `wheel` event.
#[must_use]
pub fn from_wheel(event: &WheelEvent) -> InputEvent {
    InputEvent::Wheel {
        delta_y: event.delta_y() as f32,
    }
}

/// `touchstart`, `touchmove` or `touchend` event, by DOM event type.
/// Returns `None` for any other type.
#[must_use]
pub fn from_touch(event: &TouchEvent) -> Option<InputEvent> {
    let touches = touch_points(&event.touches());
    match event.type_().as_str() {
        "touchstart" => Some(InputEvent::TouchStart { touches }),
        "touchmove" => Some(InputEvent::TouchMove { touches }),
        "touchend" | "touchcancel" => Some(InputEvent::TouchEnd { touches }),
        _ => None,
    }
}

/// `keydown` event.
#[must_use]
pub fn from_key_down(event: &KeyboardEvent) -> InputEvent {
    InputEvent::KeyDown { code: event.code() }
}

/// Touches are tracked in page coordinates, so a scrolled page does not
/// shift the pinch midpoint between events.
fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| page_point(touch.page_x(), touch.page_y()))
        .collect()
}

fn page_point(page_x: i32, page_y: i32) -> TouchPoint {
    TouchPoint::new(page_x as f32, page_y as f32)
}

fn pointer_type(name: &str) -> PointerType {
    match name {
        "touch" => PointerType::Touch,
        "pen" => PointerType::Pen,
        _ => PointerType::Mouse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_channel_has_a_dom_name() {
        let all = ListenerChannel::ELEMENT
            .into_iter()
            .chain(ListenerChannel::POINTER_SESSION)
            .chain([ListenerChannel::KeyDown]);
        let names: Vec<_> = all.map(dom_event_name).collect();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"contextmenu"));
        assert!(names.contains(&"keydown"));
    }

    #[test]
    fn touch_points_keep_page_offsets() {
        // Far down a scrolled page, page coordinates exceed any viewport.
        let point = page_point(40, 2400);
        assert_eq!(point, TouchPoint::new(40.0, 2400.0));
    }

    #[test]
    fn pointer_type_names() {
        assert_eq!(pointer_type("touch"), PointerType::Touch);
        assert_eq!(pointer_type("pen"), PointerType::Pen);
        assert_eq!(pointer_type("mouse"), PointerType::Mouse);
        assert_eq!(pointer_type(""), PointerType::Mouse);
    }
}
