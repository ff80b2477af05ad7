//! Input handling: platform-agnostic event types, listener bookkeeping,
//! and adapters that turn platform events into [`InputEvent`]s.

/// Platform-agnostic input events.
pub mod event;
/// Listener channels and the [`InputSource`] seam.
pub mod source;
/// Browser event conversion (`web` feature).
#[cfg(feature = "web")]
pub mod web;
/// Window event conversion (`viewer` feature).
#[cfg(feature = "viewer")]
pub mod winit;

pub use event::{
    InputEvent, Modifiers, MouseButton, PointerInput, PointerType, TouchPoint,
};
pub use source::{InputSource, ListenerChannel, Unmanaged};
