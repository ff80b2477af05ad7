//! Listener bookkeeping between the controller and whatever delivers input.
//!
//! The controller never reads events from a source; it only tells the
//! source which event channels it currently wants. Element-level channels
//! are attached at construction, pointer move/up only while a pointer
//! gesture is in progress, and key-down once a key target is registered.

/// Event channel a controller can listen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerChannel {
    /// Context-menu requests on the viewport element.
    ContextMenu,
    /// Pointer presses on the viewport element.
    PointerDown,
    /// Wheel events on the viewport element.
    Wheel,
    /// Touch start on the viewport element.
    TouchStart,
    /// Touch end on the viewport element.
    TouchEnd,
    /// Touch move on the viewport element.
    TouchMove,
    /// Pointer moves anywhere in the owning document.
    PointerMove,
    /// Pointer releases anywhere in the owning document.
    PointerUp,
    /// Key presses on the key-event target.
    KeyDown,
}

impl ListenerChannel {
    /// Channels attached for the whole lifetime of a controller.
    pub const ELEMENT: [Self; 6] = [
        Self::ContextMenu,
        Self::PointerDown,
        Self::Wheel,
        Self::TouchStart,
        Self::TouchEnd,
        Self::TouchMove,
    ];

    /// Channels attached only while a pointer gesture is active.
    pub const POINTER_SESSION: [Self; 2] = [Self::PointerMove, Self::PointerUp];
}

/// Something that can deliver input events to a controller.
///
/// Implementations subscribe and unsubscribe platform listeners when asked.
/// Delivering the events themselves is the embedder's job: it forwards each
/// event to [`GestureController::handle_event`].
///
/// [`GestureController::handle_event`]: crate::controls::GestureController::handle_event
pub trait InputSource {
    /// Start delivering events on `channel`.
    fn attach(&mut self, channel: ListenerChannel);

    /// Stop delivering events on `channel`.
    fn detach(&mut self, channel: ListenerChannel);

    /// Whether this source is the document root rather than a viewport
    /// element.
    fn is_document_root(&self) -> bool {
        false
    }
}

/// Source for embedders that forward every event unconditionally (e.g. a
/// winit event loop). Subscription requests are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmanaged;

impl InputSource for Unmanaged {
    fn attach(&mut self, _channel: ListenerChannel) {}

    fn detach(&mut self, _channel: ListenerChannel) {}
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{InputSource, ListenerChannel};

    /// Attach/detach call, in order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Call {
        Attach(ListenerChannel),
        Detach(ListenerChannel),
    }

    /// Source that records every subscription call into a shared log.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct RecordingSource {
        pub(crate) calls: Rc<RefCell<Vec<Call>>>,
        pub(crate) document_root: bool,
    }

    impl RecordingSource {
        pub(crate) fn attach_count(&self, channel: ListenerChannel) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|call| **call == Call::Attach(channel))
                .count()
        }

        pub(crate) fn detach_count(&self, channel: ListenerChannel) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|call| **call == Call::Detach(channel))
                .count()
        }
    }

    impl InputSource for RecordingSource {
        fn attach(&mut self, channel: ListenerChannel) {
            self.calls.borrow_mut().push(Call::Attach(channel));
        }

        fn detach(&mut self, channel: ListenerChannel) {
            self.calls.borrow_mut().push(Call::Detach(channel));
        }

        fn is_document_root(&self) -> bool {
            self.document_root
        }
    }
}
