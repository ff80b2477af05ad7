//! Start/change/end notifications for observers.

use std::fmt;

/// Signal delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A gesture (or an atomic wheel step) began.
    Start,
    /// The target transform was mutated.
    Change,
    /// A gesture (or an atomic wheel step) finished.
    End,
}

/// Handle returned by [`Notifier::subscribe`]; pass it back to
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(ControlEvent)>;

/// Synchronous observer list.
///
/// Listeners run in subscription order, inline with the input event that
/// triggered them. Nothing is queued or coalesced.
#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    listeners: Vec<(Subscription, ControlEvent, Listener)>,
}

impl Notifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events of `kind`.
    pub fn subscribe<F>(&mut self, kind: ControlEvent, listener: F) -> Subscription
    where
        F: FnMut(ControlEvent) + 'static,
    {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, kind, Box::new(listener)));
        subscription
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener registered for it.
    pub fn emit(&mut self, event: ControlEvent) {
        for (_, kind, listener) in &mut self.listeners {
            if *kind == event {
                listener(event);
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("next_id", &self.next_id)
            .field(
                "listeners",
                &self
                    .listeners
                    .iter()
                    .map(|(id, kind, _)| (id, kind))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
