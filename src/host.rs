// Host events and the listener registry.
//
// The host (window loop, snapshot driver, tests) turns whatever it observes into `HostEvent`s.
// Pointer and resize events only reach the background while their listener is registered;
// frame events are gated by the background's `FrameTask` instead.

use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved; surface-local logical coordinates.
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    /// Viewport size changed; the surface is re-measured.
    Resize,
    /// One display tick.
    Frame { now: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerMove,
    PointerLeave,
    Resize,
}

impl HostEvent {
    /// The listener this event is delivered through; None for frame ticks.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            HostEvent::PointerMove { .. } => Some(EventKind::PointerMove),
            HostEvent::PointerLeave => Some(EventKind::PointerLeave),
            HostEvent::Resize => Some(EventKind::Resize),
            HostEvent::Frame { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Listeners {
    active: Vec<EventKind>,
}

impl Listeners {
    /// Register a listener. Returns false (and changes nothing) if it was already registered.
    pub fn subscribe(&mut self, kind: EventKind) -> bool {
        if self.active.contains(&kind) {
            return false;
        }
        debug!(?kind, "listener added");
        self.active.push(kind);
        true
    }

    pub fn unsubscribe_all(&mut self) {
        for kind in self.active.drain(..) {
            debug!(?kind, "listener removed");
        }
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_subscribe_is_a_no_op() {
        let mut l = Listeners::default();
        assert!(l.subscribe(EventKind::Resize));
        assert!(!l.subscribe(EventKind::Resize));
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn unsubscribe_all_clears_registry() {
        let mut l = Listeners::default();
        l.subscribe(EventKind::PointerMove);
        l.subscribe(EventKind::PointerLeave);
        l.unsubscribe_all();
        assert!(l.is_empty());
        assert!(!l.is_subscribed(EventKind::PointerMove));
    }

    #[test]
    fn frame_events_have_no_listener_kind() {
        assert_eq!(HostEvent::Frame { now: Instant::now() }.kind(), None);
        assert_eq!(HostEvent::PointerMove { x: 1.0, y: 2.0 }.kind(), Some(EventKind::PointerMove));
    }
}
