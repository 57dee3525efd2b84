//! Input normalization: one `down`/`move`/`up` stream from mouse, touch or
//! unified pointer events.
//!
//! The mechanism is picked once from an injected [`InputCapabilities`], so
//! separate engines never share detection state and tests can pretend to be
//! any platform.

use serde::{Deserialize, Serialize};

/// What the host environment can deliver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCapabilities {
    pub pointer_events: bool,
    pub touch_events: bool,
}

/// Input mechanism the engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMechanism {
    Pointer,
    Touch,
    Mouse,
}

impl InputMechanism {
    /// Prefer unified pointers, then touch, then mouse.
    pub fn detect(capabilities: InputCapabilities) -> Self {
        if capabilities.pointer_events {
            InputMechanism::Pointer
        } else if capabilities.touch_events {
            InputMechanism::Touch
        } else {
            InputMechanism::Mouse
        }
    }
}

/// Logical gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureEvent {
    Down,
    Move,
    Up,
}

impl GestureEvent {
    pub const ALL: [GestureEvent; 3] = [GestureEvent::Down, GestureEvent::Move, GestureEvent::Up];

    /// Whether listeners for this event never call `preventDefault`.
    pub fn is_passive(self) -> bool {
        !matches!(self, GestureEvent::Down)
    }
}

/// Something that handlers can be attached to by concrete event name.
pub trait EventTarget {
    type Handler: ?Sized;

    fn add_listener(&self, event_name: &'static str, handler: &Self::Handler, passive: bool);

    fn remove_listener(&self, event_name: &'static str, handler: &Self::Handler);
}

/// Mapping from logical gesture events to concrete host event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTable {
    mechanism: InputMechanism,
}

impl EventTable {
    /// Table for the best mechanism the host supports.
    pub fn detect(capabilities: InputCapabilities) -> Self {
        Self::for_mechanism(InputMechanism::detect(capabilities))
    }

    pub fn for_mechanism(mechanism: InputMechanism) -> Self {
        Self { mechanism }
    }

    pub fn mechanism(&self) -> InputMechanism {
        self.mechanism
    }

    /// Concrete event names behind a logical event.
    pub fn event_names(&self, event: GestureEvent) -> &'static [&'static str] {
        match (self.mechanism, event) {
            (InputMechanism::Pointer, GestureEvent::Down) => &["pointerdown"],
            (InputMechanism::Pointer, GestureEvent::Move) => &["pointermove"],
            (InputMechanism::Pointer, GestureEvent::Up) => {
                &["pointerup", "pointerleave", "pointercancel"]
            }
            (InputMechanism::Touch, GestureEvent::Down) => &["touchstart"],
            (InputMechanism::Touch, GestureEvent::Move) => &["touchmove"],
            (InputMechanism::Touch, GestureEvent::Up) => &["touchend", "touchcancel"],
            (InputMechanism::Mouse, GestureEvent::Down) => &["mousedown"],
            (InputMechanism::Mouse, GestureEvent::Move) => &["mousemove"],
            (InputMechanism::Mouse, GestureEvent::Up) => &["mouseleave", "mouseup"],
        }
    }

    /// Logical event for a concrete name, if it belongs to this table.
    pub fn gesture_for(&self, event_name: &str) -> Option<GestureEvent> {
        GestureEvent::ALL
            .into_iter()
            .find(|&event| self.event_names(event).iter().any(|&name| name == event_name))
    }

    /// Attach `handler` to every concrete name behind `event`.
    pub fn subscribe<T: EventTarget>(&self, target: &T, event: GestureEvent, handler: &T::Handler) {
        for &name in self.event_names(event) {
            target.add_listener(name, handler, event.is_passive());
        }
    }

    /// Detach `handler` from every concrete name behind `event`.
    pub fn unsubscribe<T: EventTarget>(
        &self,
        target: &T,
        event: GestureEvent,
        handler: &T::Handler,
    ) {
        for &name in self.event_names(event) {
            target.remove_listener(name, handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingTarget {
        listeners: RefCell<Vec<(&'static str, u32, bool)>>,
    }

    impl EventTarget for RecordingTarget {
        type Handler = u32;

        fn add_listener(&self, event_name: &'static str, handler: &u32, passive: bool) {
            self.listeners.borrow_mut().push((event_name, *handler, passive));
        }

        fn remove_listener(&self, event_name: &'static str, handler: &u32) {
            self.listeners
                .borrow_mut()
                .retain(|(name, h, _)| !(*name == event_name && h == handler));
        }
    }

    #[test]
    fn test_detection_prefers_pointer() {
        let caps = InputCapabilities {
            pointer_events: true,
            touch_events: true,
        };
        assert_eq!(InputMechanism::detect(caps), InputMechanism::Pointer);
    }

    #[test]
    fn test_detection_falls_back() {
        let touch = InputCapabilities {
            pointer_events: false,
            touch_events: true,
        };
        assert_eq!(InputMechanism::detect(touch), InputMechanism::Touch);
        assert_eq!(
            InputMechanism::detect(InputCapabilities::default()),
            InputMechanism::Mouse
        );
    }

    #[test]
    fn test_up_maps_to_several_names() {
        let table = EventTable::for_mechanism(InputMechanism::Pointer);
        assert_eq!(
            table.event_names(GestureEvent::Up),
            &["pointerup", "pointerleave", "pointercancel"]
        );
        for name in ["pointerup", "pointerleave", "pointercancel"] {
            assert_eq!(table.gesture_for(name), Some(GestureEvent::Up));
        }
        assert_eq!(table.gesture_for("touchend"), None);
    }

    #[test]
    fn test_mouse_table() {
        let table = EventTable::detect(InputCapabilities::default());
        assert_eq!(table.event_names(GestureEvent::Down), &["mousedown"]);
        assert_eq!(table.gesture_for("mouseleave"), Some(GestureEvent::Up));
    }

    #[test]
    fn test_subscribe_attaches_every_name() {
        let table = EventTable::for_mechanism(InputMechanism::Touch);
        let target = RecordingTarget::default();

        table.subscribe(&target, GestureEvent::Down, &1);
        table.subscribe(&target, GestureEvent::Up, &3);
        assert_eq!(
            *target.listeners.borrow(),
            vec![
                ("touchstart", 1, false),
                ("touchend", 3, true),
                ("touchcancel", 3, true),
            ]
        );

        table.unsubscribe(&target, GestureEvent::Up, &3);
        assert_eq!(*target.listeners.borrow(), vec![("touchstart", 1, false)]);
    }
}
