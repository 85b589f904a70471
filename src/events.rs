//! Typed event manager.
//!
//! Listeners register for one [`EventKind`] on an explicitly owned
//! [`EventManager`] and are called synchronously, in registration order, whenever
//! an event of that kind is emitted.

use crate::types::BlockId;
use std::collections::HashMap;
use std::fmt;

/// Events emitted by the application and the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowchartEvent {
    /// Before anything is set up
    PreInit,
    /// After listeners are registered, before the canvas is mounted
    Init,
    /// After the canvas is mounted and seeded
    PostInit,
    /// A block joined the canvas
    BlockAdded {
        /// The new block
        id: BlockId,
    },
    /// A block left the canvas
    BlockRemoved {
        /// The removed block
        id: BlockId,
    },
    /// A dragged block changed position
    BlockMoved {
        /// The moved block
        id: BlockId,
        /// New X-coordinate
        x: i32,
        /// New Y-coordinate
        y: i32,
    },
    /// The canvas pan changed
    CanvasPanned {
        /// New horizontal displacement
        pan_x: f32,
        /// New vertical displacement
        pan_y: f32,
    },
    /// The canvas scale changed
    CanvasScaled {
        /// New scale
        scale: f32,
    },
    /// The user confirmed returning the canvas to its origin
    ReturnedToOrigin,
}

/// Discriminant of [`FlowchartEvent`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`FlowchartEvent::PreInit`]
    PreInit,
    /// See [`FlowchartEvent::Init`]
    Init,
    /// See [`FlowchartEvent::PostInit`]
    PostInit,
    /// See [`FlowchartEvent::BlockAdded`]
    BlockAdded,
    /// See [`FlowchartEvent::BlockRemoved`]
    BlockRemoved,
    /// See [`FlowchartEvent::BlockMoved`]
    BlockMoved,
    /// See [`FlowchartEvent::CanvasPanned`]
    CanvasPanned,
    /// See [`FlowchartEvent::CanvasScaled`]
    CanvasScaled,
    /// See [`FlowchartEvent::ReturnedToOrigin`]
    ReturnedToOrigin,
}

impl FlowchartEvent {
    /// The kind listeners subscribe to.
    pub fn kind(&self) -> EventKind {
        match self {
            FlowchartEvent::PreInit => EventKind::PreInit,
            FlowchartEvent::Init => EventKind::Init,
            FlowchartEvent::PostInit => EventKind::PostInit,
            FlowchartEvent::BlockAdded { .. } => EventKind::BlockAdded,
            FlowchartEvent::BlockRemoved { .. } => EventKind::BlockRemoved,
            FlowchartEvent::BlockMoved { .. } => EventKind::BlockMoved,
            FlowchartEvent::CanvasPanned { .. } => EventKind::CanvasPanned,
            FlowchartEvent::CanvasScaled { .. } => EventKind::CanvasScaled,
            FlowchartEvent::ReturnedToOrigin => EventKind::ReturnedToOrigin,
        }
    }
}

/// Handle returned by [`EventManager::add_listener`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked with each matching event.
pub type Listener = Box<dyn FnMut(&FlowchartEvent)>;

/// Dispatches events to the listeners registered for their kind.
#[derive(Default)]
pub struct EventManager {
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventManager")
            .field("listeners", &counts)
            .finish()
    }
}

impl EventManager {
    /// Creates a manager with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    pub fn add_listener(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&FlowchartEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Unregisters a listener. Returns whether it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        for list in self.listeners.values_mut() {
            if let Some(index) = list.iter().position(|(listener_id, _)| *listener_id == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Calls every listener registered for the event's kind.
    pub fn emit(&mut self, event: FlowchartEvent) {
        if let Some(list) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in list.iter_mut() {
                listener(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_called_in_order() {
        let mut events = EventManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        events.add_listener(EventKind::Init, move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        events.add_listener(EventKind::Init, move |_| second.borrow_mut().push("second"));

        events.emit(FlowchartEvent::Init);
        events.emit(FlowchartEvent::PostInit);

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_payload_delivered() {
        let mut events = EventManager::new();
        let seen = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&seen);
        events.add_listener(EventKind::BlockMoved, move |event| {
            *sink.borrow_mut() = Some(event.clone());
        });

        let id = BlockId::new_v4();
        events.emit(FlowchartEvent::BlockMoved { id, x: 4, y: -2 });

        assert_eq!(*seen.borrow(), Some(FlowchartEvent::BlockMoved { id, x: 4, y: -2 }));
    }

    #[test]
    fn test_remove_listener() {
        let mut events = EventManager::new();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = events.add_listener(EventKind::PostInit, move |_| *counter.borrow_mut() += 1);
        assert_eq!(events.listener_count(EventKind::PostInit), 1);

        assert!(events.remove_listener(id));
        assert!(!events.remove_listener(id));
        events.emit(FlowchartEvent::PostInit);

        assert_eq!(*count.borrow(), 0);
        assert_eq!(events.listener_count(EventKind::PostInit), 0);
    }
}
