//! Input events and a handle-based event bus.
//!
//! [`Event`] is a closed set of window/input events, already translated
//! from the windowing backend. [`EventBus`] keeps one subscriber registry
//! per [`EventKind`]; each registry is an arena of callback slots addressed
//! by a [`SubscriptionHandle`] carrying a generation, so a stale handle can
//! never release a slot that has since been reused.
//!
//! Callbacks receive the event and a mutable context `C` supplied to
//! [`EventBus::emit`]. Because emitting borrows the bus mutably, callbacks
//! cannot subscribe or unsubscribe during dispatch.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Escape,
    F12,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
}

impl MouseButton {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Keyboard {
        key: Key,
        pressed: bool,
    },
    MouseButton {
        button: MouseButton,
        pressed: bool,
        x: i32,
        y: i32,
    },
    MouseMotion {
        x: i32,
        y: i32,
        rel_x: i32,
        rel_y: i32,
    },
    Resize {
        width: u32,
        height: u32,
    },
    Quit,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Keyboard { .. } => EventKind::Keyboard,
            Event::MouseButton { .. } => EventKind::MouseButton,
            Event::MouseMotion { .. } => EventKind::MouseMotion,
            Event::Resize { .. } => EventKind::Resize,
            Event::Quit => EventKind::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Keyboard,
    MouseButton,
    MouseMotion,
    Resize,
    Quit,
}

impl EventKind {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }
}

/// Returned by [`EventBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    kind: EventKind,
    index: usize,
    generation: u32,
}

impl SubscriptionHandle {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

type Callback<C> = Box<dyn FnMut(&Event, &mut C)>;

struct Slot<C> {
    generation: u32,
    callback: Option<Callback<C>>,
}

struct Registry<C> {
    slots: Vec<Slot<C>>,
    free: Vec<usize>,
}

pub struct EventBus<C> {
    registries: [Registry<C>; EventKind::COUNT],
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            registries: std::array::from_fn(|_| Registry {
                slots: Vec::new(),
                free: Vec::new(),
            }),
        }
    }

    /// Registers `callback` for every event of `kind`. Callbacks of one kind
    /// run in slot order, which is subscription order until slots get reused.
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionHandle
    where
        F: FnMut(&Event, &mut C) + 'static,
    {
        let registry = &mut self.registries[kind.index()];
        let callback: Callback<C> = Box::new(callback);

        let index = match registry.free.pop() {
            Some(index) => {
                registry.slots[index].callback = Some(callback);
                index
            }
            None => {
                registry.slots.push(Slot {
                    generation: 0,
                    callback: Some(callback),
                });
                registry.slots.len() - 1
            }
        };

        SubscriptionHandle {
            kind,
            index,
            generation: registry.slots[index].generation,
        }
    }

    /// Releases a subscription. Returns `false` for a handle that was
    /// already released.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let registry = &mut self.registries[handle.kind.index()];
        let Some(slot) = registry.slots.get_mut(handle.index) else {
            return false;
        };
        if slot.generation != handle.generation || slot.callback.is_none() {
            return false;
        }

        slot.callback = None;
        slot.generation = slot.generation.wrapping_add(1);
        registry.free.push(handle.index);
        true
    }

    /// Delivers `event` to every subscriber of its kind and returns how many
    /// callbacks ran.
    pub fn emit(&mut self, event: &Event, context: &mut C) -> usize {
        let registry = &mut self.registries[event.kind().index()];
        let mut delivered = 0;
        for callback in registry.slots.iter_mut().filter_map(|s| s.callback.as_mut()) {
            callback(event, context);
            delivered += 1;
        }
        trace!(kind = ?event.kind(), delivered, "event dispatched");
        delivered
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registries[kind.index()]
            .slots
            .iter()
            .filter(|s| s.callback.is_some())
            .count()
    }
}
