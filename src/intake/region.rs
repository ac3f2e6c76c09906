//! Listener registration on an interaction region
//!
//! An `InteractionRegion` stands in for the host element the surface binds
//! to. Registering listeners returns a `ListenerGuard`; dropping the guard
//! removes exactly the listeners it registered, so every exit path tears
//! down what was set up.

use super::events::{EventDisposition, EventKind, SurfaceEvent};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Callback invoked for one event kind
pub type Listener = Rc<dyn Fn(&SurfaceEvent) -> EventDisposition>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<EventKind, Vec<(u64, Listener)>>,
}

/// A bounded region that receives platform events
///
/// Cloning yields another handle to the same region.
#[derive(Clone, Default)]
pub struct InteractionRegion {
    registry: Rc<RefCell<Registry>>,
}

impl InteractionRegion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a set of listeners, returning the guard that removes them
    #[must_use = "dropping the guard immediately removes the listeners"]
    pub fn register(&self, listeners: Vec<(EventKind, Listener)>) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let mut ids = Vec::with_capacity(listeners.len());

        for (kind, listener) in listeners {
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.entry(kind).or_default().push((id, listener));
            ids.push((kind, id));
        }

        tracing::trace!(count = ids.len(), "registered region listeners");

        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            ids,
        }
    }

    /// Dispatch an event to every listener registered for its kind
    ///
    /// Returns `Intercepted` if any listener intercepted the event, and
    /// `PassThrough` if none did or nothing is listening.
    pub fn dispatch(&self, event: &SurfaceEvent) -> EventDisposition {
        // Snapshot so listeners may touch the region while running
        let targets: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .get(&event.kind())
            .map(|entries| entries.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();

        let mut disposition = EventDisposition::PassThrough;
        for listener in targets {
            if listener(event).is_intercepted() {
                disposition = EventDisposition::Intercepted;
            }
        }
        disposition
    }

    /// Total number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.values().map(Vec::len).sum()
    }

    /// Number of listeners registered for one kind
    #[must_use]
    pub fn listeners_for(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

/// Scoped registration; removes its listeners when dropped
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    ids: Vec<(EventKind, u64)>,
}

impl ListenerGuard {
    /// Number of listeners this guard owns
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Region already gone: nothing left to deregister from
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();

        for (kind, id) in self.ids.drain(..) {
            if let Some(entries) = registry.listeners.get_mut(&kind) {
                entries.retain(|(existing, _)| *existing != id);
                if entries.is_empty() {
                    registry.listeners.remove(&kind);
                }
            }
        }
        tracing::trace!("removed region listeners");
    }
}
