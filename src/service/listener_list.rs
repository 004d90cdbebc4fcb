// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of event listeners with supertype-aware dispatch.

use crate::domain::{ConfigurationBuilderEvent, EventType, Result};
use crate::ports::SharedListener;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle identifying one listener registration.
///
/// Returned by [`EventListenerList::add`] and used to remove the
/// registration again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

struct Registration {
    id: ListenerId,
    event_type: EventType,
    listener: SharedListener,
}

/// A list of listeners, each registered for one event type.
///
/// An event of type `T` is delivered to every listener registered at `T` or
/// at any supertype of `T`. Listeners at the event's own type are called
/// first, then those at its super-type, up to the root type. Listeners at the
/// same type are called in registration order.
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{BuilderId, ConfigurationBuilderEvent, EventType, Result};
/// use hiercfg::service::EventListenerList;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let list = EventListenerList::new();
/// list.add(
///     EventType::ANY,
///     Arc::new(move |_: &ConfigurationBuilderEvent| -> Result<()> {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }),
/// );
///
/// let source = BuilderId::next();
/// list.fire(&ConfigurationBuilderEvent::new(source, EventType::RESET)).unwrap();
/// list.fire(&ConfigurationBuilderEvent::new(source, EventType::CONFIGURATION_REQUEST)).unwrap();
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
/// ```
pub struct EventListenerList {
    registrations: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl EventListenerList {
    /// Creates an empty listener list.
    pub fn new() -> Self {
        EventListenerList {
            registrations: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers a listener for events of `event_type` and its subtypes.
    pub fn add(&self, event_type: EventType, listener: SharedListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations.write().push(Registration {
            id,
            event_type,
            listener,
        });
        tracing::trace!("Registered {} for {}", id, event_type);
        id
    }

    /// Removes the registration `id` made for `event_type`.
    ///
    /// Returns `false` if no such registration exists. A dispatch that is
    /// already running still reaches the removed listener.
    pub fn remove(&self, event_type: EventType, id: ListenerId) -> bool {
        let mut registrations = self.registrations.write();
        match registrations
            .iter()
            .position(|r| r.id == id && r.event_type == event_type)
        {
            Some(index) => {
                registrations.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the listeners that receive events of `event_type`, in
    /// dispatch order.
    pub fn listeners_for(&self, event_type: EventType) -> Vec<SharedListener> {
        let registrations = self.registrations.read();
        event_type
            .ancestors()
            .iter()
            .flat_map(|level| {
                registrations
                    .iter()
                    .filter(move |r| r.event_type == *level)
                    .map(|r| SharedListener::clone(&r.listener))
            })
            .collect()
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Delivers an event to all matching listeners.
    ///
    /// The registry is not locked while listeners run, so listeners may add
    /// or remove registrations; such changes apply to later dispatches. The
    /// first listener error stops the dispatch and is returned.
    pub fn fire(&self, event: &ConfigurationBuilderEvent) -> Result<()> {
        let listeners = self.listeners_for(event.event_type());
        tracing::trace!(
            "Dispatching {} from {} to {} listener(s)",
            event.event_type(),
            event.source(),
            listeners.len()
        );
        for listener in listeners {
            listener.on_event(event)?;
        }
        Ok(())
    }
}

impl Default for EventListenerList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventListenerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerList")
            .field("len", &self.len())
            .finish()
    }
}
