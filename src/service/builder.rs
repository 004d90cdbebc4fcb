// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lazily building, resettable configuration builder.
//!
//! [`BasicConfigurationBuilder`] owns a [`ConfigurationFactory`] and caches
//! the configuration it produces. Its state transitions fire events:
//!
//! | call                  | cache   | effect                                  | event                   |
//! |-----------------------|---------|-----------------------------------------|-------------------------|
//! | `get_configuration`   | empty   | create, cache and return a new instance | none                    |
//! | `get_configuration`   | filled  | return the cached instance              | `CONFIGURATION_REQUEST` |
//! | `reset`               | any     | empty the cache                         | `RESET`                 |
//!
//! Listeners run on the calling thread while the builder's lock is held, and
//! may call back into the same builder. A `reset` issued by a
//! `CONFIGURATION_REQUEST` listener does not change the instance returned by
//! the request that fired the event; the next request builds anew. A `reset`
//! issued by a `RESET` listener completes, firing its own event, before the
//! outer `reset` returns.

use crate::domain::{BuilderId, ConfigError, ConfigurationBuilderEvent, EventType, Result};
use crate::ports::{ConfigurationFactory, EventListener, SharedListener};
use crate::service::listener_list::{EventListenerList, ListenerId};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// The transition a builder is currently performing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuilderPhase {
    /// No transition in progress.
    #[default]
    Idle,
    /// The factory is creating a new configuration.
    Building,
    /// The cache was invalidated and `RESET` listeners are running.
    Resetting,
}

struct BuilderState<C> {
    result: Option<Arc<C>>,
    phase: BuilderPhase,
}

/// A builder that creates a configuration on first request and caches it
/// until reset.
///
/// # Thread Safety
///
/// Every transition runs under a reentrant lock. Other threads block until
/// the transition, including its listener dispatch, is complete; listeners on
/// the locking thread can re-enter the builder.
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{Configuration, HierarchicalConfiguration, Result};
/// use hiercfg::ports::FnFactory;
/// use hiercfg::service::BasicConfigurationBuilder;
/// use std::sync::Arc;
///
/// let builder = BasicConfigurationBuilder::new(FnFactory::new("defaults", || -> Result<_> {
///     let mut config = HierarchicalConfiguration::new();
///     config.set("server.port", 8080);
///     Ok(config)
/// }));
///
/// let first = builder.get_configuration().unwrap();
/// assert_eq!(first.get_i32("server.port").unwrap(), 8080);
/// assert!(Arc::ptr_eq(&first, &builder.get_configuration().unwrap()));
///
/// builder.reset().unwrap();
/// assert!(!Arc::ptr_eq(&first, &builder.get_configuration().unwrap()));
/// ```
pub struct BasicConfigurationBuilder<F: ConfigurationFactory> {
    id: BuilderId,
    factory: F,
    state: ReentrantMutex<RefCell<BuilderState<F::Configuration>>>,
    listeners: EventListenerList,
}

impl<F: ConfigurationFactory> BasicConfigurationBuilder<F> {
    /// Creates a builder delegating to `factory`. Nothing is built yet.
    pub fn new(factory: F) -> Self {
        BasicConfigurationBuilder {
            id: BuilderId::next(),
            factory,
            state: ReentrantMutex::new(RefCell::new(BuilderState {
                result: None,
                phase: BuilderPhase::Idle,
            })),
            listeners: EventListenerList::new(),
        }
    }

    /// Returns the identity used as the source of this builder's events.
    pub fn id(&self) -> BuilderId {
        self.id
    }

    /// Returns the factory this builder delegates to.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Returns the configuration, creating it if nothing is cached.
    ///
    /// A cache hit fires `CONFIGURATION_REQUEST` before the cached instance
    /// is returned. Creating a new instance fires no event.
    ///
    /// # Errors
    ///
    /// * `ConfigError::BuildError` - The factory failed, or it asked this
    ///   builder for the configuration it is creating
    /// * Any error returned by a `CONFIGURATION_REQUEST` listener
    pub fn get_configuration(&self) -> Result<Arc<F::Configuration>> {
        let guard = self.state.lock();

        let cached = guard.borrow().result.clone();
        if let Some(result) = cached {
            tracing::trace!("{} returning cached configuration", self.id);
            self.fire(EventType::CONFIGURATION_REQUEST)?;
            return Ok(result);
        }
        if guard.borrow().phase == BuilderPhase::Building {
            return Err(ConfigError::BuildError {
                message: format!(
                    "{} was asked for its configuration while building it",
                    self.id
                ),
                source: None,
            });
        }

        let previous = std::mem::replace(&mut guard.borrow_mut().phase, BuilderPhase::Building);
        tracing::debug!(
            "{} creating configuration with factory '{}'",
            self.id,
            self.factory.name()
        );
        let created = self.factory.create();
        guard.borrow_mut().phase = previous;

        let result = Arc::new(created.map_err(|e| {
            ConfigError::build(
                format!(
                    "Factory '{}' failed to create a configuration",
                    self.factory.name()
                ),
                e,
            )
        })?);
        guard.borrow_mut().result = Some(Arc::clone(&result));
        Ok(result)
    }

    /// Discards the cached configuration and fires `RESET`.
    ///
    /// The cache is empty before any listener runs, even when a listener
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a `RESET` listener.
    pub fn reset(&self) -> Result<()> {
        let guard = self.state.lock();
        let previous = {
            let mut state = guard.borrow_mut();
            state.result = None;
            std::mem::replace(&mut state.phase, BuilderPhase::Resetting)
        };
        tracing::debug!("{} reset", self.id);

        let outcome = self.fire(EventType::RESET);
        guard.borrow_mut().phase = previous;
        outcome
    }

    /// Same as [`reset`](Self::reset).
    pub fn reset_result(&self) -> Result<()> {
        self.reset()
    }

    /// Returns `true` if a configuration is cached.
    pub fn is_built(&self) -> bool {
        self.state.lock().borrow().result.is_some()
    }

    /// Returns the transition currently in progress.
    ///
    /// Only the thread holding the builder, such as a listener, can observe
    /// a phase other than [`BuilderPhase::Idle`].
    pub fn state(&self) -> BuilderPhase {
        self.state.lock().borrow().phase
    }

    /// Registers a listener for events of `event_type` and its subtypes.
    pub fn add_event_listener<L>(&self, event_type: EventType, listener: L) -> ListenerId
    where
        L: EventListener + 'static,
    {
        self.listeners.add(event_type, Arc::new(listener))
    }

    /// Registers a listener the caller keeps a handle to.
    pub fn add_shared_listener(&self, event_type: EventType, listener: SharedListener) -> ListenerId {
        self.listeners.add(event_type, listener)
    }

    /// Removes a listener registration. Returns `false` if it does not exist.
    pub fn remove_event_listener(&self, event_type: EventType, id: ListenerId) -> bool {
        self.listeners.remove(event_type, id)
    }

    fn fire(&self, event_type: EventType) -> Result<()> {
        self.listeners
            .fire(&ConfigurationBuilderEvent::new(self.id, event_type))
    }
}

impl<F: ConfigurationFactory> fmt::Debug for BasicConfigurationBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicConfigurationBuilder")
            .field("id", &self.id)
            .field("factory", &self.factory.name())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
