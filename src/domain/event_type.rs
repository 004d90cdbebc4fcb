// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchy of event types.
//!
//! Event types form a tree rooted at [`EventType::ANY`]. A listener registered
//! for a type receives every event of that type and of all its descendants.
//!
//! Types live in a process-wide registry. Each registered type stores its
//! ancestor chain, computed once at registration, so dispatch never walks the
//! hierarchy again. Because a type can only be registered below a type that
//! already exists, the hierarchy is acyclic by construction;
//! [`EventType::define_all`] validates batches of declarations that refer to
//! each other by name.

use crate::domain::{ConfigError, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct Descriptor {
    name: String,
    super_type: Option<EventType>,
    /// The type itself followed by its ancestors, ending with the root.
    chain: Arc<[EventType]>,
}

static REGISTRY: Lazy<RwLock<Vec<Descriptor>>> = Lazy::new(|| {
    let mut registry = Vec::new();
    push_descriptor(&mut registry, "ANY", None);
    push_descriptor(&mut registry, "BUILDER", Some(EventType::ANY));
    push_descriptor(&mut registry, "RESET", Some(EventType::BUILDER));
    push_descriptor(
        &mut registry,
        "CONFIGURATION_REQUEST",
        Some(EventType::BUILDER),
    );
    RwLock::new(registry)
});

fn push_descriptor(
    registry: &mut Vec<Descriptor>,
    name: &str,
    super_type: Option<EventType>,
) -> EventType {
    let id = EventType(registry.len());
    let mut chain = vec![id];
    if let Some(parent) = super_type {
        chain.extend(registry[parent.0].chain.iter().copied());
    }
    registry.push(Descriptor {
        name: name.to_string(),
        super_type,
        chain: chain.into(),
    });
    id
}

fn position_of(registry: &[Descriptor], name: &str) -> Option<usize> {
    registry.iter().position(|d| d.name == name)
}

/// A node in the event type hierarchy.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::EventType;
///
/// assert_eq!(EventType::RESET.super_type(), Some(EventType::BUILDER));
/// assert_eq!(EventType::BUILDER.super_type(), Some(EventType::ANY));
/// assert!(EventType::CONFIGURATION_REQUEST.is_subtype_of(EventType::ANY));
/// assert!(!EventType::RESET.is_subtype_of(EventType::CONFIGURATION_REQUEST));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventType(usize);

impl EventType {
    /// The root of the hierarchy; matches every event.
    pub const ANY: EventType = EventType(0);
    /// Common super-type of all events fired by configuration builders.
    pub const BUILDER: EventType = EventType(1);
    /// Fired when a builder drops its cached result.
    pub const RESET: EventType = EventType(2);
    /// Fired when a builder is asked for a result it has already built.
    pub const CONFIGURATION_REQUEST: EventType = EventType(3);

    /// Registers a new event type below `super_type`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hiercfg::domain::EventType;
    ///
    /// let reload = EventType::define("RELOAD", EventType::RESET);
    /// assert_eq!(reload.super_type(), Some(EventType::RESET));
    /// assert!(reload.is_subtype_of(EventType::BUILDER));
    /// ```
    pub fn define(name: &str, super_type: EventType) -> EventType {
        let mut registry = REGISTRY.write();
        let id = push_descriptor(&mut registry, name, Some(super_type));
        tracing::debug!(
            "Registered event type '{}' below '{}'",
            name,
            registry[super_type.0].name
        );
        id
    }

    /// Registers a batch of event types that may refer to each other by name.
    ///
    /// Each declaration is a type name and the name of its super-type. The
    /// super-type may be declared in the same batch or already registered;
    /// `None` places the type directly below [`EventType::ANY`]. The whole
    /// batch is rejected if a declaration refers to an unknown name or if the
    /// declarations form a cycle. Types are returned in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hiercfg::domain::{ConfigError, EventType};
    ///
    /// let types = EventType::define_all(&[
    ///     ("FILE_CHANGED", Some("WATCH")),
    ///     ("WATCH", None),
    /// ])
    /// .unwrap();
    /// assert_eq!(types[0].super_type(), Some(types[1]));
    ///
    /// let cyclic = EventType::define_all(&[("A", Some("B")), ("B", Some("A"))]);
    /// assert!(matches!(cyclic, Err(ConfigError::EventTypeCycle { .. })));
    /// ```
    pub fn define_all(declarations: &[(&str, Option<&str>)]) -> Result<Vec<EventType>> {
        let mut registry = REGISTRY.write();

        let declared: HashMap<&str, Option<&str>> = declarations.iter().copied().collect();

        // Order declarations so that every super-type precedes its subtypes.
        let mut order: Vec<&str> = Vec::with_capacity(declarations.len());
        let mut state: HashMap<&str, Visit> = HashMap::new();
        for (name, _) in declarations {
            let mut stack: Vec<&str> = Vec::new();
            let mut current = *name;
            loop {
                match state.get(current) {
                    Some(Visit::Done) => break,
                    Some(Visit::InProgress) => {
                        return Err(ConfigError::EventTypeCycle {
                            name: current.to_string(),
                        });
                    }
                    None => {}
                }
                state.insert(current, Visit::InProgress);
                stack.push(current);
                match declared.get(current).copied().flatten() {
                    Some(parent) if declared.contains_key(parent) => current = parent,
                    Some(parent) if position_of(&registry, parent).is_some() => break,
                    Some(parent) => {
                        return Err(ConfigError::UnknownEventType {
                            name: parent.to_string(),
                        });
                    }
                    None => break,
                }
            }
            while let Some(done) = stack.pop() {
                state.insert(done, Visit::Done);
                order.push(done);
            }
        }

        let mut ids: HashMap<&str, EventType> = HashMap::new();
        for name in order {
            let super_type = match declared.get(name).copied().flatten() {
                Some(parent) => match ids.get(parent) {
                    Some(id) => *id,
                    None => EventType(position_of(&registry, parent).unwrap_or(Self::ANY.0)),
                },
                None => Self::ANY,
            };
            let id = push_descriptor(&mut registry, name, Some(super_type));
            ids.insert(name, id);
        }
        tracing::debug!("Registered {} event type(s)", ids.len());

        Ok(declarations
            .iter()
            .map(|(name, _)| ids.get(name).copied().unwrap_or(Self::ANY))
            .collect())
    }

    /// Looks up a registered type by name.
    ///
    /// If several types share a name the one registered first is returned.
    pub fn lookup(name: &str) -> Option<EventType> {
        position_of(&REGISTRY.read(), name).map(EventType)
    }

    /// Returns the name of this type.
    pub fn name(self) -> String {
        REGISTRY.read()[self.0].name.clone()
    }

    /// Returns the direct super-type; the root has none.
    pub fn super_type(self) -> Option<EventType> {
        REGISTRY.read()[self.0].super_type
    }

    /// Returns this type followed by all its ancestors, ending with the root.
    pub fn ancestors(self) -> Arc<[EventType]> {
        REGISTRY.read()[self.0].chain.clone()
    }

    /// Returns `true` if `self` equals `other` or descends from it.
    pub fn is_subtype_of(self, other: EventType) -> bool {
        self.ancestors().contains(&other)
    }
}

#[derive(Clone, Copy)]
enum Visit {
    InProgress,
    Done,
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventType({})", self.name())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
