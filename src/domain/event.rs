// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events fired by configuration builders.

use crate::domain::EventType;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BUILDER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a configuration builder, used as the source of its events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuilderId(u64);

impl BuilderId {
    /// Allocates a new process-unique identifier.
    pub fn next() -> Self {
        BuilderId(NEXT_BUILDER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "builder-{}", self.0)
    }
}

/// An event describing a state transition of a configuration builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigurationBuilderEvent {
    source: BuilderId,
    event_type: EventType,
}

impl ConfigurationBuilderEvent {
    /// Creates an event of the given type originating from `source`.
    pub fn new(source: BuilderId, event_type: EventType) -> Self {
        ConfigurationBuilderEvent { source, event_type }
    }

    /// Returns the builder that fired this event.
    pub fn source(&self) -> BuilderId {
        self.source
    }

    /// Returns the type of this event.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }
}
