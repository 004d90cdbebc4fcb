// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration builders.
//!
//! This module contains the builder that lazily creates configurations
//! through a `ConfigurationFactory`, caches them and notifies listeners of
//! its state transitions.

pub mod builder;
pub mod listener_list;

// Re-export commonly used types
pub use builder::{BasicConfigurationBuilder, BuilderPhase};
pub use listener_list::{EventListenerList, ListenerId};
