// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hierarchical configuration crate with lazily built, observable
//! configuration builders.
//!
//! Configuration data is held in an ordered tree of named nodes. Nodes carry
//! an optional value and any number of attributes, and siblings may share a
//! name. Keys such as `database.replica.host` or `list.item[@name]` address
//! nodes and attributes in that tree; keys matching several nodes yield all
//! their values as an ordered list.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and logic (`NodeTree`, `ConfigKey`,
//!   `HierarchicalConfiguration`, `EventType`, errors)
//! - **Ports**: Trait definitions at the edges (`ConfigurationFactory`,
//!   `TreeFormat`, `EventListener`)
//! - **Adapters**: Format implementations (YAML)
//! - **Service**: The configuration builder and its listener registry
//!
//! # Feature Flags
//!
//! - `yaml`: Enable the YAML format and YAML file factory (default)
//!
//! # Quick Start
//!
//! ```rust
//! use hiercfg::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut config = HierarchicalConfiguration::new();
//! config.add("servers.server", "alpha");
//! config.add("servers.server", "beta");
//! config.set("servers.server[@primary]", "alpha");
//!
//! assert_eq!(config.get_list("servers.server").len(), 2);
//! assert_eq!(config.get_string("servers.server[@primary]")?, "alpha");
//!
//! config.clear("servers.server[@primary]");
//! assert_eq!(config.get("servers.server[@primary]"), Property::Absent);
//! # Ok(())
//! # }
//! ```
//!
//! # Builders and events
//!
//! ```rust
//! use hiercfg::prelude::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let builder = BasicConfigurationBuilder::new(FnFactory::new("empty", || -> Result<_> {
//!     Ok(HierarchicalConfiguration::new())
//! }));
//!
//! let requests = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&requests);
//! builder.add_event_listener(
//!     EventType::CONFIGURATION_REQUEST,
//!     move |_: &ConfigurationBuilderEvent| -> Result<()> {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     },
//! );
//!
//! builder.get_configuration()?; // builds, no event
//! builder.get_configuration()?; // cached, one request event
//! assert_eq!(requests.load(Ordering::SeqCst), 1);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, Configuration, ConfigurationBuilderEvent, EventType,
        HierarchicalConfiguration, NodeId, NodeTree, Property, Result,
    };
    pub use crate::ports::{ConfigurationFactory, EventListener, FnFactory, TreeFormat};
    pub use crate::service::{BasicConfigurationBuilder, BuilderPhase, ListenerId};

    // Re-export adapters based on feature flags
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileFactory, YamlFormat};
}
