// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the configuration tree, key paths and their resolution,
//! scalar values, and the event model shared by the builders. It is
//! independent of any file format and of how configurations are produced.

pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod event;
pub mod event_type;
pub mod hierarchical;
pub mod node;
pub mod property;
pub mod service;

// Re-export commonly used types
pub use config_key::{parse_attribute_name, parse_element_names, ConfigKey};
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
pub use event::{BuilderId, ConfigurationBuilderEvent};
pub use event_type::EventType;
pub use hierarchical::HierarchicalConfiguration;
pub use node::{NodeId, NodeTree};
pub use property::Property;
pub use service::Configuration;
