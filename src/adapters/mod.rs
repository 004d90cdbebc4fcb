// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing format and factory implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer. Each format adapter implements `TreeFormat` for one file
//! syntax and provides a `ConfigurationFactory` that builds configurations
//! from files in that syntax.

#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileFactory, YamlFormat};
