// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) at the edges of the
//! configuration system: how configurations are produced, how they are read
//! from and written to text, and how builder events are observed. These traits
//! are implemented by adapters in the adapters layer and consumed by the
//! service layer.

pub mod factory;
pub mod format;
pub mod listener;

// Re-export commonly used types
pub use factory::{ConfigurationFactory, FnFactory};
pub use format::TreeFormat;
pub use listener::{EventListener, SharedListener};
