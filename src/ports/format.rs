// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration format trait definition.
//!
//! This module defines the `TreeFormat` trait, the contract between the node
//! tree and a concrete file syntax. Adapters fill a
//! [`HierarchicalConfiguration`] from text and write one back out.
//!
//! # Round trips
//!
//! An implementation must guarantee that every key of a configuration is
//! still present after `read(write(config))`, holding equal values in the
//! same order.

use crate::domain::{HierarchicalConfiguration, Result};

/// A trait for reading and writing configuration trees in a text format.
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{Configuration, HierarchicalConfiguration, Result};
/// use hiercfg::ports::TreeFormat;
///
/// /// One `key=value` pair per line.
/// struct LineFormat;
///
/// impl TreeFormat for LineFormat {
///     fn read(&self, content: &str) -> Result<HierarchicalConfiguration> {
///         let mut config = HierarchicalConfiguration::new();
///         for line in content.lines() {
///             if let Some((key, value)) = line.split_once('=') {
///                 config.add(key.trim(), value.trim());
///             }
///         }
///         Ok(config)
///     }
///
///     fn write(&self, config: &HierarchicalConfiguration) -> Result<String> {
///         let mut out = String::new();
///         for key in config.keys() {
///             let key = key.to_string();
///             for value in config.get_list(&key) {
///                 out.push_str(&format!("{}={}\n", key, value));
///             }
///         }
///         Ok(out)
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["lines"]
///     }
/// }
///
/// let config = LineFormat.read("a.b=1\na.b=2\n").unwrap();
/// assert_eq!(config.get_list("a.b").len(), 2);
/// assert_eq!(LineFormat.write(&config).unwrap(), "a.b=1\na.b=2\n");
/// ```
pub trait TreeFormat {
    /// Parses text into a configuration tree.
    ///
    /// # Returns
    ///
    /// * `Ok(HierarchicalConfiguration)` - The parsed configuration
    /// * `Err(ConfigError)` - The content is not valid in this format
    fn read(&self, content: &str) -> Result<HierarchicalConfiguration>;

    /// Serializes a configuration tree into text.
    fn write(&self, config: &HierarchicalConfiguration) -> Result<String>;

    /// Returns the file extensions (without the leading dot) of this format.
    fn supported_extensions(&self) -> &[&str];
}
