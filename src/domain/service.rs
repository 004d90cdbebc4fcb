// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration trait definition.
//!
//! This module defines the `Configuration` trait, the application-facing
//! interface for querying and mutating configuration values by key. The
//! typed getters are provided on top of the four primitive operations.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Property, Result};

/// Key-addressed access to configuration values.
///
/// Lookups never fail because a key is missing: [`get`](Self::get) returns
/// [`Property::Absent`] instead. Only the typed getters turn an absent
/// property into [`ConfigError::PropertyNotFound`].
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{ConfigKey, ConfigValue, Configuration, Property};
/// use std::collections::BTreeMap;
///
/// #[derive(Default)]
/// struct FlatConfiguration(BTreeMap<String, Vec<ConfigValue>>);
///
/// impl Configuration for FlatConfiguration {
///     fn get(&self, key: &str) -> Property {
///         Property::from_values(self.0.get(key).cloned().unwrap_or_default())
///     }
///
///     fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
///         self.0.insert(key.to_string(), vec![value.into()]);
///     }
///
///     fn add<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
///         self.0.entry(key.to_string()).or_default().push(value.into());
///     }
///
///     fn clear(&mut self, key: &str) {
///         self.0.remove(key);
///     }
///
///     fn keys(&self) -> Vec<ConfigKey> {
///         self.0.keys().map(|k| ConfigKey::from(k.as_str())).collect()
///     }
/// }
///
/// let mut config = FlatConfiguration::default();
/// config.add("port", 80);
/// assert_eq!(config.get_i32("port").unwrap(), 80);
/// assert!(config.get_i32("missing").is_err());
/// ```
pub trait Configuration {
    /// Returns the values stored under `key`.
    fn get(&self, key: &str) -> Property;

    /// Replaces everything stored under `key` with a single value.
    fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V);

    /// Appends a value under `key`, keeping the values already stored there.
    fn add<V: Into<ConfigValue>>(&mut self, key: &str, value: V);

    /// Removes the values stored under `key`. Missing keys are ignored.
    fn clear(&mut self, key: &str);

    /// Returns every key that currently holds a value.
    fn keys(&self) -> Vec<ConfigKey>;

    /// Checks whether `key` holds at least one value.
    fn contains(&self, key: &str) -> bool {
        !self.get(key).is_absent()
    }

    /// Returns `true` if no key holds a value.
    fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Returns the first value stored under `key`.
    fn get_value(&self, key: &str) -> Result<ConfigValue> {
        self.get(key)
            .into_values()
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::PropertyNotFound {
                key: key.to_string(),
            })
    }

    /// Returns the first value stored under `key` as a string.
    fn get_string(&self, key: &str) -> Result<String> {
        self.get_value(key).map(String::from)
    }

    /// Returns the first value under `key`, or `default` if there is none.
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Returns the first value stored under `key` as an `i32`.
    fn get_i32(&self, key: &str) -> Result<i32> {
        self.get_value(key)?.as_i32(key)
    }

    /// Returns the first value stored under `key` as an `i64`.
    fn get_i64(&self, key: &str) -> Result<i64> {
        self.get_value(key)?.as_i64(key)
    }

    /// Returns the first value stored under `key` as an `f64`.
    fn get_f64(&self, key: &str) -> Result<f64> {
        self.get_value(key)?.as_f64(key)
    }

    /// Returns the first value stored under `key` as a boolean.
    fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_value(key)?.as_bool(key)
    }

    /// Returns all values stored under `key`; empty if there are none.
    fn get_list(&self, key: &str) -> Vec<ConfigValue> {
        self.get(key).into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Flat test implementation that keeps one value list per key string.
    #[derive(Default)]
    struct TestConfiguration {
        values: HashMap<String, Vec<ConfigValue>>,
    }

    impl Configuration for TestConfiguration {
        fn get(&self, key: &str) -> Property {
            Property::from_values(self.values.get(key).cloned().unwrap_or_default())
        }

        fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
            self.values.insert(key.to_string(), vec![value.into()]);
        }

        fn add<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
            self.values
                .entry(key.to_string())
                .or_default()
                .push(value.into());
        }

        fn clear(&mut self, key: &str) {
            self.values.remove(key);
        }

        fn keys(&self) -> Vec<ConfigKey> {
            self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect()
        }
    }

    #[test]
    fn test_contains_and_is_empty() {
        let mut config = TestConfiguration::default();
        assert!(config.is_empty());
        config.set("key", "value");
        assert!(config.contains("key"));
        assert!(!config.contains("other"));
        assert!(!config.is_empty());
    }

    #[test]
    fn test_typed_getters() {
        let mut config = TestConfiguration::default();
        config.set("integer", 12345);
        config.set("real", -12.345);
        config.set("boolean1", true);
        config.set("boolean2", "false");

        assert_eq!(config.get_i32("integer").unwrap(), 12345);
        assert_eq!(config.get_i64("integer").unwrap(), 12345);
        assert_eq!(config.get_f64("real").unwrap(), -12.345);
        assert!(config.get_bool("boolean1").unwrap());
        assert!(!config.get_bool("boolean2").unwrap());
    }

    #[test]
    fn test_getters_on_missing_key() {
        let config = TestConfiguration::default();
        assert!(matches!(
            config.get_string("missing"),
            Err(ConfigError::PropertyNotFound { .. })
        ));
        assert_eq!(config.get_string_or("missing", "default"), "default");
        assert!(config.get_list("missing").is_empty());
    }

    #[test]
    fn test_scalar_getters_use_first_list_value() {
        let mut config = TestConfiguration::default();
        config.add("array", "value1");
        config.add("array", "value2");

        assert_eq!(config.get_string("array").unwrap(), "value1");
        assert_eq!(config.get_list("array").len(), 2);
    }

    #[test]
    fn test_conversion_error() {
        let mut config = TestConfiguration::default();
        config.set("port", "eighty");
        assert!(matches!(
            config.get_i32("port"),
            Err(ConfigError::TypeConversionError { .. })
        ));
    }
}
