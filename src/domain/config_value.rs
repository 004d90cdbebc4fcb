// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scalar configuration values.
//!
//! Node values and attribute values are stored as [`ConfigValue`]s. Values are
//! kept in their textual form, exactly as a format adapter produced them, and
//! converted on demand.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integers of smaller magnitude survive a round trip through `f64`.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A scalar value held by a node or an attribute.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from(12345);
/// assert_eq!(value.as_str(), "12345");
/// assert_eq!(value.as_i32("integer").unwrap(), 12345);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use hiercfg::domain::config_value::ConfigValue;
    ///
    /// assert!(ConfigValue::from("Yes").as_bool("flag").unwrap());
    /// assert!(!ConfigValue::from(false).as_bool("flag").unwrap());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self.0.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => self
                .0
                .parse::<bool>()
                .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.0
            .trim()
            .parse::<i32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        self.0
            .trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to the widest native integer.
    ///
    /// Values written in floating point notation with an integral value
    /// (`"12.0"`, `"1e3"`) are accepted as well, as long as their magnitude
    /// stays below 2^53 where `f64` holds every integer exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use hiercfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("170141183460469231731687303715884105727");
    /// assert_eq!(value.as_i128("big").unwrap(), i128::MAX);
    /// assert_eq!(ConfigValue::from("1e3").as_i128("big").unwrap(), 1000);
    /// assert!(ConfigValue::from("1e40").as_i128("big").is_err());
    /// ```
    pub fn as_i128(&self, key: &str) -> Result<i128> {
        let text = self.0.trim();
        match text.parse::<i128>() {
            Ok(n) => Ok(n),
            Err(int_err) => match text.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INTEGER => Ok(f as i128),
                _ => Err(ConfigError::from_parse_int_error(key.to_string(), int_err)),
            },
        }
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hiercfg::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("server.address").unwrap();
    /// assert!(ip.is_loopback());
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.0
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<&String> for ConfigValue {
    fn from(s: &String) -> Self {
        ConfigValue(s.clone())
    }
}

macro_rules! impl_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConfigValue {
                fn from(v: $t) -> Self {
                    ConfigValue(v.to_string())
                }
            }
        )*
    };
}

impl_from_display!(bool, i32, i64, u32, u64, i128, f64);

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConfigValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_numbers_and_bools() {
        assert_eq!(ConfigValue::from(42).as_str(), "42");
        assert_eq!(ConfigValue::from(-12.345).as_str(), "-12.345");
        assert_eq!(ConfigValue::from(true).as_str(), "true");
    }

    #[test]
    fn test_as_bool_variants() {
        for val in ["true", "TRUE", "yes", "1", "on", " On "] {
            assert!(ConfigValue::from(val).as_bool("k").unwrap(), "{}", val);
        }
        for val in ["false", "No", "0", "off"] {
            assert!(!ConfigValue::from(val).as_bool("k").unwrap(), "{}", val);
        }
        assert!(ConfigValue::from("maybe").as_bool("k").is_err());
    }

    #[test]
    fn test_as_i32() {
        assert_eq!(ConfigValue::from("12345").as_i32("integer").unwrap(), 12345);
        assert!(ConfigValue::from("3.14").as_i32("integer").is_err());
    }

    #[test]
    fn test_as_i64() {
        let value = ConfigValue::from("-9223372036854775808");
        assert_eq!(value.as_i64("k").unwrap(), i64::MIN);
    }

    #[test]
    fn test_as_i128() {
        assert_eq!(ConfigValue::from("42").as_i128("k").unwrap(), 42);
        assert_eq!(ConfigValue::from("12.0").as_i128("k").unwrap(), 12);
        assert!(ConfigValue::from("12.5").as_i128("k").is_err());
        assert!(ConfigValue::from("abc").as_i128("k").is_err());
        assert!(ConfigValue::from("170141183460469231731687303715884105728")
            .as_i128("k")
            .is_err());
        assert!(ConfigValue::from("1e40").as_i128("k").is_err());
        assert!(ConfigValue::from("9007199254740993.0").as_i128("k").is_err());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(ConfigValue::from("-12.345").as_f64("real").unwrap(), -12.345);
        assert!(ConfigValue::from("real").as_f64("real").is_err());
    }

    #[test]
    fn test_parse_invalid_reports_target_type() {
        let err = ConfigValue::from("nope")
            .parse::<std::net::IpAddr>("addr")
            .unwrap_err();
        assert!(err.to_string().contains("IpAddr"));
    }

    #[test]
    fn test_str_comparisons() {
        let value = ConfigValue::from("value");
        assert_eq!(value, "value");
        assert!(value == *"value");
        assert_ne!(value, "other");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_serializes_as_plain_string() {
        let values = vec![ConfigValue::from("a"), ConfigValue::from("8080")];
        let text = serde_yaml::to_string(&values).unwrap();
        let back: Vec<ConfigValue> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, values);
    }
}
