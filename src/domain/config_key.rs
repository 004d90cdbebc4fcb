// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key paths for addressing nodes and attributes in a configuration tree.
//!
//! A key is a dot-separated list of element names, optionally followed by an
//! attribute marker: `database.connection[@timeout]`. Parsing never fails;
//! malformed markers degrade to the most sensible reading of the input.

use std::fmt;

/// Separator between element names.
pub const ELEMENT_SEPARATOR: char = '.';

/// Opening sequence of an attribute marker.
pub const ATTRIBUTE_START: &str = "[@";

/// Closing character of an attribute marker.
pub const ATTRIBUTE_END: char = ']';

/// Splits a key into its element names, ignoring any attribute marker.
///
/// An absent or empty key yields no elements, and empty segments (as in
/// `a..b`) are skipped rather than returned as empty names.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::config_key::parse_element_names;
///
/// assert_eq!(parse_element_names(Some("x.y.z[@name]")), vec!["x", "y", "z"]);
/// assert!(parse_element_names(None).is_empty());
/// ```
pub fn parse_element_names(key: Option<&str>) -> Vec<String> {
    let Some(key) = key else {
        return Vec::new();
    };

    let path = match key.find(ATTRIBUTE_START) {
        Some(idx) => &key[..idx],
        None => key,
    };

    path.split(ELEMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the attribute name from a key, if it carries an attribute marker.
///
/// A marker without its closing bracket is accepted; everything after `[@`
/// is then taken as the attribute name.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::config_key::parse_attribute_name;
///
/// assert_eq!(parse_attribute_name(Some("x.y.z[@name]")).as_deref(), Some("name"));
/// assert_eq!(parse_attribute_name(Some("x.y.z[@name")).as_deref(), Some("name"));
/// assert_eq!(parse_attribute_name(Some("x.y.z")), None);
/// ```
pub fn parse_attribute_name(key: Option<&str>) -> Option<String> {
    let key = key?;
    let start = key.find(ATTRIBUTE_START)? + ATTRIBUTE_START.len();
    let rest = &key[start..];
    let name = match rest.find(ATTRIBUTE_END) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(name.to_string())
}

/// A parsed key path.
///
/// `ConfigKey` holds the element names of a key together with the optional
/// trailing attribute name. Its `Display` form is the canonical key string.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database.host[@type]");
/// assert_eq!(key.elements(), ["database", "host"]);
/// assert_eq!(key.attribute(), Some("type"));
/// assert_eq!(key.to_string(), "database.host[@type]");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    elements: Vec<String>,
    attribute: Option<String>,
}

impl ConfigKey {
    /// Parses a key string.
    pub fn parse(key: &str) -> Self {
        ConfigKey {
            elements: parse_element_names(Some(key)),
            attribute: parse_attribute_name(Some(key)),
        }
    }

    /// Creates a key from already separated parts.
    pub fn from_parts(elements: Vec<String>, attribute: Option<String>) -> Self {
        ConfigKey {
            elements,
            attribute,
        }
    }

    /// Returns the element names of this key.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Returns the attribute name, if this key addresses an attribute.
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns `true` if this key addresses an attribute.
    pub fn is_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// Returns `true` if the key has neither elements nor an attribute.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.attribute.is_none()
    }

    /// Returns a new key addressing the child element `name` of this key.
    ///
    /// Any attribute marker on `self` is dropped.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(name.into());
        ConfigKey {
            elements,
            attribute: None,
        }
    }

    /// Returns a new key addressing attribute `name` on the element of this key.
    pub fn with_attribute(&self, name: impl Into<String>) -> Self {
        ConfigKey {
            elements: self.elements.clone(),
            attribute: Some(name.into()),
        }
    }

    /// Returns the key with `prefix`'s elements removed from the front.
    ///
    /// Returns `None` if `prefix` is not an element prefix of this key.
    pub fn strip_prefix(&self, prefix: &ConfigKey) -> Option<Self> {
        if prefix.attribute.is_some() || !self.elements.starts_with(&prefix.elements) {
            return None;
        }
        Some(ConfigKey {
            elements: self.elements[prefix.elements.len()..].to_vec(),
            attribute: self.attribute.clone(),
        })
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey::parse(&s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey::parse(s)
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", ELEMENT_SEPARATOR)?;
            }
            write!(f, "{}", element)?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, "{}{}{}", ATTRIBUTE_START, attribute, ATTRIBUTE_END)?;
        }
        Ok(())
    }
}
