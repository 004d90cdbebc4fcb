// SPDX-License-Identifier: MIT OR Apache-2.0

//! The result of looking up a key.

use crate::domain::ConfigValue;

/// Values found under a key.
///
/// A lookup collapses its matches: no match is `Absent`, one match is a bare
/// `Scalar`, and two or more matches form a `List` in document order.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::{ConfigValue, Property};
///
/// let found = Property::from_values(vec![ConfigValue::from("one"), ConfigValue::from("two")]);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found.first().map(|v| v.as_str()), Some("one"));
///
/// assert!(Property::from_values(Vec::new()).is_absent());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Property {
    /// Nothing is stored under the key.
    #[default]
    Absent,
    /// Exactly one value is stored under the key.
    Scalar(ConfigValue),
    /// Several values are stored under the key, in document order.
    List(Vec<ConfigValue>),
}

impl Property {
    /// Collapses a list of matched values.
    pub fn from_values(mut values: Vec<ConfigValue>) -> Self {
        match values.len() {
            0 => Property::Absent,
            1 => Property::Scalar(values.remove(0)),
            _ => Property::List(values),
        }
    }

    /// Returns `true` if nothing was found.
    pub fn is_absent(&self) -> bool {
        matches!(self, Property::Absent)
    }

    /// Returns `true` if more than one value was found.
    pub fn is_list(&self) -> bool {
        matches!(self, Property::List(_))
    }

    /// Returns the number of values found.
    pub fn len(&self) -> usize {
        match self {
            Property::Absent => 0,
            Property::Scalar(_) => 1,
            Property::List(values) => values.len(),
        }
    }

    /// Returns `true` if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.is_absent()
    }

    /// Returns the single value, or `None` for absent and list results.
    pub fn as_scalar(&self) -> Option<&ConfigValue> {
        match self {
            Property::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the first value found, if any.
    pub fn first(&self) -> Option<&ConfigValue> {
        match self {
            Property::Absent => None,
            Property::Scalar(value) => Some(value),
            Property::List(values) => values.first(),
        }
    }

    /// Returns all values found, in document order.
    pub fn values(&self) -> &[ConfigValue] {
        match self {
            Property::Absent => &[],
            Property::Scalar(value) => std::slice::from_ref(value),
            Property::List(values) => values,
        }
    }

    /// Consumes the result and returns all values found.
    pub fn into_values(self) -> Vec<ConfigValue> {
        match self {
            Property::Absent => Vec::new(),
            Property::Scalar(value) => vec![value],
            Property::List(values) => values,
        }
    }
}

impl From<ConfigValue> for Property {
    fn from(value: ConfigValue) -> Self {
        Property::Scalar(value)
    }
}

impl From<Option<ConfigValue>> for Property {
    fn from(value: Option<ConfigValue>) -> Self {
        value.map_or(Property::Absent, Property::Scalar)
    }
}
