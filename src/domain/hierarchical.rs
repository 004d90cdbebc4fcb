// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-path resolution and mutation over a [`NodeTree`].
//!
//! [`HierarchicalConfiguration`] interprets keys such as `list.item[@name]`
//! against its node tree. Every node reached by a key contributes its value
//! (or, for attribute keys, all values of the attribute), and the collected
//! values are collapsed into a [`Property`].

use crate::domain::config_key::ConfigKey;
use crate::domain::node::{NodeId, NodeTree};
use crate::domain::service::Configuration;
use crate::domain::{ConfigValue, Property};
use std::collections::HashSet;

/// A configuration backed by a tree of nodes.
///
/// # Mutation semantics
///
/// - [`set`](Configuration::set) replaces everything stored under a key with
///   one value. The first matching node is updated in place, further matches
///   are cleared, and missing nodes along the key are created.
/// - [`add`](Configuration::add) appends: an element key gains a new sibling
///   node, an attribute key gains one more attribute value.
/// - [`clear`](Configuration::clear) removes the values stored under a key.
///   Element nodes are detached once nothing else hangs off them, so an
///   attribute on a cleared element stays reachable. Parents are never
///   removed.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::{Configuration, HierarchicalConfiguration, Property};
///
/// let mut config = HierarchicalConfiguration::new();
/// config.add("test.array", "value1");
/// config.add("test.array", "value2");
/// config.set("test.array[@type]", "strings");
///
/// assert_eq!(config.get_list("test.array").len(), 2);
/// assert_eq!(config.get_string("test.array[@type]").unwrap(), "strings");
///
/// config.clear("test.array");
/// assert_eq!(config.get("test.array"), Property::Absent);
/// assert!(config.contains("test.array[@type]"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct HierarchicalConfiguration {
    tree: NodeTree,
}

impl HierarchicalConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing node tree, typically one filled by a format adapter.
    pub fn from_tree(tree: NodeTree) -> Self {
        HierarchicalConfiguration { tree }
    }

    /// Returns the underlying node tree.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Returns the underlying node tree for direct manipulation.
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Consumes the configuration and returns its node tree.
    pub fn into_tree(self) -> NodeTree {
        self.tree
    }

    /// Returns the element nodes a key resolves to, in document order.
    ///
    /// Any attribute marker on the key is ignored.
    pub fn nodes(&self, key: &str) -> Vec<NodeId> {
        self.resolve(ConfigKey::parse(key).elements())
    }

    fn resolve(&self, elements: &[String]) -> Vec<NodeId> {
        let mut current = vec![self.tree.root()];
        for name in elements {
            current = current
                .iter()
                .flat_map(|node| self.tree.children_named(*node, name))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// Walks the key from the root, reusing the last node of each name and
    /// creating the ones that are missing.
    fn ensure_path(&mut self, elements: &[String]) -> NodeId {
        let mut node = self.tree.root();
        for name in elements {
            let existing = self.tree.children_named(node, name).last();
            node = match existing {
                Some(existing) => existing,
                None => {
                    tracing::trace!("Creating configuration node '{}'", name);
                    self.tree.add_child(node, name.as_str())
                }
            };
        }
        node
    }

    /// Removes the value of an element node and detaches the node once it
    /// carries nothing else.
    fn clear_element(&mut self, node: NodeId) {
        self.tree.take_value(node);
        if node != self.tree.root() && self.tree.is_empty(node) {
            self.tree.detach(node);
        }
    }

    /// Removes every node a key resolves to, together with attributes and
    /// descendants.
    ///
    /// Attribute keys behave like [`clear`](Configuration::clear). Clearing the
    /// empty key empties the whole configuration.
    pub fn clear_tree(&mut self, key: &str) {
        let key = ConfigKey::parse(key);
        if key.is_attribute() {
            self.clear(&key.to_string());
            return;
        }
        if key.elements().is_empty() {
            tracing::debug!("Clearing entire configuration tree");
            self.tree = NodeTree::with_root_name(self.tree.name(self.tree.root()));
            return;
        }
        let nodes = self.resolve(key.elements());
        tracing::debug!("Removing {} sub-tree(s) at '{}'", nodes.len(), key);
        for node in nodes {
            self.tree.detach(node);
        }
    }

    /// Returns a copy of the sub-trees found under `prefix`.
    ///
    /// When the prefix matches several nodes their contents are merged under
    /// the new root in document order. Keys of the subset are relative to the
    /// prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use hiercfg::domain::{Configuration, HierarchicalConfiguration};
    ///
    /// let mut config = HierarchicalConfiguration::new();
    /// config.set("dictionary.key1", "value1");
    /// config.set("dictionary.key2", "value2");
    ///
    /// let subset = config.subset("dictionary");
    /// let keys: Vec<String> = subset.keys().iter().map(|k| k.to_string()).collect();
    /// assert_eq!(keys, vec!["key1", "key2"]);
    /// ```
    pub fn subset(&self, prefix: &str) -> HierarchicalConfiguration {
        let mut subset = HierarchicalConfiguration::new();
        let target = subset.tree.root();
        for node in self.nodes(prefix) {
            self.tree.copy_contents(node, &mut subset.tree, target);
        }
        subset
    }
}

impl Configuration for HierarchicalConfiguration {
    fn get(&self, key: &str) -> Property {
        let key = ConfigKey::parse(key);
        let nodes = self.resolve(key.elements());
        let values: Vec<ConfigValue> = match key.attribute() {
            Some(attribute) => nodes
                .iter()
                .flat_map(|node| self.tree.attribute(*node, attribute).iter().cloned())
                .collect(),
            None => nodes
                .iter()
                .filter_map(|node| self.tree.value(*node).cloned())
                .collect(),
        };
        Property::from_values(values)
    }

    fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        let value = value.into();
        let parsed = ConfigKey::parse(key);
        let matches = self.resolve(parsed.elements());

        match parsed.attribute() {
            Some(attribute) => match matches.split_first() {
                Some((first, rest)) => {
                    self.tree.set_attribute(*first, attribute, value);
                    for node in rest {
                        self.tree.remove_attribute(*node, attribute);
                    }
                }
                None => {
                    let node = self.ensure_path(parsed.elements());
                    self.tree.set_attribute(node, attribute, value);
                }
            },
            None => match matches.split_first() {
                Some((first, rest)) => {
                    if !rest.is_empty() {
                        tracing::debug!(
                            "Replacing {} values at '{}' with a single value",
                            matches.len(),
                            parsed
                        );
                    }
                    self.tree.set_value(*first, value);
                    for node in rest {
                        self.clear_element(*node);
                    }
                }
                None => {
                    let node = self.ensure_path(parsed.elements());
                    self.tree.set_value(node, value);
                }
            },
        }
    }

    fn add<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        let value = value.into();
        let parsed = ConfigKey::parse(key);

        if let Some(attribute) = parsed.attribute() {
            let node = self.ensure_path(parsed.elements());
            self.tree.add_attribute_value(node, attribute, value);
            return;
        }

        match parsed.elements().split_last() {
            Some((name, parents)) => {
                let parent = self.ensure_path(parents);
                let node = self.tree.add_child(parent, name.as_str());
                self.tree.set_value(node, value);
            }
            None => {
                tracing::warn!("Ignoring value added under the empty key");
            }
        }
    }

    fn clear(&mut self, key: &str) {
        let parsed = ConfigKey::parse(key);
        let nodes = self.resolve(parsed.elements());
        if nodes.is_empty() {
            return;
        }

        match parsed.attribute() {
            Some(attribute) => {
                for node in nodes {
                    self.tree.remove_attribute(node, attribute);
                }
            }
            None => {
                tracing::trace!("Clearing {} node(s) at '{}'", nodes.len(), parsed);
                for node in nodes {
                    self.clear_element(node);
                }
            }
        }
    }

    fn keys(&self) -> Vec<ConfigKey> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        self.tree.walk(self.tree.root(), |node, path| {
            let element_key = ConfigKey::from_parts(path.to_vec(), None);
            if self.tree.value(node).is_some()
                && !path.is_empty()
                && seen.insert(element_key.clone())
            {
                keys.push(element_key.clone());
            }
            for (attribute, _) in self.tree.attributes(node) {
                let attribute_key = element_key.with_attribute(attribute);
                if seen.insert(attribute_key.clone()) {
                    keys.push(attribute_key);
                }
            }
        });
        keys
    }
}
