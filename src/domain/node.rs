// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arena-backed configuration node tree.
//!
//! A [`NodeTree`] stores every node in a single vector and addresses nodes
//! through [`NodeId`] handles. Parent links are plain indices, so detaching a
//! sub-tree never fights the borrow checker and never leaks a reference cycle.
//!
//! The tree is syntax-agnostic. Format adapters populate it through
//! [`NodeTree::add_child`], [`NodeTree::set_value`] and
//! [`NodeTree::add_attribute_value`], and walk it back out with the read
//! accessors when saving.
//!
//! Child elements and attributes of a node live in separate namespaces: an
//! element `x` and an attribute `x` on the same node never collide.

use crate::domain::ConfigValue;

/// Handle to a node inside a [`NodeTree`].
///
/// Handles stay valid until the node is detached. A detached node's slot is
/// reused by later insertions, so a stale handle must not be used again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
struct NodeRecord {
    name: String,
    value: Option<ConfigValue>,
    children: Vec<NodeId>,
    /// Attribute name to values, in insertion order.
    attributes: Vec<(String, Vec<ConfigValue>)>,
    /// Back-reference used for removal bookkeeping only.
    parent: Option<NodeId>,
}

/// An ordered tree of named nodes.
///
/// # Examples
///
/// ```
/// use hiercfg::domain::node::NodeTree;
///
/// let mut tree = NodeTree::new();
/// let list = tree.add_child(tree.root(), "list");
/// let first = tree.add_child(list, "item");
/// tree.set_value(first, "one");
/// tree.add_attribute_value(first, "name", "one");
/// let second = tree.add_child(list, "item");
/// tree.set_value(second, "two");
///
/// let names: Vec<_> = tree.children_named(list, "item").collect();
/// assert_eq!(names, vec![first, second]);
/// assert_eq!(tree.attribute(first, "name")[0].as_str(), "one");
/// ```
#[derive(Clone, Debug)]
pub struct NodeTree {
    nodes: Vec<NodeRecord>,
    free: Vec<usize>,
}

impl NodeTree {
    /// Creates a tree holding only an unnamed root node.
    pub fn new() -> Self {
        Self::with_root_name("")
    }

    /// Creates a tree whose root node carries `name`.
    pub fn with_root_name(name: impl Into<String>) -> Self {
        NodeTree {
            nodes: vec![NodeRecord {
                name: name.into(),
                ..NodeRecord::default()
            }],
            free: Vec::new(),
        }
    }

    /// Returns the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes reachable from the root, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn record(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.0]
    }

    fn record_mut(&mut self, id: NodeId) -> &mut NodeRecord {
        &mut self.nodes[id.0]
    }

    /// Returns the name of a node.
    pub fn name(&self, id: NodeId) -> &str {
        &self.record(id).name
    }

    /// Returns the scalar value of a node.
    pub fn value(&self, id: NodeId) -> Option<&ConfigValue> {
        self.record(id).value.as_ref()
    }

    /// Sets the scalar value of a node, replacing any previous value.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<ConfigValue>) {
        self.record_mut(id).value = Some(value.into());
    }

    /// Removes and returns the scalar value of a node.
    pub fn take_value(&mut self, id: NodeId) -> Option<ConfigValue> {
        self.record_mut(id).value.take()
    }

    /// Returns the parent of a node; the root has none.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id).parent
    }

    /// Returns the children of a node in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.record(id).children
    }

    /// Returns the children of a node that carry `name`, in insertion order.
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.record(id)
            .children
            .iter()
            .copied()
            .filter(move |child| self.record(*child).name == name)
    }

    /// Returns `true` if the node has child elements.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.record(id).children.is_empty()
    }

    /// Appends a new child element and returns its handle.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let record = NodeRecord {
            name: name.into(),
            parent: Some(parent),
            ..NodeRecord::default()
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = record;
                NodeId(slot)
            }
            None => {
                self.nodes.push(record);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.record_mut(parent).children.push(id);
        id
    }

    /// Returns the values of an attribute; empty if the attribute is not set.
    pub fn attribute(&self, id: NodeId, name: &str) -> &[ConfigValue] {
        self.record(id)
            .attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Returns every attribute of a node with its values, in insertion order.
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &[ConfigValue])> {
        self.record(id)
            .attributes
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns `true` if the node carries at least one attribute.
    pub fn has_attributes(&self, id: NodeId) -> bool {
        !self.record(id).attributes.is_empty()
    }

    /// Replaces all values of an attribute with a single value.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<ConfigValue>) {
        let value = value.into();
        let attributes = &mut self.record_mut(id).attributes;
        match attributes.iter_mut().find(|(attr, _)| attr == name) {
            Some((_, values)) => *values = vec![value],
            None => attributes.push((name.to_string(), vec![value])),
        }
    }

    /// Appends a value to an attribute, creating the attribute if needed.
    pub fn add_attribute_value(&mut self, id: NodeId, name: &str, value: impl Into<ConfigValue>) {
        let value = value.into();
        let attributes = &mut self.record_mut(id).attributes;
        match attributes.iter_mut().find(|(attr, _)| attr == name) {
            Some((_, values)) => values.push(value),
            None => attributes.push((name.to_string(), vec![value])),
        }
    }

    /// Removes an attribute with all its values.
    ///
    /// Returns `true` if the attribute existed.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let attributes = &mut self.record_mut(id).attributes;
        let before = attributes.len();
        attributes.retain(|(attr, _)| attr != name);
        attributes.len() != before
    }

    /// Returns `true` if the node has no value, no attributes and no children.
    pub fn is_empty(&self, id: NodeId) -> bool {
        let record = self.record(id);
        record.value.is_none() && record.attributes.is_empty() && record.children.is_empty()
    }

    /// Detaches a node from its parent and releases it with all descendants.
    ///
    /// The parent is left in place even if it becomes childless. The root
    /// cannot be detached; for it this returns `false`.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.record(id).parent else {
            return false;
        };
        self.record_mut(parent).children.retain(|child| *child != id);
        self.release(id);
        true
    }

    fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let record = std::mem::take(self.record_mut(current));
            pending.extend(record.children);
            self.free.push(current.0);
        }
    }

    /// Deep-copies the children, attributes and value of `source` onto
    /// `target` in `dest`.
    ///
    /// Existing children of `target` are kept; copied children are appended
    /// after them. Copied attribute values are appended to existing ones, and
    /// the value of `target` is only filled in if it has none yet.
    pub fn copy_contents(&self, source: NodeId, dest: &mut NodeTree, target: NodeId) {
        let record = self.record(source);
        if dest.value(target).is_none() {
            if let Some(value) = &record.value {
                dest.set_value(target, value.clone());
            }
        }
        for (name, values) in &record.attributes {
            for value in values {
                dest.add_attribute_value(target, name, value.clone());
            }
        }
        for child in &record.children {
            let copy = dest.add_child(target, self.name(*child));
            self.copy_contents(*child, dest, copy);
        }
    }

    /// Visits every node reachable from `start` in document order.
    ///
    /// The callback receives the node and the element names leading to it from
    /// `start` (exclusive).
    pub fn walk<F>(&self, start: NodeId, mut visit: F)
    where
        F: FnMut(NodeId, &[String]),
    {
        let mut path = Vec::new();
        self.walk_inner(start, &mut path, &mut visit);
    }

    fn walk_inner<F>(&self, id: NodeId, path: &mut Vec<String>, visit: &mut F)
    where
        F: FnMut(NodeId, &[String]),
    {
        visit(id, path);
        for child in &self.record(id).children {
            path.push(self.name(*child).to_string());
            self.walk_inner(*child, path, visit);
            path.pop();
        }
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}
