// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use hiercfg::domain::{
    ConfigurationBuilderEvent, EventType, HierarchicalConfiguration, NodeId, NodeTree, Result,
};
use hiercfg::ports::EventListener;
use parking_lot::Mutex;
use std::collections::VecDeque;

fn leaf(tree: &mut NodeTree, parent: NodeId, name: &str, value: &str) -> NodeId {
    let id = tree.add_child(parent, name);
    tree.set_value(id, value);
    id
}

/// Builds the tree used by most hierarchical configuration tests.
///
/// Equivalent document:
///
/// ```text
/// element = value
/// element2.subelement.subsubelement = I'm complex!
/// element3 = value, element3[@name] = foo
/// test.comment            (no value)
/// test.cdata = <cdata value>
/// test.entity = 1<2
/// list.item = one [@name=one], two
/// list.sublist.item = five, six
/// list.item = three [@name=three], four
/// clear.element = value
/// clear.element2 = value, clear.element2[@id] = element2
/// clear.comment           (no value)
/// clear.cdata = simple cdata
/// clear.list.item = one [@id=1], two, three [@id=3], four
/// ```
pub fn sample_configuration() -> HierarchicalConfiguration {
    let mut tree = NodeTree::with_root_name("testconfig");
    let root = tree.root();

    leaf(&mut tree, root, "element", "value");

    let element2 = tree.add_child(root, "element2");
    let sub = tree.add_child(element2, "subelement");
    leaf(&mut tree, sub, "subsubelement", "I'm complex!");

    let element3 = leaf(&mut tree, root, "element3", "value");
    tree.set_attribute(element3, "name", "foo");

    let test = tree.add_child(root, "test");
    tree.add_child(test, "comment");
    leaf(&mut tree, test, "cdata", "<cdata value>");
    leaf(&mut tree, test, "entity", "1<2");

    let list = tree.add_child(root, "list");
    let one = leaf(&mut tree, list, "item", "one");
    tree.set_attribute(one, "name", "one");
    leaf(&mut tree, list, "item", "two");
    let sublist = tree.add_child(list, "sublist");
    leaf(&mut tree, sublist, "item", "five");
    leaf(&mut tree, sublist, "item", "six");
    let three = leaf(&mut tree, list, "item", "three");
    tree.set_attribute(three, "name", "three");
    leaf(&mut tree, list, "item", "four");

    let clear = tree.add_child(root, "clear");
    leaf(&mut tree, clear, "element", "value");
    let clear_element2 = leaf(&mut tree, clear, "element2", "value");
    tree.set_attribute(clear_element2, "id", "element2");
    tree.add_child(clear, "comment");
    leaf(&mut tree, clear, "cdata", "simple cdata");
    let clear_list = tree.add_child(clear, "list");
    let item = leaf(&mut tree, clear_list, "item", "one");
    tree.set_attribute(item, "id", "1");
    leaf(&mut tree, clear_list, "item", "two");
    let item = leaf(&mut tree, clear_list, "item", "three");
    tree.set_attribute(item, "id", "3");
    leaf(&mut tree, clear_list, "item", "four");

    HierarchicalConfiguration::from_tree(tree)
}

/// A listener that records every event it receives.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<VecDeque<ConfigurationBuilderEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest recorded event and checks its type.
    pub fn next_event(&self, expected: EventType) -> ConfigurationBuilderEvent {
        let event = self
            .events
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("expected a {} event, but none was recorded", expected));
        assert_eq!(event.event_type(), expected, "unexpected event type");
        event
    }

    /// Asserts that every recorded event has been consumed.
    pub fn assert_no_more_events(&self) {
        let events = self.events.lock();
        assert!(events.is_empty(), "unexpected events: {:?}", *events);
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &ConfigurationBuilderEvent) -> Result<()> {
        self.events.lock().push_back(*event);
        Ok(())
    }
}
