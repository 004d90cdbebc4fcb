// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for builder events and their dispatch.

mod common;

use common::RecordingListener;
use hiercfg::domain::{
    ConfigError, Configuration, ConfigurationBuilderEvent, EventType, HierarchicalConfiguration,
    Result,
};
use hiercfg::ports::FnFactory;
use hiercfg::service::{BasicConfigurationBuilder, BuilderPhase};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

type Factory = FnFactory<Box<dyn Fn() -> Result<HierarchicalConfiguration> + Send + Sync>>;
type Builder = BasicConfigurationBuilder<Factory>;

/// A builder whose configurations record the build number under `build`.
fn new_builder() -> Builder {
    let builds = AtomicUsize::new(0);
    let create: Box<dyn Fn() -> Result<HierarchicalConfiguration> + Send + Sync> =
        Box::new(move || -> Result<HierarchicalConfiguration> {
            let mut config = HierarchicalConfiguration::new();
            config.set("build", (builds.fetch_add(1, Ordering::SeqCst) + 1) as i64);
            Ok(config)
        });
    BasicConfigurationBuilder::new(FnFactory::new("test", create))
}

fn build_number(config: &HierarchicalConfiguration) -> i64 {
    config.get_i64("build").unwrap()
}

#[test]
fn test_builder_event_type() {
    assert_eq!(EventType::BUILDER.super_type(), Some(EventType::ANY));
    assert_eq!(EventType::ANY.super_type(), None);
}

#[test]
fn test_builder_reset_event_type() {
    assert_eq!(EventType::RESET.super_type(), Some(EventType::BUILDER));
    assert!(EventType::RESET.is_subtype_of(EventType::ANY));
}

#[test]
fn test_configuration_request_event_type() {
    assert_eq!(
        EventType::CONFIGURATION_REQUEST.super_type(),
        Some(EventType::BUILDER)
    );
    assert!(!EventType::CONFIGURATION_REQUEST.is_subtype_of(EventType::RESET));
}

#[test]
fn test_builder_reset_event() {
    let builder = new_builder();
    let listener = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::RESET, listener.clone());

    builder.reset().unwrap();
    builder.reset_result().unwrap();

    let event = listener.next_event(EventType::RESET);
    assert_eq!(event.source(), builder.id());
    let event = listener.next_event(EventType::RESET);
    assert_eq!(event.source(), builder.id());
    listener.assert_no_more_events();
}

#[test]
fn test_remove_event_listener() {
    let builder = new_builder();
    let listener = Arc::new(RecordingListener::new());
    let id = builder.add_shared_listener(EventType::RESET, listener.clone());

    builder.reset().unwrap();
    assert!(builder.remove_event_listener(EventType::RESET, id));
    builder.reset_result().unwrap();

    listener.next_event(EventType::RESET);
    listener.assert_no_more_events();
}

#[test]
fn test_configuration_request_event() {
    let builder = new_builder();
    builder.get_configuration().unwrap();
    let listener = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::ANY, listener.clone());

    builder.get_configuration().unwrap();

    let event = listener.next_event(EventType::CONFIGURATION_REQUEST);
    assert_eq!(event.source(), builder.id());
    listener.assert_no_more_events();
}

#[test]
fn test_listener_matching_by_type() {
    let builder = new_builder();
    let any = Arc::new(RecordingListener::new());
    let reset_only = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::ANY, any.clone());
    builder.add_shared_listener(EventType::RESET, reset_only.clone());

    builder.get_configuration().unwrap();
    builder.get_configuration().unwrap();
    builder.reset().unwrap();

    any.next_event(EventType::CONFIGURATION_REQUEST);
    any.next_event(EventType::RESET);
    any.assert_no_more_events();
    reset_only.next_event(EventType::RESET);
    reset_only.assert_no_more_events();
}

#[test]
fn test_request_reset_rebuild_lifecycle() {
    let builder = new_builder();
    let listener = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::ANY, listener.clone());

    let first = builder.get_configuration().unwrap();
    listener.assert_no_more_events();

    let second = builder.get_configuration().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    listener.next_event(EventType::CONFIGURATION_REQUEST);
    listener.assert_no_more_events();

    builder.reset().unwrap();
    listener.next_event(EventType::RESET);
    listener.assert_no_more_events();

    let third = builder.get_configuration().unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(build_number(&third), 2);
    listener.assert_no_more_events();
}

#[test]
fn test_reset_on_configuration_request_event() {
    let builder = Arc::new(new_builder());
    let configuration = builder.get_configuration().unwrap();

    let requests = Arc::new(RecordingListener::new());
    let resets = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::CONFIGURATION_REQUEST, requests.clone());
    builder.add_shared_listener(EventType::RESET, resets.clone());
    let handle: Weak<Builder> = Arc::downgrade(&builder);
    builder.add_event_listener(
        EventType::CONFIGURATION_REQUEST,
        move |_: &ConfigurationBuilderEvent| -> Result<()> {
            match handle.upgrade() {
                Some(builder) => builder.reset_result(),
                None => Ok(()),
            }
        },
    );

    // The in-flight request still returns the instance cached before the reset
    let configuration2 = builder.get_configuration().unwrap();
    assert!(Arc::ptr_eq(&configuration, &configuration2));
    assert!(!builder.is_built());
    requests.next_event(EventType::CONFIGURATION_REQUEST);
    requests.assert_no_more_events();
    resets.next_event(EventType::RESET);
    resets.assert_no_more_events();

    // The next request builds anew and finds no cache to announce
    let configuration3 = builder.get_configuration().unwrap();
    assert!(!Arc::ptr_eq(&configuration, &configuration3));
    assert_eq!(build_number(&configuration3), 2);
    requests.assert_no_more_events();
    resets.assert_no_more_events();
}

#[test]
fn test_nested_reset_from_reset_listener() {
    let builder = Arc::new(new_builder());
    let listener = Arc::new(RecordingListener::new());
    let nested = Arc::new(AtomicUsize::new(0));

    let handle: Weak<Builder> = Arc::downgrade(&builder);
    let depth = Arc::clone(&nested);
    builder.add_event_listener(
        EventType::RESET,
        move |_: &ConfigurationBuilderEvent| -> Result<()> {
            if depth.fetch_add(1, Ordering::SeqCst) == 0 {
                if let Some(builder) = handle.upgrade() {
                    builder.reset()?;
                }
            }
            Ok(())
        },
    );
    builder.add_shared_listener(EventType::RESET, listener.clone());

    builder.get_configuration().unwrap();
    builder.reset().unwrap();

    // The nested reset ran to completion inside the outer dispatch
    assert_eq!(nested.load(Ordering::SeqCst), 2);
    listener.next_event(EventType::RESET);
    listener.next_event(EventType::RESET);
    listener.assert_no_more_events();
    assert!(!builder.is_built());
    assert_eq!(builder.state(), BuilderPhase::Idle);
}

#[test]
fn test_listener_error_propagates() {
    let builder = new_builder();
    let later = Arc::new(RecordingListener::new());
    builder.add_event_listener(
        EventType::RESET,
        |_: &ConfigurationBuilderEvent| -> Result<()> {
            Err(ConfigError::listener("reset vetoed"))
        },
    );
    builder.add_shared_listener(EventType::ANY, later.clone());

    builder.get_configuration().unwrap();
    let err = builder.reset().unwrap_err();

    assert!(matches!(err, ConfigError::ListenerError { .. }));
    // The cache was dropped before dispatch started
    assert!(!builder.is_built());
    assert_eq!(builder.state(), BuilderPhase::Idle);
    later.assert_no_more_events();
}

#[test]
fn test_request_listener_error_propagates() {
    let builder = new_builder();
    builder.get_configuration().unwrap();
    builder.add_event_listener(
        EventType::CONFIGURATION_REQUEST,
        |_: &ConfigurationBuilderEvent| -> Result<()> {
            Err(ConfigError::listener("request refused"))
        },
    );

    assert!(matches!(
        builder.get_configuration(),
        Err(ConfigError::ListenerError { .. })
    ));
    assert!(builder.is_built());
}

#[test]
fn test_build_error() {
    let create: Box<dyn Fn() -> Result<HierarchicalConfiguration> + Send + Sync> =
        Box::new(|| -> Result<HierarchicalConfiguration> {
            Err(ConfigError::SourceError {
                source_name: "test".to_string(),
                message: "unreachable".to_string(),
                source: None,
            })
        });
    let builder = BasicConfigurationBuilder::new(FnFactory::new("failing", create));
    let listener = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::ANY, listener.clone());

    let err = builder.get_configuration().unwrap_err();
    assert!(matches!(err, ConfigError::BuildError { .. }));
    assert!(!builder.is_built());
    listener.assert_no_more_events();
}

#[test]
fn test_factory_requesting_its_own_builder_fails() {
    let builder: Arc<Builder> = Arc::new_cyclic(|handle: &Weak<Builder>| {
        let handle = handle.clone();
        let create: Box<dyn Fn() -> Result<HierarchicalConfiguration> + Send + Sync> =
            Box::new(move || -> Result<HierarchicalConfiguration> {
                if let Some(builder) = handle.upgrade() {
                    builder.get_configuration()?;
                }
                Ok(HierarchicalConfiguration::new())
            });
        BasicConfigurationBuilder::new(FnFactory::new("self-referencing", create))
    });

    let err = builder.get_configuration().unwrap_err();
    assert!(matches!(err, ConfigError::BuildError { .. }));
    assert!(err.to_string().contains("while building it"));
    assert!(!builder.is_built());
    assert_eq!(builder.state(), BuilderPhase::Idle);
}

#[test]
fn test_user_defined_event_types() {
    let types = EventType::define_all(&[
        ("integration-test-child", Some("integration-test-parent")),
        ("integration-test-parent", None),
    ])
    .unwrap();
    let (child, parent) = (types[0], types[1]);

    assert_eq!(child.super_type(), Some(parent));
    assert_eq!(parent.super_type(), Some(EventType::ANY));
    assert_eq!(EventType::lookup("integration-test-child"), Some(child));
    assert_eq!(&*child.ancestors(), &[child, parent, EventType::ANY]);
}

#[test]
fn test_event_type_cycle_is_rejected() {
    let result = EventType::define_all(&[
        ("integration-test-cycle-a", Some("integration-test-cycle-b")),
        ("integration-test-cycle-b", Some("integration-test-cycle-a")),
    ]);
    assert!(matches!(result, Err(ConfigError::EventTypeCycle { .. })));
    assert_eq!(EventType::lookup("integration-test-cycle-a"), None);
}

#[test]
fn test_builder_shared_between_threads() {
    let builder = Arc::new(new_builder());
    let listener = Arc::new(RecordingListener::new());
    builder.add_shared_listener(EventType::CONFIGURATION_REQUEST, listener.clone());

    let first = builder.get_configuration().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let builder = Arc::clone(&builder);
            thread::spawn(move || builder.get_configuration().unwrap())
        })
        .collect();

    for handle in handles {
        let config = handle.join().unwrap();
        assert!(Arc::ptr_eq(&first, &config));
    }
    assert_eq!(listener.count(), 4);
}
