// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event listener trait definition.
//!
//! Listeners are notified synchronously, on the thread that triggered the
//! event, while the firing builder is still inside the state transition that
//! caused it. A listener may call back into the builder.

use crate::domain::{ConfigurationBuilderEvent, Result};
use std::sync::Arc;

/// Shared handle to a registered listener.
pub type SharedListener = Arc<dyn EventListener>;

/// A trait for receiving builder events.
///
/// Any `Fn(&ConfigurationBuilderEvent) -> Result<()>` closure that is
/// `Send + Sync` is a listener. Returning an error aborts the remainder of
/// the dispatch and propagates the error to whoever triggered the event.
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{BuilderId, ConfigurationBuilderEvent, EventType, Result};
/// use hiercfg::ports::EventListener;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let resets = AtomicUsize::new(0);
/// let listener = |event: &ConfigurationBuilderEvent| -> Result<()> {
///     if event.event_type() == EventType::RESET {
///         resets.fetch_add(1, Ordering::SeqCst);
///     }
///     Ok(())
/// };
///
/// let event = ConfigurationBuilderEvent::new(BuilderId::next(), EventType::RESET);
/// listener.on_event(&event).unwrap();
/// assert_eq!(resets.load(Ordering::SeqCst), 1);
/// ```
pub trait EventListener: Send + Sync {
    /// Handles an event.
    fn on_event(&self, event: &ConfigurationBuilderEvent) -> Result<()>;
}

impl<F> EventListener for F
where
    F: Fn(&ConfigurationBuilderEvent) -> Result<()> + Send + Sync,
{
    fn on_event(&self, event: &ConfigurationBuilderEvent) -> Result<()> {
        self(event)
    }
}
