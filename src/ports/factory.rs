// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration factory trait definition.
//!
//! A configuration builder does not know how its result is produced. It
//! delegates to a `ConfigurationFactory`, typically a format adapter that
//! reads a file, every time the cached result has to be (re)built.

use crate::domain::Result;

/// A trait for producing configuration instances on demand.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so that builders holding them can be
/// shared between threads.
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{Configuration, HierarchicalConfiguration, Result};
/// use hiercfg::ports::ConfigurationFactory;
///
/// struct Defaults;
///
/// impl ConfigurationFactory for Defaults {
///     type Configuration = HierarchicalConfiguration;
///
///     fn name(&self) -> &str {
///         "defaults"
///     }
///
///     fn create(&self) -> Result<HierarchicalConfiguration> {
///         let mut config = HierarchicalConfiguration::new();
///         config.set("server.port", 8080);
///         Ok(config)
///     }
/// }
///
/// let config = Defaults.create().unwrap();
/// assert_eq!(config.get_i32("server.port").unwrap(), 8080);
/// ```
pub trait ConfigurationFactory: Send + Sync {
    /// The type of configuration this factory produces.
    type Configuration: Send + Sync;

    /// Returns a short name for this factory, used in logs and errors.
    fn name(&self) -> &str;

    /// Creates a new configuration instance.
    ///
    /// # Returns
    ///
    /// * `Ok(Configuration)` - A freshly created instance
    /// * `Err(ConfigError)` - The underlying source could not be read or parsed
    fn create(&self) -> Result<Self::Configuration>;
}

/// Adapts a closure into a [`ConfigurationFactory`].
///
/// # Examples
///
/// ```rust
/// use hiercfg::domain::{HierarchicalConfiguration, Result};
/// use hiercfg::ports::{ConfigurationFactory, FnFactory};
///
/// let factory = FnFactory::new("empty", || -> Result<_> {
///     Ok(HierarchicalConfiguration::new())
/// });
/// assert_eq!(factory.name(), "empty");
/// assert!(factory.create().is_ok());
/// ```
pub struct FnFactory<F> {
    name: String,
    create: F,
}

impl<F> FnFactory<F> {
    /// Wraps `create` under the given factory name.
    pub fn new(name: impl Into<String>, create: F) -> Self {
        FnFactory {
            name: name.into(),
            create,
        }
    }
}

impl<F, C> ConfigurationFactory for FnFactory<F>
where
    F: Fn() -> Result<C> + Send + Sync,
    C: Send + Sync,
{
    type Configuration = C;

    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Result<C> {
        (self.create)()
    }
}
