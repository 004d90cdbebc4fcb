// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML format adapter and file-backed configuration factory.
//!
//! This module maps YAML documents onto configuration node trees and back.
//!
//! # Mapping
//!
//! - A mapping entry `name: ...` becomes a child element `name`.
//! - A sequence under `name` becomes one sibling `name` element per item.
//! - A key starting with `@` holds an attribute; a sequence there holds the
//!   values of a multi-valued attribute.
//! - The key `$value` holds the value of a node that also has children or
//!   attributes. A node with neither is written as a bare scalar, or `null`
//!   when it has no value.
//! - An element whose name would read as one of the keys above, or that
//!   starts with `\`, is written with a leading `\`. One leading `\` is
//!   stripped from element keys on read.

use crate::domain::{ConfigError, HierarchicalConfiguration, NodeId, NodeTree, Result};
use crate::ports::{ConfigurationFactory, TreeFormat};
use directories::ProjectDirs;
use std::borrow::Cow;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";
const ATTRIBUTE_PREFIX: &str = "@";
const VALUE_KEY: &str = "$value";
const ESCAPE_PREFIX: &str = "\\";

fn file_label(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Reads a file, refusing anything larger than [`MAX_YAML_FILE_SIZE`].
fn read_bounded(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read file metadata: {}", file_label(path)),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read configuration file: {}", file_label(path)),
        source: Some(Box::new(e)),
    })
}

/// Converts a YAML scalar to its text form. Returns `None` for collections.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Returns the mapping key an element name is written under.
fn escape_element(name: &str) -> Cow<'_, str> {
    if name == VALUE_KEY
        || name.starts_with(ATTRIBUTE_PREFIX)
        || name.starts_with(ESCAPE_PREFIX)
    {
        Cow::Owned(format!("{}{}", ESCAPE_PREFIX, name))
    } else {
        Cow::Borrowed(name)
    }
}

fn unescape_element(key: &str) -> &str {
    key.strip_prefix(ESCAPE_PREFIX).unwrap_or(key)
}

fn parse_error(message: String) -> ConfigError {
    ConfigError::ParseError {
        message,
        source: None,
    }
}

/// YAML implementation of [`TreeFormat`].
///
/// # Examples
///
/// ```rust
/// use hiercfg::adapters::YamlFormat;
/// use hiercfg::domain::Configuration;
/// use hiercfg::ports::TreeFormat;
///
/// let yaml = "database:\n  host: localhost\n  port: 5432\n  '@type': postgres";
/// let config = YamlFormat::new().read(yaml).unwrap();
/// assert_eq!(config.get_string("database.host").unwrap(), "localhost");
/// assert_eq!(config.get_i32("database.port").unwrap(), 5432);
/// assert_eq!(config.get_string("database[@type]").unwrap(), "postgres");
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlFormat;

impl YamlFormat {
    /// Creates a new YAML format.
    pub fn new() -> Self {
        YamlFormat
    }

    /// Reads and parses a YAML file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<HierarchicalConfiguration> {
        let path = path.as_ref();
        let content = read_bounded(path)?;
        tracing::debug!("Loading YAML configuration from {}", path.display());
        self.read(&content)
    }

    /// Serializes a configuration and writes it to a file.
    pub fn save<P: AsRef<Path>>(&self, config: &HierarchicalConfiguration, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.write(config)?;
        fs::write(path, content).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Failed to write configuration file: {}", file_label(path)),
            source: Some(Box::new(e)),
        })?;
        tracing::debug!("Saved YAML configuration to {}", path.display());
        Ok(())
    }

    fn fill_node(tree: &mut NodeTree, id: NodeId, value: &Value) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            Value::Mapping(map) => {
                for (key, val) in map {
                    let key = scalar_text(key)
                        .ok_or_else(|| parse_error("Mapping keys must be scalars".to_string()))?;
                    Self::fill_entry(tree, id, &key, val)?;
                }
                Ok(())
            }
            Value::Sequence(_) => Err(parse_error(format!(
                "Nested sequence under '{}' cannot be mapped to nodes",
                tree.name(id)
            ))),
            Value::Tagged(tagged) => Self::fill_node(tree, id, &tagged.value),
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    tree.set_value(id, text);
                }
                Ok(())
            }
        }
    }

    fn fill_entry(tree: &mut NodeTree, id: NodeId, key: &str, value: &Value) -> Result<()> {
        if key == VALUE_KEY {
            let text = scalar_text(value)
                .ok_or_else(|| parse_error(format!("'{}' must hold a scalar", VALUE_KEY)))?;
            tree.set_value(id, text);
        } else if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            let items = match value {
                Value::Sequence(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            for item in items {
                let text = match item {
                    Value::Null => String::new(),
                    other => scalar_text(other).ok_or_else(|| {
                        parse_error(format!("Attribute '{}' must hold scalars", attribute))
                    })?,
                };
                tree.add_attribute_value(id, attribute, text);
            }
        } else if let Value::Sequence(items) = value {
            let name = unescape_element(key);
            for item in items {
                let child = tree.add_child(id, name);
                Self::fill_node(tree, child, item)?;
            }
        } else {
            let child = tree.add_child(id, unescape_element(key));
            Self::fill_node(tree, child, value)?;
        }
        Ok(())
    }

    fn node_to_value(tree: &NodeTree, id: NodeId) -> Value {
        let scalar = tree.value(id).map(|v| Value::String(v.as_str().to_string()));
        if !tree.has_children(id) && !tree.has_attributes(id) {
            return scalar.unwrap_or(Value::Null);
        }

        let mut map = Mapping::new();
        for (name, values) in tree.attributes(id) {
            let key = Value::String(format!("{}{}", ATTRIBUTE_PREFIX, name));
            let mut items: Vec<Value> = values
                .iter()
                .map(|v| Value::String(v.as_str().to_string()))
                .collect();
            let entry = if items.len() == 1 {
                items.remove(0)
            } else {
                Value::Sequence(items)
            };
            map.insert(key, entry);
        }
        if let Some(scalar) = scalar {
            map.insert(Value::String(VALUE_KEY.to_string()), scalar);
        }

        // Siblings sharing a name are grouped under their first occurrence.
        let mut groups: Vec<(&str, Vec<Value>)> = Vec::new();
        for child in tree.children(id) {
            let name = tree.name(*child);
            let value = Self::node_to_value(tree, *child);
            match groups.iter_mut().find(|(n, _)| *n == name) {
                Some((_, values)) => values.push(value),
                None => groups.push((name, vec![value])),
            }
        }
        for (name, mut values) in groups {
            let entry = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Sequence(values)
            };
            map.insert(Value::String(escape_element(name).into_owned()), entry);
        }
        Value::Mapping(map)
    }
}

impl TreeFormat for YamlFormat {
    fn read(&self, content: &str) -> Result<HierarchicalConfiguration> {
        let mut tree = NodeTree::new();
        if content.trim().is_empty() {
            return Ok(HierarchicalConfiguration::from_tree(tree));
        }

        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;
        if matches!(value, Value::Sequence(_)) {
            return Err(parse_error(
                "A YAML configuration document must not be a sequence".to_string(),
            ));
        }

        let root = tree.root();
        Self::fill_node(&mut tree, root, &value)?;
        Ok(HierarchicalConfiguration::from_tree(tree))
    }

    fn write(&self, config: &HierarchicalConfiguration) -> Result<String> {
        let tree = config.tree();
        let value = Self::node_to_value(tree, tree.root());
        serde_yaml::to_string(&value).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to serialize YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Configuration factory that reads a YAML file.
///
/// The file is read anew on every call to
/// [`create`](ConfigurationFactory::create), so resetting a builder that
/// uses this factory picks up changes made on disk. The location is resolved
/// once, when the factory is created.
///
/// # Examples
///
/// ```rust,no_run
/// use hiercfg::adapters::YamlFileFactory;
/// use hiercfg::service::BasicConfigurationBuilder;
///
/// // Load from a specific file
/// let factory = YamlFileFactory::from_file("/path/to/config.yaml").unwrap();
/// let builder = BasicConfigurationBuilder::new(factory);
///
/// // Load from default OS location
/// let factory = YamlFileFactory::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileFactory {
    /// Canonical path to the YAML file
    file_path: PathBuf,
    /// YAML format
    format: YamlFormat,
}

impl YamlFileFactory {
    /// Creates a factory reading a specific file path.
    ///
    /// The file must exist; its path is canonicalized.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hiercfg::adapters::YamlFileFactory;
    ///
    /// let factory = YamlFileFactory::from_file("/etc/myapp/config.yaml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref();

        let canonical_path = file_path
            .canonicalize()
            .map_err(|e| ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!("Invalid or inaccessible path: {}", file_label(file_path)),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            file_path: canonical_path,
            format: YamlFormat::new(),
        })
    }

    /// Creates a factory reading `config.yaml` from the default OS-appropriate
    /// configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yaml")
    }

    /// Creates a factory reading a custom file name from the default location.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier
    /// * `filename` - The configuration file name (e.g., "settings.yaml")
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::from_file(proj_dirs.config_dir().join(filename))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigurationFactory for YamlFileFactory {
    type Configuration = HierarchicalConfiguration;

    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn create(&self) -> Result<HierarchicalConfiguration> {
        self.format.load(&self.file_path)
    }
}
