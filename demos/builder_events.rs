// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder events example.
//!
//! This example demonstrates:
//! - Lazily building a configuration from a YAML file
//! - Observing `CONFIGURATION_REQUEST` and `RESET` events
//! - Reloading the file by resetting the builder
//!
//! To run this example:
//! ```bash
//! cargo run --example builder_events
//! ```

use hiercfg::prelude::*;
use std::fs;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Hierarchical Configuration: Builder Events ===\n");

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.yaml");
    fs::write(&path, "server:\n  port: 8080\n  '@name': primary\n")?;

    let builder = BasicConfigurationBuilder::new(YamlFileFactory::from_file(&path)?);
    builder.add_event_listener(
        EventType::ANY,
        |event: &ConfigurationBuilderEvent| -> Result<()> {
            println!("  event: {} from {}", event.event_type(), event.source());
            Ok(())
        },
    );

    println!("First request (builds, no event):");
    let config = builder.get_configuration()?;
    println!("  server.port = {}", config.get_i32("server.port")?);

    println!("Second request (cached):");
    builder.get_configuration()?;

    fs::write(&path, "server:\n  port: 9090\n  '@name': primary\n")?;
    println!("Reset after editing the file:");
    builder.reset()?;

    let config = builder.get_configuration()?;
    println!("  server.port = {}", config.get_i32("server.port")?);
    println!("  server[@name] = {}", config.get_string("server[@name]")?);

    Ok(())
}
