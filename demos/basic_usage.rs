// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the hierarchical configuration crate.
//!
//! This example demonstrates:
//! - Building a configuration tree with `set` and `add`
//! - Addressing attributes with `[@name]` keys
//! - Scalar and list results
//! - Clearing elements and attributes independently
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use hiercfg::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Hierarchical Configuration: Basic Usage ===\n");

    let mut config = HierarchicalConfiguration::new();
    config.set("database.host", "localhost");
    config.set("database.port", 5432);
    config.set("database[@driver]", "postgres");

    // Example 1: Scalar values
    println!("--- Example 1: Scalar Values ---");
    println!("database.host      = {}", config.get_string("database.host")?);
    println!("database.port      = {}", config.get_i32("database.port")?);
    println!("database[@driver]  = {}", config.get_string("database[@driver]")?);

    // Example 2: Lists from repeated elements
    println!("\n--- Example 2: Lists ---");
    for replica in ["replica-a", "replica-b", "replica-c"] {
        config.add("database.replica", replica);
    }
    match config.get("database.replica") {
        Property::List(values) => {
            for (i, value) in values.iter().enumerate() {
                println!("replica[{}] = {}", i, value);
            }
        }
        Property::Scalar(value) => println!("single replica: {}", value),
        Property::Absent => println!("no replicas"),
    }

    // Example 3: Elements and attributes are cleared independently
    println!("\n--- Example 3: Clearing ---");
    config.set("database.replica[@role]", "standby");
    config.clear("database.replica");
    println!(
        "after clearing database.replica: element present = {}, attribute present = {}",
        config.contains("database.replica"),
        config.contains("database.replica[@role]")
    );

    // Example 4: Key enumeration
    println!("\n--- Example 4: Keys ---");
    for key in config.keys() {
        println!("{}", key);
    }

    Ok(())
}
