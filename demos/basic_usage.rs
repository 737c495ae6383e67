//! Basic usage example for class-registry.
//!
//! Demonstrates:
//! - Registering classes under explicit keys and under their own name
//! - Building instances with `create()`, passing configuration to the constructor
//! - Switching to an initializer method with `set_init_method()`
//! - Removing entries with `unregister()`, including a vetoed removal
//!
//! Run with: `cargo run --example basic_usage`

use class_registry::{define_registry, Class, Config};
use serde_json::json;

define_registry!(app);

#[derive(Debug, Default)]
struct Server {
    port: u64,
}

#[derive(Debug, Default)]
struct Cache {
    capacity: u64,
}

fn port_of(config: Option<Config>) -> u64 {
    config.and_then(|c| c["port"].as_u64()).unwrap_or(80)
}

fn main() {
    println!("=== class-registry: Basic Usage ===\n");

    app::set_trace_callback(|event| println!("   [trace] {}", event));

    // -------------------------------------------------------------------------
    // 1. Register classes
    // -------------------------------------------------------------------------
    println!("1. Registering classes...");

    app::register(
        "server",
        Class::builder(|config| Server {
            port: port_of(config),
        })
        .build(),
    );
    app::register(
        "",
        Class::builder(|_| Cache::default())
            .method("init", |cache: &mut Cache, config| {
                cache.capacity = config.and_then(|c| c["capacity"].as_u64()).unwrap_or(16);
            })
            .class_method("destroy", || false)
            .build(),
    );

    println!("   Keys: {:?}", app::snapshot().keys().collect::<Vec<_>>());

    // -------------------------------------------------------------------------
    // 2. Build an instance, configuration goes to the constructor
    // -------------------------------------------------------------------------
    println!("\n2. Creating a server with a port...");

    let server = app::create("server", Some(json!({ "port": 8080 }))).unwrap().unwrap();
    println!("   {:?} -> {:?}", server, server.downcast_ref::<Server>().unwrap());

    // -------------------------------------------------------------------------
    // 3. Build an instance through an initializer method
    // -------------------------------------------------------------------------
    println!("\n3. Creating a cache through its `init` method...");

    app::set_init_method("init");
    let cache = app::create("Cache", Some(json!({ "capacity": 256 }))).unwrap().unwrap();
    println!("   {:?} -> {:?}", cache, cache.downcast_ref::<Cache>().unwrap());
    app::set_init_method("");

    // -------------------------------------------------------------------------
    // 4. Missing keys are not errors
    // -------------------------------------------------------------------------
    println!("\n4. Creating an unknown class...");

    let missing = app::create("database", None).unwrap();
    println!("   create(\"database\") = {:?}", missing.map(|i| i.class().name().to_owned()));

    // -------------------------------------------------------------------------
    // 5. Unregister, the cache vetoes its own removal
    // -------------------------------------------------------------------------
    println!("\n5. Unregistering...");

    println!("   unregister(\"server\", \"destroy\") = {}", app::unregister("server", "destroy").unwrap());
    println!("   unregister(\"Cache\", \"destroy\")  = {}", app::unregister("Cache", "destroy").unwrap());
    println!("   unregister(\"Cache\", \"\")         = {}", app::unregister("Cache", "").unwrap());

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    app::clear_trace_callback();
    println!("\n=== Example Complete ===");
    println!("The registry now contains {} classes.", app::snapshot().len());
}
