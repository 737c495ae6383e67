//! # Class Registry
//!
//! A named class registry ("factory"): register constructible classes under string
//! keys, build instances by name, and remove entries through teardown hooks that may
//! veto the removal.
//!
//! ## Quick Start
//!
//! ```rust
//! use class_registry::{Class, Registry};
//! use serde_json::json;
//!
//! struct Server {
//!     port: u64,
//! }
//!
//! let registry = Registry::new();
//! registry.register(
//!     "server",
//!     Class::builder(|config: Option<serde_json::Value>| Server {
//!         port: config.and_then(|c| c["port"].as_u64()).unwrap_or(80),
//!     })
//!     .build(),
//! );
//!
//! let server = registry.create("server", Some(json!({ "port": 8080 }))).unwrap().unwrap();
//! assert_eq!(server.downcast_ref::<Server>().unwrap().port, 8080);
//! ```
//!
//! ## Features
//!
//! - **Two construction strategies**: configuration goes to the constructor, or to a
//!   named initializer method called right after construction
//! - **Veto-able teardown**: class-level hooks decide whether an entry may be removed
//! - **Process-wide registries**: [`instance()`] hands out one shared registry per name
//! - **Tracing support**: per-registry event callback plus `tracing` events
//!
//! ## Main Items
//!
//! - [`Registry`] - register, get, create, unregister, clear
//! - [`Class`] / [`ClassBuilder`] - describe a constructible type and its hooks
//! - [`Instance`] - a constructed value tagged with its class
//! - [`instance()`] / [`default_instance`] - process-wide named registries
//! - [`define_registry!`] - module-scoped registry with free functions
//! - [`RegistryApi`] - expose registry operations on your own types

mod class;
mod instance;
mod instance_cache;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

/// Configuration passed to constructors and initializer methods.
pub type Config = serde_json::Value;

pub use class::{Class, ClassBuilder, ClassRef, Teardown};
pub use indexmap::IndexMap;
pub use instance::Instance;
pub use instance_cache::{default_instance, instance, instance_names};
pub use registry::{Registry, Target, TraceCallback};
pub use registry_error::{BoxError, HookKind, RegistryError};
pub use registry_event::RegistryEvent;
pub use registry_trait::RegistryApi;
