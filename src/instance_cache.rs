//! Process-wide registries keyed by name.
//!
//! The first call for a name creates its [`Registry`]; every later call returns the
//! same `Arc`. The empty name is the default slot. Entries live for the rest of the
//! process.

use std::sync::{Arc, LazyLock, Mutex};

use indexmap::IndexMap;

use crate::Registry;

/// Global registries, created on first access.
static INSTANCES: LazyLock<Mutex<IndexMap<String, Arc<Registry>>>> =
    LazyLock::new(|| Mutex::new(IndexMap::new()));

/// The process-wide registry called `name`, creating it on first use.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// let a = class_registry::instance("widgets");
/// let b = class_registry::instance("widgets");
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(!Arc::ptr_eq(&a, &class_registry::instance("layouts")));
/// ```
pub fn instance(name: &str) -> Arc<Registry> {
    let mut instances = INSTANCES.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(registry) = instances.get(name) {
        return Arc::clone(registry);
    }

    tracing::debug!(registry = name, "creating registry instance");
    let registry = Arc::new(Registry::new());
    instances.insert(name.to_owned(), Arc::clone(&registry));
    registry
}

/// The default process-wide registry, same as `instance("")`.
pub fn default_instance() -> Arc<Registry> {
    instance("")
}

/// Names of the process-wide registries created so far, in creation order.
pub fn instance_names() -> Vec<String> {
    INSTANCES
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .keys()
        .cloned()
        .collect()
}
