//! Integration tests for the process-wide named registries.
//!
//! NOTE: Tests touching the default registry use #[serial] because they share it.
//! Named registries use names unique to each test.

use class_registry::{default_instance, instance, instance_names, Class, Registry};
use serial_test::serial;
use std::sync::Arc;
use std::thread;

#[derive(Default)]
struct Shared;

#[test]
#[serial]
fn test_default_instance_identity() {
    let first = default_instance();
    let second = default_instance();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &instance("")));
    assert!(Arc::ptr_eq(&first, &Registry::instance("")));
}

#[test]
#[serial]
fn test_default_instance_keeps_state() {
    default_instance().register("shared", Class::of::<Shared>());
    assert!(default_instance().contains("shared"));

    default_instance().clear("").unwrap();
    assert!(default_instance().is_empty());
}

#[test]
fn test_named_instances() {
    let name = format!("named-{}", std::process::id());
    let other = format!("{}1", name);

    let first = instance(&name);
    let second = instance(&other);
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &default_instance()));

    assert!(Arc::ptr_eq(&instance(&name), &first));
    assert!(Arc::ptr_eq(&instance(&other), &second));

    let names = instance_names();
    assert!(names.contains(&name));
    assert!(names.contains(&other));
}

#[test]
fn test_named_instances_are_isolated() {
    let plugins = instance("isolated-plugins");
    let themes = instance("isolated-themes");

    plugins.register("", Class::of::<Shared>());

    assert!(plugins.contains("Shared"));
    assert!(!themes.contains("Shared"));
}

#[test]
fn test_concurrent_first_access_creates_one_registry() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| instance("concurrent-first-access")))
        .collect();

    let registries: Vec<Arc<Registry>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for registry in &registries[1..] {
        assert!(Arc::ptr_eq(registry, &registries[0]));
    }
}
