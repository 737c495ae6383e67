//! Macros for creating module-scoped registries.

/// Creates an isolated, module-scoped registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - A private `static` [`Registry`](crate::Registry), created on first use
/// - Free functions delegating to it
///
/// # Examples
///
/// ```rust
/// use class_registry::{define_registry, Class};
///
/// #[derive(Default)]
/// struct Sqlite;
///
/// define_registry!(drivers);
///
/// drivers::register("", Class::of::<Sqlite>());
///
/// let driver = drivers::create("Sqlite", None).unwrap().unwrap();
/// assert!(driver.is::<Sqlite>());
/// ```
///
/// # Multiple Registries
///
/// ```rust
/// use class_registry::{define_registry, Class};
///
/// #[derive(Default)]
/// struct Thing;
///
/// define_registry!(left);
/// define_registry!(right);
///
/// left::register("thing", Class::of::<Thing>());
///
/// assert!(left::contains("thing"));
/// assert!(!right::contains("thing"));
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::LazyLock;

            // Registry storage (module-private)
            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// The registry behind this module.
            pub fn registry() -> &'static $crate::Registry {
                &REGISTRY
            }

            /// Register a class under `key` (or its own name when `key` is empty).
            pub fn register(key: &str, class: $crate::ClassRef) {
                REGISTRY.register(key, class)
            }

            /// Look up the class registered under `key`.
            pub fn get(key: &str) -> Option<$crate::ClassRef> {
                REGISTRY.get(key)
            }

            /// Check if `key` is registered.
            pub fn contains(key: &str) -> bool {
                REGISTRY.contains(key)
            }

            /// Build an instance from a key or a class.
            pub fn create<'a>(
                target: impl Into<$crate::Target<'a>>,
                config: Option<$crate::Config>,
            ) -> Result<Option<$crate::Instance>, $crate::RegistryError> {
                REGISTRY.create(target, config)
            }

            /// Remove `key`, asking the `teardown` class method first.
            pub fn unregister(key: &str, teardown: &str) -> Result<bool, $crate::RegistryError> {
                REGISTRY.unregister(key, teardown)
            }

            /// Remove every key, asking the `teardown` class method first.
            pub fn clear(teardown: &str) -> Result<(), $crate::RegistryError> {
                REGISTRY.clear(teardown)
            }

            /// Copy of the key to class mapping.
            pub fn snapshot() -> $crate::IndexMap<String, $crate::ClassRef> {
                REGISTRY.registry()
            }

            /// Select the construction strategy used by `create`.
            pub fn set_init_method(init_method: impl Into<String>) {
                REGISTRY.set_init_method(init_method)
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Class;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Codec;

    #[test]
    fn test_define_registry_macro() {
        define_registry!(test_reg);

        test_reg::register("codec", Class::of::<Codec>());
        assert!(test_reg::get("codec").is_some());
        assert!(test_reg::contains("codec"));
        assert!(!test_reg::contains("other"));

        let instance = test_reg::create("codec", None).unwrap().unwrap();
        assert!(instance.is::<Codec>());
        assert_eq!(test_reg::snapshot().len(), 1);

        assert!(test_reg::unregister("codec", "").unwrap());
        assert!(test_reg::registry().is_empty());
    }

    #[test]
    fn test_multiple_registries() {
        define_registry!(reg_a);
        define_registry!(reg_b);

        reg_a::register("", Class::of::<Codec>());
        reg_b::set_init_method("init");

        assert!(reg_a::contains("Codec"));
        assert!(!reg_b::contains("Codec"));
        assert_eq!(reg_a::registry().init_method(), "");
        assert_eq!(reg_b::registry().init_method(), "init");

        reg_a::clear("").unwrap();
        assert!(reg_a::registry().is_empty());
    }

    #[test]
    fn test_tracing() {
        define_registry!(trace_test);

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        trace_test::set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(format!("{}", event));
        });

        trace_test::register("codec", Class::of::<Codec>());
        let _ = trace_test::get("codec");
        let _ = trace_test::contains("codec");
        trace_test::clear_trace_callback();
        let _ = trace_test::get("codec");

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 3);
        assert!(recorded[0].starts_with("register"));
        assert!(recorded[1].starts_with("get"));
        assert!(recorded[2].starts_with("contains"));
    }
}
