//! Trait for exposing a registry's operations on another type.
//!
//! Implementing [`RegistryApi`] only requires pointing at a [`Registry`]; the
//! registration, lookup, construction and removal methods are provided by default
//! implementations that delegate to it. The accessor doubles as a read-only
//! back-reference to the registry itself.

use crate::{ClassRef, Config, Instance, Registry, RegistryError, Target};

/// Registry operations for any type that owns or borrows a [`Registry`].
///
/// # Examples
///
/// ```rust
/// use class_registry::{Class, Registry, RegistryApi};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Panel;
///
/// struct Application {
///     widgets: Arc<Registry>,
/// }
///
/// impl RegistryApi for Application {
///     fn factory(&self) -> &Registry {
///         &self.widgets
///     }
/// }
///
/// let app = Application { widgets: class_registry::instance("docs::widgets") };
/// app.register("panel", Class::of::<Panel>());
/// assert!(app.create("panel", None).unwrap().is_some());
/// assert!(app.factory().contains("panel"));
/// ```
pub trait RegistryApi {
    /// The registry the other methods delegate to.
    fn factory(&self) -> &Registry;

    /// Register `class` under `key`; see [`Registry::register`].
    fn register(&self, key: &str, class: ClassRef) {
        self.factory().register(key, class)
    }

    /// Look up the class under `key`; see [`Registry::get`].
    fn get(&self, key: &str) -> Option<ClassRef> {
        self.factory().get(key)
    }

    /// Build an instance; see [`Registry::create`].
    fn create<'a>(
        &self,
        target: impl Into<Target<'a>>,
        config: Option<Config>,
    ) -> Result<Option<Instance>, RegistryError> {
        self.factory().create(target, config)
    }

    /// Remove `key`; see [`Registry::unregister`].
    fn unregister(&self, key: &str, teardown: &str) -> Result<bool, RegistryError> {
        self.factory().unregister(key, teardown)
    }

    /// Remove every key; see [`Registry::clear`].
    fn clear(&self, teardown: &str) -> Result<(), RegistryError> {
        self.factory().clear(teardown)
    }
}
