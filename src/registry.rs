//! The named class registry.
//!
//! A [`Registry`] maps string keys to [`ClassRef`]s in registration order and builds
//! instances from them on demand.
//!
//! # Examples
//!
//! ```
//! use class_registry::{Class, Registry};
//!
//! #[derive(Default)]
//! struct Button;
//!
//! let registry = Registry::new();
//! registry.register("", Class::of::<Button>());
//!
//! let button = registry.create("Button", None).unwrap().unwrap();
//! assert!(button.is::<Button>());
//! assert!(registry.create("Slider", None).unwrap().is_none());
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use indexmap::IndexMap;

use crate::{ClassRef, Config, HookKind, Instance, RegistryError, RegistryEvent, Teardown};

/// Callback receiving every [`RegistryEvent`] of one registry.
pub type TraceCallback = Arc<dyn Fn(&RegistryEvent) + Send + Sync>;

/// What [`Registry::create`] should build: a registered key or a class handle.
#[derive(Debug, Clone)]
pub enum Target<'a> {
    /// Look the class up by its registered key.
    Key(&'a str),
    /// Use this class directly, registered or not.
    Class(ClassRef),
}

impl Target<'_> {
    fn label(&self) -> &str {
        match self {
            Target::Key(key) => *key,
            Target::Class(class) => class.name(),
        }
    }
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(key: &'a str) -> Self {
        Target::Key(key)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(key: &'a String) -> Self {
        Target::Key(key)
    }
}

impl From<ClassRef> for Target<'_> {
    fn from(class: ClassRef) -> Self {
        Target::Class(class)
    }
}

impl From<&ClassRef> for Target<'_> {
    fn from(class: &ClassRef) -> Self {
        Target::Class(Arc::clone(class))
    }
}

/// A named class registry.
///
/// All operations take `&self`; the entry map is guarded by a mutex that is never
/// held while user code (constructors, hooks, trace callbacks) runs, so hooks may
/// call back into the same registry.
#[derive(Default)]
pub struct Registry {
    entries: Mutex<IndexMap<String, ClassRef>>,
    init_method: RwLock<String>,
    trace: RwLock<Option<TraceCallback>>,
}

impl Registry {
    /// An empty registry that passes the configuration straight to constructors.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty registry that constructs without arguments and then calls the
    /// instance method `init_method` with the configuration.
    pub fn with_init_method(init_method: impl Into<String>) -> Self {
        let registry = Self::new();
        registry.set_init_method(init_method);
        registry
    }

    /// Process-wide registry for `name`; see [`instance`](crate::instance()).
    pub fn instance(name: &str) -> Arc<Registry> {
        crate::instance(name)
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for this registry's operations.
    ///
    /// The callback is invoked without any registry lock held.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback. Registered classes are not affected.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        let callback = self
            .trace
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------------------------------

    /// Name of the initializer method used by [`create`](Self::create). Empty by default.
    pub fn init_method(&self) -> String {
        self.init_method
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Select the construction strategy of [`create`](Self::create).
    ///
    /// With an empty name the configuration is passed to the constructor. Otherwise
    /// the constructor gets `None` and the configuration goes to the instance method
    /// of that name, if the class has one.
    pub fn set_init_method(&self, init_method: impl Into<String>) {
        *self.init_method.write().unwrap_or_else(|p| p.into_inner()) = init_method.into();
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    fn entries(&self) -> MutexGuard<'_, IndexMap<String, ClassRef>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn lookup(&self, key: &str) -> Option<ClassRef> {
        self.entries().get(key).cloned()
    }

    /// Register `class` under `key`, or under the class name when `key` is empty.
    ///
    /// An existing entry is replaced in place without running any teardown hook.
    pub fn register(&self, key: &str, class: ClassRef) {
        let key = if key.is_empty() { class.name() } else { key }.to_owned();
        tracing::debug!(key = %key, class = class.name(), "registering class");

        let class_name = class.name().to_owned();
        self.entries().insert(key.clone(), class);

        self.emit_event(RegistryEvent::Register {
            key,
            class: class_name,
        });
    }

    /// The class registered under `key`.
    pub fn get(&self, key: &str) -> Option<ClassRef> {
        let class = self.lookup(key);
        tracing::trace!(key, found = class.is_some(), "class lookup");

        self.emit_event(RegistryEvent::Get {
            key: key.to_owned(),
            found: class.is_some(),
        });

        class
    }

    /// Check if `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        let found = self.entries().contains_key(key);

        self.emit_event(RegistryEvent::Contains {
            key: key.to_owned(),
            found,
        });

        found
    }

    /// Build an instance from a key or a class handle.
    ///
    /// Returns `Ok(None)` when a key is not registered. See
    /// [`set_init_method`](Self::set_init_method) for how `config` is delivered.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Hook`] when the initializer method fails. The trace callback
    /// still sees a `Create` event for the attempt.
    pub fn create<'a>(
        &self,
        target: impl Into<Target<'a>>,
        config: Option<Config>,
    ) -> Result<Option<Instance>, RegistryError> {
        let target = target.into();
        let label = target.label().to_owned();
        let class = match target {
            Target::Key(key) => self.lookup(key),
            Target::Class(class) => Some(class),
        };

        let Some(class) = class else {
            tracing::trace!(key = %label, "nothing to create");
            self.emit_event(RegistryEvent::Create {
                target: label,
                found: false,
            });
            return Ok(None);
        };

        let init_method = self.init_method();
        let instance = if init_method.is_empty() {
            class.construct(config)
        } else {
            let mut instance = class.construct(None);
            if let Some(Err(source)) = class.call_method(&init_method, &mut instance, config) {
                tracing::debug!(key = %label, class = class.name(), init_method = %init_method, "initializer failed");
                self.emit_event(RegistryEvent::Create {
                    target: label,
                    found: true,
                });
                return Err(RegistryError::hook(
                    HookKind::Initializer,
                    class.name(),
                    &init_method,
                    source,
                ));
            }
            instance
        };

        tracing::debug!(key = %label, class = class.name(), "created instance");
        self.emit_event(RegistryEvent::Create {
            target: label,
            found: true,
        });

        Ok(Some(instance))
    }

    /// Remove `key`, first asking the class-level method `teardown` if one is named.
    ///
    /// The hook runs once per call. Returning [`Teardown::Keep`] (or `false`) vetoes
    /// the removal; a class without that method is removed unconditionally. Returns
    /// whether the key was removed; a missing key is a no-op returning `false`.
    ///
    /// If another class is registered under `key` while the hook runs, that class
    /// is left in place and the call returns `false`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Hook`] when the teardown hook fails. The entry is kept and
    /// the failure is still reported to the trace callback as an `Unregister` event.
    pub fn unregister(&self, key: &str, teardown: &str) -> Result<bool, RegistryError> {
        let Some(class) = self.lookup(key) else {
            self.emit_event(RegistryEvent::Unregister {
                key: key.to_owned(),
                removed: false,
            });
            return Ok(false);
        };

        let hook = if teardown.is_empty() {
            None
        } else {
            class.call_class_method(teardown)
        };

        let outcome = match hook {
            Some(Ok(outcome)) => outcome,
            Some(Err(source)) => {
                self.emit_event(RegistryEvent::Unregister {
                    key: key.to_owned(),
                    removed: false,
                });
                return Err(RegistryError::hook(
                    HookKind::Teardown,
                    class.name(),
                    teardown,
                    source,
                ));
            }
            None => Teardown::Remove,
        };

        // Only drop the entry the hook was asked about; a class registered under the
        // same key while the hook ran stays.
        let removed = outcome == Teardown::Remove && {
            let mut entries = self.entries();
            let unchanged = entries.get(key).is_some_and(|c| Arc::ptr_eq(c, &class));
            unchanged && entries.shift_remove(key).is_some()
        };

        if removed {
            tracing::debug!(key, class = class.name(), "unregistered class");
        } else {
            tracing::debug!(key, class = class.name(), teardown, "entry kept");
        }

        self.emit_event(RegistryEvent::Unregister {
            key: key.to_owned(),
            removed,
        });

        Ok(removed)
    }

    /// [`unregister`](Self::unregister) every key present when the call starts, in
    /// registration order. Vetoed keys stay.
    ///
    /// # Errors
    ///
    /// Stops at the first failing hook; keys handled before it stay removed.
    pub fn clear(&self, teardown: &str) -> Result<(), RegistryError> {
        self.emit_event(RegistryEvent::Clear {
            teardown: teardown.to_owned(),
        });

        for key in self.keys() {
            self.unregister(&key, teardown)?;
        }

        Ok(())
    }

    /// Independent copy of the key to class mapping, in registration order.
    pub fn registry(&self) -> IndexMap<String, ClassRef> {
        self.entries().clone()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.keys())
            .field("init_method", &self.init_method())
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
