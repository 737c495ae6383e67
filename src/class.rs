//! Class descriptors: the constructible "type references" stored in a registry.
//!
//! A [`Class`] bundles an intrinsic name, a constructor and two optional tables of
//! named methods. Instance methods act as initializers and receive the configuration
//! passed to [`Registry::create`](crate::Registry::create). Class methods act as
//! teardown hooks probed by [`Registry::unregister`](crate::Registry::unregister).
//!
//! Methods are looked up by name at call time, so a class only needs to provide the
//! hooks it actually cares about.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{BoxError, Config, Instance};

/// Shared handle to a class. Two handles refer to the same class when they are
/// [`Arc::ptr_eq`].
pub type ClassRef = Arc<Class>;

type Constructor = Box<dyn Fn(Option<Config>) -> Box<dyn Any + Send> + Send + Sync>;
type InstanceMethod =
    Box<dyn Fn(&mut (dyn Any + Send), Option<Config>) -> Result<(), BoxError> + Send + Sync>;
type ClassMethod = Box<dyn Fn() -> Result<Teardown, BoxError> + Send + Sync>;

/// Outcome of a teardown hook.
///
/// `()` converts to [`Teardown::Remove`] and `bool` converts with `false` meaning
/// [`Teardown::Keep`], so hooks can return whatever is most natural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teardown {
    /// Let the registry drop the entry.
    #[default]
    Remove,
    /// Veto the removal; the entry stays registered.
    Keep,
}

impl From<()> for Teardown {
    fn from(_: ()) -> Self {
        Teardown::Remove
    }
}

impl From<bool> for Teardown {
    fn from(remove: bool) -> Self {
        if remove {
            Teardown::Remove
        } else {
            Teardown::Keep
        }
    }
}

/// A constructible type registered under a key.
pub struct Class {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    constructor: Constructor,
    methods: IndexMap<String, InstanceMethod>,
    class_methods: IndexMap<String, ClassMethod>,
}

impl Class {
    /// Start building a class around `constructor`.
    ///
    /// The constructor receives the configuration given to `create`, or `None` when the
    /// registry builds the value without arguments (see [`Registry::set_init_method`]).
    ///
    /// [`Registry::set_init_method`]: crate::Registry::set_init_method
    pub fn builder<T, F>(constructor: F) -> ClassBuilder<T>
    where
        T: Send + 'static,
        F: Fn(Option<Config>) -> T + Send + Sync + 'static,
    {
        ClassBuilder {
            name: None,
            constructor: Box::new(move |config| -> Box<dyn Any + Send> {
                Box::new(constructor(config))
            }),
            methods: IndexMap::new(),
            class_methods: IndexMap::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// A class whose constructor ignores its configuration and returns `T::default()`.
    pub fn of<T: Default + Send + 'static>() -> ClassRef {
        Self::builder(|_| T::default()).build()
    }

    /// Intrinsic name, used as the key when a class is registered under an empty key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full Rust type name of the values this class constructs.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the values this class constructs.
    pub fn value_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether instances expose an instance method called `name`.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Whether the class exposes a class-level method called `name`.
    pub fn has_class_method(&self, name: &str) -> bool {
        self.class_methods.contains_key(name)
    }

    /// Names of the instance methods, in declaration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Names of the class-level methods, in declaration order.
    pub fn class_method_names(&self) -> impl Iterator<Item = &str> {
        self.class_methods.keys().map(String::as_str)
    }

    pub(crate) fn construct(self: &Arc<Self>, config: Option<Config>) -> Instance {
        Instance::new(Arc::clone(self), (self.constructor)(config))
    }

    /// Invoke an instance method. `None` when the class has no such method.
    pub(crate) fn call_method(
        &self,
        name: &str,
        instance: &mut Instance,
        config: Option<Config>,
    ) -> Option<Result<(), BoxError>> {
        let method = self.methods.get(name)?;
        Some(method(instance.value_mut(), config))
    }

    /// Invoke a class method. `None` when the class has no such method.
    pub(crate) fn call_class_method(&self, name: &str) -> Option<Result<Teardown, BoxError>> {
        let method = self.class_methods.get(name)?;
        Some(method())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("class_methods", &self.class_methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder returned by [`Class::builder`].
pub struct ClassBuilder<T> {
    name: Option<String>,
    constructor: Constructor,
    methods: IndexMap<String, InstanceMethod>,
    class_methods: IndexMap<String, ClassMethod>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Send + 'static> ClassBuilder<T> {
    /// Override the intrinsic name. An empty name keeps the default, which is the
    /// short Rust type name of `T`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an infallible instance method.
    pub fn method<F>(self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&mut T, Option<Config>) + Send + Sync + 'static,
    {
        self.try_method(name, move |this: &mut T, config| {
            method(this, config);
            Ok::<(), BoxError>(())
        })
    }

    /// Add an instance method that may fail. Its error reaches the caller of
    /// `create` unchanged, wrapped in [`RegistryError::Hook`](crate::RegistryError::Hook).
    pub fn try_method<F, E>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&mut T, Option<Config>) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let method: InstanceMethod = Box::new(
            move |value: &mut (dyn Any + Send), config: Option<Config>| match value.downcast_mut::<T>() {
                Some(this) => method(this, config).map_err(Into::into),
                None => Ok(()),
            },
        );
        self.methods.insert(name.into(), method);
        self
    }

    /// Add an infallible class-level method.
    pub fn class_method<F, R>(self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Into<Teardown>,
    {
        self.try_class_method(name, move || Ok::<R, BoxError>(method()))
    }

    /// Add a class-level method that may fail.
    pub fn try_class_method<F, R, E>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn() -> Result<R, E> + Send + Sync + 'static,
        R: Into<Teardown>,
        E: Into<BoxError>,
    {
        let method: ClassMethod =
            Box::new(move || -> Result<Teardown, BoxError> { method().map(Into::into).map_err(Into::into) });
        self.class_methods.insert(name.into(), method);
        self
    }

    /// Finish the class and share it as a [`ClassRef`].
    pub fn build(self) -> ClassRef {
        let type_name = std::any::type_name::<T>();
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => short_type_name(type_name),
        };

        Arc::new(Class {
            name,
            type_id: TypeId::of::<T>(),
            type_name,
            constructor: self.constructor,
            methods: self.methods,
            class_methods: self.class_methods,
        })
    }
}

/// Strip the module path from every path in `type_name`, keeping generics,
/// tuples and arrays: `my_crate::Button<alloc::string::String>` becomes
/// `Button<String>`.
fn short_type_name(type_name: &str) -> String {
    let mut short = String::with_capacity(type_name.len());
    let mut path_start = None;
    for (i, c) in type_name.char_indices() {
        let in_path = c.is_alphanumeric() || c == '_' || c == ':';
        match (path_start, in_path) {
            (None, true) => path_start = Some(i),
            (Some(start), false) => {
                short.push_str(last_segment(&type_name[start..i]));
                path_start = None;
            }
            _ => {}
        }
        if !in_path {
            short.push(c);
        }
    }
    if let Some(start) = path_start {
        short.push_str(last_segment(&type_name[start..]));
    }
    short
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Widget {
        label: Option<Config>,
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(short_type_name("a::b::Widget"), "Widget");
        assert_eq!(short_type_name("a::Button<alloc::string::String>"), "Button<String>");
        assert_eq!(short_type_name("&str"), "&str");
        assert_eq!(
            short_type_name("(alloc::string::String, alloc::vec::Vec<u8>)"),
            "(String, Vec<u8>)"
        );
        assert_eq!(short_type_name("[alloc::string::String; 2]"), "[String; 2]");
        assert_eq!(
            short_type_name("core::option::Option<&dyn core::any::Any>"),
            "Option<&dyn Any>"
        );
    }

    #[test]
    fn test_default_name_of_compound_types() {
        assert_eq!(Class::of::<(String, Vec<u8>)>().name(), "(String, Vec<u8>)");
        assert_eq!(Class::of::<[String; 2]>().name(), "[String; 2]");
        assert_eq!(Class::of::<Option<Widget>>().name(), "Option<Widget>");
    }

    #[test]
    fn test_default_name_is_short_type_name() {
        let class = Class::of::<Widget>();
        assert_eq!(class.name(), "Widget");
        assert_eq!(class.value_type_id(), TypeId::of::<Widget>());
        assert!(class.type_name().ends_with("::Widget"));
    }

    #[test]
    fn test_name_override() {
        let class = Class::builder(|_| Widget::default()).name("Button").build();
        assert_eq!(class.name(), "Button");
        assert_eq!(class.to_string(), "Button");

        let class = Class::builder(|_| Widget::default()).name("").build();
        assert_eq!(class.name(), "Widget");
    }

    #[test]
    fn test_capability_checks() {
        let class = Class::builder(|label| Widget { label })
            .method("init", |this, config| this.label = config)
            .class_method("destroy", || ())
            .build();

        assert!(class.has_method("init"));
        assert!(!class.has_method("destroy"));
        assert!(class.has_class_method("destroy"));
        assert!(!class.has_class_method("init"));
        assert_eq!(class.method_names().collect::<Vec<_>>(), vec!["init"]);
        assert_eq!(class.class_method_names().collect::<Vec<_>>(), vec!["destroy"]);
    }

    #[test]
    fn test_construct_passes_config() {
        let class = Class::builder(|label| Widget { label }).build();
        let instance = class.construct(Some(serde_json::json!("ok")));
        let widget = instance.downcast_ref::<Widget>().unwrap();
        assert_eq!(widget.label, Some(serde_json::json!("ok")));
    }

    #[test]
    fn test_call_missing_method_is_none() {
        let class = Class::of::<Widget>();
        let mut instance = class.construct(None);
        assert!(class.call_method("init", &mut instance, None).is_none());
        assert!(class.call_class_method("destroy").is_none());
    }

    #[test]
    fn test_class_method_outcomes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let class = Class::builder(|_| Widget::default())
            .class_method("destroy", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .class_method("keep", || false)
            .class_method("allow", || true)
            .try_class_method("broken", || Err::<(), _>("boom"))
            .build();

        assert_eq!(class.call_class_method("destroy").unwrap().unwrap(), Teardown::Remove);
        assert_eq!(class.call_class_method("keep").unwrap().unwrap(), Teardown::Keep);
        assert_eq!(class.call_class_method("allow").unwrap().unwrap(), Teardown::Remove);
        let err = class.call_class_method("broken").unwrap().unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
