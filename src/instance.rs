use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::ClassRef;

/// A value built by [`Registry::create`](crate::Registry::create), tagged with the
/// class that built it.
pub struct Instance {
    class: ClassRef,
    value: Box<dyn Any + Send>,
}

impl Instance {
    pub(crate) fn new(class: ClassRef, value: Box<dyn Any + Send>) -> Self {
        Self { class, value }
    }

    /// The class this instance was built from.
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// `true` when this instance was built by exactly `class` (pointer identity).
    pub fn is_instance_of(&self, class: &ClassRef) -> bool {
        Arc::ptr_eq(&self.class, class)
    }

    /// `true` when the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the wrapped value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Mutably borrow the wrapped value as a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Take the wrapped value out as a `T`, or hand the instance back unchanged.
    pub fn downcast<T: Any>(self) -> Result<Box<T>, Self> {
        let Self { class, value } = self;
        value.downcast::<T>().map_err(|value| Self { class, value })
    }

    /// Drop the class tag and return the type-erased value.
    pub fn into_any(self) -> Box<dyn Any + Send> {
        self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut (dyn Any + Send) {
        &mut *self.value
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .finish_non_exhaustive()
    }
}
