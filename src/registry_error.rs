use std::fmt;

/// Error type hooks may return. Anything implementing `std::error::Error`, as well as
/// `&str` and `String`, converts into it.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which kind of hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// Instance method run by `create` after construction.
    Initializer,
    /// Class method run by `unregister` or `clear` before removal.
    Teardown,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Initializer => f.write_str("initializer"),
            HookKind::Teardown => f.write_str("teardown"),
        }
    }
}

/// Failures surfaced by the registry.
///
/// Missing keys are never errors; the only failure is a hook that returned `Err`.
/// The hook's own error is kept as the [`source`](std::error::Error::source).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{kind} `{method}` of class `{class}` failed: {source}")]
    Hook {
        kind: HookKind,
        class: String,
        method: String,
        source: BoxError,
    },
}

impl RegistryError {
    pub(crate) fn hook(kind: HookKind, class: &str, method: &str, source: BoxError) -> Self {
        RegistryError::Hook {
            kind,
            class: class.to_owned(),
            method: method.to_owned(),
            source,
        }
    }

    /// Hand back the error the hook returned.
    pub fn into_source(self) -> BoxError {
        match self {
            RegistryError::Hook { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug, PartialEq)]
    struct Disk;

    impl fmt::Display for Disk {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("disk full")
        }
    }

    impl Error for Disk {}

    #[test]
    fn test_hook_display() {
        let err = RegistryError::hook(HookKind::Teardown, "Cache", "destroy", "busy".into());
        assert_eq!(err.to_string(), "teardown `destroy` of class `Cache` failed: busy");

        let err = RegistryError::hook(HookKind::Initializer, "Cache", "init", "bad".into());
        assert_eq!(err.to_string(), "initializer `init` of class `Cache` failed: bad");
    }

    #[test]
    fn test_source_is_kept() {
        let err = RegistryError::hook(HookKind::Initializer, "Cache", "init", Box::new(Disk));
        assert_eq!(err.source().unwrap().to_string(), "disk full");

        let source = err.into_source();
        assert_eq!(source.downcast_ref::<Disk>(), Some(&Disk));
    }

    #[test]
    fn test_hook_kind_display() {
        assert_eq!(HookKind::Initializer.to_string(), "initializer");
        assert_eq!(HookKind::Teardown.to_string(), "teardown");
    }
}
