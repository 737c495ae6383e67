/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via
/// [`Registry::set_trace_callback`](crate::Registry::set_trace_callback).
///
/// # Examples
///
/// ```rust
/// use class_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register { key: "Button".into(), class: "Button".into() };
/// assert_eq!(event.to_string(), "register { key: Button, class: Button }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A class was registered (or replaced) under `key`.
    Register { key: String, class: String },

    /// A class was looked up.
    Get { key: String, found: bool },

    /// A key existence check was performed.
    Contains { key: String, found: bool },

    /// An instance was requested. `target` is the key, or the class name when a
    /// class was passed directly.
    Create { target: String, found: bool },

    /// Removal of `key` was requested.
    Unregister { key: String, removed: bool },

    /// The registry is being cleared. Each key then reports its own `Unregister`.
    Clear { teardown: String },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { key, class } => {
                write!(f, "register {{ key: {}, class: {} }}", key, class)
            }
            RegistryEvent::Get { key, found } => {
                write!(f, "get {{ key: {}, found: {} }}", key, found)
            }
            RegistryEvent::Contains { key, found } => {
                write!(f, "contains {{ key: {}, found: {} }}", key, found)
            }
            RegistryEvent::Create { target, found } => {
                write!(f, "create {{ target: {}, found: {} }}", target, found)
            }
            RegistryEvent::Unregister { key, removed } => {
                write!(f, "unregister {{ key: {}, removed: {} }}", key, removed)
            }
            RegistryEvent::Clear { teardown } if teardown.is_empty() => {
                write!(f, "Clearing the Registry")
            }
            RegistryEvent::Clear { teardown } => {
                write!(f, "Clearing the Registry (teardown: {})", teardown)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event_display() {
        let event = RegistryEvent::Get {
            key: "Button".into(),
            found: true,
        };
        assert_eq!(event.to_string(), "get { key: Button, found: true }");

        let event = RegistryEvent::Contains {
            key: "Slider".into(),
            found: false,
        };
        assert_eq!(event.to_string(), "contains { key: Slider, found: false }");

        let event = RegistryEvent::Create {
            target: "Button".into(),
            found: false,
        };
        assert_eq!(event.to_string(), "create { target: Button, found: false }");

        let event = RegistryEvent::Unregister {
            key: "Button".into(),
            removed: true,
        };
        assert_eq!(event.to_string(), "unregister { key: Button, removed: true }");
    }

    #[test]
    fn test_clear_display() {
        let event = RegistryEvent::Clear {
            teardown: String::new(),
        };
        assert_eq!(event.to_string(), "Clearing the Registry");

        let event = RegistryEvent::Clear {
            teardown: "destroy".into(),
        };
        assert_eq!(event.to_string(), "Clearing the Registry (teardown: destroy)");
    }

    #[test]
    fn test_registry_event_clone() {
        let event = RegistryEvent::Register {
            key: "k".into(),
            class: "K".into(),
        };
        assert_eq!(event.clone(), event);
    }
}
