use std::any::Any;

/// A failure raised by third-party plugin code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginFault {
    /// The plugin hit an error while running.
    #[error("runtime fault: {0}")]
    Runtime(String),
    /// The plugin was built against an API that does not match the host,
    /// e.g. a missing method or an incompatible type.
    #[error("linkage fault: {0}")]
    Linkage(String),
}

impl PluginFault {
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    pub fn linkage(message: impl Into<String>) -> Self {
        Self::Linkage(message.into())
    }

    /// Convert a payload caught by `catch_unwind` into a runtime fault.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self::Runtime(format!("panicked: {message}"))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Runtime(m) | Self::Linkage(m) => m,
        }
    }

    pub fn is_linkage(&self) -> bool {
        matches!(self, Self::Linkage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_runtime_faults() {
        let fault = PluginFault::from_panic(Box::new("boom"));
        assert_eq!(fault, PluginFault::runtime("panicked: boom"));

        let fault = PluginFault::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(fault.message(), "panicked: owned boom");

        let fault = PluginFault::from_panic(Box::new(42u8));
        assert_eq!(fault.message(), "panicked: unknown panic");
    }

    #[test]
    fn display_names_the_cause() {
        let fault = PluginFault::linkage("no such method: render");
        assert!(fault.is_linkage());
        assert_eq!(fault.to_string(), "linkage fault: no such method: render");
    }
}
