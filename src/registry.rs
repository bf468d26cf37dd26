//! Category-keyed registry of error constructors and callbacks

use crate::core_types::descriptor::ErrorDescriptor;
use crate::core_types::errors::{ErrorClass, ErrorLike, StepError};
use crate::logging::log_debug;
use crate::resolver::Resolution;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds an error instance from a hydrated descriptor.
pub type ConstructorFn = Arc<dyn Fn(ErrorDescriptor) -> StepError + Send + Sync>;

/// Receives the resolution and hydrated descriptor; may return any value.
pub type CallbackFn = Arc<dyn Fn(&Resolution, ErrorDescriptor) -> ErrorLike + Send + Sync>;

/// Association of a category key with either a constructor or a callback.
#[derive(Clone)]
pub enum Registration {
    Constructed {
        key: String,
        constructor: ConstructorFn,
    },
    Delegated {
        key: String,
        callback: CallbackFn,
    },
}

impl Registration {
    pub fn constructor<F>(key: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(ErrorDescriptor) -> StepError + Send + Sync + 'static,
    {
        Self::Constructed {
            key: key.into(),
            constructor: Arc::new(constructor),
        }
    }

    /// Register an [`ErrorClass`] as the constructor for `key`.
    pub fn class(key: impl Into<String>, class: ErrorClass) -> Self {
        Self::constructor(key, move |descriptor| class.construct(descriptor))
    }

    pub fn callback<F>(key: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Resolution, ErrorDescriptor) -> ErrorLike + Send + Sync + 'static,
    {
        Self::Delegated {
            key: key.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Constructed { key, .. } | Self::Delegated { key, .. } => key,
        }
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Delegated { .. })
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = if self.is_callback() {
            "callback"
        } else {
            "constructor"
        };
        f.debug_struct("Registration")
            .field("key", &self.key())
            .field("style", &style)
            .finish()
    }
}

/// Registered constructors and callbacks, keyed by category name.
#[derive(Clone)]
pub struct TypeRegistry {
    entries: HashMap<String, Registration>,
    fallback: ConstructorFn,
}

impl TypeRegistry {
    /// Build a registry; a later registration replaces an earlier one with the same key.
    pub fn new(registrations: impl IntoIterator<Item = Registration>) -> Self {
        let mut entries = HashMap::new();
        for registration in registrations {
            if let Some(previous) =
                entries.insert(registration.key().to_string(), registration)
            {
                log_debug!(key = %previous.key(), "Type registration overridden");
            }
        }
        Self {
            entries,
            fallback: Arc::new(StepError::fallback),
        }
    }

    /// Merge custom registrations over the defaults.
    pub fn merged(defaults: Vec<Registration>, custom: Vec<Registration>) -> Self {
        Self::new(defaults.into_iter().chain(custom))
    }

    /// Constructor for the resolved category, or the fallback constructor.
    pub fn get_constructor(&self, resolution: &Resolution) -> ConstructorFn {
        self.constructor_for(resolution.category_name())
    }

    /// Callback for the resolved category, if it was registered callback-style.
    pub fn get_callback(&self, resolution: &Resolution) -> Option<CallbackFn> {
        self.callback_for(resolution.category_name())
    }

    pub fn constructor_for(&self, key: Option<&str>) -> ConstructorFn {
        match key.and_then(|k| self.entries.get(k)) {
            Some(Registration::Constructed { constructor, .. }) => Arc::clone(constructor),
            _ => Arc::clone(&self.fallback),
        }
    }

    pub fn callback_for(&self, key: Option<&str>) -> Option<CallbackFn> {
        match key.and_then(|k| self.entries.get(k)) {
            Some(Registration::Delegated { callback, .. }) => Some(Arc::clone(callback)),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("keys", &self.keys())
            .finish_non_exhaustive()
    }
}
