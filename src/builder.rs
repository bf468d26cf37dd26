//! Error builder: resolve a descriptor's type and construct the error
//!
//! The builder owns the merged enum tree and type registry. Both are fixed
//! at construction, so a `Builder` can be shared freely across threads.
//!
//! # Example
//!
//! ```rust
//! use misstep::{Builder, BuilderOptions, ErrorLike, RespondableError};
//! use serde_json::json;
//!
//! let builder = Builder::new(BuilderOptions::default())?;
//! let built = builder.construct(json!({ "type": "RESPONSE:CLIENT:NOT_FOUND", "payload": 42 }));
//!
//! let ErrorLike::Error(err) = built else { unreachable!() };
//! assert_eq!(err.as_respondable().map(|r| r.status()), Some(404));
//! assert_eq!(err.message, "The requested resource could not be found");
//! # Ok::<(), misstep::MisstepError>(())
//! ```

use crate::core_types::descriptor::ErrorDescriptor;
use crate::core_types::enum_tree::{EnumNode, EnumTree};
use crate::core_types::errors::ErrorLike;
use crate::defaults::{default_enum, default_types};
use crate::error::{MisstepError, MisstepResult};
use crate::logger::{Logger, TracingLogger};
use crate::logging::log_debug;
use crate::registry::{CallbackFn, ConstructorFn, Registration, TypeRegistry};
use crate::resolver::{attempted_category, Resolution};
use crate::validation::{validate_enum, validate_types};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

const SKIP_VALIDATE_WARNING: &str = "MisstepWarning: Overriding Misstep.Builder constructor options validation is not advised. It could result in runtime errors being thrown";

/// Construction options for [`Builder`].
///
/// `enum_tree` and `types` are merged over the built-in defaults. Leaving
/// them `None` uses the defaults alone; an empty `Some` is refused.
#[derive(Clone, Default)]
pub struct BuilderOptions {
    pub logger: Option<Arc<dyn Logger>>,
    pub enum_tree: Option<Vec<EnumNode>>,
    pub types: Option<Vec<Registration>>,
    pub skip_validate: bool,
}

impl BuilderOptions {
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_enum(mut self, nodes: Vec<EnumNode>) -> Self {
        self.enum_tree = Some(nodes);
        self
    }

    pub fn with_types(mut self, types: Vec<Registration>) -> Self {
        self.types = Some(types);
        self
    }

    /// Load custom enum categories from a JSON array document.
    pub fn with_enum_json(self, json: &str) -> MisstepResult<Self> {
        Ok(self.with_enum(EnumTree::nodes_from_json(json)?))
    }
}

impl fmt::Debug for BuilderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderOptions")
            .field("has_logger", &self.logger.is_some())
            .field("enum_tree", &self.enum_tree)
            .field("types", &self.types)
            .field("skip_validate", &self.skip_validate)
            .finish()
    }
}

/// Turns error descriptors into error instances.
pub struct Builder {
    logger: Arc<dyn Logger>,
    enum_tree: EnumTree,
    registry: TypeRegistry,
}

impl Builder {
    /// Validate options and merge them over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MisstepError::ConfigurationError`] listing every violated
    /// rule when the options fail validation (unless `skip_validate` is set).
    pub fn new(options: BuilderOptions) -> MisstepResult<Self> {
        Self::configure(options, true)
    }

    pub(crate) fn configure(options: BuilderOptions, warn_on_skip: bool) -> MisstepResult<Self> {
        let logger = options
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::default()));

        if options.skip_validate {
            if warn_on_skip {
                logger.warn(SKIP_VALIDATE_WARNING);
            }
        } else {
            let mut failures = validate_enum(options.enum_tree.as_deref());
            failures.extend(validate_types(options.types.as_deref()));
            if !failures.is_empty() {
                return Err(MisstepError::configuration_error("Builder", failures));
            }
        }

        let enum_tree = EnumTree::merged(default_enum(), options.enum_tree.unwrap_or_default());
        let registry = TypeRegistry::merged(default_types(), options.types.unwrap_or_default());

        for key in registry.keys() {
            if !enum_tree.contains_category(key) {
                logger.warn(&format!(
                    "MisstepWarning: type \"{key}\" is registered but no enum category carries that name"
                ));
            }
        }

        log_debug!(
            categories = enum_tree.categories().len(),
            registrations = registry.len(),
            "Misstep builder configured"
        );

        Ok(Self {
            logger,
            enum_tree,
            registry,
        })
    }

    /// Resolve a dotted type string against the configured enum tree.
    pub fn resolve(&self, type_string: &str) -> Resolution {
        self.enum_tree.resolve(type_string)
    }

    /// Build an error from arbitrary input.
    ///
    /// Never fails: malformed input is normalized into the fallback type.
    /// Panics raised by registered constructors or callbacks propagate.
    pub fn construct(&self, input: impl Into<Value>) -> ErrorLike {
        self.construct_descriptor(ErrorDescriptor::normalize(input.into()))
    }

    /// Build an error from an already-typed descriptor.
    pub fn construct_descriptor(&self, mut descriptor: ErrorDescriptor) -> ErrorLike {
        let resolution = descriptor
            .error_type
            .as_deref()
            .map(|t| self.resolve(t))
            .unwrap_or_default();

        let dispatch_key = resolution
            .category_name()
            .or_else(|| descriptor.error_type.as_deref().and_then(attempted_category))
            .map(str::to_string);

        hydrate(&mut descriptor, &resolution);

        log_debug!(
            error_type = descriptor.error_type.as_deref().unwrap_or(""),
            valid = resolution.valid,
            dispatch_key = dispatch_key.as_deref().unwrap_or(""),
            "Constructing error"
        );

        if let Some(callback) = self.registry.callback_for(dispatch_key.as_deref()) {
            return callback(&resolution, descriptor);
        }
        let constructor = self.registry.constructor_for(dispatch_key.as_deref());
        ErrorLike::Error(constructor(descriptor))
    }

    pub fn get_constructor(&self, resolution: &Resolution) -> ConstructorFn {
        self.registry.get_constructor(resolution)
    }

    pub fn get_callback(&self, resolution: &Resolution) -> Option<CallbackFn> {
        self.registry.get_callback(resolution)
    }

    pub fn enum_tree(&self) -> &EnumTree {
        &self.enum_tree
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("enum_tree", &self.enum_tree)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Fill descriptor fields from the resolution; caller values always win.
fn hydrate(descriptor: &mut ErrorDescriptor, resolution: &Resolution) {
    let Some(qualified) = resolution.qualified_type() else {
        return;
    };
    descriptor.error_type = Some(qualified);
    if descriptor.status.is_none() {
        descriptor.status = resolution.status;
    }
    // an empty message counts as missing
    if descriptor.message.as_deref().map_or(true, str::is_empty) {
        if let Some(description) = resolution.deepest_description() {
            descriptor.message = Some(description.to_string());
        }
    }
}
