//! Dispatcher configuration and builder.

use super::core::Dispatcher;
use super::operations::OperationCatalog;
use crate::error::{BuildError, BuildResult};
use crate::kvp::ParserRegistry;
use crate::version::Version;
use crate::xml::{BindingRegistry, SchemaValidator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Process-wide dispatch settings.
///
/// ```json
/// { "defaultVersion": "1.3.0", "defaultService": "WMS", "inferService": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatcherConfig {
    /// Version used when a request names none, before negotiation.
    pub default_version: String,

    /// Service assumed when a KVP request has no SERVICE parameter.
    pub default_service: Option<String>,

    /// Without SERVICE or a default service, pick the only service offering
    /// the requested operation.
    pub infer_service: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_version: "1.1.1".to_string(),
            default_service: None,
            infer_service: true,
        }
    }
}

impl DispatcherConfig {
    pub fn from_json_str(content: &str) -> BuildResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> BuildResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> BuildResult<()> {
        Version::parse(self.default_version.trim()).map_err(|e| {
            BuildError::invalid_configuration(format!("default version: {}", e))
        })?;

        if let Some(service) = &self.default_service {
            if service.trim().is_empty() {
                return Err(BuildError::invalid_configuration(
                    "default service cannot be empty",
                ));
            }
        }

        Ok(())
    }
}

/// Builder for [`Dispatcher`].
///
/// Registries left unset are loaded from the embedded tables when the
/// dispatcher is built.
///
/// # Examples
///
/// ```rust
/// use ows_dispatch::{DispatcherBuilder, RawRequest};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = DispatcherBuilder::new()
///     .with_default_service("WMS")
///     .with_default_version("1.3.0")
///     .build()?;
///
/// let request = dispatcher
///     .dispatch(&RawRequest::from_query("REQUEST=GetCapabilities"))?;
/// assert_eq!(request.service, "WMS");
/// assert_eq!(request.version.to_string(), "1.3.0");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    config: DispatcherConfig,
    parsers: Option<ParserRegistry>,
    bindings: Option<BindingRegistry>,
    catalog: Option<OperationCatalog>,
    validator: Option<Arc<dyn SchemaValidator>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.config.default_version = version.into();
        self
    }

    pub fn with_default_service(mut self, service: impl Into<String>) -> Self {
        self.config.default_service = Some(service.into());
        self
    }

    pub fn with_service_inference(mut self, enabled: bool) -> Self {
        self.config.infer_service = enabled;
        self
    }

    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = Some(parsers);
        self
    }

    pub fn with_bindings(mut self, bindings: BindingRegistry) -> Self {
        self.bindings = Some(bindings);
        self
    }

    pub fn with_catalog(mut self, catalog: OperationCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Run every XML request through `validator` before binding.
    pub fn with_schema_validator<V>(mut self, validator: V) -> Self
    where
        V: SchemaValidator + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Validate the configuration and freeze everything into a dispatcher.
    pub fn build(self) -> BuildResult<Dispatcher> {
        self.config.validate()?;

        let parsers = match self.parsers {
            Some(parsers) => parsers,
            None => ParserRegistry::with_embedded_parsers()?,
        };
        let bindings = match self.bindings {
            Some(bindings) => bindings,
            None => BindingRegistry::with_standard_bindings()?,
        };
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => OperationCatalog::with_embedded_operations()?,
        };

        Ok(Dispatcher::from_parts(
            self.config,
            parsers,
            bindings,
            catalog,
            self.validator,
        ))
    }
}
