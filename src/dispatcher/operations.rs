//! Operation catalog: which operations each service offers, at which
//! versions, and which keys they require.

use crate::embedded;
use crate::error::{BuildError, BuildResult};
use crate::kvp::registry::{normalize_key, normalize_service};
use crate::version::Version;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Description of one operation of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub service: String,
    pub operation: String,
    pub versions: Vec<Version>,
    /// Keys required at every version
    #[serde(default)]
    pub required: Vec<String>,
    /// Additional keys required at a given version only
    #[serde(default)]
    pub required_by_version: BTreeMap<Version, Vec<String>>,
}

impl OperationDescriptor {
    pub fn new(service: &str, operation: &str, versions: Vec<Version>) -> Self {
        Self {
            service: normalize_service(service),
            operation: operation.to_string(),
            versions,
            required: Vec::new(),
            required_by_version: BTreeMap::new(),
        }
    }

    pub fn with_required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required
            .extend(keys.into_iter().map(|k| normalize_key(k.as_ref())));
        self
    }

    pub fn with_required_at<I, S>(mut self, version: Version, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_by_version
            .entry(version)
            .or_default()
            .extend(keys.into_iter().map(|k| normalize_key(k.as_ref())));
        self
    }

    pub fn supports(&self, version: Version) -> bool {
        self.versions.contains(&version)
    }

    /// Lower-case keys that must be present at `version`, in declaration order.
    pub fn required_for(&self, version: Version) -> Vec<String> {
        let mut keys: Vec<String> = self.required.iter().map(|k| normalize_key(k)).collect();
        if let Some(extra) = self.required_by_version.get(&version) {
            for key in extra {
                let key = normalize_key(key);
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    fn validate(&self) -> BuildResult<()> {
        if self.operation.trim().is_empty() {
            return Err(BuildError::invalid_configuration(format!(
                "operation name for service {} cannot be empty",
                self.service
            )));
        }
        if self.versions.is_empty() {
            return Err(BuildError::invalid_configuration(format!(
                "operation {}/{} declares no versions",
                self.service, self.operation
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationTable {
    pub operations: Vec<OperationDescriptor>,
}

/// Operations known to a dispatcher, keyed by service and
/// case-insensitive operation name.
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog {
    operations: BTreeMap<(String, String), OperationDescriptor>,
}

impl OperationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the standard WMS, WFS, WCS and WPS operations.
    pub fn with_embedded_operations() -> BuildResult<Self> {
        Self::from_json_str(embedded::default_operations())
    }

    pub fn from_json_str(content: &str) -> BuildResult<Self> {
        let table: OperationTable = serde_json::from_str(content)?;
        let mut catalog = Self::new();
        for descriptor in table.operations {
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> BuildResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn register(&mut self, mut descriptor: OperationDescriptor) -> BuildResult<()> {
        descriptor.validate()?;
        descriptor.service = normalize_service(&descriptor.service);

        let key = (
            descriptor.service.clone(),
            descriptor.operation.to_ascii_lowercase(),
        );
        if self.operations.contains_key(&key) {
            return Err(BuildError::DuplicateOperation {
                service: descriptor.service,
                operation: descriptor.operation,
            });
        }

        debug!(
            "Registered operation {}/{} for versions {:?}",
            descriptor.service, descriptor.operation, descriptor.versions
        );
        self.operations.insert(key, descriptor);
        Ok(())
    }

    pub fn find(&self, service: &str, operation: &str) -> Option<&OperationDescriptor> {
        self.operations.get(&(
            normalize_service(service),
            operation.to_ascii_lowercase(),
        ))
    }

    pub fn knows_service(&self, service: &str) -> bool {
        let service = normalize_service(service);
        self.operations.keys().any(|(s, _)| *s == service)
    }

    /// Services offering an operation of this name.
    pub fn services_offering(&self, operation: &str) -> Vec<&str> {
        let operation = operation.to_ascii_lowercase();
        self.operations
            .iter()
            .filter(|((_, op), _)| *op == operation)
            .map(|((service, _), _)| service.as_str())
            .collect()
    }

    pub fn services(&self) -> Vec<&str> {
        let mut services: Vec<&str> = self.operations.keys().map(|(s, _)| s.as_str()).collect();
        services.dedup();
        services
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.values()
    }
}
