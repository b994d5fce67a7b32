//! Registry of XML bindings.

use super::binding::{QName, XmlBinding};
use super::standard;
use crate::error::{BuildError, BuildResult};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Mutable registry used during startup.
#[derive(Debug, Default)]
pub struct BindingRegistryBuilder {
    bindings: HashMap<QName, Arc<dyn XmlBinding>>,
}

impl BindingRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding; a second binding for the same element is rejected.
    pub fn register<B>(&mut self, binding: B) -> BuildResult<&mut Self>
    where
        B: XmlBinding + 'static,
    {
        let qname = binding.target().clone();
        if self.bindings.contains_key(&qname) {
            return Err(BuildError::DuplicateBinding {
                qname: qname.to_string(),
            });
        }
        debug!("Registered XML binding for {}", qname);
        self.bindings.insert(qname, Arc::new(binding));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn freeze(self) -> BindingRegistry {
        BindingRegistry {
            bindings: self.bindings,
        }
    }
}

/// Read-only map from element name to binding.
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: HashMap<QName, Arc<dyn XmlBinding>>,
}

impl BindingRegistry {
    pub fn builder() -> BindingRegistryBuilder {
        BindingRegistryBuilder::new()
    }

    /// Bindings for the WFS, WCS and WPS request documents.
    pub fn with_standard_bindings() -> BuildResult<Self> {
        let mut builder = BindingRegistryBuilder::new();
        standard::register_all(&mut builder)?;
        Ok(builder.freeze())
    }

    pub fn get(&self, qname: &QName) -> Option<&Arc<dyn XmlBinding>> {
        self.bindings.get(qname)
    }

    pub fn contains(&self, qname: &QName) -> bool {
        self.bindings.contains_key(qname)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
