//! Core dispatcher structure and request routing.

use super::builder::{DispatcherBuilder, DispatcherConfig};
use super::operations::{OperationCatalog, OperationDescriptor};
use crate::error::{BuildResult, OwsResult, ServiceException};
use crate::kvp::ParserRegistry;
use crate::request::{RawRequest, TypedRequest};
use crate::version::{
    ACCEPT_VERSIONS_KEY, RequestedVersion, Version, VersionSource, negotiate_accepted,
};
use crate::xml::{BindingRegistry, SchemaValidator};
use log::{debug, warn};
use std::sync::Arc;

const GET_CAPABILITIES: &str = "GetCapabilities";

/// Turns raw requests into typed ones.
///
/// Registries and the catalog are frozen and shared through `Arc`, so a
/// dispatcher is cheap to clone and can be used from any number of threads
/// at once. Each call keeps its own parse state.
///
/// # Examples
///
/// ```rust
/// use ows_dispatch::{Dispatcher, RawRequest, TypedValue};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::with_defaults()?;
/// let request = dispatcher.dispatch(&RawRequest::from_query(
///     "SERVICE=WMS&VERSION=1.1.1&REQUEST=GetMap&LAYERS=roads&STYLES=&SRS=EPSG:4326\
///      &BBOX=-180,-90,180,90&WIDTH=512&HEIGHT=256&FORMAT=image/png",
/// ))?;
///
/// assert_eq!(request.operation, "GetMap");
/// assert_eq!(request.get("width"), Some(&TypedValue::Integer(512)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    pub(super) config: Arc<DispatcherConfig>,
    pub(super) parsers: Arc<ParserRegistry>,
    pub(super) bindings: Arc<BindingRegistry>,
    pub(super) catalog: Arc<OperationCatalog>,
    pub(super) validator: Option<Arc<dyn SchemaValidator>>,
}

/// Operation and version forced by the caller instead of read from the
/// request.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Target<'a> {
    pub operation: Option<&'a str>,
    pub version: Option<&'a str>,
}

impl Dispatcher {
    /// Dispatcher over the embedded parser table, standard XML bindings and
    /// embedded operation catalog.
    pub fn with_defaults() -> BuildResult<Self> {
        DispatcherBuilder::new().build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub(super) fn from_parts(
        config: DispatcherConfig,
        parsers: ParserRegistry,
        bindings: BindingRegistry,
        catalog: OperationCatalog,
        validator: Option<Arc<dyn SchemaValidator>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            parsers: Arc::new(parsers),
            bindings: Arc::new(bindings),
            catalog: Arc::new(catalog),
            validator,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }

    /// Decode a request whose service, operation and version are taken from
    /// the request itself.
    pub fn dispatch(&self, raw: &RawRequest) -> OwsResult<TypedRequest> {
        self.route(raw, Target::default())
    }

    /// Decode a request for an operation chosen by the caller.
    ///
    /// An explicit `version` is treated like one sent by the client and
    /// takes precedence over the request's own.
    pub fn dispatch_to(
        &self,
        raw: &RawRequest,
        operation: &str,
        version: Option<&str>,
    ) -> OwsResult<TypedRequest> {
        self.route(
            raw,
            Target {
                operation: Some(operation),
                version,
            },
        )
    }

    fn route(&self, raw: &RawRequest, target: Target<'_>) -> OwsResult<TypedRequest> {
        debug!("Dispatching {:?} request", raw.form());

        let result = match raw {
            RawRequest::Kvp(pairs) => self.decode_kvp(pairs, target),
            RawRequest::Xml(body) => self.decode_xml(body, target),
        };

        match &result {
            Ok(request) => debug!(
                "Decoded {} {} {} with {} fields",
                request.service,
                request.operation,
                request.version,
                request.fields.len()
            ),
            Err(exception) => warn!("Request rejected: {}", exception),
        }
        result
    }

    /// Look up the operation of a known service.
    pub(super) fn find_operation(
        &self,
        service: &str,
        operation: &str,
    ) -> OwsResult<&OperationDescriptor> {
        if !self.catalog.knows_service(service) {
            return Err(ServiceException::invalid_parameter(
                "service",
                format!("Service '{}' is not offered", service),
            ));
        }
        self.catalog
            .find(service, operation)
            .ok_or_else(|| ServiceException::operation_not_supported(operation))
    }

    /// Run the version chain and negotiate against the operation.
    ///
    /// GetCapabilities negotiates over the client's `AcceptVersions` list
    /// when one is given, ahead of any single requested version.
    pub(super) fn negotiate<'a, F>(
        &self,
        descriptor: &OperationDescriptor,
        target: Target<'_>,
        lookup: F,
    ) -> OwsResult<Version>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let capabilities = descriptor.operation.eq_ignore_ascii_case(GET_CAPABILITIES);
        if target.version.is_none() && capabilities {
            if let Some(accepted) = lookup(ACCEPT_VERSIONS_KEY).filter(|v| !v.trim().is_empty()) {
                let version = negotiate_accepted(accepted, &descriptor.versions)?;
                debug!(
                    "Negotiated {} for {} from accepted versions '{}'",
                    version, descriptor.service, accepted
                );
                return Ok(version);
            }
        }

        let requested = match target.version {
            Some(version) => RequestedVersion {
                raw: version.to_string(),
                source: VersionSource::Requested,
            },
            None => RequestedVersion::resolve(lookup, &self.config.default_version),
        };

        let version = requested.negotiate(&descriptor.versions)?;
        if requested.source == VersionSource::Default {
            debug!(
                "No version requested for {}/{}, using {}",
                descriptor.service, descriptor.operation, version
            );
        }
        Ok(version)
    }
}
