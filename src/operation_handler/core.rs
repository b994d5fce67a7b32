//! Core operation handler infrastructure
//!
//! The handler decodes a raw request with a [`Dispatcher`], looks up the
//! [`Operation`] registered for the resulting service and operation name,
//! and runs it.

use crate::dispatcher::Dispatcher;
use crate::error::{BuildError, BuildResult, OwsResult, ServiceException};
use crate::kvp::registry::normalize_service;
use crate::request::{RawRequest, TypedRequest};
use crate::version::Version;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Operation::execute`].
pub type OperationFuture<'a> = Pin<Box<dyn Future<Output = OwsResult<Value>> + Send + 'a>>;

/// Per-request information handed to operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// Service operation run on a decoded request.
///
/// Implemented outside this crate (map rendering, feature queries, process
/// execution). Operations are shared across concurrent requests.
pub trait Operation: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: TypedRequest,
        context: &'a RequestContext,
    ) -> OperationFuture<'a>;
}

/// Adapter turning an async closure into an [`Operation`].
pub struct FnOperation<F>(F);

/// Wrap `f` so it can be registered as an operation.
pub fn operation_fn<F, Fut>(f: F) -> FnOperation<F>
where
    F: Fn(TypedRequest, RequestContext) -> Fut + Send + Sync,
    Fut: Future<Output = OwsResult<Value>> + Send + 'static,
{
    FnOperation(f)
}

impl<F, Fut> Operation for FnOperation<F>
where
    F: Fn(TypedRequest, RequestContext) -> Fut + Send + Sync,
    Fut: Future<Output = OwsResult<Value>> + Send + 'static,
{
    fn execute<'a>(
        &'a self,
        request: TypedRequest,
        context: &'a RequestContext,
    ) -> OperationFuture<'a> {
        Box::pin((self.0)(request, context.clone()))
    }
}

/// Framework-agnostic handler for OGC operations
///
/// This handler provides a structured interface for decoding and running
/// operations without being tied to any transport (HTTP, message queues).
#[derive(Clone)]
pub struct OwsOperationHandler {
    pub(super) dispatcher: Dispatcher,
    pub(super) operations: HashMap<(String, String), Arc<dyn Operation>>,
}

/// Structured request for the handler
#[derive(Debug, Clone, PartialEq)]
pub struct OwsOperationRequest {
    /// The undecoded request
    pub raw: RawRequest,
    /// Operation forced by the caller, e.g. from the URL path
    pub operation: Option<String>,
    /// Version forced by the caller
    pub version: Option<String>,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

impl OwsOperationRequest {
    pub fn new(raw: RawRequest) -> Self {
        Self {
            raw,
            operation: None,
            version: None,
            request_id: None,
        }
    }

    pub fn query(query: &str) -> Self {
        Self::new(RawRequest::from_query(query))
    }

    pub fn xml(body: impl Into<String>) -> Self {
        Self::new(RawRequest::from_xml(body))
    }

    pub fn with_target(mut self, operation: impl Into<String>, version: Option<String>) -> Self {
        self.operation = Some(operation.into());
        self.version = version;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Structured response from the handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwsOperationResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// The data returned by the operation
    pub data: Option<Value>,
    /// Service exception if decoding or the operation failed
    pub exception: Option<ServiceException>,
    pub metadata: OperationMetadata,
}

/// What is known about the request once the handler is done with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMetadata {
    /// Request ID for tracing
    pub request_id: String,
    pub service: Option<String>,
    pub operation: Option<String>,
    /// Negotiated version
    pub version: Option<Version>,
}

impl OperationMetadata {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            service: None,
            operation: None,
            version: None,
        }
    }
}

impl OwsOperationHandler {
    /// Create a new operation handler with no operations registered.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            operations: HashMap::new(),
        }
    }

    /// Register the implementation of `operation` for `service`.
    pub fn register_operation<O>(
        &mut self,
        service: &str,
        operation: &str,
        implementation: O,
    ) -> BuildResult<&mut Self>
    where
        O: Operation + 'static,
    {
        let key = operation_key(service, operation);
        if self.operations.contains_key(&key) {
            return Err(BuildError::DuplicateOperation {
                service: key.0,
                operation: operation.to_string(),
            });
        }
        debug!("Registered implementation for {}/{}", key.0, operation);
        self.operations.insert(key, Arc::new(implementation));
        Ok(self)
    }

    pub fn supports(&self, service: &str, operation: &str) -> bool {
        self.operations
            .contains_key(&operation_key(service, operation))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle a structured request.
    ///
    /// This is the main entry point: decode, pick the operation, run it.
    pub async fn handle_operation(&self, request: OwsOperationRequest) -> OwsOperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "OWS operation handler processing {:?} request (request: '{}')",
            request.raw.form(),
            request_id
        );

        let context = RequestContext::new(request_id.clone());
        let mut metadata = OperationMetadata::new(request_id.clone());
        let result = self.run(request, &context, &mut metadata).await;

        match result {
            Ok(data) => {
                debug!(
                    "OWS operation handler completed successfully (request: '{}')",
                    request_id
                );
                OwsOperationResponse {
                    success: true,
                    data: Some(data),
                    exception: None,
                    metadata,
                }
            }
            Err(e) => {
                warn!(
                    "OWS operation handler failed: {} (request: '{}')",
                    e, request_id
                );
                super::errors::create_error_response(e, metadata)
            }
        }
    }

    async fn run(
        &self,
        request: OwsOperationRequest,
        context: &RequestContext,
        metadata: &mut OperationMetadata,
    ) -> OwsResult<Value> {
        let typed = match &request.operation {
            Some(operation) => self.dispatcher.dispatch_to(
                &request.raw,
                operation,
                request.version.as_deref(),
            )?,
            None => self.dispatcher.dispatch(&request.raw)?,
        };

        metadata.service = Some(typed.service.clone());
        metadata.operation = Some(typed.operation.clone());
        metadata.version = Some(typed.version);

        let implementation = self
            .operations
            .get(&operation_key(&typed.service, &typed.operation))
            .ok_or_else(|| ServiceException::operation_not_supported(typed.operation.clone()))?;

        implementation.execute(typed, context).await
    }
}

fn operation_key(service: &str, operation: &str) -> (String, String) {
    (normalize_service(service), operation.to_ascii_lowercase())
}
