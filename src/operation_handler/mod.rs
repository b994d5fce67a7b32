//! Framework-agnostic OGC operation handler.
//!
//! This module ties request decoding to operation execution and wraps the
//! outcome, success or service exception, in a response carrying a request
//! id.
//!
//! # Key Types
//!
//! - [`OwsOperationHandler`] - decodes requests and runs registered operations
//! - [`OwsOperationRequest`] - raw request plus optional target and request id
//! - [`OwsOperationResponse`] - outcome with [`OperationMetadata`]
//! - [`Operation`] - externally implemented service operation
//!
//! # Examples
//!
//! ```rust,no_run
//! use ows_dispatch::Dispatcher;
//! use ows_dispatch::operation_handler::{operation_fn, OwsOperationHandler, OwsOperationRequest};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut handler = OwsOperationHandler::new(Dispatcher::with_defaults()?);
//! handler.register_operation(
//!     "WMS",
//!     "GetCapabilities",
//!     operation_fn(|request, _context| async move {
//!         Ok(json!({ "version": request.version.to_string() }))
//!     }),
//! )?;
//!
//! let response = handler
//!     .handle_operation(OwsOperationRequest::query("SERVICE=WMS&REQUEST=GetCapabilities"))
//!     .await;
//! assert!(response.success);
//! # Ok(())
//! # }
//! ```

mod core;
mod errors;

pub use core::{
    FnOperation, Operation, OperationFuture, OperationMetadata, OwsOperationHandler,
    OwsOperationRequest, OwsOperationResponse, RequestContext, operation_fn,
};

pub use errors::create_error_response;
