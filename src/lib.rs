//! Request decoding and dispatch for OGC web services.
//!
//! Turns untyped WMS, WFS, WCS and WPS requests, sent either as key-value
//! pairs or as XML documents, into typed requests, and reports every failure
//! as a structured OGC service exception.
//!
//! # Core Components
//!
//! - [`Dispatcher`] - decodes a [`RawRequest`] into a [`TypedRequest`]
//! - [`ParserRegistry`] - KVP decoders keyed by service, version and key
//! - [`BindingRegistry`] - XML element bindings keyed by qualified name
//! - [`ServiceException`] - `{code, locator, texts}` failure model
//! - [`OwsOperationHandler`] - async façade running registered operations
//!
//! # Quick Start
//!
//! ```rust
//! use ows_dispatch::{Dispatcher, ExceptionCode, RawRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::with_defaults()?;
//!
//! let error = dispatcher
//!     .dispatch(&RawRequest::from_query("SERVICE=WMS&REQUEST=GetMap&BGCOLOR=red"))
//!     .unwrap_err();
//! assert_eq!(error.code, ExceptionCode::MissingParameterValue);
//! assert!(error.texts.iter().any(|t| t.contains("0xRRGGBB")));
//! # Ok(())
//! # }
//! ```

pub mod datetime;
pub mod dispatcher;
pub mod embedded;
pub mod error;
pub mod kvp;
pub mod operation_handler;
pub mod request;
pub mod value;
pub mod version;
pub mod xml;

// Re-export commonly used types for convenience
pub use dispatcher::{
    Dispatcher, DispatcherBuilder, DispatcherConfig, OperationCatalog, OperationDescriptor,
};
pub use error::{
    BuildError, BuildResult, DecodeError, DecodeResult, ExceptionCode, OwsResult,
    ServiceException,
};
pub use kvp::{KvpDecoder, ParserRegistry};
pub use request::{RawRequest, RequestForm, TypedRequest};
pub use value::{BoundingBox, Color, TypedValue};
pub use version::Version;
pub use xml::{BindingRegistry, SchemaValidator, XmlBinding};

pub use operation_handler::{
    Operation, OperationMetadata, OwsOperationHandler, OwsOperationRequest, OwsOperationResponse,
    RequestContext,
};
