//! Request dispatch: from raw KVP or XML to a typed request.
//!
//! # Module Organization
//!
//! * [`core`] - `Dispatcher` struct, routing and version negotiation
//! * [`builder`] - `DispatcherConfig` and `DispatcherBuilder`
//! * [`operations`] - operation catalog consulted for every request
//! * `kvp` / `xml` - the two decoding paths

pub mod builder;
pub mod core;
mod kvp;
pub mod operations;
mod xml;


pub use builder::{DispatcherBuilder, DispatcherConfig};
pub use core::Dispatcher;
pub use operations::{OperationCatalog, OperationDescriptor, OperationTable};
