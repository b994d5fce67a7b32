//! XML request decoding.
//!
//! Request documents are parsed with `roxmltree` and walked by a tree of
//! [`XmlBinding`]s looked up by qualified element name. Problems are
//! collected in an [`XmlDecodeContext`] so that one pass reports all of
//! them.
//!
//! # Examples
//!
//! ```rust
//! use ows_dispatch::xml::{BindingRegistry, XmlDecodeContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bindings = BindingRegistry::with_standard_bindings()?;
//! let document = roxmltree::Document::parse(
//!     r#"<wcs:DescribeCoverage xmlns:wcs="http://www.opengis.net/wcs/1.1.1" service="WCS" version="1.1.1">
//!          <wcs:Identifier>dem</wcs:Identifier>
//!        </wcs:DescribeCoverage>"#,
//! )?;
//!
//! let mut ctx = XmlDecodeContext::new(&bindings);
//! let value = ctx.decode_element(document.root_element());
//! let record = ctx.finish(value)?;
//! assert!(record.is_some());
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod context;
pub mod registry;
pub mod standard;

pub use binding::{ElementBinding, FragmentBinding, Occurs, QName, XmlBinding};
pub use context::{SchemaValidator, XmlDecodeContext, XmlIssue};
pub use registry::{BindingRegistry, BindingRegistryBuilder};
