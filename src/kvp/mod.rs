//! Key-value-pair parameter decoding.
//!
//! # Key Types
//!
//! - [`KvpDecoder`] - decodes one raw parameter value into a [`TypedValue`](crate::value::TypedValue)
//! - [`ParserRegistry`] - frozen (service, version, key) to decoder mapping
//! - [`ParserTable`] - serializable bootstrap description of a registry
//!
//! # Examples
//!
//! ```rust
//! use ows_dispatch::kvp::ParserRegistry;
//! use ows_dispatch::version::Version;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ParserRegistry::with_embedded_parsers()?;
//! let parser = registry
//!     .resolve("WMS", Version::new(1, 1, 1), "BGCOLOR")
//!     .expect("bgcolor is registered");
//! let color = parser.parse("0xFF0000")?;
//! assert_eq!(color.to_wire_string(), "0xFF0000");
//! # Ok(())
//! # }
//! ```

pub mod decoders;
pub mod registry;
pub mod table;

pub use decoders::{
    BooleanDecoder, BoundingBoxDecoder, ColorDecoder, DoubleDecoder, EnumDecoder,
    IdentifierDecoder, IntegerDecoder, KvpDecoder, ListDecoder, TextDecoder, TimeDecoder,
    VersionDecoder, WhitespaceListDecoder,
};
pub use registry::{KvpParser, ParameterKey, ParserRegistry, ParserRegistryBuilder};
pub use table::{DecoderSpec, ParserEntry, ParserTable};
