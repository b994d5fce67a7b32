//! Declarative bootstrap table for the parser registry.
//!
//! ```json
//! { "parsers": [
//!     { "service": "WMS", "key": "bgcolor", "decoder": { "type": "color" } },
//!     { "key": "acceptversions", "decoder": { "type": "list", "element": { "type": "version" } } }
//! ] }
//! ```

use super::decoders::{
    BooleanDecoder, BoundingBoxDecoder, ColorDecoder, DoubleDecoder, EnumDecoder,
    IdentifierDecoder, IntegerDecoder, KvpDecoder, ListDecoder, TextDecoder, TimeDecoder,
    VersionDecoder,
};
use crate::error::{BuildError, BuildResult};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserTable {
    pub parsers: Vec<ParserEntry>,
}

/// One registration: omitted service or version means "any".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserEntry {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<Version>,
    pub key: String,
    pub decoder: DecoderSpec,
}

fn default_delimiter() -> String {
    ",".to_string()
}

/// Serializable description of a decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DecoderSpec {
    Text,
    List {
        #[serde(default = "default_delimiter")]
        delimiter: String,
        #[serde(default)]
        element: Option<Box<DecoderSpec>>,
    },
    Enum {
        values: Vec<String>,
        #[serde(default)]
        unsupported: Vec<String>,
    },
    Color,
    Identifier,
    Version,
    Integer {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    Double,
    Boolean,
    BoundingBox,
    Time,
}

impl DecoderSpec {
    /// Build the decoder, rejecting descriptions that could never decode.
    pub fn build(&self, key: &str) -> BuildResult<Arc<dyn KvpDecoder>> {
        let invalid = |message: &str| BuildError::InvalidDecoder {
            key: key.to_string(),
            message: message.to_string(),
        };

        let decoder: Arc<dyn KvpDecoder> = match self {
            Self::Text => Arc::new(TextDecoder),
            Self::List { delimiter, element } => {
                if delimiter.is_empty() {
                    return Err(invalid("list delimiter cannot be empty"));
                }
                let list = ListDecoder::with_delimiter(delimiter.clone());
                match element {
                    Some(element) => Arc::new(list.of(element.build(key)?)),
                    None => Arc::new(list),
                }
            }
            Self::Enum {
                values,
                unsupported,
            } => {
                if values.is_empty() && unsupported.is_empty() {
                    return Err(invalid("enum needs at least one value"));
                }
                Arc::new(EnumDecoder::new(values.clone()).with_unsupported(unsupported.clone()))
            }
            Self::Color => Arc::new(ColorDecoder),
            Self::Identifier => Arc::new(IdentifierDecoder),
            Self::Version => Arc::new(VersionDecoder),
            Self::Integer { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(invalid("integer min is greater than max"));
                    }
                }
                Arc::new(IntegerDecoder::bounded(*min, *max))
            }
            Self::Double => Arc::new(DoubleDecoder),
            Self::Boolean => Arc::new(BooleanDecoder),
            Self::BoundingBox => Arc::new(BoundingBoxDecoder),
            Self::Time => Arc::new(TimeDecoder),
        };

        Ok(decoder)
    }
}
