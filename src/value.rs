//! Typed values produced by the KVP and XML decoders.
//!
//! [`TypedValue::to_wire_string`] is the inverse of KVP decoding: a decoded
//! value renders back into the string a client would have sent. Datetimes
//! always render in UTC.

use crate::datetime::encode_datetime;
use crate::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// RGBA colour; KVP colours carry no alpha and decode opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Axis-aligned envelope with an optional CRS identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)?;
        if let Some(crs) = &self.crs {
            write!(f, ",{}", crs)?;
        }
        Ok(())
    }
}

/// A decoded parameter or element value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TypedValue {
    Text(String),
    /// Token from a closed set
    Token(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Color(Color),
    Version(Version),
    BoundingBox(BoundingBox),
    DateTime(DateTime<Utc>),
    List(Vec<TypedValue>),
    /// Nested XML element: child field name to value
    Record(BTreeMap<String, TypedValue>),
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Token(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TypedValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, TypedValue>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// String items of a list value, skipping non-text entries.
    pub fn text_items(&self) -> Vec<&str> {
        self.as_list()
            .map(|items| items.iter().filter_map(|item| item.as_str()).collect())
            .unwrap_or_default()
    }

    /// Render the value the way it travels in a KVP request.
    ///
    /// Lists join with a comma; decoders with another delimiter override
    /// this through [`crate::kvp::KvpDecoder::encode`].
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Text(s) | Self::Token(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Double(d) => d.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Color(c) => c.to_string(),
            Self::Version(v) => v.to_string(),
            Self::BoundingBox(b) => b.to_string(),
            Self::DateTime(dt) => encode_datetime(dt),
            Self::List(items) => join_wire(items, ","),
            Self::Record(fields) => fields
                .iter()
                .map(|(name, value)| format!("{}={}", name, value.to_wire_string()))
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

pub(crate) fn join_wire(items: &[TypedValue], delimiter: &str) -> String {
    items
        .iter()
        .map(TypedValue::to_wire_string)
        .collect::<Vec<_>>()
        .join(delimiter)
}
