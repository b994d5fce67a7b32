//! Per-parameter KVP decoders.
//!
//! Each decoder turns one raw parameter value into a [`TypedValue`] and knows
//! nothing about the request it belongs to. Decoders are registered once at
//! startup and shared by every in-flight request, so they hold configuration
//! only and must stay `Send + Sync`.

use crate::datetime::parse_datetime;
use crate::error::{DecodeError, DecodeResult};
use crate::value::{BoundingBox, Color, TypedValue, join_wire};
use crate::version::Version;
use std::fmt::Debug;
use std::sync::Arc;

/// Decoder for a single KVP parameter value.
pub trait KvpDecoder: Debug + Send + Sync {
    /// Decode the raw value exactly as it arrived.
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue>;

    /// Render a decoded value back into its wire form.
    fn encode(&self, value: &TypedValue) -> String {
        value.to_wire_string()
    }

    /// Short name used in logs and tables.
    fn kind(&self) -> &'static str;

    /// Whether an empty value carries meaning instead of counting as absent.
    fn accepts_empty(&self) -> bool {
        false
    }
}

/// Passes the value through untouched.
#[derive(Debug, Clone, Default)]
pub struct TextDecoder;

impl KvpDecoder for TextDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        Ok(TypedValue::Text(raw.to_string()))
    }

    fn kind(&self) -> &'static str {
        "text"
    }
}

/// Splits on a delimiter, keeping order and whitespace.
///
/// An empty value is an empty list. With an element decoder every item is
/// decoded by it; otherwise items are plain text.
#[derive(Debug, Clone)]
pub struct ListDecoder {
    delimiter: String,
    element: Option<Arc<dyn KvpDecoder>>,
}

impl ListDecoder {
    pub fn new() -> Self {
        Self::with_delimiter(",")
    }

    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            element: None,
        }
    }

    pub fn of(mut self, element: Arc<dyn KvpDecoder>) -> Self {
        self.element = Some(element);
        self
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Split a raw value into its items without decoding them.
    pub fn split<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        if raw.is_empty() {
            return Vec::new();
        }
        raw.split(self.delimiter.as_str()).collect()
    }
}

impl Default for ListDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KvpDecoder for ListDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let items = self
            .split(raw)
            .into_iter()
            .map(|item| match &self.element {
                Some(element) => element.decode(item),
                None => Ok(TypedValue::Text(item.to_string())),
            })
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(TypedValue::List(items))
    }

    fn encode(&self, value: &TypedValue) -> String {
        match value {
            TypedValue::List(items) => join_wire(items, &self.delimiter),
            other => other.to_wire_string(),
        }
    }

    fn kind(&self) -> &'static str {
        "list"
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Whitespace-separated list as used by XML list content.
///
/// Any run of spaces, tabs or newlines separates items; leading and
/// trailing whitespace is dropped. Encodes with a single space.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceListDecoder {
    element: Option<Arc<dyn KvpDecoder>>,
}

impl WhitespaceListDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(mut self, element: Arc<dyn KvpDecoder>) -> Self {
        self.element = Some(element);
        self
    }
}

impl KvpDecoder for WhitespaceListDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let items = raw
            .split_whitespace()
            .map(|item| match &self.element {
                Some(element) => element.decode(item),
                None => Ok(TypedValue::Text(item.to_string())),
            })
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(TypedValue::List(items))
    }

    fn encode(&self, value: &TypedValue) -> String {
        match value {
            TypedValue::List(items) => join_wire(items, " "),
            other => other.to_wire_string(),
        }
    }

    fn kind(&self) -> &'static str {
        "wslist"
    }

    fn accepts_empty(&self) -> bool {
        true
    }
}

/// Exact, case-sensitive match against a closed token set.
///
/// Tokens in the `unsupported` set are known to the protocol but refused by
/// this service; they fail with their own message.
#[derive(Debug, Clone)]
pub struct EnumDecoder {
    allowed: Vec<String>,
    unsupported: Vec<String>,
}

impl EnumDecoder {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            unsupported: Vec::new(),
        }
    }

    pub fn with_unsupported<I, S>(mut self, unsupported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unsupported = unsupported.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl KvpDecoder for EnumDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        if self.unsupported.iter().any(|token| token == raw) {
            return Err(DecodeError::Unsupported {
                value: raw.to_string(),
            });
        }
        if self.allowed.iter().any(|token| token == raw) {
            return Ok(TypedValue::Token(raw.to_string()));
        }
        Err(DecodeError::Unrecognized {
            value: raw.to_string(),
            allowed: self.allowed.join(", "),
        })
    }

    fn kind(&self) -> &'static str {
        "enum"
    }
}

/// Hexadecimal RGB triplet, with `0x`, `#` or no prefix.
#[derive(Debug, Clone, Default)]
pub struct ColorDecoder;

impl KvpDecoder for ColorDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let invalid = || DecodeError::InvalidColor {
            value: raw.to_string(),
        };

        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .or_else(|| raw.strip_prefix('#'))
            .unwrap_or(raw);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let rgb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(TypedValue::Color(Color::rgb(
            (rgb >> 16) as u8,
            (rgb >> 8) as u8,
            rgb as u8,
        )))
    }

    fn kind(&self) -> &'static str {
        "color"
    }
}

/// Free-form comma-separated code list such as feature or coverage ids.
#[derive(Debug, Clone, Default)]
pub struct IdentifierDecoder;

impl KvpDecoder for IdentifierDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let mut identifiers = Vec::new();
        for item in raw.split(',') {
            let item = item.trim();
            if item.is_empty() {
                return Err(DecodeError::malformed(raw, "identifier list contains an empty entry"));
            }
            identifiers.push(TypedValue::Text(item.to_string()));
        }
        Ok(TypedValue::List(identifiers))
    }

    fn kind(&self) -> &'static str {
        "identifier"
    }
}

/// Dotted-triplet version.
#[derive(Debug, Clone, Default)]
pub struct VersionDecoder;

impl KvpDecoder for VersionDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        Version::parse(raw.trim()).map(TypedValue::Version)
    }

    fn kind(&self) -> &'static str {
        "version"
    }
}

/// Integer with optional inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct IntegerDecoder {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }
}

impl KvpDecoder for IntegerDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| DecodeError::malformed(raw, "expected an integer"))?;

        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if below || above {
            return Err(DecodeError::OutOfRange {
                value: value.to_string(),
                min: self.min.map_or_else(|| "-inf".to_string(), |m| m.to_string()),
                max: self.max.map_or_else(|| "inf".to_string(), |m| m.to_string()),
            });
        }

        Ok(TypedValue::Integer(value))
    }

    fn kind(&self) -> &'static str {
        "integer"
    }
}

/// Finite floating point number.
#[derive(Debug, Clone, Default)]
pub struct DoubleDecoder;

impl KvpDecoder for DoubleDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        parse_finite(raw.trim())
            .map(TypedValue::Double)
            .ok_or_else(|| DecodeError::malformed(raw, "expected a number"))
    }

    fn kind(&self) -> &'static str {
        "double"
    }
}

/// `true` or `false`, any case.
#[derive(Debug, Clone, Default)]
pub struct BooleanDecoder;

impl KvpDecoder for BooleanDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(TypedValue::Boolean(true)),
            "false" => Ok(TypedValue::Boolean(false)),
            _ => Err(DecodeError::malformed(raw, "expected true or false")),
        }
    }

    fn kind(&self) -> &'static str {
        "boolean"
    }
}

/// `minx,miny,maxx,maxy[,crs]`.
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxDecoder;

impl KvpDecoder for BoundingBoxDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() != 4 && parts.len() != 5 {
            return Err(DecodeError::malformed(
                raw,
                "expected minx,miny,maxx,maxy with an optional CRS",
            ));
        }

        let mut coords = [0f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = parse_finite(part.trim())
                .ok_or_else(|| DecodeError::malformed(raw, format!("'{}' is not a number", part)))?;
        }
        let [min_x, min_y, max_x, max_y] = coords;
        if min_x > max_x || min_y > max_y {
            return Err(DecodeError::malformed(
                raw,
                "minimum corner lies beyond the maximum corner",
            ));
        }

        let crs = parts
            .get(4)
            .map(|crs| crs.trim())
            .filter(|crs| !crs.is_empty())
            .map(str::to_string);

        Ok(TypedValue::BoundingBox(BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
            crs,
        }))
    }

    fn kind(&self) -> &'static str {
        "bbox"
    }
}

/// One ISO-8601 instant, or a comma list of them.
#[derive(Debug, Clone, Default)]
pub struct TimeDecoder;

impl KvpDecoder for TimeDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        let mut instants = raw
            .split(',')
            .map(|item| parse_datetime(item).map(TypedValue::DateTime))
            .collect::<DecodeResult<Vec<_>>>()?;

        if instants.len() == 1 {
            Ok(instants.remove(0))
        } else {
            Ok(TypedValue::List(instants))
        }
    }

    fn kind(&self) -> &'static str {
        "time"
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
