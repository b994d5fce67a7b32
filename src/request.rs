//! Raw and typed request representations.

use crate::error::{OwsResult, ServiceException};
use crate::value::TypedValue;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Undecoded request as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRequest {
    /// Ordered key/value pairs from a query string; keys are case-insensitive
    Kvp(Vec<(String, String)>),
    /// XML request body
    Xml(String),
}

impl RawRequest {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Kvp(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Split a URL query string, percent-decoding keys and values.
    ///
    /// A leading `?` is ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::Kvp(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    pub fn from_xml(body: impl Into<String>) -> Self {
        Self::Xml(body.into())
    }

    /// Accept an XML body as bytes; it must be UTF-8.
    pub fn from_xml_bytes(body: Vec<u8>) -> OwsResult<Self> {
        String::from_utf8(body).map(Self::Xml).map_err(|e| {
            ServiceException::invalid_parameter(
                "request",
                format!("Request body is not valid UTF-8: {}", e),
            )
        })
    }

    pub fn form(&self) -> RequestForm {
        match self {
            Self::Kvp(_) => RequestForm::Kvp,
            Self::Xml(_) => RequestForm::Xml,
        }
    }
}

/// Encoding a request arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestForm {
    Kvp,
    Xml,
}

/// Fully decoded request, ready for an operation.
///
/// Field names are lower-case. A `TypedRequest` only exists when every
/// required field decoded cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedRequest {
    pub service: String,
    pub operation: String,
    pub version: Version,
    pub form: RequestForm,
    pub fields: BTreeMap<String, TypedValue>,
}

impl TypedRequest {
    pub fn new(
        service: impl Into<String>,
        operation: impl Into<String>,
        version: Version,
        form: RequestForm,
    ) -> Self {
        Self {
            service: service.into(),
            operation: operation.into(),
            version,
            form,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.fields.get(&field.to_ascii_lowercase())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(&field.to_ascii_lowercase())
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: TypedValue) {
        self.fields.insert(field.into(), value);
    }
}
