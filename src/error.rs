//! Error types for OGC request decoding.
//!
//! Every failure that reaches a caller is a [`ServiceException`]: an OGC
//! exception code, an optional locator naming the offending parameter or
//! element, and one or more human-readable text lines. Decoders report the
//! narrower [`DecodeError`], which the parser layer converts once the failing
//! key is known. Startup problems (bad tables, duplicate registrations) are
//! [`BuildError`]s and never reach a request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// OGC exception codes produced by the decoding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExceptionCode {
    /// A parameter was present but its value failed decoding or validation
    InvalidParameterValue,
    /// A required parameter was absent
    MissingParameterValue,
    /// The client asked for a version the operation does not support
    VersionNegotiationFailed,
    /// Unclassified internal failure, e.g. registry misconfiguration
    NoApplicableCode,
    /// The requested operation is unknown
    OperationNotSupported,
    /// The requested output format is not supported
    InvalidFormat,
}

impl ExceptionCode {
    /// The code as it appears in an OGC exception report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::MissingParameterValue => "MissingParameterValue",
            Self::VersionNegotiationFailed => "VersionNegotiationFailed",
            Self::NoApplicableCode => "NoApplicableCode",
            Self::OperationNotSupported => "OperationNotSupported",
            Self::InvalidFormat => "InvalidFormat",
        }
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured OGC service exception.
///
/// Immutable in spirit: built once by the decoding layer, then handed to the
/// caller, which renders `code`, `locator` and `texts` into a fault document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}{}: {}", locator_suffix(.locator), .texts.join("; "))]
pub struct ServiceException {
    pub code: ExceptionCode,
    pub locator: Option<String>,
    pub texts: Vec<String>,
}

impl ServiceException {
    pub fn new(code: ExceptionCode, text: impl Into<String>) -> Self {
        Self {
            code,
            locator: None,
            texts: vec![text.into()],
        }
    }

    /// Attach the name of the parameter or element the failure belongs to.
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.texts.push(text.into());
    }

    /// Fold another exception into this one.
    ///
    /// Code and locator stay those of `self`; the texts of `other` are
    /// appended in order.
    pub fn merge(&mut self, other: ServiceException) {
        self.texts.extend(other.texts);
    }

    /// Merge a sequence of exceptions into one, first problem first.
    ///
    /// Returns `None` for an empty sequence.
    pub fn merge_all<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = ServiceException>,
    {
        let mut iter = errors.into_iter();
        let mut merged = iter.next()?;
        for error in iter {
            merged.merge(error);
        }
        Some(merged)
    }

    pub fn invalid_parameter(locator: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ExceptionCode::InvalidParameterValue, text).with_locator(locator)
    }

    pub fn missing_parameter(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        Self::new(
            ExceptionCode::MissingParameterValue,
            format!("Missing required parameter '{}'", locator),
        )
        .with_locator(locator)
    }

    pub fn version_negotiation_failed(requested: impl fmt::Display, supported: &[String]) -> Self {
        Self::new(
            ExceptionCode::VersionNegotiationFailed,
            format!(
                "Version {} is not supported, supported versions: {}",
                requested,
                supported.join(", ")
            ),
        )
        .with_locator("version")
    }

    pub fn operation_not_supported(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        Self::new(
            ExceptionCode::OperationNotSupported,
            format!("Operation '{}' is not supported", operation),
        )
        .with_locator("request")
    }

    pub fn invalid_format(locator: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ExceptionCode::InvalidFormat, text).with_locator(locator)
    }

    pub fn no_applicable_code(text: impl Into<String>) -> Self {
        Self::new(ExceptionCode::NoApplicableCode, text)
    }
}

fn locator_suffix(locator: &Option<String>) -> String {
    locator
        .as_ref()
        .map(|locator| format!(" [{}]", locator))
        .unwrap_or_default()
}

/// Failure of a single KVP decoder, before the failing key is attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Value is syntactically wrong for the decoder
    #[error("Invalid value '{value}': {details}")]
    Malformed { value: String, details: String },

    /// Token is not part of the closed set
    #[error("'{value}' is not a recognized value, expected one of: {allowed}")]
    Unrecognized { value: String, allowed: String },

    /// Token is known but the service refuses it
    #[error("'{value}' is recognized but not supported by this service")]
    Unsupported { value: String },

    /// Value parses but falls outside the permitted range
    #[error("Value {value} is out of range [{min}, {max}]")]
    OutOfRange { value: String, min: String, max: String },

    /// Colour value that is not a hexadecimal RGB triplet
    #[error("Invalid color '{value}', expected format 0xRRGGBB")]
    InvalidColor { value: String },
}

impl DecodeError {
    pub fn malformed(value: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Malformed {
            value: value.into(),
            details: details.into(),
        }
    }

    /// Convert into a service exception attributed to `locator`.
    pub fn into_exception(self, locator: impl Into<String>) -> ServiceException {
        ServiceException::invalid_parameter(locator, self.to_string())
    }
}

/// Errors raised while assembling registries, catalogs and configuration.
///
/// These are programming or deployment errors and surface at startup.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Same (service, version, key) registered twice
    #[error("Duplicate parser registration for {key}")]
    DuplicateParser { key: String },

    /// Same qualified element name bound twice
    #[error("Duplicate XML binding for element {qname}")]
    DuplicateBinding { qname: String },

    /// Same (service, operation) described twice
    #[error("Duplicate operation {service}/{operation}")]
    DuplicateOperation { service: String, operation: String },

    /// Decoder description in a table cannot be turned into a decoder
    #[error("Invalid decoder definition for '{key}': {message}")]
    InvalidDecoder { key: String, message: String },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Bootstrap table could not be parsed
    #[error("Failed to parse table: {0}")]
    Json(#[from] serde_json::Error),

    /// Bootstrap table could not be read
    #[error("Failed to read table: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type OwsResult<T> = Result<T, ServiceException>;
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type BuildResult<T> = Result<T, BuildError>;
