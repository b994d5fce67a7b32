//! Service versions and version negotiation.
//!
//! OGC versions are dotted triplets. A client names the version it wants with
//! the `VERSION` parameter; WMS 1.0 clients used `WMTVER` instead. When
//! neither is present the configured default applies, so an absent version is
//! never an error.

use crate::error::{DecodeError, DecodeResult, ExceptionCode, OwsResult, ServiceException};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Key carrying the requested version.
pub const VERSION_KEY: &str = "version";

/// Legacy WMS 1.0 spelling of the version key.
pub const LEGACY_VERSION_KEY: &str = "wmtver";

/// Key of the ordered version list a GetCapabilities client will accept.
pub const ACCEPT_VERSIONS_KEY: &str = "acceptversions";

/// A dotted-triplet service version such as `1.1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `1`, `1.1` or `1.1.1`; missing components are zero.
    pub fn parse(value: &str) -> DecodeResult<Self> {
        let parts: Vec<&str> = value.split('.').collect();
        if value.is_empty() || parts.len() > 3 {
            return Err(DecodeError::malformed(
                value,
                "expected a dotted version such as 1.1.1",
            ));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(DecodeError::malformed(
                    value,
                    "expected a dotted version such as 1.1.1",
                ));
            }
            *slot = part
                .parse()
                .map_err(|_| DecodeError::malformed(value, "version component too large"))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Where the requested version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// The `VERSION` parameter (or the `version` attribute of an XML request)
    Requested,
    /// The legacy `WMTVER` parameter
    Legacy,
    /// The process-wide default
    Default,
}

/// Version string selected by the defaulting chain, not yet negotiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedVersion {
    pub raw: String,
    pub source: VersionSource,
}

impl RequestedVersion {
    /// Walk VERSION, then WMTVER, then the default.
    ///
    /// `lookup` answers with the raw value of a lower-case key, if present.
    /// Empty values count as absent.
    pub fn resolve<'a, F>(lookup: F, default: &str) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = present(VERSION_KEY) {
            return Self {
                raw: value.to_string(),
                source: VersionSource::Requested,
            };
        }
        if let Some(value) = present(LEGACY_VERSION_KEY) {
            return Self {
                raw: value.to_string(),
                source: VersionSource::Legacy,
            };
        }
        Self {
            raw: default.to_string(),
            source: VersionSource::Default,
        }
    }

    /// Pick the version the operation will run with.
    ///
    /// A version the client asked for must be supported, otherwise
    /// `VersionNegotiationFailed`. A defaulted version the operation does not
    /// know is replaced by the highest version it supports.
    pub fn negotiate(&self, supported: &[Version]) -> OwsResult<Version> {
        let locator = match self.source {
            VersionSource::Legacy => LEGACY_VERSION_KEY,
            _ => VERSION_KEY,
        };
        let version = Version::parse(self.raw.trim()).map_err(|e| e.into_exception(locator))?;

        if supported.contains(&version) {
            return Ok(version);
        }

        match self.source {
            VersionSource::Default => supported.iter().max().copied().ok_or_else(|| {
                ServiceException::no_applicable_code("Operation declares no supported versions")
            }),
            VersionSource::Requested | VersionSource::Legacy => {
                let supported: Vec<String> = supported.iter().map(|v| v.to_string()).collect();
                Err(ServiceException::version_negotiation_failed(version, &supported).with_locator(locator))
            }
        }
    }
}

/// Pick the first version of a comma-separated `AcceptVersions` list that
/// the operation supports.
///
/// The client's order wins over the server's preference. When no listed
/// version is supported the result is `VersionNegotiationFailed`.
pub fn negotiate_accepted(accepted: &str, supported: &[Version]) -> OwsResult<Version> {
    let mut refused = Vec::new();
    for raw in accepted.split(',').map(str::trim).filter(|raw| !raw.is_empty()) {
        let version = Version::parse(raw).map_err(|e| e.into_exception(ACCEPT_VERSIONS_KEY))?;
        if supported.contains(&version) {
            return Ok(version);
        }
        refused.push(version.to_string());
    }

    let supported: Vec<String> = supported.iter().map(|v| v.to_string()).collect();
    Err(ServiceException::new(
        ExceptionCode::VersionNegotiationFailed,
        format!(
            "None of the accepted versions [{}] is supported, supported versions: {}",
            refused.join(", "),
            supported.join(", ")
        ),
    )
    .with_locator(ACCEPT_VERSIONS_KEY))
}
