//! Registry mapping (service, version, key) to KVP parsers.
//!
//! Parsers are registered through a [`ParserRegistryBuilder`] during startup.
//! [`ParserRegistryBuilder::freeze`] turns it into a [`ParserRegistry`] that
//! has no mutating methods and can be shared between threads without locks.

use super::decoders::KvpDecoder;
use super::table::ParserTable;
use crate::embedded;
use crate::error::{BuildError, BuildResult, DecodeError, OwsResult, ServiceException};
use crate::value::TypedValue;
use crate::version::Version;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Identity of a parser registration.
///
/// Service names compare upper-case and keys lower-case, so lookups are
/// case-insensitive. `None` means "any service" or "any version".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterKey {
    service: Option<String>,
    version: Option<Version>,
    key: String,
}

impl ParameterKey {
    pub fn new(service: Option<&str>, version: Option<Version>, key: &str) -> Self {
        Self {
            service: service.map(normalize_service),
            version,
            key: normalize_key(key),
        }
    }

    /// Registration that applies to every service.
    pub fn global(key: &str) -> Self {
        Self::new(None, None, key)
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let service = self.service.as_deref().unwrap_or("*");
        match self.version {
            Some(version) => write!(f, "{}/{}/{}", service, version, self.key),
            None => write!(f, "{}/*/{}", service, self.key),
        }
    }
}

/// Keys naming an output format. Refused tokens on these report
/// `InvalidFormat` rather than `InvalidParameterValue`.
const FORMAT_KEYS: [&str; 3] = ["format", "info_format", "outputformat"];

pub(crate) fn normalize_service(service: &str) -> String {
    service.trim().to_ascii_uppercase()
}

pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// A registered decoder bound to its parameter key.
#[derive(Debug, Clone)]
pub struct KvpParser {
    key: ParameterKey,
    decoder: Arc<dyn KvpDecoder>,
}

impl KvpParser {
    pub fn new(key: ParameterKey, decoder: Arc<dyn KvpDecoder>) -> Self {
        Self { key, decoder }
    }

    pub fn key(&self) -> &ParameterKey {
        &self.key
    }

    pub fn decoder(&self) -> &Arc<dyn KvpDecoder> {
        &self.decoder
    }

    /// Decode a raw value, attributing failures to this parameter.
    pub fn parse(&self, raw: &str) -> OwsResult<TypedValue> {
        let key = self.key.key();
        self.decoder.decode(raw).map_err(|e| match e {
            DecodeError::Unsupported { .. } if FORMAT_KEYS.contains(&key) => {
                ServiceException::invalid_format(key, e.to_string())
            }
            e => e.into_exception(key),
        })
    }

    pub fn encode(&self, value: &TypedValue) -> String {
        self.decoder.encode(value)
    }
}

/// Mutable registry used during startup.
#[derive(Debug, Default)]
pub struct ParserRegistryBuilder {
    parsers: HashMap<ParameterKey, KvpParser>,
}

impl ParserRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoder; a key may be registered only once.
    pub fn register(
        &mut self,
        service: Option<&str>,
        version: Option<Version>,
        key: &str,
        decoder: Arc<dyn KvpDecoder>,
    ) -> BuildResult<&mut Self> {
        let key = ParameterKey::new(service, version, key);
        if self.parsers.contains_key(&key) {
            return Err(BuildError::DuplicateParser {
                key: key.to_string(),
            });
        }

        debug!("Registering {} parser for {}", decoder.kind(), key);
        self.parsers
            .insert(key.clone(), KvpParser::new(key, decoder));
        Ok(self)
    }

    /// Register every entry of a bootstrap table.
    pub fn register_table(&mut self, table: ParserTable) -> BuildResult<&mut Self> {
        for entry in table.parsers {
            let decoder = entry.decoder.build(&entry.key)?;
            self.register(entry.service.as_deref(), entry.version, &entry.key, decoder)?;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Finish registration.
    pub fn freeze(self) -> ParserRegistry {
        ParserRegistry {
            parsers: self.parsers,
        }
    }
}

/// Read-only parser registry.
#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<ParameterKey, KvpParser>,
}

impl ParserRegistry {
    pub fn builder() -> ParserRegistryBuilder {
        ParserRegistryBuilder::new()
    }

    /// Registry loaded from the parser table shipped with the crate.
    pub fn with_embedded_parsers() -> BuildResult<Self> {
        Self::from_table_str(embedded::default_parsers())
    }

    pub fn from_table_str(content: &str) -> BuildResult<Self> {
        let table: ParserTable = serde_json::from_str(content)?;
        let mut builder = ParserRegistryBuilder::new();
        builder.register_table(table)?;
        Ok(builder.freeze())
    }

    pub fn from_table_file<P: AsRef<Path>>(path: P) -> BuildResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_table_str(&content)
    }

    /// Find the parser for a key.
    ///
    /// Exact (service, version) registrations win over service-wide ones,
    /// which win over global ones.
    pub fn resolve(&self, service: &str, version: Version, key: &str) -> Option<&KvpParser> {
        let exact = ParameterKey::new(Some(service), Some(version), key);
        if let Some(parser) = self.parsers.get(&exact) {
            return Some(parser);
        }

        let service_wide = ParameterKey::new(Some(service), None, key);
        if let Some(parser) = self.parsers.get(&service_wide) {
            return Some(parser);
        }

        self.parsers.get(&ParameterKey::global(key))
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ParameterKey> {
        self.parsers.keys()
    }
}
