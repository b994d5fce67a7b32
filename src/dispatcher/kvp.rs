//! KVP request path.

use super::core::{Dispatcher, Target};
use crate::error::{OwsResult, ServiceException};
use crate::kvp::registry::{normalize_key, normalize_service};
use crate::request::{RequestForm, TypedRequest};
use crate::version::{LEGACY_VERSION_KEY, VERSION_KEY};
use log::debug;
use std::collections::HashSet;

const SERVICE_KEY: &str = "service";
const REQUEST_KEY: &str = "request";

/// Keys consumed by routing rather than decoded as fields.
const RESERVED_KEYS: [&str; 4] = [SERVICE_KEY, REQUEST_KEY, VERSION_KEY, LEGACY_VERSION_KEY];

/// Request parameters with lower-case keys, first occurrence of each key
/// only, in arrival order.
struct Parameters<'r> {
    pairs: Vec<(String, &'r str)>,
}

impl<'r> Parameters<'r> {
    fn collect(raw: &'r [(String, String)]) -> Self {
        let mut pairs: Vec<(String, &'r str)> = Vec::with_capacity(raw.len());
        let mut seen = HashSet::with_capacity(raw.len());
        for (key, value) in raw {
            let key = normalize_key(key);
            if !seen.insert(key.clone()) {
                debug!("Ignoring repeated parameter '{}'", key);
                continue;
            }
            pairs.push((key, value.as_str()));
        }
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&'r str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| *value)
    }

    /// Value of a key, treating blank values as absent.
    fn present(&self, key: &str) -> Option<&'r str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }
}

impl Dispatcher {
    pub(super) fn decode_kvp(
        &self,
        raw: &[(String, String)],
        target: Target<'_>,
    ) -> OwsResult<TypedRequest> {
        let params = Parameters::collect(raw);

        let operation = match target.operation {
            Some(operation) => operation.trim(),
            None => params
                .present(REQUEST_KEY)
                .map(str::trim)
                .ok_or_else(|| ServiceException::missing_parameter(REQUEST_KEY))?,
        };
        let service = self.resolve_service(&params, operation)?;
        let descriptor = self.find_operation(&service, operation)?;
        let version = self.negotiate(descriptor, target, |key| params.get(key))?;

        let mut request = TypedRequest::new(
            descriptor.service.clone(),
            descriptor.operation.clone(),
            version,
            RequestForm::Kvp,
        );

        let required = descriptor.required_for(version);
        let mut missing = Vec::new();
        for key in &required {
            if params.present(key).is_none() {
                missing.push(ServiceException::missing_parameter(key.as_str()));
            }
        }

        let mut invalid = Vec::new();
        for (key, value) in &params.pairs {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            let is_required = required.contains(key);
            if is_required && value.trim().is_empty() {
                // already reported as missing
                continue;
            }

            let Some(parser) = self.parsers.resolve(&service, version, key) else {
                if is_required {
                    invalid.push(
                        ServiceException::no_applicable_code(format!(
                            "No parser available for required parameter '{}'",
                            key
                        ))
                        .with_locator(key.as_str()),
                    );
                } else {
                    debug!(
                        "No parser for '{}' in {} {}, ignoring it",
                        key, service, version
                    );
                }
                continue;
            };

            if value.is_empty() && !parser.decoder().accepts_empty() {
                continue;
            }

            match parser.parse(value) {
                Ok(decoded) => request.insert(key.clone(), decoded),
                Err(exception) => invalid.push(exception),
            }
        }

        match ServiceException::merge_all(missing.into_iter().chain(invalid)) {
            Some(exception) => Err(exception),
            None => Ok(request),
        }
    }

    /// SERVICE from the request, else the configured default, else the only
    /// service offering the operation.
    fn resolve_service(&self, params: &Parameters<'_>, operation: &str) -> OwsResult<String> {
        if let Some(service) = params.present(SERVICE_KEY) {
            return Ok(normalize_service(service));
        }
        if let Some(service) = &self.config.default_service {
            return Ok(normalize_service(service));
        }
        if self.config.infer_service {
            if let [service] = self.catalog.services_offering(operation).as_slice() {
                debug!("Inferred service {} from operation {}", service, operation);
                return Ok(service.to_string());
            }
        }
        Err(ServiceException::missing_parameter(SERVICE_KEY))
    }
}
