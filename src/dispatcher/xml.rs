//! XML request path.

use super::core::{Dispatcher, Target};
use crate::error::{ExceptionCode, OwsResult, ServiceException};
use crate::kvp::registry::normalize_service;
use crate::request::{RequestForm, TypedRequest};
use crate::value::TypedValue;
use crate::version::{ACCEPT_VERSIONS_KEY, VERSION_KEY, Version};
use crate::xml::standard::{OWS_1_0, OWS_1_1};
use crate::xml::{QName, XmlDecodeContext};
use log::debug;
use roxmltree::{Document, Node};

impl Dispatcher {
    /// Parse the body, bind the root element and negotiate its version.
    ///
    /// The root element's local name is the operation. Every binding problem
    /// and every schema validator finding ends up in one exception.
    pub(super) fn decode_xml(&self, body: &str, target: Target<'_>) -> OwsResult<TypedRequest> {
        let document = Document::parse(body).map_err(|e| {
            ServiceException::invalid_parameter(
                "request",
                format!("Could not parse XML request: {}", e),
            )
        })?;
        let root = document.root_element();
        let name = QName::of(&root);

        let binding = self
            .bindings
            .get(&name)
            .ok_or_else(|| ServiceException::operation_not_supported(name.local()))?;

        let operation = name.local();
        if let Some(expected) = target.operation {
            if !expected.trim().eq_ignore_ascii_case(operation) {
                return Err(ServiceException::invalid_parameter(
                    "request",
                    format!(
                        "Request document is a {} but {} was expected",
                        operation,
                        expected.trim()
                    ),
                ));
            }
        }

        let service = root
            .attribute("service")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| binding.service())
            .or(self.config.default_service.as_deref())
            .map(normalize_service)
            .ok_or_else(|| ServiceException::missing_parameter("service"))?;

        let descriptor = self.find_operation(&service, operation)?;

        let stated = root
            .attribute(VERSION_KEY)
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let implied = binding.versions();
        if let (Some(raw), false) = (stated, implied.is_empty()) {
            let version = Version::parse(raw).map_err(|e| e.into_exception(VERSION_KEY))?;
            if !implied.contains(&version) {
                let expected: Vec<String> = implied.iter().map(|v| v.to_string()).collect();
                return Err(ServiceException::new(
                    ExceptionCode::VersionNegotiationFailed,
                    format!(
                        "Version {} does not match the namespace {}, which implies {}",
                        version,
                        name.namespace().unwrap_or_default(),
                        expected.join(", ")
                    ),
                )
                .with_locator(VERSION_KEY));
            }
        }

        let implied = implied.first().map(Version::to_string);
        let accepted = accepted_versions(root);
        let version = self.negotiate(descriptor, target, |key| match key {
            VERSION_KEY => stated.or(implied.as_deref()),
            ACCEPT_VERSIONS_KEY => accepted.as_deref(),
            _ => None,
        })?;

        let mut ctx = XmlDecodeContext::new(&self.bindings);
        if let Some(validator) = &self.validator {
            let issues = validator.validate(&document);
            debug!("Schema validator reported {} issues", issues.len());
            ctx.extend(issues);
        }
        let value = binding.decode(root, &mut ctx);
        let value = ctx.finish(value)?;

        let mut request = TypedRequest::new(
            descriptor.service.clone(),
            descriptor.operation.clone(),
            version,
            RequestForm::Xml,
        );
        match value {
            Some(TypedValue::Record(fields)) => {
                for (field, value) in fields {
                    request.insert(field, value);
                }
            }
            Some(other) => request.insert("value", other),
            None => {}
        }
        Ok(request)
    }
}

/// `ows:AcceptVersions` of a capabilities request, comma-joined in
/// document order.
fn accepted_versions(root: Node<'_, '_>) -> Option<String> {
    let accept = root
        .children()
        .find(|node| is_ows_element(node, "AcceptVersions"))?;
    let versions: Vec<&str> = accept
        .children()
        .filter(|node| is_ows_element(node, "Version"))
        .filter_map(|node| node.text())
        .map(str::trim)
        .collect();
    Some(versions.join(","))
}

fn is_ows_element(node: &Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local
        && matches!(node.tag_name().namespace(), Some(OWS_1_0 | OWS_1_1))
}
