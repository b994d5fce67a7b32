//! Per-document decode state.

use super::binding::QName;
use super::registry::BindingRegistry;
use crate::error::{OwsResult, ServiceException};
use crate::value::TypedValue;
use log::debug;
use roxmltree::{Document, Node};
use std::fmt::Debug;

/// One problem found while decoding a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlIssue {
    pub locator: Option<String>,
    pub message: String,
}

impl XmlIssue {
    pub fn new(locator: Option<String>, message: impl Into<String>) -> Self {
        Self {
            locator,
            message: message.into(),
        }
    }
}

/// Structural validation of a request document against its schema.
///
/// Validation is not performed by this crate; a deployment that has a
/// schema processor plugs it in here. Its findings are reported together
/// with the binding problems.
pub trait SchemaValidator: Debug + Send + Sync {
    fn validate(&self, document: &Document<'_>) -> Vec<XmlIssue>;
}

/// Accumulates problems while the binding tree walks one document.
///
/// Bindings report and keep going, so a single pass surfaces every
/// independent problem. Nothing here is shared between requests.
#[derive(Debug)]
pub struct XmlDecodeContext<'r> {
    bindings: &'r BindingRegistry,
    issues: Vec<XmlIssue>,
}

impl<'r> XmlDecodeContext<'r> {
    pub fn new(bindings: &'r BindingRegistry) -> Self {
        Self {
            bindings,
            issues: Vec::new(),
        }
    }

    /// Decode an element with the binding registered for its name.
    pub fn decode_element(&mut self, node: Node<'_, '_>) -> Option<TypedValue> {
        let name = QName::of(&node);
        let bindings = self.bindings;
        match bindings.get(&name) {
            Some(binding) => binding.decode(node, self),
            None => {
                debug!("No XML binding registered for {}", name);
                self.report(
                    name.local(),
                    format!("No binding available for element {}", name.local()),
                );
                None
            }
        }
    }

    pub fn report(&mut self, locator: &str, message: impl Into<String>) {
        self.issues
            .push(XmlIssue::new(Some(locator.to_string()), message));
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = XmlIssue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[XmlIssue] {
        &self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Turn the accumulated problems into a single exception.
    ///
    /// The locator is that of the first problem; every message becomes one
    /// exception text, in the order found.
    pub fn finish<T>(self, value: T) -> OwsResult<T> {
        let mut issues = self.issues.into_iter();
        let Some(first) = issues.next() else {
            return Ok(value);
        };

        let locator = first.locator.unwrap_or_else(|| "request".to_string());
        let mut exception = ServiceException::invalid_parameter(locator, first.message);
        for issue in issues {
            exception.push_text(issue.message);
        }
        Err(exception)
    }
}
