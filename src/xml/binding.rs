//! Element bindings keyed by qualified name.
//!
//! A binding decodes exactly one element type. Nested elements are handed
//! back to the [`XmlDecodeContext`], which looks up their own binding, so a
//! request document is decoded by a tree of small bindings composed at run
//! time rather than by a class hierarchy.

use super::context::XmlDecodeContext;
use crate::kvp::KvpDecoder;
use crate::value::TypedValue;
use crate::version::Version;
use roxmltree::Node;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    namespace: Option<String>,
    local: String,
}

impl QName {
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    pub fn unqualified(local: &str) -> Self {
        Self {
            namespace: None,
            local: local.to_string(),
        }
    }

    /// Name of an element node.
    pub fn of(node: &Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        Self {
            namespace: tag.namespace().map(str::to_string),
            local: tag.name().to_string(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Decoder for one XML element type.
pub trait XmlBinding: Debug + Send + Sync {
    /// Element this binding is responsible for.
    fn target(&self) -> &QName;

    /// Decode the element, recording problems in `ctx`.
    ///
    /// Returns `None` when nothing usable could be produced; the reason has
    /// already been recorded.
    fn decode(&self, node: Node<'_, '_>, ctx: &mut XmlDecodeContext<'_>) -> Option<TypedValue>;

    /// Service a root element belongs to, used when the request carries no
    /// `service` attribute.
    fn service(&self) -> Option<&str> {
        None
    }

    /// Versions whose schema uses this root element's namespace, preferred
    /// first. Empty when the namespace does not pin a version.
    fn versions(&self) -> &[Version] {
        &[]
    }
}

/// How often a child element may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    Optional,
    Required,
    Many,
    OneOrMore,
}

impl Occurs {
    fn required(self) -> bool {
        matches!(self, Self::Required | Self::OneOrMore)
    }

    fn repeatable(self) -> bool {
        matches!(self, Self::Many | Self::OneOrMore)
    }
}

#[derive(Debug, Clone)]
pub struct AttributeSpec {
    namespace: Option<String>,
    name: String,
    field: String,
    decoder: Arc<dyn KvpDecoder>,
    required: bool,
}

#[derive(Debug, Clone)]
pub struct ChildSpec {
    element: QName,
    field: String,
    occurs: Occurs,
}

#[derive(Debug, Clone)]
enum Content {
    /// Text content decoded by a KVP decoder
    Simple(Arc<dyn KvpDecoder>),
    /// Child elements, each decoded by its own binding
    Complex(Vec<ChildSpec>),
}

/// Declarative binding: attributes, plus either simple text content or a
/// list of permitted child elements.
///
/// A simple element without attributes decodes to its scalar value. Anything
/// else decodes to a [`TypedValue::Record`]; simple content then sits under
/// the `value` field. Undeclared attributes are ignored.
#[derive(Debug, Clone)]
pub struct ElementBinding {
    target: QName,
    service: Option<String>,
    versions: Vec<Version>,
    attributes: Vec<AttributeSpec>,
    content: Content,
}

impl ElementBinding {
    pub fn simple(target: QName, decoder: Arc<dyn KvpDecoder>) -> Self {
        Self {
            target,
            service: None,
            versions: Vec::new(),
            attributes: Vec::new(),
            content: Content::Simple(decoder),
        }
    }

    pub fn complex(target: QName) -> Self {
        Self {
            target,
            service: None,
            versions: Vec::new(),
            attributes: Vec::new(),
            content: Content::Complex(Vec::new()),
        }
    }

    /// Mark this element as the root of requests for `service`.
    pub fn for_service(mut self, service: &str) -> Self {
        self.service = Some(service.to_string());
        self
    }

    /// Versions implied by this root element's namespace, preferred first.
    pub fn for_versions(mut self, versions: &[Version]) -> Self {
        self.versions = versions.to_vec();
        self
    }

    pub fn attribute(
        mut self,
        name: &str,
        field: &str,
        decoder: Arc<dyn KvpDecoder>,
        required: bool,
    ) -> Self {
        self.attributes.push(AttributeSpec {
            namespace: None,
            name: name.to_string(),
            field: field.to_string(),
            decoder,
            required,
        });
        self
    }

    pub fn qualified_attribute(
        mut self,
        namespace: &str,
        name: &str,
        field: &str,
        decoder: Arc<dyn KvpDecoder>,
        required: bool,
    ) -> Self {
        self.attributes.push(AttributeSpec {
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
            field: field.to_string(),
            decoder,
            required,
        });
        self
    }

    /// Permit a child element. Ignored on simple bindings.
    pub fn child(mut self, element: QName, field: &str, occurs: Occurs) -> Self {
        if let Content::Complex(children) = &mut self.content {
            children.push(ChildSpec {
                element,
                field: field.to_string(),
                occurs,
            });
        }
        self
    }

    fn decode_attributes(
        &self,
        node: Node<'_, '_>,
        ctx: &mut XmlDecodeContext<'_>,
        fields: &mut BTreeMap<String, TypedValue>,
    ) {
        for spec in &self.attributes {
            let raw = match &spec.namespace {
                Some(namespace) => node.attribute((namespace.as_str(), spec.name.as_str())),
                None => node.attribute(spec.name.as_str()),
            };

            let Some(raw) = raw else {
                if spec.required {
                    ctx.report(
                        self.target.local(),
                        format!(
                            "Missing required attribute '{}' on {}",
                            spec.name,
                            self.target.local()
                        ),
                    );
                }
                continue;
            };

            match spec.decoder.decode(raw.trim()) {
                Ok(value) => {
                    fields.insert(spec.field.clone(), value);
                }
                Err(e) => ctx.report(
                    self.target.local(),
                    format!(
                        "Attribute '{}' on {}: {}",
                        spec.name,
                        self.target.local(),
                        e
                    ),
                ),
            }
        }
    }

    fn decode_children(
        &self,
        node: Node<'_, '_>,
        ctx: &mut XmlDecodeContext<'_>,
        children: &[ChildSpec],
        fields: &mut BTreeMap<String, TypedValue>,
    ) {
        let mut counts = vec![0usize; children.len()];

        for child in node.children().filter(|n| n.is_element()) {
            let name = QName::of(&child);
            let Some(index) = children.iter().position(|spec| spec.element == name) else {
                ctx.report(
                    name.local(),
                    format!(
                        "Unexpected element {} in {}",
                        name.local(),
                        self.target.local()
                    ),
                );
                continue;
            };

            let spec = &children[index];
            counts[index] += 1;
            if !spec.occurs.repeatable() && counts[index] > 1 {
                ctx.report(
                    name.local(),
                    format!(
                        "Element {} may appear only once in {}",
                        name.local(),
                        self.target.local()
                    ),
                );
                continue;
            }

            let Some(value) = ctx.decode_element(child) else {
                continue;
            };

            if spec.occurs.repeatable() {
                let entry = fields
                    .entry(spec.field.clone())
                    .or_insert_with(|| TypedValue::List(Vec::new()));
                if let TypedValue::List(items) = entry {
                    items.push(value);
                }
            } else {
                fields.insert(spec.field.clone(), value);
            }
        }

        for (spec, count) in children.iter().zip(&counts) {
            if spec.occurs.required() && *count == 0 {
                ctx.report(
                    self.target.local(),
                    format!(
                        "Missing required element {} in {}",
                        spec.element.local(),
                        self.target.local()
                    ),
                );
            }
        }
    }
}

impl XmlBinding for ElementBinding {
    fn target(&self) -> &QName {
        &self.target
    }

    fn decode(&self, node: Node<'_, '_>, ctx: &mut XmlDecodeContext<'_>) -> Option<TypedValue> {
        let mut fields = BTreeMap::new();
        self.decode_attributes(node, ctx, &mut fields);

        match &self.content {
            Content::Simple(decoder) => {
                let text = element_text(node);
                match decoder.decode(text.trim()) {
                    Ok(value) if self.attributes.is_empty() => return Some(value),
                    Ok(value) => {
                        fields.insert("value".to_string(), value);
                    }
                    Err(e) => {
                        ctx.report(
                            self.target.local(),
                            format!("Element {}: {}", self.target.local(), e),
                        );
                        if self.attributes.is_empty() {
                            return None;
                        }
                    }
                }
            }
            Content::Complex(children) => self.decode_children(node, ctx, children, &mut fields),
        }

        Some(TypedValue::Record(fields))
    }

    fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    fn versions(&self) -> &[Version] {
        &self.versions
    }
}

/// Keeps an element verbatim, for content such as filters that a later
/// stage parses with its own grammar.
///
/// Namespaces declared on ancestors are re-declared on the fragment's start
/// tag, so the text stays well-formed XML on its own.
#[derive(Debug, Clone)]
pub struct FragmentBinding {
    target: QName,
}

impl FragmentBinding {
    pub fn new(target: QName) -> Self {
        Self { target }
    }
}

impl XmlBinding for FragmentBinding {
    fn target(&self) -> &QName {
        &self.target
    }

    fn decode(&self, node: Node<'_, '_>, _ctx: &mut XmlDecodeContext<'_>) -> Option<TypedValue> {
        let fragment = node.document().input_text().get(node.range())?;
        Some(TypedValue::Text(with_scope_namespaces(node, fragment)))
    }
}

/// `fragment` with every namespace in scope at `node` declared on its start
/// tag. Declarations the start tag already carries are left alone.
fn with_scope_namespaces(node: Node<'_, '_>, fragment: &str) -> String {
    let start_tag = node
        .first_child()
        .and_then(|child| fragment.get(..child.range().start - node.range().start))
        .unwrap_or(fragment);

    let declarations: String = node
        .namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter_map(|ns| {
            let attribute = match ns.name() {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            if declares(start_tag, &attribute) {
                return None;
            }
            Some(format!(" {}=\"{}\"", attribute, escape_attribute(ns.uri())))
        })
        .collect();

    if declarations.is_empty() {
        return fragment.to_string();
    }

    // insert right after the element name
    let name_end = fragment
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_whitespace() || *c == '/' || *c == '>')
        .map(|(index, _)| index)
        .unwrap_or(fragment.len());

    let mut out = String::with_capacity(fragment.len() + declarations.len());
    out.push_str(&fragment[..name_end]);
    out.push_str(&declarations);
    out.push_str(&fragment[name_end..]);
    out
}

/// Whether `start_tag` carries an attribute named exactly `attribute`.
fn declares(start_tag: &str, attribute: &str) -> bool {
    start_tag.match_indices(attribute).any(|(index, _)| {
        let preceded = start_tag[..index].ends_with(char::is_whitespace);
        let rest = start_tag[index + attribute.len()..].trim_start();
        preceded && rest.starts_with('=')
    })
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

/// Concatenated text children of an element.
fn element_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
