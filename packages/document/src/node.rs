//! Nodes, component kinds, and the component registry.
//!
//! Component kinds are a closed set of built-ins plus dynamically
//! registered plugin kinds. A kind serializes as its bare tag string
//! (`"heading"`, `"chart-widget"`), so the wire format stays flat and
//! unknown tags deserialize as plugin kinds rather than failing.

use crate::interaction::InteractionBinding;
use crate::style::{StyleMap, StyleSheet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Component type tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComponentKind {
    Section,
    Container,
    Heading,
    Text,
    Button,
    Image,
    Form,
    /// Dynamically registered plugin kind.
    Plugin(String),
}

impl ComponentKind {
    pub fn as_tag(&self) -> &str {
        match self {
            ComponentKind::Section => "section",
            ComponentKind::Container => "container",
            ComponentKind::Heading => "heading",
            ComponentKind::Text => "text",
            ComponentKind::Button => "button",
            ComponentKind::Image => "image",
            ComponentKind::Form => "form",
            ComponentKind::Plugin(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "section" => ComponentKind::Section,
            "container" => ComponentKind::Container,
            "heading" => ComponentKind::Heading,
            "text" => ComponentKind::Text,
            "button" => ComponentKind::Button,
            "image" => ComponentKind::Image,
            "form" => ComponentKind::Form,
            other => ComponentKind::Plugin(other.to_string()),
        }
    }

    /// Mnemonic id prefix for nodes of this kind. Plugin tags may
    /// contain hyphens, which ids avoid.
    pub fn id_prefix(&self) -> String {
        self.as_tag().replace('-', "")
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, ComponentKind::Plugin(_))
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ComponentKind::from_tag(&tag))
    }
}

/// One element of an entity tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: ComponentKind,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, Value>,

    #[serde(default)]
    pub styles: StyleSheet,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,

    /// Non-owning back-reference; `None` only for the tree root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<InteractionBinding>,
}

impl Node {
    /// Create a detached node with a freshly minted id and no defaults.
    /// Prefer `ComponentRegistry::create_node` for editor-facing
    /// creation, which seeds kind defaults.
    pub fn detached(kind: ComponentKind) -> Self {
        let id = pageforge_common::new_entity_id(&kind.id_prefix());
        Self {
            id,
            kind,
            props: BTreeMap::new(),
            styles: StyleSheet::default(),
            children: Vec::new(),
            parent_id: None,
            interactions: Vec::new(),
        }
    }

    /// Whether the node is currently hidden (the `hidden` prop).
    pub fn hidden(&self) -> bool {
        self.props
            .get("hidden")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// String prop accessor.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

/// Registration-time validation failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Component tag cannot be empty")]
    EmptyTag,

    #[error("Invalid component tag `{0}`: must be lowercase kebab-case")]
    InvalidTag(String),

    #[error("Component tag `{0}` is already registered")]
    DuplicateTag(String),

    #[error("Unknown component kind `{0}`")]
    UnknownKind(String),
}

/// Schema + defaults for one component kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub tag: String,
    /// Display label for palette UIs.
    pub label: String,
    /// Props seeded onto newly created nodes.
    pub default_props: BTreeMap<String, Value>,
    /// Desktop styles seeded onto newly created nodes.
    pub default_style: StyleMap,
}

impl ComponentSpec {
    pub fn new(tag: &str, label: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: label.to_string(),
            default_props: BTreeMap::new(),
            default_style: StyleMap::new(),
        }
    }

    pub fn prop(mut self, key: &str, value: Value) -> Self {
        self.default_props.insert(key.to_string(), value);
        self
    }

    pub fn style(mut self, key: &str, value: &str) -> Self {
        self.default_style.insert(key.to_string(), value.to_string());
        self
    }
}

/// Runtime-extensible map from component tag to its spec.
///
/// Built-in kinds are always present; plugin kinds are validated at
/// registration time and can be queried exactly like built-ins.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    specs: BTreeMap<String, ComponentSpec>,
}

impl ComponentRegistry {
    pub fn with_builtins() -> Self {
        let mut specs = BTreeMap::new();
        for spec in builtin_specs() {
            specs.insert(spec.tag.clone(), spec);
        }
        Self { specs }
    }

    /// Register a plugin component kind.
    pub fn register(&mut self, spec: ComponentSpec) -> Result<(), RegistryError> {
        if spec.tag.is_empty() {
            return Err(RegistryError::EmptyTag);
        }
        if !is_kebab_tag(&spec.tag) {
            return Err(RegistryError::InvalidTag(spec.tag.clone()));
        }
        if self.specs.contains_key(&spec.tag) {
            return Err(RegistryError::DuplicateTag(spec.tag.clone()));
        }
        self.specs.insert(spec.tag.clone(), spec);
        Ok(())
    }

    pub fn get(&self, kind: &ComponentKind) -> Option<&ComponentSpec> {
        self.specs.get(kind.as_tag())
    }

    /// Create a node of the given kind, seeded with the kind's
    /// default props and desktop styles. The desktop bucket is the
    /// one bucket guaranteed non-empty after creation.
    pub fn create_node(&self, kind: ComponentKind) -> Result<Node, RegistryError> {
        let spec = self
            .get(&kind)
            .ok_or_else(|| RegistryError::UnknownKind(kind.as_tag().to_string()))?;

        let mut node = Node::detached(kind);
        node.props = spec.default_props.clone();
        node.styles.desktop = spec.default_style.clone();
        Ok(node)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn is_kebab_tag(tag: &str) -> bool {
    !tag.starts_with('-')
        && !tag.ends_with('-')
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn builtin_specs() -> Vec<ComponentSpec> {
    use serde_json::json;
    vec![
        ComponentSpec::new("section", "Section")
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("padding", "48px 24px"),
        ComponentSpec::new("container", "Container")
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("gap", "16px"),
        ComponentSpec::new("heading", "Heading")
            .prop("text", json!("Heading"))
            .prop("level", json!(2))
            .style("font-size", "32px")
            .style("font-weight", "700"),
        ComponentSpec::new("text", "Text")
            .prop("text", json!("Lorem ipsum dolor sit amet."))
            .style("font-size", "16px")
            .style("line-height", "1.6"),
        ComponentSpec::new("button", "Button")
            .prop("text", json!("Click me"))
            .style("padding", "12px 24px")
            .style("cursor", "pointer"),
        ComponentSpec::new("image", "Image")
            .prop("src", json!(""))
            .prop("alt", json!(""))
            .style("max-width", "100%"),
        ComponentSpec::new("form", "Form")
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("gap", "12px"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_serializes_as_tag() {
        let json = serde_json::to_string(&ComponentKind::Heading).unwrap();
        assert_eq!(json, "\"heading\"");

        let kind: ComponentKind = serde_json::from_str("\"chart-widget\"").unwrap();
        assert_eq!(kind, ComponentKind::Plugin("chart-widget".into()));
    }

    #[test]
    fn test_create_node_seeds_defaults() {
        let registry = ComponentRegistry::with_builtins();
        let node = registry.create_node(ComponentKind::Heading).unwrap();

        assert!(node.id.starts_with("heading_"));
        assert_eq!(node.prop_str("text").unwrap(), "Heading");
        assert!(!node.styles.desktop.is_empty());
        assert!(node.children.is_empty());
        assert!(node.parent_id.is_none());
    }

    #[test]
    fn test_register_plugin_kind() {
        let mut registry = ComponentRegistry::with_builtins();
        registry
            .register(
                ComponentSpec::new("chart-widget", "Chart")
                    .prop("series", json!([]))
                    .style("min-height", "240px"),
            )
            .unwrap();

        let node = registry
            .create_node(ComponentKind::Plugin("chart-widget".into()))
            .unwrap();
        assert!(node.id.starts_with("chartwidget_"));
        assert_eq!(node.styles.desktop.get("min-height").unwrap(), "240px");
    }

    #[test]
    fn test_register_rejects_bad_tags() {
        let mut registry = ComponentRegistry::with_builtins();
        assert_eq!(
            registry.register(ComponentSpec::new("", "X")),
            Err(RegistryError::EmptyTag)
        );
        assert_eq!(
            registry.register(ComponentSpec::new("Chart Widget", "X")),
            Err(RegistryError::InvalidTag("Chart Widget".into()))
        );
        assert_eq!(
            registry.register(ComponentSpec::new("heading", "X")),
            Err(RegistryError::DuplicateTag("heading".into()))
        );
    }

    #[test]
    fn test_unknown_plugin_kind_fails_creation() {
        let registry = ComponentRegistry::with_builtins();
        let result = registry.create_node(ComponentKind::Plugin("nope".into()));
        assert_eq!(result, Err(RegistryError::UnknownKind("nope".into())));
    }

    #[test]
    fn test_hidden_prop() {
        let mut node = Node::detached(ComponentKind::Text);
        assert!(!node.hidden());
        node.props.insert("hidden".into(), json!(true));
        assert!(node.hidden());
    }
}
