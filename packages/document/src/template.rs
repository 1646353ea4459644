//! Templates: detached, reusable tree fragments.

use crate::tree::EntityTree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a template is meant to replace or graft into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Page,
    Section,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMeta {
    pub created_at: DateTime<Utc>,
}

/// A detached tree fragment with display metadata. Templates persist
/// independently of the tree they were snapshotted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    pub category: String,
    pub tree: EntityTree,
    pub metadata: TemplateMeta,
}

impl Template {
    pub fn new(name: &str, kind: TemplateKind, category: &str, tree: EntityTree) -> Self {
        Self {
            id: pageforge_common::new_template_id(),
            name: name.to_string(),
            kind,
            category: category.to_string(),
            tree,
            metadata: TemplateMeta {
                created_at: Utc::now(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ComponentKind, Node};

    #[test]
    fn test_template_kind_serde() {
        let tree = EntityTree::with_root(Node::detached(ComponentKind::Section));
        let template = Template::new("Hero", TemplateKind::Section, "marketing", tree);
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains("\"type\":\"section\""));
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, TemplateKind::Section);
    }
}
