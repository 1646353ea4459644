//! Pages: a named, slugged entity tree with SEO metadata.

use crate::node::{ComponentKind, Node};
use crate::tree::EntityTree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-page SEO fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub noindex: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    /// Unique kebab-case URL slug with a leading `/`.
    pub slug: String,
    pub tree: EntityTree,

    #[serde(default)]
    pub seo: Seo,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Create a page with a fresh root section node.
    pub fn new(name: &str, slug: &str) -> Self {
        let root = Node::detached(ComponentKind::Section);
        let now = Utc::now();
        Self {
            id: pageforge_common::new_page_id(),
            name: name.to_string(),
            slug: pageforge_common::normalize_slug(slug),
            tree: EntityTree::with_root(root),
            seo: Seo::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a content or structural change.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_has_root_section() {
        let page = Page::new("Home", "/");
        assert_eq!(page.slug, "/");
        let root = page.tree.get(&page.tree.root).unwrap();
        assert_eq!(root.kind, ComponentKind::Section);
        assert!(root.parent_id.is_none());
    }

    #[test]
    fn test_slug_is_normalized_on_creation() {
        let page = Page::new("About Us", "About Us");
        assert_eq!(page.slug, "/about-us");
    }

    #[test]
    fn test_touch_bumps_updated_at() {
        let mut page = Page::new("Home", "/");
        let before = page.updated_at;
        page.touch();
        assert!(page.updated_at >= before);
    }
}
