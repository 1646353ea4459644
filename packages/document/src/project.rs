//! The project aggregate: pages, theme tokens, breakpoints, settings.

use crate::node::Node;
use crate::page::Page;
use crate::style::{Breakpoint, StyleMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Serialized-project schema version, bumped on breaking layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Global style tokens: flat token-name → value groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub typography: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scale: BTreeMap<String, String>,
}

/// Viewport width thresholds (max widths, px) for the non-desktop
/// breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoints {
    pub tablet_max: u32,
    pub mobile_max: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet_max: 1024,
            mobile_max: 640,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Top-level aggregate; the unit of export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub schema_version: u32,
    pub pages: BTreeMap<String, Page>,
    pub active_page_id: String,

    #[serde(default)]
    pub global_styles: Theme,

    #[serde(default)]
    pub breakpoints: Breakpoints,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, Value>,

    pub metadata: ProjectMeta,
}

impl Project {
    /// Create a project with a single "Home" page at the root slug.
    pub fn new(name: &str) -> Self {
        let home = Page::new("Home", "/");
        let active_page_id = home.id.clone();
        let mut pages = BTreeMap::new();
        pages.insert(home.id.clone(), home);
        let now = Utc::now();

        Self {
            schema_version: SCHEMA_VERSION,
            pages,
            active_page_id,
            global_styles: Theme::default(),
            breakpoints: Breakpoints::default(),
            settings: BTreeMap::new(),
            metadata: ProjectMeta {
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn get_page(&self, page_id: &str) -> Option<&Page> {
        self.pages.get(page_id)
    }

    pub fn get_page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.get_mut(page_id)
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.pages.get(&self.active_page_id)
    }

    pub fn active_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(&self.active_page_id)
    }

    /// Look up a node on the active page.
    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        self.active_page().and_then(|p| p.tree.get(node_id))
    }

    /// Effective style of a node on the active page at a breakpoint.
    pub fn resolve_style(&self, node_id: &str, breakpoint: Breakpoint) -> Option<StyleMap> {
        self.get_node(node_id).map(|n| n.styles.resolve(breakpoint))
    }

    /// Whether a slug is already taken by a page other than `except`.
    pub fn slug_taken(&self, slug: &str, except: Option<&str>) -> bool {
        self.pages
            .values()
            .any(|p| p.slug == slug && Some(p.id.as_str()) != except)
    }
}
