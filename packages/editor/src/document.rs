//! # Document Handle
//!
//! Core editing abstraction: one open project plus its editing state.
//!
//! ## Lifecycle
//!
//! ```text
//! New/Import → Edit (mutations) → Undo/Redo → Export/Publish
//!      ↓            ↓                 ↓            ↓
//!   Project     Snapshots         Snapshots     JSON/bundle
//! ```
//!
//! Every mutation is bracketed by a pre-mutation snapshot: on success
//! the snapshot feeds the undo history, on failure it restores the
//! project, which is what makes mutations all-or-nothing.

use crate::errors::EditorError;
use crate::history::{History, Snapshot};
use crate::mutations::Mutation;
use crate::remap::remap_subtree;
use chrono::Utc;
use pageforge_document::{
    import_page, import_project, import_template, ComponentRegistry, Node, Page, Project,
    Template, TemplateKind,
};
use std::collections::BTreeMap;

/// Editable pageforge project.
#[derive(Debug)]
pub struct Document {
    /// The project being edited. Read freely; mutate only through
    /// [`Document::apply`].
    pub project: Project,

    /// Current version number (increments on each mutation).
    pub version: u64,

    history: History,
    registry: ComponentRegistry,
    templates: BTreeMap<String, Template>,
}

impl Document {
    /// Create a document over a fresh single-page project.
    pub fn new(name: &str) -> Self {
        Self::from_project(Project::new(name))
    }

    pub fn from_project(project: Project) -> Self {
        Self {
            project,
            version: 0,
            history: History::new(),
            registry: ComponentRegistry::with_builtins(),
            templates: BTreeMap::new(),
        }
    }

    /// Load a document from a serialized project payload.
    pub fn import(raw: &str) -> Result<Self, EditorError> {
        Ok(Self::from_project(import_project(raw)?))
    }

    /// Serialize the project for export. Not a mutation: pushes no
    /// history entry.
    pub fn export(&self) -> String {
        pageforge_document::export_project(&self.project)
    }

    /// Component registry, for node creation and plugin registration.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    /// Apply a mutation with snapshot bracketing.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        let snapshot = Snapshot::of(&self.project);
        match mutation.apply(&mut self.project) {
            Ok(()) => {
                self.history.record(snapshot);
                self.version += 1;
                self.project.metadata.updated_at = Utc::now();
                tracing::debug!(version = self.version, "mutation applied");
                Ok(())
            }
            Err(err) => {
                // Roll back any partial effect
                snapshot.restore(&mut self.project);
                tracing::warn!(error = %err, "mutation rejected");
                Err(err.into())
            }
        }
    }

    /// Restore the most recent snapshot. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::of(&self.project);
        match self.history.undo(current) {
            Some(snapshot) => {
                snapshot.restore(&mut self.project);
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Mirror of [`Document::undo`].
    pub fn redo(&mut self) -> bool {
        let current = Snapshot::of(&self.project);
        match self.history.redo(current) {
            Some(snapshot) => {
                snapshot.restore(&mut self.project);
                self.version += 1;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Merge an externally serialized page into the project. The
    /// payload is validated first; the page's tree is remapped on
    /// merge so no ids collide.
    pub fn import_page(&mut self, raw: &str) -> Result<String, EditorError> {
        let page = import_page(raw)?;
        let page_id = page.id.clone();
        self.apply(Mutation::ImportPage { page })?;
        Ok(page_id)
    }

    // --- template library -------------------------------------------------
    //
    // Templates live outside the project and outside undo history;
    // they persist until explicitly deleted.

    /// Snapshot a node subtree from the active page as a section
    /// template. The stored fragment is remapped, so it shares no ids
    /// with the source tree.
    pub fn save_node_as_template(
        &mut self,
        node_id: &str,
        name: &str,
        category: &str,
    ) -> Result<String, EditorError> {
        let page = self
            .project
            .active_page()
            .ok_or_else(|| EditorError::TemplateSource(node_id.to_string()))?;
        let fragment = remap_subtree(&page.tree, node_id)
            .ok_or_else(|| EditorError::TemplateSource(node_id.to_string()))?;
        let template = Template::new(name, TemplateKind::Section, category, fragment);
        let id = template.id.clone();
        self.templates.insert(id.clone(), template);
        Ok(id)
    }

    /// Snapshot an entire page as a page template.
    pub fn save_page_as_template(
        &mut self,
        page_id: &str,
        name: &str,
        category: &str,
    ) -> Result<String, EditorError> {
        let page = self
            .project
            .get_page(page_id)
            .ok_or_else(|| EditorError::TemplateSource(page_id.to_string()))?;
        let fragment = remap_subtree(&page.tree, &page.tree.root)
            .ok_or_else(|| EditorError::TemplateSource(page_id.to_string()))?;
        let template = Template::new(name, TemplateKind::Page, category, fragment);
        let id = template.id.clone();
        self.templates.insert(id.clone(), template);
        Ok(id)
    }

    pub fn get_template(&self, template_id: &str) -> Option<&Template> {
        self.templates.get(template_id)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn delete_template(&mut self, template_id: &str) -> Result<(), EditorError> {
        self.templates
            .remove(template_id)
            .map(|_| ())
            .ok_or_else(|| EditorError::TemplateNotFound(template_id.to_string()))
    }

    /// Import a serialized template into the library.
    pub fn import_template(&mut self, raw: &str) -> Result<String, EditorError> {
        let mut template = import_template(raw)?;
        let remapped = remap_subtree(&template.tree, &template.tree.root)
            .ok_or_else(|| EditorError::TemplateSource(template.id.clone()))?;
        template.tree = remapped;
        let id = template.id.clone();
        self.templates.insert(id.clone(), template);
        Ok(id)
    }

    pub fn export_template(&self, template_id: &str) -> Option<String> {
        self.templates
            .get(template_id)
            .map(pageforge_document::export_template)
    }

    // --- collaborator read API --------------------------------------------

    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        self.project.get_node(node_id)
    }

    pub fn get_page(&self, page_id: &str) -> Option<&Page> {
        self.project.get_page(page_id)
    }

    pub fn resolve_style(
        &self,
        node_id: &str,
        breakpoint: pageforge_document::Breakpoint,
    ) -> Option<pageforge_document::StyleMap> {
        self.project.resolve_style(node_id, breakpoint)
    }
}
