//! Project mutations.
//!
//! High-level semantic operations on a project: tree edits, page
//! lifecycle, template application. Each mutation validates its
//! targets before touching state, so a failed mutation is a typed
//! error with the project left exactly as it was.
//!
//! Node-scoped mutations operate on the currently active page; page
//! mutations name their page explicitly. Every successful mutation
//! bumps the owning page's `updated_at`.

use crate::remap::remap_subtree;
use pageforge_document::{
    Breakpoint, InteractionBinding, Node, Page, Project, Seo, StyleMap, Template,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Semantic mutations (intent-preserving operations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Insert a detached node under a parent on the active page. The
    /// node is adopted with its children list cleared.
    AddNode { parent_id: String, node: Node },

    /// Remove a node and all transitive descendants, atomically.
    RemoveNode { node_id: String },

    /// Reparent a node to a new parent at the given child index.
    MoveNode {
        node_id: String,
        new_parent_id: String,
        index: usize,
    },

    /// Shallow-merge props into a node's property bag.
    UpdateProps {
        node_id: String,
        props: BTreeMap<String, Value>,
    },

    /// Shallow-merge style properties into one breakpoint bucket.
    UpdateStyle {
        node_id: String,
        breakpoint: Breakpoint,
        style: StyleMap,
    },

    /// Deep-clone a node (with descendants, via the remapper) as its
    /// next sibling.
    CloneNode { node_id: String },

    AddInteraction {
        node_id: String,
        binding: InteractionBinding,
    },

    RemoveInteraction {
        node_id: String,
        binding_id: String,
    },

    /// Create a page and make it active.
    CreatePage { name: String, slug: String },

    /// Deep-clone a page (tree remapped) under a derived name/slug.
    DuplicatePage { page_id: String },

    /// Delete a page; rejected when it is the last one.
    DeletePage { page_id: String },

    RenamePage { page_id: String, name: String },

    /// Normalizes the slug (lowercase, spaces→hyphens, leading `/`).
    UpdatePageSlug { page_id: String, slug: String },

    UpdatePageSeo { page_id: String, seo: Seo },

    SetActivePage { page_id: String },

    /// Replace a page's entire tree with a remapped template copy.
    ApplyTemplateToPage { page_id: String, template: Template },

    /// Graft a remapped template copy as the last child of a node on
    /// the active page.
    ApplyTemplateToSection {
        target_node_id: String,
        template: Template,
    },

    /// Merge an already-validated imported page into the project.
    ImportPage { page: Page },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Interaction binding not found: {0}")]
    BindingNotFound(String),

    #[error("Node id already present in tree: {0}")]
    DuplicateNode(String),

    #[error("The root node cannot be removed, cloned, or moved; delete the page instead")]
    RootImmutable,

    #[error("Would create cycle")]
    CycleDetected,

    #[error("A project must keep at least one page")]
    LastPage,

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl Mutation {
    /// Apply the mutation to a project.
    ///
    /// On error the project may be partially modified; the owning
    /// [`crate::Document`] restores its pre-mutation snapshot, which
    /// is what gives callers the all-or-nothing guarantee.
    pub fn apply(&self, project: &mut Project) -> Result<(), MutationError> {
        match self {
            Mutation::AddNode { parent_id, node } => apply_add_node(project, parent_id, node),
            Mutation::RemoveNode { node_id } => apply_remove_node(project, node_id),
            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => apply_move_node(project, node_id, new_parent_id, *index),
            Mutation::UpdateProps { node_id, props } => apply_update_props(project, node_id, props),
            Mutation::UpdateStyle {
                node_id,
                breakpoint,
                style,
            } => apply_update_style(project, node_id, *breakpoint, style),
            Mutation::CloneNode { node_id } => apply_clone_node(project, node_id),
            Mutation::AddInteraction { node_id, binding } => {
                apply_add_interaction(project, node_id, binding)
            }
            Mutation::RemoveInteraction {
                node_id,
                binding_id,
            } => apply_remove_interaction(project, node_id, binding_id),
            Mutation::CreatePage { name, slug } => apply_create_page(project, name, slug),
            Mutation::DuplicatePage { page_id } => apply_duplicate_page(project, page_id),
            Mutation::DeletePage { page_id } => apply_delete_page(project, page_id),
            Mutation::RenamePage { page_id, name } => apply_rename_page(project, page_id, name),
            Mutation::UpdatePageSlug { page_id, slug } => {
                apply_update_page_slug(project, page_id, slug)
            }
            Mutation::UpdatePageSeo { page_id, seo } => apply_update_page_seo(project, page_id, seo),
            Mutation::SetActivePage { page_id } => apply_set_active_page(project, page_id),
            Mutation::ApplyTemplateToPage { page_id, template } => {
                apply_template_to_page(project, page_id, template)
            }
            Mutation::ApplyTemplateToSection {
                target_node_id,
                template,
            } => apply_template_to_section(project, target_node_id, template),
            Mutation::ImportPage { page } => apply_import_page(project, page),
        }
    }
}

fn active_page_mut(project: &mut Project) -> Result<&mut Page, MutationError> {
    let id = project.active_page_id.clone();
    project
        .pages
        .get_mut(&id)
        .ok_or(MutationError::PageNotFound(id))
}

fn apply_add_node(project: &mut Project, parent_id: &str, node: &Node) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    if !page.tree.contains(parent_id) {
        return Err(MutationError::ParentNotFound(parent_id.to_string()));
    }
    if page.tree.contains(&node.id) {
        return Err(MutationError::DuplicateNode(node.id.clone()));
    }

    let mut adopted = node.clone();
    adopted.parent_id = Some(parent_id.to_string());
    adopted.children.clear();
    let child_id = adopted.id.clone();

    page.tree.entities.insert(child_id.clone(), adopted);
    if let Some(parent) = page.tree.get_mut(parent_id) {
        parent.children.push(child_id);
    }
    page.touch();
    Ok(())
}

fn apply_remove_node(project: &mut Project, node_id: &str) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    if node_id == page.tree.root {
        return Err(MutationError::RootImmutable);
    }
    let node = page
        .tree
        .get(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    let parent_id = node.parent_id.clone();

    // Children before parents: reverse pre-order is a post-order
    // cascade over the doomed subtree.
    let doomed = page.tree.preorder(node_id);
    for id in doomed.iter().rev() {
        page.tree.entities.remove(id);
    }

    if let Some(parent_id) = parent_id {
        if let Some(parent) = page.tree.get_mut(&parent_id) {
            parent.children.retain(|c| c != node_id);
        }
    }
    page.touch();
    Ok(())
}

fn apply_move_node(
    project: &mut Project,
    node_id: &str,
    new_parent_id: &str,
    index: usize,
) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    if node_id == page.tree.root {
        return Err(MutationError::RootImmutable);
    }
    let old_parent_id = page
        .tree
        .get(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?
        .parent_id
        .clone()
        .ok_or(MutationError::RootImmutable)?;
    if !page.tree.contains(new_parent_id) {
        return Err(MutationError::ParentNotFound(new_parent_id.to_string()));
    }
    if new_parent_id == node_id || page.tree.is_ancestor(node_id, new_parent_id) {
        return Err(MutationError::CycleDetected);
    }

    if let Some(old_parent) = page.tree.get_mut(&old_parent_id) {
        old_parent.children.retain(|c| c != node_id);
    }
    if let Some(new_parent) = page.tree.get_mut(new_parent_id) {
        let insert_index = index.min(new_parent.children.len());
        new_parent.children.insert(insert_index, node_id.to_string());
    }
    if let Some(node) = page.tree.get_mut(node_id) {
        node.parent_id = Some(new_parent_id.to_string());
    }
    page.touch();
    Ok(())
}

fn apply_update_props(
    project: &mut Project,
    node_id: &str,
    props: &BTreeMap<String, Value>,
) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    let node = page
        .tree
        .get_mut(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    node.props.extend(props.clone());
    page.touch();
    Ok(())
}

fn apply_update_style(
    project: &mut Project,
    node_id: &str,
    breakpoint: Breakpoint,
    style: &StyleMap,
) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    let node = page
        .tree
        .get_mut(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    node.styles.merge(breakpoint, style.clone());
    page.touch();
    Ok(())
}

fn apply_clone_node(project: &mut Project, node_id: &str) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    if node_id == page.tree.root {
        return Err(MutationError::RootImmutable);
    }
    let parent_id = page
        .tree
        .get(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?
        .parent_id
        .clone()
        .ok_or(MutationError::RootImmutable)?;

    let fragment = remap_subtree(&page.tree, node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    let clone_root = fragment.root.clone();

    for (id, mut node) in fragment.entities {
        if id == clone_root {
            node.parent_id = Some(parent_id.clone());
        }
        page.tree.entities.insert(id, node);
    }

    if let Some(parent) = page.tree.get_mut(&parent_id) {
        let position = parent
            .children
            .iter()
            .position(|c| c == node_id)
            .map(|p| p + 1)
            .unwrap_or(parent.children.len());
        parent.children.insert(position, clone_root);
    }
    page.touch();
    Ok(())
}

fn apply_add_interaction(
    project: &mut Project,
    node_id: &str,
    binding: &InteractionBinding,
) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    let node = page
        .tree
        .get_mut(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    node.interactions.push(binding.clone());
    page.touch();
    Ok(())
}

fn apply_remove_interaction(
    project: &mut Project,
    node_id: &str,
    binding_id: &str,
) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    let node = page
        .tree
        .get_mut(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    let position = node
        .interactions
        .iter()
        .position(|b| b.id == binding_id)
        .ok_or_else(|| MutationError::BindingNotFound(binding_id.to_string()))?;
    node.interactions.remove(position);
    page.touch();
    Ok(())
}

fn apply_create_page(project: &mut Project, name: &str, slug: &str) -> Result<(), MutationError> {
    let slug = pageforge_common::normalize_slug(slug);
    if project.slug_taken(&slug, None) {
        return Err(MutationError::SlugTaken(slug));
    }
    let page = Page::new(name, &slug);
    project.active_page_id = page.id.clone();
    project.pages.insert(page.id.clone(), page);
    Ok(())
}

fn apply_duplicate_page(project: &mut Project, page_id: &str) -> Result<(), MutationError> {
    let source = project
        .get_page(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;

    let tree = remap_subtree(&source.tree, &source.tree.root).ok_or_else(|| {
        MutationError::InvalidStructure(format!("page {} has no root node", page_id))
    })?;

    let mut copy = Page::new(&format!("{} Copy", source.name), &source.slug);
    copy.tree = tree;
    copy.seo = source.seo.clone();
    copy.slug = unique_slug(project, &format!("{}-copy", source.slug.trim_end_matches('/')));

    project.pages.insert(copy.id.clone(), copy);
    Ok(())
}

fn apply_delete_page(project: &mut Project, page_id: &str) -> Result<(), MutationError> {
    if !project.pages.contains_key(page_id) {
        return Err(MutationError::PageNotFound(page_id.to_string()));
    }
    if project.pages.len() == 1 {
        return Err(MutationError::LastPage);
    }
    project.pages.remove(page_id);
    if project.active_page_id == page_id {
        // Fall back to the first remaining page
        if let Some(first) = project.pages.keys().next() {
            project.active_page_id = first.clone();
        }
    }
    Ok(())
}

fn apply_rename_page(project: &mut Project, page_id: &str, name: &str) -> Result<(), MutationError> {
    let page = project
        .get_page_mut(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;
    page.name = name.to_string();
    page.touch();
    Ok(())
}

fn apply_update_page_slug(
    project: &mut Project,
    page_id: &str,
    slug: &str,
) -> Result<(), MutationError> {
    let normalized = pageforge_common::normalize_slug(slug);
    if project.slug_taken(&normalized, Some(page_id)) {
        return Err(MutationError::SlugTaken(normalized));
    }
    let page = project
        .get_page_mut(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;
    page.slug = normalized;
    page.touch();
    Ok(())
}

fn apply_update_page_seo(
    project: &mut Project,
    page_id: &str,
    seo: &Seo,
) -> Result<(), MutationError> {
    let page = project
        .get_page_mut(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;
    page.seo = seo.clone();
    page.touch();
    Ok(())
}

fn apply_set_active_page(project: &mut Project, page_id: &str) -> Result<(), MutationError> {
    if !project.pages.contains_key(page_id) {
        return Err(MutationError::PageNotFound(page_id.to_string()));
    }
    project.active_page_id = page_id.to_string();
    Ok(())
}

fn apply_template_to_page(
    project: &mut Project,
    page_id: &str,
    template: &Template,
) -> Result<(), MutationError> {
    let page = project
        .get_page_mut(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))?;
    let tree = remap_subtree(&template.tree, &template.tree.root).ok_or_else(|| {
        MutationError::InvalidStructure(format!("template {} has no root node", template.id))
    })?;
    page.tree = tree;
    page.touch();
    Ok(())
}

fn apply_template_to_section(
    project: &mut Project,
    target_node_id: &str,
    template: &Template,
) -> Result<(), MutationError> {
    let page = active_page_mut(project)?;
    if !page.tree.contains(target_node_id) {
        return Err(MutationError::NodeNotFound(target_node_id.to_string()));
    }
    let fragment = remap_subtree(&template.tree, &template.tree.root).ok_or_else(|| {
        MutationError::InvalidStructure(format!("template {} has no root node", template.id))
    })?;
    let fragment_root = fragment.root.clone();

    for (id, mut node) in fragment.entities {
        if id == fragment_root {
            node.parent_id = Some(target_node_id.to_string());
        }
        page.tree.entities.insert(id, node);
    }
    if let Some(target) = page.tree.get_mut(target_node_id) {
        target.children.push(fragment_root);
    }
    page.touch();
    Ok(())
}

fn apply_import_page(project: &mut Project, page: &Page) -> Result<(), MutationError> {
    let tree = remap_subtree(&page.tree, &page.tree.root).ok_or_else(|| {
        MutationError::InvalidStructure(format!("imported page {} has no root node", page.id))
    })?;
    let mut imported = page.clone();
    imported.tree = tree;
    imported.slug = unique_slug(project, &imported.slug);
    project.pages.insert(imported.id.clone(), imported);
    Ok(())
}

/// Derive a slug not yet used by any page, appending a counter when
/// the candidate is taken.
fn unique_slug(project: &Project, candidate: &str) -> String {
    let base = pageforge_common::normalize_slug(candidate);
    if !project.slug_taken(&base, None) {
        return base;
    }
    let mut counter = 2;
    loop {
        let next = pageforge_common::normalize_slug(&format!(
            "{}-{}",
            base.trim_end_matches('/'),
            counter
        ));
        if !project.slug_taken(&next, None) {
            return next;
        }
        counter += 1;
    }
}
