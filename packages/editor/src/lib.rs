//! # Pageforge Editor
//!
//! Document editing engine for pageforge projects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document model: Project / Page / EntityTree │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Snapshot history (bounded undo/redo)     │
//! │  - Subtree remapping for clone/templates    │
//! │  - Template library                         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ publisher: project → static bundle          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The project is the source of truth**: rendered output is a
//!    derived view, recomputable at any time.
//! 2. **Explicit failure**: a mutation naming an unresolvable id is a
//!    typed error, never a silent no-op, and leaves state untouched.
//! 3. **Single writer**: every mutation runs to completion before the
//!    next is observed; there is no interleaving to guard against.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pageforge_editor::{Document, Mutation};
//!
//! let mut doc = Document::new("My Site");
//! let node = doc.registry().create_node(ComponentKind::Text)?;
//! let root = doc.project.active_page().unwrap().tree.root.clone();
//! doc.apply(Mutation::AddNode { parent_id: root, node })?;
//! doc.undo();
//! ```

mod document;
mod errors;
mod history;
mod mutations;
mod remap;

pub use document::Document;
pub use errors::EditorError;
pub use history::{History, Snapshot};
pub use mutations::{Mutation, MutationError};
pub use remap::remap_subtree;

// Re-export model types commonly needed alongside the editor
pub use pageforge_document::{
    Action, Breakpoint, ComponentKind, ComponentRegistry, EventKind, InteractionBinding, Node,
    Page, Project, Template, TemplateKind,
};
