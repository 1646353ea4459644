//! # Pageforge Document Model
//!
//! The canonical data model for pageforge projects.
//!
//! A project is a set of pages; each page owns an entity tree of typed
//! nodes carrying props, per-breakpoint styles, and interaction
//! bindings. This crate holds the model types, the style cascade
//! resolver, and the serialize/import surface. All structural
//! mutation goes through `pageforge-editor`.

pub mod interaction;
pub mod node;
pub mod page;
pub mod project;
pub mod serialize;
pub mod style;
pub mod template;
pub mod tree;

pub use interaction::{Action, EventKind, InteractionBinding, VisibilityVerb};
pub use node::{ComponentKind, ComponentRegistry, ComponentSpec, Node, RegistryError};
pub use page::{Page, Seo};
pub use project::{Breakpoints, Project, ProjectMeta, Theme, SCHEMA_VERSION};
pub use serialize::{
    export_page, export_project, export_template, import_page, import_project, import_template,
    ImportError,
};
pub use style::{Breakpoint, StyleMap, StyleSheet};
pub use template::{Template, TemplateKind, TemplateMeta};
pub use tree::{EntityTree, TreeError};
