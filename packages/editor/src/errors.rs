//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Import error: {0}")]
    Import(#[from] pageforge_document::ImportError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Cannot snapshot template from `{0}`: source not found")]
    TemplateSource(String),
}
