//! # Pageforge Publisher
//!
//! Deterministic static export: `(project, theme) → bundle`.
//!
//! The bundle maps output file paths to content strings: one
//! standalone HTML document per page, one global stylesheet of theme
//! tokens, and the raw serialized project for the client runtime to
//! introspect. The function is pure: no filesystem or network access;
//! writing the result is the caller's responsibility. Publishing the
//! same project twice yields byte-identical output.

mod css;
mod html;

pub use css::compile_theme_css;
pub use html::{compile_page_html, HtmlOptions};

use pageforge_document::{Project, Theme};
use std::collections::BTreeMap;
use thiserror::Error;

pub const STYLES_FILE: &str = "styles.css";
pub const PROJECT_DATA_FILE: &str = "project.json";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Page `{page}` is missing its root node `{root}`")]
    MissingRoot { page: String, root: String },
}

/// The generated static output files, path → content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishBundle {
    pub files: BTreeMap<String, String>,
}

impl PublishBundle {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

/// Publish every page of the project against the given theme.
pub fn publish(project: &Project, theme: &Theme) -> Result<PublishBundle, PublishError> {
    let mut bundle = PublishBundle::default();
    let options = HtmlOptions::default();

    for page in project.pages.values() {
        let html = compile_page_html(page, &options)?;
        let file = format!("{}.html", pageforge_common::slug_to_file_name(&page.slug));
        bundle.files.insert(file, html);
    }

    bundle
        .files
        .insert(STYLES_FILE.to_string(), compile_theme_css(theme));
    bundle.files.insert(
        PROJECT_DATA_FILE.to_string(),
        pageforge_document::export_project(project),
    );

    Ok(bundle)
}
