//! Project / page / template export and import.
//!
//! Export is plain serde_json. Import validates the payload's required
//! top-level fields before deserializing, so a malformed payload fails
//! with a readable reason and never partially mutates anything.
//! Imported pages get a fresh id and a marked name so they never
//! silently overwrite an existing page.

use crate::page::Page;
use crate::project::Project;
use crate::template::Template;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid payload: not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid payload: missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: u64, expected: u32 },
}

/// Serialize a project for export. Pretty-printed; key order is
/// stable (BTreeMap-backed), so equal projects export byte-equal.
pub fn export_project(project: &Project) -> String {
    serde_json::to_string_pretty(project).unwrap_or_default()
}

pub fn export_page(page: &Page) -> String {
    serde_json::to_string_pretty(page).unwrap_or_default()
}

pub fn export_template(template: &Template) -> String {
    serde_json::to_string_pretty(template).unwrap_or_default()
}

/// Import a serialized project. Requires `pages` and `schemaVersion`.
pub fn import_project(raw: &str) -> Result<Project, ImportError> {
    let value: Value = serde_json::from_str(raw)?;
    require(&value, "pages")?;
    let version = require(&value, "schemaVersion")?
        .as_u64()
        .ok_or(ImportError::MissingField("schemaVersion"))?;
    if version != SCHEMA_VERSION_U64 {
        return Err(ImportError::SchemaVersion {
            found: version,
            expected: crate::project::SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Import a serialized page. Requires `tree` and `id`; the imported
/// copy gets a fresh page id and a suffixed name.
pub fn import_page(raw: &str) -> Result<Page, ImportError> {
    let value: Value = serde_json::from_str(raw)?;
    require(&value, "tree")?;
    require(&value, "id")?;
    let mut page: Page = serde_json::from_value(value)?;
    page.id = pageforge_common::new_page_id();
    page.name = format!("{} (imported)", page.name);
    Ok(page)
}

/// Import a serialized template. Requires `tree` and `metadata`.
pub fn import_template(raw: &str) -> Result<Template, ImportError> {
    let value: Value = serde_json::from_str(raw)?;
    require(&value, "tree")?;
    require(&value, "metadata")?;
    Ok(serde_json::from_value(value)?)
}

const SCHEMA_VERSION_U64: u64 = crate::project::SCHEMA_VERSION as u64;

fn require<'a>(value: &'a Value, field: &'static str) -> Result<&'a Value, ImportError> {
    value.get(field).ok_or(ImportError::MissingField(field))
}
