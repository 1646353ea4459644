//! Integration tests for the editor crate

use pageforge_editor::{Breakpoint, ComponentKind, Document, Mutation};
use std::collections::BTreeMap;

fn root_of(doc: &Document) -> String {
    doc.project.active_page().unwrap().tree.root.clone()
}

fn add_child(doc: &mut Document, parent_id: &str, kind: ComponentKind) -> String {
    let node = doc.registry().create_node(kind).unwrap();
    let node_id = node.id.clone();
    doc.apply(Mutation::AddNode {
        parent_id: parent_id.to_string(),
        node,
    })
    .unwrap();
    node_id
}

#[test]
fn test_document_lifecycle() {
    let mut doc = Document::new("My Site");
    assert_eq!(doc.version, 0);
    assert_eq!(doc.project.pages.len(), 1);

    let root = root_of(&doc);
    let text = add_child(&mut doc, &root, ComponentKind::Text);

    assert_eq!(doc.version, 1);
    assert!(doc.get_node(&text).is_some());
    assert!(doc.project.active_page().unwrap().tree.validate().is_ok());
}

#[test]
fn test_undo_redo_exactness() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);
    let initial = doc.project.clone();

    // Apply N mutations
    let container = add_child(&mut doc, &root, ComponentKind::Container);
    let text = add_child(&mut doc, &container, ComponentKind::Text);
    let mut props = BTreeMap::new();
    props.insert("text".to_string(), serde_json::json!("Hello"));
    doc.apply(Mutation::UpdateProps {
        node_id: text.clone(),
        props,
    })
    .unwrap();

    let after_all = doc.project.clone();

    // Undo N times restores the initial state exactly
    assert!(doc.undo());
    assert!(doc.undo());
    assert!(doc.undo());
    assert_eq!(doc.project.pages, initial.pages);
    assert_eq!(doc.project.active_page_id, initial.active_page_id);
    assert!(!doc.undo());

    // Redo once per undo restores the final state exactly
    assert!(doc.redo());
    assert!(doc.redo());
    assert!(doc.redo());
    assert_eq!(doc.project.pages, after_all.pages);
    assert!(!doc.redo());
}

#[test]
fn test_new_mutation_clears_redo() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);

    add_child(&mut doc, &root, ComponentKind::Text);
    assert!(doc.undo());
    assert!(doc.can_redo());

    add_child(&mut doc, &root, ComponentKind::Button);
    assert!(!doc.can_redo());
}

#[test]
fn test_style_mutation_and_cascade() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);
    let text = add_child(&mut doc, &root, ComponentKind::Text);

    let mut desktop = BTreeMap::new();
    desktop.insert("color".to_string(), "red".to_string());
    doc.apply(Mutation::UpdateStyle {
        node_id: text.clone(),
        breakpoint: Breakpoint::Desktop,
        style: desktop,
    })
    .unwrap();

    let mut tablet = BTreeMap::new();
    tablet.insert("color".to_string(), "blue".to_string());
    doc.apply(Mutation::UpdateStyle {
        node_id: text.clone(),
        breakpoint: Breakpoint::Tablet,
        style: tablet,
    })
    .unwrap();

    // No mobile bucket: tablet's override is visible at mobile
    let mobile = doc.resolve_style(&text, Breakpoint::Mobile).unwrap();
    assert_eq!(mobile.get("color").unwrap(), "blue");
    let desktop = doc.resolve_style(&text, Breakpoint::Desktop).unwrap();
    assert_eq!(desktop.get("color").unwrap(), "red");
}

#[test]
fn test_project_round_trip_through_document() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);
    let container = add_child(&mut doc, &root, ComponentKind::Container);
    add_child(&mut doc, &container, ComponentKind::Heading);

    let exported = doc.export();
    let reimported = Document::import(&exported).unwrap();
    assert_eq!(reimported.project, doc.project);

    // Fresh document: history does not travel with the payload
    assert!(!reimported.can_undo());
    assert_eq!(reimported.version, 0);
}

#[test]
fn test_import_page_marks_copy_and_remaps() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);
    add_child(&mut doc, &root, ComponentKind::Text);

    let page_json = pageforge_document::export_page(doc.project.active_page().unwrap());
    let imported_id = doc.import_page(&page_json).unwrap();

    let imported = doc.get_page(&imported_id).unwrap();
    assert!(imported.name.ends_with("(imported)"));
    assert_ne!(imported.slug, "/");

    // No id shared with the original page's tree
    let original = doc.project.pages.values().find(|p| p.slug == "/").unwrap();
    for id in imported.tree.entities.keys() {
        assert!(!original.tree.contains(id));
    }
}

#[test]
fn test_updated_at_bumps_on_mutation() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);
    let before = doc.project.active_page().unwrap().updated_at;

    add_child(&mut doc, &root, ComponentKind::Text);
    let after = doc.project.active_page().unwrap().updated_at;
    assert!(after >= before);
}

#[test]
fn test_history_bound_evicts_oldest() {
    let mut doc = Document::new("My Site");
    let root = root_of(&doc);

    // More mutations than the default bound of 100
    for _ in 0..105 {
        add_child(&mut doc, &root, ComponentKind::Text);
    }

    let mut undone = 0;
    while doc.undo() {
        undone += 1;
    }
    assert_eq!(undone, 100);

    // The oldest five mutations are beyond the horizon: the tree
    // still carries their nodes after exhausting undo
    let page = doc.project.active_page().unwrap();
    assert_eq!(page.tree.len(), 1 + 5);
}
