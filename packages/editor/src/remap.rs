//! Subtree remapping: id-disjoint copies of tree fragments.
//!
//! Two passes over the fragment, both iterative pre-order:
//!
//! 1. Visit every node reachable from `start` and assign it a freshly
//!    minted id, recorded in an old→new table.
//! 2. Visit again, deep-copying each node with its id, parent id, and
//!    children rewritten through the table. The fragment root's
//!    parent maps to `None` (its old parent is outside the table).
//!
//! The result is structurally isomorphic to the source and shares no
//! ids with any tree it is merged into, so the same template can be
//! instantiated any number of times.

use pageforge_document::EntityTree;
use std::collections::BTreeMap;

/// Produce an id-disjoint copy of the fragment rooted at `start`.
/// Returns `None` if `start` is not present in `source`.
pub fn remap_subtree(source: &EntityTree, start: &str) -> Option<EntityTree> {
    let order = source.preorder(start);
    if order.is_empty() {
        return None;
    }

    // Pass 1: id assignment
    let mut table: BTreeMap<String, String> = BTreeMap::new();
    for id in &order {
        if let Some(node) = source.get(id) {
            table.insert(
                id.clone(),
                pageforge_common::new_entity_id(&node.kind.id_prefix()),
            );
        }
    }

    // Pass 2: reconstruction
    let mut entities = BTreeMap::new();
    for id in &order {
        let (Some(node), Some(new_id)) = (source.get(id), table.get(id)) else {
            continue;
        };
        let mut copy = node.clone();
        copy.id = new_id.clone();
        copy.parent_id = node
            .parent_id
            .as_ref()
            .and_then(|p| table.get(p))
            .cloned();
        copy.children = node
            .children
            .iter()
            .filter_map(|c| table.get(c))
            .cloned()
            .collect();
        entities.insert(copy.id.clone(), copy);
    }

    let root = table.get(start).cloned()?;
    Some(EntityTree { root, entities })
}
