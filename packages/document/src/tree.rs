//! The entity tree: a root id plus a flat id-keyed node arena.
//!
//! Children lists are the owning references; `parent_id` is a lookup
//! back-reference only. Destruction always proceeds top-down from the
//! node being removed, never by chasing parent pointers. Traversals
//! are iterative (explicit stack) so user-constructed deep trees
//! cannot exhaust the call stack.

use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Structural invariant violations, reported by [`EntityTree::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Root node `{0}` is missing from the entity map")]
    MissingRoot(String),

    #[error("Child `{child}` of `{parent}` is missing from the entity map")]
    DanglingChild { parent: String, child: String },

    #[error("Node `{child}` has parent `{actual:?}` but is listed under `{parent}`")]
    ParentMismatch {
        parent: String,
        child: String,
        actual: Option<String>,
    },

    #[error("Root node `{0}` has a non-null parent")]
    RootHasParent(String),

    #[error("Node `{0}` is referenced by more than one parent")]
    SharedChild(String),

    #[error("Node `{0}` is unreachable from the root")]
    Unreachable(String),
}

/// A page's node graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTree {
    pub root: String,
    pub entities: BTreeMap<String, Node>,
}

impl EntityTree {
    /// Build a tree owning a single root node.
    pub fn with_root(mut root: Node) -> Self {
        root.parent_id = None;
        let root_id = root.id.clone();
        let mut entities = BTreeMap::new();
        entities.insert(root_id.clone(), root);
        Self {
            root: root_id,
            entities,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Pre-order node ids starting at `start` (inclusive). Unknown
    /// start yields an empty list.
    pub fn preorder(&self, start: &str) -> Vec<String> {
        let mut order = Vec::new();
        if !self.contains(start) {
            return order;
        }
        let mut stack = vec![start.to_string()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(&id) {
                // Reverse push so children come off in declared order
                for child in node.children.iter().rev() {
                    stack.push(child.clone());
                }
                order.push(id);
            }
        }
        order
    }

    /// Transitive descendant ids of `id`, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut order = self.preorder(id);
        if !order.is_empty() {
            order.remove(0);
        }
        order
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    /// (a node is not its own ancestor).
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = self.get(id).and_then(|n| n.parent_id.clone());
        while let Some(pid) = current {
            if pid == ancestor {
                return true;
            }
            current = self.get(&pid).and_then(|n| n.parent_id.clone());
        }
        false
    }

    /// Check every structural invariant. Used by tests and by import.
    pub fn validate(&self) -> Result<(), TreeError> {
        let root = self
            .get(&self.root)
            .ok_or_else(|| TreeError::MissingRoot(self.root.clone()))?;
        if root.parent_id.is_some() {
            return Err(TreeError::RootHasParent(self.root.clone()));
        }

        let mut seen = std::collections::BTreeSet::new();
        for (parent_id, parent) in &self.entities {
            for child_id in &parent.children {
                let child = self.get(child_id).ok_or_else(|| TreeError::DanglingChild {
                    parent: parent_id.clone(),
                    child: child_id.clone(),
                })?;
                if child.parent_id.as_deref() != Some(parent_id.as_str()) {
                    return Err(TreeError::ParentMismatch {
                        parent: parent_id.clone(),
                        child: child_id.clone(),
                        actual: child.parent_id.clone(),
                    });
                }
                if !seen.insert(child_id.clone()) {
                    return Err(TreeError::SharedChild(child_id.clone()));
                }
            }
        }

        // Reachability doubles as the cycle check: a cycle would leave
        // its members unreachable from the root.
        let reachable: std::collections::BTreeSet<_> =
            self.preorder(&self.root).into_iter().collect();
        for id in self.entities.keys() {
            if !reachable.contains(id) {
                return Err(TreeError::Unreachable(id.clone()));
            }
        }

        Ok(())
    }
}
