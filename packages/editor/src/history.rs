//! Snapshot-based undo/redo.
//!
//! Two stacks of whole relevant-state snapshots (pages plus active
//! page id, not the full project, to bound snapshot size) bracketing
//! every mutation. The past stack is a ring: beyond `max_levels` the
//! oldest entry is evicted FIFO, trading unlimited undo depth for a
//! fixed memory ceiling.

use pageforge_document::{Page, Project};
use std::collections::{BTreeMap, VecDeque};

pub const DEFAULT_MAX_LEVELS: usize = 100;

/// Point-in-time copy of the undoable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub pages: BTreeMap<String, Page>,
    pub active_page_id: String,
}

impl Snapshot {
    pub fn of(project: &Project) -> Self {
        Self {
            pages: project.pages.clone(),
            active_page_id: project.active_page_id.clone(),
        }
    }

    pub fn restore(self, project: &mut Project) {
        project.pages = self.pages;
        project.active_page_id = self.active_page_id;
    }
}

#[derive(Debug)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    max_levels: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_levels,
        }
    }

    /// Record the pre-mutation snapshot. Clears the future stack: a
    /// new action invalidates anything previously undone.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Pop the most recent snapshot, parking `current` on the future
    /// stack. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.past.pop_back()?;
        self.future.push(current);
        Some(snapshot)
    }

    /// Mirror of [`History::undo`] using the future stack.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.future.pop()?;
        self.past.push_back(current);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_of_new(name: &str) -> Snapshot {
        Snapshot::of(&Project::new(name))
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_levels(), 0);
    }

    #[test]
    fn test_undo_on_empty_is_none() {
        let mut history = History::new();
        assert!(history.undo(snapshot_of_new("a")).is_none());
        // Nothing was parked on the future stack
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = History::new();
        history.record(snapshot_of_new("s0"));
        let restored = history.undo(snapshot_of_new("s1")).unwrap();
        assert_eq!(history.redo_levels(), 1);

        history.record(restored);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_fifo_eviction_beyond_bound() {
        let mut history = History::with_max_levels(3);
        let first = snapshot_of_new("first");
        history.record(first.clone());
        for _ in 0..5 {
            history.record(snapshot_of_new("later"));
        }
        assert_eq!(history.undo_levels(), 3);

        // The oldest entries were evicted; draining the stack never
        // yields the first snapshot
        let mut current = snapshot_of_new("current");
        while let Some(s) = history.undo(current) {
            assert_ne!(s.active_page_id, first.active_page_id);
            current = s;
        }
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new();
        let s0 = snapshot_of_new("s0");
        let s1 = snapshot_of_new("s1");

        history.record(s0.clone());
        let popped = history.undo(s1.clone()).unwrap();
        assert_eq!(popped, s0);

        let replayed = history.redo(popped).unwrap();
        assert_eq!(replayed, s1);
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }
}
