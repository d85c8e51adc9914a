//! Undo history: a bounded stack of whole-state snapshots.
//!
//! Structural actions snapshot immediately before they mutate. Cell text
//! edits are handled differently: a snapshot is staged when a cell gains
//! focus and only committed on blur if the value actually changed, so
//! focusing without typing never pollutes the stack.

use quillgrid_core::SelectionRange;

use crate::grid::Grid;

/// Oldest entries are evicted silently past this bound.
pub const HISTORY_CAPACITY: usize = 50;

/// Full copy of the mutable state, captured before an action.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub selection: Option<SelectionRange>,
    pub focused_cell: Option<(usize, usize)>,
    /// Human-readable label ("Paste", "Delete column", ...).
    pub action: String,
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    capacity: usize,
    /// Staged snapshot from focus-enter, committed on blur-if-changed.
    pending_edit: Option<Snapshot>,
    /// While true, save() is a no-op so restoring state is never itself
    /// recorded as an undoable action.
    undoing: bool,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            pending_edit: None,
            undoing: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Label of the action that undo would revert next.
    pub fn last_action(&self) -> Option<&str> {
        self.entries.last().map(|e| e.action.as_str())
    }

    /// Record a pre-mutation snapshot. No-op while an undo is being applied.
    pub fn save(&mut self, snapshot: Snapshot) {
        if self.undoing {
            return;
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.capacity {
            log::debug!("history at capacity, evicting oldest entry");
            self.entries.remove(0);
        }
    }

    /// Stage a snapshot when a cell gains focus for text editing.
    pub fn begin_cell_edit(&mut self, snapshot: Snapshot) {
        if self.undoing {
            return;
        }
        self.pending_edit = Some(snapshot);
    }

    /// Commit or discard the staged edit snapshot when the cell blurs.
    /// `changed` is whether the cell's value differs from focus time.
    pub fn end_cell_edit(&mut self, changed: bool) {
        match self.pending_edit.take() {
            Some(snapshot) if changed => self.save(snapshot),
            _ => {}
        }
    }

    /// Pop the most recent snapshot. None when the stack is empty.
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.pending_edit = None;
        self.entries.pop()
    }

    /// Guard the restoration phase: saves are dropped while set.
    pub fn set_undoing(&mut self, undoing: bool) {
        self.undoing = undoing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(action: &str) -> Snapshot {
        Snapshot {
            grid: Grid::default(),
            selection: None,
            focused_cell: None,
            action: action.to_string(),
        }
    }

    #[test]
    fn test_save_and_undo_lifo() {
        let mut history = History::new(HISTORY_CAPACITY);
        history.save(snap("first"));
        history.save(snap("second"));

        assert_eq!(history.last_action(), Some("second"));
        assert_eq!(history.undo().unwrap().action, "second");
        assert_eq!(history.undo().unwrap().action, "first");
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(HISTORY_CAPACITY);
        for i in 0..60 {
            history.save(snap(&format!("action {i}")));
        }
        assert_eq!(history.len(), 50);
        // Only the 50 most recent survive
        assert_eq!(history.last_action(), Some("action 59"));
        let mut oldest = None;
        while let Some(entry) = history.undo() {
            oldest = Some(entry.action);
        }
        assert_eq!(oldest.as_deref(), Some("action 10"));
    }

    #[test]
    fn test_no_recording_while_undoing() {
        let mut history = History::new(HISTORY_CAPACITY);
        history.save(snap("real"));

        history.set_undoing(true);
        history.save(snap("should be dropped"));
        history.begin_cell_edit(snap("also dropped"));
        history.set_undoing(false);

        assert_eq!(history.len(), 1);
        assert_eq!(history.last_action(), Some("real"));
    }

    #[test]
    fn test_edit_committed_only_when_changed() {
        let mut history = History::new(HISTORY_CAPACITY);

        history.begin_cell_edit(snap("Edit cell"));
        history.end_cell_edit(false);
        assert!(history.is_empty());

        history.begin_cell_edit(snap("Edit cell"));
        history.end_cell_edit(true);
        assert_eq!(history.len(), 1);

        // Blur without a staged snapshot is harmless
        history.end_cell_edit(true);
        assert_eq!(history.len(), 1);
    }
}
