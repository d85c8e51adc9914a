use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::range::Range;

/// A drag-defined rectangle: anchor corner (where the drag started) and live
/// corner (where the pointer currently is). Deliberately *not* normalized —
/// the live corner moves freely on any side of the anchor, and min/max
/// ordering is resolved at read time via [`SelectionRange::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl SelectionRange {
    /// Start a selection anchored at a single cell.
    pub fn anchored(row: usize, col: usize) -> Self {
        Self {
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Move the live corner to the cell under the pointer.
    pub fn extend_to(&mut self, row: usize, col: usize) {
        self.end_row = row;
        self.end_col = col;
    }

    /// The normalized min/max rectangle.
    pub fn normalized(&self) -> Range {
        Range::new(self.start_row, self.start_col, self.end_row, self.end_col)
    }
}

/// The selection model: an optional drag rectangle plus a materialized set of
/// member cells so `is_cell_selected` stays O(1) no matter how often the
/// renderer asks.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    range: Option<SelectionRange>,
    members: FxHashSet<(usize, usize)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current drag rectangle, if any.
    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn is_active(&self) -> bool {
        self.range.is_some()
    }

    /// O(1) membership test against the materialized cell set.
    pub fn is_cell_selected(&self, row: usize, col: usize) -> bool {
        self.members.contains(&(row, col))
    }

    /// Total number of selected cells.
    pub fn cell_count(&self) -> usize {
        self.members.len()
    }

    /// Replace the selection with a fresh rectangle and rebuild membership.
    pub fn set(&mut self, range: SelectionRange) {
        self.range = Some(range);
        self.rebuild_members();
    }

    /// Move the live corner and rebuild membership.
    pub fn extend_to(&mut self, row: usize, col: usize) {
        if let Some(range) = &mut self.range {
            range.extend_to(row, col);
        }
        self.rebuild_members();
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        self.range = None;
        self.members.clear();
    }

    /// Restore a previously captured range (undo path).
    pub fn restore(&mut self, range: Option<SelectionRange>) {
        self.range = range;
        self.rebuild_members();
    }

    fn rebuild_members(&mut self) {
        self.members.clear();
        if let Some(range) = &self.range {
            self.members.extend(range.normalized().cells());
        }
    }
}
