use serde::{Deserialize, Serialize};

/// A normalized rectangle of cells, inclusive at both corners. Unlike
/// [`crate::SelectionRange`] this is always min/max ordered, so the read
/// paths (clipboard, clearing, membership) never re-sort corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Range {
    /// Build from any two opposite corners; ordering is fixed up here.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    pub fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    pub fn rows(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn cols(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Every cell in the rectangle, row-major.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (self.start_row..=self.end_row)
            .flat_map(move |r| (self.start_col..=self.end_col).map(move |c| (r, c)))
    }

    pub fn is_single(&self) -> bool {
        self.cell_count() == 1
    }
}
