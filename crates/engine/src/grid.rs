//! The cell store: a rectangular matrix of cell strings plus per-column
//! pixel widths kept in lockstep.
//!
//! Every structural mutation preserves two invariants:
//! - all rows have the same length (the grid stays rectangular)
//! - `column_widths.len() == cols`

use crate::error::GridError;

/// Fresh documents open with this shape.
pub const INITIAL_ROWS: usize = 10;
pub const INITIAL_COLS: usize = 2;

/// Pixel width given to newly created columns.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<String>>,
    column_widths: Vec<u32>,
    default_width: u32,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, default_width: u32) -> Self {
        // A grid always has at least one cell
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: vec![vec![String::new(); cols]; rows],
            column_widths: vec![default_width; cols],
            default_width,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.column_widths.len()
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    pub fn default_width(&self) -> u32 {
        self.default_width
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(GridError::IndexOutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&str, GridError> {
        self.check_bounds(row, col)?;
        Ok(&self.cells[row][col])
    }

    /// Write a cell, then apply the auto-expand policy: a non-empty write to
    /// the last row appends a fresh empty row, so the grid keeps growing as
    /// long as the user keeps typing at the bottom. Returns true when a row
    /// was appended. Columns never grow this way — only paste overflow adds
    /// columns.
    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<bool, GridError> {
        self.check_bounds(row, col)?;
        self.cells[row][col] = value.to_string();

        let expanded = !value.is_empty() && row == self.rows() - 1;
        if expanded {
            self.add_row();
        }
        Ok(expanded)
    }

    /// Write a cell without the auto-expand policy. Load paths use this so a
    /// document keeps the exact shape it was saved with.
    pub fn set_cell_raw(&mut self, row: usize, col: usize, value: &str) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        self.cells[row][col] = value.to_string();
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<&[String], GridError> {
        self.check_bounds(row, 0)?;
        Ok(&self.cells[row])
    }

    pub fn add_row(&mut self) {
        self.cells.push(vec![String::new(); self.cols()]);
    }

    pub fn add_column(&mut self) {
        for row in &mut self.cells {
            row.push(String::new());
        }
        self.column_widths.push(self.default_width);
    }

    pub fn insert_row_above(&mut self, index: usize) -> Result<(), GridError> {
        self.check_bounds(index, 0)?;
        self.cells.insert(index, vec![String::new(); self.cols()]);
        Ok(())
    }

    pub fn insert_row_below(&mut self, index: usize) -> Result<(), GridError> {
        self.check_bounds(index, 0)?;
        self.cells.insert(index + 1, vec![String::new(); self.cols()]);
        Ok(())
    }

    pub fn insert_column_before(&mut self, index: usize) -> Result<(), GridError> {
        self.check_bounds(0, index)?;
        for row in &mut self.cells {
            row.insert(index, String::new());
        }
        self.column_widths.insert(index, self.default_width);
        Ok(())
    }

    pub fn insert_column_after(&mut self, index: usize) -> Result<(), GridError> {
        self.check_bounds(0, index)?;
        for row in &mut self.cells {
            row.insert(index + 1, String::new());
        }
        self.column_widths.insert(index + 1, self.default_width);
        Ok(())
    }

    /// Remove a column and its width entry. Refused when only one column
    /// remains; the grid is left untouched in that case.
    pub fn delete_column(&mut self, index: usize) -> Result<(), GridError> {
        self.check_bounds(0, index)?;
        if self.cols() == 1 {
            return Err(GridError::LastColumn);
        }
        for row in &mut self.cells {
            row.remove(index);
        }
        self.column_widths.remove(index);
        Ok(())
    }

    pub fn set_column_width(&mut self, index: usize, width: u32) -> Result<(), GridError> {
        self.check_bounds(0, index)?;
        self.column_widths[index] = width;
        Ok(())
    }

    /// Grow the grid (appending empty rows and default-width columns) until
    /// it covers at least `rows x cols`. Existing cells are untouched.
    pub fn ensure_size(&mut self, rows: usize, cols: usize) {
        while self.cols() < cols {
            self.add_column();
        }
        while self.rows() < rows {
            self.add_row();
        }
    }

    /// Geometric hit-test: which column does horizontal position `x` fall in?
    /// Columns are laid out left to right at their pixel widths.
    pub fn column_at_x(&self, x: f32) -> Option<usize> {
        if x < 0.0 {
            return None;
        }
        let mut edge = 0.0f32;
        for (col, width) in self.column_widths.iter().enumerate() {
            edge += *width as f32;
            if x < edge {
                return Some(col);
            }
        }
        None
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(INITIAL_ROWS, INITIAL_COLS, DEFAULT_COLUMN_WIDTH)
    }
}
