//! Clipboard interchange: selections serialize to tab/newline-delimited text
//! (the format every spreadsheet speaks), and pasted TSV becomes a
//! rectangular block that may grow the grid to fit.

use quillgrid_core::Range;

use crate::grid::Grid;

/// Serialize the normalized rectangle to TSV: one line per row, cells joined
/// with tabs. Cells are read straight from the grid; anything out of range
/// serializes as empty.
pub fn serialize_range(grid: &Grid, range: Range) -> String {
    let mut out = String::new();
    for row in range.start_row..=range.end_row {
        if row > range.start_row {
            out.push('\n');
        }
        for col in range.start_col..=range.end_col {
            if col > range.start_col {
                out.push('\t');
            }
            if let Ok(value) = grid.cell(row, col) {
                out.push_str(value);
            }
        }
    }
    out
}

/// Split pasted text on newlines then tabs. Spreadsheets that put a trailing
/// newline on the clipboard produce a final line that parses as one empty
/// cell; that artifact row is dropped.
pub fn parse_tsv(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = text
        .split('\n')
        .map(|line| {
            line.trim_end_matches('\r')
                .split('\t')
                .map(str::to_string)
                .collect()
        })
        .collect();

    if let Some(last) = rows.last() {
        if last.len() == 1 && last[0].is_empty() {
            rows.pop();
        }
    }
    rows
}

/// Where a paste landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Bottom-right cell of the pasted block; focus moves here afterwards.
    pub focus: (usize, usize),
    pub rows_written: usize,
    pub cols_written: usize,
}

/// Write a parsed block into the grid with its top-left at (row, col),
/// growing the grid (and column widths) first so the whole block fits.
/// Cells outside the block are untouched. Returns None for an empty block.
pub fn paste_block(
    grid: &mut Grid,
    row: usize,
    col: usize,
    block: &[Vec<String>],
) -> Option<PasteOutcome> {
    let block_cols = block.iter().map(Vec::len).max().unwrap_or(0);
    if block.is_empty() || block_cols == 0 {
        return None;
    }

    let required_rows = row + block.len();
    let required_cols = col + block_cols;
    if required_rows > grid.rows() || required_cols > grid.cols() {
        log::debug!(
            "paste at ({row}, {col}) grows grid to {required_rows}x{required_cols}"
        );
    }
    grid.ensure_size(required_rows, required_cols);

    for (dr, block_row) in block.iter().enumerate() {
        for (dc, value) in block_row.iter().enumerate() {
            // Bounds are guaranteed by ensure_size; a failure here would be
            // a bug in the expansion math, so surface it loudly in tests.
            debug_assert!(row + dr < grid.rows() && col + dc < grid.cols());
            let _ = grid.set_cell(row + dr, col + dc, value);
        }
    }

    Some(PasteOutcome {
        focus: (row + block.len() - 1, col + block_cols - 1),
        rows_written: block.len(),
        cols_written: block_cols,
    })
}

/// Clear the text of every cell in the rectangle (cut and delete-selection
/// both use this; history recording belongs to the caller).
pub fn clear_range(grid: &mut Grid, range: Range) {
    for (row, col) in range.cells() {
        let _ = grid.set_cell(row, col, "");
    }
}
