// JSON document format
//
// The persistence collaborator speaks this shape:
//   { "title": ..., "rows": [{ "data": [...] }], "columnWidths": [...] }
// Loading is defensive: ragged rows are padded back to rectangular and the
// width array is brought into lockstep with the column count, so a document
// mangled by an older writer still opens.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use quillgrid_engine::grid::{Grid, DEFAULT_COLUMN_WIDTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub rows: Vec<DocumentRow>,
    #[serde(rename = "columnWidths")]
    pub column_widths: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRow {
    pub data: Vec<String>,
}

impl Document {
    pub fn from_grid(title: &str, grid: &Grid) -> Self {
        let rows = (0..grid.rows())
            .map(|r| DocumentRow {
                // Row access is in-bounds by construction
                data: grid.row(r).map(<[String]>::to_vec).unwrap_or_default(),
            })
            .collect();
        Self {
            title: title.to_string(),
            rows,
            column_widths: grid.column_widths().to_vec(),
        }
    }

    /// Rebuild a grid, re-rectangularizing along the way: every row is padded
    /// to the widest row's length and the width array is padded with the
    /// default width (or truncated) to match.
    pub fn to_grid(&self) -> Grid {
        let rows = self.rows.len().max(1);
        let cols = self
            .rows
            .iter()
            .map(|r| r.data.len())
            .max()
            .unwrap_or(0)
            .max(self.column_widths.len())
            .max(1);

        let mut grid = Grid::new(rows, cols, DEFAULT_COLUMN_WIDTH);
        for (r, row) in self.rows.iter().enumerate() {
            for (c, value) in row.data.iter().enumerate() {
                // Raw writes: loading must reproduce the saved shape exactly,
                // never trigger the last-row auto-expand policy
                let _ = grid.set_cell_raw(r, c, value);
            }
        }
        for (c, width) in self.column_widths.iter().take(cols).enumerate() {
            let _ = grid.set_column_width(c, *width);
        }
        grid
    }
}

pub fn load(path: &Path) -> Result<Document, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| e.to_string())
}

pub fn save(document: &Document, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, document).map_err(|e| e.to_string())
}
