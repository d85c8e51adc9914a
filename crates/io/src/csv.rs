// CSV/TSV export

use std::path::Path;

use quillgrid_engine::grid::Grid;

/// Export the grid as CSV, trimming trailing empty rows and columns the way
/// the JSON exporter trims a document for display.
pub fn export(grid: &Grid, path: &Path) -> Result<(), String> {
    export_with_delimiter(grid, path, b',')
}

pub fn export_tsv(grid: &Grid, path: &Path) -> Result<(), String> {
    export_with_delimiter(grid, path, b'\t')
}

pub fn export_with_delimiter(grid: &Grid, path: &Path, delimiter: u8) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for record in trimmed_records(grid) {
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

fn trimmed_records(grid: &Grid) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut last_non_empty_row = 0;

    for row in 0..grid.rows() {
        let mut record: Vec<String> = Vec::new();
        let mut last_non_empty_col = 0;

        for col in 0..grid.cols() {
            let value = grid.cell(row, col).unwrap_or_default().to_string();
            if !value.is_empty() {
                last_non_empty_col = col + 1;
                last_non_empty_row = row + 1;
            }
            record.push(value);
        }

        // Trim trailing empty cells; the csv writer needs at least one field
        record.truncate(last_non_empty_col.max(1));
        rows.push(record);
    }

    // Trim trailing empty rows
    rows.truncate(last_non_empty_row);
    rows
}
