//! The editing session: one open document's grid, selection, focus, and
//! undo history, driven by the abstract input-event stream.
//!
//! All mutation runs synchronously inside a single dispatch call, so there is
//! no locking anywhere — the host's event loop provides the serialization.
//! The focused cell is explicit session state (`focus_cell` / `blur`), never
//! derived from host-UI introspection.

use quillgrid_core::{DragOutcome, PointerTracker, Range, Selection, SelectionRange};

use crate::clipboard::{self, parse_tsv, serialize_range};
use crate::content;
use crate::error::GridError;
use crate::events::{InputEvent, Key, Modifiers};
use crate::grid::{Grid, DEFAULT_COLUMN_WIDTH, INITIAL_COLS, INITIAL_ROWS};
use crate::history::{History, Snapshot, HISTORY_CAPACITY};

/// Pointer travel below this (pixels) keeps a press a plain click.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Uniform row height used for pointer hit-testing.
pub const DEFAULT_ROW_HEIGHT: f32 = 32.0;

/// Inline images allowed per cell.
pub const MAX_IMAGES_PER_CELL: usize = 2;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub initial_rows: usize,
    pub initial_cols: usize,
    pub default_column_width: u32,
    pub row_height: f32,
    pub drag_threshold: f32,
    pub history_capacity: usize,
    pub max_images_per_cell: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_rows: INITIAL_ROWS,
            initial_cols: INITIAL_COLS,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            drag_threshold: DRAG_THRESHOLD,
            history_capacity: HISTORY_CAPACITY,
            max_images_per_cell: MAX_IMAGES_PER_CELL,
        }
    }
}

pub struct GridSession {
    grid: Grid,
    selection: Selection,
    pointer: PointerTracker,
    history: History,
    /// The cell currently focused for text editing, if any.
    focused: Option<(usize, usize)>,
    /// Cell value at focus time; compared on blur to decide whether the
    /// staged edit snapshot becomes a history entry.
    edit_origin: Option<String>,
    status_message: Option<String>,
    options: SessionOptions,
}

impl GridSession {
    pub fn new(options: SessionOptions) -> Self {
        let grid = Grid::new(
            options.initial_rows,
            options.initial_cols,
            options.default_column_width,
        );
        Self::with_grid(grid, options)
    }

    /// Open a session over an existing grid (a loaded document).
    pub fn with_grid(grid: Grid, options: SessionOptions) -> Self {
        Self {
            grid,
            selection: Selection::new(),
            pointer: PointerTracker::new(options.drag_threshold),
            history: History::new(options.history_capacity),
            focused: None,
            edit_origin: None,
            status_message: None,
            options,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn focused_cell(&self) -> Option<(usize, usize)> {
        self.focused
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Take the latest user-facing status line, if one was produced.
    pub fn take_status(&mut self) -> Option<String> {
        self.status_message.take()
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    /// Feed one input event. Copy and Cut return the TSV text to hand to the
    /// host clipboard; everything else returns None.
    pub fn dispatch(&mut self, event: InputEvent) -> Option<String> {
        match event {
            InputEvent::MouseDown { row, col, x, y } => {
                self.pointer.mouse_down(row, col, x, y);
                None
            }
            InputEvent::MouseMove { x, y } => {
                self.handle_mouse_move(x, y);
                None
            }
            InputEvent::MouseUp { row, col } => {
                self.handle_mouse_up(row, col);
                None
            }
            InputEvent::Click { cell } => {
                self.handle_click(cell);
                None
            }
            InputEvent::KeyDown { key, modifiers } => {
                self.handle_key(key, modifiers);
                None
            }
            InputEvent::Paste { text } => {
                self.paste(&text);
                None
            }
            InputEvent::Copy => self.copy(),
            InputEvent::Cut => self.cut(),
        }
    }

    fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let hit = self.cell_at_point(x, y);
        match self.pointer.mouse_move(x, y, hit) {
            DragOutcome::None => {}
            DragOutcome::BeginSelection { anchor } => {
                // Selection and cell editing are mutually exclusive
                self.blur();
                self.selection.set(SelectionRange::anchored(anchor.0, anchor.1));
                if let Some((row, col)) = hit {
                    if (row, col) != anchor {
                        self.selection.extend_to(row, col);
                    }
                }
            }
            DragOutcome::ExtendSelection { row, col } => {
                self.selection.extend_to(row, col);
            }
            DragOutcome::Click { .. } | DragOutcome::FinishSelection => {}
        }
    }

    fn handle_mouse_up(&mut self, row: usize, col: usize) {
        match self.pointer.mouse_up(row, col) {
            DragOutcome::Click { row, col } => {
                // Plain click: drop any old selection and edit this cell
                self.selection.clear();
                let _ = self.focus_cell(row, col);
            }
            DragOutcome::FinishSelection => {
                // Rectangle stays visible; no cell gains focus
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, cell: Option<(usize, usize)>) {
        // The synthetic click right after a finished drag must not clear the
        // selection the drag just made
        if self.pointer.take_click_suppression() {
            return;
        }
        if cell.is_none() {
            self.selection.clear();
            self.blur();
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        match key {
            Key::Escape => {
                self.selection.clear();
            }
            Key::Char('z') if modifiers.ctrl => {
                self.undo();
            }
            Key::Delete | Key::Backspace if self.selection.is_active() => {
                self.delete_selection();
            }
            Key::ArrowUp => self.move_focus(-1, 0),
            Key::ArrowDown | Key::Enter => self.move_focus(1, 0),
            Key::ArrowLeft => self.move_focus(0, -1),
            Key::ArrowRight | Key::Tab => self.move_focus(0, 1),
            _ => {}
        }
    }

    /// Hit-test a pointer position against the grid's column widths and the
    /// uniform row height.
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if y < 0.0 {
            return None;
        }
        let row = (y / self.options.row_height) as usize;
        if row >= self.grid.rows() {
            return None;
        }
        self.grid.column_at_x(x).map(|col| (row, col))
    }

    // =========================================================================
    // Focus and cell editing
    // =========================================================================

    /// Focus a cell for text editing. Stages the pre-edit snapshot; it only
    /// reaches the history if the value changes before blur.
    pub fn focus_cell(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let origin = self.grid.cell(row, col)?.to_string();
        if self.focused == Some((row, col)) {
            return Ok(());
        }
        self.blur();
        let mut staged = self.snapshot("Edit cell");
        // Undoing an edit re-focuses the cell that was edited
        staged.focused_cell = Some((row, col));
        self.history.begin_cell_edit(staged);
        self.focused = Some((row, col));
        self.edit_origin = Some(origin);
        Ok(())
    }

    /// Blur the focused cell, committing the staged edit snapshot if the
    /// value changed since focus.
    pub fn blur(&mut self) {
        if let Some((row, col)) = self.focused.take() {
            let origin = self.edit_origin.take().unwrap_or_default();
            let changed = self
                .grid
                .cell(row, col)
                .map(|value| value != origin)
                .unwrap_or(false);
            self.history.end_cell_edit(changed);
        }
    }

    /// Replace the focused cell's text (the host's editor calls this as the
    /// user types). Returns true if the auto-expand policy appended a row.
    pub fn edit_focused(&mut self, value: &str) -> Result<bool, GridError> {
        let (row, col) = self.focused.ok_or(GridError::NoFocusedCell)?;
        self.grid.set_cell(row, col, value)
    }

    fn move_focus(&mut self, d_row: isize, d_col: isize) {
        // Navigation clears any multi-cell selection
        self.selection.clear();
        let (row, col) = self.focused.unwrap_or((0, 0));
        let max_row = self.grid.rows() as isize - 1;
        let max_col = self.grid.cols() as isize - 1;
        let new_row = (row as isize + d_row).clamp(0, max_row) as usize;
        let new_col = (col as isize + d_col).clamp(0, max_col) as usize;
        let _ = self.focus_cell(new_row, new_col);
    }

    /// Attach an image to the focused cell, capped at the per-cell limit.
    pub fn insert_image(&mut self, payload: &str) -> Result<(), GridError> {
        let (row, col) = self.focused.ok_or(GridError::NoFocusedCell)?;
        let raw = self.grid.cell(row, col)?.to_string();
        if content::image_count(&raw) >= self.options.max_images_per_cell {
            return Err(GridError::ImageLimit {
                max: self.options.max_images_per_cell,
            });
        }
        let snapshot = self.snapshot("Insert image");
        self.history.save(snapshot);
        let updated = content::insert_image(&raw, payload);
        self.grid.set_cell(row, col, &updated)?;
        Ok(())
    }

    // =========================================================================
    // Structural operations (all history-recorded before mutating)
    // =========================================================================

    pub fn add_row(&mut self) {
        let snapshot = self.snapshot("Add row");
        self.history.save(snapshot);
        self.grid.add_row();
        self.status_message = Some("Added row".to_string());
    }

    pub fn add_column(&mut self) {
        let snapshot = self.snapshot("Add column");
        self.history.save(snapshot);
        self.grid.add_column();
        self.status_message = Some("Added column".to_string());
    }

    pub fn insert_row_above(&mut self, index: usize) -> Result<(), GridError> {
        let snapshot = self.snapshot("Insert row above");
        self.grid.insert_row_above(index)?;
        self.history.save(snapshot);
        self.status_message = Some("Inserted row".to_string());
        Ok(())
    }

    pub fn insert_row_below(&mut self, index: usize) -> Result<(), GridError> {
        let snapshot = self.snapshot("Insert row below");
        self.grid.insert_row_below(index)?;
        self.history.save(snapshot);
        self.status_message = Some("Inserted row".to_string());
        Ok(())
    }

    pub fn insert_column_before(&mut self, index: usize) -> Result<(), GridError> {
        let snapshot = self.snapshot("Insert column before");
        self.grid.insert_column_before(index)?;
        self.history.save(snapshot);
        self.status_message = Some("Inserted column".to_string());
        Ok(())
    }

    pub fn insert_column_after(&mut self, index: usize) -> Result<(), GridError> {
        let snapshot = self.snapshot("Insert column after");
        self.grid.insert_column_after(index)?;
        self.history.save(snapshot);
        self.status_message = Some("Inserted column".to_string());
        Ok(())
    }

    /// Delete a column. The last remaining column is protected; the error is
    /// surfaced to the caller and nothing mutates.
    pub fn delete_column(&mut self, index: usize) -> Result<(), GridError> {
        let snapshot = self.snapshot("Delete column");
        self.grid.delete_column(index)?;
        self.history.save(snapshot);

        // Pull focus left if it pointed into or past the deleted column
        if let Some((row, col)) = self.focused {
            if col >= self.grid.cols() {
                self.focused = Some((row, self.grid.cols() - 1));
            }
        }
        self.selection.clear();
        self.status_message = Some("Deleted column".to_string());
        Ok(())
    }

    pub fn resize_column(&mut self, index: usize, width: u32) -> Result<(), GridError> {
        let snapshot = self.snapshot("Resize column");
        self.grid.set_column_width(index, width)?;
        self.history.save(snapshot);
        Ok(())
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    /// The rectangle clipboard operations act on: the drag selection if one
    /// is active, else the focused cell.
    fn clipboard_range(&self) -> Option<Range> {
        if let Some(range) = self.selection.range() {
            return Some(range.normalized());
        }
        self.focused.map(|(row, col)| Range::single(row, col))
    }

    /// Serialize the selection to TSV. No mutation.
    pub fn copy(&mut self) -> Option<String> {
        let range = self.clipboard_range()?;
        let tsv = serialize_range(&self.grid, range);
        self.status_message = Some("Copied to clipboard".to_string());
        Some(tsv)
    }

    /// Copy, then clear the selected cells, as a single undoable action.
    pub fn cut(&mut self) -> Option<String> {
        let range = self.clipboard_range()?;
        let tsv = serialize_range(&self.grid, range);
        let snapshot = self.snapshot("Cut");
        self.history.save(snapshot);
        clipboard::clear_range(&mut self.grid, range);
        self.status_message = Some("Cut to clipboard".to_string());
        Some(tsv)
    }

    /// Clear the selected cells' text, history-recorded.
    pub fn delete_selection(&mut self) {
        let Some(range) = self.selection.range().map(|r| r.normalized()) else {
            return;
        };
        let snapshot = self.snapshot("Delete selection");
        self.history.save(snapshot);
        clipboard::clear_range(&mut self.grid, range);
        self.status_message = Some("Cleared selection".to_string());
    }

    /// Paste clipboard text at the focused cell (or the selection's top-left
    /// corner), growing the grid as needed. Empty clipboard is a silent
    /// no-op. Focus lands on the bottom-right cell of the pasted block.
    pub fn paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let block = parse_tsv(text);

        let (start_row, start_col) = self
            .focused
            .or_else(|| {
                self.selection
                    .range()
                    .map(|r| (r.normalized().start_row, r.normalized().start_col))
            })
            .unwrap_or((0, 0));

        // Commit any in-progress edit before the paste rewrites the cell,
        // but keep the pre-paste focus in the snapshot so undo returns there
        let focus_before = self.focused;
        self.blur();

        let mut snapshot = self.snapshot("Paste");
        snapshot.focused_cell = focus_before;
        if let Some(outcome) = clipboard::paste_block(&mut self.grid, start_row, start_col, &block)
        {
            self.history.save(snapshot);
            self.selection.clear();
            let _ = self.focus_cell(outcome.focus.0, outcome.focus.1);
            self.status_message = Some(format!(
                "Pasted {}x{} cells",
                outcome.rows_written, outcome.cols_written
            ));
        }
    }

    // =========================================================================
    // Undo
    // =========================================================================

    /// Revert the most recent recorded action. Returns false when there is
    /// nothing to undo. Keyboard focus returns to the cell recorded in the
    /// restored snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        log::debug!("undo: {}", entry.action);

        self.history.set_undoing(true);
        self.grid = entry.grid;
        self.selection.restore(entry.selection);
        self.focused = None;
        self.edit_origin = None;
        self.history.set_undoing(false);

        // Refocus only after the guard clears, so the focus-enter snapshot
        // for the next edit is staged normally
        if let Some((row, col)) = entry.focused_cell {
            let _ = self.focus_cell(row, col);
        }

        self.status_message = Some(format!("Undid: {}", entry.action));
        true
    }

    fn snapshot(&self, action: &str) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            selection: self.selection.range(),
            focused_cell: self.focused,
            action: action.to_string(),
        }
    }
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_focuses_without_selection() {
        let mut session = GridSession::default();
        session.dispatch(InputEvent::MouseDown { row: 2, col: 1, x: 160.0, y: 70.0 });
        // A pixel of jitter, below threshold
        session.dispatch(InputEvent::MouseMove { x: 161.0, y: 70.0 });
        session.dispatch(InputEvent::MouseUp { row: 2, col: 1 });

        assert_eq!(session.focused_cell(), Some((2, 1)));
        assert!(!session.selection().is_active());
    }

    #[test]
    fn test_drag_selects_without_focusing() {
        let mut session = GridSession::default();
        session.dispatch(InputEvent::MouseDown { row: 0, col: 0, x: 10.0, y: 10.0 });
        session.dispatch(InputEvent::MouseMove { x: 200.0, y: 80.0 });
        session.dispatch(InputEvent::MouseUp { row: 2, col: 1 });

        assert!(session.focused_cell().is_none());
        assert!(session.selection().is_cell_selected(0, 0));
        assert!(session.selection().is_cell_selected(2, 1));

        // The synthetic click after mouseup must not clear the selection...
        session.dispatch(InputEvent::Click { cell: Some((2, 1)) });
        assert!(session.selection().is_active());

        // ...but the next real outside click does
        session.dispatch(InputEvent::Click { cell: None });
        assert!(!session.selection().is_active());
    }

    #[test]
    fn test_drag_blurs_editing_cell() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.edit_focused("typed").unwrap();

        session.dispatch(InputEvent::MouseDown { row: 0, col: 0, x: 5.0, y: 5.0 });
        session.dispatch(InputEvent::MouseMove { x: 300.0, y: 100.0 });

        assert!(session.focused_cell().is_none());
        // The interrupted edit changed the value, so it was committed
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_escape_clears_selection() {
        let mut session = GridSession::default();
        session.dispatch(InputEvent::MouseDown { row: 0, col: 0, x: 0.0, y: 0.0 });
        session.dispatch(InputEvent::MouseMove { x: 100.0, y: 100.0 });
        session.dispatch(InputEvent::MouseUp { row: 3, col: 0 });
        assert!(session.selection().is_active());

        session.dispatch(InputEvent::KeyDown { key: Key::Escape, modifiers: Modifiers::NONE });
        assert!(!session.selection().is_active());
    }

    #[test]
    fn test_focus_blur_without_change_records_nothing() {
        let mut session = GridSession::default();
        session.focus_cell(1, 1).unwrap();
        session.blur();
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_edit_then_blur_is_one_undoable_action() {
        let mut session = GridSession::default();
        session.focus_cell(1, 1).unwrap();
        session.edit_focused("draft").unwrap();
        session.edit_focused("final").unwrap();
        session.blur();

        assert_eq!(session.history_len(), 1);
        assert!(session.undo());
        assert_eq!(session.grid().cell(1, 1).unwrap(), "");
        // Undo restores focus to the recorded cell
        assert_eq!(session.focused_cell(), Some((1, 1)));
    }

    #[test]
    fn test_undo_restores_grid_widths_and_selection() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.edit_focused("before").unwrap();
        session.blur();

        let grid_before = session.grid().clone();
        session.resize_column(1, 420).unwrap();
        assert_eq!(session.grid().column_widths()[1], 420);

        assert!(session.undo());
        assert_eq!(session.grid(), &grid_before);
    }

    #[test]
    fn test_undo_is_not_rerecorded() {
        let mut session = GridSession::default();
        session.add_row();
        assert_eq!(session.history_len(), 1);
        session.undo();
        assert_eq!(session.history_len(), 0);
        // A second undo has nothing to pop
        assert!(!session.undo());
    }

    #[test]
    fn test_edit_after_undo_is_itself_undoable() {
        let mut session = GridSession::default();
        session.focus_cell(1, 1).unwrap();
        session.edit_focused("first").unwrap();
        session.blur();
        assert!(session.undo());
        assert_eq!(session.focused_cell(), Some((1, 1)));

        // The refocused cell's next edit must be recorded like any other
        session.edit_focused("second").unwrap();
        session.blur();
        assert_eq!(session.history_len(), 1);
        assert!(session.undo());
        assert_eq!(session.grid().cell(1, 1).unwrap(), "");
    }

    #[test]
    fn test_undo_paste_returns_focus_to_pre_paste_cell() {
        let mut session = GridSession::default();
        session.focus_cell(2, 0).unwrap();
        session.dispatch(InputEvent::Paste { text: "x\ty".to_string() });
        assert_eq!(session.focused_cell(), Some((2, 1)));

        assert!(session.undo());
        assert_eq!(session.grid().cell(2, 0).unwrap(), "");
        assert_eq!(session.focused_cell(), Some((2, 0)));
    }

    #[test]
    fn test_ctrl_z_dispatch() {
        let mut session = GridSession::default();
        session.add_column();
        assert_eq!(session.grid().cols(), 3);
        session.dispatch(InputEvent::KeyDown {
            key: Key::Char('z'),
            modifiers: Modifiers::CTRL,
        });
        assert_eq!(session.grid().cols(), 2);
    }

    #[test]
    fn test_cut_copies_and_clears_as_one_action() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.edit_focused("a").unwrap();
        session.blur();
        session.focus_cell(0, 1).unwrap();
        session.edit_focused("b").unwrap();
        session.blur();
        let before_cut = session.history_len();

        // Drag-select the two cells, then cut
        session.dispatch(InputEvent::MouseDown { row: 0, col: 0, x: 5.0, y: 5.0 });
        session.dispatch(InputEvent::MouseMove { x: 200.0, y: 5.0 });
        session.dispatch(InputEvent::MouseUp { row: 0, col: 1 });

        let tsv = session.dispatch(InputEvent::Cut).unwrap();
        assert_eq!(tsv, "a\tb");
        assert_eq!(session.grid().cell(0, 0).unwrap(), "");
        assert_eq!(session.grid().cell(0, 1).unwrap(), "");
        assert_eq!(session.history_len(), before_cut + 1);

        session.undo();
        assert_eq!(session.grid().cell(0, 0).unwrap(), "a");
        assert_eq!(session.grid().cell(0, 1).unwrap(), "b");
    }

    #[test]
    fn test_copy_does_not_mutate() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.edit_focused("value").unwrap();
        session.blur();
        let history_before = session.history_len();

        session.focus_cell(0, 0).unwrap();
        let tsv = session.dispatch(InputEvent::Copy).unwrap();
        assert_eq!(tsv, "value");
        assert_eq!(session.grid().cell(0, 0).unwrap(), "value");
        assert_eq!(session.history_len(), history_before);
    }

    #[test]
    fn test_paste_focuses_bottom_right() {
        let mut session = GridSession::default();
        session.focus_cell(1, 0).unwrap();
        session.dispatch(InputEvent::Paste { text: "1\t2\n3\t4".to_string() });

        assert_eq!(session.grid().cell(1, 0).unwrap(), "1");
        assert_eq!(session.grid().cell(2, 1).unwrap(), "4");
        assert_eq!(session.focused_cell(), Some((2, 1)));
    }

    #[test]
    fn test_paste_empty_clipboard_is_silent_noop() {
        let mut session = GridSession::default();
        let before = session.grid().clone();
        session.dispatch(InputEvent::Paste { text: String::new() });
        assert_eq!(session.grid(), &before);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_delete_key_clears_selection_cells() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.edit_focused("gone").unwrap();
        session.blur();

        session.dispatch(InputEvent::MouseDown { row: 0, col: 0, x: 5.0, y: 5.0 });
        session.dispatch(InputEvent::MouseMove { x: 200.0, y: 40.0 });
        session.dispatch(InputEvent::MouseUp { row: 1, col: 1 });
        session.dispatch(InputEvent::KeyDown { key: Key::Delete, modifiers: Modifiers::NONE });

        assert_eq!(session.grid().cell(0, 0).unwrap(), "");
    }

    #[test]
    fn test_arrow_navigation_moves_focus_and_clears_selection() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.dispatch(InputEvent::KeyDown { key: Key::ArrowDown, modifiers: Modifiers::NONE });
        assert_eq!(session.focused_cell(), Some((1, 0)));
        session.dispatch(InputEvent::KeyDown { key: Key::ArrowRight, modifiers: Modifiers::NONE });
        assert_eq!(session.focused_cell(), Some((1, 1)));
        // Clamped at the edge
        session.dispatch(InputEvent::KeyDown { key: Key::ArrowRight, modifiers: Modifiers::NONE });
        assert_eq!(session.focused_cell(), Some((1, 1)));
        session.dispatch(InputEvent::KeyDown { key: Key::ArrowUp, modifiers: Modifiers::NONE });
        assert_eq!(session.focused_cell(), Some((0, 1)));
    }

    #[test]
    fn test_delete_last_column_surfaces_error_unchanged() {
        let options = SessionOptions {
            initial_cols: 1,
            ..SessionOptions::default()
        };
        let mut session = GridSession::new(options);
        assert_eq!(session.delete_column(0).unwrap_err(), GridError::LastColumn);
        assert_eq!(session.grid().cols(), 1);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_image_cap_enforced_at_two() {
        let mut session = GridSession::default();
        session.focus_cell(0, 0).unwrap();
        session.insert_image("u1").unwrap();
        session.insert_image("u2").unwrap();
        assert_eq!(
            session.insert_image("u3").unwrap_err(),
            GridError::ImageLimit { max: 2 }
        );

        let content = content::parse_cell_content(session.grid().cell(0, 0).unwrap());
        assert_eq!(content.images, vec!["u1", "u2"]);
    }

    #[test]
    fn test_hit_test_uses_row_height_and_widths() {
        let session = GridSession::default();
        // Default widths 150px, rows 32px
        assert_eq!(session.cell_at_point(0.0, 0.0), Some((0, 0)));
        assert_eq!(session.cell_at_point(149.0, 31.0), Some((0, 0)));
        assert_eq!(session.cell_at_point(150.0, 32.0), Some((1, 1)));
        assert_eq!(session.cell_at_point(299.0, 319.0), Some((9, 1)));
        // Past the last row or column
        assert_eq!(session.cell_at_point(0.0, 320.0), None);
        assert_eq!(session.cell_at_point(300.0, 0.0), None);
    }
}
