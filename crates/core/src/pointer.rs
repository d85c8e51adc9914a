//! Pointer-drag tracking: the three-state machine that distinguishes a plain
//! click (focus one cell) from a drag selection (sweep a rectangle).
//!
//! The tracker is deliberately geometry-only — it knows pointer positions and
//! the cell the press landed on, nothing about the grid. The session layer
//! feeds it events and acts on the returned [`DragOutcome`].

/// Where a press-in-progress currently stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No button held.
    Idle,
    /// Button held, pointer travel still below the threshold. Behaves as a
    /// plain click if released now.
    Dragging {
        anchor: (usize, usize),
        origin: (f32, f32),
    },
    /// Travel crossed the threshold; a rectangle is being swept.
    Selecting {
        anchor: (usize, usize),
    },
}

/// What the session should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    None,
    /// Threshold just crossed: begin a selection anchored at this cell (and
    /// blur any cell being edited).
    BeginSelection { anchor: (usize, usize) },
    /// Pointer moved while selecting: grow the live corner to this cell.
    ExtendSelection { row: usize, col: usize },
    /// Released below threshold: treat as a click on this cell.
    Click { row: usize, col: usize },
    /// Released after sweeping: keep the finished rectangle on screen.
    FinishSelection,
}

#[derive(Debug, Clone)]
pub struct PointerTracker {
    state: DragState,
    threshold: f32,
    /// One-shot guard: the host fires a synthetic click right after mouseup
    /// ends a drag, and that click must not clear the fresh selection.
    suppress_next_click: bool,
}

impl PointerTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
            suppress_next_click: false,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, DragState::Selecting { .. })
    }

    /// Button pressed on a cell at pointer position (x, y).
    pub fn mouse_down(&mut self, row: usize, col: usize, x: f32, y: f32) {
        self.state = DragState::Dragging {
            anchor: (row, col),
            origin: (x, y),
        };
    }

    /// Pointer moved to (x, y); `cell_under_pointer` is the hit-tested cell,
    /// if the pointer is over one.
    pub fn mouse_move(
        &mut self,
        x: f32,
        y: f32,
        cell_under_pointer: Option<(usize, usize)>,
    ) -> DragOutcome {
        match self.state {
            DragState::Idle => DragOutcome::None,
            DragState::Dragging { anchor, origin } => {
                let (dx, dy) = (x - origin.0, y - origin.1);
                if (dx * dx + dy * dy).sqrt() < self.threshold {
                    return DragOutcome::None;
                }
                self.state = DragState::Selecting { anchor };
                DragOutcome::BeginSelection { anchor }
            }
            DragState::Selecting { .. } => match cell_under_pointer {
                Some((row, col)) => DragOutcome::ExtendSelection { row, col },
                None => DragOutcome::None,
            },
        }
    }

    /// Button released over a cell.
    pub fn mouse_up(&mut self, row: usize, col: usize) -> DragOutcome {
        let outcome = match self.state {
            DragState::Idle => DragOutcome::None,
            // Never crossed the threshold: a plain click
            DragState::Dragging { .. } => DragOutcome::Click { row, col },
            DragState::Selecting { .. } => {
                self.suppress_next_click = true;
                DragOutcome::FinishSelection
            }
        };
        self.state = DragState::Idle;
        outcome
    }

    /// Consume the one-shot click suppression. Returns true if the click
    /// immediately following a finished drag should be ignored.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_next_click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 5.0;

    #[test]
    fn test_short_press_is_a_click() {
        let mut tracker = PointerTracker::new(THRESHOLD);
        tracker.mouse_down(2, 1, 100.0, 40.0);

        // Jitter below the threshold keeps it a click
        assert_eq!(
            tracker.mouse_move(102.0, 41.0, Some((2, 1))),
            DragOutcome::None
        );
        assert_eq!(tracker.mouse_up(2, 1), DragOutcome::Click { row: 2, col: 1 });
        assert_eq!(tracker.state(), DragState::Idle);
        assert!(!tracker.take_click_suppression());
    }

    #[test]
    fn test_travel_past_threshold_begins_selection() {
        let mut tracker = PointerTracker::new(THRESHOLD);
        tracker.mouse_down(0, 0, 10.0, 10.0);

        assert_eq!(
            tracker.mouse_move(10.0, 16.0, Some((1, 0))),
            DragOutcome::BeginSelection { anchor: (0, 0) }
        );
        assert!(tracker.is_selecting());
        assert_eq!(
            tracker.mouse_move(80.0, 70.0, Some((3, 2))),
            DragOutcome::ExtendSelection { row: 3, col: 2 }
        );
    }

    #[test]
    fn test_finished_drag_suppresses_exactly_one_click() {
        let mut tracker = PointerTracker::new(THRESHOLD);
        tracker.mouse_down(0, 0, 0.0, 0.0);
        tracker.mouse_move(20.0, 20.0, Some((1, 1)));
        assert_eq!(tracker.mouse_up(1, 1), DragOutcome::FinishSelection);

        assert!(tracker.take_click_suppression());
        assert!(!tracker.take_click_suppression());
    }

    #[test]
    fn test_diagonal_distance_uses_euclidean_travel() {
        let mut tracker = PointerTracker::new(5.0);
        tracker.mouse_down(0, 0, 0.0, 0.0);
        // 3-4-5 triangle: exactly at threshold, so selection begins
        assert_eq!(
            tracker.mouse_move(3.0, 4.0, Some((0, 0))),
            DragOutcome::BeginSelection { anchor: (0, 0) }
        );
    }

    #[test]
    fn test_move_off_grid_while_selecting_is_ignored() {
        let mut tracker = PointerTracker::new(THRESHOLD);
        tracker.mouse_down(0, 0, 0.0, 0.0);
        tracker.mouse_move(30.0, 0.0, Some((0, 1)));
        assert_eq!(tracker.mouse_move(500.0, 500.0, None), DragOutcome::None);
        assert!(tracker.is_selecting());
    }
}
