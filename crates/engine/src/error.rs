use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Cell or column index outside the grid's current bounds.
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Deleting the last remaining column is refused; the grid is unchanged.
    LastColumn,
    /// A cell already holds the maximum number of inline images.
    ImageLimit { max: usize },
    /// An operation that targets the focused cell ran with nothing focused.
    NoFocusedCell,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { row, col, rows, cols } => {
                write!(f, "cell ({row}, {col}) is outside the {rows}x{cols} grid")
            }
            Self::LastColumn => write!(f, "cannot delete the only remaining column"),
            Self::ImageLimit { max } => {
                write!(f, "a cell can hold at most {max} image(s)")
            }
            Self::NoFocusedCell => write!(f, "no cell is focused"),
        }
    }
}

impl std::error::Error for GridError {}
