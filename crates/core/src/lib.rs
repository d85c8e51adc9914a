pub mod pointer;
pub mod range;
pub mod selection;

pub use pointer::{DragOutcome, DragState, PointerTracker};
pub use range::Range;
pub use selection::{Selection, SelectionRange};
