// Document I/O operations

pub mod autosave;
pub mod csv;
pub mod json;
