//! CLI exit code registry.
//!
//! Single source of truth for `qgrid` exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | General error (unspecified)              |
//! | 2    | Usage error (bad args)                   |
//! | 3    | I/O error (read, write, parse document)  |
//!
//! When adding a code: pick the next free value, document what triggers
//! it, and update the table above.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure. Prefer a specific code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - malformed arguments, e.g. a bad cell reference.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - the document could not be read, parsed, or written.
pub const EXIT_IO: u8 = 3;
