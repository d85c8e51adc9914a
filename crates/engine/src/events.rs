//! Abstract input events.
//!
//! The engine is driven by this stream instead of any windowing toolkit's
//! event types; a host maps its native mouse/keyboard/clipboard events onto
//! these and feeds them to [`crate::session::GridSession::dispatch`].

/// Keys the engine reacts to. Anything else is the host's business
/// (text entry goes through the session's edit API, not key events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, shift: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, shift: false };
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed on a cell; (x, y) is the pointer position in grid
    /// coordinates.
    MouseDown { row: usize, col: usize, x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp { row: usize, col: usize },
    /// The host's click event, fired after mouseup. `cell` is None for a
    /// click outside any cell.
    Click { cell: Option<(usize, usize)> },
    KeyDown { key: Key, modifiers: Modifiers },
    /// Clipboard text arriving from the host.
    Paste { text: String },
    Copy,
    Cut,
}
