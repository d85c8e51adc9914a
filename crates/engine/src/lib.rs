pub mod clipboard;
pub mod content;
pub mod error;
pub mod events;
pub mod grid;
pub mod history;
pub mod session;
