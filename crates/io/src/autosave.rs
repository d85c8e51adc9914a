//! Debounced autosave scheduling.
//!
//! The grid mutates optimistically; persistence trails behind. Every change
//! re-arms a debounce timer, and only when the timer expires with no further
//! changes does a save actually run. The scheduler is poll-driven — the host
//! owns the clock and the actual write — so it needs no threads and tests
//! deterministically.
//!
//! A failed save never touches the in-memory grid or the undo stack; it is
//! logged and reflected in [`SaveStatus`] so the user sees "unsaved".

use std::time::{Duration, Instant};

/// Default debounce window between the last change and the save.
pub const DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Everything on disk matches memory.
    Saved,
    /// Changes pending, save not yet due.
    Dirty,
    /// The host is writing right now.
    Saving,
    /// The last save attempt failed; memory is ahead of disk.
    Failed,
}

#[derive(Debug)]
pub struct Autosaver {
    debounce: Duration,
    deadline: Option<Instant>,
    status: SaveStatus,
}

impl Autosaver {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
            status: SaveStatus::Saved,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn is_dirty(&self) -> bool {
        !matches!(self.status, SaveStatus::Saved)
    }

    /// A change happened: cancel any pending deadline and re-arm the timer.
    pub fn note_change(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
        if self.status != SaveStatus::Saving {
            self.status = SaveStatus::Dirty;
        }
    }

    /// Poll the timer. Returns true exactly once per armed deadline, when it
    /// has expired — the host should then serialize and write.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.status = SaveStatus::Saving;
                true
            }
            _ => false,
        }
    }

    /// The host finished writing successfully. If more changes arrived while
    /// the write ran, the timer is armed again and we stay dirty.
    pub fn mark_saved(&mut self) {
        self.status = if self.deadline.is_some() {
            SaveStatus::Dirty
        } else {
            SaveStatus::Saved
        };
    }

    /// The write failed. The grid is untouched; surface the failure through
    /// the status indicator rather than the undo stack.
    pub fn mark_failed(&mut self, error: &str) {
        log::warn!("autosave failed: {error}");
        self.status = SaveStatus::Failed;
    }
}

impl Default for Autosaver {
    fn default() -> Self {
        Self::new(DEBOUNCE)
    }
}
