//! Append-only chat history.
//!
//! Stored history is never trimmed; only the replay window handed to a newly
//! joined client is bounded. The log has its own lock, independent of the
//! registry, so archiving a message and fanning it out are two separate
//! critical sections.

use std::sync::Mutex;

/// One archived chat message. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub username: String,
    pub text: String,
}

#[derive(Default)]
pub struct HistoryLog {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock().expect("history lock poisoned");
        entries.push(entry);
    }

    /// Up to the last `n` entries in arrival order.
    pub fn tail(&self, n: usize) -> Vec<HistoryEntry> {
        let entries = self.entries.lock().expect("history lock poisoned");
        let start = entries.len().saturating_sub(n);
        entries[start..].to_vec()
    }

    /// Full copy of the log. Admin inspection only.
    pub fn all(&self) -> Vec<HistoryEntry> {
        let entries = self.entries.lock().expect("history lock poisoned");
        entries.clone()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("history lock poisoned");
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
