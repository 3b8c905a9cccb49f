//! Caller-owned activity log.

use core::fmt;

use chrono::{DateTime, Local};

use stockroom_core::Quantity;

const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One human-readable action record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at.format(ENTRY_TIMESTAMP_FORMAT), self.message)
    }
}

/// Append-only sequence of [`ActivityEntry`] values.
///
/// Distinct from the diagnostic log file: the caller owns it and decides
/// whether an operation records into it at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful add, stamped with the current local time.
    pub fn record_added(&mut self, item: &str, qty: Quantity) {
        self.push(Local::now(), format!("Added {qty} of {item}"));
    }

    pub fn push(&mut self, at: DateTime<Local>, message: impl Into<String>) {
        self.entries.push(ActivityEntry {
            at,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a ActivityEntry;
    type IntoIter = core::slice::Iter<'a, ActivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
