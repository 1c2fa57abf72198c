//! Entry construction
//!
//! The [`EntryFactory`] owns the [`EntryFormat`] (date pattern and null marker)
//! and hands a shared reference to it to every entry it creates, so all Date
//! entries from one factory parse and render with the same pattern.

use crate::types::{Entry, EntryFormat, EntryType, TableError};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct EntryFactory {
    format: Arc<EntryFormat>,
}

impl EntryFactory {
    pub fn new(format: EntryFormat) -> Self {
        EntryFactory {
            format: Arc::new(format),
        }
    }

    pub fn format(&self) -> &EntryFormat {
        &self.format
    }

    /// Create an entry of `entry_type` holding `raw`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] with a hint of the expected format
    /// if `raw` isn't valid for the type.
    pub fn create(&self, entry_type: EntryType, raw: &str) -> Result<Entry, TableError> {
        Entry::new(entry_type, Arc::clone(&self.format), raw)
    }

    /// Copy `entry` into this factory's format
    ///
    /// The canonical string of the source is re-parsed, so a copy between
    /// factories with different date patterns fails rather than silently
    /// reinterpreting the value.
    pub fn duplicate(&self, entry: &Entry) -> Result<Entry, TableError> {
        self.create(entry.entry_type(), entry.value_string())
    }
}
