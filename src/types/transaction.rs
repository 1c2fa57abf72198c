//! Transaction records
//!
//! A [`Transaction`] maps entry names to [`Entry`] values. Storage order is
//! unspecified; tables use their schema to decide column order.

use crate::types::entry::Entry;
use crate::types::TableError;
use std::collections::HashMap;

/// Transaction identifier
///
/// Assigned by an [`crate::core::IdGenerator`] when the transaction is created.
pub type TransactionId = u64;

/// A single record of named entries
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    entries: HashMap<String, Entry>,
}

impl Transaction {
    /// Create an empty transaction with the given id
    pub fn new(id: TransactionId) -> Self {
        Transaction {
            id,
            entries: HashMap::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Add an entry under `name`
    ///
    /// A name can be used only once; a second add fails with
    /// [`TableError::DuplicateEntry`] and leaves the transaction unchanged.
    pub fn try_add_entry(&mut self, name: &str, entry: Entry) -> Result<(), TableError> {
        if self.entries.contains_key(name) {
            return Err(TableError::duplicate_entry(name));
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains_entry(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names of all stored entries, in no particular order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries for `names`, in the order given; missing names are skipped
    pub fn entries_for<'a, I>(&'a self, names: I) -> Vec<&'a Entry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.entries.get(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
