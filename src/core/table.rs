//! Transaction table
//!
//! This module provides the [`TransactionTable`], an ordered collection of
//! transactions that all conform to one [`TransactionType`].
//!
//! # Schema Conformance
//!
//! For every `(name, type)` in the schema, a transaction must hold an entry
//! under `name` whose [`crate::types::EntryType`] equals `type` exactly (kind
//! and nullable flag). Transactions that fail this are rejected as a whole;
//! the table never adopts part of a transaction.

use crate::core::comparator::TransactionComparator;
use crate::core::entry_factory::EntryFactory;
use crate::core::filter::FilterSet;
use crate::core::traits::IdGenerator;
use crate::types::{TableError, Transaction, TransactionId, TransactionType};
use tracing::debug;

/// Ordered, schema-enforced collection of transactions
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTable {
    schema: TransactionType,
    transactions: Vec<Transaction>,
}

impl TransactionTable {
    /// Create an empty table for `schema`
    pub fn new(schema: TransactionType) -> Self {
        TransactionTable {
            schema,
            transactions: Vec::new(),
        }
    }

    /// Create a table from existing transactions
    ///
    /// # Errors
    ///
    /// Fails with the first [`TableError::SchemaViolation`] if any transaction
    /// doesn't conform; no table is produced in that case.
    pub fn from_transactions<I>(schema: TransactionType, transactions: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut table = Self::new(schema);
        for transaction in transactions {
            table.try_add(transaction)?;
        }
        Ok(table)
    }

    pub fn schema(&self) -> &TransactionType {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Check that `transaction` provides every schema column with the declared type
    pub fn check_conformance(&self, transaction: &Transaction) -> Result<(), TableError> {
        for (name, expected) in self.schema.columns() {
            let entry = transaction
                .entry(name)
                .ok_or_else(|| TableError::schema_violation(name, "missing entry"))?;

            if entry.entry_type() != expected {
                return Err(TableError::schema_violation(
                    name,
                    format!("expected {}, found {}", expected, entry.entry_type()),
                ));
            }
        }
        Ok(())
    }

    /// Append `transaction` if it conforms to the schema
    ///
    /// On failure the table is unchanged.
    pub fn try_add(&mut self, transaction: Transaction) -> Result<(), TableError> {
        if let Err(e) = self.check_conformance(&transaction) {
            debug!(id = transaction.id(), error = %e, "transaction rejected");
            return Err(e);
        }
        self.transactions.push(transaction);
        Ok(())
    }

    /// Build a transaction from raw strings in schema order and append it
    ///
    /// # Errors
    ///
    /// - [`TableError::FieldCountMismatch`] if `values` doesn't match the schema length
    /// - [`TableError::MalformedRecord`] naming the 1-based position of the first invalid value
    pub fn add_record<S: AsRef<str>>(
        &mut self,
        values: &[S],
        factory: &EntryFactory,
        ids: &dyn IdGenerator,
    ) -> Result<TransactionId, TableError> {
        if values.len() != self.schema.len() {
            return Err(TableError::FieldCountMismatch {
                line: None,
                expected: self.schema.len(),
                found: values.len(),
            });
        }

        let mut transaction = Transaction::new(ids.next_id());
        for (position, ((name, entry_type), value)) in
            self.schema.columns().zip(values).enumerate()
        {
            let raw = value.as_ref();
            let entry = factory.create(entry_type, raw).map_err(|e| {
                let message = e.validation_message().unwrap_or_default().to_string();
                TableError::malformed_record(position + 1, raw, &message)
            })?;
            transaction.try_add_entry(name, entry)?;
        }

        let id = transaction.id();
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Keep only the transactions for which `predicate` holds
    ///
    /// Prunes membership; the remaining transactions are not modified and
    /// keep their relative order.
    pub fn filter<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&Transaction) -> bool,
    {
        self.transactions.retain(|transaction| predicate(transaction));
    }

    /// Keep only the transactions accepted by every filter in `filters`
    ///
    /// # Errors
    ///
    /// A filter whose reference kind doesn't match its column yields
    /// [`TableError::TypeMismatch`]; the table is left unchanged.
    pub fn retain_matching(&mut self, filters: &FilterSet) -> Result<(), TableError> {
        let keep = self
            .transactions
            .iter()
            .map(|transaction| filters.accepts(transaction))
            .collect::<Result<Vec<bool>, TableError>>()?;

        let mut keep = keep.into_iter();
        self.transactions
            .retain(|_| keep.next().unwrap_or(false));
        Ok(())
    }

    /// Stable-sort the table with `comparator`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TypeMismatch`] if two compared entries have
    /// different kinds; the order is then unspecified but no transaction is lost.
    pub fn sort(&mut self, comparator: &TransactionComparator) -> Result<(), TableError> {
        comparator.sort(&mut self.transactions)
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
