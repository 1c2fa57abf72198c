//! Multi-key transaction ordering
//!
//! The [`TransactionComparator`] keeps a prioritized list of sort rules. A
//! column's position in the list is its priority: earlier means higher.
//! Re-adding a column moves it to the end of the list and overwrites its
//! direction.

use crate::types::{Entry, TableError, Transaction};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sort direction of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    NoSort,
}

impl SortDirection {
    /// Next direction when a column header is clicked
    ///
    /// Cycles `NoSort -> Descending -> Ascending -> NoSort`.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::NoSort,
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::NoSort => SortDirection::Descending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
            SortDirection::NoSort => Ordering::Equal,
        }
    }
}

/// Total order over transactions built from prioritized sort rules
#[derive(Debug, Clone, Default)]
pub struct TransactionComparator {
    sorted_on: Vec<String>,
    directions: HashMap<String, SortDirection>,
}

impl TransactionComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns that currently affect the order, highest priority first
    ///
    /// Columns set to [`SortDirection::NoSort`] are left out.
    pub fn sorted_on(&self) -> impl Iterator<Item = &str> + '_ {
        self.sorted_on
            .iter()
            .map(String::as_str)
            .filter(|column| self.direction(column) != SortDirection::NoSort)
    }

    /// Direction of `column`; `NoSort` if it was never added
    pub fn direction(&self, column: &str) -> SortDirection {
        self.directions.get(column).copied().unwrap_or_default()
    }

    /// Make `column` the lowest-priority rule with `direction`
    pub fn add_sort(&mut self, column: &str, direction: SortDirection) {
        self.sorted_on.retain(|existing| existing != column);
        self.sorted_on.push(column.to_string());
        self.directions.insert(column.to_string(), direction);
    }

    pub fn clear(&mut self) {
        self.sorted_on.clear();
        self.directions.clear();
    }

    /// Compare two transactions, either of which may be absent
    ///
    /// Absent transactions order first. Within a rule, a missing entry counts
    /// as null and orders before any present entry.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TypeMismatch`] if both transactions hold entries of
    /// different kinds under a sorted column.
    pub fn compare(
        &self,
        a: Option<&Transaction>,
        b: Option<&Transaction>,
    ) -> Result<Ordering, TableError> {
        match (a, b) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(a), Some(b)) => self.compare_present(a, b),
        }
    }

    fn compare_present(&self, a: &Transaction, b: &Transaction) -> Result<Ordering, TableError> {
        for column in &self.sorted_on {
            let direction = self.direction(column);
            if direction == SortDirection::NoSort {
                continue;
            }

            let ordering = direction.apply(compare_entries(a.entry(column), b.entry(column))?);
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(Ordering::Equal)
    }

    /// Stable-sort `transactions`; ties keep their original relative order
    ///
    /// The first comparison error is returned after the sort completes.
    pub fn sort(&self, transactions: &mut [Transaction]) -> Result<(), TableError> {
        let mut failure = None;
        transactions.sort_by(|a, b| {
            self.compare_present(a, b).unwrap_or_else(|e| {
                failure.get_or_insert(e);
                Ordering::Equal
            })
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn compare_entries(a: Option<&Entry>, b: Option<&Entry>) -> Result<Ordering, TableError> {
    match (a, b) {
        (None, None) => Ok(Ordering::Equal),
        (None, Some(_)) => Ok(Ordering::Less),
        (Some(_), None) => Ok(Ordering::Greater),
        (Some(a), Some(b)) => a.compare(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntryFactory;
    use crate::types::{EntryType, ValueKind};
    use rstest::rstest;

    fn tx(id: u64, amount: &str, note: &str) -> Transaction {
        let factory = EntryFactory::default();
        let mut transaction = Transaction::new(id);
        transaction
            .try_add_entry(
                "Amount",
                factory
                    .create(EntryType::new(ValueKind::Number, true), amount)
                    .unwrap(),
            )
            .unwrap();
        transaction
            .try_add_entry(
                "Note",
                factory
                    .create(EntryType::new(ValueKind::Text, true), note)
                    .unwrap(),
            )
            .unwrap();
        transaction
    }

    fn ids(transactions: &[Transaction]) -> Vec<u64> {
        transactions.iter().map(Transaction::id).collect()
    }

    #[rstest]
    #[case::ascending(SortDirection::Ascending, SortDirection::NoSort)]
    #[case::descending(SortDirection::Descending, SortDirection::Ascending)]
    #[case::no_sort(SortDirection::NoSort, SortDirection::Descending)]
    fn test_toggle_cycle(#[case] from: SortDirection, #[case] to: SortDirection) {
        assert_eq!(from.toggled(), to);
    }

    #[test]
    fn test_readding_demotes_column() {
        let mut comparator = TransactionComparator::new();
        comparator.add_sort("A", SortDirection::Ascending);
        comparator.add_sort("B", SortDirection::Descending);
        comparator.add_sort("A", SortDirection::Descending);

        assert_eq!(comparator.sorted_on().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(comparator.direction("A"), SortDirection::Descending);
    }

    #[test]
    fn test_no_sort_hidden_but_retrievable() {
        let mut comparator = TransactionComparator::new();
        comparator.add_sort("A", SortDirection::Ascending);
        comparator.add_sort("B", SortDirection::NoSort);

        assert_eq!(comparator.sorted_on().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(comparator.direction("B"), SortDirection::NoSort);
        assert_eq!(comparator.direction("never added"), SortDirection::NoSort);
    }

    #[test]
    fn test_clear() {
        let mut comparator = TransactionComparator::new();
        comparator.add_sort("A", SortDirection::Ascending);
        comparator.clear();
        assert_eq!(comparator.sorted_on().count(), 0);
        assert_eq!(comparator.direction("A"), SortDirection::NoSort);
    }

    #[test]
    fn test_absent_transactions_order_first() {
        let comparator = TransactionComparator::new();
        let a = tx(1, "1", "x");
        assert_eq!(comparator.compare(None, Some(&a)).unwrap(), Ordering::Less);
        assert_eq!(comparator.compare(Some(&a), None).unwrap(), Ordering::Greater);
        assert_eq!(comparator.compare(None, None).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut rows = vec![tx(1, "20", "b"), tx(2, "5", "a"), tx(3, "100", "c")];
        let mut comparator = TransactionComparator::new();

        comparator.add_sort("Amount", SortDirection::Ascending);
        comparator.sort(&mut rows).unwrap();
        assert_eq!(ids(&rows), vec![2, 1, 3]);

        comparator.add_sort("Amount", SortDirection::Descending);
        comparator.sort(&mut rows).unwrap();
        assert_eq!(ids(&rows), vec![3, 1, 2]);
    }

    #[test]
    fn test_secondary_key_breaks_ties() {
        let mut rows = vec![tx(1, "5", "b"), tx(2, "5", "a"), tx(3, "1", "z")];
        let mut comparator = TransactionComparator::new();
        comparator.add_sort("Amount", SortDirection::Ascending);
        comparator.add_sort("Note", SortDirection::Ascending);

        comparator.sort(&mut rows).unwrap();
        assert_eq!(ids(&rows), vec![3, 2, 1]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut rows = vec![tx(1, "5", "b"), tx(2, "1", "a"), tx(3, "5", "a"), tx(4, "5", "c")];
        let mut comparator = TransactionComparator::new();
        comparator.add_sort("Amount", SortDirection::Descending);

        comparator.sort(&mut rows).unwrap();
        assert_eq!(ids(&rows), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_nulls_and_missing_entries_sort_first() {
        let mut missing = Transaction::new(4);
        missing
            .try_add_entry(
                "Note",
                EntryFactory::default()
                    .create(EntryType::new(ValueKind::Text, true), "m")
                    .unwrap(),
            )
            .unwrap();
        let mut rows = vec![tx(1, "3", "a"), tx(2, "", "b"), missing, tx(3, "-1", "c")];
        let mut comparator = TransactionComparator::new();
        comparator.add_sort("Amount", SortDirection::Ascending);

        comparator.sort(&mut rows).unwrap();
        assert_eq!(ids(&rows), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_kind_mismatch_is_reported() {
        let factory = EntryFactory::default();
        let mut odd = Transaction::new(9);
        odd.try_add_entry(
            "Amount",
            factory
                .create(EntryType::new(ValueKind::Text, false), "ten")
                .unwrap(),
        )
        .unwrap();
        let mut rows = vec![tx(1, "3", "a"), odd];

        let mut comparator = TransactionComparator::new();
        comparator.add_sort("Amount", SortDirection::Ascending);

        assert!(matches!(
            comparator.sort(&mut rows),
            Err(TableError::TypeMismatch { .. })
        ));
        assert_eq!(rows.len(), 2);
    }
}
