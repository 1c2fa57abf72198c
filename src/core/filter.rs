//! Per-column filter predicates
//!
//! An [`EntryFilter`] compares candidate entries against a reference entry.
//! A [`FilterSet`] groups filters by column: filters on the same column are
//! combined with logical AND, and a transaction is accepted iff every one of
//! its entries is accepted by its column's filters.

use crate::core::entry_factory::EntryFactory;
use crate::types::{Entry, EntryType, TableError, Transaction, ValueKind};
use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

/// Filter identifier, unique per column
pub type FilterId = u64;

/// Relation a candidate must have to the reference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterComparison {
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    LessOrEqual,
    Less,
    Regex,
}

/// A predicate over entries of one value kind
#[derive(Debug, Clone)]
pub struct EntryFilter {
    id: FilterId,
    reference: Entry,
    comparison: FilterComparison,
    applied: bool,
    pattern: Option<Regex>,
}

impl EntryFilter {
    /// Create a filter
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidPattern`] if `comparison` is
    /// [`FilterComparison::Regex`] and the reference value isn't a valid pattern.
    pub fn new(
        id: FilterId,
        reference: Entry,
        comparison: FilterComparison,
        applied: bool,
    ) -> Result<Self, TableError> {
        let pattern = compile_pattern(&reference, comparison)?;
        Ok(EntryFilter {
            id,
            reference,
            comparison,
            applied,
            pattern,
        })
    }

    /// The inert default filter for a value kind
    ///
    /// Numbers compare equal to `0`, dates equal to today, text and currency
    /// match the pattern `.*`. The filter starts out not applied.
    pub fn default_for(
        id: FilterId,
        kind: ValueKind,
        factory: &EntryFactory,
    ) -> Result<Self, TableError> {
        let (comparison, reference) = match kind {
            ValueKind::Number => (FilterComparison::Equal, "0".to_string()),
            ValueKind::Date => {
                let mut today = String::new();
                write!(today, "{}", Local::now().format(factory.format().date_format()))
                    .map_err(|_| {
                        TableError::validation(factory.format().date_format(), "unsupported date pattern")
                    })?;
                (FilterComparison::Equal, today)
            }
            ValueKind::Text | ValueKind::Currency => (FilterComparison::Regex, ".*".to_string()),
        };

        let reference = factory.create(EntryType::new(kind, true), &reference)?;
        Self::new(id, reference, comparison, false)
    }

    pub fn id(&self) -> FilterId {
        self.id
    }

    pub fn reference(&self) -> &Entry {
        &self.reference
    }

    pub fn comparison(&self) -> FilterComparison {
        self.comparison
    }

    /// Value kind this filter can be compared against
    pub fn value_kind(&self) -> ValueKind {
        self.reference.kind()
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn set_applied(&mut self, applied: bool) {
        self.applied = applied;
    }

    /// Replace the reference entry, recompiling the pattern if needed
    pub fn set_reference(&mut self, reference: Entry) -> Result<(), TableError> {
        self.pattern = compile_pattern(&reference, self.comparison)?;
        self.reference = reference;
        Ok(())
    }

    /// Replace the comparison, compiling the pattern if it becomes a regex
    pub fn set_comparison(&mut self, comparison: FilterComparison) -> Result<(), TableError> {
        self.pattern = compile_pattern(&self.reference, comparison)?;
        self.comparison = comparison;
        Ok(())
    }

    /// Decide whether `entry` satisfies the filter
    ///
    /// A filter that isn't applied accepts everything. `Equal` means the
    /// entries order equal; it is distinct from `GreaterOrEqual`.
    ///
    /// # Errors
    ///
    /// Relational comparisons against an entry of another kind yield
    /// [`TableError::TypeMismatch`].
    pub fn matches(&self, entry: &Entry) -> Result<bool, TableError> {
        if !self.applied {
            return Ok(true);
        }

        let matched = match self.comparison {
            FilterComparison::Greater => entry.compare(&self.reference)? == Ordering::Greater,
            FilterComparison::GreaterOrEqual => entry.compare(&self.reference)? != Ordering::Less,
            FilterComparison::Equal => entry.compare(&self.reference)? == Ordering::Equal,
            FilterComparison::NotEqual => entry.compare(&self.reference)? != Ordering::Equal,
            FilterComparison::LessOrEqual => entry.compare(&self.reference)? != Ordering::Greater,
            FilterComparison::Less => entry.compare(&self.reference)? == Ordering::Less,
            FilterComparison::Regex => self
                .pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(entry.value_string())),
        };
        Ok(matched)
    }
}

fn compile_pattern(
    reference: &Entry,
    comparison: FilterComparison,
) -> Result<Option<Regex>, TableError> {
    if comparison != FilterComparison::Regex {
        return Ok(None);
    }

    Regex::new(reference.value_string())
        .map(Some)
        .map_err(|e| TableError::InvalidPattern {
            pattern: reference.value_string().to_string(),
            message: e.to_string(),
        })
}

/// Filters grouped by column name
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: HashMap<String, Vec<EntryFilter>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `filter` for `column`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateFilter`] if a filter with the same id is
    /// already registered for the column; the set is unchanged.
    pub fn add(&mut self, column: &str, filter: EntryFilter) -> Result<(), TableError> {
        let filters = self.filters.entry(column.to_string()).or_default();
        if filters.iter().any(|existing| existing.id() == filter.id()) {
            return Err(TableError::duplicate_filter(column, filter.id()));
        }
        filters.push(filter);
        Ok(())
    }

    /// Remove the filter `id` from `column`; returns whether one was removed
    pub fn remove(&mut self, column: &str, id: FilterId) -> bool {
        let Some(filters) = self.filters.get_mut(column) else {
            return false;
        };
        let before = filters.len();
        filters.retain(|filter| filter.id() != id);
        filters.len() != before
    }

    /// Remove every filter with `id` from all columns; returns how many were removed
    pub fn remove_everywhere(&mut self, id: FilterId) -> usize {
        self.filters
            .values_mut()
            .map(|filters| {
                let before = filters.len();
                filters.retain(|filter| filter.id() != id);
                before - filters.len()
            })
            .sum()
    }

    /// Filters registered for `column`
    pub fn filters_for(&self, column: &str) -> &[EntryFilter] {
        self.filters.get(column).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn filter_mut(&mut self, column: &str, id: FilterId) -> Option<&mut EntryFilter> {
        self.filters
            .get_mut(column)?
            .iter_mut()
            .find(|filter| filter.id() == id)
    }

    /// Combined predicate for one column; columns without filters accept everything
    pub fn column_accepts(&self, column: &str, entry: &Entry) -> Result<bool, TableError> {
        for filter in self.filters_for(column) {
            if !filter.matches(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Row predicate: every entry of `transaction` passes its column's filters
    pub fn accepts(&self, transaction: &Transaction) -> Result<bool, TableError> {
        for name in transaction.entry_names() {
            if let Some(entry) = transaction.entry(name) {
                if !self.column_accepts(name, entry)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn number(raw: &str) -> Entry {
        EntryFactory::default()
            .create(EntryType::new(ValueKind::Number, true), raw)
            .unwrap()
    }

    fn text(raw: &str) -> Entry {
        EntryFactory::default()
            .create(EntryType::new(ValueKind::Text, true), raw)
            .unwrap()
    }

    fn applied(id: FilterId, reference: Entry, comparison: FilterComparison) -> EntryFilter {
        EntryFilter::new(id, reference, comparison, true).unwrap()
    }

    #[rstest]
    #[case::greater(FilterComparison::Greater, [false, false, true])]
    #[case::greater_or_equal(FilterComparison::GreaterOrEqual, [false, true, true])]
    #[case::equal(FilterComparison::Equal, [false, true, false])]
    #[case::not_equal(FilterComparison::NotEqual, [true, false, true])]
    #[case::less_or_equal(FilterComparison::LessOrEqual, [true, true, false])]
    #[case::less(FilterComparison::Less, [true, false, false])]
    fn test_relational_comparisons(
        #[case] comparison: FilterComparison,
        #[case] expected: [bool; 3],
    ) {
        let filter = applied(1, number("10"), comparison);
        let actual = ["9", "10", "11"].map(|raw| filter.matches(&number(raw)).unwrap());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_equal_differs_from_greater_or_equal() {
        let equal = applied(1, number("10"), FilterComparison::Equal);
        let greater_or_equal = applied(2, number("10"), FilterComparison::GreaterOrEqual);
        let candidate = number("11");

        assert!(!equal.matches(&candidate).unwrap());
        assert!(greater_or_equal.matches(&candidate).unwrap());
    }

    #[test]
    fn test_unapplied_filter_accepts_everything() {
        let filter = EntryFilter::new(1, number("10"), FilterComparison::Less, false).unwrap();
        assert!(filter.matches(&number("1000")).unwrap());
        // even entries of another kind
        assert!(filter.matches(&text("abc")).unwrap());
    }

    #[test]
    fn test_regex_matches_anywhere() {
        let filter = applied(1, text("^Rent|grocer"), FilterComparison::Regex);
        assert!(filter.matches(&text("Rent March")).unwrap());
        assert!(filter.matches(&text("Local grocery")).unwrap());
        assert!(!filter.matches(&text("Salary")).unwrap());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let result = EntryFilter::new(1, text("(unclosed"), FilterComparison::Regex, true);
        assert!(matches!(result, Err(TableError::InvalidPattern { .. })));
    }

    #[test]
    fn test_switching_to_regex_compiles_reference() {
        let mut filter = applied(1, text("a+"), FilterComparison::Equal);
        assert!(!filter.matches(&text("caab")).unwrap());

        filter.set_comparison(FilterComparison::Regex).unwrap();
        assert!(filter.matches(&text("caab")).unwrap());

        assert!(filter.set_reference(text("[")).is_err());
        assert_eq!(filter.reference().value_string(), "a+");
    }

    #[test]
    fn test_relational_kind_mismatch() {
        let filter = applied(1, number("10"), FilterComparison::Greater);
        assert!(matches!(
            filter.matches(&text("abc")),
            Err(TableError::TypeMismatch { .. })
        ));
    }

    #[rstest]
    #[case::number(ValueKind::Number, FilterComparison::Equal, "0")]
    #[case::text(ValueKind::Text, FilterComparison::Regex, ".*")]
    #[case::currency(ValueKind::Currency, FilterComparison::Regex, ".*")]
    fn test_default_filters(
        #[case] kind: ValueKind,
        #[case] comparison: FilterComparison,
        #[case] reference: &str,
    ) {
        let filter = EntryFilter::default_for(3, kind, &EntryFactory::default()).unwrap();
        assert_eq!(filter.id(), 3);
        assert_eq!(filter.comparison(), comparison);
        assert_eq!(filter.reference().value_string(), reference);
        assert_eq!(filter.value_kind(), kind);
        assert!(!filter.is_applied());
    }

    #[test]
    fn test_default_date_filter_is_today() {
        let factory = EntryFactory::default();
        let filter = EntryFilter::default_for(1, ValueKind::Date, &factory).unwrap();
        let today = Local::now().format(factory.format().date_format()).to_string();

        assert_eq!(filter.comparison(), FilterComparison::Equal);
        assert_eq!(filter.reference().value_string(), today);
    }

    #[test]
    fn test_filters_on_one_column_combine_with_and() {
        let mut filters = FilterSet::new();
        filters
            .add("Amount", applied(1, number("10"), FilterComparison::Greater))
            .unwrap();
        filters
            .add("Amount", applied(2, number("100"), FilterComparison::Less))
            .unwrap();

        assert!(filters.column_accepts("Amount", &number("50")).unwrap());
        assert!(!filters.column_accepts("Amount", &number("5")).unwrap());
        assert!(!filters.column_accepts("Amount", &number("500")).unwrap());
        assert!(filters.column_accepts("Other", &number("500")).unwrap());
    }

    #[test]
    fn test_duplicate_filter_id_rejected() {
        let mut filters = FilterSet::new();
        filters
            .add("Amount", applied(1, number("10"), FilterComparison::Greater))
            .unwrap();

        let result = filters.add("Amount", applied(1, number("0"), FilterComparison::Less));
        assert_eq!(result, Err(TableError::duplicate_filter("Amount", 1)));
        assert_eq!(filters.filters_for("Amount").len(), 1);

        // the same id on another column is fine
        filters
            .add("Fee", applied(1, number("0"), FilterComparison::Less))
            .unwrap();
    }

    #[test]
    fn test_remove_by_column_and_everywhere() {
        let mut filters = FilterSet::new();
        filters.add("A", applied(1, number("1"), FilterComparison::Less)).unwrap();
        filters.add("B", applied(1, number("1"), FilterComparison::Less)).unwrap();
        filters.add("B", applied(2, number("1"), FilterComparison::Less)).unwrap();

        assert!(filters.remove("A", 1));
        assert!(!filters.remove("A", 1));
        assert!(!filters.remove("missing", 1));

        assert_eq!(filters.remove_everywhere(1), 1);
        assert_eq!(filters.filters_for("B").len(), 1);
        assert_eq!(filters.filters_for("B")[0].id(), 2);
    }

    #[test]
    fn test_row_predicate() {
        let mut row = Transaction::new(1);
        row.try_add_entry("Amount", number("50")).unwrap();
        row.try_add_entry("Note", text("rent")).unwrap();

        let mut filters = FilterSet::new();
        filters
            .add("Amount", applied(1, number("10"), FilterComparison::Greater))
            .unwrap();
        assert!(filters.accepts(&row).unwrap());

        filters
            .add("Note", applied(2, text("^food"), FilterComparison::Regex))
            .unwrap();
        assert!(!filters.accepts(&row).unwrap());

        filters.filter_mut("Note", 2).unwrap().set_applied(false);
        assert!(filters.accepts(&row).unwrap());
    }
}
