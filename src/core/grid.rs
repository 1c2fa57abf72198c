//! Grid view configuration
//!
//! [`DataGridConfig`] is the surface a table widget consumes: per-column
//! display settings, sort toggling, filter registration and the paging cursor.
//! [`DataGridConfig::view`] runs the whole query pipeline over a table.
//!
//! # Pipeline
//!
//! ```text
//! TransactionTable → FilterSet (row accept/reject) → TransactionComparator (stable sort) → PagingConfig (skip/take)
//! ```

use crate::core::comparator::{SortDirection, TransactionComparator};
use crate::core::filter::{EntryFilter, FilterId, FilterSet};
use crate::core::paging::PagingConfig;
use crate::core::table::TransactionTable;
use crate::types::{TableError, Transaction, TransactionType, ValueKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    NotSet,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Tag handed to the renderer
    pub fn tag(self) -> &'static str {
        match self {
            Alignment::NotSet => "none",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        }
    }
}

/// Display settings of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub column_name: String,
    pub caption: String,
    pub value_kind: ValueKind,
    pub alignment: Alignment,
    pub displayed: bool,
}

impl ColumnDefinition {
    /// One visible, unaligned column per schema column, captioned with its name
    pub fn from_schema(schema: &TransactionType) -> Vec<ColumnDefinition> {
        schema
            .columns()
            .map(|(name, entry_type)| ColumnDefinition {
                column_name: name.to_string(),
                caption: name.to_string(),
                value_kind: entry_type.kind,
                alignment: Alignment::NotSet,
                displayed: true,
            })
            .collect()
    }
}

/// Column, sort, filter and paging state of a grid
#[derive(Debug, Clone, Default)]
pub struct DataGridConfig {
    columns: Vec<ColumnDefinition>,
    comparator: TransactionComparator,
    filters: FilterSet,
    pub paging: PagingConfig,
}

impl DataGridConfig {
    pub fn new(schema: &TransactionType) -> Self {
        DataGridConfig {
            columns: ColumnDefinition::from_schema(schema),
            ..Self::default()
        }
    }

    /// Columns in schema order
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&ColumnDefinition, TableError> {
        self.columns
            .iter()
            .find(|column| column.column_name == name)
            .ok_or_else(|| TableError::unknown_column(name))
    }

    pub fn column_mut(&mut self, name: &str) -> Result<&mut ColumnDefinition, TableError> {
        self.columns
            .iter_mut()
            .find(|column| column.column_name == name)
            .ok_or_else(|| TableError::unknown_column(name))
    }

    pub fn is_displayed(&self, name: &str) -> Result<bool, TableError> {
        Ok(self.column(name)?.displayed)
    }

    pub fn toggle_displayed(&mut self, name: &str) -> Result<(), TableError> {
        let column = self.column_mut(name)?;
        column.displayed = !column.displayed;
        Ok(())
    }

    pub fn alignment_tag(&self, name: &str) -> Result<&'static str, TableError> {
        Ok(self.column(name)?.alignment.tag())
    }

    pub fn comparator(&self) -> &TransactionComparator {
        &self.comparator
    }

    pub fn comparator_mut(&mut self) -> &mut TransactionComparator {
        &mut self.comparator
    }

    pub fn sort_direction(&self, name: &str) -> SortDirection {
        self.comparator.direction(name)
    }

    /// Advance the column's sort direction and make it the lowest-priority rule
    pub fn toggle_sort(&mut self, name: &str) -> Result<SortDirection, TableError> {
        self.column(name)?;
        let direction = self.comparator.direction(name).toggled();
        self.comparator.add_sort(name, direction);
        Ok(direction)
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    /// Register a filter on a known column
    ///
    /// # Errors
    ///
    /// - [`TableError::UnknownColumn`] if the grid has no such column
    /// - [`TableError::TypeMismatch`] if the filter's kind differs from the column's
    /// - [`TableError::DuplicateFilter`] if the id is taken on that column
    pub fn add_filter(&mut self, name: &str, filter: EntryFilter) -> Result<(), TableError> {
        let column = self.column(name)?;
        if column.value_kind != filter.value_kind() {
            return Err(TableError::type_mismatch(column.value_kind, filter.value_kind()));
        }
        self.filters.add(name, filter)
    }

    pub fn remove_filter(&mut self, name: &str, id: FilterId) -> bool {
        self.filters.remove(name, id)
    }

    pub fn remove_filter_everywhere(&mut self, id: FilterId) -> usize {
        self.filters.remove_everywhere(id)
    }

    /// Row predicate combining every registered filter
    pub fn transaction_filter(&self, transaction: &Transaction) -> Result<bool, TableError> {
        self.filters.accepts(transaction)
    }

    /// Filter, sort and page `table`
    ///
    /// Updates the paging cursor's data length to the filtered row count
    /// (clamping the current page) and returns the rows of the current page.
    pub fn view<'a>(&mut self, table: &'a TransactionTable) -> Result<Vec<&'a Transaction>, TableError> {
        let mut rows = Vec::with_capacity(table.len());
        for transaction in table {
            if self.filters.accepts(transaction)? {
                rows.push(transaction);
            }
        }

        let mut failure = None;
        rows.sort_by(|a, b| {
            self.comparator
                .compare(Some(*a), Some(*b))
                .unwrap_or_else(|e| {
                    failure.get_or_insert(e);
                    std::cmp::Ordering::Equal
                })
        });
        if let Some(e) = failure {
            return Err(e);
        }

        self.paging.set_data_length(rows.len());
        debug!(
            total = table.len(),
            matched = rows.len(),
            page = self.paging.current_page(),
            "grid view built"
        );

        Ok(rows
            .into_iter()
            .skip(self.paging.num_entries_to_skip())
            .take(self.paging.num_entries_to_take())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::FilterComparison;
    use crate::core::traits::SequentialIdGenerator;
    use crate::core::EntryFactory;
    use crate::types::EntryType;

    fn schema() -> TransactionType {
        TransactionType::new(
            ["Amount", "Note"],
            vec![
                EntryType::new(ValueKind::Number, false),
                EntryType::new(ValueKind::Text, false),
            ],
        )
        .unwrap()
    }

    fn table(rows: &[(&str, &str)]) -> TransactionTable {
        let factory = EntryFactory::default();
        let ids = SequentialIdGenerator::new();
        let mut table = TransactionTable::new(schema());
        for (amount, note) in rows {
            table.add_record(&[*amount, *note], &factory, &ids).unwrap();
        }
        table
    }

    fn amount_filter(id: FilterId, raw: &str, comparison: FilterComparison) -> EntryFilter {
        let reference = EntryFactory::default()
            .create(EntryType::new(ValueKind::Number, true), raw)
            .unwrap();
        EntryFilter::new(id, reference, comparison, true).unwrap()
    }

    #[test]
    fn test_columns_follow_schema() {
        let grid = DataGridConfig::new(&schema());
        let names: Vec<_> = grid.columns().iter().map(|c| c.caption.as_str()).collect();
        assert_eq!(names, vec!["Amount", "Note"]);
        assert_eq!(grid.column("Amount").unwrap().value_kind, ValueKind::Number);
        assert_eq!(grid.alignment_tag("Note").unwrap(), "none");
    }

    #[test]
    fn test_unknown_column() {
        let mut grid = DataGridConfig::new(&schema());
        assert_eq!(grid.column("Nope").unwrap_err(), TableError::unknown_column("Nope"));
        assert!(grid.toggle_sort("Nope").is_err());
        assert!(grid.toggle_displayed("Nope").is_err());
    }

    #[test]
    fn test_toggle_displayed_and_alignment() {
        let mut grid = DataGridConfig::new(&schema());
        grid.toggle_displayed("Note").unwrap();
        assert!(!grid.is_displayed("Note").unwrap());

        grid.column_mut("Amount").unwrap().alignment = Alignment::Right;
        assert_eq!(grid.alignment_tag("Amount").unwrap(), "right");
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut grid = DataGridConfig::new(&schema());
        assert_eq!(grid.toggle_sort("Amount").unwrap(), SortDirection::Descending);
        assert_eq!(grid.toggle_sort("Amount").unwrap(), SortDirection::Ascending);
        assert_eq!(grid.toggle_sort("Amount").unwrap(), SortDirection::NoSort);
        assert_eq!(grid.sort_direction("Amount"), SortDirection::NoSort);
    }

    #[test]
    fn test_add_filter_checks_kind() {
        let mut grid = DataGridConfig::new(&schema());
        let result = grid.add_filter("Note", amount_filter(1, "5", FilterComparison::Greater));
        assert!(matches!(result, Err(TableError::TypeMismatch { .. })));

        grid.add_filter("Amount", amount_filter(1, "5", FilterComparison::Greater))
            .unwrap();
        assert!(grid.remove_filter("Amount", 1));
    }

    #[test]
    fn test_view_filters_sorts_and_pages() {
        let table = table(&[
            ("5", "a"),
            ("50", "b"),
            ("500", "c"),
            ("20", "d"),
            ("70", "e"),
            ("20", "f"),
        ]);
        let mut grid = DataGridConfig::new(&schema());
        grid.add_filter("Amount", amount_filter(1, "10", FilterComparison::Greater))
            .unwrap();
        grid.add_filter("Amount", amount_filter(2, "100", FilterComparison::Less))
            .unwrap();
        grid.comparator_mut().add_sort("Amount", SortDirection::Ascending);
        grid.paging.set_page_size(3);
        grid.paging.set_data_length(table.len());
        grid.paging.set_current_page(2);

        let page = grid.view(&table).unwrap();

        // matched rows: 20(d) 20(f) 50(b) 70(e), the second page holds just 70(e)
        assert_eq!(grid.paging.data_length(), 4);
        let notes: Vec<_> = page
            .iter()
            .map(|tx| tx.entry("Note").unwrap().value_string())
            .collect();
        assert_eq!(notes, vec!["e"]);
    }

    #[test]
    fn test_view_keeps_source_table_intact() {
        let table = table(&[("1", "a"), ("2", "b")]);
        let mut grid = DataGridConfig::new(&schema());
        grid.comparator_mut().add_sort("Amount", SortDirection::Descending);

        let page = grid.view(&table).unwrap();
        assert_eq!(page[0].id(), 1);
        assert_eq!(table.get(0).unwrap().id(), 0);
    }
}
