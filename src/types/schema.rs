//! Transaction schema
//!
//! A [`TransactionType`] is the ordered list of named, typed columns every
//! transaction in a table has to provide. It is immutable once built.

use crate::types::entry::{EntryType, ValueKind};
use crate::types::TableError;
use serde::Deserialize;
use std::collections::HashSet;

/// One column of a schema as read from a schema file
///
/// Schema files are CSV with the header `name,kind,nullable`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ValueKind,
    pub nullable: bool,
}

/// Ordered, named and typed column definitions
///
/// Invariants: at least one column, column names pairwise distinct. Two
/// schemas are equal iff they have the same names and types in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionType {
    names: Vec<String>,
    types: Vec<EntryType>,
}

impl TransactionType {
    /// Build a schema from parallel lists of column names and types
    ///
    /// # Errors
    ///
    /// - [`TableError::EmptySchema`] if either list is empty
    /// - [`TableError::DuplicateColumn`] if a name repeats
    /// - [`TableError::SchemaLengthMismatch`] if the lists differ in length
    pub fn new<N, S>(names: N, types: Vec<EntryType>) -> Result<Self, TableError>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || types.is_empty() {
            return Err(TableError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(names.len());
        if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(TableError::DuplicateColumn {
                name: duplicate.clone(),
            });
        }

        if names.len() != types.len() {
            return Err(TableError::SchemaLengthMismatch {
                names: names.len(),
                types: types.len(),
            });
        }

        Ok(TransactionType { names, types })
    }

    /// Build a schema from column specs, keeping their order
    pub fn from_columns(columns: Vec<ColumnSpec>) -> Result<Self, TableError> {
        let (names, types): (Vec<String>, Vec<EntryType>) = columns
            .into_iter()
            .map(|spec| (spec.name, EntryType::new(spec.kind, spec.nullable)))
            .unzip();
        Self::new(names, types)
    }

    /// The default layout of a bank statement export
    pub fn bank_statement() -> Self {
        let text = EntryType::new(ValueKind::Text, false);
        let nullable_text = EntryType::new(ValueKind::Text, true);

        let columns = [
            ("Date", EntryType::new(ValueKind::Date, false)),
            ("Counterpart Name", nullable_text),
            ("IBAN", nullable_text),
            ("BIC", nullable_text),
            ("Counterpart Account", nullable_text),
            ("Counterpart Bank Code", EntryType::new(ValueKind::Number, true)),
            ("Amount", EntryType::new(ValueKind::Number, false)),
            ("Currency", EntryType::new(ValueKind::Currency, false)),
            ("Message For Me", nullable_text),
            ("Transaction ID", text),
            ("Owner Name", text),
            ("Owner Account", text),
        ];

        TransactionType {
            names: columns.iter().map(|(name, _)| name.to_string()).collect(),
            types: columns.iter().map(|(_, entry_type)| *entry_type).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// False for every schema, since construction requires at least one column
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn types(&self) -> &[EntryType] {
        &self.types
    }

    /// Iterate `(name, type)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, EntryType)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.types.iter().copied())
    }

    /// Declared type of a column
    pub fn column_type(&self, name: &str) -> Option<EntryType> {
        self.position(name).map(|index| self.types[index])
    }

    /// 0-based position of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn number() -> EntryType {
        EntryType::new(ValueKind::Number, false)
    }

    fn text() -> EntryType {
        EntryType::new(ValueKind::Text, true)
    }

    #[test]
    fn test_new_keeps_column_order() {
        let schema = TransactionType::new(["b", "a"], vec![number(), text()]).unwrap();
        let columns: Vec<_> = schema.columns().collect();
        assert_eq!(columns, vec![("b", number()), ("a", text())]);
        assert_eq!(schema.position("a"), Some(1));
        assert_eq!(schema.column_type("b"), Some(number()));
        assert_eq!(schema.column_type("c"), None);
        assert_eq!(schema.len(), 2);
        assert!(!schema.is_empty());
    }

    #[rstest]
    #[case::no_names(vec![], vec![number()], TableError::EmptySchema)]
    #[case::no_types(vec!["a"], vec![], TableError::EmptySchema)]
    #[case::duplicate_names(
        vec!["a", "a"],
        vec![number(), number()],
        TableError::DuplicateColumn { name: "a".to_string() }
    )]
    #[case::length_mismatch(
        vec!["a", "b"],
        vec![number()],
        TableError::SchemaLengthMismatch { names: 2, types: 1 }
    )]
    fn test_new_rejects_invalid_schema(
        #[case] names: Vec<&str>,
        #[case] types: Vec<EntryType>,
        #[case] expected: TableError,
    ) {
        assert_eq!(TransactionType::new(names, types).unwrap_err(), expected);
    }

    #[test]
    fn test_structural_equality() {
        let a = TransactionType::new(["x", "y"], vec![number(), text()]).unwrap();
        let b = TransactionType::new(["x", "y"], vec![number(), text()]).unwrap();
        let swapped = TransactionType::new(["y", "x"], vec![text(), number()]).unwrap();
        let other_nullability =
            TransactionType::new(["x", "y"], vec![number(), EntryType::new(ValueKind::Text, false)])
                .unwrap();

        assert_eq!(a, b);
        assert_ne!(a, swapped);
        assert_ne!(a, other_nullability);
    }

    #[test]
    fn test_from_columns() {
        let schema = TransactionType::from_columns(vec![
            ColumnSpec {
                name: "Amount".to_string(),
                kind: ValueKind::Number,
                nullable: false,
            },
            ColumnSpec {
                name: "Note".to_string(),
                kind: ValueKind::Text,
                nullable: true,
            },
        ])
        .unwrap();

        assert_eq!(schema.names(), ["Amount".to_string(), "Note".to_string()]);
        assert_eq!(schema.types(), [number(), text()]);
    }

    #[test]
    fn test_bank_statement_schema() {
        let schema = TransactionType::bank_statement();
        assert_eq!(schema.len(), 12);
        assert_eq!(schema.names()[0], "Date");
        assert_eq!(
            schema.column_type("Currency"),
            Some(EntryType::new(ValueKind::Currency, false))
        );
        assert_eq!(
            schema.column_type("Counterpart Bank Code"),
            Some(EntryType::new(ValueKind::Number, true))
        );
    }
}
