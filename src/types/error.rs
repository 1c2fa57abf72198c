//! Error types for the ledger grid
//!
//! This module defines all error types that can occur while building schemas,
//! populating tables, querying them, and reading or writing CSV.
//!
//! # Error Categories
//!
//! - **Schema Errors**: empty or malformed schemas, duplicate column names, rows that don't conform
//! - **Validation Errors**: raw strings rejected by an entry's type rules
//! - **Contract Violations**: comparing entries of different value kinds
//! - **Duplicate Errors**: duplicate entry names, duplicate filter ids
//! - **Input Errors**: malformed CSV, missing files, I/O failures

use thiserror::Error;

/// Main error type for the ledger grid
///
/// Each variant carries enough context to produce a useful message on the
/// command line without the caller having to re-derive it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A transaction doesn't match the table schema
    ///
    /// The transaction is rejected as a whole; the table is left unchanged.
    #[error("Schema violation on column '{column}': {reason}")]
    SchemaViolation {
        /// Column where the mismatch was detected
        column: String,
        /// What was wrong with the column
        reason: String,
    },

    /// A raw string failed the type rules of an entry
    #[error("Invalid value '{value}': {message}")]
    Validation {
        /// The rejected raw string
        value: String,
        /// Hint describing the expected format
        message: String,
    },

    /// Two entries of different value kinds were compared
    ///
    /// This is a programming contract violation, not a data problem.
    #[error("Cannot compare entries with different types: {left}, {right}")]
    TypeMismatch { left: String, right: String },

    /// An entry name was added twice to the same transaction
    #[error("Entry with name '{name}' already exists in the transaction")]
    DuplicateEntry { name: String },

    /// A filter id was registered twice for the same column
    #[error("Filter {id} is already registered for column '{column}'")]
    DuplicateFilter { column: String, id: u64 },

    /// A column name appears more than once in a schema
    #[error("Column names must be distinct, '{name}' appears more than once")]
    DuplicateColumn { name: String },

    /// A schema was built without any columns
    #[error("Schema must contain at least one column")]
    EmptySchema,

    /// Column names and column types have different lengths
    #[error("Schema has {names} column names but {types} column types")]
    SchemaLengthMismatch { names: usize, types: usize },

    /// A column name isn't known to the schema or grid
    #[error("Unknown column '{name}'")]
    UnknownColumn { name: String },

    /// A regex filter reference could not be compiled
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A record field failed validation against its column type
    #[error("{}position {position}, value '{value}': {message}", line.map(|l| format!("line {}, ", l)).unwrap_or_default())]
    MalformedRecord {
        /// 1-based data line (header excluded), when read from CSV
        line: Option<u64>,
        /// 1-based field position
        position: usize,
        /// The offending raw value
        value: String,
        /// Validation message for the column type
        message: String,
    },

    /// A record had the wrong number of fields
    #[error("{}wrong number of values: expected {expected}, got {found}", line.map(|l| format!("line {}, ", l)).unwrap_or_default())]
    FieldCountMismatch {
        line: Option<u64>,
        expected: usize,
        found: usize,
    },

    /// Low-level CSV parse error
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError { message: String },
}

impl From<std::io::Error> for TableError {
    fn from(error: std::io::Error) -> Self {
        TableError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        TableError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl TableError {
    /// Create a SchemaViolation error
    pub fn schema_violation(column: &str, reason: impl Into<String>) -> Self {
        TableError::SchemaViolation {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(value: &str, message: impl Into<String>) -> Self {
        TableError::Validation {
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Create a TypeMismatch error
    pub fn type_mismatch(left: impl ToString, right: impl ToString) -> Self {
        TableError::TypeMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Create a DuplicateEntry error
    pub fn duplicate_entry(name: &str) -> Self {
        TableError::DuplicateEntry {
            name: name.to_string(),
        }
    }

    /// Create a DuplicateFilter error
    pub fn duplicate_filter(column: &str, id: u64) -> Self {
        TableError::DuplicateFilter {
            column: column.to_string(),
            id,
        }
    }

    /// Create an UnknownColumn error
    pub fn unknown_column(name: &str) -> Self {
        TableError::UnknownColumn {
            name: name.to_string(),
        }
    }

    /// Create a MalformedRecord error without line context
    pub fn malformed_record(position: usize, value: &str, message: &str) -> Self {
        TableError::MalformedRecord {
            line: None,
            position,
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    /// Attach a 1-based data line number to a record-level error
    ///
    /// Replaces any physical line a CSV parse error carried. Errors that don't
    /// describe a record are returned unchanged.
    pub fn at_line(self, number: u64) -> Self {
        match self {
            TableError::MalformedRecord {
                position,
                value,
                message,
                ..
            } => TableError::MalformedRecord {
                line: Some(number),
                position,
                value,
                message,
            },
            TableError::FieldCountMismatch {
                expected, found, ..
            } => TableError::FieldCountMismatch {
                line: Some(number),
                expected,
                found,
            },
            TableError::ParseError { message, .. } => TableError::ParseError {
                line: Some(number),
                message,
            },
            other => other,
        }
    }

    /// The human-readable hint carried by a Validation error, if any
    pub fn validation_message(&self) -> Option<&str> {
        match self {
            TableError::Validation { message, .. } => Some(message),
            _ => None,
        }
    }
}
