//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `entry`: Typed entry values and their formats
//! - `schema`: Column schema of a table
//! - `transaction`: Transaction records and identifiers
//! - `error`: Error types for the ledger grid

pub mod entry;
pub mod error;
pub mod schema;
pub mod transaction;

pub use entry::{Entry, EntryFormat, EntryType, ValueKind, DEFAULT_DATE_FORMAT, DEFAULT_NULL_MARKER};
pub use error::TableError;
pub use schema::{ColumnSpec, TransactionType};
pub use transaction::{Transaction, TransactionId};
