//! Loading strategy module
//!
//! This module defines the Strategy pattern for loading a transaction table
//! from a CSV file. The synchronous and asynchronous loaders share the codec
//! and differ only in how the file is read, and are selected at runtime.

use crate::cli::StrategyType;
use crate::core::IdGenerator;
use crate::io::{ParseOutcome, TransactionCsvCodec};
use crate::types::TableError;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncLoadStrategy;
pub use sync::SyncLoadStrategy;

/// Loading strategy trait
///
/// Each strategy reads the CSV file at a path and parses it into a table of
/// the codec's schema.
pub trait ProcessingStrategy: Send + Sync {
    /// Load a table from `input_path`
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file
    /// * `codec` - Codec carrying the schema and entry format
    /// * `ids` - Source of transaction ids
    ///
    /// # Returns
    ///
    /// * `Ok(ParseOutcome)` once the file was read; a malformed row is
    ///   reported in the outcome together with the rows before it
    /// * `Err(TableError)` if the file couldn't be opened or read
    fn load(
        &self,
        input_path: &Path,
        codec: &TransactionCsvCodec,
        ids: &dyn IdGenerator,
    ) -> Result<ParseOutcome, TableError>;
}

/// Create a loading strategy for `strategy_type`
pub fn create_strategy(strategy_type: StrategyType) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncLoadStrategy),
        StrategyType::Async => Box::new(AsyncLoadStrategy),
    }
}
