//! Asynchronous loading strategy
//!
//! Drives [`AsyncReader`] on a private tokio runtime so callers stay
//! synchronous.

use crate::core::IdGenerator;
use crate::io::{AsyncReader, ParseOutcome, TransactionCsvCodec};
use crate::strategy::ProcessingStrategy;
use crate::types::TableError;
use std::path::Path;

/// Asynchronous loading strategy
#[derive(Debug, Clone, Copy)]
pub struct AsyncLoadStrategy;

impl ProcessingStrategy for AsyncLoadStrategy {
    /// Load the file on a current-thread tokio runtime
    ///
    /// # Error Handling
    ///
    /// Runtime construction failures are returned as [`TableError::IoError`].
    fn load(
        &self,
        input_path: &Path,
        codec: &TransactionCsvCodec,
        ids: &dyn IdGenerator,
    ) -> Result<ParseOutcome, TableError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| TableError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(AsyncReader::new(input_path).load(codec, ids))
    }
}
