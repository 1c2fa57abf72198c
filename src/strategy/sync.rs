//! Synchronous loading strategy
//!
//! Reads the file on the calling thread through [`SyncReader`].

use crate::core::IdGenerator;
use crate::io::{ParseOutcome, SyncReader, TransactionCsvCodec};
use crate::strategy::ProcessingStrategy;
use crate::types::TableError;
use std::path::Path;

/// Synchronous loading strategy
///
/// # Examples
///
/// ```no_run
/// use ledger_grid::core::{EntryFactory, SequentialIdGenerator};
/// use ledger_grid::io::TransactionCsvCodec;
/// use ledger_grid::strategy::{ProcessingStrategy, SyncLoadStrategy};
/// use ledger_grid::types::TransactionType;
/// use std::path::Path;
///
/// let codec = TransactionCsvCodec::new(TransactionType::bank_statement(), EntryFactory::default());
/// let outcome = SyncLoadStrategy
///     .load(Path::new("statement.csv"), &codec, &SequentialIdGenerator::new())
///     .expect("Loading failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncLoadStrategy;

impl ProcessingStrategy for SyncLoadStrategy {
    fn load(
        &self,
        input_path: &Path,
        codec: &TransactionCsvCodec,
        ids: &dyn IdGenerator,
    ) -> Result<ParseOutcome, TableError> {
        Ok(SyncReader::new(input_path)?.load(codec, ids))
    }
}
