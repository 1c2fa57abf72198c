//! Synchronous table loader
//!
//! Opens a CSV file with `std::fs` and hands it to the codec.
//!
//! ```no_run
//! use ledger_grid::core::{EntryFactory, SequentialIdGenerator};
//! use ledger_grid::io::{SyncReader, TransactionCsvCodec};
//! use ledger_grid::types::TransactionType;
//! use std::path::Path;
//!
//! let codec = TransactionCsvCodec::new(TransactionType::bank_statement(), EntryFactory::default());
//! let outcome = SyncReader::new(Path::new("statement.csv"))
//!     .unwrap()
//!     .load(&codec, &SequentialIdGenerator::new());
//! println!("Loaded {} transactions", outcome.table.len());
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Malformed rows end the load; they are reported in the [`ParseOutcome`]

use crate::core::IdGenerator;
use crate::io::csv_format::{ParseOutcome, TransactionCsvCodec};
use crate::types::TableError;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use tracing::info;

/// Synchronous CSV file reader
#[derive(Debug)]
pub struct SyncReader {
    reader: BufReader<File>,
}

impl SyncReader {
    /// Open the CSV file at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(TableError::FileNotFound)` if there is no such file
    /// * `Err(TableError::IoError)` for any other failure
    pub fn new(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        info!(path = %path.display(), "reading transactions");

        Ok(Self {
            reader: BufReader::with_capacity(8 * 1024, file),
        })
    }

    /// Parse the whole file with `codec`
    pub fn load(self, codec: &TransactionCsvCodec, ids: &dyn IdGenerator) -> ParseOutcome {
        codec.parse(self.reader, ids)
    }
}

pub(crate) fn open_error(path: &Path, error: std::io::Error) -> TableError {
    match error.kind() {
        ErrorKind::NotFound => TableError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => TableError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        },
    }
}
