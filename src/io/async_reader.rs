//! Asynchronous table loader
//!
//! Reads the whole CSV file with `tokio::fs` and parses the bytes with the
//! same codec the synchronous loader uses.
//!
//! # Architecture
//!
//! ```text
//! tokio::fs::read → bytes → TransactionCsvCodec::parse → ParseOutcome
//! ```

use crate::core::IdGenerator;
use crate::io::csv_format::{ParseOutcome, TransactionCsvCodec};
use crate::io::sync_reader::open_error;
use crate::types::TableError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Asynchronous CSV file reader
#[derive(Debug, Clone)]
pub struct AsyncReader {
    path: PathBuf,
}

impl AsyncReader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and parse it with `codec`
    ///
    /// # Errors
    ///
    /// File-level failures (missing file, unreadable file) are returned as
    /// `Err`; malformed rows are reported inside the [`ParseOutcome`].
    pub async fn load(
        &self,
        codec: &TransactionCsvCodec,
        ids: &dyn IdGenerator,
    ) -> Result<ParseOutcome, TableError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| open_error(&self.path, e))?;
        info!(path = %self.path.display(), bytes = bytes.len(), "read transactions");

        Ok(codec.parse_bytes(&bytes, ids))
    }
}
