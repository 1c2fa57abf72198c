//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV codec for tables and the schema file reader
//! - `sync_reader` - Synchronous whole-file loader
//! - `async_reader` - Asynchronous whole-file loader on tokio

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{read_schema, ParseOutcome, TransactionCsvCodec};
pub use sync_reader::SyncReader;
