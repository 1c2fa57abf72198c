//! CSV format handling for transaction tables
//!
//! This module centralizes all CSV format concerns, providing:
//! - [`TransactionCsvCodec`] for parsing a table from CSV and serializing it back
//! - [`read_schema`] for loading a column layout from a `name,kind,nullable` CSV
//!
//! All functions work on `Read`/`Write` handles (no file system access) for
//! easy testing.
//!
//! # Format
//!
//! Fields are comma-delimited and enclosed in double quotes. The first line is
//! a header: it is ignored on input and generated from the schema's column
//! names on output. Rows are separated by CRLF. Columns are positional, in
//! schema order.

use crate::core::{EntryFactory, IdGenerator, TransactionTable};
use crate::types::{ColumnSpec, TableError, TransactionType};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::io::{Read, Write};
use tracing::{debug, warn};

/// Result of parsing a CSV document
///
/// Parsing stops at the first malformed row. `table` then holds every row
/// accepted before it and `error` describes the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub table: TransactionTable,
    pub error: Option<TableError>,
}

impl ParseOutcome {
    /// Whether the whole input was consumed without error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the partial table if parsing failed
    pub fn into_result(self) -> Result<TransactionTable, TableError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.table),
        }
    }
}

/// Reads and writes transaction tables of one schema
#[derive(Debug, Clone)]
pub struct TransactionCsvCodec {
    schema: TransactionType,
    factory: EntryFactory,
}

impl TransactionCsvCodec {
    pub fn new(schema: TransactionType, factory: EntryFactory) -> Self {
        TransactionCsvCodec { schema, factory }
    }

    pub fn schema(&self) -> &TransactionType {
        &self.schema
    }

    pub fn factory(&self) -> &EntryFactory {
        &self.factory
    }

    /// Parse a CSV document into a table
    ///
    /// Line numbers in errors count data rows from 1; the header is not counted.
    ///
    /// # Arguments
    ///
    /// * `reader` - CSV source, header line first
    /// * `ids` - Source of transaction ids for the parsed rows
    pub fn parse<R: Read>(&self, reader: R, ids: &dyn IdGenerator) -> ParseOutcome {
        let mut table = TransactionTable::new(self.schema.clone());
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut line: u64 = 0;
        for record in reader.records() {
            line += 1;
            let result = record
                .map_err(TableError::from)
                .and_then(|record| {
                    table.add_record(&record.iter().collect::<Vec<_>>(), &self.factory, ids)
                })
                .map_err(|e| e.at_line(line));

            if let Err(e) = result {
                warn!(line, rows = table.len(), error = %e, "CSV parsing stopped");
                return ParseOutcome {
                    table,
                    error: Some(e),
                };
            }
        }

        debug!(rows = table.len(), "CSV parsed");
        ParseOutcome { table, error: None }
    }

    /// Parse a CSV document held in memory
    pub fn parse_bytes(&self, bytes: &[u8], ids: &dyn IdGenerator) -> ParseOutcome {
        self.parse(bytes, ids)
    }

    /// Write `table` as CSV
    ///
    /// The header holds the table schema's column names; each row holds the
    /// canonical string of every entry in schema order.
    pub fn serialize<W: Write>(&self, table: &TransactionTable, writer: W) -> Result<(), TableError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        let names = table.schema().names();
        writer.write_record(names)?;

        for transaction in table {
            let entries = transaction.entries_for(names.iter().map(String::as_str));
            writer.write_record(entries.iter().map(|entry| entry.value_string()))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Serialize `table` into an in-memory CSV string
    pub fn serialize_to_string(&self, table: &TransactionTable) -> Result<String, TableError> {
        let mut buffer = Vec::new();
        self.serialize(table, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TableError::IoError {
            message: e.to_string(),
        })
    }
}

/// Read a column layout from CSV with the header `name,kind,nullable`
///
/// `kind` is one of `number`, `text`, `currency`, `date`; `nullable` is
/// `true` or `false`. Surrounding whitespace is trimmed.
pub fn read_schema<R: Read>(reader: R) -> Result<TransactionType, TableError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = reader
        .deserialize::<ColumnSpec>()
        .collect::<Result<Vec<_>, csv::Error>>()?;

    TransactionType::from_columns(columns)
}
