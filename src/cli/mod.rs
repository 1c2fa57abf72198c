// CLI module
// Command-line interface, argument parsing and the query pipeline behind it

mod args;

pub use args::{CliArgs, FilterSpec, SortSpec, StrategyType};

use crate::core::{DataGridConfig, EntryFactory, SequentialIdGenerator, TransactionTable};
use crate::io::sync_reader::open_error;
use crate::io::{read_schema, TransactionCsvCodec};
use crate::strategy::create_strategy;
use crate::types::{TableError, TransactionType};
use clap::Parser;
use std::fs::File;
use std::io::Write;
use tracing::info;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or the
/// --help flag), clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Load the input file, query it, and write the selected page as CSV to `output`
///
/// If the input contains a malformed row, the rows before it are still
/// queried and written, and the parse error is returned afterwards.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), TableError> {
    let factory = EntryFactory::new(args.entry_format()?);
    let schema = match &args.schema {
        Some(path) => read_schema(File::open(path).map_err(|e| open_error(path, e))?)?,
        None => TransactionType::bank_statement(),
    };
    let codec = TransactionCsvCodec::new(schema, factory);

    let strategy = create_strategy(args.strategy);
    let outcome = strategy.load(&args.input_file, &codec, &SequentialIdGenerator::new())?;

    let mut grid = DataGridConfig::new(codec.schema());
    args.configure_grid(&mut grid, codec.factory())?;
    grid.paging.set_data_length(outcome.table.len());
    grid.paging.set_current_page(args.page);

    let page = grid.view(&outcome.table)?;
    info!(
        rows = page.len(),
        page = grid.paging.current_page(),
        pages = grid.paging.max_page_number(),
        "writing page"
    );

    let page = TransactionTable::from_transactions(codec.schema().clone(), page.into_iter().cloned())?;
    codec.serialize(&page, output)?;

    match outcome.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
