use crate::core::{
    DataGridConfig, EntryFactory, EntryFilter, FilterComparison, SortDirection, DEFAULT_PAGE_SIZE,
};
use crate::types::{EntryFormat, EntryType, TableError, DEFAULT_DATE_FORMAT, DEFAULT_NULL_MARKER};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Query a CSV table of transactions
#[derive(Parser, Debug)]
#[command(name = "ledger-grid")]
#[command(about = "Filter, sort and page a CSV table of transactions", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transaction records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Loading strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Loading strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    #[arg(
        long = "date-format",
        value_name = "PATTERN",
        default_value = DEFAULT_DATE_FORMAT,
        help = "strftime pattern used to read and write dates"
    )]
    pub date_format: String,

    #[arg(
        long = "null-marker",
        value_name = "MARKER",
        help = "String that denotes a missing value (default: empty string)"
    )]
    pub null_marker: Option<String>,

    /// Column layout file with the header `name,kind,nullable`
    #[arg(
        long = "schema",
        value_name = "FILE",
        help = "Schema CSV file (default: bank statement layout)"
    )]
    pub schema: Option<PathBuf>,

    #[arg(
        long = "sort",
        value_name = "COLUMN:DIR",
        value_parser = parse_sort_spec,
        help = "Sort rule, repeatable; DIR is asc, desc or none. Earlier rules take priority"
    )]
    pub sort: Vec<SortSpec>,

    #[arg(
        long = "filter",
        value_name = "COLUMN:OP:VALUE",
        value_parser = parse_filter_spec,
        help = "Filter, repeatable; OP is gt, ge, eq, ne, le, lt or regex"
    )]
    pub filter: Vec<FilterSpec>,

    #[arg(long = "page", value_name = "N", default_value_t = 1, help = "1-based page to print")]
    pub page: usize,

    #[arg(
        long = "page-size",
        value_name = "ROWS",
        default_value_t = DEFAULT_PAGE_SIZE,
        help = "Rows per page"
    )]
    pub page_size: usize,

    #[arg(long = "all", help = "Print every matching row instead of one page")]
    pub all: bool,
}

/// Available loading strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// `--sort` argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// `--filter` argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    pub column: String,
    pub comparison: FilterComparison,
    pub value: String,
}

fn parse_sort_spec(raw: &str) -> Result<SortSpec, String> {
    let (column, direction) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected COLUMN:DIR, got '{}'", raw))?;

    let direction = match direction.to_lowercase().as_str() {
        "asc" | "ascending" => SortDirection::Ascending,
        "desc" | "descending" => SortDirection::Descending,
        "none" => SortDirection::NoSort,
        other => return Err(format!("unknown sort direction '{}'", other)),
    };

    Ok(SortSpec {
        column: column.to_string(),
        direction,
    })
}

fn parse_filter_spec(raw: &str) -> Result<FilterSpec, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(column), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected COLUMN:OP:VALUE, got '{}'", raw));
    };

    let comparison = match op.to_lowercase().as_str() {
        "gt" => FilterComparison::Greater,
        "ge" => FilterComparison::GreaterOrEqual,
        "eq" => FilterComparison::Equal,
        "ne" => FilterComparison::NotEqual,
        "le" => FilterComparison::LessOrEqual,
        "lt" => FilterComparison::Less,
        "regex" => FilterComparison::Regex,
        other => return Err(format!("unknown filter operator '{}'", other)),
    };

    Ok(FilterSpec {
        column: column.to_string(),
        comparison,
        value: value.to_string(),
    })
}

impl CliArgs {
    /// Entry format from `--date-format` and `--null-marker`
    pub fn entry_format(&self) -> Result<EntryFormat, TableError> {
        EntryFormat::new(
            &self.date_format,
            self.null_marker.as_deref().unwrap_or(DEFAULT_NULL_MARKER),
        )
    }

    /// Apply the sort, filter and paging arguments to `grid`
    ///
    /// Filter references are parsed as nullable entries of the column's kind.
    /// Filters get ids in argument order, starting at 1.
    pub fn configure_grid(
        &self,
        grid: &mut DataGridConfig,
        factory: &EntryFactory,
    ) -> Result<(), TableError> {
        for spec in &self.sort {
            grid.column(&spec.column)?;
            grid.comparator_mut().add_sort(&spec.column, spec.direction);
        }

        for (id, spec) in (1..).zip(&self.filter) {
            let kind = grid.column(&spec.column)?.value_kind;
            let reference = factory.create(EntryType::new(kind, true), &spec.value)?;
            let filter = EntryFilter::new(id, reference, spec.comparison, true)?;
            grid.add_filter(&spec.column, filter)?;
        }

        grid.paging.enabled = !self.all;
        grid.paging.set_page_size(self.page_size);
        Ok(())
    }
}
