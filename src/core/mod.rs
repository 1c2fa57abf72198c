//! Core table logic
//!
//! This module contains the in-memory table components:
//! - `traits` - Trait abstractions for interchangeable implementations
//! - `entry_factory` - Entry construction under a shared format
//! - `table` - Schema-enforced transaction storage
//! - `comparator` - Multi-key ordering of transactions
//! - `filter` - Per-column filter predicates
//! - `paging` - Page cursor arithmetic
//! - `grid` - Column, sort, filter and paging state consumed by a grid view

pub mod comparator;
pub mod entry_factory;
pub mod filter;
pub mod grid;
pub mod paging;
pub mod table;
pub mod traits;

pub use comparator::{SortDirection, TransactionComparator};
pub use entry_factory::EntryFactory;
pub use filter::{EntryFilter, FilterComparison, FilterId, FilterSet};
pub use grid::{Alignment, ColumnDefinition, DataGridConfig};
pub use paging::{PagingConfig, DEFAULT_PAGE_SIZE};
pub use table::TransactionTable;
pub use traits::{IdGenerator, SequentialIdGenerator};
