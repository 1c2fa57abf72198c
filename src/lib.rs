//! Ledger Grid Library
//! # Overview
//!
//! This library provides typed, schema-enforced transaction tables with
//! multi-key sorting, per-column filtering, paging, and a CSV codec, plus a
//! sync and an async loading strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Entry, TransactionType, Transaction, TableError)
//! - [`cli`] - CLI arguments parsing and the query pipeline
//! - [`core`] - Table logic:
//!   - [`core::table`] - Schema-enforced transaction storage
//!   - [`core::comparator`] - Prioritized multi-column ordering
//!   - [`core::filter`] - Per-column filter predicates
//!   - [`core::grid`] - Column, sort, filter and paging state of a grid view
//! - [`io`] - CSV codec and file loaders
//! - [`strategy`] - Runtime selection of the loader
//!
//! # Value Kinds
//!
//! - **Number**: decimal numerals; spaces are ignored and a comma is a decimal separator
//! - **Text**: free text
//! - **Currency**: currency codes, kept apart from plain text
//! - **Date**: dates in one configurable strftime pattern (default `%d.%m.%Y`)
//!
//! Any kind may be nullable. The configured null marker (default: empty string)
//! denotes null, and null orders before every value.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    DataGridConfig, EntryFactory, EntryFilter, FilterComparison, FilterSet, PagingConfig,
    SortDirection, TransactionComparator, TransactionTable,
};
pub use io::{ParseOutcome, TransactionCsvCodec};
pub use types::{
    Entry, EntryFormat, EntryType, TableError, Transaction, TransactionId, TransactionType,
    ValueKind,
};
