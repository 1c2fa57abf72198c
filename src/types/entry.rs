//! Typed entry values
//!
//! An [`Entry`] is a single typed value in one transaction column. Every entry
//! keeps two views of its value in sync: the canonical string form (what gets
//! written back to CSV) and an internal ordering representation (a decimal for
//! numbers, a unix timestamp for dates).
//!
//! # Value Kinds
//!
//! - **Number**: locale-tolerant numerals, ordered numerically
//! - **Text**: any string, ordered lexicographically
//! - **Currency**: behaves like text but is a distinct kind, so it never mixes with plain text
//! - **Date**: parsed and formatted with one configurable pattern, ordered chronologically
//!
//! The null marker configured in [`EntryFormat`] denotes the null value of every kind.

use crate::types::TableError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Date pattern used when none is configured (chrono strftime syntax)
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// String that denotes a null value when none is configured
pub const DEFAULT_NULL_MARKER: &str = "";

/// Semantic kind of an entry value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Text,
    Currency,
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Number => "Number",
            ValueKind::Text => "Text",
            ValueKind::Currency => "Currency",
            ValueKind::Date => "Date",
        };
        f.write_str(name)
    }
}

/// Type of an entry: its value kind plus whether it may hold null
///
/// Two entry types are equal iff both the kind and the nullable flag match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryType {
    pub kind: ValueKind,
    pub nullable: bool,
}

impl EntryType {
    pub const fn new(kind: ValueKind, nullable: bool) -> Self {
        EntryType { kind, nullable }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Formatting rules shared by every entry created from one factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFormat {
    date_format: String,
    null_marker: String,
}

impl EntryFormat {
    /// Create a format
    ///
    /// Rejects date patterns chrono can't interpret, and null markers that
    /// are themselves a valid number or date, since a value could then be
    /// written out as the marker and read back as null.
    pub fn new(date_format: &str, null_marker: &str) -> Result<Self, TableError> {
        if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TableError::validation(
                date_format,
                "unsupported date pattern",
            ));
        }

        if parse_number(null_marker).is_some() {
            return Err(TableError::validation(
                null_marker,
                "null marker must not be a valid number",
            ));
        }
        if parse_timestamp(null_marker, date_format).is_some() {
            return Err(TableError::validation(
                null_marker,
                format!("null marker must not be a valid date in format {}", date_format),
            ));
        }

        Ok(EntryFormat {
            date_format: date_format.to_string(),
            null_marker: null_marker.to_string(),
        })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn null_marker(&self) -> &str {
        &self.null_marker
    }
}

impl Default for EntryFormat {
    fn default() -> Self {
        EntryFormat {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            null_marker: DEFAULT_NULL_MARKER.to_string(),
        }
    }
}

/// Internal ordering representation of an entry
#[derive(Debug, Clone, PartialEq)]
enum EntryValue {
    Null,
    Number(Decimal),
    Text,
    Timestamp(i64),
}

/// A single typed value belonging to an [`EntryType`]
///
/// Entries are created through [`crate::core::EntryFactory`]. Cloning yields an
/// independent copy; the only shared part is the immutable [`EntryFormat`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    entry_type: EntryType,
    format: Arc<EntryFormat>,
    value_string: String,
    value: EntryValue,
}

impl Entry {
    /// Create an entry from its raw string, validating it first
    pub(crate) fn new(
        entry_type: EntryType,
        format: Arc<EntryFormat>,
        raw: &str,
    ) -> Result<Self, TableError> {
        let (value_string, value) = parse_value(entry_type, &format, raw)?;
        Ok(Entry {
            entry_type,
            format,
            value_string,
            value,
        })
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn kind(&self) -> ValueKind {
        self.entry_type.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.entry_type.nullable
    }

    pub fn is_null(&self) -> bool {
        self.value == EntryValue::Null
    }

    /// Canonical string form; the null marker for null entries
    pub fn value_string(&self) -> &str {
        &self.value_string
    }

    /// Numeric ordering value; `None` for null entries
    ///
    /// Dates yield their unix timestamp. Text and currency have no meaningful
    /// numeric form and always yield zero.
    pub fn numeric_value(&self) -> Option<Decimal> {
        match self.value {
            EntryValue::Null => None,
            EntryValue::Number(number) => Some(number),
            EntryValue::Text => Some(Decimal::ZERO),
            EntryValue::Timestamp(ts) => Some(Decimal::from(ts)),
        }
    }

    /// Unix timestamp of a non-null date entry
    pub fn timestamp(&self) -> Option<i64> {
        match self.value {
            EntryValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Check a raw string against this entry's type rules without changing it
    pub fn validate(&self, raw: &str) -> bool {
        parse_value(self.entry_type, &self.format, raw).is_ok()
    }

    /// Replace the value, leaving the entry untouched if `raw` is invalid
    pub fn try_set(&mut self, raw: &str) -> Result<(), TableError> {
        let (value_string, value) = parse_value(self.entry_type, &self.format, raw)?;
        self.value_string = value_string;
        self.value = value;
        Ok(())
    }

    /// Order two entries of the same value kind
    ///
    /// Null sorts before every non-null value. Entries of different kinds
    /// can't be ordered and yield [`TableError::TypeMismatch`].
    pub fn compare(&self, other: &Entry) -> Result<Ordering, TableError> {
        if self.kind() != other.kind() {
            return Err(TableError::type_mismatch(self.kind(), other.kind()));
        }

        let ordering = match (&self.value, &other.value) {
            (EntryValue::Null, EntryValue::Null) => Ordering::Equal,
            (EntryValue::Null, _) => Ordering::Less,
            (_, EntryValue::Null) => Ordering::Greater,
            (EntryValue::Number(a), EntryValue::Number(b)) => a.cmp(b),
            (EntryValue::Timestamp(a), EntryValue::Timestamp(b)) => a.cmp(b),
            _ => collate(&self.value_string, &other.value_string),
        };
        Ok(ordering)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value_string)
    }
}

/// Validate `raw` for `entry_type` and produce its canonical string and ordering value
fn parse_value(
    entry_type: EntryType,
    format: &EntryFormat,
    raw: &str,
) -> Result<(String, EntryValue), TableError> {
    if raw == format.null_marker() {
        if entry_type.nullable {
            return Ok((raw.to_string(), EntryValue::Null));
        }
        let message = match entry_type.kind {
            ValueKind::Text | ValueKind::Currency => format!(
                "must be non-null text, i.e. different from '{}'",
                format.null_marker()
            ),
            kind => format!("null value provided to non-nullable {}", kind),
        };
        return Err(TableError::validation(raw, message));
    }

    match entry_type.kind {
        ValueKind::Number => {
            let number = parse_number(raw).ok_or_else(|| {
                TableError::validation(
                    raw,
                    "must be a number, i.e. must contain only digits, spaces, comma, or a dot for decimal part separation",
                )
            })?;
            Ok((number.to_string(), EntryValue::Number(number)))
        }
        ValueKind::Text | ValueKind::Currency => Ok((raw.to_string(), EntryValue::Text)),
        ValueKind::Date => {
            let invalid = || {
                TableError::validation(
                    raw,
                    format!("date must be in format {}", format.date_format()),
                )
            };
            let ts = parse_timestamp(raw, format.date_format()).ok_or_else(invalid)?;
            let canonical = format_timestamp(ts, format.date_format()).ok_or_else(invalid)?;
            Ok((canonical, EntryValue::Timestamp(ts)))
        }
    }
}

/// Parse a locale-formatted numeral
///
/// Spaces, non-breaking spaces, tabs and carriage returns are dropped and a
/// comma is read as the decimal separator. Numerals that don't fit a
/// `Decimal` exactly are rejected rather than rounded.
fn parse_number(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{00A0}' | '\t' | '\r'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty()
        || !cleaned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }

    Decimal::from_str_exact(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
        .map(|number| number.normalize())
}

/// Parse a date (or date-time) string into a unix timestamp
pub(crate) fn parse_timestamp(raw: &str, pattern: &str) -> Option<i64> {
    if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, pattern) {
        return Some(date_time.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(raw, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date_time| date_time.and_utc().timestamp())
}

/// Render a unix timestamp with `pattern`
pub(crate) fn format_timestamp(ts: i64, pattern: &str) -> Option<String> {
    let date_time = DateTime::from_timestamp(ts, 0)?.naive_utc();
    let mut rendered = String::new();
    write!(rendered, "{}", date_time.format(pattern)).ok()?;
    Some(rendered)
}

/// Case-insensitive ordering with lowercase before uppercase on ties
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
