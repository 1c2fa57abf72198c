//! Core traits
//!
//! This module defines the seams where callers can plug in their own
//! implementations instead of relying on hidden global state.

use crate::types::TransactionId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of transaction identifiers
///
/// Identifiers must be unique for the lifetime of the generator. Builders
/// that create transactions (the table, the CSV codec) take a generator
/// explicitly rather than using a process-wide counter.
pub trait IdGenerator {
    /// Return the next unused identifier
    fn next_id(&self) -> TransactionId;
}

/// Monotonic counter starting at a configurable value
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: TransactionId) -> Self {
        SequentialIdGenerator {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TransactionId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
