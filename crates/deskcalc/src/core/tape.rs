//! Calculation tape
//!
//! A bounded record of completed calculations, newest last. The tape is a
//! display aid for the keypad front ends; it is never replayed or persisted.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::{format_value, Operation};

/// One completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// Left operand
    pub left: f64,
    /// Operation applied
    pub operation: Operation,
    /// Right operand
    pub right: f64,
    /// Result of the calculation
    pub result: f64,
}

impl TapeEntry {
    /// Creates a new tape entry
    #[must_use]
    pub fn new(left: f64, operation: Operation, right: f64, result: f64) -> Self {
        Self {
            left,
            operation,
            right,
            result,
        }
    }

    /// Returns the entry as display text, e.g. `5 + 3 = 8`
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {} {} = {}",
            format_value(self.left),
            self.operation.symbol(),
            format_value(self.right),
            format_value(self.result)
        )
    }
}

/// Bounded calculation tape
#[derive(Debug, Clone)]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    capacity: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Default number of entries kept
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a tape with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a tape that keeps at most `capacity` entries.
    ///
    /// A capacity of zero disables recording.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Appends an entry, dropping the oldest when full
    pub fn push(&mut self, entry: TapeEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TapeEntry> {
        self.entries.back()
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter().rev()
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
