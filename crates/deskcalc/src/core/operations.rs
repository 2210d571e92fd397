//! Accumulator arithmetic

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operations understood by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Power (^)
    Power,
}

impl Operation {
    /// All operations, in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the symbol shown on the keypad and the display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }

    /// Maps a typed character to an operation.
    ///
    /// Accepts both the ASCII keyboard forms (`-`, `*`, `/`) and the keypad
    /// glyphs (`−`, `×`, `÷`).
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' | 'x' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Accumulator calculator with one memory slot
///
/// Every successful operation records its result as `last_result`;
/// `memory_store` copies that register into memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    last_result: f64,
    memory: f64,
}

impl Calculator {
    /// Creates a calculator with both registers at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent result
    #[must_use]
    pub fn last_result(&self) -> f64 {
        self.last_result
    }

    /// Returns the memory register without touching it
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Loads a value into the result register.
    ///
    /// Front ends use this to store the number on display into memory.
    pub fn set_last_result(&mut self, value: f64) {
        self.last_result = value;
    }

    /// Performs `op` on two operands
    pub fn calculate(&mut self, a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        let result = match op {
            Operation::Add => self.add(a, b),
            Operation::Subtract => self.subtract(a, b),
            Operation::Multiply => self.multiply(a, b),
            Operation::Divide => self.divide(a, b)?,
            Operation::Power => self.power(a, b),
        };
        tracing::debug!(a, b, op = op.symbol(), result, "calculated");
        Ok(result)
    }

    /// Addition: a + b
    pub fn add(&mut self, a: f64, b: f64) -> f64 {
        self.record(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(&mut self, a: f64, b: f64) -> f64 {
        self.record(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(&mut self, a: f64, b: f64) -> f64 {
        self.record(a * b)
    }

    /// Division: a / b
    ///
    /// Fails when `b` is zero of either sign; `last_result` is left as is.
    pub fn divide(&mut self, a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(self.record(a / b))
    }

    /// Power: a ^ b
    pub fn power(&mut self, a: f64, b: f64) -> f64 {
        self.record(a.powf(b))
    }

    /// Resets the result register and returns zero
    pub fn clear(&mut self) -> f64 {
        self.last_result = 0.0;
        0.0
    }

    /// Copies the last result into memory and returns it
    pub fn memory_store(&mut self) -> f64 {
        self.memory = self.last_result;
        self.memory
    }

    /// Returns the memory register
    #[must_use]
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    /// Resets memory and returns zero
    pub fn memory_clear(&mut self) -> f64 {
        self.memory = 0.0;
        0.0
    }

    fn record(&mut self, result: f64) -> f64 {
        self.last_result = result;
        result
    }
}
