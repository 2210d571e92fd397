//! Arithmetic core
//!
//! Accumulator arithmetic over `f64` with a single memory register.

mod format;
mod operations;
pub mod tape;

pub use format::format_value;
pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Division by zero is the only arithmetic failure; every other operation
/// follows IEEE 754 and yields infinity or NaN instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
}
