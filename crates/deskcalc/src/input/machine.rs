//! The keypad state machine

use serde::{Deserialize, Serialize};

use super::Key;
use crate::core::tape::{Tape, TapeEntry};
use crate::core::{format_value, Calculator, Operation};

/// Text shown when an evaluation fails
pub const DEFAULT_ERROR_TEXT: &str = "Error";

/// Coarse input state, derived from the buffer and the pending operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputState {
    /// Buffer empty or a lone `0`, nothing pending
    Idle,
    /// Buffer holds a number (typed or a result), or any right operand
    Entering,
    /// Operator pressed, waiting for the right operand
    PendingOperator,
}

/// An operator waiting for its right operand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// Operator pressed
    pub operation: Operation,
    /// Left operand captured when the operator was pressed
    pub left: f64,
}

/// Translates key presses into calculator calls and a display string
#[derive(Debug, Clone)]
pub struct InputMachine {
    calculator: Calculator,
    buffer: String,
    pending: Option<PendingOperation>,
    display: String,
    /// Buffer holds a result rather than typed digits
    showing_result: bool,
    error: bool,
    error_text: String,
    tape: Tape,
}

impl Default for InputMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl InputMachine {
    /// Creates an idle machine showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
            buffer: String::new(),
            pending: None,
            display: "0".to_string(),
            showing_result: false,
            error: false,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            tape: Tape::new(),
        }
    }

    /// Sets the text shown after a failed evaluation
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Sets how many completed calculations the tape keeps
    #[must_use]
    pub fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape = Tape::with_capacity(capacity);
        self
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Current input buffer
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// Pending operation as display text, e.g. `5 +`
    #[must_use]
    pub fn pending_display(&self) -> Option<String> {
        self.pending
            .map(|p| format!("{} {}", format_value(p.left), p.operation.symbol()))
    }

    /// Returns true while the display shows the error text
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Text shown after a failed evaluation
    #[must_use]
    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    /// Underlying accumulator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Completed calculations
    #[must_use]
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns true when memory holds a non-zero value
    #[must_use]
    pub fn has_memory(&self) -> bool {
        self.calculator.memory() != 0.0
    }

    /// Current coarse state
    #[must_use]
    pub fn state(&self) -> InputState {
        if self.pending.is_some() {
            if self.buffer.is_empty() {
                InputState::PendingOperator
            } else {
                InputState::Entering
            }
        } else if self.buffer.is_empty() || self.buffer == "0" {
            InputState::Idle
        } else {
            InputState::Entering
        }
    }

    /// Handles one key press
    pub fn press(&mut self, key: Key) {
        tracing::trace!(key = key.label(), "key pressed");
        match key {
            Key::Digit(d) => self.digit(d),
            Key::Decimal => self.decimal(),
            Key::Operator(op) => self.operator(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::Negate => self.negate(),
            Key::Percent => self.percent(),
            Key::MemoryStore => self.memory_store(),
            Key::MemoryRecall => self.memory_recall(),
            Key::MemoryClear => self.memory_clear(),
        }
    }

    /// Handles a sequence of key presses in order
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Appends a digit; a lone leading zero is replaced
    pub fn digit(&mut self, d: u8) {
        let Some(ch) = char::from_digit(u32::from(d), 10) else {
            return;
        };
        self.begin_entry();
        match self.buffer.as_str() {
            "0" => self.buffer.clear(),
            "-0" => self.buffer.truncate(1),
            _ => {}
        }
        self.buffer.push(ch);
        self.show_buffer();
    }

    /// Appends the decimal point unless the buffer already has one
    pub fn decimal(&mut self) {
        self.begin_entry();
        if self.buffer.contains('.') {
            return;
        }
        if self.buffer.is_empty() {
            self.buffer.push('0');
        }
        self.buffer.push('.');
        self.show_buffer();
    }

    /// Stores the buffer as left operand, evaluating any pending operation first
    pub fn operator(&mut self, operation: Operation) {
        let Some(mut left) = self.buffer_value() else {
            return;
        };
        if let Some(pending) = self.pending.take() {
            match self.evaluate(pending, left) {
                Some(result) => left = result,
                None => return,
            }
        }
        self.pending = Some(PendingOperation { operation, left });
        self.buffer.clear();
        self.showing_result = false;
    }

    /// Evaluates the pending operation against the buffer
    pub fn equals(&mut self) {
        let Some(pending) = self.pending else {
            return;
        };
        let Some(right) = self.buffer_value() else {
            return;
        };
        self.pending = None;
        self.evaluate(pending, right);
    }

    /// Resets everything except memory
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pending = None;
        self.showing_result = false;
        self.calculator.clear();
        self.set_display("0".to_string());
    }

    /// Removes the last typed character
    pub fn backspace(&mut self) {
        if self.showing_result || self.buffer.is_empty() {
            return;
        }
        self.buffer.pop();
        if self.buffer == "-" {
            self.buffer.clear();
        }
        self.show_buffer();
    }

    /// Toggles the sign of the buffer
    pub fn negate(&mut self) {
        let Some(value) = self.buffer_value() else {
            return;
        };
        if value == 0.0 || value.is_nan() {
            return;
        }
        if let Some(rest) = self.buffer.strip_prefix('-') {
            self.buffer = rest.to_string();
        } else {
            self.buffer.insert(0, '-');
        }
        self.show_buffer();
    }

    /// Replaces the buffer with its value divided by 100
    pub fn percent(&mut self) {
        let Some(value) = self.buffer_value() else {
            return;
        };
        self.buffer = format_value(value / 100.0);
        self.showing_result = true;
        self.show_buffer();
    }

    /// Stores the number on display into memory
    pub fn memory_store(&mut self) {
        let Some(value) = self.buffer_value() else {
            return;
        };
        self.calculator.set_last_result(value);
        let stored = self.calculator.memory_store();
        tracing::debug!(stored, "memory store");
    }

    /// Overwrites the buffer with the memory value
    pub fn memory_recall(&mut self) {
        self.buffer = format_value(self.calculator.memory_recall());
        self.showing_result = true;
        self.show_buffer();
    }

    /// Resets memory
    pub fn memory_clear(&mut self) {
        self.calculator.memory_clear();
    }

    fn begin_entry(&mut self) {
        if self.showing_result {
            self.buffer.clear();
            self.showing_result = false;
        }
    }

    fn buffer_value(&self) -> Option<f64> {
        if self.buffer.is_empty() {
            return None;
        }
        self.buffer.parse().ok()
    }

    fn evaluate(&mut self, pending: PendingOperation, right: f64) -> Option<f64> {
        match self
            .calculator
            .calculate(pending.left, right, pending.operation)
        {
            Ok(result) => {
                self.tape
                    .push(TapeEntry::new(pending.left, pending.operation, right, result));
                self.buffer = format_value(result);
                self.showing_result = true;
                self.show_buffer();
                Some(result)
            }
            Err(err) => {
                tracing::debug!(%err, left = pending.left, right, "evaluation failed");
                self.buffer.clear();
                self.pending = None;
                self.showing_result = false;
                self.display = self.error_text.clone();
                self.error = true;
                None
            }
        }
    }

    fn show_buffer(&mut self) {
        let text = if self.buffer.is_empty() {
            "0".to_string()
        } else {
            self.buffer.clone()
        };
        self.set_display(text);
    }

    fn set_display(&mut self, text: String) {
        self.display = text;
        self.error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_key_script;
    use proptest::prelude::*;

    fn run(script: &str) -> InputMachine {
        let mut machine = InputMachine::new();
        machine.press_all(parse_key_script(script).unwrap());
        machine
    }

    // ===== Initial state =====

    #[test]
    fn test_new_is_idle_showing_zero() {
        let m = InputMachine::new();
        assert_eq!(m.display(), "0");
        assert_eq!(m.buffer(), "");
        assert_eq!(m.state(), InputState::Idle);
        assert!(m.pending().is_none());
        assert!(!m.is_error());
    }

    // ===== Digits and decimal point =====

    #[test]
    fn test_digits_append() {
        let m = run("123");
        assert_eq!(m.buffer(), "123");
        assert_eq!(m.display(), "123");
        assert_eq!(m.state(), InputState::Entering);
    }

    #[test]
    fn test_leading_zero_replaced() {
        let m = run("07");
        assert_eq!(m.buffer(), "7");
    }

    #[test]
    fn test_lone_zero_is_idle() {
        let m = run("0");
        assert_eq!(m.buffer(), "0");
        assert_eq!(m.state(), InputState::Idle);
    }

    #[test]
    fn test_zero_right_operand_is_entering() {
        let m = run("5+0");
        assert_eq!(m.buffer(), "0");
        assert_eq!(m.pending_display().as_deref(), Some("5 +"));
        assert_eq!(m.state(), InputState::Entering);
    }

    #[test]
    fn test_repeated_zeros_collapse() {
        let m = run("000");
        assert_eq!(m.buffer(), "0");
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        let m = run("1.5.3");
        assert_eq!(m.buffer(), "1.53");
        assert_eq!(m.display(), "1.53");
    }

    #[test]
    fn test_decimal_on_empty_buffer() {
        let m = run(".5");
        assert_eq!(m.buffer(), "0.5");
    }

    #[test]
    fn test_zero_then_decimal_keeps_zero() {
        let m = run("0.0");
        assert_eq!(m.buffer(), "0.0");
    }

    // ===== Operators and equals =====

    #[test]
    fn test_simple_addition() {
        let m = run("5+3=");
        assert_eq!(m.display(), "8");
        assert!(m.pending().is_none());
    }

    #[test]
    fn test_operator_stores_pending() {
        let m = run("5+");
        assert_eq!(m.state(), InputState::PendingOperator);
        assert_eq!(
            m.pending(),
            Some(PendingOperation {
                operation: Operation::Add,
                left: 5.0
            })
        );
        assert_eq!(m.buffer(), "");
        assert_eq!(m.display(), "5");
        assert_eq!(m.pending_display().as_deref(), Some("5 +"));
    }

    #[test]
    fn test_chained_calculation() {
        let mut m = run("5+3+");
        assert_eq!(m.display(), "8");
        m.press_all(parse_key_script("2=").unwrap());
        assert_eq!(m.display(), "10");
    }

    #[test]
    fn test_chain_with_mixed_operators() {
        let m = run("2*3-4/2=");
        // (2*3 - 4) / 2, evaluated left to right
        assert_eq!(m.display(), "1");
    }

    #[test]
    fn test_power_key() {
        let m = run("2^10=");
        assert_eq!(m.display(), "1024");
    }

    #[test]
    fn test_non_integer_result() {
        let m = run("7/2=");
        assert_eq!(m.display(), "3.5");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let m = run("42=");
        assert_eq!(m.display(), "42");
        assert_eq!(m.buffer(), "42");
    }

    #[test]
    fn test_equals_without_right_operand_is_noop() {
        let m = run("5+=");
        assert_eq!(m.state(), InputState::PendingOperator);
        assert_eq!(m.display(), "5");
    }

    #[test]
    fn test_operator_on_empty_buffer_is_noop() {
        let m = run("+");
        assert!(m.pending().is_none());
        assert_eq!(m.state(), InputState::Idle);
    }

    #[test]
    fn test_result_feeds_next_operator() {
        let m = run("5+3=*2=");
        assert_eq!(m.display(), "16");
    }

    #[test]
    fn test_digit_after_result_starts_new_number() {
        let m = run("5+3=9");
        assert_eq!(m.buffer(), "9");
    }

    #[test]
    fn test_decimal_after_result_starts_new_number() {
        let m = run("5+3=.");
        assert_eq!(m.buffer(), "0.");
    }

    #[test]
    fn test_tape_records_evaluations() {
        let m = run("5+3+2=");
        assert_eq!(m.tape().len(), 2);
        assert_eq!(m.tape().last().unwrap().display(), "8 + 2 = 10");
    }

    #[test]
    fn test_tape_capacity() {
        let mut m = InputMachine::new().with_tape_capacity(1);
        m.press_all(parse_key_script("1+1=2+2=").unwrap());
        assert_eq!(m.tape().len(), 1);
        assert_eq!(m.tape().last().unwrap().result, 4.0);
    }

    // ===== Division by zero =====

    #[test]
    fn test_division_by_zero_shows_error() {
        let m = run("5/0=");
        assert_eq!(m.display(), DEFAULT_ERROR_TEXT);
        assert!(m.is_error());
        assert!(m.pending().is_none());
        assert_eq!(m.buffer(), "");
    }

    #[test]
    fn test_division_by_zero_in_chain() {
        let m = run("5/0+");
        assert!(m.is_error());
        assert!(m.pending().is_none());
    }

    #[test]
    fn test_error_then_digit_recovers() {
        let m = run("5/0=7");
        assert!(!m.is_error());
        assert_eq!(m.display(), "7");
    }

    #[test]
    fn test_custom_error_text() {
        let mut m = InputMachine::new().with_error_text("Cannot divide by zero");
        m.press_all(parse_key_script("1/0=").unwrap());
        assert_eq!(m.display(), "Cannot divide by zero");
        assert_eq!(m.error_text(), "Cannot divide by zero");
    }

    #[test]
    fn test_division_by_zero_not_on_tape() {
        let m = run("5/0=");
        assert!(m.tape().is_empty());
    }

    // ===== Clear and backspace =====

    #[test]
    fn test_clear_resets_everything_but_memory() {
        let mut m = run("9[MS][C]5+3");
        m.press(Key::Clear);
        assert_eq!(m.display(), "0");
        assert_eq!(m.buffer(), "");
        assert!(m.pending().is_none());
        assert_eq!(m.calculator().last_result(), 0.0);
        assert_eq!(m.calculator().memory(), 9.0);
        assert_eq!(m.state(), InputState::Idle);
    }

    #[test]
    fn test_clear_after_error() {
        let mut m = run("1/0=");
        m.press(Key::Clear);
        assert!(!m.is_error());
        assert_eq!(m.display(), "0");
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let m = run("123[DEL]");
        assert_eq!(m.buffer(), "12");
        assert_eq!(m.display(), "12");
    }

    #[test]
    fn test_backspace_single_char_shows_zero() {
        let m = run("5[DEL]");
        assert_eq!(m.buffer(), "");
        assert_eq!(m.display(), "0");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let m = run("[DEL]");
        assert_eq!(m.display(), "0");
    }

    #[test]
    fn test_backspace_does_not_edit_result() {
        let m = run("5+3=[DEL]");
        assert_eq!(m.display(), "8");
    }

    #[test]
    fn test_backspace_drops_dangling_minus() {
        let m = run("5[NEG][DEL]");
        assert_eq!(m.buffer(), "");
        assert_eq!(m.display(), "0");
    }

    // ===== Negate and percent =====

    #[test]
    fn test_negate_toggles() {
        let m = run("12[NEG]");
        assert_eq!(m.display(), "-12");
        let m = run("12[NEG][NEG]");
        assert_eq!(m.display(), "12");
    }

    #[test]
    fn test_negate_keeps_typed_decimals() {
        let m = run("1.50[NEG]");
        assert_eq!(m.buffer(), "-1.50");
    }

    #[test]
    fn test_negate_zero_or_empty_is_noop() {
        assert_eq!(run("[NEG]").display(), "0");
        assert_eq!(run("0[NEG]").buffer(), "0");
    }

    #[test]
    fn test_digits_after_negate_continue_number() {
        let m = run("5[NEG]6");
        assert_eq!(m.buffer(), "-56");
    }

    #[test]
    fn test_negative_operand_in_calculation() {
        let m = run("5[NEG]+3=");
        assert_eq!(m.display(), "-2");
    }

    #[test]
    fn test_percent() {
        let m = run("50%");
        assert_eq!(m.display(), "0.5");
    }

    #[test]
    fn test_percent_as_operand() {
        let m = run("200*50%=");
        assert_eq!(m.display(), "100");
    }

    // ===== Memory =====

    #[test]
    fn test_memory_store_and_recall() {
        let m = run("15[MS][C]4*3=[MR]");
        assert_eq!(m.display(), "15");
        assert_eq!(m.buffer(), "15");
    }

    #[test]
    fn test_memory_store_result() {
        let m = run("10+5=[MS][C][MR]");
        assert_eq!(m.display(), "15");
    }

    #[test]
    fn test_memory_clear() {
        let m = run("7[MS][MC][MR]");
        assert_eq!(m.display(), "0");
        assert!(!m.has_memory());
    }

    #[test]
    fn test_memory_store_with_empty_buffer_is_noop() {
        let m = run("[MS]");
        assert!(!m.has_memory());
    }

    #[test]
    fn test_memory_recall_as_right_operand() {
        let m = run("4[MS][C]10-[MR]=");
        assert_eq!(m.display(), "6");
    }

    #[test]
    fn test_has_memory() {
        let m = run("3[MS]");
        assert!(m.has_memory());
    }

    // ===== Special values =====

    #[test]
    fn test_nan_result_displayed() {
        let m = run("8[NEG]^.5=");
        assert_eq!(m.display(), "NaN");
        assert!(!m.is_error());
    }

    #[test]
    fn test_nan_is_not_negated() {
        let m = run("8[NEG]^.5=[NEG]");
        assert_eq!(m.display(), "NaN");
    }

    // ===== Property tests =====

    fn key_strategy() -> impl Strategy<Value = Key> {
        prop_oneof![
            (0u8..=9).prop_map(Key::Digit),
            Just(Key::Decimal),
            proptest::sample::select(Operation::ALL.to_vec()).prop_map(Key::Operator),
            Just(Key::Equals),
            Just(Key::Clear),
            Just(Key::Backspace),
            Just(Key::Negate),
            Just(Key::Percent),
            Just(Key::MemoryStore),
            Just(Key::MemoryRecall),
            Just(Key::MemoryClear),
        ]
    }

    proptest! {
        #[test]
        fn prop_buffer_has_at_most_one_point(keys in proptest::collection::vec(key_strategy(), 0..40)) {
            let mut m = InputMachine::new();
            m.press_all(keys);
            prop_assert!(m.buffer().matches('.').count() <= 1);
        }

        #[test]
        fn prop_display_never_empty(keys in proptest::collection::vec(key_strategy(), 0..40)) {
            let mut m = InputMachine::new();
            m.press_all(keys);
            prop_assert!(!m.display().is_empty());
        }

        #[test]
        fn prop_buffer_always_parses(keys in proptest::collection::vec(key_strategy(), 0..40)) {
            let mut m = InputMachine::new();
            m.press_all(keys);
            if !m.buffer().is_empty() {
                prop_assert!(m.buffer().parse::<f64>().is_ok(), "buffer {:?}", m.buffer());
            }
        }

        #[test]
        fn prop_pending_only_with_empty_buffer_after_operator(
            keys in proptest::collection::vec(key_strategy(), 0..40),
            op in proptest::sample::select(Operation::ALL.to_vec()),
        ) {
            let mut m = InputMachine::new();
            m.press_all(keys);
            let had_value = !m.buffer().is_empty() && !m.is_error();
            m.press(Key::Operator(op));
            if had_value && !m.is_error() {
                prop_assert_eq!(m.state(), InputState::PendingOperator);
            }
        }

        #[test]
        fn prop_clear_always_returns_to_idle(keys in proptest::collection::vec(key_strategy(), 0..40)) {
            let mut m = InputMachine::new();
            m.press_all(keys);
            m.press(Key::Clear);
            prop_assert_eq!(m.state(), InputState::Idle);
            prop_assert_eq!(m.display(), "0");
        }
    }
}
