//! Keypad grid for the terminal front end
//!
//! Two layouts share one 5x4 grid and one state machine:
//!
//! ```text
//! Standard               Memory
//! [ C ][ ± ][ % ][ ÷ ]   [MC ][MR ][MS ][ C ]
//! [ 7 ][ 8 ][ 9 ][ × ]   [ 7 ][ 8 ][ 9 ][ ÷ ]
//! [ 4 ][ 5 ][ 6 ][ − ]   [ 4 ][ 5 ][ 6 ][ × ]
//! [ 1 ][ 2 ][ 3 ][ + ]   [ 1 ][ 2 ][ 3 ][ − ]
//! [ 0 ][ . ][ = ][ ⌫ ]   [ 0 ][ . ][ = ][ + ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};
use serde::{Deserialize, Serialize};

use crate::core::Operation;
use crate::input::Key;

const ROWS: usize = 5;
const COLS: usize = 4;

/// Available keypad layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeypadLayout {
    /// Clear, sign, percent and the four operators
    #[default]
    Standard,
    /// Memory keys in place of sign and percent
    Memory,
}

impl KeypadLayout {
    /// Human readable layout name
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Memory => "Memory",
        }
    }

    /// Keys in row-major order
    #[must_use]
    pub const fn keys(&self) -> [Key; ROWS * COLS] {
        use Key::{
            Backspace, Clear, Decimal, Digit, Equals, MemoryClear, MemoryRecall, MemoryStore,
            Negate, Operator, Percent,
        };
        use Operation::{Add, Divide, Multiply, Subtract};

        match self {
            Self::Standard => [
                Clear,
                Negate,
                Percent,
                Operator(Divide),
                Digit(7),
                Digit(8),
                Digit(9),
                Operator(Multiply),
                Digit(4),
                Digit(5),
                Digit(6),
                Operator(Subtract),
                Digit(1),
                Digit(2),
                Digit(3),
                Operator(Add),
                Digit(0),
                Decimal,
                Equals,
                Backspace,
            ],
            Self::Memory => [
                MemoryClear,
                MemoryRecall,
                MemoryStore,
                Clear,
                Digit(7),
                Digit(8),
                Digit(9),
                Operator(Divide),
                Digit(4),
                Digit(5),
                Digit(6),
                Operator(Multiply),
                Digit(1),
                Digit(2),
                Digit(3),
                Operator(Subtract),
                Digit(0),
                Decimal,
                Equals,
                Operator(Add),
            ],
        }
    }
}

impl std::fmt::Display for KeypadLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Key this button sends
    pub key: Key,
    /// Whether the button is highlighted as the last one pressed
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates an unpressed button for `key`
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }

    /// Text printed on the button
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.key.label()
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    fn style(&self) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match self.key {
            Key::Digit(_) | Key::Decimal => Style::default().fg(Color::White),
            Key::Operator(_) => Style::default().fg(Color::Yellow),
            Key::Equals => Style::default().fg(Color::Green),
            Key::Clear => Style::default().fg(Color::Red),
            Key::MemoryStore | Key::MemoryRecall | Key::MemoryClear => {
                Style::default().fg(Color::Magenta)
            }
            Key::Backspace | Key::Negate | Key::Percent => Style::default().fg(Color::Cyan),
        }
    }
}

/// A 5x4 grid of buttons
#[derive(Debug, Clone)]
pub struct Keypad {
    layout: KeypadLayout,
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(KeypadLayout::default())
    }
}

impl Keypad {
    /// Creates a keypad with the given layout
    #[must_use]
    pub fn new(layout: KeypadLayout) -> Self {
        Self {
            layout,
            buttons: layout.keys().into_iter().map(KeypadButton::new).collect(),
        }
    }

    /// Layout of this keypad
    #[must_use]
    pub fn layout(&self) -> KeypadLayout {
        self.layout
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (ROWS, COLS)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < ROWS && col < COLS {
            self.buttons.get(row * COLS + col)
        } else {
            None
        }
    }

    /// Finds the button sending `key`
    #[must_use]
    pub fn find_button(&self, key: Key) -> Option<usize> {
        self.buttons.iter().position(|b| b.key == key)
    }

    /// Sets a button as pressed by index
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights only the button for `key`, if this layout has one
    pub fn highlight(&mut self, key: Key) {
        self.release_all();
        if let Some(idx) = self.find_button(key) {
            self.press_button(idx);
        }
    }

    /// Returns the highlighted button, if any
    #[must_use]
    pub fn highlighted(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, btn)| ((i / COLS, i % COLS), btn))
    }

    /// Converts a click position inside `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let (btn_width, btn_height) = Self::cell_size(area)?;
        let col = usize::from((rel_x - 1) / btn_width);
        let row = usize::from((rel_y - 1) / btn_height);

        if row < ROWS && col < COLS {
            Some(row * COLS + col)
        } else {
            None
        }
    }

    /// Returns the key under a click position
    #[must_use]
    pub fn key_at(&self, area: Rect, x: u16, y: u16) -> Option<Key> {
        self.hit_test(area, x, y)
            .and_then(|idx| self.get_button(idx))
            .map(|b| b.key)
    }

    /// Screen position at the center of a button, the inverse of [`Self::hit_test`]
    #[must_use]
    pub fn button_center(&self, area: Rect, index: usize) -> Option<(u16, u16)> {
        if index >= self.buttons.len() {
            return None;
        }
        let (btn_width, btn_height) = Self::cell_size(area)?;
        let col = (index % COLS) as u16;
        let row = (index / COLS) as u16;
        Some((
            area.x + 1 + col * btn_width + btn_width / 2,
            area.y + 1 + row * btn_height + btn_height / 2,
        ))
    }

    fn cell_size(area: Rect) -> Option<(u16, u16)> {
        let btn_width = area.width.saturating_sub(2) / COLS as u16;
        let btn_height = area.height.saturating_sub(2) / ROWS as u16;
        if btn_width == 0 || btn_height == 0 {
            None
        } else {
            Some((btn_width, btn_height))
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(format!(" Keypad · {} ", self.keypad.layout()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let Some((btn_width, btn_height)) = Keypad::cell_size(area) else {
            return;
        };

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            let label = format!("[{}]", btn.label());
            let label_width = label.chars().count() as u16;
            if btn_width < label_width {
                continue;
            }
            let label_x = x + (btn_width - label_width) / 2;
            let label_y = y + btn_height / 2;

            if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(
                    label_x,
                    label_y,
                    &Span::styled(label, btn.style()),
                    btn_width,
                );
            }
        }
    }
}
