//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Number of tape lines shown, newest first
const TAPE_LINES: usize = 10;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Returns where the keypad is drawn for a terminal of size `area`.
///
/// Mouse handling uses this to hit-test clicks against the same grid
/// the renderer drew.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    horizontal_layout(area)[1]
}

fn horizontal_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(24),    // Display and tape
            Constraint::Length(30), // Keypad
            Constraint::Length(24), // Help sidebar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn create_layout(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Display
                Constraint::Length(3), // Pending operation
                Constraint::Min(3),    // Tape
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let machine = self.app.machine();

        let style = if machine.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        let title = if machine.has_memory() {
            " Display · M "
        } else {
            " Display "
        };

        Paragraph::new(Span::styled(machine.display(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_pending(&self, area: Rect, buf: &mut Buffer) {
        let text = self.app.machine().pending_display().unwrap_or_default();

        Paragraph::new(Span::styled(text, Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Pending ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_tape(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .machine()
            .tape()
            .iter_rev()
            .take(TAPE_LINES)
            .map(|entry| {
                ListItem::new(Span::styled(
                    entry.display(),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Tape (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help_sidebar(area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>9}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(format!(" {APP_TITLE} · {} ", self.app.layout()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main_area, pad_area, help_area] = horizontal_layout(area);
        let [display_area, pending_area, tape_area] = Self::create_layout(main_area);

        self.render_display(display_area, buf);
        self.render_pending(pending_area, buf);
        self.render_tape(tape_area, buf);
        KeypadWidget::new(self.app.keypad()).render(pad_area, buf);
        Self::render_help_sidebar(help_area, buf);
    }
}

/// Application title shown on the outer border
pub const APP_TITLE: &str = "deskcalc";

/// Keyboard shortcuts shown in the help sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("+ - * /", "Operators"),
    ("^", "Power"),
    ("Enter =", "Evaluate"),
    ("Bksp Del", "Backspace"),
    ("Esc", "Clear"),
    ("n", "Negate"),
    ("%", "Percent"),
    ("m", "Mem store"),
    ("r", "Mem recall"),
    ("l", "Mem clear"),
    ("Click", "Press button"),
    ("q Ctrl+C", "Quit"),
];
