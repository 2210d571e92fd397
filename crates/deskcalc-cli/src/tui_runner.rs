//! Interactive terminal loop

use std::io;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deskcalc::tui::{keypad_area, render, CalculatorApp, InputHandler};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Runs the keypad until the user quits
pub fn run(config: &CliConfig) -> CliResult<()> {
    let mut app = CalculatorApp::with_machine(config.input_machine(), config.layout);
    tracing::info!(layout = %config.layout, "starting terminal keypad");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!(display = app.machine().display(), "terminal keypad closed");
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    let input_handler = InputHandler::new();

    while !app.should_quit() {
        let area = terminal.draw(|f| render(app, f))?.area;

        match event::read()? {
            Event::Key(key) => app.handle_action(input_handler.handle_key(key)),
            Event::Mouse(mouse) => handle_mouse(app, area, mouse),
            _ => {}
        }
    }

    Ok(())
}

fn handle_mouse(app: &mut CalculatorApp, screen: Rect, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if !app.click(keypad_area(screen), mouse.column, mouse.row) {
        tracing::trace!(x = mouse.column, y = mouse.row, "click missed keypad");
    }
}
