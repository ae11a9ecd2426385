use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::{DefaultTerminal, Frame};

use crate::error::Result;
use crate::fmt::money;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

// Same green/red the web charts use.
pub const INCOME_STYLE: Style = Style::new().fg(Color::Rgb(63, 185, 80));
pub const EXPENSE_STYLE: Style = Style::new().fg(Color::Rgb(229, 83, 75));

/// Money amount as a styled span. The sign picks the color and is then
/// dropped, so expenses read as red magnitudes.
pub fn money_span(amount: f64) -> Span<'static> {
    if amount < 0.0 {
        Span::styled(money(-amount), EXPENSE_STYLE)
    } else {
        Span::styled(money(amount), INCOME_STYLE)
    }
}

pub enum ViewAction {
    Continue,
    Close,
}

pub trait TuiView {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
}

/// Drive a view in the alternate screen until it closes. The panic hook
/// restores the terminal first so a draw panic does not wedge the shell.
pub fn run_view(view: &mut dyn TuiView) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, view);
    drop(terminal);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, view: &mut dyn TuiView) -> Result<()> {
    loop {
        terminal.draw(|frame| view.draw(frame))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if ctrl_c || matches!(view.handle_key(key.code), ViewAction::Close) {
            return Ok(());
        }
    }
}
