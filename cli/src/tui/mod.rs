pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use macrobudget_core::{AppConfig, FileStore, KeyValueStore, MacroTracker};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::notifier::{NotifyMode, TerminalNotifier};
use crate::tui::app::{App, InputMode};

const TICK_RATE: Duration = Duration::from_millis(250);

pub fn run(config: &AppConfig, tracker: MacroTracker<FileStore>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let notifier = TerminalNotifier::new(NotifyMode::Collect, config.reminders_enabled);
    let mut app = App::new(config, tracker, notifier);
    let res = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Left | KeyCode::Char('h') => app.move_left(),
                KeyCode::Right | KeyCode::Char('l') => app.move_right(),
                KeyCode::Enter | KeyCode::Char('e') => app.enter_edit_mode(),
                KeyCode::Char('x') | KeyCode::Delete => app.clear_cell(),
                KeyCode::Char('C') => app.request_clear(),
                KeyCode::Char('n') => app.dismiss_notification(),
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Enter | KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                _ => {}
            },
            InputMode::ConfirmClear => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear(),
                _ => app.exit_input_mode(),
            },
        }
    }
}
