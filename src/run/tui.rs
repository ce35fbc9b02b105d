use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::models::Table;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(table: Table, config: &Config) -> Result<()> {
    let mut app = App::new(table, config);
    tracing::info!(records = app.table.len(), "starting interactive session");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "interactive session failed");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app),
                InputMode::Command => handle_command_input(key, app),
                InputMode::Search => handle_search_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input = app.selection.search.clone();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('1') => app.screen = Screen::Overview,
        KeyCode::Char('2') => app.screen = Screen::Timeline,
        KeyCode::Char('3') => app.screen = Screen::Vendors,
        KeyCode::Char('4') => app.screen = Screen::Details,
        KeyCode::Tab => app.screen = app.screen.next(),
        KeyCode::BackTab => app.screen = app.screen.prev(),
        KeyCode::Char('s') => app.cycle_sector(true),
        KeyCode::Char('S') => app.cycle_sector(false),
        KeyCode::Char('v') => app.cycle_vendor(true),
        KeyCode::Char('V') => app.cycle_vendor(false),
        KeyCode::Char('y') => app.cycle_year(true),
        KeyCode::Char('Y') => app.cycle_year(false),
        KeyCode::Char('m') => app.cycle_month(true),
        KeyCode::Char('M') => app.cycle_month(false),
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.detail_index, &mut app.detail_scroll),
        KeyCode::Char('G') => {
            let len = app.dashboard.details.rows.len();
            scroll_to_bottom(
                &mut app.detail_index,
                &mut app.detail_scroll,
                len,
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
            if !app.selection.search.is_empty() {
                apply_search(app, String::new());
            }
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app) {
                tracing::debug!(command = %input, error = %e, "command failed");
                app.set_status(format!("Error: {e}"));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_search_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            apply_search(app, String::new());
        }
        KeyCode::Backspace => {
            // Live search: filter as you type
            let mut term = app.search_input.clone();
            term.pop();
            apply_search(app, term);
        }
        KeyCode::Char(c) => {
            let mut term = app.search_input.clone();
            term.push(c);
            apply_search(app, term);
        }
        _ => {}
    }
}

fn apply_search(app: &mut App, term: String) {
    app.search_input = term.clone();
    let selection = app.selection.clone().with_search(term);
    app.set_selection(selection);
}

// ── Navigation helpers ───────────────────────────────────────

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Details {
        let len = app.dashboard.details.rows.len();
        scroll_down(
            &mut app.detail_index,
            &mut app.detail_scroll,
            len,
            app.visible_rows.max(1),
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Details {
        scroll_up(&mut app.detail_index, &mut app.detail_scroll);
    }
}
