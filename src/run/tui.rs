use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

use crate::advice::InsightDispatcher;
use crate::models::EXPENSE_CATEGORIES;
use crate::store::AppState;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long to wait for a key before checking on background insights.
const TICK: Duration = Duration::from_millis(200);

pub(crate) fn as_tui(state: &mut AppState, insights: InsightDispatcher) -> Result<()> {
    let mut app = App::new(insights);
    state.subscribe(Box::new(app.view_observer()));
    app.refresh(state);
    if !app.insights.is_configured() {
        app.set_status("AI insights disabled: no API key configured");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("tui started");
    let result = run_app(&mut terminal, &mut app, state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.insights.cancel();
    info!("tui stopped");

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    state: &mut AppState,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, two borders, one header row
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.show_help {
                    app.show_help = false;
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => handle_normal_input(key, app, state)?,
                    InputMode::Command => handle_command_input(key, app, state)?,
                    InputMode::Editing => handle_editing_input(key, app, state),
                    InputMode::Confirm => handle_confirm_input(key, app, state),
                }
            }
        }

        app.poll_insights();
        app.refresh_if_stale(state, Local::now().date_naive());
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, state: &mut AppState) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            commands::handle_command("quit", app, state)?;
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
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Char('3') => app.screen = Screen::Budgets,
        KeyCode::Char('4') => app.screen = Screen::Insights,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.screen = screens[prev];
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('a') => {
            app.input_mode = InputMode::Command;
            app.command_input = "add ".into();
        }
        KeyCode::Char('e') if app.screen == Screen::Transactions => {
            commands::handle_command("edit", app, state)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete", app, state)?;
        }
        KeyCode::Enter if app.screen == Screen::Budgets => {
            if let Some(cat) = EXPENSE_CATEGORIES.get(app.budget_index) {
                let current = app
                    .budgets
                    .limit_for(cat.value)
                    .map(|limit| limit.to_string())
                    .unwrap_or_default();
                app.input_mode = InputMode::Command;
                app.command_input = format!("budget {} {current}", cat.value);
            }
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, state: &mut AppState) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, state)?;
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
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Some(id) = app.editing_id.take() {
                commands::apply_edit(&id, &input, app, state);
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.editing_id = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            commands::confirm_pending(app, state);
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Cursor movement ──────────────────────────────────────────

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Budgets => scroll_down(
            &mut app.budget_index,
            &mut app.budget_scroll,
            EXPENSE_CATEGORIES.len(),
            page,
        ),
        Screen::Insights => {
            app.insight_scroll = app.insight_scroll.saturating_add(1);
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Insights => {
            app.insight_scroll = app.insight_scroll.saturating_sub(1);
        }
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll)
        }
        Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Insights => app.insight_scroll = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Budgets => scroll_to_bottom(
            &mut app.budget_index,
            &mut app.budget_scroll,
            EXPENSE_CATEGORIES.len(),
            page,
        ),
        Screen::Insights => {
            let lines = app
                .insight_text
                .as_deref()
                .map(|t| t.lines().count())
                .unwrap_or(0);
            app.insight_scroll = u16::try_from(lines.saturating_sub(page)).unwrap_or(u16::MAX);
        }
        Screen::Dashboard => {}
    }
}
