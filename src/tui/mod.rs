// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, provider completions)
// - Routing keys to App actions per view

mod app;
mod clipboard;
mod components;
mod input;
mod layout;
mod theme;
mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::provider::SharedProvider;
use crate::session::{Completions, SessionDriver, View};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the TUI until the user quits
///
/// Sets up the terminal, runs the event loop, and restores the terminal even
/// when the loop fails.
pub async fn run_tui(provider: SharedProvider, log_buffer: LogBuffer, config: Config) -> Result<()> {
    let (driver, mut completions) = SessionDriver::new(provider);
    let mut app = App::new(driver, log_buffer, &config);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut completions).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// `tokio::select!` wakes on whichever comes first: keyboard input, the
/// redraw tick (spinner, toast expiry, new log lines), or a provider
/// completion.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    completions: &mut Completions,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(completion) = completions.recv() => {
                app.on_completion(completion);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → View-specific
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Terminals that report releases would otherwise trigger twice
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.should_quit = true;
        return;
    }

    match app.view() {
        View::Search => handle_search_keys(app, key_event.code),
        View::Results => handle_results_keys(app, key_event.code),
        View::Editor if app.editing_custom_tone => handle_custom_tone_keys(app, key_event.code),
        View::Editor => handle_editor_keys(app, key_event.code),
    }
}

/// Search view: characters are text, so only non-character keys act
fn handle_search_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.analyze(),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left | KeyCode::Right
            if app.form.focus == input::SearchField::Device =>
        {
            app.form.toggle_device()
        }
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.insert(c),
        _ => {}
    }
}

fn handle_results_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_topic(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_topic(),
        KeyCode::Enter => app.select_topic(),
        KeyCode::Char('g') => app.open_editor(),
        KeyCode::PageDown => app.results_scroll = app.results_scroll.saturating_add(5),
        KeyCode::PageUp => app.results_scroll = app.results_scroll.saturating_sub(5),
        KeyCode::Char('h') | KeyCode::Esc => app.go_home(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_editor_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('g') => app.generate(),
        KeyCode::Char('t') => app.cycle_tone(),
        KeyCode::Char('e') => app.edit_custom_tone(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_words(true),
        KeyCode::Char('-') => app.adjust_words(false),
        KeyCode::Char(']') => app.adjust_images(true),
        KeyCode::Char('[') => app.adjust_images(false),
        KeyCode::Char('m') => app.toggle_media(),
        KeyCode::Char('i') => app.toggle_image_source(),
        KeyCode::Char('b') => app.toggle_table(),
        KeyCode::Char('y') => app.copy_article(),
        KeyCode::Char('w') => app.export_article(),
        KeyCode::Down | KeyCode::Char('j') => {
            app.article_scroll = app.article_scroll.saturating_add(1)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.article_scroll = app.article_scroll.saturating_sub(1)
        }
        KeyCode::PageDown => app.article_scroll = app.article_scroll.saturating_add(10),
        KeyCode::PageUp => app.article_scroll = app.article_scroll.saturating_sub(10),
        KeyCode::Esc => app.back_to_dashboard(),
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_custom_tone_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc => app.editing_custom_tone = false,
        KeyCode::Backspace => app.custom_tone_backspace(),
        KeyCode::Char(c) => app.custom_tone_input(c),
        _ => {}
    }
}
