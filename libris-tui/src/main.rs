//! Libris TUI entry point.

use chrono::Utc;
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use libris_tui::api_client::SearchExecutor;
use libris_tui::config::TuiConfig;
use libris_tui::dispatch::spawn_search;
use libris_tui::error::TuiError;
use libris_tui::events::TuiEvent;
use libris_tui::keys::map_key;
use libris_tui::notifications::NotificationLevel;
use libris_tui::persistence;
use libris_tui::state::{App, AppCommand};
use libris_tui::telemetry;
use libris_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    telemetry::init_logging(&config)?;
    let executor = SearchExecutor::new(&config)?;
    let mut app = App::new(config);

    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.restore(&state),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring unreadable UI state");
            app.notify(NotificationLevel::Warning, format!("Saved state ignored: {}", err));
        }
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(Utc::now()),
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &executor, &event_tx, event) {
                    break;
                }
                // Drain queued events before the next redraw.
                let mut quit = false;
                while let Ok(event) = event_rx.try_recv() {
                    if handle_event(&mut app, &executor, &event_tx, event) {
                        quit = true;
                        break;
                    }
                }
                if quit {
                    break;
                }
            }
        }
    }

    if let Err(err) = persistence::save(&app.config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "Failed to save UI state");
    }
    tracing::info!("Libris TUI exiting");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Apply one event. Returns `true` when the app should exit.
fn handle_event(
    app: &mut App,
    executor: &SearchExecutor,
    sender: &mpsc::Sender<TuiEvent>,
    event: TuiEvent,
) -> bool {
    match event {
        TuiEvent::Input(key) => {
            let Some(action) = map_key(key) else {
                return false;
            };
            match app.handle_action(action) {
                AppCommand::Quit => return true,
                AppCommand::Dispatch(submission) => {
                    spawn_search(
                        executor.clone(),
                        submission.ticket,
                        submission.request,
                        submission.criteria,
                        sender.clone(),
                    );
                }
                AppCommand::Continue => {}
            }
        }
        TuiEvent::Loading { ticket, loading } => app.apply_loading(ticket, loading),
        TuiEvent::Settled { ticket, outcome } => {
            app.apply_settlement(ticket, *outcome);
        }
        TuiEvent::Resize { width, height } => {
            tracing::trace!(width, height, "Terminal resized");
        }
    }
    false
}
