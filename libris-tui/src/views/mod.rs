//! View rendering dispatch.

pub mod detail;
pub mod form;
pub mod results;

use crate::keys::HELP_LINES;
use crate::state::App;
use crate::theme::notification_color;
use crate::widgets::{DetailPanel, FilterBar, FilterOption};
use libris_core::SearchMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const FOOTER_HELP: &str = "Tab mode • ↑/↓ move • ←/→ options • Ctrl-T regex • Enter search/open • F1 help • Ctrl-C quit";

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(layout[1]);
    form::render(f, app, body[0]);
    results::render(f, app, body[1]);

    render_footer(f, app, layout[2]);

    if app.detail_open {
        detail::render(f, app, f.size());
    }
    if app.help_open {
        render_help(f, app, f.size());
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let tabs = FilterOption::from_labels(
        SearchMode::all().iter().map(|mode| mode.title()),
        app.mode.title(),
    );
    let bar = FilterBar {
        title: "Libris",
        filters: &tabs,
        active_style: Style::default()
            .fg(app.theme.bg)
            .bg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
        inactive_style: Style::default().fg(app.theme.text_dim),
        border_style: Style::default().fg(app.theme.border),
    };
    bar.render(f, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.notifications.last() {
        Some(note) => (
            note.render(),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (
            FOOTER_HELP.to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);
    let panel = DetailPanel {
        title: "Keybindings",
        fields: HELP_LINES
            .iter()
            .map(|(keys, description)| (*keys, description.to_string()))
            .collect(),
        label_style: Style::default().fg(app.theme.primary),
        value_style: Style::default().fg(app.theme.text),
        border_style: Style::default().fg(app.theme.border_focus),
        empty_message: "",
    };
    panel.render(f, popup);
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Action;
    use crate::state::test_support::test_config;
    use crate::state::AppCommand;
    use libris_core::{BookRecord, SearchResult};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_view(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_initial_screen_shows_tabs_and_prompt() {
        let app = App::new(test_config());
        let text = screen(&app);
        assert!(text.contains("Simple Search"));
        assert!(text.contains("TF-IDF Cosine"));
        assert!(text.contains("Search your favorite books"));
    }

    #[test]
    fn test_results_screen_and_detail_popup() {
        let mut app = App::new(test_config());
        let AppCommand::Dispatch(submission) = app.handle_action(Action::Confirm) else {
            panic!("expected dispatch");
        };
        let result = SearchResult::new(
            vec![BookRecord::new("Moby Dick")],
            Vec::new(),
            submission.criteria,
        );
        app.apply_settlement(submission.ticket, Ok(result));
        let text = screen(&app);
        assert!(text.contains("Results (1 books found)"));
        assert!(text.contains("Unknown author"));

        app.focus = crate::nav::Focus::Results;
        app.selected = Some(0);
        app.handle_action(Action::Confirm);
        assert!(app.detail_open);
        let text = screen(&app);
        assert!(text.contains("No details available"));
    }

    #[test]
    fn test_empty_screen_mentions_failure() {
        let mut app = App::new(test_config());
        let AppCommand::Dispatch(submission) = app.handle_action(Action::Confirm) else {
            panic!("expected dispatch");
        };
        app.apply_settlement(
            submission.ticket,
            Err(libris_core::SearchFailure::Timeout(5_000)),
        );
        let text = screen(&app);
        assert!(text.contains("No books found"));
        assert!(text.contains("timed out"));
    }
}
