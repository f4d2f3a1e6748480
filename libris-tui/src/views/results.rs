//! Result area: initial, loading, empty and list states.

use crate::nav::Focus;
use crate::state::App;
use crate::theme::view_state_color;
use crate::widgets::StatusIndicator;
use libris_core::presenter::{
    related_line, results_heading, suggestions_heading, INITIAL_HINT, INITIAL_TITLE,
    NO_BOOKS_FOUND,
};
use libris_core::{present_card, Cover, SearchResult, ViewState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// One line of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRow {
    Heading(String),
    Related(String),
    /// `index` counts primary results first, then suggestions.
    Card {
        index: usize,
        title: String,
        author: String,
        cover: Cover,
    },
}

/// Rows for a settled result: the primary section with its heading and
/// "Related to" line, then the suggestions section.
pub fn result_rows(result: &SearchResult) -> Vec<ResultRow> {
    let mut rows = Vec::new();
    let mut index = 0;

    if !result.primary.is_empty() {
        rows.push(ResultRow::Heading(results_heading(result.primary.len())));
        if let Some(related) = related_line(&result.criteria) {
            rows.push(ResultRow::Related(related));
        }
        for book in &result.primary {
            rows.push(card_row(index, book));
            index += 1;
        }
    }

    if !result.suggestions.is_empty() {
        rows.push(ResultRow::Heading(suggestions_heading(result.suggestions.len())));
        for book in &result.suggestions {
            rows.push(card_row(index, book));
            index += 1;
        }
    }
    rows
}

fn card_row(index: usize, book: &libris_core::BookRecord) -> ResultRow {
    let card = present_card(book);
    ResultRow::Card {
        index,
        title: card.title,
        author: card.author,
        cover: card.cover,
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let state = app.view_state();
    let color = view_state_color(state, &app.theme);
    match state {
        ViewState::Initial => StatusIndicator {
            title: "Results".to_string(),
            status: INITIAL_TITLE.to_string(),
            detail: Some(INITIAL_HINT.to_string()),
            style: Style::default().fg(color),
        }
        .render(f, area),
        ViewState::Loading => StatusIndicator {
            title: "Results".to_string(),
            status: format!("{} Searching...", app.spinner_frame()),
            detail: None,
            style: Style::default().fg(color),
        }
        .render(f, area),
        ViewState::Empty => StatusIndicator {
            title: "Results".to_string(),
            status: NO_BOOKS_FOUND.to_string(),
            detail: app.session.last_failure().map(|failure| failure.to_string()),
            style: Style::default().fg(color),
        }
        .render(f, area),
        ViewState::HasResults | ViewState::HasSuggestionsOnly => render_list(f, app, area),
    }
}

fn render_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = result_rows(app.session.result());
    let theme = &app.theme;

    let mut selected_row = None;
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| match row {
            ResultRow::Heading(text) => ListItem::new(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ))),
            ResultRow::Related(text) => ListItem::new(Line::from(Span::styled(
                text.clone(),
                Style::default().fg(theme.text_dim),
            ))),
            ResultRow::Card {
                index,
                title,
                author,
                cover,
            } => {
                if app.selected == Some(*index) {
                    selected_row = Some(row_idx);
                }
                let mut spans = vec![
                    Span::styled(format!("  {}", title), Style::default().fg(theme.text)),
                    Span::styled(format!("  {}", author), Style::default().fg(theme.secondary)),
                ];
                if *cover == Cover::Placeholder {
                    spans.push(Span::styled(
                        format!("  [{}]", cover.label()),
                        Style::default().fg(theme.text_dim),
                    ));
                }
                ListItem::new(Line::from(spans))
            }
        })
        .collect();

    let mut state = ListState::default();
    if app.focus == Focus::Results {
        state.select(selected_row);
    }

    let border = if app.focus == Focus::Results {
        theme.border_focus
    } else {
        theme.border
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title("Results")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().bg(theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}
