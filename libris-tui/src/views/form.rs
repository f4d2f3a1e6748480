//! Search form panel.

use crate::nav::{Focus, FormField};
use crate::state::{App, SearchForm};
use crate::theme::match_type_color;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Plain text of one form row, without styling.
pub fn row_text(form: &SearchForm, field: FormField, focused: bool) -> String {
    let criteria = &form.criteria;
    match field {
        FormField::Text(text_field) => {
            let cursor = if focused { "_" } else { "" };
            format!("{}: {}{}", field.title(), form.value(text_field), cursor)
        }
        FormField::Language => format!("{}: < {} >", field.title(), criteria.language.label()),
        FormField::Sort => format!("{}: < {} >", field.title(), criteria.sort_key.label()),
        FormField::Order => format!("{}: < {} >", field.title(), criteria.sort_order.label()),
        FormField::Submit => format!("[ {} ]", field.title()),
    }
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let form = app.form();
    let fields = app.fields();
    let form_focused = matches!(app.focus, Focus::Form(_));

    let items: Vec<ListItem> = fields
        .iter()
        .map(|field| {
            let focused = app.focus == Focus::Form(*field);
            let mut spans = vec![Span::styled(
                row_text(form, *field, focused),
                Style::default().fg(app.theme.text),
            )];
            if let FormField::Text(text_field) = field {
                if form.mode.has_match_types() {
                    let match_type = form.criteria.match_types.get(*text_field);
                    spans.push(Span::styled(
                        format!("  [{}]", match_type.label()),
                        Style::default().fg(match_type_color(match_type, &app.theme)),
                    ));
                }
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    if let Focus::Form(field) = app.focus {
        state.select(fields.iter().position(|f| *f == field));
    }

    let border = if form_focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title(app.mode.title())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(
            Style::default()
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchDefaults;
    use libris_core::{Language, SearchField, SearchMode, SortKey, SortOrder};

    fn form() -> SearchForm {
        SearchForm::new(
            SearchMode::Advanced,
            &SearchDefaults {
                language: Language::Fr,
                sort_key: SortKey::Closeness,
                sort_order: SortOrder::Descending,
            },
        )
    }

    #[test]
    fn test_text_row_shows_cursor_when_focused() {
        let mut form = form();
        form.push_char(SearchField::Title, 'E');
        let field = FormField::Text(SearchField::Title);
        assert_eq!(row_text(&form, field, true), "Title: E_");
        assert_eq!(row_text(&form, field, false), "Title: E");
    }

    #[test]
    fn test_option_rows_show_labels() {
        let form = form();
        assert_eq!(row_text(&form, FormField::Language, false), "Language: < French >");
        assert!(row_text(&form, FormField::Order, false).contains("Descending"));
        assert_eq!(row_text(&form, FormField::Submit, false), "[ Search ]");
    }
}
