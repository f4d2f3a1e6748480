//! Book detail popup.

use crate::state::App;
use crate::widgets::DetailPanel;
use libris_core::{present_card, present_detail, BookRecord, Cover};
use ratatui::{layout::Rect, style::Style, widgets::Clear, Frame};

/// Rows of the popup: the detail view plus the cover location.
pub fn detail_fields(book: &BookRecord) -> Vec<(&'static str, String)> {
    let mut fields = present_detail(book).fields();
    if let Cover::Image(url) = present_card(book).cover {
        fields.push(("Cover", url));
    }
    fields
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(book) = app.selected_book() else {
        return;
    };
    let popup = super::centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let title = present_detail(book).title;
    let panel = DetailPanel {
        title: &title,
        fields: detail_fields(book),
        label_style: Style::default().fg(app.theme.secondary),
        value_style: Style::default().fg(app.theme.text),
        border_style: Style::default().fg(app.theme.border_focus),
        empty_message: "No details available",
    };
    panel.render(f, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::Author;

    #[test]
    fn test_fields_include_cover_url() {
        let mut book = BookRecord::new("Emma").with_author(Author::new("Jane Austen").with_years(1775, 1817));
        book.cover_image_url = Some("http://covers.test/emma.jpg".to_string());
        book.download_count = Some(0);
        let fields = detail_fields(&book);

        assert_eq!(fields[0], ("Authors", "Jane Austen (1775 - 1817)".to_string()));
        assert!(!fields.iter().any(|(label, _)| *label == "Downloads"));
        assert_eq!(
            fields.last(),
            Some(&("Cover", "http://covers.test/emma.jpg".to_string()))
        );
    }

    #[test]
    fn test_bare_book_has_no_rows() {
        assert!(detail_fields(&BookRecord::new("Untitled")).is_empty());
    }
}
