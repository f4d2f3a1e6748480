//! Row of selectable options, used for mode tabs and option pickers.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub active: bool,
}

impl FilterOption {
    /// Options for every label, marking the one equal to `active`.
    pub fn from_labels<'l>(labels: impl IntoIterator<Item = &'l str>, active: &str) -> Vec<Self> {
        labels
            .into_iter()
            .map(|label| FilterOption {
                label: label.to_string(),
                active: label == active,
            })
            .collect()
    }
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub active_style: Style,
    pub inactive_style: Style,
    pub border_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn line(&self) -> Line<'static> {
        let spans: Vec<Span> = self
            .filters
            .iter()
            .map(|filter| {
                let style = if filter.active {
                    self.active_style
                } else {
                    self.inactive_style
                };
                Span::styled(format!(" {} ", filter.label), style)
            })
            .collect();
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.line()).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
