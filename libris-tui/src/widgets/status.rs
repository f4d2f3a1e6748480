//! Single-line status box.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct StatusIndicator {
    pub title: String,
    pub status: String,
    pub detail: Option<String>,
    pub style: Style,
}

impl StatusIndicator {
    pub fn text(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}\n\n{}", self.status, detail),
            None => self.status.clone(),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.text())
            .style(self.style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.title.as_str())
                    .borders(Borders::ALL),
            );
        f.render_widget(paragraph, area);
    }
}
