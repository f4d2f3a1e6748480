//! Detail panel widget for label/value rows.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    pub label_style: Style,
    pub value_style: Style,
    pub border_style: Style,
    /// Shown in place of the rows when there are none.
    pub empty_message: &'a str,
}

impl<'a> DetailPanel<'a> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        if self.fields.is_empty() {
            return vec![Line::from(Span::styled(
                self.empty_message.to_string(),
                self.value_style,
            ))];
        }
        let width = self
            .fields
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        self.fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{:<width$}  ", label, width = width), self.label_style),
                    Span::styled(value.clone(), self.value_style),
                ])
            })
            .collect()
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let widget = Paragraph::new(Text::from(self.lines()))
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(self.border_style),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(widget, area);
    }
}
