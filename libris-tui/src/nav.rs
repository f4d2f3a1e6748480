//! Focus navigation across the form and the result list.

use libris_core::{SearchField, SearchMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Text(SearchField),
    Language,
    Sort,
    Order,
    Submit,
}

impl FormField {
    pub fn title(&self) -> &'static str {
        match self {
            FormField::Text(field) => field.label(),
            FormField::Language => "Language",
            FormField::Sort => "Sort by",
            FormField::Order => "Order",
            FormField::Submit => "Search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Results,
}

/// Form rows in display order for `mode`.
pub fn form_fields(mode: SearchMode) -> Vec<FormField> {
    let mut fields: Vec<FormField> = mode.fields().iter().copied().map(FormField::Text).collect();
    if mode.has_listing_options() {
        fields.extend([FormField::Language, FormField::Sort, FormField::Order]);
    }
    fields.push(FormField::Submit);
    fields
}

/// Field after `current` in `mode`, or `None` past the last row.
pub fn next_field(mode: SearchMode, current: FormField) -> Option<FormField> {
    let fields = form_fields(mode);
    let idx = fields.iter().position(|f| *f == current)?;
    fields.get(idx + 1).copied()
}

/// Field before `current`, or `None` above the first row.
pub fn previous_field(mode: SearchMode, current: FormField) -> Option<FormField> {
    let fields = form_fields(mode);
    let idx = fields.iter().position(|f| *f == current)?;
    idx.checked_sub(1).and_then(|i| fields.get(i).copied())
}

pub fn first_field(mode: SearchMode) -> FormField {
    form_fields(mode)
        .first()
        .copied()
        .unwrap_or(FormField::Submit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_form_has_keyword_only() {
        assert_eq!(
            form_fields(SearchMode::CosineSimilarity),
            vec![FormField::Text(SearchField::Keyword), FormField::Submit]
        );
    }

    #[test]
    fn test_listing_forms_carry_options() {
        let fields = form_fields(SearchMode::Advanced);
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[3], FormField::Language);
        assert_eq!(*fields.last().unwrap(), FormField::Submit);
    }

    #[test]
    fn test_next_and_previous_stop_at_edges() {
        let mode = SearchMode::Simple;
        assert_eq!(next_field(mode, FormField::Submit), None);
        assert_eq!(previous_field(mode, first_field(mode)), None);
        assert_eq!(
            next_field(mode, FormField::Text(SearchField::Keyword)),
            Some(FormField::Text(SearchField::Title))
        );
    }
}
