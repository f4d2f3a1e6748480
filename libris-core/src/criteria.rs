//! Structured search criteria, independent of the active mode.

use crate::enums::{FieldMatchType, Language, SearchField, SortKey, SortOrder};
use serde::{Deserialize, Serialize};

/// Match type per free-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchTypes {
    pub keyword: FieldMatchType,
    pub title: FieldMatchType,
    pub author: FieldMatchType,
}

impl MatchTypes {
    pub fn get(&self, field: SearchField) -> FieldMatchType {
        match field {
            SearchField::Keyword => self.keyword,
            SearchField::Title => self.title,
            SearchField::Author => self.author,
        }
    }

    pub fn set(&mut self, field: SearchField, match_type: FieldMatchType) {
        match field {
            SearchField::Keyword => self.keyword = match_type,
            SearchField::Title => self.title = match_type,
            SearchField::Author => self.author = match_type,
        }
    }
}

/// Everything a search form can express. Fields irrelevant to the active
/// mode are ignored by the query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub match_types: MatchTypes,
    pub language: Language,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_match_type(mut self, field: SearchField, match_type: FieldMatchType) -> Self {
        self.match_types.set(field, match_type);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = key;
        self.sort_order = order;
        self
    }

    pub fn raw(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Keyword => self.keyword.as_deref(),
            SearchField::Title => self.title.as_deref(),
            SearchField::Author => self.author.as_deref(),
        }
    }

    /// The field value when it holds something other than whitespace.
    pub fn present(&self, field: SearchField) -> Option<&str> {
        self.raw(field).filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, field: SearchField, value: Option<String>) {
        match field {
            SearchField::Keyword => self.keyword = value,
            SearchField::Title => self.title = value,
            SearchField::Author => self.author = value,
        }
    }

    /// Human-readable summary of the free-text terms, e.g.
    /// `keyword "whale", author "Melville"`.
    pub fn related_terms(&self) -> Option<String> {
        let terms: Vec<String> = [SearchField::Keyword, SearchField::Title, SearchField::Author]
            .iter()
            .filter_map(|field| {
                self.present(*field)
                    .map(|value| format!("{} \"{}\"", field.label().to_ascii_lowercase(), value))
            })
            .collect();
        if terms.is_empty() {
            None
        } else {
            Some(terms.join(", "))
        }
    }
}
