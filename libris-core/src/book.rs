//! Book records as returned by the catalog service.

use serde::{Deserialize, Serialize};

/// A single book from the catalog. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookRecord {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub languages: Vec<BookLanguage>,
    #[serde(default)]
    pub download_count: Option<u64>,
    #[serde(default, rename = "cover_image")]
    pub cover_image_url: Option<String>,
    #[serde(default, rename = "plain_text")]
    pub full_text_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLanguage {
    pub code: String,
}

impl BookRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    pub fn first_author(&self) -> Option<&Author> {
        self.authors.first()
    }
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_year: None,
            death_year: None,
        }
    }

    pub fn with_years(mut self, birth: i32, death: i32) -> Self {
        self.birth_year = Some(birth);
        self.death_year = Some(death);
        self
    }

    /// "(birth - death)" when both years are known.
    pub fn lifespan(&self) -> Option<String> {
        match (self.birth_year, self.death_year) {
            (Some(birth), Some(death)) => Some(format!("({} - {})", birth, death)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_catalog_field_names() {
        let json = r#"{
            "id": 84,
            "title": "Frankenstein",
            "authors": [{"name": "Shelley, Mary", "birth_year": 1797, "death_year": 1851}],
            "subjects": ["Science fiction", "Monsters -- Fiction"],
            "languages": [{"code": "en"}],
            "download_count": 71234,
            "cover_image": "https://example.org/84.jpg",
            "plain_text": "https://example.org/84.txt"
        }"#;
        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book.title, "Frankenstein");
        assert_eq!(book.authors[0].lifespan().as_deref(), Some("(1797 - 1851)"));
        assert_eq!(book.languages[0].code, "en");
        assert_eq!(book.download_count, Some(71234));
        assert_eq!(book.cover_image_url.as_deref(), Some("https://example.org/84.jpg"));
        assert_eq!(book.full_text_url.as_deref(), Some("https://example.org/84.txt"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let book: BookRecord = serde_json::from_str(r#"{"title": "Untitled"}"#).unwrap();
        assert!(book.authors.is_empty());
        assert!(book.subjects.is_empty());
        assert!(book.languages.is_empty());
        assert!(book.download_count.is_none());
    }

    #[test]
    fn test_lifespan_requires_both_years() {
        let mut author = Author::new("Anonymous");
        author.birth_year = Some(1800);
        assert!(author.lifespan().is_none());
    }
}
