//! Display mappings for book records. Pure functions, no state.

use crate::book::BookRecord;
use crate::criteria::SearchCriteria;

pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_COVER: &str = "No Cover Found";
pub const READ_ACTION: &str = "Read the book";
pub const NO_BOOKS_FOUND: &str = "No books found";
pub const INITIAL_TITLE: &str = "Search your favorite books";
pub const INITIAL_HINT: &str =
    "Use the search forms above to discover books by title, author, or keyword";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cover {
    Image(String),
    Placeholder,
}

impl Cover {
    pub fn label(&self) -> &str {
        match self {
            Cover::Image(url) => url,
            Cover::Placeholder => NO_COVER,
        }
    }
}

/// Compact representation shown in a result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCard {
    pub cover: Cover,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLine {
    pub name: String,
    pub lifespan: Option<String>,
}

impl AuthorLine {
    pub fn render(&self) -> String {
        match &self.lifespan {
            Some(lifespan) => format!("{} {}", self.name, lifespan),
            None => self.name.clone(),
        }
    }
}

/// Everything shown when a card is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub authors: Vec<AuthorLine>,
    pub subjects: Option<String>,
    pub languages: Option<String>,
    pub downloads: Option<u64>,
    pub read_url: Option<String>,
}

impl DetailView {
    /// Label/value rows in display order, skipping absent sections.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        for (idx, author) in self.authors.iter().enumerate() {
            let label = if idx == 0 { "Authors" } else { "" };
            fields.push((label, author.render()));
        }
        if let Some(subjects) = &self.subjects {
            fields.push(("Subjects", subjects.clone()));
        }
        if let Some(languages) = &self.languages {
            fields.push(("Languages", languages.clone()));
        }
        if let Some(downloads) = self.downloads {
            fields.push(("Downloads", downloads.to_string()));
        }
        if let Some(url) = &self.read_url {
            fields.push((READ_ACTION, url.clone()));
        }
        fields
    }
}

pub fn present_card(book: &BookRecord) -> DisplayCard {
    let cover = match &book.cover_image_url {
        Some(url) if !url.trim().is_empty() => Cover::Image(url.clone()),
        _ => Cover::Placeholder,
    };
    let author = book
        .first_author()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    DisplayCard {
        cover,
        title: book.title.clone(),
        author,
    }
}

pub fn present_detail(book: &BookRecord) -> DetailView {
    let authors = book
        .authors
        .iter()
        .map(|a| AuthorLine {
            name: a.name.clone(),
            lifespan: a.lifespan(),
        })
        .collect();
    let languages: Vec<&str> = book.languages.iter().map(|l| l.code.as_str()).collect();
    DetailView {
        title: book.title.clone(),
        authors,
        subjects: join_non_empty(&book.subjects),
        languages: join_non_empty(&languages),
        // zero downloads is treated as absent
        downloads: book.download_count.filter(|count| *count > 0),
        read_url: book
            .full_text_url
            .clone()
            .filter(|url| !url.trim().is_empty()),
    }
}

pub fn results_heading(count: usize) -> String {
    format!("Results ({} books found)", count)
}

pub fn suggestions_heading(count: usize) -> String {
    format!("You Might Also Like ({} books)", count)
}

/// "Related to ..." line for the criteria a result was produced with.
pub fn related_line(criteria: &SearchCriteria) -> Option<String> {
    criteria
        .related_terms()
        .map(|terms| format!("Related to {}", terms))
}

fn join_non_empty<S: AsRef<str>>(items: &[S]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(
            items
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
