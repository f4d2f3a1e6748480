//! Enum types for search criteria and modes.
//!
//! Every enum that travels over the wire has an `as_wire_str`/`from_wire_str`
//! pair matching the catalog service's query vocabulary.

use crate::error::QueryParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SEARCH MODES
// ============================================================================

/// The three mutually exclusive ways of querying the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SearchMode {
    /// Literal search over keyword, title and author.
    #[default]
    Simple,
    /// Keyword, title and author each with their own match type.
    Advanced,
    /// TF-IDF cosine similarity over a single keyword.
    CosineSimilarity,
}

impl SearchMode {
    pub fn all() -> &'static [SearchMode] {
        &[
            SearchMode::Simple,
            SearchMode::Advanced,
            SearchMode::CosineSimilarity,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SearchMode::Simple => "Simple Search",
            SearchMode::Advanced => "Advanced Search",
            SearchMode::CosineSimilarity => "TF-IDF Cosine",
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn next(&self) -> SearchMode {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> SearchMode {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }

    /// Fields the user can fill in for this mode.
    pub fn fields(&self) -> &'static [SearchField] {
        match self {
            SearchMode::Simple | SearchMode::Advanced => {
                &[SearchField::Keyword, SearchField::Title, SearchField::Author]
            }
            SearchMode::CosineSimilarity => &[SearchField::Keyword],
        }
    }

    /// Whether the user picks a match type per field.
    pub fn has_match_types(&self) -> bool {
        !matches!(self, SearchMode::Simple)
    }

    /// Whether language and sort options apply.
    pub fn has_listing_options(&self) -> bool {
        !matches!(self, SearchMode::CosineSimilarity)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchMode::Simple => "simple",
            SearchMode::Advanced => "advanced",
            SearchMode::CosineSimilarity => "cosine",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for SearchMode {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "simple" => Ok(SearchMode::Simple),
            "advanced" => Ok(SearchMode::Advanced),
            "cosine" | "cosinesimilarity" | "tfidf" => Ok(SearchMode::CosineSimilarity),
            _ => Err(QueryParseError::InvalidValue {
                param: "mode",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// FIELDS AND MATCH TYPES
// ============================================================================

/// A free-text field of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    Keyword,
    Title,
    Author,
}

impl SearchField {
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Keyword => "Keyword",
            SearchField::Title => "Title",
            SearchField::Author => "Author",
        }
    }
}

/// How the server interprets a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FieldMatchType {
    /// Case-insensitive substring match.
    #[default]
    #[serde(rename = "classique")]
    Literal,
    #[serde(rename = "regex")]
    Regex,
}

impl FieldMatchType {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            FieldMatchType::Literal => "classique",
            FieldMatchType::Regex => "regex",
        }
    }

    pub fn from_wire_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classique" | "literal" => Some(FieldMatchType::Literal),
            "regex" => Some(FieldMatchType::Regex),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            FieldMatchType::Literal => FieldMatchType::Regex,
            FieldMatchType::Regex => FieldMatchType::Literal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldMatchType::Literal => "Classique",
            FieldMatchType::Regex => "Regex",
        }
    }
}

impl fmt::Display for FieldMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for FieldMatchType {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_str(s).ok_or_else(|| QueryParseError::InvalidValue {
            param: "match_type",
            value: s.to_string(),
        })
    }
}

// ============================================================================
// LISTING OPTIONS
// ============================================================================

/// Language filter of the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    #[default]
    En,
    /// No language filter.
    All,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::Fr, Language::En, Language::All]
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Fr => "French",
            Language::En => "English",
            Language::All => "All",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for Language {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            "all" => Ok(Language::All),
            _ => Err(QueryParseError::InvalidValue {
                param: "languages",
                value: s.to_string(),
            }),
        }
    }
}

/// Ranking used to order listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DownloadCount,
    Closeness,
    Betweenness,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[SortKey::DownloadCount, SortKey::Closeness, SortKey::Betweenness]
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            SortKey::DownloadCount => "download_count",
            SortKey::Closeness => "closeness",
            SortKey::Betweenness => "betweenness",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DownloadCount => "Download Count",
            SortKey::Closeness => "Closeness",
            SortKey::Betweenness => "Betweenness",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "download_count" => Ok(SortKey::DownloadCount),
            "closeness" => Ok(SortKey::Closeness),
            "betweenness" => Ok(SortKey::Betweenness),
            _ => Err(QueryParseError::InvalidValue {
                param: "sort",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn all() -> &'static [SortOrder] {
        &[SortOrder::Ascending, SortOrder::Descending]
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            _ => Err(QueryParseError::InvalidValue {
                param: "ord",
                value: s.to_string(),
            }),
        }
    }
}

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Step to the next (or previous) entry of a closed set, wrapping around.
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let Some(idx) = all.iter().position(|v| *v == current) else {
        return current;
    };
    let len = all.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    all[next]
}
