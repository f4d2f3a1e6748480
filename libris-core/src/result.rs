//! Normalized search results and failures.

use crate::book::BookRecord;
use crate::criteria::SearchCriteria;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a completed search, whatever endpoint produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchResult {
    pub primary: Vec<BookRecord>,
    pub suggestions: Vec<BookRecord>,
    /// Criteria the search was submitted with. Display context is derived
    /// from here, not from the live form.
    pub criteria: SearchCriteria,
}

impl SearchResult {
    pub fn new(
        primary: Vec<BookRecord>,
        suggestions: Vec<BookRecord>,
        criteria: SearchCriteria,
    ) -> Self {
        Self {
            primary,
            suggestions,
            criteria,
        }
    }

    /// Safe-empty rendering used when a search fails.
    pub fn empty(criteria: SearchCriteria) -> Self {
        Self::new(Vec::new(), Vec::new(), criteria)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.suggestions.is_empty()
    }
}

/// Why a search did not produce a result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchFailure {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Unreadable response: {0}")]
    Decode(String),
}

/// What a settled search hands to the session.
pub type SearchOutcome = Result<SearchResult, SearchFailure>;
