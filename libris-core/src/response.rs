//! Wire shapes of the two endpoints and their normalization.
//!
//! The listing endpoint answers `{"result": [...], "suggestions": [...]}`.
//! The similarity endpoint answers a bare array of books; an object with
//! `result` and no `suggestions` is accepted as well. Everything downstream
//! sees a single [`SearchResult`].

use crate::book::BookRecord;
use crate::criteria::SearchCriteria;
use crate::result::{SearchFailure, SearchResult};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogResponse {
    Listing {
        #[serde(default)]
        result: Vec<BookRecord>,
        #[serde(default)]
        suggestions: Vec<BookRecord>,
    },
    Flat(Vec<BookRecord>),
}

impl CatalogResponse {
    pub fn into_result(self, criteria: SearchCriteria) -> SearchResult {
        match self {
            CatalogResponse::Listing {
                result,
                suggestions,
            } => SearchResult::new(result, suggestions, criteria),
            CatalogResponse::Flat(books) => SearchResult::new(books, Vec::new(), criteria),
        }
    }
}

/// Decode a response body and normalize it.
pub fn normalize(body: &[u8], criteria: SearchCriteria) -> Result<SearchResult, SearchFailure> {
    let response: CatalogResponse =
        serde_json::from_slice(body).map_err(|e| SearchFailure::Decode(e.to_string()))?;
    Ok(response.into_result(criteria))
}
