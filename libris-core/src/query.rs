//! Query construction for the catalog endpoints.
//!
//! Which fields a mode sends, and which companion match-type parameter goes
//! with each of them, is described by a static per-mode rule table. The
//! builder only walks the table; it never fails, it only decides inclusion.

use crate::criteria::SearchCriteria;
use crate::enums::{FieldMatchType, Language, SearchField, SearchMode};
use crate::error::QueryParseError;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const LISTING_PATH: &str = "/server/books/";
pub const SIMILARITY_PATH: &str = "/data/books/keywords/cosine-similarity/";

/// Backend endpoint targeted by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Filtered, sorted listing with suggestions.
    Listing,
    /// TF-IDF cosine similarity over a keyword.
    Similarity,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Listing => LISTING_PATH,
            Endpoint::Similarity => SIMILARITY_PATH,
        }
    }

    pub fn from_path(path: &str) -> Option<Endpoint> {
        let trimmed = path.trim().trim_end_matches('/');
        [Endpoint::Listing, Endpoint::Similarity]
            .into_iter()
            .find(|e| e.path().trim_end_matches('/') == trimmed)
    }

    fn name(&self) -> &'static str {
        match self {
            Endpoint::Listing => "listing",
            Endpoint::Similarity => "similarity",
        }
    }
}

/// A fully resolved GET request: endpoint plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Form-urlencoded query string in parameter order.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Absolute URL against the catalog base, e.g. `http://localhost:8000`.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            self.endpoint.path(),
            self.query_string()
        )
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompanionPolicy {
    Never,
    Always,
    /// Only sent when the match type is `Regex`; literal is the server default.
    RegexOnly,
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: SearchField,
    param: &'static str,
    companion: &'static str,
    policy: CompanionPolicy,
}

#[derive(Debug)]
struct ModeRules {
    endpoint: Endpoint,
    listing_options: bool,
    required: Option<SearchField>,
    fields: &'static [FieldRule],
}

const AUTHOR_PARAM: &str = "author_name";
const AUTHOR_TYPE_PARAM: &str = "author_name_type";
const TITLE_PARAM: &str = "title";
const TITLE_TYPE_PARAM: &str = "title_name_type";
const KEYWORD_PARAM: &str = "keyword";
const KEYWORD_TYPE_PARAM: &str = "keyword_type";
const SORT_PARAM: &str = "sort";
const ORDER_PARAM: &str = "ord";
const LANGUAGES_PARAM: &str = "languages";

const fn rule(
    field: SearchField,
    param: &'static str,
    companion: &'static str,
    policy: CompanionPolicy,
) -> FieldRule {
    FieldRule {
        field,
        param,
        companion,
        policy,
    }
}

static SIMPLE_RULES: ModeRules = ModeRules {
    endpoint: Endpoint::Listing,
    listing_options: true,
    required: None,
    fields: &[
        rule(SearchField::Author, AUTHOR_PARAM, AUTHOR_TYPE_PARAM, CompanionPolicy::Never),
        rule(SearchField::Title, TITLE_PARAM, TITLE_TYPE_PARAM, CompanionPolicy::Never),
        rule(SearchField::Keyword, KEYWORD_PARAM, KEYWORD_TYPE_PARAM, CompanionPolicy::Never),
    ],
};

static ADVANCED_RULES: ModeRules = ModeRules {
    endpoint: Endpoint::Listing,
    listing_options: true,
    required: None,
    fields: &[
        rule(SearchField::Author, AUTHOR_PARAM, AUTHOR_TYPE_PARAM, CompanionPolicy::Always),
        rule(SearchField::Title, TITLE_PARAM, TITLE_TYPE_PARAM, CompanionPolicy::Always),
        rule(SearchField::Keyword, KEYWORD_PARAM, KEYWORD_TYPE_PARAM, CompanionPolicy::Always),
    ],
};

static COSINE_RULES: ModeRules = ModeRules {
    endpoint: Endpoint::Similarity,
    listing_options: false,
    required: Some(SearchField::Keyword),
    fields: &[rule(
        SearchField::Keyword,
        KEYWORD_PARAM,
        KEYWORD_TYPE_PARAM,
        CompanionPolicy::RegexOnly,
    )],
};

fn rules_for(mode: SearchMode) -> &'static ModeRules {
    match mode {
        SearchMode::Simple => &SIMPLE_RULES,
        SearchMode::Advanced => &ADVANCED_RULES,
        SearchMode::CosineSimilarity => &COSINE_RULES,
    }
}

// ============================================================================
// BUILD
// ============================================================================

/// Build the request for `mode`. Returns `None` when the mode's required
/// field is missing, in which case nothing should be submitted.
pub fn build_request(mode: SearchMode, criteria: &SearchCriteria) -> Option<RequestDescriptor> {
    let rules = rules_for(mode);
    if let Some(required) = rules.required {
        criteria.present(required)?;
    }

    let mut params: Vec<(String, String)> = Vec::new();
    if rules.listing_options {
        params.push((SORT_PARAM.into(), criteria.sort_key.as_wire_str().into()));
        params.push((ORDER_PARAM.into(), criteria.sort_order.as_wire_str().into()));
        if criteria.language != Language::All {
            params.push((LANGUAGES_PARAM.into(), criteria.language.as_wire_str().into()));
        }
    }

    for rule in rules.fields {
        let Some(value) = criteria.present(rule.field) else {
            continue;
        };
        params.push((rule.param.into(), value.trim().to_string()));
        let match_type = criteria.match_types.get(rule.field);
        let send_companion = match rule.policy {
            CompanionPolicy::Never => false,
            CompanionPolicy::Always => true,
            CompanionPolicy::RegexOnly => match_type == FieldMatchType::Regex,
        };
        if send_companion {
            params.push((rule.companion.into(), match_type.as_wire_str().into()));
        }
    }

    Some(RequestDescriptor {
        endpoint: rules.endpoint,
        params,
    })
}

// ============================================================================
// PARSE
// ============================================================================

/// Criteria recovered from a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub mode: SearchMode,
    pub criteria: SearchCriteria,
}

/// Inverse of [`build_request`]. A listing query carrying any match-type
/// parameter is `Advanced`, otherwise `Simple`; a missing `languages`
/// parameter means [`Language::All`]. Parameters not produced by the builder
/// are rejected.
pub fn parse_query(path: &str, query: &str) -> Result<ParsedQuery, QueryParseError> {
    let endpoint =
        Endpoint::from_path(path).ok_or_else(|| QueryParseError::UnknownEndpoint(path.to_string()))?;
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    match endpoint {
        Endpoint::Listing => parse_listing(&pairs),
        Endpoint::Similarity => parse_similarity(&pairs),
    }
}

/// Parse a full URL or `path?query` string produced by [`RequestDescriptor::url`].
pub fn parse_url(url: &str) -> Result<ParsedQuery, QueryParseError> {
    let (location, query) = url.split_once('?').unwrap_or((url, ""));
    let path = match location.find("://") {
        Some(scheme_end) => {
            let rest = &location[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => location,
    };
    parse_query(path, query)
}

fn parse_listing(pairs: &[(String, String)]) -> Result<ParsedQuery, QueryParseError> {
    let mut criteria = SearchCriteria::new().with_language(Language::All);
    let mut saw_sort = false;
    let mut saw_order = false;
    let mut advanced = false;

    for (name, value) in pairs {
        match name.as_str() {
            SORT_PARAM => {
                criteria.sort_key = value.parse()?;
                saw_sort = true;
            }
            ORDER_PARAM => {
                criteria.sort_order = value.parse()?;
                saw_order = true;
            }
            LANGUAGES_PARAM => criteria.language = value.parse()?,
            _ => {
                if let Some(rule) = ADVANCED_RULES.fields.iter().find(|r| r.param == name.as_str()) {
                    criteria.set(rule.field, Some(value.clone()));
                } else if let Some(rule) = ADVANCED_RULES.fields.iter().find(|r| r.companion == name.as_str()) {
                    criteria.match_types.set(rule.field, parse_match_type(rule.companion, value)?);
                    advanced = true;
                } else {
                    return Err(QueryParseError::UnexpectedParameter {
                        endpoint: Endpoint::Listing.name(),
                        param: name.clone(),
                    });
                }
            }
        }
    }

    if !saw_sort {
        return Err(QueryParseError::MissingParameter(SORT_PARAM));
    }
    if !saw_order {
        return Err(QueryParseError::MissingParameter(ORDER_PARAM));
    }

    let mode = if advanced {
        SearchMode::Advanced
    } else {
        SearchMode::Simple
    };
    Ok(ParsedQuery { mode, criteria })
}

fn parse_similarity(pairs: &[(String, String)]) -> Result<ParsedQuery, QueryParseError> {
    let mut criteria = SearchCriteria::new();
    for (name, value) in pairs {
        match name.as_str() {
            KEYWORD_PARAM => criteria.keyword = Some(value.clone()),
            KEYWORD_TYPE_PARAM => {
                criteria.match_types.keyword = parse_match_type(KEYWORD_TYPE_PARAM, value)?
            }
            _ => {
                return Err(QueryParseError::UnexpectedParameter {
                    endpoint: Endpoint::Similarity.name(),
                    param: name.clone(),
                })
            }
        }
    }
    if criteria.present(SearchField::Keyword).is_none() {
        return Err(QueryParseError::MissingParameter(KEYWORD_PARAM));
    }
    Ok(ParsedQuery {
        mode: SearchMode::CosineSimilarity,
        criteria,
    })
}

fn parse_match_type(param: &'static str, value: &str) -> Result<FieldMatchType, QueryParseError> {
    FieldMatchType::from_wire_str(value).ok_or_else(|| QueryParseError::InvalidValue {
        param,
        value: value.to_string(),
    })
}
