//! Libris Core - Search Orchestration
//!
//! Query construction, response normalization, the search session state
//! machine and display mappings for the book catalog client. No I/O lives
//! here; the terminal client in `libris-tui` performs the network calls.

pub mod book;
pub mod criteria;
pub mod enums;
pub mod error;
pub mod presenter;
pub mod query;
pub mod response;
pub mod result;
pub mod session;

pub use book::{Author, BookLanguage, BookRecord};
pub use criteria::{MatchTypes, SearchCriteria};
pub use enums::{cycle, FieldMatchType, Language, SearchField, SearchMode, SortKey, SortOrder};
pub use error::QueryParseError;
pub use presenter::{present_card, present_detail, Cover, DetailView, DisplayCard};
pub use query::{build_request, parse_query, parse_url, Endpoint, ParsedQuery, RequestDescriptor};
pub use response::{normalize, CatalogResponse};
pub use result::{SearchFailure, SearchOutcome, SearchResult};
pub use session::{NoopObserver, SearchSession, SearchTicket, SessionObserver, ViewState};
