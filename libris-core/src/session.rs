//! Search session: request lifecycle and derived view state.
//!
//! Every submission is tagged with a monotonically increasing generation.
//! Loading changes and settlements carrying anything but the latest
//! generation are discarded, so a slow earlier request can never overwrite
//! the result of a later one.

use crate::criteria::SearchCriteria;
use crate::result::{SearchFailure, SearchOutcome, SearchResult};
use serde::{Deserialize, Serialize};

/// Generation token handed out by [`SearchSession::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// What the result area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// No search has completed yet.
    Initial,
    /// The latest submission is in flight.
    Loading,
    HasResults,
    HasSuggestionsOnly,
    /// A search completed with nothing to show.
    Empty,
}

/// Callbacks fired when the session changes in a way the UI cares about.
pub trait SessionObserver {
    fn loading_changed(&mut self, _loading: bool) {}
    fn settled(&mut self, _result: &SearchResult, _failure: Option<&SearchFailure>) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    generation: u64,
    settled_generation: u64,
    loading: bool,
    has_searched: bool,
    pending_criteria: Option<SearchCriteria>,
    result: SearchResult,
    last_failure: Option<SearchFailure>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new submission. The previous result stays in memory but is
    /// hidden until this one settles.
    pub fn begin(&mut self, criteria: SearchCriteria, observer: &mut dyn SessionObserver) -> SearchTicket {
        self.generation += 1;
        self.pending_criteria = Some(criteria);
        self.set_loading_flag(true, observer);
        SearchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.generation && self.settled_generation < ticket.0
    }

    /// Apply a loading change reported by the executor. Ignored for stale
    /// tickets. Loading only ends through [`settle`](Self::settle), so a
    /// "loading off" report for the unsettled current ticket is ignored too.
    pub fn set_loading(&mut self, ticket: SearchTicket, loading: bool, observer: &mut dyn SessionObserver) -> bool {
        if !self.is_current(ticket) || !loading {
            return false;
        }
        self.set_loading_flag(loading, observer);
        true
    }

    /// Apply a settlement. Returns `false`, leaving the session untouched,
    /// when the ticket has been superseded or already settled.
    ///
    /// A failure is shown as an empty result for the submitted criteria and
    /// kept in [`last_failure`](Self::last_failure).
    pub fn settle(
        &mut self,
        ticket: SearchTicket,
        outcome: SearchOutcome,
        observer: &mut dyn SessionObserver,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let criteria = self.pending_criteria.take().unwrap_or_default();
        let (result, failure) = match outcome {
            Ok(result) => (result, None),
            Err(failure) => (SearchResult::empty(criteria), Some(failure)),
        };
        self.result = result;
        self.last_failure = failure;
        self.has_searched = true;
        self.settled_generation = ticket.0;
        self.set_loading_flag(false, observer);
        observer.settled(&self.result, self.last_failure.as_ref());
        true
    }

    pub fn view_state(&self) -> ViewState {
        if self.loading {
            return ViewState::Loading;
        }
        if !self.has_searched {
            return ViewState::Initial;
        }
        if !self.result.primary.is_empty() {
            ViewState::HasResults
        } else if !self.result.suggestions.is_empty() {
            ViewState::HasSuggestionsOnly
        } else {
            ViewState::Empty
        }
    }

    /// Last settled result, also while a newer search is loading.
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn last_failure(&self) -> Option<&SearchFailure> {
        self.last_failure.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn set_loading_flag(&mut self, loading: bool, observer: &mut dyn SessionObserver) {
        if self.loading != loading {
            self.loading = loading;
            observer.loading_changed(loading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{Author, BookRecord};

    #[derive(Default)]
    struct RecordingObserver {
        loading: Vec<bool>,
        settled: usize,
        failures: usize,
    }

    impl SessionObserver for RecordingObserver {
        fn loading_changed(&mut self, loading: bool) {
            self.loading.push(loading);
        }

        fn settled(&mut self, _result: &SearchResult, failure: Option<&SearchFailure>) {
            self.settled += 1;
            if failure.is_some() {
                self.failures += 1;
            }
        }
    }

    fn books(titles: &[&str]) -> Vec<BookRecord> {
        titles.iter().map(|t| BookRecord::new(*t)).collect()
    }

    fn result(primary: &[&str], suggestions: &[&str], criteria: SearchCriteria) -> SearchResult {
        SearchResult::new(books(primary), books(suggestions), criteria)
    }

    #[test]
    fn test_new_session_is_initial() {
        let session = SearchSession::new();
        assert_eq!(session.view_state(), ViewState::Initial);
        assert!(!session.has_searched());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_begin_enters_loading() {
        let mut session = SearchSession::new();
        let mut observer = RecordingObserver::default();
        let ticket = session.begin(SearchCriteria::new(), &mut observer);
        assert_eq!(ticket.generation(), 1);
        assert_eq!(session.view_state(), ViewState::Loading);
        assert_eq!(observer.loading, vec![true]);
    }

    #[test]
    fn test_empty_response_after_submission_is_empty() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;
        let ticket = session.begin(SearchCriteria::new(), &mut observer);
        assert!(session.settle(ticket, Ok(result(&[], &[], SearchCriteria::new())), &mut observer));
        assert_eq!(session.view_state(), ViewState::Empty);
    }

    #[test]
    fn test_results_and_suggestions_states() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;

        let first = session.begin(SearchCriteria::new(), &mut observer);
        session.settle(first, Ok(result(&["A", "B"], &[], SearchCriteria::new())), &mut observer);
        assert_eq!(session.view_state(), ViewState::HasResults);

        let second = session.begin(SearchCriteria::new(), &mut observer);
        session.settle(second, Ok(result(&[], &["C"], SearchCriteria::new())), &mut observer);
        assert_eq!(session.view_state(), ViewState::HasSuggestionsOnly);
    }

    #[test]
    fn test_previous_result_retained_while_loading() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;
        let first = session.begin(SearchCriteria::new(), &mut observer);
        session.settle(first, Ok(result(&["A"], &[], SearchCriteria::new())), &mut observer);

        session.begin(SearchCriteria::new().with_keyword("next"), &mut observer);
        assert_eq!(session.view_state(), ViewState::Loading);
        assert_eq!(session.result().primary[0].title, "A");
    }

    #[test]
    fn test_stale_settlement_is_discarded() {
        let mut session = SearchSession::new();
        let mut observer = RecordingObserver::default();
        let gen1 = session.begin(SearchCriteria::new().with_keyword("one"), &mut observer);
        let gen2 = session.begin(SearchCriteria::new().with_keyword("two"), &mut observer);

        let second = result(&["Two"], &[], SearchCriteria::new().with_keyword("two"));
        assert!(session.settle(gen2, Ok(second.clone()), &mut observer));

        let first = result(&["One"], &["Late"], SearchCriteria::new().with_keyword("one"));
        assert!(!session.settle(gen1, Ok(first), &mut observer));

        assert_eq!(session.result(), &second);
        assert_eq!(session.view_state(), ViewState::HasResults);
        assert_eq!(observer.settled, 1);
    }

    #[test]
    fn test_stale_settlement_does_not_end_loading() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;
        let gen1 = session.begin(SearchCriteria::new(), &mut observer);
        let _gen2 = session.begin(SearchCriteria::new(), &mut observer);

        assert!(!session.settle(gen1, Ok(result(&["One"], &[], SearchCriteria::new())), &mut observer));
        assert!(!session.set_loading(gen1, false, &mut observer));
        assert_eq!(session.view_state(), ViewState::Loading);
    }

    #[test]
    fn test_loading_off_before_settlement_keeps_loading() {
        let mut session = SearchSession::new();
        let mut observer = RecordingObserver::default();
        let first = session.begin(SearchCriteria::new(), &mut observer);
        session.settle(first, Ok(result(&["Old"], &[], SearchCriteria::new())), &mut observer);

        let second = session.begin(SearchCriteria::new().with_keyword("next"), &mut observer);
        assert!(!session.set_loading(second, false, &mut observer));
        assert_eq!(session.view_state(), ViewState::Loading);
        assert!(session.is_loading());

        assert!(session.settle(second, Ok(result(&[], &["New"], SearchCriteria::new())), &mut observer));
        assert_eq!(session.view_state(), ViewState::HasSuggestionsOnly);
        assert_eq!(observer.loading, vec![true, false, true, false]);
    }

    #[test]
    fn test_first_search_never_falls_back_to_initial() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;
        let ticket = session.begin(SearchCriteria::new(), &mut observer);
        session.set_loading(ticket, true, &mut observer);
        session.set_loading(ticket, false, &mut observer);
        assert_eq!(session.view_state(), ViewState::Loading);
    }

    #[test]
    fn test_double_settlement_is_ignored() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;
        let ticket = session.begin(SearchCriteria::new(), &mut observer);
        assert!(session.settle(ticket, Ok(result(&["A"], &[], SearchCriteria::new())), &mut observer));
        assert!(!session.settle(ticket, Ok(result(&[], &[], SearchCriteria::new())), &mut observer));
        assert_eq!(session.view_state(), ViewState::HasResults);
    }

    #[test]
    fn test_failure_renders_as_empty_with_submitted_criteria() {
        let mut session = SearchSession::new();
        let mut observer = RecordingObserver::default();
        let criteria = SearchCriteria::new().with_keyword("whale");
        let ticket = session.begin(criteria.clone(), &mut observer);
        session.settle(
            ticket,
            Err(SearchFailure::Transport("connection refused".to_string())),
            &mut observer,
        );

        assert_eq!(session.view_state(), ViewState::Empty);
        assert_eq!(session.result().criteria, criteria);
        assert!(session.last_failure().is_some());
        assert_eq!(observer.failures, 1);
        assert_eq!(observer.loading, vec![true, false]);
    }

    #[test]
    fn test_success_clears_previous_failure() {
        let mut session = SearchSession::new();
        let mut observer = NoopObserver;
        let first = session.begin(SearchCriteria::new(), &mut observer);
        session.settle(first, Err(SearchFailure::Timeout(5_000)), &mut observer);

        let second = session.begin(SearchCriteria::new(), &mut observer);
        let mut book = BookRecord::new("Dracula");
        book.authors.push(Author::new("Stoker, Bram"));
        let settled = SearchResult::new(vec![book], Vec::new(), SearchCriteria::new());
        session.settle(second, Ok(settled), &mut observer);
        assert!(session.last_failure().is_none());
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::book::BookRecord;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: whatever order settlements arrive in, the session shows
        /// the latest submission's result
        #[test]
        fn prop_last_submission_wins(
            arrival in (1usize..8).prop_flat_map(|count| Just((0..count).collect::<Vec<usize>>()).prop_shuffle())
        ) {
            let count = arrival.len();
            let mut session = SearchSession::new();
            let mut observer = NoopObserver;
            let tickets: Vec<SearchTicket> = (0..count)
                .map(|i| session.begin(SearchCriteria::new().with_keyword(format!("q{}", i)), &mut observer))
                .collect();

            for idx in arrival {
                let criteria = SearchCriteria::new().with_keyword(format!("q{}", idx));
                let outcome = SearchResult::new(vec![BookRecord::new(format!("book{}", idx))], Vec::new(), criteria);
                session.settle(tickets[idx], Ok(outcome), &mut observer);
            }

            let last = count - 1;
            prop_assert_eq!(session.result().primary[0].title.clone(), format!("book{}", last));
            prop_assert_eq!(session.view_state(), ViewState::HasResults);
        }
    }
}
