//! Application state: search forms, focus, the search session and
//! notifications.
//!
//! `App` performs no I/O. Key actions come in through [`App::handle_action`];
//! anything needing the network goes back out as an [`AppCommand`].

use crate::config::{SearchDefaults, TuiConfig};
use crate::keys::Action;
use crate::nav::{first_field, form_fields, next_field, previous_field, Focus, FormField};
use crate::notifications::{Notification, NotificationAction, NotificationLevel, MAX_NOTIFICATIONS};
use crate::persistence::PersistedState;
use crate::theme::LibrisTheme;
use chrono::{DateTime, Utc};
use libris_core::{
    build_request, cycle, parse_url, BookRecord, Language, RequestDescriptor, SearchCriteria,
    SearchFailure, SearchField, SearchMode, SearchOutcome, SearchResult, SearchSession,
    SearchTicket, SessionObserver, SortKey, SortOrder, ViewState,
};

pub const SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];

// ============================================================================
// SEARCH FORM
// ============================================================================

/// Editable criteria for one search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub mode: SearchMode,
    pub criteria: SearchCriteria,
}

impl SearchForm {
    pub fn new(mode: SearchMode, defaults: &SearchDefaults) -> Self {
        Self {
            mode,
            criteria: defaults.criteria(),
        }
    }

    pub fn value(&self, field: SearchField) -> &str {
        self.criteria.raw(field).unwrap_or("")
    }

    pub fn push_char(&mut self, field: SearchField, ch: char) {
        let mut value = self.value(field).to_string();
        value.push(ch);
        self.criteria.set(field, Some(value));
    }

    pub fn pop_char(&mut self, field: SearchField) {
        let mut value = self.value(field).to_string();
        value.pop();
        self.criteria
            .set(field, if value.is_empty() { None } else { Some(value) });
    }

    pub fn clear(&mut self, field: SearchField) {
        self.criteria.set(field, None);
    }

    /// Flip literal/regex for `field`. Returns `false` when the mode has no
    /// match types or does not offer the field.
    pub fn toggle_match_type(&mut self, field: SearchField) -> bool {
        if !self.mode.has_match_types() || !self.mode.fields().contains(&field) {
            return false;
        }
        let toggled = self.criteria.match_types.get(field).toggled();
        self.criteria.match_types.set(field, toggled);
        true
    }

    /// Step an enumerated option. Returns `false` for non-enumerated fields.
    pub fn cycle_option(&mut self, field: FormField, forward: bool) -> bool {
        if !self.mode.has_listing_options() {
            return false;
        }
        match field {
            FormField::Language => {
                self.criteria.language = cycle(Language::all(), self.criteria.language, forward);
            }
            FormField::Sort => {
                self.criteria.sort_key = cycle(SortKey::all(), self.criteria.sort_key, forward);
            }
            FormField::Order => {
                self.criteria.sort_order =
                    cycle(SortOrder::all(), self.criteria.sort_order, forward);
            }
            FormField::Text(_) | FormField::Submit => return false,
        }
        true
    }

    /// Criteria to submit, restricted to what this mode can express.
    pub fn to_criteria(&self) -> SearchCriteria {
        let mut criteria = self.criteria.clone();
        for field in [SearchField::Keyword, SearchField::Title, SearchField::Author] {
            if !self.mode.fields().contains(&field) {
                criteria.set(field, None);
            }
        }
        if !self.mode.has_match_types() {
            criteria.match_types = Default::default();
        }
        criteria
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// A search ready to be executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: SearchTicket,
    pub request: RequestDescriptor,
    pub criteria: SearchCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Continue,
    Quit,
    Dispatch(Submission),
}

/// What was last sent, kept for retry and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSubmission {
    pub mode: SearchMode,
    pub criteria: SearchCriteria,
    pub request: RequestDescriptor,
}

/// Turns failed settlements into error notifications.
struct NotificationSink<'a> {
    notifications: &'a mut Vec<Notification>,
}

impl SessionObserver for NotificationSink<'_> {
    fn settled(&mut self, _result: &SearchResult, failure: Option<&SearchFailure>) {
        match failure {
            Some(failure) => push_notification(
                self.notifications,
                Notification::new(NotificationLevel::Error, failure.to_string())
                    .with_action(NotificationAction::Retry),
            ),
            None => self
                .notifications
                .retain(|n| n.action != Some(NotificationAction::Retry)),
        }
    }
}

fn push_notification(notifications: &mut Vec<Notification>, notification: Notification) {
    notifications.push(notification);
    if notifications.len() > MAX_NOTIFICATIONS {
        let overflow = notifications.len() - MAX_NOTIFICATIONS;
        notifications.drain(..overflow);
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub config: TuiConfig,
    pub theme: LibrisTheme,
    pub session: SearchSession,
    pub mode: SearchMode,
    forms: Vec<SearchForm>,
    pub focus: Focus,
    /// Index into primary results followed by suggestions.
    pub selected: Option<usize>,
    pub detail_open: bool,
    pub help_open: bool,
    pub notifications: Vec<Notification>,
    pub last_submission: Option<LastSubmission>,
    pub spinner: usize,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let theme = LibrisTheme::from_name(&config.theme.name);
        let forms = SearchMode::all()
            .iter()
            .map(|mode| SearchForm::new(*mode, &config.defaults))
            .collect();
        let mode = SearchMode::default();
        Self {
            config,
            theme,
            session: SearchSession::new(),
            mode,
            forms,
            focus: Focus::Form(first_field(mode)),
            selected: None,
            detail_open: false,
            help_open: false,
            notifications: Vec::new(),
            last_submission: None,
            spinner: 0,
        }
    }

    pub fn form(&self) -> &SearchForm {
        self.form_for(self.mode)
    }

    pub fn form_for(&self, mode: SearchMode) -> &SearchForm {
        &self.forms[mode.index()]
    }

    fn form_mut(&mut self) -> &mut SearchForm {
        let idx = self.mode.index();
        &mut self.forms[idx]
    }

    pub fn view_state(&self) -> ViewState {
        self.session.view_state()
    }

    /// Books the user can select: nothing while a search is in flight.
    pub fn visible_books(&self) -> Vec<&BookRecord> {
        if self.session.is_loading() {
            return Vec::new();
        }
        let result = self.session.result();
        result.primary.iter().chain(result.suggestions.iter()).collect()
    }

    pub fn selected_book(&self) -> Option<&BookRecord> {
        self.selected
            .and_then(|idx| self.visible_books().get(idx).copied())
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        push_notification(&mut self.notifications, Notification::new(level, message));
    }

    // === INPUT ===

    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        if action == Action::Quit {
            return AppCommand::Quit;
        }
        if self.help_open {
            if matches!(action, Action::Cancel | Action::Confirm | Action::OpenHelp) {
                self.help_open = false;
            }
            return AppCommand::Continue;
        }
        if self.detail_open {
            match action {
                Action::Cancel | Action::Confirm => self.detail_open = false,
                Action::MoveUp => self.select_previous(),
                Action::MoveDown => self.select_next(),
                _ => {}
            }
            return AppCommand::Continue;
        }

        match action {
            Action::Quit => return AppCommand::Quit,
            Action::OpenHelp => self.help_open = true,
            Action::NextMode => self.switch_mode(self.mode.next()),
            Action::PrevMode => self.switch_mode(self.mode.previous()),
            Action::MoveDown => self.move_down(),
            Action::MoveUp => self.move_up(),
            Action::CycleForward => self.cycle_focused(true),
            Action::CycleBack => self.cycle_focused(false),
            Action::ToggleMatchType => {
                if let Focus::Form(FormField::Text(field)) = self.focus {
                    self.form_mut().toggle_match_type(field);
                }
            }
            Action::Input(ch) => {
                if let Focus::Form(FormField::Text(field)) = self.focus {
                    self.form_mut().push_char(field, ch);
                }
            }
            Action::Backspace => {
                if let Focus::Form(FormField::Text(field)) = self.focus {
                    self.form_mut().pop_char(field);
                }
            }
            Action::ClearField => {
                if let Focus::Form(FormField::Text(field)) = self.focus {
                    self.form_mut().clear(field);
                }
            }
            Action::Confirm => match self.focus {
                Focus::Form(_) => return self.submit_current(),
                Focus::Results => {
                    if self.selected_book().is_some() {
                        self.detail_open = true;
                    }
                }
            },
            Action::Cancel => match self.focus {
                Focus::Results => self.focus = Focus::Form(FormField::Submit),
                Focus::Form(_) => {
                    self.notifications.pop();
                }
            },
            Action::Retry => return self.retry(),
        }
        AppCommand::Continue
    }

    fn switch_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        self.focus = Focus::Form(first_field(mode));
        self.detail_open = false;
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Form(field) => match next_field(self.mode, field) {
                Some(next) => self.focus = Focus::Form(next),
                None => {
                    if !self.visible_books().is_empty() {
                        self.focus = Focus::Results;
                        self.selected = Some(self.selected.unwrap_or(0));
                    }
                }
            },
            Focus::Results => self.select_next(),
        }
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Form(field) => {
                if let Some(prev) = previous_field(self.mode, field) {
                    self.focus = Focus::Form(prev);
                }
            }
            Focus::Results => match self.selected {
                Some(idx) if idx > 0 => self.selected = Some(idx - 1),
                _ => self.focus = Focus::Form(FormField::Submit),
            },
        }
    }

    fn select_next(&mut self) {
        let count = self.visible_books().len();
        if count == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1).min(count - 1),
            None => 0,
        });
    }

    fn select_previous(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some(idx.saturating_sub(1));
        }
    }

    fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            Focus::Form(FormField::Text(_)) | Focus::Form(FormField::Submit) => {}
            Focus::Form(field) => {
                self.form_mut().cycle_option(field, forward);
            }
            Focus::Results => {}
        }
    }

    // === SUBMISSION ===

    pub fn submit_current(&mut self) -> AppCommand {
        let criteria = self.form().to_criteria();
        self.submit(self.mode, criteria)
    }

    pub fn retry(&mut self) -> AppCommand {
        match self.last_submission.clone() {
            Some(last) => self.submit(last.mode, last.criteria),
            None => {
                self.notify(NotificationLevel::Info, "Nothing to retry yet");
                AppCommand::Continue
            }
        }
    }

    fn submit(&mut self, mode: SearchMode, criteria: SearchCriteria) -> AppCommand {
        let Some(request) = build_request(mode, &criteria) else {
            self.notify(
                NotificationLevel::Warning,
                "Enter a keyword to run a similarity search",
            );
            return AppCommand::Continue;
        };

        let mut sink = NotificationSink {
            notifications: &mut self.notifications,
        };
        let ticket = self.session.begin(criteria.clone(), &mut sink);
        self.selected = None;
        self.detail_open = false;
        if self.focus == Focus::Results {
            self.focus = Focus::Form(FormField::Submit);
        }
        tracing::info!(
            generation = ticket.generation(),
            mode = %mode,
            query = %request.query_string(),
            "Search submitted"
        );

        self.last_submission = Some(LastSubmission {
            mode,
            criteria: criteria.clone(),
            request: request.clone(),
        });
        AppCommand::Dispatch(Submission {
            ticket,
            request,
            criteria,
        })
    }

    // === SEARCH EVENTS ===

    pub fn apply_loading(&mut self, ticket: SearchTicket, loading: bool) {
        let mut sink = NotificationSink {
            notifications: &mut self.notifications,
        };
        if !self.session.set_loading(ticket, loading, &mut sink) {
            tracing::trace!(generation = ticket.generation(), loading, "Ignored loading change");
        }
    }

    /// Apply a settlement. Returns whether it was current.
    pub fn apply_settlement(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        let mut sink = NotificationSink {
            notifications: &mut self.notifications,
        };
        let applied = self.session.settle(ticket, outcome, &mut sink);
        if !applied {
            tracing::debug!(
                generation = ticket.generation(),
                current = self.session.generation(),
                "Discarded stale settlement"
            );
            return false;
        }
        self.selected = None;
        if self.focus == Focus::Results {
            self.focus = Focus::Form(FormField::Submit);
        }
        true
    }

    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        if self.session.is_loading() {
            self.spinner = (self.spinner + 1) % SPINNER_FRAMES.len();
        }
        self.notifications.retain(|n| !n.is_expired(now));
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()]
    }

    // === PERSISTENCE ===

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            mode: self.mode,
            last_query: self
                .last_submission
                .as_ref()
                .map(|last| last.request.url("")),
        }
    }

    /// Restore the active mode and refill the form of the last search.
    pub fn restore(&mut self, state: &PersistedState) {
        self.switch_mode(state.mode);
        let Some(query) = state.last_query.as_deref() else {
            return;
        };
        match parse_url(query) {
            Ok(parsed) => {
                let idx = parsed.mode.index();
                self.forms[idx].criteria = parsed.criteria;
                tracing::debug!(mode = %parsed.mode, "Restored last search");
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "Could not restore last search");
                push_notification(
                    &mut self.notifications,
                    Notification::new(NotificationLevel::Warning, "Could not restore last search")
                        .with_action(NotificationAction::Dismiss),
                );
            }
        }
    }

    /// Form rows of the active mode.
    pub fn fields(&self) -> Vec<FormField> {
        form_fields(self.mode)
    }
}
