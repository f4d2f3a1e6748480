//! Notification system for the TUI.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Retry,
    Dismiss,
}

impl NotificationAction {
    pub fn hint(&self) -> &'static str {
        match self {
            NotificationAction::Retry => "Ctrl-R retry",
            NotificationAction::Dismiss => "Esc dismiss",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub action: Option<NotificationAction>,
    pub created_at: DateTime<Utc>,
}

/// How long a notification without an action stays in the footer.
pub const NOTIFICATION_TTL_SECS: i64 = 6;

/// Notifications kept at most.
pub const MAX_NOTIFICATIONS: usize = 32;

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            action: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Actionable notifications stay until handled.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.action.is_none() && (now - self.created_at).num_seconds() > NOTIFICATION_TTL_SECS
    }

    pub fn render(&self) -> String {
        match self.action {
            Some(action) => format!("{}: {} [{}]", self.level.label(), self.message, action.hint()),
            None => format!("{}: {}", self.level.label(), self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_plain_notification_expires() {
        let note = Notification::new(NotificationLevel::Info, "hello");
        assert!(!note.is_expired(note.created_at));
        assert!(note.is_expired(note.created_at + Duration::seconds(NOTIFICATION_TTL_SECS + 1)));
    }

    #[test]
    fn test_actionable_notification_persists() {
        let note = Notification::new(NotificationLevel::Error, "boom")
            .with_action(NotificationAction::Retry);
        assert!(!note.is_expired(note.created_at + Duration::hours(1)));
        assert_eq!(note.render(), "ERROR: boom [Ctrl-R retry]");
    }

    #[test]
    fn test_level_labels() {
        let labels: Vec<&str> = [
            NotificationLevel::Info,
            NotificationLevel::Warning,
            NotificationLevel::Error,
        ]
        .iter()
        .map(|level| level.label())
        .collect();
        assert_eq!(labels, vec!["INFO", "WARN", "ERROR"]);
    }
}
