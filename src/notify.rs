//! User-facing notifications raised by the sync engine.
//!
//! The engine never talks to the toast layer directly. It is handed a
//! [`Notifier`] and the host decides how notifications are shown.

use std::time::Duration;

use crossbeam_channel::Sender;

use crate::protocol::GuiEvent;
use crate::remote::RemoteError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// How long a toast of this level stays on screen.
    pub fn display_duration(self) -> Duration {
        match self {
            NotificationLevel::Success | NotificationLevel::Info => Duration::from_secs(4),
            NotificationLevel::Warning => Duration::from_secs(5),
            NotificationLevel::Error => Duration::from_secs(6),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Classify a remote failure into a notification the user can act on.
    pub fn from_remote_error(fallback_title: &str, err: &RemoteError) -> Self {
        match err.status() {
            Some(401) => Self::error("Authentication required")
                .with_description("Please log in to continue"),
            Some(403) => Self::error("Access denied")
                .with_description("You don't have permission to perform this action"),
            Some(404) => Self::error("Resource not found")
                .with_description("The requested resource could not be found"),
            Some(422) => Self::error("Validation error")
                .with_description("Please check your input and try again"),
            Some(500) => Self::error("Server error")
                .with_description("Something went wrong on our end. Please try again later"),
            Some(status) => {
                let title = err.server_message().unwrap_or(fallback_title).to_string();
                Self::error(title).with_description(format!("Status: {}", status))
            }
            None if err.is_transport() => Self::error("Network error").with_description(
                "Unable to connect to the server. Please check your internet connection",
            ),
            None => Self::error(fallback_title).with_description(err.to_string()),
        }
    }
}

/// Capability to surface a notification to the user.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to the UI thread as [`GuiEvent::Notify`].
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: Sender<GuiEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<GuiEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // UI gone means nobody is left to show it
        let _ = self.tx.send(GuiEvent::Notify(notification));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = RemoteError::Status {
            stage: "fetch-messages",
            status: 404,
            message: None,
        };
        let n = Notification::from_remote_error("Failed to load messages", &err);
        assert_eq!(n.title, "Resource not found");
        assert_eq!(n.level, NotificationLevel::Error);

        let err = RemoteError::Status {
            stage: "send-message",
            status: 409,
            message: Some("conversation is locked".into()),
        };
        let n = Notification::from_remote_error("Failed to send message", &err);
        assert_eq!(n.title, "conversation is locked");
        assert_eq!(n.description.as_deref(), Some("Status: 409"));
    }

    #[test]
    fn test_fallback_title_for_decode_errors() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = RemoteError::Decode {
            stage: "fetch-messages",
            source,
        };
        let n = Notification::from_remote_error("Failed to load messages", &err);
        assert_eq!(n.title, "Failed to load messages");
    }

    #[test]
    fn test_display_durations() {
        assert_eq!(NotificationLevel::Error.display_duration(), Duration::from_secs(6));
        assert_eq!(NotificationLevel::Warning.display_duration(), Duration::from_secs(5));
        assert_eq!(NotificationLevel::Success.display_duration(), Duration::from_secs(4));
    }

    #[test]
    fn test_channel_notifier_forwards() {
        let (tx, rx) = crossbeam_channel::unbounded();
        ChannelNotifier::new(tx).notify(Notification::success("Copied"));
        match rx.try_recv() {
            Ok(GuiEvent::Notify(n)) => assert_eq!(n.title, "Copied"),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
