//! Core application state, separated from UI logic.
//!
//! `ClientState` holds what the UI shows: the identity of the current user,
//! the open chat view (if any), the user directory and the toast queue. It
//! only ever holds read-only snapshots of the engine's timeline.

use std::collections::HashMap;
use std::time::Instant;

use crate::grouping::{group_messages, MessageGroup};
use crate::model::{ConversationRef, Message, User};
use crate::notify::Notification;
use crate::scroll::{ScrollDecision, ScrollTracker};

/// A notification on screen, expiring after its level's display duration.
#[derive(Clone, Debug)]
pub struct Toast {
    pub notification: Notification,
    pub created: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= self.notification.level.display_duration()
    }
}

/// The chat view bound to one conversation.
#[derive(Debug)]
pub struct ChatView {
    pub conversation: ConversationRef,
    pub messages: Vec<Message>,
    pub groups: Vec<MessageGroup>,
    /// Store version of the last applied snapshot
    pub version: u64,
    pub scroll: ScrollTracker,
    /// The initial load has not settled yet
    pub loading: bool,
    pub load_failed: bool,
    pub sending: bool,
}

impl ChatView {
    pub fn new(conversation: ConversationRef, auto_follow: bool) -> Self {
        Self {
            conversation,
            messages: Vec::new(),
            groups: Vec::new(),
            version: 0,
            scroll: ScrollTracker::new(auto_follow),
            loading: true,
            load_failed: false,
            sending: false,
        }
    }

    /// Apply a store snapshot. Returns the scroll decision when the list changed.
    pub fn apply_snapshot(&mut self, messages: Vec<Message>, version: u64) -> Option<ScrollDecision> {
        if version == self.version {
            return None;
        }
        self.version = version;
        self.groups = group_messages(&messages);
        self.messages = messages;
        Some(self.scroll.on_content_changed())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Default)]
pub struct ClientState {
    /// Id of the user the client speaks for.
    pub current_user_id: String,

    /// Open chat view, `None` on the home screen.
    pub chat: Option<ChatView>,

    /// User directory keyed by id.
    pub users: HashMap<String, User>,

    /// Toasts (auto-expire).
    pub status_messages: Vec<Toast>,

    /// Last engine failure, shown on the home screen.
    pub engine_error: Option<String>,
}

impl ClientState {
    pub fn new(current_user_id: impl Into<String>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            ..Self::default()
        }
    }

    pub fn open_chat(&mut self, conversation: ConversationRef, auto_follow: bool) {
        self.chat = Some(ChatView::new(conversation, auto_follow));
    }

    pub fn close_chat(&mut self) {
        self.chat = None;
    }

    /// The chat view, if it is bound to `conversation_id`.
    pub fn chat_for(&mut self, conversation_id: &str) -> Option<&mut ChatView> {
        self.chat
            .as_mut()
            .filter(|chat| chat.conversation.id == conversation_id)
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
    }

    /// Header label for a sender id.
    pub fn display_name(&self, sender_id: &str) -> String {
        if !self.current_user_id.is_empty() && sender_id == self.current_user_id {
            return "You".to_string();
        }
        self.users
            .get(sender_id)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| sender_id.to_string())
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.status_messages.push(Toast {
            notification,
            created: Instant::now(),
        });
    }

    /// Drop toasts whose display time has elapsed.
    pub fn purge_old_status_messages(&mut self, now: Instant) {
        self.status_messages.retain(|toast| !toast.is_expired(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn msg(id: &str, sender: &str) -> Message {
        Message::new(id, "party-42", sender, "hi")
    }

    #[test]
    fn test_client_state_new() {
        let state = ClientState::new("alice");
        assert_eq!(state.current_user_id, "alice");
        assert!(state.chat.is_none());
        assert!(state.status_messages.is_empty());
    }

    #[test]
    fn test_display_name_resolution() {
        let mut state = ClientState::new("alice");
        let mut bob = User::new("bob", "Robert");
        bob.pseudo = Some("bobby".into());
        state.set_users(vec![bob, User::new("carol", "Carol")]);

        assert_eq!(state.display_name("alice"), "You");
        assert_eq!(state.display_name("bob"), "bobby");
        assert_eq!(state.display_name("carol"), "Carol");
        assert_eq!(state.display_name("d41d8cd9"), "d41d8cd9");
    }

    #[test]
    fn test_snapshot_for_other_conversation_is_ignored() {
        let mut state = ClientState::new("alice");
        state.open_chat(ConversationRef::new("party-42", "Party"), false);
        assert!(state.chat_for("party-7").is_none());
        assert!(state.chat_for("party-42").is_some());
    }

    #[test]
    fn test_apply_snapshot_regroups() {
        let mut view = ChatView::new(ConversationRef::new("party-42", "Party"), false);
        // The empty snapshot sent on open carries version 0
        assert_eq!(view.apply_snapshot(Vec::new(), 0), None);

        let decision = view.apply_snapshot(vec![msg("m1", "a"), msg("m2", "a"), msg("m3", "b")], 2);
        assert_eq!(decision, Some(ScrollDecision::ScrollToBottom));
        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.version, 2);

        // Same version again is not a change
        assert_eq!(view.apply_snapshot(view.messages.clone(), 2), None);
    }

    #[test]
    fn test_toasts_expire_by_level() {
        let mut state = ClientState::new("alice");
        state.push_notification(Notification::success("Copied"));
        state.push_notification(Notification::error("Failed to send message"));

        let created = state.status_messages[0].created;
        state.purge_old_status_messages(created + Duration::from_millis(4500));
        assert_eq!(state.status_messages.len(), 1);
        assert_eq!(state.status_messages[0].notification.title, "Failed to send message");

        state.purge_old_status_messages(created + Duration::from_secs(7));
        assert!(state.status_messages.is_empty());
    }
}
