//! Engine event processing (timeline snapshots, send results, notifications).

use tracing::debug;

use crate::input_state::InputState;
use crate::notify::Notification;
use crate::protocol::GuiEvent;
use crate::scroll::ScrollDecision;
use crate::state::ClientState;

/// Apply one engine event to the UI state.
///
/// Returns the scroll decision when the visible timeline changed.
pub fn process_single_event(
    state: &mut ClientState,
    input: &mut InputState,
    event: GuiEvent,
) -> Option<ScrollDecision> {
    match event {
        GuiEvent::TimelineChanged {
            conversation_id,
            messages,
            version,
        } => {
            let chat = state.chat_for(&conversation_id)?;
            let decision = chat.apply_snapshot(messages, version);
            debug!(%conversation_id, version, ?decision, "timeline snapshot applied");
            decision
        }

        GuiEvent::InitialLoadFinished { conversation_id, ok } => {
            if let Some(chat) = state.chat_for(&conversation_id) {
                chat.loading = false;
                chat.load_failed = !ok;
            }
            None
        }

        GuiEvent::MessageSent { conversation_id, .. } => {
            if let Some(chat) = state.chat_for(&conversation_id) {
                chat.sending = false;
                input.commit_sent();
            }
            None
        }

        GuiEvent::SendFailed { conversation_id } => {
            // Input stays as typed so the user can retry
            if let Some(chat) = state.chat_for(&conversation_id) {
                chat.sending = false;
            }
            None
        }

        GuiEvent::UsersLoaded(users) => {
            state.set_users(users);
            None
        }

        GuiEvent::Notify(notification) => {
            state.push_notification(notification);
            None
        }

        GuiEvent::Error(msg) => {
            state.push_notification(Notification::error("Engine error").with_description(msg.clone()));
            state.engine_error = Some(msg);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConversationRef, Message, User};

    fn open_state() -> (ClientState, InputState) {
        let mut state = ClientState::new("alice");
        state.open_chat(ConversationRef::new("party-42", "Party"), false);
        (state, InputState::new())
    }

    fn snapshot(conversation_id: &str, ids: &[&str], version: u64) -> GuiEvent {
        GuiEvent::TimelineChanged {
            conversation_id: conversation_id.to_string(),
            messages: ids
                .iter()
                .map(|id| Message::new(*id, conversation_id, "bob", "yo"))
                .collect(),
            version,
        }
    }

    #[test]
    fn test_timeline_snapshot_is_grouped() {
        let (mut state, mut input) = open_state();
        let decision = process_single_event(&mut state, &mut input, snapshot("party-42", &["m1", "m2"], 1));
        assert_eq!(decision, Some(ScrollDecision::ScrollToBottom));

        let chat = state.chat.as_ref().unwrap();
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.groups.len(), 1);
    }

    #[test]
    fn test_snapshot_for_closed_conversation_dropped() {
        let (mut state, mut input) = open_state();
        let decision = process_single_event(&mut state, &mut input, snapshot("party-7", &["x"], 3));
        assert_eq!(decision, None);
        assert!(state.chat.as_ref().unwrap().messages.is_empty());
    }

    #[test]
    fn test_message_sent_clears_input() {
        let (mut state, mut input) = open_state();
        input.message_input = "bonsoir".into();
        state.chat.as_mut().unwrap().sending = true;

        process_single_event(
            &mut state,
            &mut input,
            GuiEvent::MessageSent {
                conversation_id: "party-42".into(),
                message_id: "m9".into(),
            },
        );
        assert!(input.message_input.is_empty());
        assert_eq!(input.history, vec!["bonsoir".to_string()]);
        assert!(!state.chat.as_ref().unwrap().sending);
    }

    #[test]
    fn test_send_failure_keeps_input() {
        let (mut state, mut input) = open_state();
        input.message_input = "bonsoir".into();
        state.chat.as_mut().unwrap().sending = true;

        process_single_event(
            &mut state,
            &mut input,
            GuiEvent::SendFailed {
                conversation_id: "party-42".into(),
            },
        );
        assert_eq!(input.message_input, "bonsoir");
        assert!(!state.chat.as_ref().unwrap().sending);
    }

    #[test]
    fn test_initial_load_failure_flagged() {
        let (mut state, mut input) = open_state();
        process_single_event(
            &mut state,
            &mut input,
            GuiEvent::InitialLoadFinished {
                conversation_id: "party-42".into(),
                ok: false,
            },
        );
        let chat = state.chat.as_ref().unwrap();
        assert!(!chat.loading);
        assert!(chat.load_failed);
    }

    #[test]
    fn test_users_and_notifications() {
        let (mut state, mut input) = open_state();
        process_single_event(
            &mut state,
            &mut input,
            GuiEvent::UsersLoaded(vec![User::new("bob", "Bob")]),
        );
        assert_eq!(state.display_name("bob"), "Bob");

        process_single_event(
            &mut state,
            &mut input,
            GuiEvent::Notify(Notification::error("Failed to load messages")),
        );
        process_single_event(&mut state, &mut input, GuiEvent::Error("no runtime".into()));
        assert_eq!(state.status_messages.len(), 2);
        assert_eq!(state.engine_error.as_deref(), Some("no runtime"));
    }
}
