use crate::model::{ConversationRef, Message, User};
use crate::notify::Notification;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone)]
pub enum BackendAction {
    /// Bind the engine to a conversation and start polling it
    OpenConversation {
        conversation: ConversationRef,
        caller_id: String,
    },
    /// Stop polling and discard the timeline (back to home)
    CloseConversation,
    /// Composer has unsent text (suspends polling) or not
    SetComposing(bool),
    /// Submit the composer content
    SendMessage { content: String },
    /// Re-run the user-visible load of the active conversation
    Refresh,
    /// Stop the engine
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The message store changed; carries a full snapshot
    TimelineChanged {
        conversation_id: String,
        messages: Vec<Message>,
        version: u64,
    },
    /// The user-visible load settled
    InitialLoadFinished { conversation_id: String, ok: bool },
    /// A send was confirmed; the composer can be cleared
    MessageSent {
        conversation_id: String,
        message_id: String,
    },
    /// A send failed; the composer keeps its text
    SendFailed { conversation_id: String },
    /// Directory used to resolve sender ids
    UsersLoaded(Vec<User>),
    /// Toast to show
    Notify(Notification),
    /// The engine itself could not run
    Error(String),
}
