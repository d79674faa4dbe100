//! Action routing and completion handling for the sync engine.

use std::sync::Arc;

use crossbeam_channel::Sender;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::model::{ConversationRef, Message, User};
use crate::notify::ChannelNotifier;
use crate::protocol::{BackendAction, GuiEvent};
use crate::remote::{ChatRemote, RemoteResult};
use crate::sync::{
    ConversationSession, FetchKind, FetchOutcome, FetchTicket, PollHandle, SendOutcome,
    SendTicket, POLL_INTERVAL,
};

/// Result of a spawned remote call, routed back into the loop
pub(super) enum Completion {
    Fetch {
        ticket: FetchTicket,
        result: RemoteResult<Vec<Message>>,
    },
    Send {
        ticket: SendTicket,
        result: RemoteResult<Message>,
    },
    Users {
        generation: u64,
        result: RemoteResult<Vec<User>>,
    },
}

pub(super) struct Engine<R: ChatRemote> {
    remote: Arc<R>,
    session: ConversationSession<ChannelNotifier>,
    event_tx: Sender<GuiEvent>,
    tick_tx: UnboundedSender<u64>,
    pub(super) ticks: UnboundedReceiver<u64>,
    pub(super) tasks: JoinSet<Completion>,
    poll_handle: Option<PollHandle>,
}

impl<R: ChatRemote> Engine<R> {
    pub(super) fn new(remote: R, event_tx: Sender<GuiEvent>) -> Self {
        let (tick_tx, ticks) = mpsc::unbounded_channel();
        Self {
            remote: Arc::new(remote),
            session: ConversationSession::new(ChannelNotifier::new(event_tx.clone())),
            event_tx,
            tick_tx,
            ticks,
            tasks: JoinSet::new(),
            poll_handle: None,
        }
    }

    pub(super) fn handle_action(&mut self, action: BackendAction) {
        match action {
            BackendAction::OpenConversation {
                conversation,
                caller_id,
            } => self.open(conversation, &caller_id),
            BackendAction::CloseConversation => {
                self.stop_activation();
                self.session.close();
            }
            BackendAction::SetComposing(composing) => self.session.set_composing(composing),
            BackendAction::SendMessage { content } => {
                if let Some(ticket) = self.session.begin_send(&content) {
                    self.spawn_send(ticket);
                }
            }
            BackendAction::Refresh => {
                if let Some(ticket) = self.session.begin_initial_load() {
                    self.spawn_fetch(ticket);
                }
            }
            // Handled by the loop itself
            BackendAction::Shutdown => {}
        }
    }

    pub(super) fn handle_tick(&mut self, generation: u64) {
        if let Some(ticket) = self.session.on_tick(generation) {
            self.spawn_fetch(ticket);
        }
    }

    pub(super) fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fetch { ticket, result } => {
                let outcome = self.session.complete_fetch(&ticket, result);
                if outcome == FetchOutcome::Applied {
                    self.emit_timeline();
                }
                if ticket.kind == FetchKind::Initial && outcome != FetchOutcome::Discarded {
                    self.emit(GuiEvent::InitialLoadFinished {
                        conversation_id: ticket.conversation_id,
                        ok: outcome != FetchOutcome::Failed,
                    });
                }
            }
            Completion::Send { ticket, result } => match self.session.complete_send(&ticket, result) {
                SendOutcome::Delivered(message) => {
                    self.emit_timeline();
                    self.emit(GuiEvent::MessageSent {
                        conversation_id: ticket.conversation_id,
                        message_id: message.id,
                    });
                }
                SendOutcome::Failed => self.emit(GuiEvent::SendFailed {
                    conversation_id: ticket.conversation_id,
                }),
                SendOutcome::Discarded => {}
            },
            Completion::Users { generation, result } => {
                if generation != self.session.generation() {
                    return;
                }
                match result {
                    Ok(users) => {
                        debug!(count = users.len(), "user directory loaded");
                        self.emit(GuiEvent::UsersLoaded(users));
                    }
                    // Group headers fall back to raw ids
                    Err(e) => warn!(error = %e, "failed to load users"),
                }
            }
        }
    }

    pub(super) fn shutdown(&mut self) {
        self.stop_activation();
        self.session.close();
    }

    fn open(&mut self, conversation: ConversationRef, caller_id: &str) {
        self.stop_activation();
        let generation = self.session.open(conversation, caller_id);
        self.poll_handle = Some(PollHandle::start(
            generation,
            POLL_INTERVAL,
            self.tick_tx.clone(),
        ));
        // Let the view drop whatever it showed before
        self.emit_timeline();

        if let Some(ticket) = self.session.begin_initial_load() {
            self.spawn_fetch(ticket);
        }
        self.spawn_users(generation, caller_id.to_string());
    }

    /// Release the timer and abandon in-flight calls of the current activation.
    fn stop_activation(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            debug!(generation = handle.generation(), "stopping poll timer");
            handle.stop();
        }
        self.tasks.abort_all();
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let remote = Arc::clone(&self.remote);
        self.tasks.spawn(async move {
            let result = remote
                .fetch_messages(&ticket.conversation_id, &ticket.caller_id)
                .await;
            Completion::Fetch { ticket, result }
        });
    }

    fn spawn_send(&mut self, ticket: SendTicket) {
        let remote = Arc::clone(&self.remote);
        self.tasks.spawn(async move {
            let result = remote
                .send_message(&ticket.conversation_id, &ticket.caller_id, &ticket.content)
                .await;
            Completion::Send { ticket, result }
        });
    }

    fn spawn_users(&mut self, generation: u64, caller_id: String) {
        let remote = Arc::clone(&self.remote);
        self.tasks.spawn(async move {
            let result = remote.fetch_users(&caller_id).await;
            Completion::Users { generation, result }
        });
    }

    fn emit_timeline(&self) {
        let Some(conversation) = self.session.conversation() else {
            return;
        };
        let store = self.session.store();
        self.emit(GuiEvent::TimelineChanged {
            conversation_id: conversation.id.clone(),
            messages: store.messages().to_vec(),
            version: store.version(),
        });
    }

    fn emit(&self, event: GuiEvent) {
        let _ = self.event_tx.send(event);
    }
}
