//! The conversation a chat view is bound to, and the only owner of its store.

use tracing::{debug, info, warn};

use super::poller::{FetchKind, FetchTicket, Poller, PollerState};
use super::sender::{MessageSender, SendRejection, SendTicket};
use crate::model::{ConversationRef, Message};
use crate::notify::{Notification, Notifier};
use crate::remote::RemoteResult;
use crate::store::MessageStore;

/// What happened to a fetch result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The store changed
    Applied,
    /// Same id-set as before, nothing to do
    Unchanged,
    /// The fetch failed
    Failed,
    /// Stale, overtaken, or suspended; the store was not touched
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered(Message),
    Failed,
    Discarded,
}

#[derive(Debug)]
struct Active {
    conversation: ConversationRef,
    caller_id: String,
}

/// Reconciles remote results into the message store.
///
/// Poll and send paths are the only mutators of the store. All methods are
/// synchronous; the driver performs the I/O described by the returned
/// tickets and feeds results back in.
pub struct ConversationSession<N: Notifier> {
    notifier: N,
    active: Option<Active>,
    store: MessageStore,
    poller: Poller,
    sender: MessageSender,
}

impl<N: Notifier> ConversationSession<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            active: None,
            store: MessageStore::new(),
            poller: Poller::new(),
            sender: MessageSender::new(),
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn conversation(&self) -> Option<&ConversationRef> {
        self.active.as_ref().map(|a| &a.conversation)
    }

    pub fn caller_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.caller_id.as_str())
    }

    pub fn generation(&self) -> u64 {
        self.poller.generation()
    }

    pub fn poller_state(&self) -> PollerState {
        self.poller.state()
    }

    pub fn is_sending(&self) -> bool {
        self.sender.is_in_flight()
    }

    /// Bind to a conversation with a fresh, empty store.
    pub fn open(&mut self, conversation: ConversationRef, caller_id: &str) -> u64 {
        let generation = self.poller.activate(&conversation.id, caller_id);
        info!(
            conversation_id = %conversation.id,
            generation,
            "opening conversation"
        );
        self.store = MessageStore::new();
        self.sender.reset();
        self.active = Some(Active {
            conversation,
            caller_id: caller_id.to_string(),
        });
        generation
    }

    pub fn close(&mut self) {
        if let Some(active) = self.active.take() {
            info!(conversation_id = %active.conversation.id, "closing conversation");
        }
        self.poller.stop();
        self.sender.reset();
        self.store.clear();
    }

    /// Composer state changed. Non-empty unsent text suspends polling.
    pub fn set_composing(&mut self, composing: bool) {
        if composing != self.poller.is_suspended() {
            debug!(suspended = composing, "poll suspension changed");
        }
        self.poller.set_suspended(composing);
    }

    pub fn begin_initial_load(&mut self) -> Option<FetchTicket> {
        self.poller.begin_initial()
    }

    pub fn on_tick(&mut self, generation: u64) -> Option<FetchTicket> {
        self.poller.on_tick(generation)
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: RemoteResult<Vec<Message>>,
    ) -> FetchOutcome {
        if !self.poller.complete(ticket) {
            debug!(
                conversation_id = %ticket.conversation_id,
                generation = ticket.generation,
                seq = ticket.seq,
                "dropping stale fetch result"
            );
            return FetchOutcome::Discarded;
        }

        match (ticket.kind, result) {
            (FetchKind::Initial, Ok(messages)) => {
                debug!(count = messages.len(), "initial load complete");
                self.store.load(messages);
                FetchOutcome::Applied
            }
            (FetchKind::Initial, Err(err)) => {
                warn!(conversation_id = %ticket.conversation_id, error = %err, "initial load failed");
                self.notifier
                    .notify(Notification::from_remote_error("Failed to load messages", &err));
                FetchOutcome::Failed
            }
            // Started before the user began typing; the timeline must hold still
            (FetchKind::Poll, Ok(_)) if self.poller.is_suspended() => FetchOutcome::Discarded,
            (FetchKind::Poll, Ok(messages)) => {
                if self.store.replace_all(messages) {
                    debug!(count = self.store.len(), "poll reconciled new messages");
                    FetchOutcome::Applied
                } else {
                    FetchOutcome::Unchanged
                }
            }
            (FetchKind::Poll, Err(err)) => {
                debug!(error = %err, "poll failed, retrying on next tick");
                FetchOutcome::Failed
            }
        }
    }

    /// Accept a send request, or ignore it when blank or already sending.
    pub fn begin_send(&mut self, content: &str) -> Option<SendTicket> {
        let active = self.active.as_ref()?;
        match self.sender.begin(
            self.poller.generation(),
            &active.conversation.id,
            &active.caller_id,
            content,
        ) {
            Ok(ticket) => Some(ticket),
            Err(SendRejection::Invalid(reason)) => {
                self.notifier
                    .notify(Notification::warning("Message not sent").with_description(reason));
                None
            }
            Err(rejection) => {
                debug!(?rejection, "send ignored");
                None
            }
        }
    }

    pub fn complete_send(&mut self, ticket: &SendTicket, result: RemoteResult<Message>) -> SendOutcome {
        if self.active.is_none() || ticket.generation != self.poller.generation() {
            debug!(conversation_id = %ticket.conversation_id, "dropping stale send confirmation");
            return SendOutcome::Discarded;
        }
        self.sender.finish();

        match result {
            Ok(message) => {
                info!(conversation_id = %ticket.conversation_id, message_id = %message.id, "message delivered");
                self.store.append(message.clone());
                SendOutcome::Delivered(message)
            }
            Err(err) => {
                warn!(conversation_id = %ticket.conversation_id, error = %err, "send failed");
                self.notifier
                    .notify(Notification::from_remote_error("Failed to send message", &err));
                SendOutcome::Failed
            }
        }
    }
}
