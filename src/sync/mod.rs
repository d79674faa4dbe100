//! Conversation synchronization engine.
//!
//! - `poller`: poll lifecycle, in-flight slot and staleness rules
//! - `sender`: one-at-a-time outbound gate
//! - `session`: owns the message store and applies results
//! - `timer`: poll timer handle

pub mod poller;
pub mod sender;
pub mod session;
pub mod timer;

pub use poller::{FetchKind, FetchTicket, Poller, PollerState, POLL_INTERVAL};
pub use sender::{MessageSender, SendRejection, SendTicket};
pub use session::{ConversationSession, FetchOutcome, SendOutcome};
pub use timer::PollHandle;
