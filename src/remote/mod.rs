//! Remote conversation store.
//!
//! - `error`: failure taxonomy for remote calls
//! - `http`: REST implementation against the conversation service

mod error;
mod http;

use std::future::Future;

pub use error::{RemoteError, RemoteResult};
pub use http::{HttpRemote, DEFAULT_API_BASE_URL};

use crate::model::{Message, User};

/// Operations the sync engine needs from the remote store.
pub trait ChatRemote: Send + Sync + 'static {
    /// Every message of a conversation, in server order.
    fn fetch_messages(
        &self,
        conversation_id: &str,
        caller_id: &str,
    ) -> impl Future<Output = RemoteResult<Vec<Message>>> + Send;

    /// Store a message and return it with its server-assigned id and timestamp.
    fn send_message(
        &self,
        conversation_id: &str,
        caller_id: &str,
        content: &str,
    ) -> impl Future<Output = RemoteResult<Message>> + Send;

    fn fetch_users(&self, caller_id: &str) -> impl Future<Output = RemoteResult<Vec<User>>> + Send;
}
