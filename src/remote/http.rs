use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::{debug, warn};

use super::error::{
    DecodeSnafu, RemoteError, RemoteResult, RequestSnafu, StatusSnafu,
};
use super::ChatRemote;
use crate::model::{deserialize_timestamp, Message, User};
use crate::validation;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Header carrying the caller's user id on every request.
const CALLER_HEADER: &str = "user_id";

/// REST client for the conversation service.
#[derive(Clone, Debug)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: &str) -> RemoteResult<Self> {
        let base_url = validation::validate_base_url(base_url).map_err(|details| {
            RemoteError::InvalidBaseUrl {
                stage: "http-remote-new",
                raw: base_url.to_string(),
                details,
            }
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Message as serialized by the service.
#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    id: Option<String>,
    content: String,
    #[serde(default)]
    issuer_id: Option<String>,
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

impl WireMessage {
    fn into_message(self, conversation_id: &str) -> Option<Message> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(Message {
            id,
            content: self.content,
            conversation_id: self
                .conversation_id
                .unwrap_or_else(|| conversation_id.to_string()),
            sender_id: self.issuer_id.unwrap_or_default(),
            timestamp: self.timestamp,
        })
    }
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    stage: &'static str,
    url: &str,
) -> RemoteResult<T> {
    let status = response.status();
    let body = response.bytes().await.context(RequestSnafu { stage, url })?;
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error);
        return StatusSnafu {
            stage,
            status: status.as_u16(),
            message,
        }
        .fail();
    }
    serde_json::from_slice(&body).context(DecodeSnafu { stage })
}

impl ChatRemote for HttpRemote {
    async fn fetch_messages(
        &self,
        conversation_id: &str,
        caller_id: &str,
    ) -> RemoteResult<Vec<Message>> {
        let stage = "fetch-messages";
        let url = self.endpoint(&format!("chat/{}/messages/", conversation_id));
        let response = self
            .client
            .get(&url)
            .header(CALLER_HEADER, caller_id)
            .send()
            .await
            .context(RequestSnafu { stage, url: &url })?;
        let wire: Vec<WireMessage> = read_json(response, stage, &url).await?;
        let total = wire.len();
        let messages: Vec<Message> = wire
            .into_iter()
            .filter_map(|m| m.into_message(conversation_id))
            .collect();
        if messages.len() != total {
            warn!(
                conversation_id,
                dropped = total - messages.len(),
                "ignoring messages without an id"
            );
        }
        debug!(conversation_id, count = messages.len(), "fetched messages");
        Ok(messages)
    }

    async fn send_message(
        &self,
        conversation_id: &str,
        caller_id: &str,
        content: &str,
    ) -> RemoteResult<Message> {
        let stage = "send-message";
        let url = self.endpoint(&format!("chat/{}/messages/", conversation_id));
        let response = self
            .client
            .post(&url)
            .header(CALLER_HEADER, caller_id)
            .json(&OutgoingMessage { content })
            .send()
            .await
            .context(RequestSnafu { stage, url: &url })?;
        let wire: WireMessage = read_json(response, stage, &url).await?;
        let mut message = wire
            .into_message(conversation_id)
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::custom("confirmed message carries no id"))
            .context(DecodeSnafu { stage })?;
        if message.sender_id.is_empty() {
            message.sender_id = caller_id.to_string();
        }
        Ok(message)
    }

    async fn fetch_users(&self, caller_id: &str) -> RemoteResult<Vec<User>> {
        let stage = "fetch-users";
        let url = self.endpoint("users");
        let response = self
            .client
            .get(&url)
            .header(CALLER_HEADER, caller_id)
            .send()
            .await
            .context(RequestSnafu { stage, url: &url })?;
        read_json(response, stage, &url).await
    }
}
