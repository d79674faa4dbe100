use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RemoteError {
    #[snafu(display("request to {url} failed at {stage}"))]
    Request {
        stage: &'static str,
        url: String,
        source: reqwest::Error,
    },
    #[snafu(display("remote store answered {status} at {stage}"))]
    Status {
        stage: &'static str,
        status: u16,
        /// `error` field of the service's error body, when present.
        message: Option<String>,
    },
    #[snafu(display("failed to decode response at {stage}"))]
    Decode {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("invalid API base URL '{raw}': {details}"))]
    InvalidBaseUrl {
        stage: &'static str,
        raw: String,
        details: String,
    },
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, RemoteError::Request { .. })
    }

    pub fn stage(&self) -> &'static str {
        match self {
            RemoteError::Request { stage, .. }
            | RemoteError::Status { stage, .. }
            | RemoteError::Decode { stage, .. }
            | RemoteError::InvalidBaseUrl { stage, .. } => stage,
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
