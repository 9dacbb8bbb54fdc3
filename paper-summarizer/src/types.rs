use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /summarize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub query: Option<QueryParams>,
}

impl SummarizeRequest {
    /// Check that both fields are present and non-empty, url first.
    pub fn validate(&self) -> Result<(&str, &QueryParams)> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(SummarizerError::MissingUrl)?;

        let query = self
            .query
            .as_ref()
            .filter(|q| !q.is_empty())
            .ok_or(SummarizerError::MissingQuery)?;

        Ok((url, query))
    }
}

/// Request parameters for the feed fetch.
///
/// A string is appended verbatim as the URL query string; an object is
/// encoded pair by pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryParams {
    Raw(String),
    Pairs(serde_json::Map<String, serde_json::Value>),
}

impl QueryParams {
    pub fn is_empty(&self) -> bool {
        match self {
            QueryParams::Raw(raw) => raw.is_empty(),
            QueryParams::Pairs(pairs) => pairs.is_empty(),
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryParams::Raw(raw) => f.write_str(raw),
            QueryParams::Pairs(pairs) => {
                write!(f, "{}", serde_json::Value::Object(pairs.clone()))
            }
        }
    }
}

/// One paper record extracted from an Atom feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Summarizer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// `None` leaves the transport default in place.
    pub timeout_seconds: Option<u64>,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("paper-summarizer/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: None,
            max_redirects: 10,
        }
    }
}

/// Coarse classification of [`SummarizerError`], used for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    UpstreamEmpty,
    SummaryMissing,
    ParseFailure,
    Transport,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::UpstreamEmpty | ErrorKind::SummaryMissing => 400,
            ErrorKind::ParseFailure | ErrorKind::Transport | ErrorKind::Internal => 500,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("No query provided")]
    MissingQuery,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("No text found on the website")]
    EmptyFeed,

    #[error("No summary found")]
    SummaryMissing,

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SummarizerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SummarizerError::MissingUrl
            | SummarizerError::MissingQuery
            | SummarizerError::InvalidRequest(_) => ErrorKind::Validation,
            SummarizerError::EmptyFeed => ErrorKind::UpstreamEmpty,
            SummarizerError::SummaryMissing => ErrorKind::SummaryMissing,
            SummarizerError::Parse(_) => ErrorKind::ParseFailure,
            SummarizerError::Http(_)
            | SummarizerError::InvalidUrl(_)
            | SummarizerError::Llm(_)
            | SummarizerError::Serialization(_) => ErrorKind::Transport,
            SummarizerError::Config(_) | SummarizerError::Io(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, SummarizerError>;
