use std::fmt;

use bytes::Bytes;

pub type AttemptId = u64;

/// Parameters of one generation request, validated upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRequest {
    pub topic: String,
    pub slides: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptProgress {
    pub attempt: AttemptId,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(AttemptProgress),
    AttemptCompleted {
        attempt: AttemptId,
        result: Result<GenerationOutput, GenerateError>,
    },
}

/// A retrieved artifact: the binary payload plus its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub payload: Bytes,
    pub filename: String,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub content_type: Option<String>,
    pub byte_len: u64,
    /// Whether `filename` came from the response header rather than the
    /// topic-derived fallback.
    pub filename_from_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Connect,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Connect => write!(f, "connection failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
