use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use crate::filename::{fallback_filename, filename_from_disposition};
use crate::{
    AttemptId, AttemptProgress, DeckRequest, EngineEvent, FailureKind, GenerateError,
    GenerationOutput, ResponseMetadata,
};

/// Backend endpoint of the reference deployment.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/generate_ppt";

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole request; generation is slow.
    pub request_timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        attempt: AttemptId,
        request: &DeckRequest,
        sink: &dyn ProgressSink,
    ) -> Result<GenerationOutput, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    settings: GeneratorSettings,
}

impl ReqwestGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }

    fn request_url(&self, request: &DeckRequest) -> Result<reqwest::Url, GenerateError> {
        reqwest::Url::parse_with_params(
            &self.settings.endpoint,
            &[
                ("topic", request.topic.as_str()),
                ("slides", request.slides.to_string().as_str()),
            ],
        )
        .map_err(|err| GenerateError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Generator for ReqwestGenerator {
    async fn generate(
        &self,
        attempt: AttemptId,
        request: &DeckRequest,
        sink: &dyn ProgressSink,
    ) -> Result<GenerationOutput, GenerateError> {
        let url = self.request_url(request)?;
        let client = self.build_client()?;

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        sink.emit(EngineEvent::Progress(AttemptProgress { attempt, bytes: 0 }));

        let mut payload = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            payload.extend_from_slice(&chunk);
            sink.emit(EngineEvent::Progress(AttemptProgress {
                attempt,
                bytes: payload.len() as u64,
            }));
        }

        let header_name = disposition.as_deref().and_then(filename_from_disposition);
        let filename_from_header = header_name.is_some();
        let filename = header_name.unwrap_or_else(|| fallback_filename(&request.topic));

        let metadata = ResponseMetadata {
            content_type,
            byte_len: payload.len() as u64,
            filename_from_header,
        };

        Ok(GenerationOutput {
            payload: payload.into(),
            filename,
            metadata,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return GenerateError::new(FailureKind::Connect, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
