// HTTP service adapter - Talks to the processing service with reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ServerSettings;
use crate::domain::model::*;
use crate::error::{EditorError, EditorResult};
use crate::ports::{ProcessReply, ProcessRequest, ProcessingService, UploadReply};
use crate::utils::resolve_url;

/// Multipart field carrying the uploaded file
const UPLOAD_FIELD: &str = "video";

/// Processing service reached over HTTP
pub struct HttpService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpService {
    /// Create a client for the service described by `settings`
    pub fn new(settings: &ServerSettings) -> EditorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| EditorError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, settings.base_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }

    /// Decode a JSON reply whatever its status; error replies carry `error`
    async fn parse_reply<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("failed to read reply: {}", e))?;

        serde_json::from_str(&body).map_err(|e| {
            debug!(%status, body = %body, "Reply is not JSON");
            format!("unexpected reply ({}): {}", status, e)
        })
    }
}

#[async_trait]
impl ProcessingService for HttpService {
    async fn upload(&self, file: &VideoFile) -> EditorResult<UploadedVideo> {
        let transport = |message: String| EditorError::UploadTransportFailure { message };

        let unreadable =
            |e: std::io::Error| transport(format!("cannot read {}: {}", file.path.display(), e));
        let handle = tokio::fs::File::open(&file.path).await.map_err(unreadable)?;
        let length = handle.metadata().await.map_err(unreadable)?.len();

        // Streamed from disk; the multipart body length stays known
        let part = Part::stream_with_length(handle, length)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| transport(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.endpoint("/upload");
        info!(url = %url, file = %file.name, "POST upload");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        let reply: UploadReply = Self::parse_reply(response).await.map_err(transport)?;
        reply.into_result()
    }

    async fn process(&self, request: &ProcessRequest) -> EditorResult<String> {
        let transport = |message: String| EditorError::ProcessingTransportFailure { message };

        let url = self.endpoint("/process");
        info!(url = %url, file_id = %request.file_id, "POST process");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        let reply: ProcessReply = Self::parse_reply(response).await.map_err(transport)?;
        reply.into_result()
    }

    async fn download(&self, url: &str) -> EditorResult<Vec<u8>> {
        let failure = |message: String| EditorError::DownloadFailure { message };
        let url = self.endpoint(url);
        info!(url = %url, "GET download");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("server answered {}", status)));
        }

        let bytes = response.bytes().await.map_err(|e| failure(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
