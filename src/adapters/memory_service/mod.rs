// In-memory service adapter - Answers like the processing service without a network

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::model::*;
use crate::error::{EditorError, EditorResult};
use crate::ports::{ProcessRequest, ProcessingService};

/// Duration reported for every upload when none is configured
const DEFAULT_DURATION_SECONDS: f64 = 60.0;

/// Local stand-in for the processing service, used for dry runs and tests
pub struct InMemoryService {
    duration_seconds: f64,
    requests: Mutex<Vec<ProcessRequest>>,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION_SECONDS)
    }

    /// Report `duration_seconds` for uploaded videos
    pub fn with_duration(duration_seconds: f64) -> Self {
        Self {
            duration_seconds,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Process requests received so far
    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessingService for InMemoryService {
    async fn upload(&self, file: &VideoFile) -> EditorResult<UploadedVideo> {
        let file_id = Uuid::new_v4().to_string();
        debug!(file_id = %file_id, file = %file.name, "In-memory upload");
        Ok(UploadedVideo {
            video_url: format!("/video/{}", file_id),
            file_id,
            duration_seconds: self.duration_seconds,
            filename: Some(file.name.clone()),
            width: None,
            height: None,
        })
    }

    async fn process(&self, request: &ProcessRequest) -> EditorResult<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(format!("/download/{}_processed", request.file_id))
    }

    async fn download(&self, url: &str) -> EditorResult<Vec<u8>> {
        Err(EditorError::DownloadFailure {
            message: format!("{} is not stored locally", url),
        })
    }
}
