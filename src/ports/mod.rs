// Ports - Interface definitions (contracts)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::model::*;
use crate::error::{EditorError, EditorResult};

/// Body of `POST /process`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub file_id: String,
    pub start_time: u64,
    pub end_time: Option<u64>,
    pub crop_params: Option<CropParams>,
    pub quality: QualityPreset,
}

/// Reply of `POST /upload`
///
/// The service omits `success` on error replies, so it defaults to false.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub success: bool,
    pub file_id: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<f64>,
    pub filename: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub error: Option<String>,
}

impl UploadReply {
    pub fn into_result(self) -> EditorResult<UploadedVideo> {
        if !self.success {
            return Err(EditorError::UploadRejected {
                message: self.error.unwrap_or_else(|| "Upload failed".to_string()),
            });
        }

        match (self.file_id, self.video_url) {
            (Some(file_id), Some(video_url)) => Ok(UploadedVideo {
                file_id,
                video_url,
                duration_seconds: self.duration.unwrap_or(0.0).max(0.0),
                filename: self.filename,
                width: self.width,
                height: self.height,
            }),
            _ => Err(EditorError::UploadTransportFailure {
                message: "reply is missing file_id or video_url".to_string(),
            }),
        }
    }
}

/// Reply of `POST /process`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessReply {
    #[serde(default)]
    pub success: bool,
    pub download_url: Option<String>,
    pub error: Option<String>,
}

impl ProcessReply {
    pub fn into_result(self) -> EditorResult<String> {
        if !self.success {
            return Err(EditorError::ProcessingRejected {
                message: self
                    .error
                    .unwrap_or_else(|| "Processing failed".to_string()),
            });
        }

        self.download_url
            .ok_or_else(|| EditorError::ProcessingTransportFailure {
                message: "reply is missing download_url".to_string(),
            })
    }
}

/// Port for the remote processing service
#[async_trait]
pub trait ProcessingService: Send + Sync {
    /// Upload a validated file and return the stored video
    async fn upload(&self, file: &VideoFile) -> EditorResult<UploadedVideo>;

    /// Submit trim/crop parameters and return the download URL
    async fn process(&self, request: &ProcessRequest) -> EditorResult<String>;

    /// Real processing progress in percent, when the service reports any
    async fn poll_progress(&self, _file_id: &str) -> EditorResult<Option<f64>> {
        Ok(None)
    }

    /// Fetch a processed file
    async fn download(&self, url: &str) -> EditorResult<Vec<u8>>;
}

/// Port for blocking user-facing alerts
pub trait AlertPort: Send + Sync {
    fn alert(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_reply_success() {
        let reply: UploadReply = serde_json::from_str(
            r#"{"success": true, "file_id": "f1", "filename": "a.mp4", "duration": 12.5,
                "width": 1920, "height": 1080, "video_url": "/video/f1"}"#,
        )
        .unwrap();
        let video = reply.into_result().unwrap();
        assert_eq!(video.file_id, "f1");
        assert_eq!(video.video_url, "/video/f1");
        assert_eq!(video.duration_seconds, 12.5);
        assert_eq!(video.width, Some(1920));
    }

    #[test]
    fn test_upload_reply_without_success_is_rejection() {
        let reply: UploadReply =
            serde_json::from_str(r#"{"error": "Invalid video file or corrupted"}"#).unwrap();
        match reply.into_result() {
            Err(EditorError::UploadRejected { message }) => {
                assert_eq!(message, "Invalid video file or corrupted")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let reply: UploadReply = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(reply.into_result().unwrap_err().to_string(), "Upload failed");
    }

    #[test]
    fn test_process_reply() {
        let reply: ProcessReply =
            serde_json::from_str(r#"{"success": true, "download_url": "/download/f1_processed"}"#)
                .unwrap();
        assert_eq!(reply.into_result().unwrap(), "/download/f1_processed");

        let reply: ProcessReply =
            serde_json::from_str(r#"{"error": "Original file not found"}"#).unwrap();
        assert!(matches!(
            reply.into_result(),
            Err(EditorError::ProcessingRejected { .. })
        ));
    }

    #[test]
    fn test_process_request_serializes_null_end() {
        let request = ProcessRequest {
            file_id: "f1".to_string(),
            start_time: 30,
            end_time: None,
            crop_params: None,
            quality: QualityPreset::Hd720,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "file_id": "f1",
                "start_time": 30,
                "end_time": null,
                "crop_params": null,
                "quality": "720p"
            })
        );
    }
}
