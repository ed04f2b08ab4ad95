use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use trimcrop::app::container::{AppContainer, DefaultAppContainer};
use trimcrop::app::progress::{ProgressCallback, PROCESSING_MESSAGE};
use trimcrop::domain::geometry::Size;
use trimcrop::*;

/// Service whose processing takes a while and may report real progress
struct SlowService {
    delay: Duration,
    reported: Option<f64>,
    fail_transport: bool,
}

#[async_trait]
impl ProcessingService for SlowService {
    async fn upload(&self, file: &VideoFile) -> EditorResult<UploadedVideo> {
        Ok(UploadedVideo {
            file_id: "abc".to_string(),
            video_url: "/video/abc".to_string(),
            duration_seconds: 30.0,
            filename: Some(file.name.clone()),
            width: Some(1280),
            height: Some(720),
        })
    }

    async fn process(&self, request: &ProcessRequest) -> EditorResult<String> {
        tokio::time::sleep(self.delay).await;
        if self.fail_transport {
            return Err(EditorError::ProcessingTransportFailure {
                message: "connection reset".to_string(),
            });
        }
        Ok(format!("/download/{}_processed", request.file_id))
    }

    async fn poll_progress(&self, _file_id: &str) -> EditorResult<Option<f64>> {
        Ok(self.reported)
    }

    async fn download(&self, _url: &str) -> EditorResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct Alerts(Mutex<Vec<String>>);

impl AlertPort for Alerts {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct Updates {
    percents: Mutex<Vec<(f64, String)>>,
    hidden: Mutex<usize>,
}

impl ProgressCallback for Updates {
    fn on_update(&self, percent: f64, message: &str) {
        self.percents
            .lock()
            .unwrap()
            .push((percent, message.to_string()));
    }

    fn on_hidden(&self) {
        *self.hidden.lock().unwrap() += 1;
    }
}

fn container(service: SlowService) -> (DefaultAppContainer, Arc<Alerts>) {
    let alerts = Arc::new(Alerts::default());
    let container =
        DefaultAppContainer::with_ports(Arc::new(service), alerts.clone(), Settings::default());
    (container, alerts)
}

#[tokio::test(start_paused = true)]
async fn test_progress_climbs_while_processing() {
    let (container, alerts) = container(SlowService {
        delay: Duration::from_secs(5),
        reported: None,
        fail_transport: false,
    });
    let mut session = container.editor_session();
    let updates = Arc::new(Updates::default());
    session.progress().add_callback(updates.clone());

    session
        .upload(VideoFile::new("/media/talk.mp4", 4096))
        .await
        .unwrap();
    let url = session.submit().await.unwrap();

    assert_eq!(url, "/download/abc_processed");
    assert_eq!(session.view(), ViewState::Download);
    assert!(alerts.0.lock().unwrap().is_empty());

    let percents = updates.percents.lock().unwrap().clone();
    let processing: Vec<f64> = percents
        .iter()
        .filter(|(_, message)| message == PROCESSING_MESSAGE)
        .map(|(p, _)| *p)
        .collect();
    assert_eq!(processing[0], 20.0);
    assert!(processing.len() >= 4, "updates = {:?}", processing);
    assert!(processing.windows(2).all(|w| w[0] <= w[1]));
    assert!(processing.iter().all(|p| *p <= 90.0));
    assert!(!session.progress().snapshot().visible);
    assert_eq!(*updates.hidden.lock().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_reported_progress_replaces_simulation() {
    let (container, _) = container(SlowService {
        delay: Duration::from_millis(2500),
        reported: Some(55.0),
        fail_transport: false,
    });
    let mut session = container.editor_session();
    let updates = Arc::new(Updates::default());
    session.progress().add_callback(updates.clone());

    session
        .upload(VideoFile::new("/media/talk.mp4", 4096))
        .await
        .unwrap();
    session.submit().await.unwrap();

    let percents: Vec<f64> = updates
        .percents
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, message)| message == PROCESSING_MESSAGE)
        .map(|(p, _)| *p)
        .collect();
    assert_eq!(percents, vec![20.0, 55.0, 55.0]);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_keeps_edits() {
    let (container, alerts) = container(SlowService {
        delay: Duration::from_secs(1),
        reported: None,
        fail_transport: true,
    });
    let mut session = container.editor_session();
    session
        .upload(VideoFile::new("/media/talk.mkv", 4096))
        .await
        .unwrap();
    let intrinsic = session.video().and_then(|v| v.reported_size()).unwrap();
    session
        .on_metadata_loaded(intrinsic, Size::new(640.0, 360.0))
        .unwrap();
    session.set_crop_enabled(true).unwrap();
    session.set_start_text("00:00:05");

    let result = session.submit().await;
    assert!(matches!(
        result,
        Err(EditorError::ProcessingTransportFailure { .. })
    ));
    assert_eq!(session.view(), ViewState::Editing);
    assert!(session.submit_enabled());
    assert!(session.crop().enabled);
    assert_eq!(session.trim().start_text(), "00:00:05");
    assert_eq!(
        alerts.0.lock().unwrap().as_slice(),
        ["Processing failed: connection reset"]
    );

    let request = session.build_request().unwrap();
    // 640x360 shows 1280x720 at scale 2; default box is centered half size
    assert_eq!(
        request.crop_params,
        Some(CropParams {
            enabled: true,
            x: 320,
            y: 180,
            width: 640,
            height: 360
        })
    );
}
