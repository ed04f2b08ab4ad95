// Editor session - Orchestrates intake, trim, crop and processing for one video

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::app::gesture::{GestureTracker, PointerTarget};
use crate::app::progress::{
    ProgressAnimator, ProgressTracker, PROCESSING_MESSAGE, UPLOADING_MESSAGE,
};
use crate::app::trim::TrimControls;
use crate::config::{CropSettings, ProgressSettings, Settings};
use crate::domain::geometry::{to_native, Point, Rect, Size, VideoLayout};
use crate::domain::model::*;
use crate::domain::rules::{CropClamp, IntakePolicy};
use crate::error::{EditorError, EditorResult};
use crate::ports::{AlertPort, ProcessRequest, ProcessingService};

/// Percentage shown as soon as an upload starts
const UPLOAD_START_PERCENT: f64 = 10.0;
/// Percentage shown as soon as processing starts
const PROCESSING_START_PERCENT: f64 = 20.0;

/// Crop overlay state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CropState {
    pub enabled: bool,
    pub crop_box: Rect,
    pub aspect: AspectRatio,
}

/// Controller for a single editing session
pub struct EditorSession {
    service: Arc<dyn ProcessingService>,
    alerts: Arc<dyn AlertPort>,
    policy: IntakePolicy,
    crop_settings: CropSettings,
    progress_settings: ProgressSettings,
    default_quality: QualityPreset,

    view: ViewState,
    video: Option<UploadedVideo>,
    video_source: Option<String>,
    layout: Option<VideoLayout>,
    drag_over: bool,
    trim: TrimControls,
    crop: CropState,
    gestures: GestureTracker,
    quality: QualityPreset,
    submit_enabled: bool,
    download_url: Option<String>,
    progress: ProgressTracker,
}

impl EditorSession {
    /// Create a session in the upload view
    pub fn new(
        service: Arc<dyn ProcessingService>,
        alerts: Arc<dyn AlertPort>,
        settings: &Settings,
    ) -> Self {
        Self {
            service,
            alerts,
            policy: settings.intake.policy(),
            crop_settings: settings.crop.clone(),
            progress_settings: settings.progress.clone(),
            default_quality: settings.defaults.quality,
            view: ViewState::Upload,
            video: None,
            video_source: None,
            layout: None,
            drag_over: false,
            trim: TrimControls::new(),
            crop: CropState::default(),
            gestures: GestureTracker::new(
                settings.crop.resize_mode,
                settings.crop.min_size_px,
            ),
            quality: settings.defaults.quality,
            submit_enabled: true,
            download_url: None,
            progress: ProgressTracker::new(),
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn video(&self) -> Option<&UploadedVideo> {
        self.video.as_ref()
    }

    /// URL the preview player is pointed at
    pub fn video_source(&self) -> Option<&str> {
        self.video_source.as_deref()
    }

    pub fn layout(&self) -> Option<VideoLayout> {
        self.layout
    }

    pub fn trim(&self) -> &TrimControls {
        &self.trim
    }

    pub fn crop(&self) -> &CropState {
        &self.crop
    }

    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    pub fn quality(&self) -> QualityPreset {
        self.quality
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// Handle to the progress indicator, shared with observers
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    // ---- File intake -------------------------------------------------

    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Accept files from the picker or a drop; only the first one is used
    pub async fn intake(
        &mut self,
        source: FileSource,
        files: Vec<VideoFile>,
    ) -> EditorResult<Option<UploadedVideo>> {
        if source == FileSource::Drop {
            self.drag_over = false;
        }

        let Some(file) = files.into_iter().next() else {
            debug!(?source, "Intake without files ignored");
            return Ok(None);
        };

        self.upload(file).await.map(Some)
    }

    /// Validate and upload a file, then open the editor
    pub async fn upload(&mut self, file: VideoFile) -> EditorResult<UploadedVideo> {
        if self.view != ViewState::Upload {
            return Err(EditorError::IllegalTransition {
                from: self.view,
                event: "upload",
            });
        }

        if let Err(e) = self.policy.validate(&file) {
            warn!(file = %file.name, mime = %file.mime, size = file.size, "File rejected before upload");
            return Err(self.surface(e));
        }

        info!(file = %file.name, size = file.size, "Uploading video");
        self.progress.show(UPLOADING_MESSAGE, UPLOAD_START_PERCENT);

        let result = self.service.upload(&file).await;
        self.progress.hide();

        let video = match result {
            Ok(video) => video,
            Err(e) => return Err(self.surface(e)),
        };

        self.view = self.view.transition(ViewEvent::UploadSucceeded)?;
        self.video_source = Some(video.video_url.clone());
        self.trim.load_duration(video.duration_seconds);
        self.video = Some(video.clone());

        info!(
            file_id = %video.file_id,
            duration = video.duration_seconds,
            "Video uploaded; editor opened"
        );
        Ok(video)
    }

    // ---- Video metadata ----------------------------------------------

    /// Preview metadata arrived: bound the slider and place the crop box
    pub fn on_metadata_loaded(&mut self, intrinsic: Size, container: Size) -> EditorResult<()> {
        let duration = self
            .video
            .as_ref()
            .map(|v| v.duration_seconds)
            .ok_or(EditorError::NoVideoLoaded)?;

        if intrinsic.is_empty() || container.is_empty() {
            warn!(?intrinsic, ?container, "Ignoring degenerate video metadata");
            return Err(EditorError::LayoutUnknown);
        }

        self.layout = Some(VideoLayout::new(intrinsic, container));
        self.trim.setup_slider(duration);
        self.reset_crop_box()?;

        debug!(
            intrinsic_width = intrinsic.width,
            intrinsic_height = intrinsic.height,
            container_width = container.width,
            container_height = container.height,
            "Video metadata loaded"
        );
        Ok(())
    }

    // ---- Trim controls -----------------------------------------------

    pub fn set_start_text(&mut self, text: &str) -> Option<f64> {
        self.trim.set_start_text(text)
    }

    pub fn set_end_text(&mut self, text: &str) -> Option<f64> {
        self.trim.set_end_text(text)
    }

    pub fn scrub(&mut self, value: f64) {
        self.trim.scrub(value)
    }

    pub fn on_playback_time(&mut self, seconds: f64) {
        self.trim.on_playback_time(seconds)
    }

    // ---- Crop controls -----------------------------------------------

    /// Toggle the crop overlay; enabling always recenters the box
    pub fn set_crop_enabled(&mut self, enabled: bool) -> EditorResult<()> {
        if enabled {
            self.reset_crop_box()?;
        } else {
            self.gestures.cancel();
        }
        self.crop.enabled = enabled;
        info!(enabled, "Crop toggled");
        Ok(())
    }

    /// Lock the box to `W:H` (height follows width) or unlock with `free`
    pub fn set_aspect_ratio(&mut self, token: &str) -> EditorResult<()> {
        let aspect = AspectRatio::parse(token)?;
        self.crop.aspect = aspect;

        if let AspectRatio::Locked { width, height } = aspect {
            let crop_box = &mut self.crop.crop_box;
            crop_box.height = crop_box.width * (height as f64 / width as f64);
            debug!(%aspect, height = crop_box.height, "Aspect ratio applied");
        }
        Ok(())
    }

    /// Pointer pressed; returns true when a gesture captured the pointer
    pub fn pointer_down(&mut self, target: PointerTarget, at: Point) -> bool {
        if !self.crop.enabled {
            return false;
        }
        self.gestures.pointer_down(target, at, self.crop.crop_box)
    }

    /// Pointer moved; returns the new box while a gesture is active
    pub fn pointer_move(&mut self, at: Point) -> Option<Rect> {
        let updated = self.gestures.pointer_move(at)?;
        self.crop.crop_box = updated;
        Some(updated)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.gestures.pointer_up()
    }

    fn reset_crop_box(&mut self) -> EditorResult<()> {
        let layout = self.layout.ok_or(EditorError::LayoutUnknown)?;
        self.crop.crop_box = layout
            .displayed()
            .centered_fraction(self.crop_settings.default_fraction);
        Ok(())
    }

    // ---- Processing --------------------------------------------------

    pub fn set_quality(&mut self, quality: QualityPreset) {
        self.quality = quality;
    }

    /// Assemble the process payload from the current editor state
    pub fn build_request(&self) -> EditorResult<ProcessRequest> {
        let video = self.video.as_ref().ok_or(EditorError::NoVideoLoaded)?;
        let trim = self.trim.trim_range();

        let crop_params = if self.crop.enabled {
            let layout = self.layout.ok_or(EditorError::LayoutUnknown)?;
            let native = to_native(self.crop.crop_box, layout.displayed(), layout.intrinsic);
            let clamped = CropClamp::clamp_to_frame(native, layout.intrinsic)?;
            if clamped != native {
                debug!(?native, ?clamped, "Crop rectangle clamped to video frame");
            }
            Some(CropParams::from(clamped))
        } else {
            None
        };

        Ok(ProcessRequest {
            file_id: video.file_id.clone(),
            start_time: trim.start_seconds,
            end_time: trim.end_seconds,
            crop_params,
            quality: self.quality,
        })
    }

    /// Submit the edit and wait for the download link
    pub async fn submit(&mut self) -> EditorResult<String> {
        if self.view != ViewState::Editing {
            return Err(EditorError::IllegalTransition {
                from: self.view,
                event: "submit",
            });
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(e) => return Err(self.surface(e)),
        };

        self.view = self.view.transition(ViewEvent::Submit)?;
        self.submit_enabled = false;
        self.progress.show(PROCESSING_MESSAGE, PROCESSING_START_PERCENT);
        info!(
            file_id = %request.file_id,
            start = request.start_time,
            end = ?request.end_time,
            crop = request.crop_params.is_some(),
            quality = %request.quality,
            "Submitting processing request"
        );

        let animator = ProgressAnimator::spawn(
            self.progress.clone(),
            Arc::clone(&self.service),
            request.file_id.clone(),
            self.progress_settings.clone(),
            PROCESSING_START_PERCENT,
        );

        let result = self.service.process(&request).await;

        if animator.stop().await {
            debug!("Progress animation had reached its ceiling before the reply");
        }
        self.submit_enabled = true;
        self.progress.hide();

        match result {
            Ok(url) => {
                self.view = self.view.transition(ViewEvent::ProcessingSucceeded)?;
                self.download_url = Some(url.clone());
                info!(download_url = %url, "Processing finished");
                Ok(url)
            }
            Err(e) => {
                self.view = self.view.transition(ViewEvent::ProcessingFailed)?;
                Err(self.surface(e))
            }
        }
    }

    /// Save the processed file bound to the download link
    pub async fn download(&self, dest: &Path) -> EditorResult<u64> {
        let url = self
            .download_url
            .as_deref()
            .ok_or_else(|| EditorError::DownloadFailure {
                message: "no download link is available".to_string(),
            })?;

        let bytes = self.service.download(url).await?;
        tokio::fs::write(dest, &bytes).await?;
        info!(path = %dest.display(), bytes = bytes.len(), "Processed video saved");
        Ok(bytes.len() as u64)
    }

    // ---- Reset -------------------------------------------------------

    /// Start over from the upload view
    pub fn reset(&mut self) -> EditorResult<()> {
        self.view = self.view.transition(ViewEvent::Reset)?;
        self.video = None;
        self.video_source = None;
        self.layout = None;
        self.drag_over = false;
        self.trim = TrimControls::new();
        self.crop = CropState::default();
        self.gestures.cancel();
        self.quality = self.default_quality;
        self.submit_enabled = true;
        self.download_url = None;
        self.progress.clear();
        info!("Editor reset");
        Ok(())
    }

    /// Log a failure and alert the user when it is an operation failure
    fn surface(&self, err: EditorError) -> EditorError {
        error!(error = %err, "Operation failed");
        if err.is_user_facing() {
            self.alerts.alert(&err.to_string());
        }
        err
    }
}
