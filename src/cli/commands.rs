//! Command implementations

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::app::editor_session::EditorSession;
use crate::app::gesture::PointerTarget;
use crate::app::progress::ProgressCallback;
use crate::cli::args::{CheckArgs, ProcessArgs};
use crate::config::Settings;
use crate::domain::geometry::Point;
use crate::domain::model::{FileSource, VideoFile};
use crate::utils::{format_file_size, resolve_url};

/// Prints progress updates on one stderr line
struct TerminalProgress;

impl ProgressCallback for TerminalProgress {
    fn on_update(&self, percent: f64, message: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{} {:>3.0}%", message, percent);
        let _ = stderr.flush();
    }

    fn on_hidden(&self) {
        let _ = writeln!(std::io::stderr());
    }
}

/// Execute the check command
pub async fn check(args: CheckArgs, settings: &Settings) -> Result<()> {
    info!("Input: {}", args.input.display());

    let file = VideoFile::from_path(&args.input)
        .await
        .with_context(|| format!("Cannot read input file {}", args.input.display()))?;

    settings
        .intake
        .policy()
        .validate(&file)
        .with_context(|| format!("{} would be rejected", file.name))?;

    println!(
        "OK: {} ({}, {})",
        file.name,
        file.mime,
        format_file_size(file.size)
    );
    Ok(())
}

/// Execute the process command
pub async fn process<C: AppContainer>(args: ProcessArgs, container: &C) -> Result<()> {
    let settings = container.settings();
    let mut session = container.editor_session();
    session.progress().add_callback(Arc::new(TerminalProgress));

    let file = VideoFile::from_path(&args.input)
        .await
        .with_context(|| format!("Cannot read input file {}", args.input.display()))?;

    let video = session
        .intake(FileSource::Picker, vec![file])
        .await
        .context("Upload failed")?
        .context("No file was taken for upload")?;
    println!("Uploaded {} as {}", args.input.display(), video.file_id);

    match args.video_size.or_else(|| video.reported_size()) {
        Some(intrinsic) => session.on_metadata_loaded(intrinsic, args.container)?,
        None if args.crop => bail!("Video size unknown; pass --video-size WxH to crop"),
        None => warn!("Video size unknown; slider and crop box are not set up"),
    }

    if let Some(start) = &args.start {
        session.set_start_text(start);
    }
    if let Some(end) = &args.end {
        session.set_end_text(end);
    }
    if let Some(quality) = args.quality {
        session.set_quality(quality);
    }

    if args.crop {
        apply_crop(&mut session, &args)?;
    }

    if args.dry_run {
        let request = session.build_request()?;
        println!("{}", serde_json::to_string_pretty(&request)?);
    }

    let url = session.submit().await.context("Processing failed")?;
    println!("Download URL: {}", resolve_url(&settings.server.base_url, &url));

    if let Some(output) = &args.output {
        if args.dry_run {
            warn!("Dry run; skipping download to {}", output.display());
        } else {
            let bytes = session
                .download(output)
                .await
                .with_context(|| format!("Failed to save {}", output.display()))?;
            println!("Saved {} ({})", output.display(), format_file_size(bytes));
        }
    }

    info!("Process command completed");
    Ok(())
}

/// Enable the crop box, then lock, drag and resize it as requested
fn apply_crop(session: &mut EditorSession, args: &ProcessArgs) -> Result<()> {
    session.set_crop_enabled(true)?;

    if let Some(aspect) = &args.aspect {
        session.set_aspect_ratio(aspect)?;
    }

    if let Some((dx, dy)) = args.move_by {
        drag(session, PointerTarget::Body, dx, dy);
    }

    if let Some((dx, dy)) = args.resize {
        drag(session, PointerTarget::Handle(args.handle), dx, dy);
    }

    let crop_box = session.crop().crop_box;
    info!(
        left = crop_box.left,
        top = crop_box.top,
        width = crop_box.width,
        height = crop_box.height,
        "Crop box placed"
    );
    Ok(())
}

fn drag(session: &mut EditorSession, target: PointerTarget, dx: f64, dy: f64) {
    let start = session.crop().crop_box.center();
    if session.pointer_down(target, start) {
        session.pointer_move(Point::new(start.x + dx, start.y + dy));
        session.pointer_up();
    }
}
