//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::app::gesture::Handle;
use crate::domain::geometry::Size;
use crate::domain::model::QualityPreset;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start time (HH:MM:SS, MM:SS, or seconds)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM:SS, MM:SS, or seconds; blank means end of video)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output quality (480p, 720p, 1080p, original)
    #[arg(short, long)]
    pub quality: Option<QualityPreset>,

    /// Enable cropping
    #[arg(long)]
    pub crop: bool,

    /// On-screen size of the video container
    #[arg(long, value_parser = parse_size, default_value = "800x450")]
    pub container: Size,

    /// Intrinsic video size (default: as reported by the server)
    #[arg(long, value_parser = parse_size)]
    pub video_size: Option<Size>,

    /// Crop aspect ratio lock (W:H or free)
    #[arg(long)]
    pub aspect: Option<String>,

    /// Drag the crop box by DX,DY screen pixels
    #[arg(long = "move", value_parser = parse_delta, allow_hyphen_values = true)]
    pub move_by: Option<(f64, f64)>,

    /// Drag a resize handle by DX,DY screen pixels
    #[arg(long, value_parser = parse_delta, allow_hyphen_values = true)]
    pub resize: Option<(f64, f64)>,

    /// Handle used by --resize
    #[arg(long, default_value = "se")]
    pub handle: Handle,

    /// Save the processed video here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the in-memory service and print the request payload
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse `WxH` into a size
pub fn parse_size(value: &str) -> Result<Size, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", value))?;
    let width: f64 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let height: f64 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    if !(width > 0.0 && height > 0.0) {
        return Err(format!("size must be positive, got '{}'", value));
    }
    Ok(Size::new(width, height))
}

/// Parse `DX,DY` into a pointer delta
pub fn parse_delta(value: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = value
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{}'", value))?;
    let dx: f64 = dx.trim().parse().map_err(|_| format!("invalid dx '{}'", dx))?;
    let dy: f64 = dy.trim().parse().map_err(|_| format!("invalid dy '{}'", dy))?;
    Ok((dx, dy))
}
