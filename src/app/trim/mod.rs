// Trim controls - text fields, slider and playhead kept in step

use tracing::debug;

use crate::domain::model::TrimRange;
use crate::utils::time::{format_time, parse_time};

/// Range slider bounded by `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Slider {
    pub max: f64,
    pub value: f64,
}

impl Slider {
    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max.max(0.0))
    }
}

/// Three views of one (start, end) pair
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrimControls {
    start_text: String,
    end_text: String,
    slider: Slider,
    playhead: f64,
}

impl TrimControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_text(&self) -> &str {
        &self.start_text
    }

    pub fn end_text(&self) -> &str {
        &self.end_text
    }

    pub fn slider(&self) -> Slider {
        self.slider
    }

    /// Current playback position in seconds
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    /// Prefill the end field with the full duration
    pub fn load_duration(&mut self, duration_seconds: f64) {
        self.end_text = format_time(duration_seconds);
    }

    /// Bound the slider to the video once its metadata is known
    pub fn setup_slider(&mut self, duration_seconds: f64) {
        self.slider = Slider {
            max: duration_seconds.max(0.0),
            value: 0.0,
        };
    }

    /// Edit the start field; returns the seek target when one happened
    pub fn set_start_text(&mut self, text: &str) -> Option<f64> {
        self.start_text = text.to_string();
        self.seek_from_fields()
    }

    /// Edit the end field; returns the seek target when one happened
    pub fn set_end_text(&mut self, text: &str) -> Option<f64> {
        self.end_text = text.to_string();
        self.seek_from_fields()
    }

    /// Drag the slider: moves the playhead and back-fills the start field
    pub fn scrub(&mut self, value: f64) {
        let value = self.slider.clamp(value);
        self.slider.value = value;
        self.playhead = value;
        self.start_text = format_time(value);
        debug!(position = value, "Scrubbed trim slider");
    }

    /// Reflect playback into the slider without touching the text fields
    pub fn on_playback_time(&mut self, seconds: f64) {
        self.playhead = seconds.max(0.0);
        self.slider.value = self.slider.clamp(seconds);
    }

    /// Trim interval as typed; an end not after the start means "to the end"
    pub fn trim_range(&self) -> TrimRange {
        TrimRange::new(parse_time(&self.start_text), parse_time(&self.end_text))
    }

    fn seek_from_fields(&mut self) -> Option<f64> {
        let start = parse_time(&self.start_text);
        let end = parse_time(&self.end_text);

        if end > start {
            self.playhead = start as f64;
            debug!(start, end, "Seeked to trim start");
            Some(self.playhead)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_duration_prefills_end() {
        let mut trim = TrimControls::new();
        trim.load_duration(3661.7);
        assert_eq!(trim.end_text(), "01:01:01");
        assert_eq!(trim.start_text(), "");
    }

    #[test]
    fn test_typed_fields_seek_only_when_ordered() {
        let mut trim = TrimControls::new();
        trim.load_duration(120.0);
        assert_eq!(trim.set_start_text("00:00:30"), Some(30.0));
        assert_eq!(trim.playhead(), 30.0);

        assert_eq!(trim.set_end_text("00:00:10"), None);
        assert_eq!(trim.playhead(), 30.0);

        assert_eq!(trim.set_end_text("1:00"), Some(30.0));
    }

    #[test]
    fn test_scrub_back_fills_start_and_clamps() {
        let mut trim = TrimControls::new();
        trim.setup_slider(90.0);
        trim.scrub(65.8);
        assert_eq!(trim.start_text(), "00:01:05");
        assert_eq!(trim.playhead(), 65.8);

        trim.scrub(500.0);
        assert_eq!(trim.slider().value, 90.0);
        assert_eq!(trim.start_text(), "00:01:30");

        trim.scrub(-3.0);
        assert_eq!(trim.slider().value, 0.0);
    }

    #[test]
    fn test_playback_reflects_into_slider_only() {
        let mut trim = TrimControls::new();
        trim.setup_slider(60.0);
        trim.set_start_text("5");
        trim.on_playback_time(42.0);
        assert_eq!(trim.slider().value, 42.0);
        assert_eq!(trim.start_text(), "5");
    }

    #[test]
    fn test_trim_range_blank_or_early_end_is_open() {
        let mut trim = TrimControls::new();
        trim.set_start_text("30");
        trim.set_end_text("");
        assert_eq!(
            trim.trim_range(),
            TrimRange {
                start_seconds: 30,
                end_seconds: None
            }
        );

        trim.set_end_text("00:00:30");
        assert_eq!(trim.trim_range().end_seconds, None);

        trim.set_end_text("00:00:45");
        assert_eq!(trim.trim_range().end_seconds, Some(45));
    }
}
