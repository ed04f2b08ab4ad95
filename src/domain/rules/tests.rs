// Unit tests for business rules

use super::*;

fn file(mime: &str, size: u64) -> VideoFile {
    VideoFile {
        path: "clip".into(),
        name: "clip".to_string(),
        mime: mime.to_string(),
        size,
    }
}

#[test]
fn test_intake_accepts_allowed_types() {
    let policy = IntakePolicy::default();
    for mime in DEFAULT_ALLOWED_TYPES {
        assert!(policy.validate(&file(mime, 1024)).is_ok(), "{}", mime);
    }
}

#[test]
fn test_intake_rejects_unknown_type() {
    let policy = IntakePolicy::default();
    let result = policy.validate(&file("video/x-m4v", 1024));
    assert!(matches!(result, Err(EditorError::InvalidFileType { .. })));
}

#[test]
fn test_intake_size_boundary() {
    let policy = IntakePolicy::default();
    assert!(policy.validate(&file("video/mp4", MAX_UPLOAD_BYTES)).is_ok());
    let result = policy.validate(&file("video/mp4", MAX_UPLOAD_BYTES + 1));
    assert!(matches!(
        result,
        Err(EditorError::FileTooLarge { size, limit }) if size == MAX_UPLOAD_BYTES + 1 && limit == MAX_UPLOAD_BYTES
    ));
}

#[test]
fn test_intake_type_checked_before_size() {
    let policy = IntakePolicy::default();
    let result = policy.validate(&file("text/plain", MAX_UPLOAD_BYTES + 1));
    assert!(matches!(result, Err(EditorError::InvalidFileType { .. })));
}

#[test]
fn test_clamp_inside_frame_is_unchanged() {
    let rect = CropRect {
        x: 480,
        y: 240,
        width: 960,
        height: 480,
    };
    let clamped = CropClamp::clamp_to_frame(rect, Size::new(1920.0, 960.0)).unwrap();
    assert_eq!(clamped, rect);
}

#[test]
fn test_clamp_trims_overhang() {
    let rect = CropRect {
        x: -100,
        y: 900,
        width: 400,
        height: 200,
    };
    let clamped = CropClamp::clamp_to_frame(rect, Size::new(1920.0, 1080.0)).unwrap();
    assert_eq!(
        clamped,
        CropRect {
            x: 0,
            y: 900,
            width: 300,
            height: 180
        }
    );
}

#[test]
fn test_clamp_outside_frame_is_empty() {
    let rect = CropRect {
        x: 2000,
        y: 10,
        width: 100,
        height: 100,
    };
    let result = CropClamp::clamp_to_frame(rect, Size::new(1920.0, 1080.0));
    assert!(matches!(result, Err(EditorError::EmptyCropRegion { width: 0, .. })));
}

#[test]
fn test_clamp_degenerate_frame_is_empty() {
    let rect = CropRect {
        x: 10,
        y: 10,
        width: 100,
        height: 100,
    };
    for frame in [
        Size::new(-1920.0, 1080.0),
        Size::new(1920.0, -1.0),
        Size::new(f64::NAN, 1080.0),
    ] {
        let result = CropClamp::clamp_to_frame(rect, frame);
        assert!(
            matches!(result, Err(EditorError::EmptyCropRegion { .. })),
            "{:?}",
            frame
        );
    }
}
