//! Screen-space geometry for the crop overlay
//!
//! All on-screen coordinates are measured in CSS pixels from the top-left
//! corner of the video container.

use crate::domain::model::CropRect;

/// Width and height in on-screen or native pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height; zero when the height is degenerate
    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }

    /// True unless both dimensions are finite and positive
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Pointer position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to `self`
    pub fn delta_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Box of `fraction` of this box's size, centered inside it
    pub fn centered_fraction(&self, fraction: f64) -> Rect {
        let width = self.width * fraction;
        let height = self.height * fraction;
        Rect::new(
            self.left + (self.width - width) / 2.0,
            self.top + (self.height - height) / 2.0,
            width,
            height,
        )
    }
}

/// Region a fixed-aspect video occupies inside its container (letterbox/pillarbox)
pub fn fit_within(intrinsic: Size, container: Size) -> Rect {
    let video_aspect = intrinsic.aspect();
    let container_aspect = container.aspect();

    if video_aspect <= 0.0 || container.is_empty() {
        return Rect::new(0.0, 0.0, container.width.max(0.0), container.height.max(0.0));
    }

    if video_aspect > container_aspect {
        let height = container.width * intrinsic.height / intrinsic.width;
        Rect::new(0.0, (container.height - height) / 2.0, container.width, height)
    } else {
        let width = container.height * intrinsic.width / intrinsic.height;
        Rect::new((container.width - width) / 2.0, 0.0, width, container.height)
    }
}

/// Intrinsic frame size and on-screen container size of the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoLayout {
    pub intrinsic: Size,
    pub container: Size,
}

impl VideoLayout {
    pub fn new(intrinsic: Size, container: Size) -> Self {
        Self {
            intrinsic,
            container,
        }
    }

    /// Where the video is painted inside the container
    pub fn displayed(&self) -> Rect {
        fit_within(self.intrinsic, self.container)
    }
}

/// Convert an on-screen crop box into native video pixels
///
/// `displayed` is where the video is painted on screen and `intrinsic` is
/// its native frame size. Components are rounded to the nearest pixel.
pub fn to_native(crop_box: Rect, displayed: Rect, intrinsic: Size) -> CropRect {
    let scale_x = if displayed.width > 0.0 {
        intrinsic.width / displayed.width
    } else {
        0.0
    };
    let scale_y = if displayed.height > 0.0 {
        intrinsic.height / displayed.height
    } else {
        0.0
    };

    CropRect {
        x: ((crop_box.left - displayed.left) * scale_x).round() as i64,
        y: ((crop_box.top - displayed.top) * scale_y).round() as i64,
        width: (crop_box.width * scale_x).round() as i64,
        height: (crop_box.height * scale_y).round() as i64,
    }
}
