// Crop box gestures - drag to move, handles to resize

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::ResizeMode;
use crate::domain::geometry::{Point, Rect};
use crate::error::EditorError;

/// Resize handle on the crop box border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Handle {
    fn moves_left(&self) -> bool {
        matches!(self, Handle::West | Handle::NorthWest | Handle::SouthWest)
    }

    fn moves_right(&self) -> bool {
        matches!(self, Handle::East | Handle::NorthEast | Handle::SouthEast)
    }

    fn moves_top(&self) -> bool {
        matches!(self, Handle::North | Handle::NorthEast | Handle::NorthWest)
    }

    fn moves_bottom(&self) -> bool {
        matches!(self, Handle::South | Handle::SouthEast | Handle::SouthWest)
    }
}

impl FromStr for Handle {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" => Ok(Handle::North),
            "ne" => Ok(Handle::NorthEast),
            "e" => Ok(Handle::East),
            "se" => Ok(Handle::SouthEast),
            "s" => Ok(Handle::South),
            "sw" => Ok(Handle::SouthWest),
            "w" => Ok(Handle::West),
            "nw" => Ok(Handle::NorthWest),
            other => Err(EditorError::Config {
                message: format!("Unknown resize handle: {}. Use n, ne, e, se, s, sw, w or nw", other),
            }),
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handle::North => "n",
            Handle::NorthEast => "ne",
            Handle::East => "e",
            Handle::SouthEast => "se",
            Handle::South => "s",
            Handle::SouthWest => "sw",
            Handle::West => "w",
            Handle::NorthWest => "nw",
        };
        f.write_str(name)
    }
}

/// What the pointer went down on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Body,
    Handle(Handle),
    Outside,
}

/// Active gesture with the geometry captured at pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Moving {
        anchor: Point,
        origin: Rect,
    },
    Resizing {
        handle: Handle,
        anchor: Point,
        origin: Rect,
    },
}

/// Gesture state machine; pointer capture lasts exactly as long as a gesture
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTracker {
    state: Gesture,
    mode: ResizeMode,
    min_size: f64,
}

impl GestureTracker {
    pub fn new(mode: ResizeMode, min_size: f64) -> Self {
        Self {
            state: Gesture::Idle,
            mode,
            min_size,
        }
    }

    pub fn state(&self) -> Gesture {
        self.state
    }

    /// Whether move/up events are currently routed to the tracker
    pub fn is_capturing(&self) -> bool {
        !matches!(self.state, Gesture::Idle)
    }

    /// Start a gesture; returns true when pointer capture begins
    pub fn pointer_down(&mut self, target: PointerTarget, at: Point, current: Rect) -> bool {
        self.state = match target {
            PointerTarget::Body => Gesture::Moving {
                anchor: at,
                origin: current,
            },
            PointerTarget::Handle(handle) => Gesture::Resizing {
                handle,
                anchor: at,
                origin: current,
            },
            PointerTarget::Outside => return false,
        };
        debug!(?target, x = at.x, y = at.y, "Crop gesture started");
        true
    }

    /// Box geometry for the pointer at `at`, or `None` when no gesture is active
    pub fn pointer_move(&self, at: Point) -> Option<Rect> {
        match self.state {
            Gesture::Idle => None,
            Gesture::Moving { anchor, origin } => {
                let (dx, dy) = at.delta_from(anchor);
                Some(origin.translated(dx, dy))
            }
            Gesture::Resizing {
                handle,
                anchor,
                origin,
            } => {
                let (dx, dy) = at.delta_from(anchor);
                Some(match self.mode {
                    ResizeMode::BottomRight => self.resize_bottom_right(origin, dx, dy),
                    ResizeMode::PerHandle => self.resize_per_handle(handle, origin, dx, dy),
                })
            }
        }
    }

    /// End the gesture; returns true when capture was released
    pub fn pointer_up(&mut self) -> bool {
        let was_capturing = self.is_capturing();
        self.state = Gesture::Idle;
        if was_capturing {
            debug!("Crop gesture ended");
        }
        was_capturing
    }

    pub fn cancel(&mut self) {
        self.state = Gesture::Idle;
    }

    fn resize_bottom_right(&self, origin: Rect, dx: f64, dy: f64) -> Rect {
        Rect::new(
            origin.left,
            origin.top,
            (origin.width + dx).max(self.min_size),
            (origin.height + dy).max(self.min_size),
        )
    }

    fn resize_per_handle(&self, handle: Handle, origin: Rect, dx: f64, dy: f64) -> Rect {
        let mut left = origin.left;
        let mut top = origin.top;
        let mut width = origin.width;
        let mut height = origin.height;

        if handle.moves_right() {
            width = (origin.width + dx).max(self.min_size);
        } else if handle.moves_left() {
            width = (origin.width - dx).max(self.min_size);
            left = origin.right() - width;
        }

        if handle.moves_bottom() {
            height = (origin.height + dy).max(self.min_size);
        } else if handle.moves_top() {
            height = (origin.height - dy).max(self.min_size);
            top = origin.bottom() - height;
        }

        Rect::new(left, top, width, height)
    }
}
