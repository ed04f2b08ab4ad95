// Application layer - Editor session and its controls

pub mod container;
pub mod editor_session;
pub mod gesture;
pub mod progress;
pub mod trim;

// Re-export the session surface
pub use container::{AppContainer, DefaultAppContainer};
pub use editor_session::{CropState, EditorSession};
pub use gesture::{Gesture, GestureTracker, Handle, PointerTarget};
pub use progress::{ProgressCallback, ProgressState, ProgressTracker};
pub use trim::{Slider, TrimControls};
