pub mod camera;
pub mod drawing;
pub mod history;
pub mod interactable;
pub mod token_drag;
pub mod touch;

pub use camera::Camera;
pub use drawing::{Capture, CaptureEffect, CaptureEvent, DrawingDraft, StrokeStyle, Tool};
pub use history::History;
pub use interactable::{background_contains, on_resize_handle, token_at};
pub use token_drag::{DragEvent, DragUpdate, TokenDrag};
pub use touch::TouchState;
