//! Virtual tabletop zone editor: battle maps with a snapping grid, character
//! tokens, free-hand and shape drawings, and bounded undo/redo, stored in the
//! browser.
//!
//! Everything outside `components`, `render` and `util` is plain Rust and runs
//! without a browser.

pub mod components;
pub mod editor;
pub mod geometry;
pub mod library;
pub mod model;
pub mod render;
pub mod settings;
pub mod state;
pub mod storage;
pub mod util;

pub use editor::{EditMode, PointerInput, Shortcut, ZoneEditor};
pub use model::{AppData, Character, CharacterKind, Drawing, Snapshot, Token, Zone};
