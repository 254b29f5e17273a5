//! Application constants and persisted editor preferences.

use serde::{Deserialize, Serialize};

use crate::model::ShapeKind;

pub const STORAGE_KEY: &str = "virtual-tabletop-data";
pub const PREFERENCES_KEY: &str = "vtt_editor_preferences";

pub const HISTORY_LIMIT: usize = 50;

pub const ZOOM_MIN: f64 = 0.3;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Debounce before an edit-mode change is written to storage.
pub const AUTOSAVE_DELAY_MS: u32 = 2000;
pub const SAVE_BADGE_MS: u32 = 2000;

/// Tokens render as 48px discs centered on their position.
pub const TOKEN_RADIUS: f64 = 24.0;
/// New tokens land in this cell on both axes.
pub const NEW_TOKEN_CELL: i64 = 2;

pub const DEFAULT_ZONE_NAME: &str = "Untitled Zone";
pub const DEFAULT_GRID_SIZE: f64 = 50.0;
pub const DEFAULT_GRID_COLOR: &str = "#000000";
pub const DEFAULT_GRID_OPACITY: f64 = 0.3;
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

pub const BACKGROUND_DEFAULT_WIDTH: f64 = 800.0;
pub const BACKGROUND_DEFAULT_HEIGHT: f64 = 600.0;
pub const BACKGROUND_MIN_SIZE: f64 = 100.0;

/// Drawing tool preferences remembered across sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorPreferences {
    pub draw_color: String,
    pub draw_thickness: f64,
    pub fill_color: String,
    pub has_fill: bool,
    pub shape: ShapeKind,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            draw_color: "#ff0000".to_string(),
            draw_thickness: 3.0,
            fill_color: "#ff0000".to_string(),
            has_fill: false,
            shape: ShapeKind::Rectangle,
        }
    }
}

impl EditorPreferences {
    /// Parse stored preferences; anything unreadable falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<EditorPreferences>(raw) {
            Ok(mut prefs) => {
                if !(prefs.draw_thickness.is_finite() && prefs.draw_thickness > 0.0) {
                    prefs.draw_thickness = EditorPreferences::default().draw_thickness;
                }
                prefs
            }
            Err(err) => {
                log::warn!("ignoring unreadable editor preferences: {err}");
                EditorPreferences::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_preferences_keep_defaults() {
        let prefs = EditorPreferences::from_json(r##"{"drawColor":"#00ff00"}"##);
        assert_eq!(prefs.draw_color, "#00ff00");
        assert_eq!(prefs.draw_thickness, 3.0);
        assert!(!prefs.has_fill);
    }

    #[test]
    fn garbage_preferences_fall_back() {
        assert_eq!(EditorPreferences::from_json("not json"), EditorPreferences::default());
    }

    #[test]
    fn non_positive_thickness_is_reset() {
        let prefs = EditorPreferences::from_json(r#"{"drawThickness":0}"#);
        assert_eq!(prefs.draw_thickness, 3.0);
    }
}
