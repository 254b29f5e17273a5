//! Core data models for the tabletop: zones, characters, tokens and drawings.
//! The JSON shape (camelCase keys) matches the exported `{zones, characters}` blob.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::{Point, cell_center};
use crate::settings::{
    BACKGROUND_DEFAULT_HEIGHT, BACKGROUND_DEFAULT_WIDTH, DEFAULT_BACKGROUND_COLOR,
    DEFAULT_GRID_COLOR, DEFAULT_GRID_OPACITY, DEFAULT_GRID_SIZE, DEFAULT_ZONE_NAME,
    NEW_TOKEN_CELL,
};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

// ---------------- Characters -----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    #[default]
    Player,
    Ally,
    Enemy,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 3] = [CharacterKind::Player, CharacterKind::Ally, CharacterKind::Enemy];

    pub fn label(self) -> &'static str {
        match self {
            CharacterKind::Player => "player",
            CharacterKind::Ally => "ally",
            CharacterKind::Enemy => "enemy",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Token border color.
    pub fn color(self) -> &'static str {
        match self {
            CharacterKind::Player => "#22c55e",
            CharacterKind::Ally => "#3b82f6",
            CharacterKind::Enemy => "#ef4444",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CharacterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Character {
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Look up a token's character. `None` is an ordinary outcome: the token is orphaned
/// and gets skipped wherever it would be shown.
pub fn resolve_character<'a>(roster: &'a [Character], id: &str) -> Option<&'a Character> {
    roster.iter().find(|c| c.id == id)
}

// ---------------- Tokens -----------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub character_id: String,
    /// World position in pixels; snapped tokens sit on a cell center.
    pub x: f64,
    pub y: f64,
    /// Cell indices kept alongside x/y for the stored format.
    pub grid_x: i64,
    pub grid_y: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_dead: bool,
}

impl Token {
    /// A fresh token on the default cell, centered.
    pub fn placed(id: String, character_id: String, grid_size: f64) -> Self {
        Self {
            id,
            character_id,
            x: cell_center(NEW_TOKEN_CELL, grid_size),
            y: cell_center(NEW_TOKEN_CELL, grid_size),
            grid_x: NEW_TOKEN_CELL,
            grid_y: NEW_TOKEN_CELL,
            is_dead: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Merge a partial update; returns whether anything changed.
    pub fn apply(&mut self, update: &TokenUpdate) -> bool {
        let before = self.clone();
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(gx) = update.grid_x {
            self.grid_x = gx;
        }
        if let Some(gy) = update.grid_y {
            self.grid_y = gy;
        }
        if let Some(dead) = update.is_dead {
            self.is_dead = dead;
        }
        *self != before
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub grid_x: Option<i64>,
    pub grid_y: Option<i64>,
    pub is_dead: Option<bool>,
}

impl TokenUpdate {
    pub fn position(x: f64, y: f64, grid_x: i64, grid_y: i64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            grid_x: Some(grid_x),
            grid_y: Some(grid_y),
            is_dead: None,
        }
    }
}

/// Position of `token` among tokens showing the same character name and kind,
/// ordered by numeric id. `None` when the token is unique or orphaned.
pub fn token_number(tokens: &[Token], token: &Token, roster: &[Character]) -> Option<usize> {
    let current = resolve_character(roster, &token.character_id)?;
    let mut same: Vec<&Token> = tokens
        .iter()
        .filter(|t| {
            resolve_character(roster, &t.character_id)
                .is_some_and(|c| c.name == current.name && c.kind == current.kind)
        })
        .collect();
    if same.len() <= 1 {
        return None;
    }
    same.sort_by_key(|t| t.id.parse::<u64>().unwrap_or(u64::MAX));
    same.iter().position(|t| t.id == token.id).map(|i| i + 1)
}

pub fn token_display_name(token: &Token, roster: &[Character], tokens: &[Token]) -> String {
    let Some(character) = resolve_character(roster, &token.character_id) else {
        return "Unknown".to_string();
    };
    match token_number(tokens, token, roster) {
        Some(n) => format!("{} ({})", character.name, n),
        None => character.name.clone(),
    }
}

// ---------------- Drawings -----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Line];

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    /// Fill color when filling is enabled.
    pub fill: Option<String>,
}

impl Shape {
    /// Circles are centered on the press point and reach the release point.
    pub fn radius(&self) -> f64 {
        self.start.distance(self.end)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stroke {
    Path(Vec<Point>),
    Shape(Shape),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDrawing", into = "RawDrawing")]
pub struct Drawing {
    pub id: String,
    pub color: String,
    pub thickness: f64,
    pub stroke: Stroke,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawDrawingKind {
    Freehand,
    Rectangle,
    Circle,
    Line,
}

/// Stored form: free-hand paths carry `points`, shapes carry `type` plus endpoints.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrawing {
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    points: Vec<Point>,
    #[serde(default = "default_stroke_color")]
    color: String,
    #[serde(default = "default_thickness")]
    thickness: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<RawDrawingKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_point: Option<Point>,
}

fn default_stroke_color() -> String {
    "#000000".to_string()
}

fn default_thickness() -> f64 {
    1.0
}

impl From<RawDrawing> for Drawing {
    fn from(raw: RawDrawing) -> Self {
        let shape_kind = match raw.kind {
            Some(RawDrawingKind::Rectangle) => Some(ShapeKind::Rectangle),
            Some(RawDrawingKind::Circle) => Some(ShapeKind::Circle),
            Some(RawDrawingKind::Line) => Some(ShapeKind::Line),
            Some(RawDrawingKind::Freehand) | None => None,
        };
        // A shape without both endpoints cannot be drawn as one; keep its path.
        let stroke = match (shape_kind, raw.start_point, raw.end_point) {
            (Some(kind), Some(start), Some(end)) => Stroke::Shape(Shape {
                kind,
                start,
                end,
                fill: if raw.has_fill.unwrap_or(false) { raw.fill_color } else { None },
            }),
            _ => Stroke::Path(raw.points),
        };
        Drawing {
            id: raw.id,
            color: raw.color,
            thickness: raw.thickness,
            stroke,
        }
    }
}

impl From<Drawing> for RawDrawing {
    fn from(d: Drawing) -> Self {
        match d.stroke {
            Stroke::Path(points) => RawDrawing {
                id: d.id,
                points,
                color: d.color,
                thickness: d.thickness,
                kind: None,
                fill_color: None,
                has_fill: None,
                start_point: None,
                end_point: None,
            },
            Stroke::Shape(shape) => RawDrawing {
                id: d.id,
                points: Vec::new(),
                color: d.color,
                thickness: d.thickness,
                kind: Some(match shape.kind {
                    ShapeKind::Rectangle => RawDrawingKind::Rectangle,
                    ShapeKind::Circle => RawDrawingKind::Circle,
                    ShapeKind::Line => RawDrawingKind::Line,
                }),
                has_fill: Some(shape.fill.is_some()),
                fill_color: shape.fill,
                start_point: Some(shape.start),
                end_point: Some(shape.end),
            },
        }
    }
}

// ---------------- Zones -----------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    pub url: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_background_width")]
    pub width: f64,
    #[serde(default = "default_background_height")]
    pub height: f64,
    /// Degrees, kept within (-360, 360).
    #[serde(default, deserialize_with = "null_as_default")]
    pub rotation: f64,
}

fn default_background_width() -> f64 {
    BACKGROUND_DEFAULT_WIDTH
}

fn default_background_height() -> f64 {
    BACKGROUND_DEFAULT_HEIGHT
}

impl BackgroundImage {
    pub fn at_origin(url: String) -> Self {
        Self {
            url,
            x: 0.0,
            y: 0.0,
            width: BACKGROUND_DEFAULT_WIDTH,
            height: BACKGROUND_DEFAULT_HEIGHT,
            rotation: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawZone")]
pub struct Zone {
    pub id: String,
    pub name: String,
    /// Pixels per cell, always > 0.
    pub grid_size: f64,
    pub grid_color: String,
    pub grid_opacity: f64,
    pub background_color: String,
    pub background_image: Option<BackgroundImage>,
    pub tokens: Vec<Token>,
    pub drawings: Vec<Drawing>,
}

/// Lenient stored form; missing or null fields take the documented defaults.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawZone {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    grid_size: Option<f64>,
    #[serde(default)]
    grid_color: Option<String>,
    #[serde(default)]
    grid_opacity: Option<f64>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    background_image: Option<BackgroundImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    tokens: Vec<Token>,
    #[serde(default, deserialize_with = "null_as_default")]
    drawings: Vec<Drawing>,
}

impl From<RawZone> for Zone {
    fn from(raw: RawZone) -> Self {
        let mut zone = Zone {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            grid_size: raw.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            grid_color: raw.grid_color.unwrap_or_default(),
            grid_opacity: raw.grid_opacity.unwrap_or(DEFAULT_GRID_OPACITY),
            background_color: raw.background_color.unwrap_or_default(),
            background_image: raw.background_image,
            tokens: raw.tokens,
            drawings: raw.drawings,
        };
        zone.normalize();
        zone
    }
}

impl Zone {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            grid_size: DEFAULT_GRID_SIZE,
            grid_color: DEFAULT_GRID_COLOR.to_string(),
            grid_opacity: DEFAULT_GRID_OPACITY,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            background_image: None,
            tokens: Vec::new(),
            drawings: Vec::new(),
        }
    }

    /// Replace out-of-range or empty settings with defaults. Token positions are
    /// left alone even when they are off-center.
    pub fn normalize(&mut self) {
        if self.name.trim().is_empty() {
            self.name = DEFAULT_ZONE_NAME.to_string();
        }
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            self.grid_size = DEFAULT_GRID_SIZE;
        }
        if self.grid_color.is_empty() {
            self.grid_color = DEFAULT_GRID_COLOR.to_string();
        }
        self.grid_opacity = if self.grid_opacity.is_finite() {
            self.grid_opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_GRID_OPACITY
        };
        if self.background_color.is_empty() {
            self.background_color = DEFAULT_BACKGROUND_COLOR.to_string();
        }
        if let Some(bg) = self.background_image.as_mut() {
            if !bg.rotation.is_finite() {
                bg.rotation = 0.0;
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            drawings: self.drawings.clone(),
            tokens: self.tokens.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.drawings = snapshot.drawings.clone();
        self.tokens = snapshot.tokens.clone();
    }
}

/// Copy of the board content (drawings and tokens) at one instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub drawings: Vec<Drawing>,
    pub tokens: Vec<Token>,
}

// ---------------- Whole application blob -----------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub zones: Vec<Zone>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Vec<Character>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: &str, name: &str, kind: CharacterKind) -> Character {
        Character {
            id: id.into(),
            name: name.into(),
            kind,
            image_url: None,
        }
    }

    #[test]
    fn zone_defaults_fill_missing_fields() {
        let zone: Zone = serde_json::from_str(r#"{"id":"z1"}"#).unwrap();
        assert_eq!(zone.name, "Untitled Zone");
        assert_eq!(zone.grid_size, 50.0);
        assert_eq!(zone.grid_color, "#000000");
        assert_eq!(zone.grid_opacity, 0.3);
        assert_eq!(zone.background_color, "#ffffff");
        assert!(zone.background_image.is_none());
        assert!(zone.tokens.is_empty());
        assert!(zone.drawings.is_empty());
    }

    #[test]
    fn zero_grid_size_falls_back() {
        let zone: Zone = serde_json::from_str(r#"{"id":"z1","gridSize":0,"gridOpacity":0}"#).unwrap();
        assert_eq!(zone.grid_size, 50.0);
        assert_eq!(zone.grid_opacity, 0.0);
    }

    #[test]
    fn legacy_token_positions_are_kept() {
        let raw = r#"{"id":"z1","tokens":[{"id":"1","characterId":"c","x":10,"y":17,"gridX":0,"gridY":0}]}"#;
        let zone: Zone = serde_json::from_str(raw).unwrap();
        assert_eq!(zone.tokens[0].x, 10.0);
        assert_eq!(zone.tokens[0].y, 17.0);
        assert!(!zone.tokens[0].is_dead);
    }

    #[test]
    fn freehand_drawing_has_no_type_key() {
        let d = Drawing {
            id: "1".into(),
            color: "#ff0000".into(),
            thickness: 3.0,
            stroke: Stroke::Path(vec![Point::new(1.0, 2.0)]),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("type").is_none());
        assert_eq!(json["points"][0]["x"], 1.0);
    }

    #[test]
    fn shape_drawing_reads_fill_only_when_enabled() {
        let raw = r##"{"id":"2","points":[],"color":"#000","thickness":2,"type":"circle",
            "fillColor":"#00f","hasFill":false,"startPoint":{"x":0,"y":0},"endPoint":{"x":3,"y":4}}"##;
        let d: Drawing = serde_json::from_str(raw).unwrap();
        match d.stroke {
            Stroke::Shape(shape) => {
                assert_eq!(shape.kind, ShapeKind::Circle);
                assert_eq!(shape.fill, None);
                assert_eq!(shape.radius(), 5.0);
            }
            Stroke::Path(_) => panic!("expected a shape"),
        }
    }

    #[test]
    fn shape_without_endpoints_keeps_path() {
        let raw = r##"{"id":"3","points":[{"x":1,"y":1}],"color":"#000","thickness":2,"type":"line"}"##;
        let d: Drawing = serde_json::from_str(raw).unwrap();
        assert_eq!(d.stroke, Stroke::Path(vec![Point::new(1.0, 1.0)]));
    }

    #[test]
    fn duplicate_tokens_are_numbered_by_id() {
        let roster = vec![character("c1", "Goblin", CharacterKind::Enemy)];
        let tokens = vec![
            Token::placed("20".into(), "c1".into(), 50.0),
            Token::placed("3".into(), "c1".into(), 50.0),
        ];
        assert_eq!(token_display_name(&tokens[0], &roster, &tokens), "Goblin (2)");
        assert_eq!(token_display_name(&tokens[1], &roster, &tokens), "Goblin (1)");
    }

    #[test]
    fn single_and_orphan_tokens_have_plain_names() {
        let roster = vec![character("c1", "Aria", CharacterKind::Player)];
        let tokens = vec![
            Token::placed("1".into(), "c1".into(), 50.0),
            Token::placed("2".into(), "gone".into(), 50.0),
        ];
        assert_eq!(token_display_name(&tokens[0], &roster, &tokens), "Aria");
        assert_eq!(token_display_name(&tokens[1], &roster, &tokens), "Unknown");
    }

    #[test]
    fn placed_token_sits_on_cell_center() {
        let t = Token::placed("1".into(), "c".into(), 50.0);
        assert_eq!((t.x, t.y, t.grid_x, t.grid_y), (125.0, 125.0, 2, 2));
    }

    #[test]
    fn token_apply_reports_changes() {
        let mut t = Token::placed("1".into(), "c".into(), 50.0);
        assert!(!t.apply(&TokenUpdate::position(125.0, 125.0, 2, 2)));
        assert!(t.apply(&TokenUpdate {
            is_dead: Some(true),
            ..Default::default()
        }));
        assert!(t.is_dead);
    }
}
