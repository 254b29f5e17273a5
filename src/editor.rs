//! The zone editor: owns one zone plus its camera, history and gesture state,
//! and routes pointer input to whichever gesture is in play.
//!
//! Board content (tokens and drawings) goes through [`ZoneEditor::commit`],
//! which records history and marks the zone unsaved. Zone settings only mark
//! it unsaved.

use anyhow::Context;

use crate::geometry::Point;
use crate::model::{
    BackgroundImage, Character, Drawing, Snapshot, Token, TokenUpdate, Zone,
    resolve_character, token_display_name,
};
use crate::settings::{BACKGROUND_MIN_SIZE, EditorPreferences};
use crate::state::drawing::erase_at;
use crate::state::{
    Camera, Capture, CaptureEffect, CaptureEvent, DragEvent, DrawingDraft, History, StrokeStyle,
    TokenDrag, Tool, TouchState, background_contains, on_resize_handle, token_at,
};
use crate::storage::Persistence;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Edit,
    View,
}

pub const BUTTON_PRIMARY: i16 = 0;
pub const BUTTON_MIDDLE: i16 = 1;
const BUTTONS_PRIMARY_HELD: u16 = 1;

/// One pointer sample: screen position plus DOM `button` / `buttons` values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub screen: Point,
    pub button: i16,
    pub buttons: u16,
}

impl PointerInput {
    pub fn new(screen: Point, button: i16, buttons: u16) -> Self {
        Self { screen, button, buttons }
    }

    /// A single finger acts like the primary mouse button held down.
    pub fn touch(screen: Point) -> Self {
        Self::new(screen, BUTTON_PRIMARY, BUTTONS_PRIMARY_HELD)
    }

    fn primary(&self) -> bool {
        self.button == BUTTON_PRIMARY
    }

    fn primary_held(&self) -> bool {
        self.buttons & BUTTONS_PRIMARY_HELD != 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Save,
}

impl Shortcut {
    /// Map a key press to an editor shortcut. Ctrl and Cmd are interchangeable.
    pub fn from_key(key: &str, ctrl: bool, meta: bool, shift: bool) -> Option<Self> {
        if !(ctrl || meta) {
            return None;
        }
        match key.to_ascii_lowercase().as_str() {
            "z" if shift => Some(Shortcut::Redo),
            "z" => Some(Shortcut::Undo),
            "y" => Some(Shortcut::Redo),
            "s" => Some(Shortcut::Save),
            _ => None,
        }
    }
}

/// A character with at least one token on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardCharacter<'a> {
    pub character: &'a Character,
    pub tokens: usize,
    /// Dead flag of the character's first token.
    pub dead: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum BackgroundGesture {
    #[default]
    Idle,
    Moving {
        last: Point,
    },
    Resizing {
        last: Point,
    },
}

pub struct ZoneEditor {
    zone: Zone,
    characters: Vec<Character>,
    mode: EditMode,
    pub camera: Camera,
    touch: TouchState,
    history: History,
    drag: TokenDrag,
    capture: Capture,
    tool: Option<Tool>,
    style: StrokeStyle,
    background: BackgroundGesture,
    editing_background: bool,
    unsaved: bool,
    /// Bumped on every change to the zone, so the shell can schedule autosave.
    revision: u64,
    next_id: u64,
}

impl ZoneEditor {
    pub fn new(mut zone: Zone, characters: Vec<Character>, mode: EditMode, id_seed: u64) -> Self {
        zone.normalize();
        let highest = zone
            .tokens
            .iter()
            .map(|t| t.id.as_str())
            .chain(zone.drawings.iter().map(|d| d.id.as_str()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max();
        let next_id = match highest {
            Some(h) => id_seed.max(h.saturating_add(1)),
            None => id_seed,
        };
        log::info!(
            "opening zone {} ({} tokens, {} drawings) in {:?} mode",
            zone.id,
            zone.tokens.len(),
            zone.drawings.len(),
            mode
        );
        let history = History::new(zone.snapshot());
        Self {
            zone,
            characters,
            mode,
            camera: Camera::default(),
            touch: TouchState::default(),
            history,
            drag: TokenDrag::Idle,
            capture: Capture::Idle,
            tool: None,
            style: StrokeStyle::default(),
            background: BackgroundGesture::Idle,
            editing_background: false,
            unsaved: false,
            revision: 0,
            next_id,
        }
    }

    // ---------------- accessors ----------------

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editable(&self) -> bool {
        self.mode == EditMode::Edit
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_editing_background(&self) -> bool {
        self.editing_background
    }

    pub fn dragged_token(&self) -> Option<&str> {
        self.drag.token_id()
    }

    /// Next unused numeric id. Wraps to 0 past `u64::MAX` and skips ids
    /// already on the board.
    fn fresh_id(&mut self) -> String {
        let mut id = self.next_id;
        while self.id_in_use(id) {
            id = id.checked_add(1).unwrap_or(0);
        }
        self.next_id = id.checked_add(1).unwrap_or(0);
        id.to_string()
    }

    fn id_in_use(&self, id: u64) -> bool {
        let id = id.to_string();
        self.zone.tokens.iter().any(|t| t.id == id) || self.zone.drawings.iter().any(|d| d.id == id)
    }

    fn touch_zone(&mut self) {
        self.unsaved = true;
        self.revision += 1;
    }

    /// Record the board after a content change.
    fn commit(&mut self) {
        self.history.record(self.zone.snapshot());
        self.touch_zone();
    }

    // ---------------- tools ----------------

    /// Switching tools abandons any gesture in progress.
    pub fn set_tool(&mut self, tool: Option<Tool>) {
        if self.tool != tool {
            self.capture = Capture::Idle;
            self.drag = TokenDrag::Idle;
            self.tool = tool;
        }
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn apply_preferences(&mut self, prefs: &EditorPreferences) {
        self.style = StrokeStyle {
            color: prefs.draw_color.clone(),
            thickness: prefs.draw_thickness,
            fill: prefs.has_fill.then(|| prefs.fill_color.clone()),
        };
        if let Some(Tool::Shape(_)) = self.tool {
            self.tool = Some(Tool::Shape(prefs.shape));
        }
    }

    // ---------------- tokens ----------------

    /// Place a token for `character_id` on the default cell. Returns the new id.
    pub fn add_token(&mut self, character_id: &str) -> Option<String> {
        if !self.is_editable() {
            return None;
        }
        if resolve_character(&self.characters, character_id).is_none() {
            log::warn!("cannot place token for unknown character {character_id}");
            return None;
        }
        let id = self.fresh_id();
        let token = Token::placed(id.clone(), character_id.to_string(), self.zone.grid_size);
        self.zone.tokens.push(token);
        self.commit();
        Some(id)
    }

    pub fn update_token(&mut self, id: &str, update: &TokenUpdate) -> bool {
        let Some(token) = self.zone.tokens.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !token.apply(update) {
            return false;
        }
        self.commit();
        true
    }

    pub fn delete_token(&mut self, id: &str) -> bool {
        let before = self.zone.tokens.len();
        self.zone.tokens.retain(|t| t.id != id);
        if self.zone.tokens.len() == before {
            return false;
        }
        if self.drag.token_id() == Some(id) {
            self.drag = TokenDrag::Idle;
        }
        self.commit();
        true
    }

    /// Right-click on a token removes it. Returns whether a token was removed.
    pub fn delete_token_at(&mut self, screen: Point) -> bool {
        if !self.is_editable() || self.tool.is_some() {
            return false;
        }
        let world = self.camera.screen_to_world(screen);
        let Some(id) = self.token_at(world).map(|t| t.id.clone()) else {
            return false;
        };
        self.delete_token(&id)
    }

    pub fn delete_tokens_for_character(&mut self, character_id: &str) -> usize {
        let before = self.zone.tokens.len();
        self.zone.tokens.retain(|t| t.character_id != character_id);
        let removed = before - self.zone.tokens.len();
        if removed > 0 {
            self.drag = TokenDrag::Idle;
            self.commit();
        }
        removed
    }

    /// Flip the dead flag on every token of a character.
    pub fn toggle_dead(&mut self, character_id: &str) -> bool {
        let mut changed = false;
        for token in self.zone.tokens.iter_mut().filter(|t| t.character_id == character_id) {
            token.is_dead = !token.is_dead;
            changed = true;
        }
        if changed {
            self.commit();
        }
        changed
    }

    // ---------------- drawings ----------------

    pub fn add_drawing(&mut self, draft: DrawingDraft) -> String {
        let id = self.fresh_id();
        self.zone.drawings.push(draft.with_id(id.clone()));
        self.commit();
        id
    }

    pub fn replace_drawings(&mut self, drawings: Vec<Drawing>) {
        if self.zone.drawings == drawings {
            return;
        }
        self.zone.drawings = drawings;
        self.commit();
    }

    pub fn remove_last_drawing(&mut self) -> bool {
        if self.zone.drawings.pop().is_none() {
            return false;
        }
        self.commit();
        true
    }

    pub fn clear_drawings(&mut self) -> bool {
        if self.zone.drawings.is_empty() {
            return false;
        }
        self.zone.drawings.clear();
        self.commit();
        true
    }

    // ---------------- history ----------------

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(&snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(&snapshot);
        true
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.zone.restore(snapshot);
        self.drag = TokenDrag::Idle;
        self.capture = Capture::Idle;
        self.touch_zone();
    }

    // ---------------- zone settings ----------------

    pub fn set_zone_name(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && name != self.zone.name {
            self.zone.name = name.to_string();
            self.touch_zone();
        }
    }

    pub fn set_grid_opacity(&mut self, opacity: f64) {
        if !opacity.is_finite() {
            return;
        }
        self.zone.grid_opacity = opacity.clamp(0.0, 1.0);
        self.touch_zone();
    }

    pub fn set_grid_color(&mut self, color: &str) {
        self.zone.grid_color = color.to_string();
        self.touch_zone();
    }

    /// A plain background color replaces any background image.
    pub fn set_background_color(&mut self, color: &str) {
        self.zone.background_color = color.to_string();
        self.zone.background_image = None;
        self.editing_background = false;
        self.touch_zone();
    }

    pub fn set_background_image_url(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            self.remove_background_image();
            return;
        }
        self.zone.background_image = Some(BackgroundImage::at_origin(url.to_string()));
        self.editing_background = true;
        self.touch_zone();
    }

    pub fn remove_background_image(&mut self) {
        self.zone.background_image = None;
        self.editing_background = false;
        self.background = BackgroundGesture::Idle;
        self.touch_zone();
    }

    pub fn rotate_background(&mut self, degrees: f64) {
        if let Some(bg) = self.zone.background_image.as_mut() {
            bg.rotation = (bg.rotation + degrees) % 360.0;
            self.touch_zone();
        }
    }

    pub fn set_editing_background(&mut self, editing: bool) {
        self.editing_background = editing && self.zone.background_image.is_some();
        if !self.editing_background {
            self.background = BackgroundGesture::Idle;
        }
    }

    // ---------------- pointer routing ----------------

    pub fn pointer_down(&mut self, input: PointerInput) {
        if input.button == BUTTON_MIDDLE {
            self.camera.begin_pan(input.screen);
            return;
        }
        if !self.is_editable() {
            return;
        }
        let world = self.camera.screen_to_world(input.screen);
        if let Some(tool) = self.tool {
            let event = CaptureEvent::Press { point: world, primary: input.primary() };
            let effect = self.capture.handle(tool, &self.style, event);
            self.apply_capture(effect);
            return;
        }
        if !input.primary() {
            return;
        }
        if self.editing_background {
            if let Some(bg) = self.zone.background_image.as_ref() {
                if on_resize_handle(bg, world) {
                    self.background = BackgroundGesture::Resizing { last: world };
                    return;
                }
                if background_contains(bg, world) {
                    self.background = BackgroundGesture::Moving { last: world };
                    return;
                }
            }
        }
        if let Some(token) = token_at(&self.zone.tokens, &self.characters, world) {
            self.drag.handle(DragEvent::Press {
                token,
                pointer: world,
                grid_size: self.zone.grid_size,
            });
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        if self.camera.pan_to(input.screen) {
            return;
        }
        let world = self.camera.screen_to_world(input.screen);
        if let Some(tool) = self.tool {
            let event = CaptureEvent::Move { point: world, primary_held: input.primary_held() };
            let effect = self.capture.handle(tool, &self.style, event);
            self.apply_capture(effect);
            return;
        }
        if self.background != BackgroundGesture::Idle {
            self.move_background(world);
            return;
        }
        if let Some(update) = self.drag.handle(DragEvent::Move { pointer: world }) {
            let patch = TokenUpdate::position(update.x, update.y, update.grid_x, update.grid_y);
            self.update_token(&update.token_id, &patch);
        }
    }

    pub fn pointer_up(&mut self, _input: PointerInput) {
        self.finish_gestures(CaptureEvent::Release, DragEvent::Release);
    }

    /// Leaving the canvas ends every gesture the same way a release does.
    pub fn pointer_leave(&mut self) {
        self.finish_gestures(CaptureEvent::Leave, DragEvent::Leave);
    }

    fn finish_gestures(&mut self, capture_event: CaptureEvent, drag_event: DragEvent<'_>) {
        self.camera.end_pan();
        self.background = BackgroundGesture::Idle;
        self.drag.handle(drag_event);
        if let Some(tool) = self.tool {
            let effect = self.capture.handle(tool, &self.style, capture_event);
            self.apply_capture(effect);
        } else {
            self.capture = Capture::Idle;
        }
    }

    fn apply_capture(&mut self, effect: Option<CaptureEffect>) {
        match effect {
            Some(CaptureEffect::Completed(draft)) => {
                self.add_drawing(draft);
            }
            Some(CaptureEffect::EraseAt { point, radius }) => {
                if let Some(remaining) = erase_at(&self.zone.drawings, point, radius) {
                    self.replace_drawings(remaining);
                }
            }
            None => {}
        }
    }

    fn move_background(&mut self, world: Point) {
        let Some(bg) = self.zone.background_image.as_mut() else {
            self.background = BackgroundGesture::Idle;
            return;
        };
        match &mut self.background {
            BackgroundGesture::Moving { last } => {
                bg.x += world.x - last.x;
                bg.y += world.y - last.y;
                *last = world;
            }
            BackgroundGesture::Resizing { last } => {
                bg.width = (bg.width + world.x - last.x).max(BACKGROUND_MIN_SIZE);
                bg.height = (bg.height + world.y - last.y).max(BACKGROUND_MIN_SIZE);
                *last = world;
            }
            BackgroundGesture::Idle => return,
        }
        self.touch_zone();
    }

    /// Wheel zoom around the cursor.
    pub fn wheel(&mut self, delta_y: f64, screen: Point) {
        let factor = (-delta_y * 0.001).exp();
        self.camera.zoom_at(factor, screen);
    }

    // ---------------- touch ----------------

    pub fn touch_start(&mut self, touches: &[Point]) {
        match touches {
            [a, b, ..] => {
                // A second finger turns the gesture into navigation.
                self.pointer_leave();
                self.touch.begin_pinch(*a, *b, &self.camera);
            }
            [p] => {
                self.touch.begin_single();
                self.pointer_down(PointerInput::touch(*p));
            }
            [] => {}
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        match touches {
            [a, b, ..] if self.touch.pinch => {
                self.touch.pinch_to(*a, *b, &mut self.camera);
            }
            [p] if self.touch.single_active => self.pointer_move(PointerInput::touch(*p)),
            _ => {}
        }
    }

    pub fn touch_end(&mut self, remaining: usize) {
        if self.touch.pinch {
            if remaining < 2 {
                self.touch.end();
            }
        } else if self.touch.single_active {
            self.pointer_up(PointerInput::touch(Point::ORIGIN));
            self.touch.end();
        }
    }

    // ---------------- queries ----------------

    pub fn tokens_for_render(&self) -> Vec<(&Token, &Character)> {
        self.zone
            .tokens
            .iter()
            .filter_map(|t| resolve_character(&self.characters, &t.character_id).map(|c| (t, c)))
            .collect()
    }

    pub fn token_label(&self, token: &Token) -> String {
        token_display_name(token, &self.characters, &self.zone.tokens)
    }

    pub fn characters_on_board(&self) -> Vec<BoardCharacter<'_>> {
        self.characters
            .iter()
            .filter_map(|character| {
                let mut tokens = self.zone.tokens.iter().filter(|t| t.character_id == character.id);
                let first = tokens.next()?;
                Some(BoardCharacter {
                    character,
                    tokens: 1 + tokens.count(),
                    dead: first.is_dead,
                })
            })
            .collect()
    }

    pub fn token_at(&self, world: Point) -> Option<&Token> {
        token_at(&self.zone.tokens, &self.characters, world)
    }

    pub fn capture_preview(&self) -> Option<DrawingDraft> {
        self.capture.preview(&self.style)
    }

    // ---------------- saving ----------------

    /// Merge the zone into stored data and write it. The zone stays unsaved on failure.
    pub fn save(&mut self, store: &mut dyn Persistence) -> anyhow::Result<()> {
        let mut data = store.load();
        data.upsert_zone(self.zone.clone());
        store
            .save(&data)
            .with_context(|| format!("saving zone {}", self.zone.id))?;
        self.unsaved = false;
        log::info!("saved zone {}", self.zone.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CharacterKind, ShapeKind, Stroke};

    fn roster() -> Vec<Character> {
        vec![
            Character {
                id: "c1".into(),
                name: "Aria".into(),
                kind: CharacterKind::Player,
                image_url: None,
            },
            Character {
                id: "c2".into(),
                name: "Goblin".into(),
                kind: CharacterKind::Enemy,
                image_url: None,
            },
        ]
    }

    fn editor() -> ZoneEditor {
        ZoneEditor::new(Zone::new("z1".into(), "Cave".into()), roster(), EditMode::Edit, 1000)
    }

    fn at(x: f64, y: f64) -> PointerInput {
        PointerInput::new(Point::new(x, y), BUTTON_PRIMARY, 1)
    }

    #[test]
    fn shortcuts_need_a_modifier() {
        assert_eq!(Shortcut::from_key("z", true, false, false), Some(Shortcut::Undo));
        assert_eq!(Shortcut::from_key("Z", false, true, true), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key("y", true, false, false), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key("s", true, false, false), Some(Shortcut::Save));
        assert_eq!(Shortcut::from_key("z", false, false, false), None);
    }

    #[test]
    fn unknown_character_gets_no_token() {
        let mut ed = editor();
        assert_eq!(ed.add_token("nobody"), None);
        assert!(ed.zone().tokens.is_empty());
        assert!(!ed.has_unsaved_changes());
    }

    #[test]
    fn ids_skip_past_existing_ones() {
        let mut zone = Zone::new("z1".into(), "Cave".into());
        zone.tokens.push(Token::placed("5000".into(), "c1".into(), 50.0));
        let mut ed = ZoneEditor::new(zone, roster(), EditMode::Edit, 10);
        assert_eq!(ed.add_token("c1").as_deref(), Some("5001"));
    }

    #[test]
    fn ids_wrap_instead_of_overflowing() {
        let mut zone = Zone::new("z1".into(), "Cave".into());
        zone.tokens.push(Token::placed(u64::MAX.to_string(), "c1".into(), 50.0));
        zone.tokens.push(Token::placed("0".into(), "c1".into(), 50.0));
        let mut ed = ZoneEditor::new(zone, roster(), EditMode::Edit, 10);
        assert_eq!(ed.add_token("c1").as_deref(), Some("1"));
        assert_eq!(ed.add_token("c2").as_deref(), Some("2"));
        let mut ids: Vec<&str> = ed.zone().tokens.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn deleting_dragged_token_ends_the_drag() {
        let mut ed = editor();
        let id = ed.add_token("c1").unwrap();
        ed.pointer_down(at(125.0, 125.0));
        assert_eq!(ed.dragged_token(), Some(id.as_str()));
        assert!(ed.delete_token(&id));
        assert!(ed.dragged_token().is_none());
        assert!(ed.zone().tokens.is_empty());
        ed.pointer_move(at(275.0, 275.0));
        assert!(ed.zone().tokens.is_empty());
    }

    #[test]
    fn deleting_unknown_token_records_nothing() {
        let mut ed = editor();
        ed.add_token("c1");
        let entries = ed.history().len();
        let revision = ed.revision();
        assert!(!ed.delete_token("missing"));
        assert_eq!(ed.history().len(), entries);
        assert_eq!(ed.revision(), revision);
    }

    #[test]
    fn right_click_removes_token_only_when_editing() {
        let mut zone = Zone::new("z1".into(), "Cave".into());
        zone.tokens.push(Token::placed("1".into(), "c1".into(), 50.0));
        let mut viewer = ZoneEditor::new(zone.clone(), roster(), EditMode::View, 10);
        assert!(!viewer.delete_token_at(Point::new(125.0, 125.0)));
        assert_eq!(viewer.zone().tokens.len(), 1);

        let mut ed = ZoneEditor::new(zone, roster(), EditMode::Edit, 10);
        assert!(!ed.delete_token_at(Point::new(300.0, 300.0)));
        assert!(ed.delete_token_at(Point::new(130.0, 120.0)));
        assert!(ed.zone().tokens.is_empty());
        assert!(ed.undo());
        assert_eq!(ed.zone().tokens.len(), 1);
    }

    #[test]
    fn view_mode_ignores_edits_but_pans() {
        let mut ed = ZoneEditor::new(Zone::new("z1".into(), "Cave".into()), roster(), EditMode::View, 1);
        assert_eq!(ed.add_token("c1"), None);
        ed.set_tool(Some(Tool::Brush));
        ed.pointer_down(at(10.0, 10.0));
        ed.pointer_up(at(10.0, 10.0));
        assert!(ed.zone().drawings.is_empty());
        ed.pointer_down(PointerInput::new(Point::new(0.0, 0.0), BUTTON_MIDDLE, 4));
        ed.pointer_move(PointerInput::new(Point::new(30.0, 20.0), BUTTON_MIDDLE, 4));
        assert_eq!(ed.camera.pan(), Point::new(30.0, 20.0));
    }

    #[test]
    fn brush_gesture_adds_one_drawing() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Brush));
        ed.pointer_down(at(10.0, 10.0));
        ed.pointer_move(at(20.0, 20.0));
        assert!(ed.capture_preview().is_some());
        ed.pointer_leave();
        assert_eq!(ed.zone().drawings.len(), 1);
        assert!(ed.capture_preview().is_none());
        assert!(ed.can_undo());
        assert!(ed.undo());
        assert!(ed.zone().drawings.is_empty());
    }

    #[test]
    fn drawing_respects_camera() {
        let mut ed = editor();
        ed.camera.set_zoom(2.0);
        ed.set_tool(Some(Tool::Shape(ShapeKind::Line)));
        ed.pointer_down(at(100.0, 100.0));
        ed.pointer_move(at(200.0, 100.0));
        ed.pointer_up(at(200.0, 100.0));
        match &ed.zone().drawings[0].stroke {
            Stroke::Shape(shape) => {
                assert_eq!(shape.start, Point::new(50.0, 50.0));
                assert_eq!(shape.end, Point::new(100.0, 50.0));
            }
            Stroke::Path(_) => panic!("expected a line"),
        }
    }

    #[test]
    fn eraser_miss_records_nothing() {
        let mut ed = editor();
        ed.set_tool(Some(Tool::Brush));
        ed.pointer_down(at(10.0, 10.0));
        ed.pointer_up(at(10.0, 10.0));
        let entries = ed.history().len();
        ed.set_tool(Some(Tool::Eraser));
        ed.pointer_down(at(500.0, 500.0));
        assert_eq!(ed.history().len(), entries);
        ed.pointer_down(at(12.0, 10.0));
        assert!(ed.zone().drawings.is_empty());
        assert_eq!(ed.history().len(), entries + 1);
    }

    #[test]
    fn toggle_dead_flips_every_token_of_character() {
        let mut ed = editor();
        ed.add_token("c2");
        ed.add_token("c2");
        ed.add_token("c1");
        assert!(ed.toggle_dead("c2"));
        let dead: Vec<bool> = ed.zone().tokens.iter().map(|t| t.is_dead).collect();
        assert_eq!(dead, vec![true, true, false]);
        let board = ed.characters_on_board();
        assert_eq!(board.len(), 2);
        assert_eq!((board[1].character.id.as_str(), board[1].tokens, board[1].dead), ("c2", 2, true));
    }

    #[test]
    fn duplicate_tokens_get_numbered_labels() {
        let mut ed = editor();
        ed.add_token("c2");
        ed.add_token("c2");
        let labels: Vec<String> = ed.zone().tokens.iter().map(|t| ed.token_label(t)).collect();
        assert_eq!(labels, vec!["Goblin (1)", "Goblin (2)"]);
    }

    #[test]
    fn background_image_enters_edit_and_clamps_resize() {
        let mut ed = editor();
        ed.set_background_image_url("map.png");
        assert!(ed.is_editing_background());
        ed.pointer_down(at(800.0, 600.0));
        ed.pointer_move(at(100.0, 100.0));
        ed.pointer_up(at(100.0, 100.0));
        let bg = ed.zone().background_image.clone().unwrap();
        assert_eq!((bg.width, bg.height), (100.0, 100.0));
        ed.pointer_down(at(50.0, 50.0));
        ed.pointer_move(at(70.0, 40.0));
        let bg = ed.zone().background_image.clone().unwrap();
        assert_eq!((bg.x, bg.y), (20.0, -10.0));
        assert!(!ed.can_undo());
    }

    #[test]
    fn background_color_clears_image() {
        let mut ed = editor();
        ed.set_background_image_url("map.png");
        ed.rotate_background(90.0);
        ed.rotate_background(300.0);
        assert_eq!(ed.zone().background_image.as_ref().unwrap().rotation, 30.0);
        ed.set_background_color("#333333");
        assert!(ed.zone().background_image.is_none());
        assert!(!ed.is_editing_background());
    }

    #[test]
    fn two_finger_touch_cancels_drag() {
        let mut ed = editor();
        ed.add_token("c1");
        ed.touch_start(&[Point::new(125.0, 125.0)]);
        assert!(ed.dragged_token().is_some());
        ed.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        assert!(ed.dragged_token().is_none());
        ed.touch_move(&[Point::new(50.0, 100.0), Point::new(250.0, 100.0)]);
        assert!((ed.camera.zoom - 2.0).abs() < 1e-9);
        ed.touch_end(0);
        assert_eq!(ed.zone().tokens[0].position(), Point::new(125.0, 125.0));
    }
}
