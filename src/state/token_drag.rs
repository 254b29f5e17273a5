//! Pointer-drag state machine for a single token.
//!
//! The pointer offset captured on press is kept for the whole gesture, so the
//! token keeps its position relative to the cursor instead of re-centering.
//! Every move emits the snapped target; the editor applies it and history
//! dedupes moves that stay inside one cell.

use crate::geometry::{Point, snap_point};
use crate::model::Token;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenDrag {
    #[default]
    Idle,
    Dragging {
        token_id: String,
        /// Pointer world position minus token position at press time.
        offset: Point,
        grid_size: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent<'a> {
    Press {
        token: &'a Token,
        pointer: Point,
        grid_size: f64,
    },
    Move {
        pointer: Point,
    },
    Release,
    Leave,
}

/// Snapped position for the dragged token.
#[derive(Clone, Debug, PartialEq)]
pub struct DragUpdate {
    pub token_id: String,
    pub x: f64,
    pub y: f64,
    pub grid_x: i64,
    pub grid_y: i64,
}

impl TokenDrag {
    /// Pure transition. Callers only send `Press` when dragging is allowed
    /// (edit mode, primary button, no drawing tool).
    pub fn transition(self, event: DragEvent<'_>) -> (TokenDrag, Option<DragUpdate>) {
        match (self, event) {
            (_, DragEvent::Press { token, pointer, grid_size }) => {
                let state = TokenDrag::Dragging {
                    token_id: token.id.clone(),
                    offset: token.position().offset_to(pointer),
                    grid_size,
                };
                (state, None)
            }
            (
                TokenDrag::Dragging { token_id, offset, grid_size },
                DragEvent::Move { pointer },
            ) => {
                let target = Point::new(pointer.x - offset.x, pointer.y - offset.y);
                let snapped = snap_point(target, grid_size);
                let update = DragUpdate {
                    token_id: token_id.clone(),
                    x: snapped.x,
                    y: snapped.y,
                    grid_x: snapped.grid_x,
                    grid_y: snapped.grid_y,
                };
                (TokenDrag::Dragging { token_id, offset, grid_size }, Some(update))
            }
            (TokenDrag::Idle, DragEvent::Move { .. }) => (TokenDrag::Idle, None),
            (_, DragEvent::Release | DragEvent::Leave) => (TokenDrag::Idle, None),
        }
    }

    /// In-place form of [`TokenDrag::transition`].
    pub fn handle(&mut self, event: DragEvent<'_>) -> Option<DragUpdate> {
        let (next, update) = std::mem::take(self).transition(event);
        *self = next;
        update
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, TokenDrag::Dragging { .. })
    }

    pub fn token_id(&self) -> Option<&str> {
        match self {
            TokenDrag::Dragging { token_id, .. } => Some(token_id),
            TokenDrag::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_at_cell(gx: i64, gy: i64) -> Token {
        Token {
            id: "t1".into(),
            character_id: "c1".into(),
            x: gx as f64 * 50.0 + 25.0,
            y: gy as f64 * 50.0 + 25.0,
            grid_x: gx,
            grid_y: gy,
            is_dead: false,
        }
    }

    #[test]
    fn grabbing_off_center_does_not_jump() {
        let token = token_at_cell(2, 2);
        let mut drag = TokenDrag::Idle;
        drag.handle(DragEvent::Press {
            token: &token,
            pointer: Point::new(140.0, 110.0),
            grid_size: 50.0,
        });
        let update = drag
            .handle(DragEvent::Move { pointer: Point::new(141.0, 111.0) })
            .unwrap();
        assert_eq!((update.x, update.y), (125.0, 125.0));
        assert_eq!((update.grid_x, update.grid_y), (2, 2));
    }

    #[test]
    fn moving_across_cells_snaps_to_centers() {
        let token = token_at_cell(2, 2);
        let mut drag = TokenDrag::Idle;
        drag.handle(DragEvent::Press {
            token: &token,
            pointer: Point::new(125.0, 125.0),
            grid_size: 50.0,
        });
        let update = drag
            .handle(DragEvent::Move { pointer: Point::new(280.0, 262.0) })
            .unwrap();
        assert_eq!((update.x, update.y, update.grid_x, update.grid_y), (275.0, 275.0, 5, 5));
        assert_eq!(update.token_id, "t1");
    }

    #[test]
    fn release_discards_drag() {
        let token = token_at_cell(0, 0);
        let mut drag = TokenDrag::Idle;
        drag.handle(DragEvent::Press {
            token: &token,
            pointer: Point::new(25.0, 25.0),
            grid_size: 50.0,
        });
        assert!(drag.is_dragging());
        assert_eq!(drag.handle(DragEvent::Leave), None);
        assert_eq!(drag, TokenDrag::Idle);
        assert_eq!(drag.handle(DragEvent::Move { pointer: Point::new(500.0, 500.0) }), None);
    }

    #[test]
    fn stray_release_is_a_no_op() {
        let (state, update) = TokenDrag::Idle.transition(DragEvent::Release);
        assert_eq!(state, TokenDrag::Idle);
        assert_eq!(update, None);
    }
}
