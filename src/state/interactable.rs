use crate::geometry::{Point, Rect};
use crate::model::{BackgroundImage, Character, Token, resolve_character};
use crate::settings::TOKEN_RADIUS;

// Topmost (last drawn) token whose disc contains `world`. Orphaned tokens are
// not drawn, so they cannot be grabbed either.
pub fn token_at<'a>(tokens: &'a [Token], roster: &[Character], world: Point) -> Option<&'a Token> {
    tokens
        .iter()
        .rev()
        .filter(|t| resolve_character(roster, &t.character_id).is_some())
        .find(|t| t.position().distance(world) <= TOKEN_RADIUS)
}

// Background hit area; rotation is ignored, like the resize handle placement.
pub fn background_contains(bg: &BackgroundImage, world: Point) -> bool {
    Rect::from_corners(
        Point::new(bg.x, bg.y),
        Point::new(bg.x + bg.width, bg.y + bg.height),
    )
    .contains(world)
}

/// Square grab area at the bottom-right corner of the background, in world pixels.
pub const RESIZE_HANDLE: f64 = 16.0;

pub fn on_resize_handle(bg: &BackgroundImage, world: Point) -> bool {
    let corner = Point::new(bg.x + bg.width, bg.y + bg.height);
    Rect::from_corners(corner, corner)
        .expanded(RESIZE_HANDLE / 2.0)
        .contains(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CharacterKind;

    fn roster() -> Vec<Character> {
        vec![Character {
            id: "c1".into(),
            name: "Aria".into(),
            kind: CharacterKind::Player,
            image_url: None,
        }]
    }

    #[test]
    fn later_tokens_win_overlaps() {
        let tokens = vec![
            Token::placed("1".into(), "c1".into(), 50.0),
            Token::placed("2".into(), "c1".into(), 50.0),
        ];
        let hit = token_at(&tokens, &roster(), Point::new(130.0, 120.0)).unwrap();
        assert_eq!(hit.id, "2");
    }

    #[test]
    fn orphans_and_far_points_miss() {
        let tokens = vec![Token::placed("1".into(), "gone".into(), 50.0)];
        assert!(token_at(&tokens, &roster(), Point::new(125.0, 125.0)).is_none());
        let tokens = vec![Token::placed("1".into(), "c1".into(), 50.0)];
        assert!(token_at(&tokens, &roster(), Point::new(125.0, 149.0)).is_some());
        assert!(token_at(&tokens, &roster(), Point::new(125.0, 149.5)).is_none());
    }

    #[test]
    fn resize_handle_sits_on_corner() {
        let bg = BackgroundImage::at_origin("a.png".into());
        assert!(on_resize_handle(&bg, Point::new(805.0, 595.0)));
        assert!(!on_resize_handle(&bg, Point::new(400.0, 300.0)));
        assert!(background_contains(&bg, Point::new(400.0, 300.0)));
    }
}
