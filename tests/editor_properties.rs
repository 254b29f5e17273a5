use rstest::{fixture, rstest};

use yew_tabletop::editor::{BUTTON_PRIMARY, EditMode, PointerInput, ZoneEditor};
use yew_tabletop::geometry::{Point, screen_to_world, snap_axis, world_to_screen};
use yew_tabletop::model::{Character, CharacterKind, Drawing, Shape, ShapeKind, Snapshot, Stroke, Token, Zone};
use yew_tabletop::settings::HISTORY_LIMIT;
use yew_tabletop::state::drawing::erase_at;
use yew_tabletop::state::{History, StrokeStyle, Tool};

fn press(x: f64, y: f64) -> PointerInput {
    PointerInput::new(Point::new(x, y), BUTTON_PRIMARY, 1)
}

fn roster() -> Vec<Character> {
    vec![Character {
        id: "c1".into(),
        name: "Aria".into(),
        kind: CharacterKind::Player,
        image_url: None,
    }]
}

fn path(id: &str, points: &[(f64, f64)]) -> Drawing {
    Drawing {
        id: id.into(),
        color: "#000000".into(),
        thickness: 2.0,
        stroke: Stroke::Path(points.iter().map(|&(x, y)| Point::new(x, y)).collect()),
    }
}

fn snapshot_with(n: usize) -> Snapshot {
    Snapshot {
        drawings: (0..n).map(|i| path(&i.to_string(), &[(i as f64, 0.0)])).collect(),
        tokens: Vec::new(),
    }
}

#[fixture]
fn board() -> ZoneEditor {
    let mut zone = Zone::new("z1".into(), "Crypt".into());
    zone.tokens.push(Token::placed("1".into(), "c1".into(), 50.0));
    ZoneEditor::new(zone, roster(), EditMode::Edit, 100)
}

#[rstest]
#[case(0.0, 50.0)]
#[case(24.9, 50.0)]
#[case(25.0, 50.0)]
#[case(49.99, 50.0)]
#[case(50.0, 50.0)]
#[case(137.3, 50.0)]
#[case(-0.1, 50.0)]
#[case(-75.0, 50.0)]
#[case(101.0, 37.0)]
#[case(12.5, 25.0)]
fn snapping_twice_changes_nothing(#[case] v: f64, #[case] g: f64) {
    let once = snap_axis(v, g);
    let twice = snap_axis(once.value, g);
    assert_eq!(once, twice);
    assert_eq!(once.value - once.cell as f64 * g, g / 2.0);
}

#[rstest]
#[case(0.3, Point::new(0.0, 0.0))]
#[case(1.0, Point::new(-120.0, 45.5))]
#[case(1.7, Point::new(33.0, -12.0))]
#[case(3.0, Point::new(400.0, 250.0))]
fn screen_world_round_trip(#[case] zoom: f64, #[case] pan: Point) {
    for screen in [Point::new(0.0, 0.0), Point::new(640.0, 480.0), Point::new(-13.0, 7.25)] {
        let back = world_to_screen(screen_to_world(screen, zoom, pan), zoom, pan);
        assert!((back.x - screen.x).abs() < 1e-9);
        assert!((back.y - screen.y).abs() < 1e-9);
    }
}

#[test]
fn history_keeps_only_the_newest_entries() {
    let mut history = History::new(snapshot_with(0));
    for i in 1..=HISTORY_LIMIT + 1 {
        history.record(snapshot_with(i));
    }
    assert_eq!(history.len(), HISTORY_LIMIT);
    // Walk back to the oldest surviving entry: the initial snapshot is gone.
    let mut oldest = history.current().cloned();
    while let Some(s) = history.undo() {
        oldest = Some(s.clone());
    }
    assert_eq!(oldest, Some(snapshot_with(2)));
}

#[test]
fn identical_snapshot_is_not_recorded_twice() {
    let mut history = History::new(snapshot_with(0));
    assert!(history.record(snapshot_with(1)));
    assert!(!history.record(snapshot_with(1)));
    assert_eq!(history.len(), 2);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn undo_then_redo_restores_state(mut board: ZoneEditor, #[case] steps: usize) {
    board.set_tool(Some(Tool::Brush));
    for i in 0..5 {
        let x = 10.0 + i as f64 * 40.0;
        board.pointer_down(press(x, 10.0));
        board.pointer_move(press(x + 5.0, 15.0));
        board.pointer_up(press(x + 5.0, 15.0));
    }
    let before = board.zone().snapshot();
    for _ in 0..steps {
        assert!(board.undo());
    }
    assert_ne!(board.zone().snapshot(), before);
    for _ in 0..steps {
        assert!(board.redo());
    }
    assert_eq!(board.zone().snapshot(), before);
    assert!(!board.redo());
}

#[test]
fn freehand_eraser_removes_every_touched_path() {
    let drawings = vec![
        path("a", &[(0.0, 0.0), (50.0, 50.0)]),
        path("b", &[(100.0, 100.0)]),
        path("c", &[(53.0, 54.0)]),
        path("d", &[(200.0, 0.0), (56.0, 50.0)]),
    ];
    let remaining = erase_at(&drawings, Point::new(50.0, 50.0), 6.0).unwrap();
    let ids: Vec<&str> = remaining.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
}

#[rstest]
fn drag_then_undo_returns_token(mut board: ZoneEditor) {
    assert_eq!(board.zone().tokens[0].position(), Point::new(125.0, 125.0));
    board.pointer_down(press(125.0, 125.0));
    board.pointer_move(press(275.0, 275.0));
    board.pointer_up(press(275.0, 275.0));
    let token = &board.zone().tokens[0];
    assert_eq!((token.x, token.y, token.grid_x, token.grid_y), (275.0, 275.0, 5, 5));
    assert!(board.has_unsaved_changes());

    assert!(board.undo());
    let token = &board.zone().tokens[0];
    assert_eq!((token.x, token.y, token.grid_x, token.grid_y), (125.0, 125.0, 2, 2));
}

#[rstest]
fn drag_inside_one_cell_adds_no_history(mut board: ZoneEditor) {
    let entries = board.history().len();
    board.pointer_down(press(125.0, 125.0));
    board.pointer_move(press(130.0, 140.0));
    board.pointer_move(press(110.0, 101.0));
    board.pointer_up(press(110.0, 101.0));
    assert_eq!(board.history().len(), entries);
}

#[rstest]
#[case(130.0, true)]
#[case(130.01, false)]
fn circle_erase_boundary(mut board: ZoneEditor, #[case] x: f64, #[case] erased: bool) {
    board.replace_drawings(vec![Drawing {
        id: "circle".into(),
        color: "#000000".into(),
        thickness: 2.0,
        stroke: Stroke::Shape(Shape {
            kind: ShapeKind::Circle,
            start: Point::new(100.0, 100.0),
            end: Point::new(120.0, 100.0),
            fill: None,
        }),
    }]);
    board.set_style(StrokeStyle {
        thickness: 5.0,
        ..StrokeStyle::default()
    });
    board.set_tool(Some(Tool::Eraser));
    board.pointer_down(press(x, 100.0));
    assert_eq!(board.zone().drawings.is_empty(), erased);
}

#[rstest]
fn tool_blocks_token_drag(mut board: ZoneEditor) {
    board.set_tool(Some(Tool::Shape(ShapeKind::Rectangle)));
    board.pointer_down(press(125.0, 125.0));
    board.pointer_move(press(300.0, 300.0));
    board.pointer_up(press(300.0, 300.0));
    assert_eq!(board.zone().tokens[0].position(), Point::new(125.0, 125.0));
    assert_eq!(board.zone().drawings.len(), 1);
}

#[test]
fn view_mode_tokens_do_not_move() {
    let mut zone = Zone::new("z1".into(), "Crypt".into());
    zone.tokens.push(Token::placed("1".into(), "c1".into(), 50.0));
    let mut viewer = ZoneEditor::new(zone, roster(), EditMode::View, 100);
    let entries = viewer.history().len();

    viewer.pointer_down(press(125.0, 125.0));
    assert!(viewer.dragged_token().is_none());
    viewer.pointer_move(press(275.0, 275.0));
    viewer.pointer_up(press(275.0, 275.0));

    assert_eq!(viewer.zone().tokens[0].position(), Point::new(125.0, 125.0));
    assert!(viewer.dragged_token().is_none());
    assert_eq!(viewer.history().len(), entries);
    assert!(!viewer.has_unsaved_changes());
}
