use rstest::{fixture, rstest};

use yew_tabletop::editor::{EditMode, ZoneEditor};
use yew_tabletop::model::{AppData, Character, CharacterKind, Stroke, Zone};
use yew_tabletop::storage::{MemoryStore, Persistence, export_json, parse_import};

#[fixture]
fn stored() -> AppData {
    let mut data = AppData::default();
    data.zones.push(Zone::new("z1".into(), "Crypt".into()));
    data.zones.push(Zone::new("z2".into(), "Harbor".into()));
    data.characters.push(Character {
        id: "c1".into(),
        name: "Aria".into(),
        kind: CharacterKind::Player,
        image_url: None,
    });
    data
}

fn open(data: &AppData, id: &str) -> ZoneEditor {
    let zone = data.zone(id).cloned().unwrap();
    ZoneEditor::new(zone, data.characters.clone(), EditMode::Edit, 1)
}

#[rstest]
fn save_replaces_only_the_open_zone(stored: AppData) {
    let mut store = MemoryStore::with_data(&stored);
    let mut editor = open(&stored, "z2");
    editor.add_token("c1");
    assert!(editor.has_unsaved_changes());

    editor.save(&mut store).unwrap();
    assert!(!editor.has_unsaved_changes());

    let reloaded = store.load();
    let ids: Vec<&str> = reloaded.zones.iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, vec!["z1", "z2"]);
    assert!(reloaded.zone("z1").unwrap().tokens.is_empty());
    assert_eq!(reloaded.zone("z2").unwrap().tokens.len(), 1);
}

#[rstest]
fn failed_save_keeps_changes_pending(stored: AppData) {
    let mut store = MemoryStore::with_data(&stored);
    store.fail_writes = true;
    let mut editor = open(&stored, "z1");
    editor.add_token("c1");

    let err = editor.save(&mut store).unwrap_err();
    assert!(format!("{err:#}").contains("z1"));
    assert!(editor.has_unsaved_changes());
    assert!(store.load().zone("z1").unwrap().tokens.is_empty());
}

#[rstest]
fn export_then_import_is_lossless(stored: AppData) {
    let json = export_json(&stored).unwrap();
    assert_eq!(parse_import(&json).unwrap(), stored);
}

#[test]
fn import_fills_missing_zone_settings() {
    let raw = r#"{
        "zones": [{"id": "z1", "name": "Old", "gridSize": 40, "tokens": null}],
        "characters": [{"id": "c1", "name": "Bran", "type": "ally"}]
    }"#;
    let data = parse_import(raw).unwrap();
    let zone = &data.zones[0];
    assert_eq!(zone.grid_opacity, 0.3);
    assert_eq!(zone.grid_size, 40.0);
    assert_eq!(zone.grid_color, "#000000");
    assert!(zone.tokens.is_empty());
    assert_eq!(data.characters[0].kind, CharacterKind::Ally);
}

#[test]
fn import_keeps_shapes_and_paths_apart() {
    let raw = r##"{"zones": [{"id": "z1", "drawings": [
        {"id": "1", "points": [{"x": 1, "y": 2}], "color": "#f00", "thickness": 3},
        {"id": "2", "points": [], "color": "#0f0", "thickness": 2, "type": "rectangle",
         "hasFill": true, "fillColor": "#00f",
         "startPoint": {"x": 0, "y": 0}, "endPoint": {"x": 10, "y": 5}}
    ]}]}"##;
    let data = parse_import(raw).unwrap();
    let drawings = &data.zones[0].drawings;
    assert!(matches!(drawings[0].stroke, Stroke::Path(ref p) if p.len() == 1));
    match &drawings[1].stroke {
        Stroke::Shape(shape) => assert_eq!(shape.fill.as_deref(), Some("#00f")),
        Stroke::Path(_) => panic!("expected a rectangle"),
    }
    assert!(data.characters.is_empty());
}

#[rstest]
#[case("not json")]
#[case("[1, 2, 3]")]
#[case(r#"{"zones": [{"name": "no id"}]}"#)]
fn malformed_import_is_rejected(#[case] raw: &str) {
    let err = parse_import(raw).unwrap_err();
    assert!(format!("{err:#}").contains("virtual tabletop export"));
}
