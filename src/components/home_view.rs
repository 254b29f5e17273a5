use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::editor::EditMode;
use crate::model::{AppData, CharacterKind};
use crate::storage::{export_file_name, export_json, parse_import};
use crate::util::{now_ms, today};

#[derive(Properties, PartialEq, Clone)]
pub struct HomeViewProps {
    pub data: AppData,
    pub on_change: Callback<AppData>,
    pub on_open: Callback<(String, EditMode)>,
}

fn input_value(e: &Event) -> String {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .map(|i| i.value())
        .unwrap_or_default()
}

fn download(file_name: &str, contents: &str) -> Result<(), wasm_bindgen::JsValue> {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let link: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();
    web_sys::Url::revoke_object_url(&url)
}

#[function_component(HomeView)]
pub fn home_view(props: &HomeViewProps) -> Html {
    let zone_name = use_state(String::new);
    let character_name = use_state(String::new);
    let character_kind = use_state(|| CharacterKind::Player);
    let character_image = use_state(String::new);
    // Keeps the pending import read alive until it finishes.
    let reader = use_mut_ref(|| None::<gloo::file::callbacks::FileReader>);

    let create_zone = {
        let zone_name = zone_name.clone();
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = data.clone();
            if next.create_zone(&zone_name, now_ms().to_string()).is_some() {
                zone_name.set(String::new());
                on_change.emit(next);
            }
        })
    };
    let create_character = {
        let character_name = character_name.clone();
        let character_kind = character_kind.clone();
        let character_image = character_image.clone();
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = data.clone();
            let image = Some(character_image.as_str());
            if next
                .create_character(&character_name, *character_kind, image, now_ms().to_string())
                .is_some()
            {
                character_name.set(String::new());
                character_image.set(String::new());
                on_change.emit(next);
            }
        })
    };
    let delete_zone = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Rc::new(move |id: String| {
            if !gloo::dialogs::confirm("Delete this zone? This cannot be undone.") {
                return;
            }
            let mut next = data.clone();
            if next.delete_zone(&id) {
                on_change.emit(next);
            }
        })
    };
    let delete_character = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Rc::new(move |id: String| {
            let mut next = data.clone();
            if next.delete_character(&id) {
                on_change.emit(next);
            }
        })
    };
    let export = {
        let data = props.data.clone();
        Callback::from(move |_: MouseEvent| {
            let json = match export_json(&data) {
                Ok(json) => json,
                Err(err) => {
                    log::error!("export failed: {err:#}");
                    return;
                }
            };
            let (y, m, d) = today();
            if let Err(err) = download(&export_file_name(y, m, d), &json) {
                log::error!("export download failed: {err:?}");
            }
        })
    };
    let import = {
        let on_change = props.on_change.clone();
        let reader = reader.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            input.set_value("");
            let on_change = on_change.clone();
            let file = gloo::file::File::from(file);
            let task = gloo::file::callbacks::read_as_text(&file, move |result| {
                let parsed = result
                    .map_err(|err| anyhow::anyhow!("reading file: {err}"))
                    .and_then(|text| parse_import(&text));
                match parsed {
                    Ok(data) => {
                        log::info!(
                            "imported {} zones and {} characters",
                            data.zones.len(),
                            data.characters.len()
                        );
                        on_change.emit(data);
                    }
                    Err(err) => {
                        log::warn!("import rejected: {err:#}");
                        gloo::dialogs::alert("Error importing data. Please check the file format.");
                    }
                }
            });
            *reader.borrow_mut() = Some(task);
        })
    };

    let zone_rows = props.data.zones.iter().map(|zone| {
        let view_cb = {
            let cb = props.on_open.clone();
            let id = zone.id.clone();
            Callback::from(move |_| cb.emit((id.clone(), EditMode::View)))
        };
        let edit_cb = {
            let cb = props.on_open.clone();
            let id = zone.id.clone();
            Callback::from(move |_| cb.emit((id.clone(), EditMode::Edit)))
        };
        let delete_cb = {
            let f = delete_zone.clone();
            let id = zone.id.clone();
            Callback::from(move |_| f(id.clone()))
        };
        html! {
            <div key={zone.id.clone()} style="display:flex; align-items:center; gap:8px; background:#161b22; border:1px solid #30363d; border-radius:8px; padding:8px 12px;">
                <div style="flex:1;">
                    <div style="font-weight:600;">{ zone.name.clone() }</div>
                    <div style="font-size:11px; opacity:0.7;">{ format!("{} tokens, {} drawings", zone.tokens.len(), zone.drawings.len()) }</div>
                </div>
                <button onclick={view_cb}>{"View"}</button>
                <button onclick={edit_cb}>{"Edit"}</button>
                <button onclick={delete_cb} style="color:#f85149;">{"Delete"}</button>
            </div>
        }
    });
    let character_rows = props.data.characters.iter().map(|c| {
        let delete_cb = {
            let f = delete_character.clone();
            let id = c.id.clone();
            Callback::from(move |_| f(id.clone()))
        };
        html! {
            <div key={c.id.clone()} style="display:flex; align-items:center; gap:8px; padding:4px 0;">
                <span style={format!("width:10px; height:10px; border-radius:50%; background:{};", c.kind.color())}></span>
                <span style="flex:1;">{ c.name.clone() }</span>
                <span style="font-size:11px; opacity:0.7;">{ c.kind.label() }</span>
                <button onclick={delete_cb}>{"×"}</button>
            </div>
        }
    });

    let on_zone_name = {
        let zone_name = zone_name.clone();
        Callback::from(move |e: InputEvent| zone_name.set(input_value(&e)))
    };
    let on_character_name = {
        let character_name = character_name.clone();
        Callback::from(move |e: InputEvent| character_name.set(input_value(&e)))
    };
    let on_character_image = {
        let character_image = character_image.clone();
        Callback::from(move |e: InputEvent| character_image.set(input_value(&e)))
    };
    let on_character_kind = {
        let character_kind = character_kind.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .unwrap_or_default();
            if let Some(kind) = CharacterKind::from_label(&value) {
                character_kind.set(kind);
            }
        })
    };

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#e6edf3; padding:24px; display:flex; flex-direction:column; gap:20px; font-family:sans-serif;">
            <div style="display:flex; align-items:center; gap:12px;">
                <h1 style="margin:0; flex:1;">{"Virtual Tabletop"}</h1>
                <button onclick={export}>{"Export"}</button>
                <label style="cursor:pointer; border:1px solid #30363d; border-radius:6px; padding:2px 8px;">
                    {"Import"}
                    <input type="file" accept=".json,application/json" style="display:none;" onchange={import} />
                </label>
            </div>
            <div style="display:flex; gap:20px; flex-wrap:wrap;">
                <div style="flex:2; min-width:320px; display:flex; flex-direction:column; gap:10px;">
                    <h2 style="margin:0; font-size:18px;">{"Zones"}</h2>
                    <div style="display:flex; gap:8px;">
                        <input placeholder="Zone name" value={(*zone_name).clone()} oninput={on_zone_name} style="flex:1;" />
                        <button onclick={create_zone}>{"Create Zone"}</button>
                    </div>
                    if props.data.zones.is_empty() {
                        <div style="opacity:0.7;">{"No zones yet."}</div>
                    }
                    { for zone_rows }
                </div>
                <div style="flex:1; min-width:260px; display:flex; flex-direction:column; gap:10px; background:#161b22; border:1px solid #30363d; border-radius:8px; padding:12px;">
                    <h2 style="margin:0; font-size:18px;">{"Characters"}</h2>
                    <input placeholder="Name" value={(*character_name).clone()} oninput={on_character_name} />
                    <select onchange={on_character_kind}>
                        { for CharacterKind::ALL.iter().map(|k| html! {
                            <option value={k.label()} selected={*k == *character_kind}>{ k.label() }</option>
                        }) }
                    </select>
                    <input placeholder="Image URL (optional)" value={(*character_image).clone()} oninput={on_character_image} />
                    <button onclick={create_character}>{"Create Character"}</button>
                    { for character_rows }
                </div>
            </div>
        </div>
    }
}
