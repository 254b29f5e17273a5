use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::BackgroundImage;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub zone_name: String,
    pub grid_opacity: f64,
    pub grid_color: String,
    pub background_color: String,
    pub background_image: Option<BackgroundImage>,
    pub editing_background: bool,
    pub on_close: Callback<()>,
    pub on_rename: Callback<String>,
    pub on_grid_opacity: Callback<f64>,
    pub on_grid_color: Callback<String>,
    pub on_background_color: Callback<String>,
    pub on_background_url: Callback<String>,
    pub on_rotate: Callback<f64>,
    pub on_edit_background: Callback<bool>,
    pub on_remove_background: Callback<()>,
}

fn input_of(e: &Event) -> Option<HtmlInputElement> {
    e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    let url_draft = use_state(|| {
        props
            .background_image
            .as_ref()
            .map(|bg| bg.url.clone())
            .unwrap_or_default()
    });
    if !props.show {
        return html! {};
    }

    let close_cb = props.on_close.reform(|_: MouseEvent| ());
    let rename_cb = props
        .on_rename
        .reform(|e: Event| input_of(&e).map(|i| i.value()).unwrap_or_default());
    let opacity_cb = {
        let cb = props.on_grid_opacity.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(v) = input_of(&e).and_then(|i| i.value().parse::<f64>().ok()) {
                cb.emit(v);
            }
        })
    };
    let grid_color_cb = {
        let cb = props.on_grid_color.clone();
        Callback::from(move |e: Event| {
            if let Some(i) = input_of(&e) {
                cb.emit(i.value());
            }
        })
    };
    let background_color_cb = {
        let cb = props.on_background_color.clone();
        Callback::from(move |e: Event| {
            if let Some(i) = input_of(&e) {
                cb.emit(i.value());
            }
        })
    };
    let url_input_cb = {
        let url_draft = url_draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(i) = input_of(&e) {
                url_draft.set(i.value());
            }
        })
    };
    let apply_url_cb = {
        let cb = props.on_background_url.clone();
        let url_draft = url_draft.clone();
        Callback::from(move |_: MouseEvent| cb.emit((*url_draft).clone()))
    };

    let image_controls = match props.background_image.as_ref() {
        Some(bg) => {
            let rotate_left = props.on_rotate.reform(|_: MouseEvent| -90.0);
            let rotate_right = props.on_rotate.reform(|_: MouseEvent| 90.0);
            let editing = props.editing_background;
            let toggle_edit = props.on_edit_background.reform(move |_: MouseEvent| !editing);
            let remove = props.on_remove_background.reform(|_: MouseEvent| ());
            html! {
                <div style="display:flex; flex-direction:column; gap:6px;">
                    <div style="font-size:11px; opacity:0.7;">
                        { format!("{:.0} × {:.0} at ({:.0}, {:.0}), rotated {:.0}°", bg.width, bg.height, bg.x, bg.y, bg.rotation) }
                    </div>
                    <div style="display:flex; gap:6px; flex-wrap:wrap;">
                        <button onclick={rotate_left}>{"⟲ 90°"}</button>
                        <button onclick={rotate_right}>{"⟳ 90°"}</button>
                        <button onclick={toggle_edit}>{ if editing { "Done Editing" } else { "Move / Resize" } }</button>
                        <button onclick={remove} style="color:#f85149;">{"Remove Image"}</button>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Zone Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="width:120px;">{"Name"}</span>
                    <input value={props.zone_name.clone()} onchange={rename_cb} style="flex:1;" />
                </label>
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="width:120px;">{ format!("Grid opacity {:.0}%", props.grid_opacity * 100.0) }</span>
                    <input type="range" min="0" max="1" step="0.05" value={props.grid_opacity.to_string()} oninput={opacity_cb} style="flex:1;" />
                </label>
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="width:120px;">{"Grid color"}</span>
                    <input type="color" value={props.grid_color.clone()} onchange={grid_color_cb} />
                </label>
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="width:120px;">{"Background"}</span>
                    <input type="color" value={props.background_color.clone()} onchange={background_color_cb} />
                </label>
                <div style="display:flex; align-items:center; gap:8px;">
                    <span style="width:120px;">{"Image URL"}</span>
                    <input value={(*url_draft).clone()} oninput={url_input_cb} style="flex:1;" placeholder="https://..." />
                    <button onclick={apply_url_cb}>{"Set"}</button>
                </div>
                { image_controls }
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Choosing a background color removes the background image."}</div>
        </div>
    </div>}
}
