use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::ShapeKind;
use crate::settings::EditorPreferences;
use crate::state::Tool;

#[derive(Properties, PartialEq, Clone)]
pub struct DrawingPanelProps {
    pub tool: Option<Tool>,
    pub prefs: EditorPreferences,
    pub has_drawings: bool,
    pub on_tool: Callback<Option<Tool>>,
    pub on_prefs: Callback<EditorPreferences>,
    pub on_undo_last: Callback<()>,
    pub on_clear: Callback<()>,
}

fn target_input(e: &Event) -> Option<HtmlInputElement> {
    e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
}

#[function_component]
pub fn DrawingPanel(props: &DrawingPanelProps) -> Html {
    let tool_button = |label: &'static str, tool: Option<Tool>| {
        let active = props.tool == tool;
        let cb = props.on_tool.clone();
        let style = if active {
            "background:#1f6feb; color:#fff; border:1px solid #388bfd;"
        } else {
            ""
        };
        html! { <button style={style} onclick={Callback::from(move |_| cb.emit(tool))}>{ label }</button> }
    };
    let shapes_tool = Tool::Shape(props.prefs.shape);

    // Each control edits one preference field.
    let update = |edit: fn(&mut EditorPreferences, &HtmlInputElement)| {
        let prefs = props.prefs.clone();
        let cb = props.on_prefs.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = target_input(&e) {
                let mut next = prefs.clone();
                edit(&mut next, &input);
                cb.emit(next);
            }
        })
    };
    let on_color = update(|p, i| p.draw_color = i.value());
    let on_thickness = update(|p, i| {
        if let Ok(v) = i.value().parse::<f64>() {
            if v > 0.0 {
                p.draw_thickness = v;
            }
        }
    });
    let on_fill_color = update(|p, i| p.fill_color = i.value());
    let on_has_fill = update(|p, i| p.has_fill = i.checked());
    let on_shape = {
        let prefs = props.prefs.clone();
        let cb = props.on_prefs.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .unwrap_or_default();
            if let Some(shape) = ShapeKind::from_label(&value) {
                cb.emit(EditorPreferences { shape, ..prefs.clone() });
            }
        })
    };
    let undo_last = props.on_undo_last.reform(|_: MouseEvent| ());
    let clear = props.on_clear.reform(|_: MouseEvent| ());
    let shape_options = ShapeKind::ALL.iter().map(|k| {
        html! { <option value={k.label()} selected={*k == props.prefs.shape}>{ k.label() }</option> }
    });

    html! {<div style="position:absolute; left:12px; top:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-direction:column; gap:6px; min-width:180px;">
        <div style="display:flex; gap:4px; flex-wrap:wrap;">
            { tool_button("Move", None) }
            { tool_button("Brush", Some(Tool::Brush)) }
            { tool_button("Shapes", Some(shapes_tool)) }
            { tool_button("Eraser", Some(Tool::Eraser)) }
        </div>
        <label style="display:flex; align-items:center; gap:8px; font-size:12px;">
            {"Color"}
            <input type="color" value={props.prefs.draw_color.clone()} onchange={on_color} />
        </label>
        <label style="display:flex; align-items:center; gap:8px; font-size:12px;">
            { format!("Thickness {}", props.prefs.draw_thickness) }
            <input type="range" min="1" max="20" step="1" value={props.prefs.draw_thickness.to_string()} onchange={on_thickness} />
        </label>
        if matches!(props.tool, Some(Tool::Shape(_))) {
            <select onchange={on_shape}>{ for shape_options }</select>
            <label style="display:flex; align-items:center; gap:8px; font-size:12px; cursor:pointer;">
                <input type="checkbox" checked={props.prefs.has_fill} onchange={on_has_fill} />
                {"Fill"}
                <input type="color" value={props.prefs.fill_color.clone()} disabled={!props.prefs.has_fill} onchange={on_fill_color} />
            </label>
        }
        <div style="display:flex; gap:4px;">
            <button onclick={undo_last} disabled={!props.has_drawings}>{"Undo Last"}</button>
            <button onclick={clear} disabled={!props.has_drawings} style="color:#f85149;">{"Clear"}</button>
        </div>
    </div>}
}
