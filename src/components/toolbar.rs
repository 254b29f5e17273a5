use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ToolbarProps {
    pub zone_name: String,
    pub editable: bool,
    pub zoom_percent: u32,
    pub can_undo: bool,
    pub can_redo: bool,
    pub unsaved: bool,
    pub saved_badge: bool,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_undo: Callback<()>,
    pub on_redo: Callback<()>,
    pub on_save: Callback<()>,
    pub on_exit: Callback<()>,
    pub on_open_settings: Callback<()>,
    pub on_add_token: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let exit = props.on_exit.reform(|_: MouseEvent| ());
    let zoom_in = props.on_zoom_in.reform(|_: MouseEvent| ());
    let zoom_out = props.on_zoom_out.reform(|_: MouseEvent| ());

    let edit_controls = if props.editable {
        let undo = props.on_undo.reform(|_: MouseEvent| ());
        let redo = props.on_redo.reform(|_: MouseEvent| ());
        let save = props.on_save.reform(|_: MouseEvent| ());
        let settings = props.on_open_settings.reform(|_: MouseEvent| ());
        let add_token = props.on_add_token.reform(|_: MouseEvent| ());
        html! {<>
            <button onclick={undo} disabled={!props.can_undo} title="Undo (Ctrl+Z)">{"Undo"}</button>
            <button onclick={redo} disabled={!props.can_redo} title="Redo (Ctrl+Shift+Z)">{"Redo"}</button>
            <span style="width:8px;"></span>
            <button onclick={add_token}>{"Add Token"}</button>
            <button onclick={settings}>{"Zone Settings"}</button>
            <button onclick={save} title="Save (Ctrl+S)">{"Save"}</button>
        </>}
    } else {
        html! { <span style="font-size:11px; opacity:0.7;">{"View only"}</span> }
    };
    let status = if props.saved_badge {
        html! { <span style="font-size:12px; color:#3fb950;">{"Saved"}</span> }
    } else if props.editable && props.unsaved {
        html! { <span style="font-size:12px; color:#d29922;">{"Unsaved changes"}</span> }
    } else {
        html! {}
    };

    html! {<div style="display:flex; align-items:center; gap:6px; padding:8px 12px; background:rgba(22,27,34,0.95); border-bottom:1px solid #30363d;">
        <button onclick={exit}>{"← Back"}</button>
        <h2 style="margin:0 12px 0 4px; font-size:16px; flex:0 1 auto; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">{ props.zone_name.clone() }</h2>
        { status }
        <span style="flex:1;"></span>
        { edit_controls }
        <span style="width:8px;"></span>
        <button onclick={zoom_out}> {"-"} </button>
        <span style="min-width:48px; text-align:center; font-size:12px;">{ format!("{}%", props.zoom_percent) }</span>
        <button onclick={zoom_in}> {"+"} </button>
    </div>}
}
