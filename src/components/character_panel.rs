use yew::prelude::*;

use crate::model::Character;

/// A character with tokens on the board, as listed in the sidebar.
#[derive(Clone, PartialEq)]
pub struct BoardEntry {
    pub character: Character,
    pub tokens: usize,
    pub dead: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct CharacterPanelProps {
    pub entries: Vec<BoardEntry>,
    pub editable: bool,
    pub on_toggle_dead: Callback<String>,
    pub on_remove: Callback<String>,
}

#[function_component]
pub fn CharacterPanel(props: &CharacterPanelProps) -> Html {
    let rows = props.entries.iter().map(|entry| {
        let c = &entry.character;
        let toggle = {
            let cb = props.on_toggle_dead.clone();
            let id = c.id.clone();
            Callback::from(move |_: Event| cb.emit(id.clone()))
        };
        let remove = {
            let cb = props.on_remove.clone();
            let id = c.id.clone();
            Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
        };
        let name_style = if entry.dead {
            "font-size:13px; text-decoration:line-through; opacity:0.6;"
        } else {
            "font-size:13px;"
        };
        html! {
            <div key={c.id.clone()} style="display:flex; align-items:center; gap:8px; padding:6px 0; border-bottom:1px solid #21262d;">
                <span style={format!("width:24px; height:24px; border-radius:50%; border:2px solid {}; display:flex; align-items:center; justify-content:center; font-size:11px;", c.kind.color())}>
                    { c.initial() }
                </span>
                <div style="flex:1; min-width:0;">
                    <div style={name_style}>
                        { c.name.clone() }
                        if entry.dead { {" • DEAD"} }
                    </div>
                    <div style="font-size:11px; opacity:0.7;">{ format!("{} · {} on board", c.kind.label(), entry.tokens) }</div>
                </div>
                if props.editable {
                    <label style="font-size:11px; display:flex; align-items:center; gap:4px; cursor:pointer;">
                        <input type="checkbox" checked={entry.dead} onchange={toggle} />
                        {"Dead"}
                    </label>
                    <button onclick={remove} title="Remove from board">{"×"}</button>
                }
            </div>
        }
    });

    html! {<div style="width:240px; background:#161b22; border-left:1px solid #30363d; padding:10px 12px; overflow-y:auto;">
        <h3 style="margin:0 0 8px 0; font-size:14px;">{"On this board"}</h3>
        if props.entries.is_empty() {
            <div style="font-size:12px; opacity:0.7;">{"No tokens placed."}</div>
        }
        { for rows }
    </div>}
}
