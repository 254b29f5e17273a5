use yew::prelude::*;

use crate::model::{Character, CharacterKind};

#[derive(Properties, PartialEq, Clone)]
pub struct AddTokenModalProps {
    pub show: bool,
    pub characters: Vec<Character>,
    pub on_add: Callback<String>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn AddTokenModal(props: &AddTokenModalProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_cb = props.on_close.reform(|_: MouseEvent| ());

    let groups = CharacterKind::ALL.iter().map(|kind| {
        let members: Vec<&Character> = props.characters.iter().filter(|c| c.kind == *kind).collect();
        if members.is_empty() {
            return html! {};
        }
        let buttons = members.into_iter().map(|c| {
            let cb = props.on_add.clone();
            let id = c.id.clone();
            html! {
                <button key={c.id.clone()} onclick={Callback::from(move |_| cb.emit(id.clone()))}
                    style={format!("border:2px solid {}; border-radius:16px; padding:4px 10px;", kind.color())}>
                    { c.name.clone() }
                </button>
            }
        });
        html! {
            <div style="display:flex; flex-direction:column; gap:6px;">
                <div style="font-size:12px; text-transform:capitalize; opacity:0.7;">{ kind.label() }</div>
                <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for buttons }</div>
            </div>
        }
    });

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Add Token"}</h3>
                <button onclick={close_cb} style="padding:4px 8px;">{"Close"}</button>
            </div>
            if props.characters.is_empty() {
                <div style="font-size:12px; opacity:0.7;">{"Create characters on the home screen first."}</div>
            }
            { for groups }
        </div>
    </div>}
}
