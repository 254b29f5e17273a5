use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ExitOverlayProps {
    pub show: bool,
    pub on_save_exit: Callback<()>,
    pub on_discard: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Asked when leaving the editor with unsaved changes.
#[function_component]
pub fn ExitOverlay(props: &ExitOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let save_btn = props.on_save_exit.reform(|_: MouseEvent| ());
    let discard_btn = props.on_discard.reform(|_: MouseEvent| ());
    let cancel_btn = props.on_cancel.reform(|_: MouseEvent| ());
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:60;">
            <div style="background:rgba(0,0,0,0.85); border:2px solid #d29922; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
                <h2 style="margin:0 0 12px 0; color:#d29922;">{"Unsaved Changes"}</h2>
                <p style="margin:4px 0;">{"You have unsaved changes. Save before leaving?"}</p>
                <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                    <button onclick={save_btn}>{"Save & Exit"}</button>
                    <button onclick={discard_btn}>{"Exit Without Saving"}</button>
                    <button onclick={cancel_btn}>{"Cancel"}</button>
                </div>
            </div>
        </div>
    }
}
