use super::{home_view::HomeView, zone_view::ZoneView};
use crate::editor::EditMode;
use crate::model::AppData;
use crate::storage::{LocalStore, Persistence};
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum View {
    Home,
    Zone { id: String, mode: EditMode },
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Home);
    let data = use_state(|| LocalStore.load());

    // Every change made on the home screen is written straight through.
    let update_data = {
        let data = data.clone();
        Callback::from(move |next: AppData| {
            if let Err(err) = LocalStore.save(&next) {
                log::warn!("could not store application data: {err:#}");
            }
            data.set(next);
        })
    };
    let open_zone = {
        let view = view.clone();
        Callback::from(move |(id, mode): (String, EditMode)| view.set(View::Zone { id, mode }))
    };
    let to_home = {
        let view = view.clone();
        let data = data.clone();
        Callback::from(move |_| {
            // The editor saves on its own; pick up whatever it wrote.
            data.set(LocalStore.load());
            view.set(View::Home);
        })
    };

    match &*view {
        View::Home => html! { <HomeView
            data={(*data).clone()}
            on_change={update_data}
            on_open={open_zone}
        /> },
        View::Zone { id, mode } => match data.zone(id) {
            Some(zone) => html! { <ZoneView
                key={id.clone()}
                zone={zone.clone()}
                characters={data.characters.clone()}
                mode={*mode}
                on_exit={to_home}
            /> },
            None => {
                log::warn!("zone {id} not found");
                html! {
                    <div style="padding:24px; display:flex; flex-direction:column; gap:12px; align-items:flex-start;">
                        <h2 style="margin:0;">{"Zone not found"}</h2>
                        <button onclick={to_home.reform(|_| ())}>{"Back to Home"}</button>
                    </div>
                }
            }
        },
    }
}
