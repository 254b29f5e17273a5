use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    BeforeUnloadEvent, Event, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    MouseEvent, TouchEvent, WheelEvent,
};
use yew::prelude::*;

use super::{
    add_token_modal::AddTokenModal,
    character_panel::{BoardEntry, CharacterPanel},
    drawing_panel::DrawingPanel,
    exit_overlay::ExitOverlay,
    settings_modal::SettingsModal,
    toolbar::Toolbar,
};
use crate::editor::{EditMode, PointerInput, Shortcut, ZoneEditor};
use crate::geometry::Point;
use crate::model::{Character, Zone};
use crate::render::{ImageCache, context_2d, draw_zone};
use crate::settings::{AUTOSAVE_DELAY_MS, EditorPreferences, SAVE_BADGE_MS};
use crate::storage::LocalStore;
use crate::util::{load_preferences, now_ms, save_preferences};

#[derive(Properties, PartialEq, Clone)]
pub struct ZoneViewProps {
    pub zone: Zone,
    pub characters: Vec<Character>,
    pub mode: EditMode,
    pub on_exit: Callback<()>,
}

/// Handles shared by the DOM listeners and the yew callbacks.
#[derive(Clone)]
struct Board {
    editor: Rc<RefCell<ZoneEditor>>,
    images: Rc<RefCell<ImageCache>>,
    on_image_load: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    autosave: Rc<RefCell<Option<Timeout>>>,
    badge: Rc<RefCell<Option<Timeout>>>,
    /// Revision and zoom percent the panels were last rendered with.
    seen: Rc<Cell<(u64, u32)>>,
    canvas: NodeRef,
    rerender: UseForceUpdateHandle,
    saved_badge: UseStateHandle<bool>,
}

impl Board {
    fn redraw(&self) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            return;
        };
        let Some(ctx) = context_2d(&canvas) else {
            return;
        };
        let on_load = self.on_image_load.borrow();
        let on_load = on_load
            .as_ref()
            .map(|c| c.as_ref().unchecked_ref::<js_sys::Function>());
        draw_zone(
            &ctx,
            &self.editor.borrow(),
            &mut self.images.borrow_mut(),
            on_load,
            canvas.width() as f64,
            canvas.height() as f64,
        );
    }

    /// Redraw after input. Panels re-render only when the zone or zoom moved,
    /// and zone changes in edit mode restart the autosave countdown.
    fn changed(&self) {
        self.redraw();
        let (revision, zoom, editable) = {
            let ed = self.editor.borrow();
            (ed.revision(), ed.camera.zoom_percent(), ed.is_editable())
        };
        let (last_revision, last_zoom) = self.seen.get();
        if (revision, zoom) == (last_revision, last_zoom) {
            return;
        }
        self.seen.set((revision, zoom));
        self.rerender.force_update();
        if revision != last_revision && editable {
            let board = self.clone();
            *self.autosave.borrow_mut() = Some(Timeout::new(AUTOSAVE_DELAY_MS, move || {
                board.save();
            }));
        }
    }

    fn apply(&self, f: impl FnOnce(&mut ZoneEditor)) {
        f(&mut self.editor.borrow_mut());
        self.changed();
        self.rerender.force_update();
    }

    fn callback<E: 'static>(&self, f: impl Fn(&mut ZoneEditor) + 'static) -> Callback<E> {
        let board = self.clone();
        Callback::from(move |_: E| board.apply(|ed| f(ed)))
    }

    /// Explicit save; drops any pending autosave.
    fn save_now(&self) -> bool {
        self.autosave.borrow_mut().take();
        self.save()
    }

    fn save(&self) -> bool {
        let result = self.editor.borrow_mut().save(&mut LocalStore);
        match result {
            Ok(()) => {
                self.saved_badge.set(true);
                let badge = self.saved_badge.clone();
                *self.badge.borrow_mut() = Some(Timeout::new(SAVE_BADGE_MS, move || badge.set(false)));
                self.rerender.force_update();
                true
            }
            Err(err) => {
                log::warn!("save failed, changes kept in memory: {err:#}");
                false
            }
        }
    }
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(Event)>);

fn listen(
    target: &EventTarget,
    name: &'static str,
    f: impl FnMut(Event) + 'static,
    out: &mut Vec<Listener>,
) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
        .is_ok()
    {
        out.push((target.clone(), name, cb));
    }
}

fn mouse_input(e: &Event) -> Option<PointerInput> {
    let me = e.dyn_ref::<MouseEvent>()?;
    Some(PointerInput::new(
        Point::new(me.offset_x() as f64, me.offset_y() as f64),
        me.button(),
        me.buttons(),
    ))
}

fn touch_points(e: &TouchEvent, canvas: &HtmlCanvasElement) -> Vec<Point> {
    let rect = canvas.get_bounding_client_rect();
    let list = e.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point::new(t.client_x() as f64 - rect.left(), t.client_y() as f64 - rect.top()))
        .collect()
}

fn typing_in_field(e: &Event) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "SELECT" | "TEXTAREA"))
}

fn fit_canvas(canvas: &HtmlCanvasElement) {
    if let Some(parent) = canvas.parent_element() {
        canvas.set_width(parent.client_width().max(1) as u32);
        canvas.set_height(parent.client_height().max(1) as u32);
    }
}

#[function_component(ZoneView)]
pub fn zone_view(props: &ZoneViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let editor = {
        let zone = props.zone.clone();
        let characters = props.characters.clone();
        let mode = props.mode;
        use_mut_ref(move || ZoneEditor::new(zone, characters, mode, now_ms()))
    };
    let board = Board {
        editor,
        images: use_mut_ref(ImageCache::default),
        on_image_load: use_mut_ref(|| None),
        autosave: use_mut_ref(|| None),
        badge: use_mut_ref(|| None),
        seen: use_memo((), |_| Cell::new((0u64, 100u32))),
        canvas: canvas_ref.clone(),
        rerender: use_force_update(),
        saved_badge: use_state(|| false),
    };
    let prefs = use_state(load_preferences);
    let show_settings = use_state(|| false);
    let show_add_token = use_state(|| false);
    let show_exit = use_state(|| false);

    // Remember drawing preferences and hand them to the editor.
    {
        let board = board.clone();
        use_effect_with((*prefs).clone(), move |p| {
            save_preferences(p);
            board.editor.borrow_mut().apply_preferences(p);
            board.redraw();
            board.rerender.force_update();
            || ()
        });
    }

    // Mount: canvas size, input listeners, unload guard.
    {
        let board = board.clone();
        use_effect_with((), move |_| {
            let mut listeners: Vec<Listener> = Vec::new();
            let window = web_sys::window();
            let canvas = board.canvas.cast::<HtmlCanvasElement>();

            {
                let b = board.clone();
                *board.on_image_load.borrow_mut() =
                    Some(Closure::wrap(Box::new(move || b.redraw()) as Box<dyn FnMut()>));
            }

            if let Some(canvas) = canvas.as_ref() {
                fit_canvas(canvas);
                let target: &EventTarget = canvas.as_ref();

                let b = board.clone();
                listen(target, "mousedown", move |e| {
                    if let Some(input) = mouse_input(&e) {
                        if input.button == crate::editor::BUTTON_MIDDLE {
                            e.prevent_default();
                        }
                        b.editor.borrow_mut().pointer_down(input);
                        b.changed();
                    }
                }, &mut listeners);

                let b = board.clone();
                listen(target, "mousemove", move |e| {
                    if let Some(input) = mouse_input(&e) {
                        b.editor.borrow_mut().pointer_move(input);
                        b.changed();
                    }
                }, &mut listeners);

                let b = board.clone();
                listen(target, "mouseup", move |e| {
                    if let Some(input) = mouse_input(&e) {
                        b.editor.borrow_mut().pointer_up(input);
                        b.changed();
                    }
                }, &mut listeners);

                let b = board.clone();
                listen(target, "mouseleave", move |_| {
                    b.editor.borrow_mut().pointer_leave();
                    b.changed();
                }, &mut listeners);

                let b = board.clone();
                listen(target, "contextmenu", move |e| {
                    let Some(input) = mouse_input(&e) else {
                        return;
                    };
                    if b.editor.borrow_mut().delete_token_at(input.screen) {
                        e.prevent_default();
                        b.changed();
                    }
                }, &mut listeners);

                let b = board.clone();
                listen(target, "wheel", move |e| {
                    let Some(we) = e.dyn_ref::<WheelEvent>() else {
                        return;
                    };
                    e.prevent_default();
                    let anchor = Point::new(we.offset_x() as f64, we.offset_y() as f64);
                    b.editor.borrow_mut().wheel(we.delta_y(), anchor);
                    b.changed();
                }, &mut listeners);

                for name in ["touchstart", "touchmove"] {
                    let b = board.clone();
                    let c = canvas.clone();
                    listen(target, name, move |e| {
                        let Some(te) = e.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        e.prevent_default();
                        let points = touch_points(te, &c);
                        if name == "touchstart" {
                            b.editor.borrow_mut().touch_start(&points);
                        } else {
                            b.editor.borrow_mut().touch_move(&points);
                        }
                        b.changed();
                    }, &mut listeners);
                }
                for name in ["touchend", "touchcancel"] {
                    let b = board.clone();
                    listen(target, name, move |e| {
                        let Some(te) = e.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        b.editor.borrow_mut().touch_end(te.touches().length() as usize);
                        b.changed();
                    }, &mut listeners);
                }
            }

            if let Some(window) = window.as_ref() {
                let target: &EventTarget = window.as_ref();

                let b = board.clone();
                listen(target, "keydown", move |e| {
                    if typing_in_field(&e) {
                        return;
                    }
                    let Some(ke) = e.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let Some(shortcut) =
                        Shortcut::from_key(&ke.key(), ke.ctrl_key(), ke.meta_key(), ke.shift_key())
                    else {
                        return;
                    };
                    if !b.editor.borrow().is_editable() {
                        return;
                    }
                    e.prevent_default();
                    match shortcut {
                        Shortcut::Undo => b.apply(|ed| {
                            ed.undo();
                        }),
                        Shortcut::Redo => b.apply(|ed| {
                            ed.redo();
                        }),
                        Shortcut::Save => {
                            b.save_now();
                        }
                    }
                }, &mut listeners);

                let b = board.clone();
                listen(target, "beforeunload", move |e| {
                    let ed = b.editor.borrow();
                    if ed.is_editable() && ed.has_unsaved_changes() {
                        e.prevent_default();
                        if let Some(bu) = e.dyn_ref::<BeforeUnloadEvent>() {
                            bu.set_return_value("");
                        }
                    }
                }, &mut listeners);

                if let Some(canvas) = canvas.clone() {
                    let b = board.clone();
                    listen(target, "resize", move |_| {
                        fit_canvas(&canvas);
                        b.redraw();
                    }, &mut listeners);
                }
            }

            board.redraw();

            move || {
                for (target, name, cb) in &listeners {
                    let _ = target.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
                drop(listeners);
                board.on_image_load.borrow_mut().take();
                board.autosave.borrow_mut().take();
                board.badge.borrow_mut().take();
            }
        });
    }

    let ed = board.editor.borrow();
    let editable = ed.is_editable();
    let zone = ed.zone();
    let entries: Vec<BoardEntry> = ed
        .characters_on_board()
        .into_iter()
        .map(|b| BoardEntry {
            character: b.character.clone(),
            tokens: b.tokens,
            dead: b.dead,
        })
        .collect();
    let toolbar = html! { <Toolbar
        zone_name={zone.name.clone()}
        editable={editable}
        zoom_percent={ed.camera.zoom_percent()}
        can_undo={ed.can_undo()}
        can_redo={ed.can_redo()}
        unsaved={ed.has_unsaved_changes()}
        saved_badge={*board.saved_badge}
        on_zoom_in={board.callback(|ed| ed.camera.zoom_in())}
        on_zoom_out={board.callback(|ed| ed.camera.zoom_out())}
        on_undo={board.callback(|ed| { ed.undo(); })}
        on_redo={board.callback(|ed| { ed.redo(); })}
        on_save={{
            let b = board.clone();
            Callback::from(move |_| { b.save_now(); })
        }}
        on_exit={{
            let on_exit = props.on_exit.clone();
            let show_exit = show_exit.clone();
            let unsaved = editable && ed.has_unsaved_changes();
            Callback::from(move |_| if unsaved { show_exit.set(true) } else { on_exit.emit(()) })
        }}
        on_open_settings={{
            let show = show_settings.clone();
            Callback::from(move |_| show.set(true))
        }}
        on_add_token={{
            let show = show_add_token.clone();
            Callback::from(move |_| show.set(true))
        }}
    /> };
    let drawing_panel = if editable {
        html! { <DrawingPanel
            tool={ed.tool()}
            prefs={(*prefs).clone()}
            has_drawings={!zone.drawings.is_empty()}
            on_tool={{
                let b = board.clone();
                Callback::from(move |tool| b.apply(|ed| ed.set_tool(tool)))
            }}
            on_prefs={{
                let prefs = prefs.clone();
                Callback::from(move |p: EditorPreferences| prefs.set(p))
            }}
            on_undo_last={board.callback(|ed| { ed.remove_last_drawing(); })}
            on_clear={board.callback(|ed| {
                if gloo::dialogs::confirm("Clear all drawings?") {
                    ed.clear_drawings();
                }
            })}
        /> }
    } else {
        html! {}
    };
    let character_panel = html! { <CharacterPanel
        entries={entries}
        editable={editable}
        on_toggle_dead={{
            let b = board.clone();
            Callback::from(move |id: String| b.apply(|ed| { ed.toggle_dead(&id); }))
        }}
        on_remove={{
            let b = board.clone();
            Callback::from(move |id: String| b.apply(|ed| { ed.delete_tokens_for_character(&id); }))
        }}
    /> };
    let settings_modal = html! { <SettingsModal
        show={*show_settings && editable}
        zone_name={zone.name.clone()}
        grid_opacity={zone.grid_opacity}
        grid_color={zone.grid_color.clone()}
        background_color={zone.background_color.clone()}
        background_image={zone.background_image.clone()}
        editing_background={ed.is_editing_background()}
        on_close={{
            let show = show_settings.clone();
            Callback::from(move |_| show.set(false))
        }}
        on_rename={{
            let b = board.clone();
            Callback::from(move |name: String| b.apply(|ed| ed.set_zone_name(&name)))
        }}
        on_grid_opacity={{
            let b = board.clone();
            Callback::from(move |v: f64| b.apply(|ed| ed.set_grid_opacity(v)))
        }}
        on_grid_color={{
            let b = board.clone();
            Callback::from(move |c: String| b.apply(|ed| ed.set_grid_color(&c)))
        }}
        on_background_color={{
            let b = board.clone();
            Callback::from(move |c: String| b.apply(|ed| ed.set_background_color(&c)))
        }}
        on_background_url={{
            let b = board.clone();
            Callback::from(move |url: String| b.apply(|ed| ed.set_background_image_url(&url)))
        }}
        on_rotate={{
            let b = board.clone();
            Callback::from(move |deg: f64| b.apply(|ed| ed.rotate_background(deg)))
        }}
        on_edit_background={{
            let b = board.clone();
            Callback::from(move |on: bool| b.apply(|ed| ed.set_editing_background(on)))
        }}
        on_remove_background={board.callback(|ed| ed.remove_background_image())}
    /> };
    let add_token_modal = html! { <AddTokenModal
        show={*show_add_token && editable}
        characters={ed.characters().to_vec()}
        on_add={{
            let b = board.clone();
            let show = show_add_token.clone();
            Callback::from(move |id: String| {
                b.apply(|ed| { ed.add_token(&id); });
                show.set(false);
            })
        }}
        on_close={{
            let show = show_add_token.clone();
            Callback::from(move |_| show.set(false))
        }}
    /> };
    let exit_overlay = html! { <ExitOverlay
        show={*show_exit}
        on_save_exit={{
            let b = board.clone();
            let on_exit = props.on_exit.clone();
            Callback::from(move |_| if b.save_now() { on_exit.emit(()) })
        }}
        on_discard={props.on_exit.clone()}
        on_cancel={{
            let show = show_exit.clone();
            Callback::from(move |_| show.set(false))
        }}
    /> };
    drop(ed);

    html! {
        <div style="position:fixed; inset:0; display:flex; flex-direction:column; background:#0d1117; color:#e6edf3; font-family:sans-serif;">
            { toolbar }
            <div style="flex:1; display:flex; min-height:0;">
                <div style="position:relative; flex:1; overflow:hidden;">
                    <canvas ref={canvas_ref} style="display:block; width:100%; height:100%; touch-action:none;" />
                    { drawing_panel }
                </div>
                { character_panel }
            </div>
            { settings_modal }
            { add_token_modal }
            { exit_overlay }
        </div>
    }
}
