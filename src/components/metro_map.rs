use std::cell::{Cell, RefCell};
use std::rc::Rc;
use leptos::leptos_dom::helpers::window_event_listener;
use leptos::logging::error;
use leptos::{
    component, create_effect, create_node_ref, create_signal, ev, html, on_cleanup, view, IntoView, NodeRef,
    ReadSignal, Show, Signal, SignalGet, SignalGetUntracked, SignalSet, WriteSignal,
};
use leptos::{wasm_bindgen, web_sys};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, WheelEvent};
use crate::components::canvas_backend::CanvasBackend;
use crate::components::canvas_viewport::{self, PanGesture};
use crate::config::MapConfig;
use crate::engine::{MapInstance, RenderBackend};
use crate::geometry::Point;
use crate::models::{Graph, Path};

type SharedMap = Rc<RefCell<Option<MapInstance<CanvasBackend>>>>;

fn request_animation_frame<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once(f);
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn canvas_point(canvas_ref: NodeRef<html::Canvas>, ev: &MouseEvent) -> Option<Point> {
    let canvas = canvas_ref.get_untracked()?;
    let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
    let rect = canvas_elem.get_bounding_client_rect();
    Some(Point::new(
        f64::from(ev.client_x()) - rect.left(),
        f64::from(ev.client_y()) - rect.top(),
    ))
}

/// Run `f` against the live instance, if any. Re-entrant calls are skipped.
fn with_map<R>(map: &SharedMap, f: impl FnOnce(&mut MapInstance<CanvasBackend>) -> R) -> Option<R> {
    let mut slot = map.try_borrow_mut().ok()?;
    slot.as_mut().map(f)
}

/// Set once the component unmounts; frames already scheduled then do nothing
type Disposed = Rc<Cell<bool>>;

fn rebuild_on_next_frame(
    map: SharedMap,
    disposed: Disposed,
    canvas_ref: NodeRef<html::Canvas>,
    config: MapConfig,
    graph: Option<Graph>,
    path: Option<Path>,
    set_loading: WriteSignal<bool>,
) {
    request_animation_frame(move || {
        let Some(canvas) = canvas_ref.get_untracked() else { return };
        let Ok(mut slot) = map.try_borrow_mut() else {
            error!("Map busy, dropping rebuild");
            return;
        };
        let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
        let create = || CanvasBackend::new(canvas_elem.clone());
        if let Some(installed) = run_frame(&mut slot, disposed.get(), create, config, graph.as_ref(), path.as_ref()) {
            set_loading.set(!installed);
        }
    });
}

/// Body of one deferred rebuild.
///
/// Creates the instance on first use. Returns whether a model was installed,
/// or `None` when nothing ran because the map is disposed or the backend
/// could not be created.
fn run_frame<B: RenderBackend>(
    slot: &mut Option<MapInstance<B>>,
    disposed: bool,
    create: impl FnOnce() -> Result<B, String>,
    config: MapConfig,
    graph: Option<&Graph>,
    path: Option<&Path>,
) -> Option<bool> {
    if disposed {
        return None;
    }
    if slot.is_none() {
        match create() {
            Ok(backend) => *slot = Some(MapInstance::new(backend, config)),
            Err(e) => {
                error!("Failed to create canvas backend: {}", e);
                return None;
            }
        }
    }
    let instance = slot.as_mut()?;
    let installed = instance.rebuild(graph, path);
    if installed {
        instance.on_ready();
    }
    Some(installed)
}

fn cursor_style(dragging: ReadSignal<Option<String>>, hovering: ReadSignal<Option<String>>) -> &'static str {
    if dragging.get().is_some() {
        "cursor: grabbing;"
    } else if hovering.get().is_some() {
        "cursor: pointer;"
    } else {
        "cursor: grab;"
    }
}

/// Interactive metro map.
///
/// Rebuilds on the next animation frame whenever `graph` or `path` changes and
/// shows a loading overlay while there is nothing to draw.
#[component]
#[must_use]
pub fn MetroMap(
    #[prop(into)] graph: Signal<Option<Graph>>,
    #[prop(into)] path: Signal<Option<Path>>,
    #[prop(optional)] config: Option<MapConfig>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let map: SharedMap = Rc::new(RefCell::new(None));
    let disposed: Disposed = Rc::new(Cell::new(false));
    let gesture = Rc::new(RefCell::new(PanGesture::default()));
    let config = config.unwrap_or_default();

    let (loading, set_loading) = create_signal(true);
    let (dragging, set_dragging) = create_signal(None::<String>);
    let (hovering, set_hovering) = create_signal(None::<String>);
    let (tooltip, set_tooltip) = create_signal(String::new());

    {
        let map = map.clone();
        let disposed = disposed.clone();
        create_effect(move |_| {
            let graph = graph.get();
            let path = path.get();
            rebuild_on_next_frame(
                map.clone(),
                disposed.clone(),
                canvas_ref,
                config.clone(),
                graph,
                path,
                set_loading,
            );
        });
    }

    let handle_mouse_down = {
        let map = map.clone();
        let gesture = gesture.clone();
        move |ev: MouseEvent| {
            let Some(pos) = canvas_point(canvas_ref, &ev) else { return };
            let hit = with_map(&map, |m| m.backend().node_at(pos)).flatten();
            if let Some(id) = hit {
                set_dragging.set(Some(id));
            } else {
                gesture.borrow_mut().start(pos.x, pos.y);
            }
        }
    };

    let handle_mouse_move = {
        let map = map.clone();
        let gesture = gesture.clone();
        move |ev: MouseEvent| {
            let Some(pos) = canvas_point(canvas_ref, &ev) else { return };
            with_map(&map, |m| {
                let view = m.backend().viewport();
                if let Some(next) = gesture.borrow_mut().pan_move(pos.x, pos.y, view) {
                    m.backend_mut().set_viewport(next);
                } else if let Some(id) = dragging.get_untracked() {
                    let world = view.screen_to_world(pos);
                    m.backend_mut().set_node_position(&id, world);
                    m.on_drag(&id, world);
                } else {
                    let hit = m.backend().node_at(pos);
                    set_tooltip.set(m.backend().tooltip_at(pos).unwrap_or_default());
                    set_hovering.set(hit);
                }
            });
        }
    };

    let end_gesture = {
        let gesture = gesture.clone();
        move || {
            gesture.borrow_mut().end();
            set_dragging.set(None);
        }
    };
    let handle_mouse_up = {
        let end_gesture = end_gesture.clone();
        move |_ev: MouseEvent| end_gesture()
    };
    let handle_mouse_leave = move |_ev: MouseEvent| {
        end_gesture();
        set_hovering.set(None);
    };

    let handle_wheel = {
        let map = map.clone();
        move |ev: WheelEvent| {
            ev.prevent_default();
            let Some(pos) = canvas_point(canvas_ref, &ev) else { return };
            with_map(&map, |m| {
                let factor = canvas_viewport::wheel_zoom_factor(ev.delta_y());
                let next = canvas_viewport::zoom_around(m.backend().viewport(), factor, pos.x, pos.y);
                m.backend_mut().set_viewport(next);
            });
        }
    };

    let resize_handle = {
        let map = map.clone();
        window_event_listener(ev::resize, move |_| {
            with_map(&map, MapInstance::resize);
        })
    };

    on_cleanup(move || {
        disposed.set(true);
        resize_handle.remove();
        if let Ok(mut slot) = map.try_borrow_mut() {
            if let Some(instance) = slot.as_mut() {
                instance.destroy();
            }
            *slot = None;
        }
    });

    view! {
        <div class="metro-map">
            <canvas
                node_ref=canvas_ref
                class="metro-map-canvas"
                title=move || tooltip.get()
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=handle_mouse_up
                on:mouseleave=handle_mouse_leave
                on:wheel=handle_wheel
                on:contextmenu=|ev| ev.prevent_default()
                style=move || cursor_style(dragging, hovering)
            />
            <Show when=move || loading.get()>
                <div class="metro-map-loading">"Loading map..."</div>
            </Show>
        </div>
    }
}
