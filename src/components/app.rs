use leptos::*;
use leptos_meta::*;
use leptos_router::{use_query_map, Router};
use wasm_bindgen_futures::spawn_local;
use crate::api;
use crate::components::metro_map::MetroMap;
use crate::logging::log;
use crate::models::{Graph, Path};

/// Absolute service root; the HTTP client needs an origin
fn api_base() -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{origin}{}", api::API_BASE)
}

fn load_route(from_id: String, to_id: String, set_route: WriteSignal<Option<Path>>, set_error: WriteSignal<Option<String>>) {
    if from_id.trim().is_empty() || to_id.trim().is_empty() {
        set_route.set(None);
        return;
    }
    spawn_local(async move {
        match api::fetch_path(&api_base(), from_id.trim(), to_id.trim()).await {
            Ok(path) => {
                log!("Route loaded: {} stations, {} min", path.stations_count, path.total_time_minutes);
                set_error.set(None);
                set_route.set(Some(path));
            }
            Err(e) => {
                set_error.set(Some(e));
                set_route.set(None);
            }
        }
    });
}

#[component]
fn RouteSummary(route: ReadSignal<Option<Path>>) -> impl IntoView {
    move || {
        route.get().filter(|p| !p.is_empty()).map(|p| {
            let from = p.from_station.as_ref().map(|s| s.name.clone()).unwrap_or_default();
            let to = p.to_station.as_ref().map(|s| s.name.clone()).unwrap_or_default();
            view! {
                <div class="route-summary">
                    <span class="route-ends">{format!("{from} → {to}")}</span>
                    <span>{format!("{} stations", p.stations_count)}</span>
                    <span>{format!("{} transfers", p.transfer_count())}</span>
                    <span>{format!("{:.0} min", p.total_time_minutes)}</span>
                </div>
            }
        })
    }
}

#[component]
fn MetroPage() -> impl IntoView {
    let (graph, set_graph) = create_signal(None::<Graph>);
    let (route, set_route) = create_signal(None::<Path>);
    let (error, set_error) = create_signal(None::<String>);

    let query = use_query_map();
    let (from_id, set_from_id) = create_signal(query.get_untracked().get("from").cloned().unwrap_or_default());
    let (to_id, set_to_id) = create_signal(query.get_untracked().get("to").cloned().unwrap_or_default());

    spawn_local(async move {
        match api::fetch_graph(&api_base()).await {
            Ok(g) => {
                log!("Graph loaded: {} stations, {} edges", g.stations.len(), g.edges.len());
                set_graph.set(Some(g));
            }
            Err(e) => set_error.set(Some(e)),
        }
    });

    load_route(from_id.get_untracked(), to_id.get_untracked(), set_route, set_error);

    let show_route = move |_| load_route(from_id.get(), to_id.get(), set_route, set_error);
    let clear_route = move |_| {
        set_route.set(None);
        set_error.set(None);
    };

    view! {
        <div class="route-controls">
            <input
                type="text"
                placeholder="From station id"
                prop:value=from_id
                on:input=move |ev| set_from_id.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="To station id"
                prop:value=to_id
                on:input=move |ev| set_to_id.set(event_target_value(&ev))
            />
            <button on:click=show_route>"Show route"</button>
            <button on:click=clear_route>"Clear"</button>
        </div>
        <RouteSummary route=route />
        {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
        <MetroMap graph=graph path=route />
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/metro_graph.css"/>
        <Title text="Moscow Metro Map"/>

        <Router>
            <div class="app">
                <MetroPage />
            </div>
        </Router>
    }
}
