use crate::config::MapConfig;
use crate::logging::log;
use crate::models::{RenderModel, ViewportState};
use super::backend::RenderBackend;

/// What to do with the view once the backend reports the new model ready
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportAction {
    FitRoute,
    Restore(ViewportState),
    FitCentral,
    Keep,
}

/// Carries the user's zoom and pan across rebuilds.
///
/// The view is captured when a route is cleared and restored on the next
/// ready signal; a new route discards it. All state lives as long as the map
/// instance and is reset on teardown.
#[derive(Debug, Default)]
pub struct ViewportStateManager {
    snapshot: Option<ViewportState>,
    route_ever_shown: bool,
    previous_had_route: bool,
    pending: Option<ViewportAction>,
}

impl ViewportStateManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<ViewportState> {
        self.snapshot
    }

    #[must_use]
    pub fn route_ever_shown(&self) -> bool {
        self.route_ever_shown
    }

    #[must_use]
    pub fn pending(&self) -> Option<ViewportAction> {
        self.pending
    }

    /// Update the snapshot before a model with or without a route is installed,
    /// and decide the action to take once it is ready
    pub fn before_install<B: RenderBackend + ?Sized>(&mut self, backend: &B, has_route: bool) {
        if self.previous_had_route && !has_route {
            let view = backend.viewport();
            log!("Capturing viewport zoom={} pan=({}, {})", view.zoom, view.pan.x, view.pan.y);
            self.snapshot = Some(view);
        } else if has_route || self.route_ever_shown {
            self.snapshot = None;
        }

        self.previous_had_route = has_route;
        self.route_ever_shown |= has_route;

        self.pending = Some(if has_route {
            ViewportAction::FitRoute
        } else if let Some(snapshot) = self.snapshot {
            ViewportAction::Restore(snapshot)
        } else if !self.route_ever_shown {
            ViewportAction::FitCentral
        } else {
            ViewportAction::Keep
        });
    }

    /// Apply the pending action. Runs at most once per install.
    pub fn on_ready<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, model: &RenderModel, config: &MapConfig) {
        let Some(action) = self.pending.take() else {
            return;
        };

        match action {
            ViewportAction::FitRoute => {
                let ids: Vec<String> = model
                    .nodes
                    .iter()
                    .filter(|n| n.style.visible && model.is_on_route(n))
                    .map(|n| n.id.clone())
                    .collect();
                if ids.is_empty() {
                    fit_all(backend, model, config.fallback_padding);
                } else {
                    backend.fit(&ids, config.route_padding);
                }
            }
            ViewportAction::Restore(view) => {
                backend.set_zoom(view.zoom);
                backend.set_pan(view.pan);
            }
            ViewportAction::FitCentral => {
                let ids: Vec<String> = model
                    .nodes
                    .iter()
                    .filter(|n| n.style.visible && config.central_bounds.contains(n.geo))
                    .map(|n| n.id.clone())
                    .collect();
                if ids.is_empty() {
                    fit_all(backend, model, config.fallback_padding);
                } else {
                    backend.fit(&ids, config.central_padding);
                }
            }
            ViewportAction::Keep => {}
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn fit_all<B: RenderBackend + ?Sized>(backend: &mut B, model: &RenderModel, padding: f64) {
    let ids: Vec<String> = model
        .nodes
        .iter()
        .filter(|n| n.style.visible)
        .map(|n| n.id.clone())
        .collect();
    backend.fit(&ids, padding);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::backend::recording::{Call, RecordingBackend};
    use crate::fixtures::{path, sample_network, station, RED};
    use crate::geometry::Point;
    use crate::layout::GraphModelBuilder;
    use crate::models::Graph;

    fn model(graph: &Graph, route: Option<&crate::models::Path>) -> RenderModel {
        GraphModelBuilder::new(&MapConfig::default())
            .build(Some(graph), route)
            .expect("model")
    }

    #[test]
    fn test_first_build_fits_central_region() {
        let config = MapConfig::default();
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        let m = model(&sample_network(), None);

        manager.before_install(&backend, false);
        assert_eq!(manager.pending(), Some(ViewportAction::FitCentral));
        manager.on_ready(&mut backend, &m, &config);

        let Call::Fit(ids, padding) = backend.fits()[0].clone() else { panic!("expected fit") };
        assert_eq!(padding, config.central_padding);
        // Lyublino lies outside the central box
        assert!(!ids.contains(&"10.75".to_string()));
        assert!(ids.contains(&"hub_Киевская".to_string()));
        assert!(!ids.contains(&"3.3".to_string()), "grouped members are not fitted");
    }

    #[test]
    fn test_central_fit_falls_back_to_everything() {
        let config = MapConfig::default();
        let graph = Graph {
            stations: vec![station("x", "Far", RED, 10.0, 10.0)],
            edges: Vec::new(),
        };
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, false);
        manager.on_ready(&mut backend, &model(&graph, None), &config);
        assert_eq!(backend.calls, vec![Call::Fit(vec!["x".to_string()], config.fallback_padding)]);
    }

    #[test]
    fn test_route_fit_includes_hubs_with_route_members() {
        let config = MapConfig::default();
        let route = path(&["3.1", "3.2", "3.3"]);
        let m = model(&sample_network(), Some(&route));
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();

        manager.before_install(&backend, true);
        manager.on_ready(&mut backend, &m, &config);

        let Call::Fit(ids, padding) = backend.fits()[0].clone() else { panic!("expected fit") };
        assert_eq!(padding, config.route_padding);
        assert_eq!(ids, vec!["3.1", "hub_Арбатская", "hub_Киевская"]);
    }

    #[test]
    fn test_unresolvable_route_fits_everything() {
        let config = MapConfig::default();
        let m = model(&sample_network(), Some(&path(&["nowhere"])));
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, true);
        manager.on_ready(&mut backend, &m, &config);
        let Call::Fit(ids, padding) = backend.fits()[0].clone() else { panic!("expected fit") };
        assert_eq!(padding, config.fallback_padding);
        assert_eq!(ids.len(), m.nodes.iter().filter(|n| n.style.visible).count());
    }

    #[test]
    fn test_clearing_route_captures_and_restores() {
        let config = MapConfig::default();
        let graph = sample_network();
        let with_route = model(&graph, Some(&path(&["1.1", "1.2"])));
        let without = model(&graph, None);
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();

        manager.before_install(&backend, true);
        manager.on_ready(&mut backend, &with_route, &config);

        // User moves around while the route is displayed
        backend.zoom = 3.25;
        backend.pan = Point::new(-120.5, 44.0);
        let before_clear = backend.viewport();

        manager.before_install(&backend, false);
        assert_eq!(manager.snapshot(), Some(before_clear));
        backend.clear_calls();
        manager.on_ready(&mut backend, &without, &config);

        assert_eq!(backend.calls, vec![Call::SetZoom(3.25), Call::SetPan(Point::new(-120.5, 44.0))]);
        assert!(backend.viewport().approx_eq(&before_clear, 1e-9));
    }

    #[test]
    fn test_new_route_discards_snapshot() {
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, true);
        backend.zoom = 2.0;
        manager.before_install(&backend, false);
        assert!(manager.snapshot().is_some());

        manager.before_install(&backend, true);
        assert!(manager.snapshot().is_none());
        assert_eq!(manager.pending(), Some(ViewportAction::FitRoute));
    }

    #[test]
    fn test_repeated_plain_build_after_route_keeps_view() {
        let config = MapConfig::default();
        let m = model(&sample_network(), None);
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, true);
        manager.before_install(&backend, false);
        manager.before_install(&backend, false);

        assert!(manager.snapshot().is_none());
        assert_eq!(manager.pending(), Some(ViewportAction::Keep));
        backend.clear_calls();
        manager.on_ready(&mut backend, &m, &config);
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_plain_builds_never_touch_empty_snapshot() {
        let backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, false);
        manager.before_install(&backend, false);
        assert!(manager.snapshot().is_none());
        assert!(!manager.route_ever_shown());
        assert_eq!(manager.pending(), Some(ViewportAction::FitCentral));
    }

    #[test]
    fn test_ready_applies_once() {
        let config = MapConfig::default();
        let m = model(&sample_network(), None);
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, false);
        manager.on_ready(&mut backend, &m, &config);
        manager.on_ready(&mut backend, &m, &config);
        assert_eq!(backend.fits().len(), 1);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut backend = RecordingBackend::new();
        let mut manager = ViewportStateManager::new();
        manager.before_install(&backend, true);
        backend.zoom = 4.0;
        manager.before_install(&backend, false);
        manager.reset();
        assert!(manager.snapshot().is_none());
        assert!(!manager.route_ever_shown());
        assert!(manager.pending().is_none());
    }
}
