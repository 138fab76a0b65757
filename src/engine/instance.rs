use leptos::logging::error;
use crate::config::MapConfig;
use crate::geometry::Point;
use crate::layout::GraphModelBuilder;
use crate::logging::log;
use crate::models::{Graph, Path, RenderModel};
use super::backend::RenderBackend;
use super::drag::DragSyncController;
use super::viewport::ViewportStateManager;

/// One live map: the backend, the installed model and the state that must
/// survive between rebuilds.
///
/// Passed explicitly to every operation; nothing here is global.
pub struct MapInstance<B: RenderBackend> {
    backend: B,
    config: MapConfig,
    model: Option<RenderModel>,
    drag: DragSyncController,
    viewport: ViewportStateManager,
}

impl<B: RenderBackend> MapInstance<B> {
    pub fn new(backend: B, config: MapConfig) -> Self {
        Self {
            backend,
            config,
            model: None,
            drag: DragSyncController::default(),
            viewport: ViewportStateManager::new(),
        }
    }

    pub fn model(&self) -> Option<&RenderModel> {
        self.model.as_ref()
    }

    /// No model is installed; the host shows its loading state
    pub fn is_loading(&self) -> bool {
        self.model.is_none()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn viewport(&self) -> &ViewportStateManager {
        &self.viewport
    }

    /// Replace the displayed model with one built from `graph` and `path`.
    ///
    /// Returns whether a model is installed afterwards. The previous model is
    /// always torn down first, so at most one is live.
    pub fn rebuild(&mut self, graph: Option<&Graph>, path: Option<&Path>) -> bool {
        let Some(model) = GraphModelBuilder::new(&self.config).build(graph, path) else {
            log!("No stations yet, showing loading state");
            self.clear_model();
            return false;
        };

        self.viewport.before_install(&self.backend, model.has_route);
        self.clear_model();

        if let Err(e) = self.backend.install(&model) {
            error!("Failed to install render model: {}", e);
            self.backend.teardown();
            return false;
        }

        self.drag = DragSyncController::from_model(&model);
        self.model = Some(model);
        true
    }

    /// The backend has laid out the installed model
    pub fn on_ready(&mut self) {
        if let Some(model) = &self.model {
            self.viewport.on_ready(&mut self.backend, model, &self.config);
        }
    }

    /// A node was dragged to `position`; move whatever is linked to it.
    /// Returns the number of positions written.
    pub fn on_drag(&mut self, id: &str, position: Point) -> usize {
        let writes = self.drag.on_drag(id, position);
        for (target, p) in &writes {
            self.backend.set_node_position(target, *p);
        }
        writes.len()
    }

    pub fn resize(&mut self) {
        self.backend.resize();
    }

    /// Tear down the backend and forget everything, including the saved view
    pub fn destroy(&mut self) {
        self.clear_model();
        self.viewport.reset();
    }

    fn clear_model(&mut self) {
        if self.model.take().is_some() {
            self.backend.teardown();
        }
        self.drag = DragSyncController::default();
    }
}
