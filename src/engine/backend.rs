use crate::geometry::Point;
use crate::models::{RenderModel, ViewportState};

/// Rendering backend driven by a [`MapInstance`](super::MapInstance).
///
/// Implementations draw a declarative model with fixed node positions and
/// expose imperative view controls. Ready and drag notifications are delivered
/// by the host calling back into the instance.
pub trait RenderBackend {
    /// Take ownership of a freshly built model.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot display the model; the caller
    /// tears the backend down in that case.
    fn install(&mut self, model: &RenderModel) -> Result<(), String>;

    /// Drop the installed model and any resources derived from it
    fn teardown(&mut self);

    /// Fit the view to the given node ids with `padding` screen pixels around them.
    /// Unknown ids are ignored.
    fn fit(&mut self, ids: &[String], padding: f64);

    fn zoom(&self) -> f64;
    fn set_zoom(&mut self, zoom: f64);

    fn pan(&self) -> Point;
    fn set_pan(&mut self, pan: Point);

    fn node_position(&self, id: &str) -> Option<Point>;
    fn set_node_position(&mut self, id: &str, position: Point);

    /// The container size may have changed
    fn resize(&mut self);

    /// Current zoom and pan as one value
    fn viewport(&self) -> ViewportState {
        ViewportState::new(self.zoom(), self.pan())
    }
}
