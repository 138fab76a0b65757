use serde::{Deserialize, Serialize};
use crate::geometry::Point;

/// Zoom level and pan offset of the visualization
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
pub struct ViewportState {
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan: Point,
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            pan: Point::default(),
        }
    }
}

impl ViewportState {
    #[must_use]
    pub const fn new(zoom: f64, pan: Point) -> Self {
        Self { zoom, pan }
    }

    /// Convert a screen-space point to model coordinates
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan.x) / self.zoom, (screen.y - self.pan.y) / self.zoom)
    }

    /// Convert a model-space point to screen coordinates
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.zoom + self.pan.x, world.y * self.zoom + self.pan.y)
    }

    /// Equal within `epsilon` on zoom and both pan axes
    #[must_use]
    pub fn approx_eq(&self, other: &ViewportState, epsilon: f64) -> bool {
        (self.zoom - other.zoom).abs() <= epsilon
            && (self.pan.x - other.pan.x).abs() <= epsilon
            && (self.pan.y - other.pan.y).abs() <= epsilon
    }
}
