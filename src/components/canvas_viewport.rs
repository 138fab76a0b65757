use crate::constants::{MAX_ZOOM, MIN_ZOOM};
use crate::geometry::{Bounds, Point};
use crate::models::ViewportState;

const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Pointer state while the user pans the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanGesture {
    pub active: bool,
    pub last_mouse_pos: Point,
}

impl PanGesture {
    pub fn start(&mut self, x: f64, y: f64) {
        self.active = true;
        self.last_mouse_pos = Point::new(x, y);
    }

    /// Advance the gesture, returning the view moved by the pointer delta
    pub fn pan_move(&mut self, x: f64, y: f64, view: ViewportState) -> Option<ViewportState> {
        if !self.active {
            return None;
        }
        let dx = x - self.last_mouse_pos.x;
        let dy = y - self.last_mouse_pos.y;
        self.last_mouse_pos = Point::new(x, y);
        Some(ViewportState::new(view.zoom, Point::new(view.pan.x + dx, view.pan.y + dy)))
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// Zoom factor for a wheel delta
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y < 0.0 {
        WHEEL_ZOOM_IN
    } else {
        WHEEL_ZOOM_OUT
    }
}

/// Zoom by `factor` keeping the world point under the cursor fixed
#[must_use]
pub fn zoom_around(view: ViewportState, factor: f64, mouse_x: f64, mouse_y: f64) -> ViewportState {
    let old_zoom = view.zoom;
    let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    let ratio = new_zoom / old_zoom;

    ViewportState::new(
        new_zoom,
        Point::new(
            mouse_x - (mouse_x - view.pan.x) * ratio,
            mouse_y - (mouse_y - view.pan.y) * ratio,
        ),
    )
}

/// View that shows `bounds` centered in a `width` x `height` canvas with
/// `padding` screen pixels on every side.
///
/// A degenerate (single point) bounds keeps the current zoom and only centers.
#[must_use]
pub fn fit_bounds(bounds: Bounds, width: f64, height: f64, padding: f64, current_zoom: f64) -> ViewportState {
    let avail_w = (width - 2.0 * padding).max(1.0);
    let avail_h = (height - 2.0 * padding).max(1.0);

    let zoom = if bounds.width() <= f64::EPSILON && bounds.height() <= f64::EPSILON {
        current_zoom
    } else {
        let zoom_x = if bounds.width() > f64::EPSILON { avail_w / bounds.width() } else { f64::INFINITY };
        let zoom_y = if bounds.height() > f64::EPSILON { avail_h / bounds.height() } else { f64::INFINITY };
        zoom_x.min(zoom_y)
    }
    .clamp(MIN_ZOOM, MAX_ZOOM);

    let center = bounds.center();
    ViewportState::new(
        zoom,
        Point::new(width / 2.0 - center.x * zoom, height / 2.0 - center.y * zoom),
    )
}
