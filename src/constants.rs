//! Drawing constants shared by the style table and the canvas backend.

/// Base node radius in model units
pub const NODE_RADIUS: f64 = 5.0;
/// Route nodes are drawn larger so the path stands out
pub const ROUTE_NODE_RADIUS: f64 = 9.0;
pub const HUB_NODE_RADIUS: f64 = 9.0;
pub const HUB_ROUTE_NODE_RADIUS: f64 = 13.0;

pub const NODE_BORDER_WIDTH: f64 = 1.0;
pub const DIMMED_OPACITY: f64 = 0.2;

pub const EDGE_WIDTH: f64 = 2.0;
pub const TRANSFER_EDGE_WIDTH: f64 = 1.5;
pub const ROUTE_EDGE_WIDTH: f64 = 5.0;
pub const ROUTE_EDGE_COLOR: &str = "#ffcc00";

pub const CANVAS_BACKGROUND_COLOR: &str = "#1a1a1a";
pub const NODE_BORDER_COLOR: &str = "#111111";
pub const LABEL_COLOR: &str = "#eeeeee";
pub const LABEL_FONT: &str = "11px sans-serif";
pub const LABEL_OFFSET: f64 = 6.0;
pub const LOADING_MESSAGE_COLOR: &str = "#666";
pub const LOADING_MESSAGE_FONT: &str = "16px sans-serif";

/// Hit radius in screen pixels for starting a node drag
pub const NODE_HIT_RADIUS: f64 = 12.0;

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 25.0;
