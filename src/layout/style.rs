use crate::constants::{
    DIMMED_OPACITY, EDGE_WIDTH, HUB_NODE_RADIUS, HUB_ROUTE_NODE_RADIUS, NODE_BORDER_WIDTH, NODE_RADIUS,
    ROUTE_EDGE_COLOR, ROUTE_EDGE_WIDTH, ROUTE_NODE_RADIUS, TRANSFER_EDGE_WIDTH,
};
use crate::models::{EdgeState, EdgeStyle, NodeState, NodeStyle};

/// Resolve the drawing parameters for a node state.
///
/// Grouped placeholders are invisible regardless of route flags; their hub
/// carries the visuals.
#[must_use]
pub fn node_style(state: NodeState) -> NodeStyle {
    if state.contains(NodeState::GROUPED) {
        return NodeStyle {
            radius: 0.0,
            opacity: 0.0,
            border_width: 0.0,
            show_label: false,
            visible: false,
            z_index: 0,
        };
    }

    let hub = state.contains(NodeState::HUB);
    let route = state.contains(NodeState::ROUTE);
    let dimmed = state.contains(NodeState::DIMMED);

    let radius = match (hub, route) {
        (true, true) => HUB_ROUTE_NODE_RADIUS,
        (true, false) => HUB_NODE_RADIUS,
        (false, true) => ROUTE_NODE_RADIUS,
        (false, false) => NODE_RADIUS,
    };

    NodeStyle {
        radius,
        opacity: if dimmed { DIMMED_OPACITY } else { 1.0 },
        border_width: if hub { 0.0 } else { NODE_BORDER_WIDTH },
        show_label: !dimmed,
        visible: true,
        z_index: i32::from(route) * 10 + i32::from(hub) * 5 + 1,
    }
}

/// Resolve the drawing parameters for an edge state and its base color
#[must_use]
pub fn edge_style(state: EdgeState, base_color: &str) -> EdgeStyle {
    let route = state.contains(EdgeState::ROUTE);
    let transfer = state.contains(EdgeState::TRANSFER);

    let (color, width) = if route {
        (ROUTE_EDGE_COLOR.to_string(), ROUTE_EDGE_WIDTH)
    } else if transfer {
        (base_color.to_string(), TRANSFER_EDGE_WIDTH)
    } else {
        (base_color.to_string(), EDGE_WIDTH)
    };

    EdgeStyle {
        color,
        width,
        opacity: if state.contains(EdgeState::DIMMED) { DIMMED_OPACITY } else { 1.0 },
        dashed: transfer && !route,
        z_index: if route { 10 } else { 0 },
    }
}
