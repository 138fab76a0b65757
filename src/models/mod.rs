mod path;
mod render;
mod station;
mod view;

pub use path::{has_route, Path, PathStep, StationRef};
pub use render::{
    EdgeState, EdgeStyle, HubIcon, NodeFill, NodeState, NodeStyle, RenderEdge, RenderModel, RenderNode,
};
pub use station::{Edge, Graph, Station};
pub use view::ViewportState;
