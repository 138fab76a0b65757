use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use crate::geometry::{LatLng, Point};

bitflags::bitflags! {
    /// Style-state flags carried by a render node.
    ///
    /// The plain state is the empty set. A hub on the route is `HUB | ROUTE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeState: u8 {
        const ROUTE   = 0b0001;
        const DIMMED  = 0b0010;
        const GROUPED = 0b0100;
        const HUB     = 0b1000;
    }
}

bitflags::bitflags! {
    /// Style-state flags carried by a render edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EdgeState: u8 {
        const TRANSFER = 0b001;
        const ROUTE    = 0b010;
        const DIMMED   = 0b100;
    }
}

macro_rules! bits_serde {
    ($ty:ty, $name:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_u8(self.bits())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = u8::deserialize(deserializer)?;
                Self::from_bits(bits).ok_or_else(|| serde::de::Error::custom(concat!("Invalid ", $name, " bits")))
            }
        }
    };
}

bits_serde!(NodeState, "NodeState");
bits_serde!(EdgeState, "EdgeState");

/// An embeddable raster image, stored as a `data:` URL.
///
/// An empty icon means the image could not be produced; the hub is still
/// drawn, just without fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubIcon {
    pub data_url: String,
    pub size: u32,
}

impl HubIcon {
    #[must_use]
    pub fn empty(size: u32) -> Self {
        Self { data_url: String::new(), size }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_url.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeFill {
    Color(String),
    Icon(HubIcon),
    /// Grouped placeholders draw nothing
    None,
}

/// Concrete drawing parameters for a node, resolved from its state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub radius: f64,
    pub opacity: f64,
    pub border_width: f64,
    pub show_label: bool,
    pub visible: bool,
    pub z_index: i32,
}

/// Concrete drawing parameters for an edge, resolved from its state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub dashed: bool,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    /// Hover text: station name and line, or the list of lines for a hub
    pub tooltip: String,
    pub fill: NodeFill,
    pub position: Point,
    pub geo: LatLng,
    pub state: NodeState,
    /// Member station ids; non-empty only for hubs
    #[serde(default)]
    pub members: Vec<String>,
    pub style: NodeStyle,
}

impl RenderNode {
    #[must_use]
    pub fn is_hub(&self) -> bool {
        self.state.contains(NodeState::HUB)
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.state.contains(NodeState::GROUPED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub color: String,
    pub state: EdgeState,
    pub style: EdgeStyle,
}

/// Everything the rendering backend needs to draw one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    /// Hub id to member station ids, in member order
    pub hubs: IndexMap<String, Vec<String>>,
    pub has_route: bool,
    /// Station ids on the displayed route, in route order
    pub route_ids: Vec<String>,
}

impl RenderModel {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&RenderEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn hub_nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(|n| n.is_hub())
    }

    /// Whether a node counts as part of the displayed route.
    ///
    /// Hubs count when any of their members is on the route.
    #[must_use]
    pub fn is_on_route(&self, node: &RenderNode) -> bool {
        let on_route = |id: &str| self.route_ids.iter().any(|r| r == id);
        on_route(&node.id) || node.members.iter().any(|m| on_route(m))
    }
}
