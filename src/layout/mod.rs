pub mod builder;
pub mod grouping;
pub mod hub_icon;
pub mod projection;
pub mod style;

pub use builder::GraphModelBuilder;
pub use grouping::{group_stations, hub_id_for, InterchangeGroup, StationGrouping};
pub use hub_icon::{generate_hub_icon, IconOutline};
pub use projection::GeoProjector;
pub use style::{edge_style, node_style};
