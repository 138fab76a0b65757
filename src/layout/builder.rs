use std::collections::{HashMap, HashSet};
use indexmap::IndexMap;
use petgraph::graphmap::UnGraphMap;
use crate::config::MapConfig;
use crate::logging::log;
use crate::models::{
    has_route, EdgeState, Graph, NodeFill, NodeState, Path, RenderEdge, RenderModel, RenderNode, Station,
};
use super::grouping::{group_stations, InterchangeGroup, StationGrouping};
use super::hub_icon::{generate_hub_icon, IconOutline};
use super::projection::GeoProjector;
use super::style::{edge_style, node_style};

/// Route membership looked up while classifying nodes and edges
struct RouteOverlay<'a> {
    active: bool,
    stations: HashSet<&'a str>,
    hops: UnGraphMap<&'a str, ()>,
}

impl<'a> RouteOverlay<'a> {
    fn new(path: Option<&'a Path>) -> Self {
        match path.filter(|p| has_route(Some(*p))) {
            Some(path) => Self {
                active: true,
                stations: path.station_ids().collect(),
                hops: UnGraphMap::from_edges(path.hops()),
            },
            None => Self {
                active: false,
                stations: HashSet::new(),
                hops: UnGraphMap::new(),
            },
        }
    }

    /// Layer route/dimmed flags over a base state; plain builds leave it untouched
    fn classify(&self, base: NodeState, on_route: bool) -> NodeState {
        if !self.active {
            base
        } else if on_route {
            base | NodeState::ROUTE
        } else {
            base | NodeState::DIMMED
        }
    }

    fn contains_station(&self, id: &str) -> bool {
        self.stations.contains(id)
    }

    fn contains_hop(&self, a: &str, b: &str) -> bool {
        self.hops.contains_edge(a, b)
    }
}

/// Builds the render model for one (graph, path) pair.
pub struct GraphModelBuilder<'c> {
    config: &'c MapConfig,
}

impl<'c> GraphModelBuilder<'c> {
    #[must_use]
    pub fn new(config: &'c MapConfig) -> Self {
        Self { config }
    }

    /// Build the full render model.
    ///
    /// Returns `None` when the graph is absent or has no stations; the caller
    /// shows its loading state in that case.
    #[must_use]
    pub fn build(&self, graph: Option<&Graph>, path: Option<&Path>) -> Option<RenderModel> {
        let graph = graph.filter(|g| !g.is_empty())?;

        #[cfg(feature = "perf_timing")]
        let start = crate::logging::now_ms();

        let route = RouteOverlay::new(path);
        let projector = GeoProjector::from_stations(&graph.stations, self.config)?;
        let positions = projector.project_all(&graph.stations);
        let grouping = group_stations(&graph.stations, &positions, self.config);

        let mut nodes = self.station_nodes(graph, &positions, &grouping, &route);
        let mut hubs = IndexMap::new();
        for group in grouping.groups() {
            let hub = self.hub_node(graph, group, &route);
            hubs.insert(hub.id.clone(), hub.members.clone());
            nodes.push(hub);
        }
        let edges = self.edges(graph, &grouping, &route);

        let route_ids = if route.active {
            path.map(|p| p.station_ids().map(str::to_string).collect()).unwrap_or_default()
        } else {
            Vec::new()
        };

        log!(
            "Built render model: {} nodes, {} edges, {} hubs, route={}",
            nodes.len(),
            edges.len(),
            hubs.len(),
            route.active
        );
        #[cfg(feature = "perf_timing")]
        log!("  Model build: {:.2}ms", crate::logging::now_ms() - start);

        Some(RenderModel {
            nodes,
            edges,
            hubs,
            has_route: route.active,
            route_ids,
        })
    }

    fn station_nodes(
        &self,
        graph: &Graph,
        positions: &[crate::geometry::Point],
        grouping: &StationGrouping,
        route: &RouteOverlay<'_>,
    ) -> Vec<RenderNode> {
        graph
            .stations
            .iter()
            .enumerate()
            .map(|(i, station)| {
                let on_route = route.contains_station(&station.id);
                if let Some(group) = grouping.group_of(i) {
                    let state = route.classify(NodeState::GROUPED, on_route);
                    RenderNode {
                        id: station.id.clone(),
                        label: String::new(),
                        tooltip: station_tooltip(station),
                        fill: NodeFill::None,
                        position: group.centroid,
                        geo: station.coordinate(),
                        state,
                        members: Vec::new(),
                        style: node_style(state),
                    }
                } else {
                    let state = route.classify(NodeState::empty(), on_route);
                    RenderNode {
                        id: station.id.clone(),
                        label: station.display_name().to_string(),
                        tooltip: station_tooltip(station),
                        fill: NodeFill::Color(station.color()),
                        position: positions[i],
                        geo: station.coordinate(),
                        state,
                        members: Vec::new(),
                        style: node_style(state),
                    }
                }
            })
            .collect()
    }

    fn hub_node(&self, graph: &Graph, group: &InterchangeGroup, route: &RouteOverlay<'_>) -> RenderNode {
        let members: Vec<&Station> = group.members.iter().map(|&i| &graph.stations[i]).collect();
        let member_ids: Vec<String> = members.iter().map(|s| s.id.clone()).collect();
        let colors: Vec<String> = members.iter().map(|s| s.color()).collect();

        let outline = IconOutline {
            color: self.config.hub_outline_color.clone(),
            width: self.config.hub_outline_width,
        };
        let icon = generate_hub_icon(&colors, self.config.hub_icon_size, &outline);

        let on_route = member_ids.iter().any(|id| route.contains_station(id));
        let state = route.classify(NodeState::HUB, on_route);

        let mut tooltip = group.name.clone();
        for station in &members {
            tooltip.push('\n');
            tooltip.push_str(&station.line_name);
        }

        RenderNode {
            id: group.hub_id.clone(),
            label: group.name.clone(),
            tooltip,
            fill: NodeFill::Icon(icon),
            position: group.centroid,
            geo: group.geo,
            state,
            members: member_ids,
            style: node_style(state),
        }
    }

    fn edges(&self, graph: &Graph, grouping: &StationGrouping, route: &RouteOverlay<'_>) -> Vec<RenderEdge> {
        let index: HashMap<&str, usize> = graph
            .stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        let group_of = |id: &str| index.get(id).and_then(|&i| grouping.group_index(i));

        let mut seen: UnGraphMap<&str, ()> = UnGraphMap::new();
        let mut edges = Vec::new();

        for edge in &graph.edges {
            let (from, to) = (edge.from_id.as_str(), edge.to_id.as_str());
            if seen.contains_edge(from, to) {
                continue;
            }
            seen.add_edge(from, to, ());

            // Both ends already sit on the same hub
            if edge.is_transfer && group_of(from).is_some() && group_of(from) == group_of(to) {
                continue;
            }

            let mut state = if edge.is_transfer { EdgeState::TRANSFER } else { EdgeState::empty() };
            if route.contains_hop(from, to) {
                state |= EdgeState::ROUTE;
            } else if route.active {
                state |= EdgeState::DIMMED;
            }

            let color = if edge.is_transfer {
                self.config.transfer_edge_color.clone()
            } else {
                index
                    .get(from)
                    .map_or_else(|| self.config.neutral_color.clone(), |&i| graph.stations[i].color())
            };

            edges.push(RenderEdge {
                id: format!("{from}--{to}"),
                source: edge.from_id.clone(),
                target: edge.to_id.clone(),
                style: edge_style(state, &color),
                color,
                state,
            });
        }

        edges
    }
}

fn station_tooltip(station: &Station) -> String {
    format!("{}\n{}", station.display_name(), station.line_name)
}
