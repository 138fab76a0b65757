//! Small networks shared by unit tests.

use crate::models::{Edge, Graph, Path, PathStep, Station};

pub const RED: &str = "#D6083B";
pub const BLUE: &str = "#0078BE";
pub const LIGHT_BLUE: &str = "#19C1F3";
pub const BROWN: &str = "#894E35";
pub const GREEN: &str = "#4FB04F";

pub fn station(id: &str, name: &str, color: &str, lat: f64, lng: f64) -> Station {
    Station {
        id: id.to_string(),
        name: name.to_string(),
        line_id: id.split('.').next().unwrap_or_default().to_string(),
        line_name: format!("Line {}", id.split('.').next().unwrap_or_default()),
        line_color: color.to_string(),
        lat,
        lng,
    }
}

pub fn edge(from: &str, to: &str, is_transfer: bool) -> Edge {
    Edge {
        from_id: from.to_string(),
        to_id: to.to_string(),
        is_transfer,
    }
}

pub fn path(ids: &[&str]) -> Path {
    Path {
        path: ids
            .iter()
            .map(|id| PathStep {
                station_id: (*id).to_string(),
                station_name: (*id).to_string(),
                line_name: String::new(),
                is_transfer: false,
            })
            .collect(),
        total_steps: ids.len().saturating_sub(1),
        stations_count: ids.len(),
        total_time_minutes: 0.0,
        ..Path::default()
    }
}

/// Three stations on two lines all named "Interchange"
pub fn interchange_graph() -> Graph {
    Graph {
        stations: vec![
            station("A", "Interchange", RED, 55.70, 37.50),
            station("B", "Interchange", RED, 55.71, 37.52),
            station("C", "Interchange", BLUE, 55.72, 37.60),
        ],
        edges: vec![edge("A", "B", false), edge("B", "C", true)],
    }
}

/// A slice of the central Moscow network with duplicated and dangling edges.
///
/// Interchanges: "Арбатская" (3.2, 4.1) and "Киевская" (3.3, 4.2, 5.1).
/// "Люблино" appears twice but belongs to unconnected lines.
pub fn sample_network() -> Graph {
    Graph {
        stations: vec![
            station("1.1", "Сокольники", RED, 55.789, 37.680),
            station("1.2", "Лубянка", RED, 55.760, 37.627),
            station("1.3", "Охотный ряд", RED, 55.757, 37.615),
            station("1.4", "Библиотека имени Ленина", RED, 55.752, 37.610),
            station("3.1", "Площадь Революции", BLUE, 55.756, 37.622),
            station("3.2", "Арбатская", BLUE, 55.752, 37.604),
            station("3.3", "Киевская", BLUE, 55.743, 37.565),
            station("4.1", "Арбатская", LIGHT_BLUE, 55.752, 37.601),
            station("4.2", "Киевская", LIGHT_BLUE, 55.744, 37.566),
            station("5.1", "Киевская", BROWN, 55.744, 37.567),
            station("10.75", "Люблино", GREEN, 55.676, 37.761),
            station("132.731", "Люблино", "E74280", 55.685, 37.734),
        ],
        edges: vec![
            edge("1.1", "1.2", false),
            edge("1.2", "1.1", false),
            edge("1.2", "1.3", false),
            edge("1.3", "1.2", false),
            edge("1.3", "1.4", false),
            edge("3.1", "3.2", false),
            edge("3.2", "3.3", false),
            edge("3.3", "3.2", false),
            edge("4.1", "4.2", false),
            edge("3.2", "4.1", true),
            edge("4.1", "3.2", true),
            edge("3.3", "4.2", true),
            edge("4.2", "5.1", true),
            edge("1.3", "3.1", true),
            edge("3.1", "1.3", true),
            edge("1.4", "3.2", true),
            edge("1.4", "99.9", false),
        ],
    }
}
