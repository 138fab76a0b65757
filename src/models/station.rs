use serde::{Deserialize, Serialize};
use crate::geometry::LatLng;

const DEFAULT_LINE_COLOR: &str = "#888888";

fn default_line_color() -> String {
    DEFAULT_LINE_COLOR.to_string()
}

/// A single station on a single line.
///
/// Interchanges are modelled upstream as several stations sharing a name,
/// one per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub line_id: String,
    pub line_name: String,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    pub lat: f64,
    pub lng: f64,
}

impl Station {
    /// Name to show for this station, falling back to the id when the name is blank
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Line color with a leading `#`; the upstream feed sometimes omits it
    #[must_use]
    pub fn color(&self) -> String {
        let trimmed = self.line_color.trim();
        if trimmed.is_empty() {
            default_line_color()
        } else if trimmed.starts_with('#') || trimmed.starts_with("rgb") {
            trimmed.to_string()
        } else {
            format!("#{trimmed}")
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A connection between two stations, either a ride along a line or a transfer walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from_id: String,
    pub to_id: String,
    #[serde(default)]
    pub is_transfer: bool,
}


/// A whole network snapshot as delivered by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, name: &str, color: &str) -> Station {
        Station {
            id: id.to_string(),
            name: name.to_string(),
            line_id: "1".to_string(),
            line_name: "Сокольническая".to_string(),
            line_color: color.to_string(),
            lat: 55.75,
            lng: 37.62,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(station("1.1", "Арбатская", "#fff").display_name(), "Арбатская");
        assert_eq!(station("1.2", "   ", "#fff").display_name(), "1.2");
        assert_eq!(station("1.3", "", "#fff").display_name(), "1.3");
    }

    #[test]
    fn test_color_normalization() {
        assert_eq!(station("a", "A", "D6083B").color(), "#D6083B");
        assert_eq!(station("a", "A", "#D6083B").color(), "#D6083B");
        assert_eq!(station("a", "A", "").color(), "#888888");
    }

    #[test]
    fn test_graph_deserializes_with_defaults() {
        let graph: Graph = serde_json::from_value(serde_json::json!({
            "stations": [
                {"id": "1.1", "name": "A", "line_id": "1", "line_name": "L", "lat": 55.7, "lng": 37.5}
            ],
            "edges": [{"from_id": "1.1", "to_id": "1.2"}]
        }))
        .expect("valid graph");

        assert_eq!(graph.stations[0].line_color, "#888888");
        assert!(!graph.edges[0].is_transfer);
        assert!(!graph.is_empty());
    }
}
