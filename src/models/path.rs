use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRef {
    pub id: String,
    pub name: String,
    pub line_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub station_id: String,
    pub station_name: String,
    pub line_name: String,
    #[serde(default)]
    pub is_transfer: bool,
}

/// A computed route, as returned by the routing service.
///
/// Only `path` drives the overlay; the remaining fields are summary counters
/// carried through for the surrounding UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub from_station: Option<StationRef>,
    #[serde(default)]
    pub to_station: Option<StationRef>,
    #[serde(default)]
    pub path: Vec<PathStep>,
    #[serde(default)]
    pub total_steps: usize,
    #[serde(default)]
    pub stations_count: usize,
    #[serde(default)]
    pub total_time_minutes: f64,
}

impl Path {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Station ids in route order
    pub fn station_ids(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(|step| step.station_id.as_str())
    }

    /// Consecutive station id pairs along the route
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.path
            .windows(2)
            .map(|w| (w[0].station_id.as_str(), w[1].station_id.as_str()))
    }

    /// Number of steps flagged as line changes
    #[must_use]
    pub fn transfer_count(&self) -> usize {
        self.path.iter().filter(|step| step.is_transfer).count()
    }
}

/// Whether an optional path has anything to display
#[must_use]
pub fn has_route(path: Option<&Path>) -> bool {
    path.is_some_and(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, is_transfer: bool) -> PathStep {
        PathStep {
            station_id: id.to_string(),
            station_name: id.to_uppercase(),
            line_name: "L".to_string(),
            is_transfer,
        }
    }

    #[test]
    fn test_hops() {
        let path = Path {
            path: vec![step("a", false), step("b", false), step("c", true)],
            ..Path::default()
        };
        let hops: Vec<_> = path.hops().collect();
        assert_eq!(hops, vec![("a", "b"), ("b", "c")]);
        assert_eq!(path.transfer_count(), 1);
    }

    #[test]
    fn test_has_route() {
        assert!(!has_route(None));
        assert!(!has_route(Some(&Path::default())));
        let path = Path { path: vec![step("a", false)], ..Path::default() };
        assert!(has_route(Some(&path)));
    }

    #[test]
    fn test_deserialize_route_response() {
        let path: Path = serde_json::from_value(serde_json::json!({
            "from_station": {"id": "1.148", "name": "Сокольники", "line_name": "Сокольническая"},
            "to_station": {"id": "2.89", "name": "Тверская", "line_name": "Замоскворецкая"},
            "path": [
                {"station_id": "1.148", "station_name": "Сокольники", "line_name": "Сокольническая"},
                {"station_id": "2.89", "station_name": "Тверская", "line_name": "Замоскворецкая", "is_transfer": true}
            ],
            "total_steps": 1,
            "stations_count": 2,
            "total_time_minutes": 6.0
        }))
        .expect("valid path");

        assert_eq!(path.path.len(), 2);
        assert!(path.path[1].is_transfer);
        assert_eq!(path.total_steps, 1);
    }
}
