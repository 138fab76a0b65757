use std::collections::HashSet;
use indexmap::IndexMap;
use leptos::logging::warn;
use crate::config::MapConfig;
use crate::geometry::{centroid, mean_coordinate, LatLng, Point};
use crate::models::Station;

const HUB_ID_PREFIX: &str = "hub_";

/// Two or more same-named stations drawn as one hub.
#[derive(Debug, Clone, PartialEq)]
pub struct InterchangeGroup {
    pub name: String,
    pub hub_id: String,
    /// Indices into the station slice, in station order
    pub members: Vec<usize>,
    pub centroid: Point,
    pub geo: LatLng,
}

/// Result of partitioning stations by display name.
///
/// Stations that are not part of any interchange group are their own
/// singleton group and have no entry in `groups`.
#[derive(Debug, Clone, Default)]
pub struct StationGrouping {
    groups: Vec<InterchangeGroup>,
    group_of: Vec<Option<usize>>,
}

impl StationGrouping {
    /// Interchange groups in order of first appearance
    #[must_use]
    pub fn groups(&self) -> &[InterchangeGroup] {
        &self.groups
    }

    /// The interchange group containing a station, `None` for singletons
    #[must_use]
    pub fn group_of(&self, station_index: usize) -> Option<&InterchangeGroup> {
        self.group_of
            .get(station_index)
            .copied()
            .flatten()
            .map(|g| &self.groups[g])
    }

    /// Index of the group containing a station, used to compare membership cheaply
    #[must_use]
    pub fn group_index(&self, station_index: usize) -> Option<usize> {
        self.group_of.get(station_index).copied().flatten()
    }
}

/// Partition stations by exact name.
///
/// A name forms an interchange group when it has at least two stations, is not
/// blank and is not on the config's no-merge list. `positions` holds the
/// projected position of each station, index-aligned with `stations`.
///
/// Hub ids never collide with station ids or with each other.
#[must_use]
pub fn group_stations(stations: &[Station], positions: &[Point], config: &MapConfig) -> StationGrouping {
    let mut by_name: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (i, station) in stations.iter().enumerate() {
        by_name.entry(station.name.as_str()).or_default().push(i);
    }

    let mut groups = Vec::new();
    let mut group_of = vec![None; stations.len()];
    let mut used_ids: HashSet<String> = stations.iter().map(|s| s.id.clone()).collect();

    for (name, members) in by_name {
        if members.len() < 2 || name.trim().is_empty() || config.is_no_merge(name) {
            continue;
        }

        let member_positions: Vec<Point> = members.iter().filter_map(|&i| positions.get(i).copied()).collect();
        let member_coords: Vec<LatLng> = members.iter().map(|&i| stations[i].coordinate()).collect();
        let Some(center) = centroid(&member_positions) else { continue };
        let Some(geo) = mean_coordinate(&member_coords) else { continue };

        let hub_id = unique_hub_id(name, &mut used_ids);
        let group_index = groups.len();
        for &i in &members {
            group_of[i] = Some(group_index);
        }
        groups.push(InterchangeGroup {
            name: name.to_string(),
            hub_id,
            members,
            centroid: center,
            geo,
        });
    }

    StationGrouping { groups, group_of }
}

/// Derive an identifier from a group name.
///
/// Runs of characters that are not letters or digits collapse to a single
/// underscore, leading and trailing underscores are dropped, and the result is
/// prefixed with `hub_`. Letters include non-Latin scripts.
#[must_use]
pub fn hub_id_for(name: &str) -> String {
    let mut id = String::with_capacity(HUB_ID_PREFIX.len() + name.len());
    id.push_str(HUB_ID_PREFIX);
    let mut pending_separator = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && id.len() > HUB_ID_PREFIX.len() {
                id.push('_');
            }
            pending_separator = false;
            id.push(c);
        } else {
            pending_separator = true;
        }
    }
    id
}

fn unique_hub_id(name: &str, used: &mut HashSet<String>) -> String {
    let base = hub_id_for(name);
    if used.insert(base.clone()) {
        return base;
    }
    warn!("Hub id collision for group {:?}; disambiguating {}", name, base);
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, name: &str, lat: f64, lng: f64) -> Station {
        Station {
            id: id.to_string(),
            name: name.to_string(),
            line_id: id.split('.').next().unwrap_or_default().to_string(),
            line_name: "L".to_string(),
            line_color: "#ff0000".to_string(),
            lat,
            lng,
        }
    }

    fn config(no_merge: &[&str]) -> MapConfig {
        MapConfig {
            no_merge_names: no_merge.iter().map(|n| (*n).to_string()).collect(),
            ..MapConfig::default()
        }
    }

    fn positions(stations: &[Station]) -> Vec<Point> {
        stations.iter().map(|s| Point::new(s.lng, s.lat)).collect()
    }

    #[test]
    fn test_hub_id_normalization() {
        assert_eq!(hub_id_for("Interchange"), "hub_Interchange");
        assert_eq!(hub_id_for("Охотный  ряд"), "hub_Охотный_ряд");
        assert_eq!(hub_id_for("Park (Kultury) - 2"), "hub_Park_Kultury_2");
        assert_eq!(hub_id_for("  --Tail--  "), "hub_Tail");
        assert_eq!(hub_id_for("!!!"), "hub_");
    }

    #[test]
    fn test_groups_same_name_only() {
        let stations = vec![
            station("1.1", "Киевская", 55.74, 37.56),
            station("2.1", "Арбатская", 55.75, 37.60),
            station("3.1", "Киевская", 55.75, 37.57),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));

        assert_eq!(grouping.groups().len(), 1);
        let group = &grouping.groups()[0];
        assert_eq!(group.name, "Киевская");
        assert_eq!(group.members, vec![0, 2]);
        assert_eq!(group.hub_id, "hub_Киевская");
        assert!(grouping.group_of(1).is_none());
        assert_eq!(grouping.group_index(0), grouping.group_index(2));
    }

    #[test]
    fn test_centroid_is_mean_of_member_positions() {
        let stations = vec![
            station("1.1", "X", 0.0, 0.0),
            station("2.1", "X", 2.0, 4.0),
            station("3.1", "X", 4.0, 2.0),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));
        let group = &grouping.groups()[0];
        assert!((group.centroid.x - 2.0).abs() < 1e-10);
        assert!((group.centroid.y - 2.0).abs() < 1e-10);
        assert!((group.geo.lat - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_merge_names_stay_singletons() {
        let stations = vec![
            station("10.75", "Люблино", 55.676, 37.761),
            station("132.731", "Люблино", 55.685, 37.734),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&["Люблино"]));
        assert!(grouping.groups().is_empty());
        assert!(grouping.group_of(0).is_none());
        assert!(grouping.group_of(1).is_none());
    }

    #[test]
    fn test_exact_match_only() {
        let stations = vec![
            station("1.1", "Park", 0.0, 0.0),
            station("2.1", "park", 0.0, 0.0),
            station("3.1", "Park ", 0.0, 0.0),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));
        assert!(grouping.groups().is_empty());
    }

    #[test]
    fn test_colliding_hub_ids_are_disambiguated() {
        let stations = vec![
            station("1.1", "A-B", 0.0, 0.0),
            station("2.1", "A-B", 0.0, 0.0),
            station("3.1", "A B", 1.0, 1.0),
            station("4.1", "A B", 1.0, 1.0),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));
        let ids: Vec<_> = grouping.groups().iter().map(|g| g.hub_id.as_str()).collect();
        assert_eq!(ids, vec!["hub_A_B", "hub_A_B_2"]);
    }

    #[test]
    fn test_blank_names_are_never_grouped() {
        let stations = vec![
            station("1.1", "", 55.70, 37.50),
            station("2.2", "", 55.60, 37.80),
            station("3.1", "   ", 55.71, 37.51),
            station("4.1", "   ", 55.72, 37.52),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));
        assert!(grouping.groups().is_empty());
        assert!((0..stations.len()).all(|i| grouping.group_of(i).is_none()));
    }

    #[test]
    fn test_hub_id_avoids_station_ids() {
        let stations = vec![
            station("hub_X", "Y", 0.0, 0.0),
            station("1.1", "X", 1.0, 1.0),
            station("2.1", "X", 1.0, 1.0),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));
        assert_eq!(grouping.groups()[0].hub_id, "hub_X_2");
    }

    #[test]
    fn test_every_station_in_at_most_one_group() {
        let stations = vec![
            station("1.1", "A", 0.0, 0.0),
            station("2.1", "A", 0.0, 0.0),
            station("3.1", "B", 0.0, 0.0),
            station("4.1", "B", 0.0, 0.0),
            station("5.1", "C", 0.0, 0.0),
        ];
        let grouping = group_stations(&stations, &positions(&stations), &config(&[]));
        let mut seen = vec![0; stations.len()];
        for group in grouping.groups() {
            for &m in &group.members {
                seen[m] += 1;
            }
        }
        assert_eq!(seen, vec![1, 1, 1, 1, 0]);
    }
}
