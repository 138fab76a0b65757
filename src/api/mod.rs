//! Client for the metro data service.

use reqwest::{StatusCode, Url};
use crate::models::{Graph, Path, StationRef};

/// Service root relative to the page origin
pub const API_BASE: &str = "/api";

/// Largest page the station listing serves
pub const MAX_STATIONS_LIMIT: usize = 500;

/// # Errors
///
/// Returns an error if `base` is not an absolute URL
pub fn graph_url(base: &str) -> Result<Url, String> {
    Url::parse(&format!("{}/graph", base.trim_end_matches('/'))).map_err(|e| format!("Invalid graph URL: {e}"))
}

/// # Errors
///
/// Returns an error if `base` is not an absolute URL
pub fn path_url(base: &str, from_id: &str, to_id: &str) -> Result<Url, String> {
    Url::parse_with_params(
        &format!("{}/path", base.trim_end_matches('/')),
        &[("from_id", from_id), ("to_id", to_id)],
    )
    .map_err(|e| format!("Invalid path URL: {e}"))
}

/// Station listing URL; a blank `search` lists every station.
///
/// `limit` is clamped to `1..=MAX_STATIONS_LIMIT`.
///
/// # Errors
///
/// Returns an error if `base` is not an absolute URL
pub fn stations_url(base: &str, search: &str, limit: usize) -> Result<Url, String> {
    let limit = limit.clamp(1, MAX_STATIONS_LIMIT).to_string();
    let endpoint = format!("{}/stations", base.trim_end_matches('/'));
    let search = search.trim();
    let result = if search.is_empty() {
        Url::parse_with_params(&endpoint, &[("limit", limit.as_str())])
    } else {
        Url::parse_with_params(&endpoint, &[("search", search), ("limit", limit.as_str())])
    };
    result.map_err(|e| format!("Invalid stations URL: {e}"))
}

/// Fetch the whole network snapshot
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not ok
/// - The response body cannot be deserialized
pub async fn fetch_graph(base: &str) -> Result<Graph, String> {
    reqwest::get(graph_url(base)?)
        .await
        .map_err(|e| format!("Request failed: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Graph unavailable: {e}"))?
        .json::<Graph>()
        .await
        .map_err(|e| format!("Failed to deserialize graph: {e}"))
}

/// Fetch the fastest route between two station ids
///
/// # Errors
///
/// Returns an error if the request fails, no route exists (404) or the body
/// cannot be deserialized
pub async fn fetch_path(base: &str, from_id: &str, to_id: &str) -> Result<Path, String> {
    let response = reqwest::get(path_url(base, from_id, to_id)?)
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(format!("No route from {from_id} to {to_id}"));
    }

    response
        .error_for_status()
        .map_err(|e| format!("Route unavailable: {e}"))?
        .json::<Path>()
        .await
        .map_err(|e| format!("Failed to deserialize route: {e}"))
}

/// Look stations up by name substring
///
/// # Errors
///
/// Returns an error if the request fails, the status is not ok or the body
/// cannot be deserialized
pub async fn fetch_stations(base: &str, search: &str, limit: usize) -> Result<Vec<StationRef>, String> {
    reqwest::get(stations_url(base, search, limit)?)
        .await
        .map_err(|e| format!("Request failed: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Stations unavailable: {e}"))?
        .json::<Vec<StationRef>>()
        .await
        .map_err(|e| format!("Failed to deserialize stations: {e}"))
}
