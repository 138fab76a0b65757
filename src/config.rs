use serde::{Deserialize, Serialize};
use crate::geometry::GeoBounds;

/// Largest hub icon edge the rasterizer accepts
pub const MAX_HUB_ICON_SIZE: u32 = 512;

/// Tunables for the layout and viewport logic.
///
/// Defaults describe the Moscow metro network. Every geographic constant lives
/// here so a different network only needs a different config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude (degrees) whose cosine scales longitude differences
    #[serde(default = "default_reference_latitude")]
    pub reference_latitude: f64,
    /// Model units per degree
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Region fitted on the very first build when no route is shown
    #[serde(default = "default_central_bounds")]
    pub central_bounds: GeoBounds,
    /// Names that are shared by genuinely distinct stations and must never merge
    #[serde(default = "default_no_merge_names")]
    pub no_merge_names: Vec<String>,
    /// Hub icon edge length in pixels
    #[serde(default = "default_hub_icon_size")]
    pub hub_icon_size: u32,
    #[serde(default = "default_hub_outline_width")]
    pub hub_outline_width: f64,
    #[serde(default = "default_hub_outline_color")]
    pub hub_outline_color: String,
    #[serde(default = "default_route_padding")]
    pub route_padding: f64,
    #[serde(default = "default_fallback_padding")]
    pub fallback_padding: f64,
    #[serde(default = "default_central_padding")]
    pub central_padding: f64,
    #[serde(default = "default_transfer_edge_color")]
    pub transfer_edge_color: String,
    /// Color for edges whose source station is unknown
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,
}

fn default_reference_latitude() -> f64 {
    55.75
}

fn default_scale() -> f64 {
    2000.0
}

fn default_central_bounds() -> GeoBounds {
    GeoBounds {
        min_lat: 55.70,
        min_lng: 37.50,
        max_lat: 55.80,
        max_lng: 37.75,
    }
}

fn default_no_merge_names() -> Vec<String> {
    // Lyublino on the Lyublinsko-Dmitrovskaya line and on MCD-2 are unconnected
    vec!["Люблино".to_string()]
}

fn default_hub_icon_size() -> u32 {
    48
}

fn default_hub_outline_width() -> f64 {
    3.0
}

fn default_hub_outline_color() -> String {
    "#222222".to_string()
}

fn default_route_padding() -> f64 {
    60.0
}

fn default_fallback_padding() -> f64 {
    120.0
}

fn default_central_padding() -> f64 {
    30.0
}

fn default_transfer_edge_color() -> String {
    "rgba(160, 160, 160, 0.45)".to_string()
}

fn default_neutral_color() -> String {
    "#888888".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            reference_latitude: default_reference_latitude(),
            scale: default_scale(),
            central_bounds: default_central_bounds(),
            no_merge_names: default_no_merge_names(),
            hub_icon_size: default_hub_icon_size(),
            hub_outline_width: default_hub_outline_width(),
            hub_outline_color: default_hub_outline_color(),
            route_padding: default_route_padding(),
            fallback_padding: default_fallback_padding(),
            central_padding: default_central_padding(),
            transfer_edge_color: default_transfer_edge_color(),
            neutral_color: default_neutral_color(),
        }
    }
}

impl MapConfig {
    /// Parse a config from JSON; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse map config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> Result<(), String> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(format!("scale must be positive, got {}", self.scale));
        }
        if !(-90.0..=90.0).contains(&self.reference_latitude) {
            return Err(format!("reference_latitude out of range: {}", self.reference_latitude));
        }
        let b = &self.central_bounds;
        if b.min_lat > b.max_lat || b.min_lng > b.max_lng {
            return Err("central_bounds min corner exceeds max corner".to_string());
        }
        if self.hub_icon_size > MAX_HUB_ICON_SIZE {
            return Err(format!(
                "hub_icon_size must be at most {MAX_HUB_ICON_SIZE}, got {}",
                self.hub_icon_size
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_no_merge(&self, name: &str) -> bool {
        self.no_merge_names.iter().any(|n| n == name)
    }
}
