use std::f64::consts::TAU;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use leptos::logging::warn;
use crate::config::MAX_HUB_ICON_SIZE;
use crate::models::HubIcon;

const SUPERSAMPLE: u32 = 4;
const FALLBACK_RGB: [u8; 3] = [0x88, 0x88, 0x88];
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Outline drawn around every hub icon
#[derive(Debug, Clone, PartialEq)]
pub struct IconOutline {
    pub color: String,
    pub width: f64,
}

/// Render a circular icon split into one equal sector per color.
///
/// Sector `i` covers `[i/N, (i+1)/N)` of a clockwise turn starting at 12
/// o'clock. The output is a PNG `data:` URL and is byte-identical for identical
/// inputs. When no image can be produced the returned icon is empty.
#[must_use]
pub fn generate_hub_icon(colors: &[String], size: u32, outline: &IconOutline) -> HubIcon {
    match render_png(colors, size, outline) {
        Ok(png) => HubIcon {
            data_url: format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)),
            size,
        },
        Err(e) => {
            warn!("Hub icon unavailable: {}", e);
            HubIcon::empty(size)
        }
    }
}

fn render_png(colors: &[String], size: u32, outline: &IconOutline) -> Result<Vec<u8>, String> {
    let image = rasterize(colors, size, outline)?;
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(image.as_raw(), size, size, ExtendedColorType::Rgba8)
        .map_err(|e| format!("PNG encoding failed: {e}"))?;
    Ok(png)
}

/// Rasterize the icon with 4x4 supersampling per pixel
///
/// # Errors
///
/// Returns an error for a zero or oversized size or an empty color list
pub fn rasterize(colors: &[String], size: u32, outline: &IconOutline) -> Result<RgbaImage, String> {
    if size == 0 {
        return Err("icon size is zero".to_string());
    }
    if size > MAX_HUB_ICON_SIZE {
        return Err(format!("icon size {size} exceeds {MAX_HUB_ICON_SIZE}"));
    }
    if colors.is_empty() {
        return Err("no colors to draw".to_string());
    }

    let fills: Vec<[u8; 3]> = colors.iter().map(|c| parse_hex_color(c).unwrap_or(FALLBACK_RGB)).collect();
    let stroke = parse_hex_color(&outline.color).unwrap_or([0x22, 0x22, 0x22]);
    let radius = f64::from(size) / 2.0;
    let inner = (radius - outline.width.max(0.0)).max(0.0);
    let step = 1.0 / f64::from(SUPERSAMPLE);

    Ok(RgbaImage::from_fn(size, size, |px, py| {
        let mut acc = [0.0_f64; 4];
        for sy in 0..SUPERSAMPLE {
            for sx in 0..SUPERSAMPLE {
                let x = f64::from(px) + (f64::from(sx) + 0.5) * step;
                let y = f64::from(py) + (f64::from(sy) + 0.5) * step;
                let dx = x - radius;
                let dy = y - radius;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > radius {
                    continue;
                }
                let rgb = if dist > inner {
                    stroke
                } else {
                    fills[sector_index(dx, dy, fills.len())]
                };
                acc[0] += f64::from(rgb[0]);
                acc[1] += f64::from(rgb[1]);
                acc[2] += f64::from(rgb[2]);
                acc[3] += 1.0;
            }
        }
        to_pixel(acc, SUPERSAMPLE * SUPERSAMPLE)
    }))
}

/// Sector containing an offset from the icon center (screen axes, y down)
#[must_use]
pub fn sector_index(dx: f64, dy: f64, sectors: usize) -> usize {
    let mut angle = dx.atan2(-dy);
    if angle < 0.0 {
        angle += TAU;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (angle / TAU * sectors as f64).floor() as usize;
    index.min(sectors - 1)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixel(acc: [f64; 4], samples: u32) -> Rgba<u8> {
    if acc[3] == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let covered = acc[3];
    let alpha = (covered / f64::from(samples) * 255.0).round() as u8;
    Rgba([
        (acc[0] / covered).round() as u8,
        (acc[1] / covered).round() as u8,
        (acc[2] / covered).round() as u8,
        alpha,
    ])
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (alpha ignored), with or without `#`
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgb[i] = v * 17;
            }
            Some(rgb)
        }
        6 | 8 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        _ => None,
    }
}
