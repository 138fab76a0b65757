#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod api;
pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod models;

#[cfg(test)]
mod fixtures;

pub use components::app::App;
pub use components::metro_map::MetroMap;
pub use config::MapConfig;
pub use engine::{MapInstance, RenderBackend};
pub use layout::GraphModelBuilder;
