#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod canvas_backend;
pub mod canvas_viewport;
pub mod metro_map;
