//! egui application surface.

pub mod app;
