//! Compile-time constants shared by the triangulation scene.

pub mod interaction;
pub mod palette;
pub mod render_settings;
pub mod scene_layout;
