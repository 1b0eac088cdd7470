//! Rendering helpers shared by the scene builder.
//!
//! Holds the pixel-width edge line material used for frustum wireframes
//! and colour conversion for the packed palette constants.

/// Custom material and mesh layout for screen-space wireframe lines.
///
/// Lines keep a constant on-screen thickness regardless of distance, which
/// requires the current viewport resolution as a uniform.
pub mod edge_line_material;

use bevy::prelude::*;
use constants::palette::rgb_channels;

/// Convert a packed 0xRRGGBB sRGB constant into a Bevy colour.
pub fn palette_color(hex: u32) -> Color {
    let [r, g, b] = rgb_channels(hex);
    Color::srgb_u8(r, g, b)
}
