//! Per-frame runtime systems outside camera control.

/// Viewport resize handling: pixel ratio cap, projection aspect, trackball
/// screen mapping and edge line resolution.
pub mod resize;
