//! Viewer camera interaction.
//!
//! Trackball orbit/zoom/pan driven by pointer input, plus the idle-triggered
//! auto-rotation that turns the scene while nobody is touching it.

/// Trackball controls resource and its input/update systems.
pub mod trackball;

/// Auto-rotation state, idle re-arm and the per-frame turntable system.
pub mod auto_rotate;
