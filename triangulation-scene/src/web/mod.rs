//! Browser integration for the triangulation scene.
//!
//! Locates the host container, appends the render canvas and holds off on
//! building the app until the container has been laid out.

/// Container lookup, canvas creation and deferred construction.
pub mod mount;

/// Pointer-down handler clearing stray text selection during drags.
#[cfg(target_arch = "wasm32")]
pub mod selection;
