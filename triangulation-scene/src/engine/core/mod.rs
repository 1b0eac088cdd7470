//! Core application setup.
//!
//! Builds the Bevy app, configures the window for native and WASM targets
//! and loads optional viewer settings.

/// App construction: plugins, resources and the per-frame system chain.
pub mod app_setup;

/// Viewer settings asset, loaded from JSON and applied once.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
