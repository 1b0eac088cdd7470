//! Scene construction for the triangulation illustration.
//!
//! Builds the camera frustums, their rays, the shared target marker and the
//! ground grid, all from fixed layout constants.

/// Startup system spawning the full scene and the viewer camera.
pub mod builder;

/// Camera frustum pyramid geometry and outline extraction.
pub mod frustum;

/// Flat reference grid mesh.
pub mod grid;

/// Deterministic per-camera look-at jitter.
pub mod jitter;

/// Ray spans and cylinder placement.
pub mod ray;
