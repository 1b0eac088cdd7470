use bevy::math::Vec3;

/// Point every camera ray converges toward.
pub const TARGET_POINT: Vec3 = Vec3::new(0.0, 1.2, 0.0);

/// Per-axis magnitude of the deterministic look-at jitter.
pub const TARGET_NOISE_SCALE: f32 = 0.18;

/// Triangulating camera positions.
pub const CAMERA_POSITIONS: [Vec3; 5] = [
    Vec3::new(1.5, 0.2, 1.2),
    Vec3::new(-1.3, 0.1, 1.2),
    Vec3::new(0.1, -0.3, 1.2),
    Vec3::new(1.1, -0.1, -0.8),
    Vec3::new(-0.9, 0.15, -0.7),
];

// Frustum pyramid, in world units.
pub const FRUSTUM_DEPTH: f32 = 0.5;
pub const FRUSTUM_BASE_WIDTH: f32 = 0.4;
pub const FRUSTUM_BASE_HEIGHT: f32 = 0.28;

// Rays continue past the target so they read as passing through it.
pub const RAY_EXTENSION: f32 = 4.0;
pub const RAY_RADIUS: f32 = 0.012;
pub const RAY_RESOLUTION: u32 = 8;

pub const TARGET_MARKER_RADIUS: f32 = 0.12;
pub const TARGET_MARKER_SEGMENTS: u32 = 32;

pub const GRID_SIZE: f32 = 4.0;
pub const GRID_DIVISIONS: u32 = 8;
pub const GRID_ELEVATION: f32 = -0.8;

/// Viewer camera starting pose.
pub const VIEW_POSITION: Vec3 = Vec3::new(4.0, 1.5, 5.0);
pub const VIEW_TARGET: Vec3 = Vec3::new(0.0, 0.8, 0.0);
