/// Idle time after the last manual interaction before auto-rotation resumes.
pub const AUTO_ROTATE_IDLE_MS: u64 = 2000;

/// Auto-rotation speed; each frame turns by `speed * AUTO_ROTATE_STEP` radians.
pub const AUTO_ROTATE_SPEED: f32 = 0.3;
pub const AUTO_ROTATE_STEP: f32 = 0.01;

pub const ROTATE_SPEED: f32 = 3.5;
pub const ZOOM_SPEED: f32 = 1.4;
pub const PAN_SPEED: f32 = 0.8;
pub const DYNAMIC_DAMPING_FACTOR: f32 = 0.2;

pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 12.0;

// Wheel delta scaling per scroll unit.
pub const WHEEL_PIXEL_SCALE: f32 = 0.000_25;
pub const WHEEL_LINE_SCALE: f32 = 0.01;
