/// Vertical field of view of the viewer camera, in degrees.
pub const VIEW_FOV_DEGREES: f32 = 50.0;
pub const VIEW_NEAR: f32 = 0.1;
pub const VIEW_FAR: f32 = 100.0;

/// Upper bound on the device pixel ratio used for the render surface.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Frustum wireframe thickness in screen pixels.
pub const EDGE_LINE_WIDTH: f32 = 2.0;

/// Edges whose adjacent faces bend by less than this are not outlined.
pub const EDGE_THRESHOLD_DEGREES: f32 = 1.0;

/// DOM id of the element hosting the scene.
pub const CONTAINER_ID: &str = "triangulation-canvas";

/// DOM id given to the canvas appended inside the container.
pub const CANVAS_ID: &str = "triangulation-canvas-surface";
