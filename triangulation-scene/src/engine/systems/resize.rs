use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::engine::camera::trackball::TrackballControls;
use crate::engine::render::edge_line_material::EdgeLineMaterial;
use constants::render_settings::MAX_PIXEL_RATIO;

/// Size of the render surface in logical pixels plus the capped pixel ratio.
///
/// The cap is reported, not pushed into the window: a Bevy window surface is
/// always `logical * scale_factor` physical pixels, so overriding the scale
/// factor resizes the window (or the canvas on the web) instead of only its
/// backing buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub size: Vec2,
    pub pixel_ratio: f32,
}

impl ViewportMetrics {
    /// `None` for an empty surface, e.g. a container that is not laid out yet.
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            size: Vec2::new(width, height),
            pixel_ratio: device_pixel_ratio.min(MAX_PIXEL_RATIO),
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size.x / self.size.y
    }
}

/// Push new viewport metrics into the projection, the trackball and every
/// edge line material. Returns how many materials changed.
pub fn apply_viewport_metrics(
    metrics: ViewportMetrics,
    projection: &mut Projection,
    controls: &mut TrackballControls,
    line_materials: &mut Assets<EdgeLineMaterial>,
) -> usize {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = metrics.aspect_ratio();
    }

    controls.handle_resize(metrics.size);

    // Only touch materials that differ so unchanged ones are not re-uploaded.
    let stale = line_materials
        .iter()
        .filter(|(_, material)| material.resolution() != metrics.size)
        .map(|(id, _)| id)
        .collect::<Vec<_>>();

    for id in &stale {
        if let Some(material) = line_materials.get_mut(*id) {
            material.set_resolution(metrics.size);
        }
    }

    stale.len()
}

/// React to surface resizes (and the first frame): refresh projection,
/// trackball screen mapping and line material resolution.
pub fn handle_viewport_resize(
    mut resize_events: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut projections: Query<&mut Projection, With<Camera3d>>,
    mut controls: ResMut<TrackballControls>,
    mut line_materials: ResMut<Assets<EdgeLineMaterial>>,
    mut initialised: Local<bool>,
) {
    // First run syncs with the window even without a resize.
    if resize_events.read().count() == 0 && *initialised {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(mut projection) = projections.single_mut() else {
        return;
    };

    let device_pixel_ratio = window.resolution.base_scale_factor();
    let Some(metrics) = ViewportMetrics::new(window.width(), window.height(), device_pixel_ratio)
    else {
        return;
    };

    *initialised = true;
    let updated =
        apply_viewport_metrics(metrics, &mut projection, &mut controls, &mut line_materials);

    debug!(
        "Viewport resized to {}x{} @{}x ({} line materials updated)",
        metrics.size.x, metrics.size.y, metrics.pixel_ratio, updated
    );
}
