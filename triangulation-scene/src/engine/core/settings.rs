use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::{Deserialize, Serialize};

use crate::engine::camera::auto_rotate::{AutoRotate, AutoRotateSettings};
use crate::engine::camera::trackball::{TrackballControls, TrackballSettings};
use crate::engine::render::edge_line_material::EdgeLineMaterial;
use constants::render_settings::EDGE_LINE_WIDTH;

pub const VIEWER_SETTINGS_PATH: &str = "viewer.settings.json";

/// Runtime-tunable viewer behaviour. Every field is optional in the JSON
/// file; missing ones keep their compiled defaults.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub trackball: TrackballSettings,
    pub auto_rotate: AutoRotateSettings,
    pub edge_line_width: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            trackball: TrackballSettings::default(),
            auto_rotate: AutoRotateSettings::default(),
            edge_line_width: EDGE_LINE_WIDTH,
        }
    }
}

impl ViewerSettings {
    pub fn apply(
        &self,
        controls: &mut TrackballControls,
        auto_rotate: &mut AutoRotate,
        line_materials: &mut Assets<EdgeLineMaterial>,
    ) {
        controls.settings = self.trackball;
        auto_rotate.settings = self.auto_rotate;
        for (_, material) in line_materials.iter_mut() {
            material.set_line_width(self.edge_line_width);
        }
    }
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<ViewerSettings>>,
    settled: bool,
}

pub fn start_settings_load(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    info!("Loading viewer settings from: {}", VIEWER_SETTINGS_PATH);
    loader.handle = Some(asset_server.load(VIEWER_SETTINGS_PATH));
}

/// Apply the settings file once it arrives. A missing or malformed file
/// leaves the defaults in place.
pub fn apply_viewer_settings(
    mut loader: ResMut<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<ViewerSettings>>,
    mut controls: ResMut<TrackballControls>,
    mut auto_rotate: ResMut<AutoRotate>,
    mut line_materials: ResMut<Assets<EdgeLineMaterial>>,
) {
    if loader.settled {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(settings) = settings_assets.get(&handle) {
        settings.apply(&mut controls, &mut auto_rotate, &mut line_materials);
        info!("Viewer settings applied");
        loader.settled = true;
    } else if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle.id()) {
        warn!("Viewer settings unavailable, using defaults: {}", error);
        loader.settled = true;
    }
}
