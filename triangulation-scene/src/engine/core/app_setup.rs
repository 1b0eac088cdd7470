use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::auto_rotate::{AutoRotate, auto_rotate_system};
use crate::engine::camera::trackball::{InteractionStarted, trackball_input, trackball_update};
use crate::engine::core::settings::{
    SettingsLoader, ViewerSettings, apply_viewer_settings, start_settings_load,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::render::edge_line_material::EdgeLineMaterial;
use crate::engine::scene::builder::build_triangulation_scene;
use crate::engine::systems::resize::handle_viewport_resize;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MaterialPlugin::<EdgeLineMaterial>::default())
        // Optional runtime overrides for trackball and auto-rotate tuning.
        .add_plugins(JsonAssetPlugin::<ViewerSettings>::new(&["settings.json"]))
        .add_event::<InteractionStarted>()
        .init_resource::<AutoRotate>()
        .init_resource::<SettingsLoader>();

    app.add_systems(Startup, (build_triangulation_scene, start_settings_load))
        .add_systems(
            Update,
            (
                apply_viewer_settings,
                handle_viewport_resize,
                // Frame loop: input, idle re-arm and turntable, damped update.
                trackball_input,
                auto_rotate_system,
                trackball_update,
            )
                .chain(),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "wgpu=error,naga=warn".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
