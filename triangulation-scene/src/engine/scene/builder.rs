use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::frustum::{FrustumDimensions, FrustumGeometry};
use super::grid::spawn_ground_grid;
use super::jitter::jittered_target;
use super::ray::RaySpan;
use crate::engine::camera::trackball::TrackballControls;
use crate::engine::render::edge_line_material::{EdgeLineMaterial, create_edge_line_mesh};
use crate::engine::render::palette_color;
use constants::palette::{BACKGROUND, FRUSTUM_EDGE, FRUSTUM_FACE, RAY, TARGET_POINT as POINT_COLOR};
use constants::render_settings::{
    EDGE_LINE_WIDTH, EDGE_THRESHOLD_DEGREES, VIEW_FAR, VIEW_FOV_DEGREES, VIEW_NEAR,
};
use constants::scene_layout::{
    CAMERA_POSITIONS, GRID_ELEVATION, RAY_EXTENSION, RAY_RADIUS, RAY_RESOLUTION,
    TARGET_MARKER_RADIUS, TARGET_MARKER_SEGMENTS, TARGET_NOISE_SCALE, TARGET_POINT, VIEW_POSITION,
    VIEW_TARGET,
};

/// Group entity for one triangulating camera's frustum.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraFrustum {
    pub index: usize,
}

/// Pixel-width outline drawn over a frustum's faces.
#[derive(Component)]
pub struct FrustumEdges;

#[derive(Component, Debug, Clone, Copy)]
pub struct CameraRay {
    pub index: usize,
}

#[derive(Component)]
pub struct TargetMarker;

/// The camera the scene is viewed through.
#[derive(Component)]
pub struct ViewerCamera;

/// Where a triangulating camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// The fixed camera rig, each aimed at its own jittered copy of the target.
pub fn camera_poses() -> Vec<CameraPose> {
    CAMERA_POSITIONS
        .iter()
        .enumerate()
        .map(|(index, &position)| CameraPose {
            position,
            look_at: jittered_target(index, TARGET_POINT, TARGET_NOISE_SCALE),
        })
        .collect()
}

/// Startup system assembling the whole scene: viewer camera and controls,
/// frustums, rays, target marker and ground grid.
pub fn build_triangulation_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut line_materials: ResMut<Assets<EdgeLineMaterial>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let resolution = windows
        .single()
        .map(|window| window.size())
        .unwrap_or(Vec2::ONE);

    commands.insert_resource(ClearColor(palette_color(BACKGROUND)));
    spawn_viewer_camera(&mut commands, resolution);

    let face_material = standard_materials.add(StandardMaterial {
        base_color: palette_color(FRUSTUM_FACE),
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    let ray_material = standard_materials.add(StandardMaterial {
        base_color: palette_color(RAY),
        unlit: true,
        ..default()
    });

    let geometry = FrustumGeometry::new(FrustumDimensions::default());
    let face_mesh = meshes.add(geometry.to_mesh());
    let edge_mesh = meshes.add(create_edge_line_mesh(&geometry.outline(EDGE_THRESHOLD_DEGREES)));

    let poses = camera_poses();
    for (index, pose) in poses.iter().enumerate() {
        let edge_material = line_materials.add(EdgeLineMaterial::new(
            palette_color(FRUSTUM_EDGE),
            EDGE_LINE_WIDTH,
            resolution,
        ));

        commands
            .spawn((
                Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y),
                Visibility::default(),
                CameraFrustum { index },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(face_mesh.clone()),
                    MeshMaterial3d(face_material.clone()),
                    NotShadowCaster,
                ));
                parent.spawn((
                    Mesh3d(edge_mesh.clone()),
                    MeshMaterial3d(edge_material),
                    NotShadowCaster,
                    FrustumEdges,
                ));
            });

        spawn_ray(&mut commands, &mut meshes, ray_material.clone(), index, pose);
    }

    commands.spawn((
        Mesh3d(meshes.add(
            Sphere::new(TARGET_MARKER_RADIUS)
                .mesh()
                .uv(TARGET_MARKER_SEGMENTS, TARGET_MARKER_SEGMENTS),
        )),
        MeshMaterial3d(standard_materials.add(StandardMaterial {
            base_color: palette_color(POINT_COLOR),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(TARGET_POINT),
        TargetMarker,
    ));

    spawn_ground_grid(
        &mut commands,
        &mut meshes,
        &mut standard_materials,
        GRID_ELEVATION,
    );

    info!(
        "Triangulation scene built: {} cameras at {}x{}",
        poses.len(),
        resolution.x,
        resolution.y
    );
}

fn spawn_viewer_camera(commands: &mut Commands, resolution: Vec2) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: VIEW_FOV_DEGREES.to_radians(),
            aspect_ratio: resolution.x / resolution.y,
            near: VIEW_NEAR,
            far: VIEW_FAR,
            ..default()
        }),
        Transform::from_translation(VIEW_POSITION).looking_at(VIEW_TARGET, Vec3::Y),
        ViewerCamera,
    ));
    commands.insert_resource(TrackballControls::new(VIEW_POSITION, VIEW_TARGET, resolution));
}

fn spawn_ray(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    index: usize,
    pose: &CameraPose,
) {
    let span = RaySpan::through(pose.position, pose.look_at, RAY_EXTENSION);
    let cylinder = Cylinder::new(RAY_RADIUS, span.length())
        .mesh()
        .resolution(RAY_RESOLUTION);

    commands.spawn((
        Mesh3d(meshes.add(cylinder)),
        MeshMaterial3d(material),
        span.cylinder_transform(),
        NotShadowCaster,
        CameraRay { index },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_has_one_pose_per_camera() {
        let poses = camera_poses();
        assert_eq!(poses.len(), CAMERA_POSITIONS.len());
        for (pose, position) in poses.iter().zip(CAMERA_POSITIONS) {
            assert_eq!(pose.position, position);
        }
    }

    #[test]
    fn poses_are_reproducible() {
        assert_eq!(camera_poses(), camera_poses());
    }

    #[test]
    fn every_ray_passes_near_the_shared_target() {
        for pose in camera_poses() {
            let span = RaySpan::through(pose.position, pose.look_at, RAY_EXTENSION);
            let to_target = TARGET_POINT - span.start;
            let along = to_target.dot(span.direction());
            let closest = span.start + span.direction() * along;
            assert!(closest.distance(TARGET_POINT) < TARGET_NOISE_SCALE);
            assert!(along > 0.0 && along < span.length());
        }
    }
}
