/// Flat reference grid under the triangulation scene
use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::engine::render::palette_color;

#[derive(Component)]
pub struct GroundGrid;

/// Square grid in the XZ plane, centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub size: f32,
    pub divisions: u32,
    pub center_color: u32,
    pub line_color: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        use constants::palette::{GRID_CENTER_LINE, GRID_LINE};
        use constants::scene_layout::{GRID_DIVISIONS, GRID_SIZE};
        Self {
            size: GRID_SIZE,
            divisions: GRID_DIVISIONS,
            center_color: GRID_CENTER_LINE,
            line_color: GRID_LINE,
        }
    }
}

/// Build the grid as a vertex-coloured line list. The middle line in each
/// direction uses the center colour.
pub fn create_grid_mesh(layout: &GridLayout) -> Mesh {
    let half = layout.size * 0.5;
    let step = layout.size / layout.divisions as f32;
    let center_line = layout.divisions / 2;

    let center = palette_color(layout.center_color).to_linear().to_f32_array();
    let regular = palette_color(layout.line_color).to_linear().to_f32_array();

    let line_count = (layout.divisions as usize + 1) * 2;
    let mut positions = Vec::with_capacity(line_count * 2);
    let mut colors = Vec::with_capacity(line_count * 2);

    for i in 0..=layout.divisions {
        let k = -half + i as f32 * step;
        let color = if i == center_line { center } else { regular };

        // Line along X at z = k, then line along Z at x = k
        positions.extend_from_slice(&[[-half, 0.0, k], [half, 0.0, k]]);
        positions.extend_from_slice(&[[k, 0.0, -half], [k, 0.0, half]]);
        colors.extend_from_slice(&[color; 4]);
    }

    let indices = (0..positions.len() as u32).collect::<Vec<_>>();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

pub fn spawn_ground_grid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    elevation: f32,
) {
    let grid_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(create_grid_mesh(&GridLayout::default()))),
        MeshMaterial3d(grid_material),
        Transform::from_xyz(0.0, elevation, 0.0),
        GroundGrid,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_two_lines_per_division_step() {
        let layout = GridLayout::default();
        let mesh = create_grid_mesh(&layout);
        // 9 lines each way, two vertices per line.
        assert_eq!(mesh.count_vertices(), 36);
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineList);
    }

    #[test]
    fn grid_spans_the_requested_size() {
        let mesh = create_grid_mesh(&GridLayout::default());
        let Some(positions) = mesh.attribute(Mesh::ATTRIBUTE_POSITION).and_then(|a| a.as_float3())
        else {
            panic!("grid mesh has no positions");
        };
        let max_x = positions.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
        let min_z = positions.iter().map(|p| p[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 2.0);
        assert_eq!(min_z, -2.0);
        assert!(positions.iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn only_middle_lines_use_center_colour() {
        let layout = GridLayout::default();
        let mesh = create_grid_mesh(&layout);
        let center = palette_color(layout.center_color).to_linear().to_f32_array();
        let Some(bevy::render::mesh::VertexAttributeValues::Float32x4(colors)) =
            mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("grid mesh has no colours");
        };
        assert_eq!(colors.iter().filter(|c| **c == center).count(), 4);
    }
}
