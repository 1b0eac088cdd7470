use std::collections::BTreeMap;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

/// Size of the pyramid standing in for a camera's view volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumDimensions {
    pub base_width: f32,
    pub base_height: f32,
    pub depth: f32,
}

impl Default for FrustumDimensions {
    fn default() -> Self {
        use constants::scene_layout::{FRUSTUM_BASE_HEIGHT, FRUSTUM_BASE_WIDTH, FRUSTUM_DEPTH};
        Self {
            base_width: FRUSTUM_BASE_WIDTH,
            base_height: FRUSTUM_BASE_HEIGHT,
            depth: FRUSTUM_DEPTH,
        }
    }
}

/// Local-space pyramid: apex at the origin, base `depth` units along -Z,
/// which is the forward axis `Transform::looking_at` aims.
#[derive(Debug, Clone, PartialEq)]
pub struct FrustumGeometry {
    pub positions: [Vec3; 5],
    pub indices: [u32; 18],
}

impl FrustumGeometry {
    pub fn new(dimensions: FrustumDimensions) -> Self {
        let w = dimensions.base_width * 0.5;
        let h = dimensions.base_height * 0.5;
        let d = -dimensions.depth;

        Self {
            positions: [
                Vec3::ZERO,
                Vec3::new(-w, -h, d),
                Vec3::new(w, -h, d),
                Vec3::new(w, h, d),
                Vec3::new(-w, h, d),
            ],
            // Four sides, then the base split into two triangles.
            indices: [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1, 1, 2, 3, 1, 3, 4],
        }
    }

    pub fn apex(&self) -> Vec3 {
        self.positions[0]
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Filled face mesh with smooth vertex normals.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            self.positions.iter().map(|p| p.to_array()).collect::<Vec<_>>(),
        );
        mesh.insert_indices(Indices::U32(self.indices.to_vec()));
        mesh.compute_smooth_normals();
        mesh
    }

    pub fn outline(&self, threshold_degrees: f32) -> Vec<[Vec3; 2]> {
        feature_edges(&self.positions, &self.indices, threshold_degrees)
    }
}

/// Collect the edges of an indexed triangle list worth outlining.
///
/// Each shared edge appears once. Edges used by a single triangle are
/// always kept; edges between two triangles are kept only when the
/// triangles' normals differ by more than `threshold_degrees`.
pub fn feature_edges(positions: &[Vec3], indices: &[u32], threshold_degrees: f32) -> Vec<[Vec3; 2]> {
    let threshold_dot = threshold_degrees.to_radians().cos();

    // Edge key -> (normal of first face, keep?)
    let mut edges: BTreeMap<(u32, u32), (Vec3, bool)> = BTreeMap::new();

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]];
        let pa = positions[a as usize];
        let pb = positions[b as usize];
        let pc = positions[c as usize];
        let normal = (pb - pa).cross(pc - pa).normalize_or_zero();

        for (i, j) in [(a, b), (b, c), (c, a)] {
            let key = (i.min(j), i.max(j));
            match edges.get_mut(&key) {
                Some((first_normal, keep)) => {
                    *keep = first_normal.dot(normal) <= threshold_dot;
                }
                None => {
                    edges.insert(key, (normal, true));
                }
            }
        }
    }

    edges
        .into_iter()
        .filter(|(_, (_, keep))| *keep)
        .map(|((i, j), _)| [positions[i as usize], positions[j as usize]])
        .collect()
}
