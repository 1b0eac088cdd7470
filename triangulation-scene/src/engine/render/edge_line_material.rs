/// Screen-space wireframe lines with a pixel-constant width
use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::{
    Indices, MeshVertexAttribute, MeshVertexBufferLayoutRef, PrimitiveTopology,
};
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
    VertexFormat,
};

const EDGE_LINE_SHADER_PATH: &str = "shaders/edge_line.wgsl";

/// Opposite endpoint of the segment a vertex belongs to.
pub const ATTRIBUTE_SEGMENT_OTHER: MeshVertexAttribute =
    MeshVertexAttribute::new("EdgeSegmentOther", 971_220_301, VertexFormat::Float32x3);

/// `x`: 0 at the segment start, 1 at its end. `y`: side of the line, -1 or 1.
pub const ATTRIBUTE_SEGMENT_CORNER: MeshVertexAttribute =
    MeshVertexAttribute::new("EdgeSegmentCorner", 971_220_302, VertexFormat::Float32x2);

#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct EdgeLineParams {
    pub color: Vec4,
    /// Viewport size in logical pixels.
    pub resolution: Vec2,
    /// Line thickness in logical pixels.
    pub line_width: f32,
}

/// Material for wireframe overlays whose thickness is given in pixels.
/// The vertex shader needs the current viewport size to convert that
/// width into clip space, so `resolution` must follow every resize.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct EdgeLineMaterial {
    #[uniform(0)]
    pub params: EdgeLineParams,
}

impl EdgeLineMaterial {
    pub fn new(color: Color, line_width: f32, resolution: Vec2) -> Self {
        Self {
            params: EdgeLineParams {
                color: color.to_linear().to_vec4(),
                resolution,
                line_width,
            },
        }
    }

    pub fn resolution(&self) -> Vec2 {
        self.params.resolution
    }

    pub fn set_resolution(&mut self, resolution: Vec2) {
        self.params.resolution = resolution;
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.params.line_width = line_width;
    }
}

impl Material for EdgeLineMaterial {
    fn vertex_shader() -> ShaderRef {
        EDGE_LINE_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        EDGE_LINE_SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_SEGMENT_OTHER.at_shader_location(1),
            ATTRIBUTE_SEGMENT_CORNER.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Quads flip winding depending on the view direction.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

/// Expand line segments into quads for [`EdgeLineMaterial`]. Each segment
/// becomes four vertices and two triangles; the shader pushes the corners
/// apart in screen space.
pub fn create_edge_line_mesh(segments: &[[Vec3; 2]]) -> Mesh {
    let vertex_count = segments.len() * 4;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut others = Vec::with_capacity(vertex_count);
    let mut corners = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(segments.len() * 6);

    for (i, [start, end]) in segments.iter().enumerate() {
        let base = (i * 4) as u32;
        for (along, side) in [(0.0, -1.0), (0.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            let (own, other) = if along == 0.0 { (start, end) } else { (end, start) };
            positions.push(own.to_array());
            others.push(other.to_array());
            corners.push([along, side]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(ATTRIBUTE_SEGMENT_OTHER, others);
    mesh.insert_attribute(ATTRIBUTE_SEGMENT_CORNER, corners);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
