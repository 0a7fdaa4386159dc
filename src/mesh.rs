//! Vertex format, part transforms and GPU upload of tessellated parts.
//!
//! - [`Vertex3d`]: position, normal and UV, laid out for a wgpu vertex buffer
//! - [`Transform`]: position and rotation of a part relative to the model origin
//! - [`GpuMesh`]: vertex and index buffers for one tessellated part
//!
//! # Vertex Layout
//!
//! The [`Vertex3d`] struct uses the following GPU layout (32 bytes per vertex):
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |
//!
//! This layout is exposed via [`Vertex3d::LAYOUT`] so the host renderer can
//! build its pipeline around it.

use glam::{Mat4, Quat, Vec3};

use crate::geometry::RawGeometry;

/// A vertex with position, normal, and texture coordinates.
///
/// `#[repr(C)]` plus [`bytemuck::Pod`] lets a whole slice be cast to bytes for
/// upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Position in the solid's local space.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates, typically in the range [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Placement of a part: rotate around the part's own center, then translate.
///
/// Always relative to the model origin. The model's aggregate orientation is
/// applied on top by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Applies rotation then translation to a point.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    /// Applies only the rotation (for normals and directions).
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// GPU-resident buffers for one tessellated part.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    /// Number of `u32` indices (determines draw call size).
    pub index_count: u32,
}

impl GpuMesh {
    /// Uploads tessellated geometry into fresh vertex and index buffers.
    pub fn upload(device: &wgpu::Device, label: &str, geometry: &RawGeometry) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertices")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} indices")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(
            part = label,
            vertices = geometry.vertices.len(),
            indices = geometry.indices.len(),
            "uploaded part mesh"
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<Vertex3d>(), 32);
        assert_eq!(Vertex3d::LAYOUT.array_stride, 32);
    }

    #[test]
    fn transform_rotates_before_translating() {
        let transform = Transform::new()
            .position(Vec3::new(0.0, 0.0, 1.0))
            .rotation(Quat::from_rotation_x(FRAC_PI_2));
        // local +Y ends up on +Z, then shifted
        let p = transform.transform_point(Vec3::Y);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 2.0, epsilon = 1e-6);

        let m = transform.matrix().transform_point3(Vec3::Y);
        assert!(m.abs_diff_eq(p, 1e-6));
    }
}
