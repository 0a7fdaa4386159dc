//! CPU-side triangle meshes produced by tessellating solids.
//!
//! [`RawGeometry`] is the hand-off format between the solid factory and the
//! renderer. It can be inspected and transformed before being uploaded with
//! [`GpuMesh::upload`](crate::GpuMesh::upload).

use glam::{Quat, Vec3};

use crate::mesh::{Transform, Vertex3d};

/// Indexed triangle list before GPU upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawGeometry {
    /// Vertex positions, normals, and UVs.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices, three per triangle, counter-clockwise front faces.
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Returns the size of the bounding box.
    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    /// Translates all vertices by the given offset.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (Vec3::from(v.position) + offset).into();
        }
    }

    /// Rotates all vertices and normals by the given quaternion.
    pub fn rotate(&mut self, rotation: Quat) {
        for v in &mut self.vertices {
            v.position = (rotation * Vec3::from(v.position)).into();
            v.normal = (rotation * Vec3::from(v.normal)).into();
        }
    }

    /// Applies a part placement: rotation first, then translation.
    pub fn transform(&mut self, transform: &Transform) {
        self.rotate(transform.rotation);
        self.translate(transform.position);
    }

    /// Appends another mesh, re-basing its indices.
    pub fn append(&mut self, other: &RawGeometry) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Pushes a vertex and returns its index.
    pub(crate) fn push(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        self.vertices
            .push(Vertex3d::new(position.into(), normal.into(), uv));
        self.vertices.len() as u32 - 1
    }

    pub(crate) fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}
