//! Labeled 3D solids built from profiles and primitive shapes.
//!
//! Every solid is generated **centered on its own local origin**:
//!
//! | Shape | Local axis | Extent |
//! |-------|------------|--------|
//! | extrusion | depth along Z | `[-depth/2, depth/2]` |
//! | revolution | axis along Y | `[-height/2, height/2]` |
//! | box | - | `±size/2` on every axis |
//!
//! Placement math in the assembler relies on this. A bevel rounds the edges of
//! an extrusion inside its logical slab, so [`Solid::extent`] never depends on
//! bevel parameters.
//!
//! # Example
//!
//! ```
//! use handset::{MaterialLibrary, MaterialSpec, Color, Profile, Solid, Vec3};
//!
//! let mut materials = MaterialLibrary::new();
//! let glass = materials.add(MaterialSpec::new(Color::BLACK).transmission(0.9));
//!
//! let screen = Solid::extrude(Profile::rounded_rect(6.7, 14.7, 0.6).unwrap(), 0.05, None, glass)
//!     .unwrap()
//!     .at(Vec3::new(0.0, 0.0, 0.43));
//! assert_eq!(screen.extent(), Vec3::new(6.7, 14.7, 0.05));
//! ```

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec2, Vec3};

use crate::error::{BuildError, require_non_negative, require_positive};
use crate::geometry::RawGeometry;
use crate::material::MaterialId;
use crate::mesh::Transform;
use crate::profile::Profile;

/// Chords per quarter arc when flattening extrusion profiles.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 12;

/// Edge rounding applied to an extrusion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bevel {
    /// How far the rounding reaches into the depth, per side.
    pub thickness: f32,
    /// How far the rounding reaches into the outline.
    pub size: f32,
    /// Rings per rounded edge.
    pub segments: u32,
}

impl Bevel {
    pub fn new(thickness: f32, size: f32, segments: u32) -> Self {
        Self {
            thickness,
            size,
            segments,
        }
    }
}

/// Shape parameters of a solid.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Extrusion {
        profile: Profile,
        depth: f32,
        bevel: Option<Bevel>,
        curve_segments: u32,
    },
    /// Truncated cone (cylinder when both radii match, cone when one is zero).
    Revolution {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
}

/// A shape with a material and a placement relative to the model origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Solid {
    geometry: Geometry,
    material: MaterialId,
    transform: Transform,
}

impl Solid {
    /// Sweeps `profile` along local Z, centered on the origin.
    pub fn extrude(
        profile: Profile,
        depth: f32,
        bevel: Option<Bevel>,
        material: MaterialId,
    ) -> Result<Self, BuildError> {
        require_positive("extrusion depth", depth)?;
        if let Some(bevel) = bevel {
            require_non_negative("bevel thickness", bevel.thickness)?;
            require_non_negative("bevel size", bevel.size)?;
            if bevel.segments == 0 {
                return Err(BuildError::invalid("bevel needs at least one segment"));
            }
            if bevel.thickness * 2.0 > depth {
                return Err(BuildError::invalid(format!(
                    "bevel thickness {} does not fit in depth {depth}",
                    bevel.thickness
                )));
            }
            if bevel.size * 2.0 >= profile.width().min(profile.height()) {
                return Err(BuildError::invalid(format!(
                    "bevel size {} swallows the {}x{} outline",
                    bevel.size,
                    profile.width(),
                    profile.height()
                )));
            }
        }

        Ok(Self::new(
            Geometry::Extrusion {
                profile,
                depth,
                bevel,
                curve_segments: DEFAULT_CURVE_SEGMENTS,
            },
            material,
        ))
    }

    /// A solid of revolution around local Y.
    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
        material: MaterialId,
    ) -> Result<Self, BuildError> {
        require_non_negative("top radius", radius_top)?;
        require_non_negative("bottom radius", radius_bottom)?;
        require_positive("revolution height", height)?;
        if radius_top == 0.0 && radius_bottom == 0.0 {
            return Err(BuildError::invalid("revolution needs a non-zero radius"));
        }
        if segments < 3 {
            return Err(BuildError::invalid(format!(
                "revolution needs at least 3 segments, got {segments}"
            )));
        }

        Ok(Self::new(
            Geometry::Revolution {
                radius_top,
                radius_bottom,
                height,
                segments,
            },
            material,
        ))
    }

    /// An axis-aligned box centered on the origin.
    pub fn cuboid(
        width: f32,
        height: f32,
        depth: f32,
        material: MaterialId,
    ) -> Result<Self, BuildError> {
        require_positive("box width", width)?;
        require_positive("box height", height)?;
        require_positive("box depth", depth)?;

        Ok(Self::new(
            Geometry::Box {
                width,
                height,
                depth,
            },
            material,
        ))
    }

    fn new(geometry: Geometry, material: MaterialId) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    /// Sets the position relative to the model origin.
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Sets the rotation around the solid's own center.
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Overrides how finely extrusion corners are flattened. No effect on other shapes.
    pub fn curve_segments(mut self, segments: u32) -> Self {
        if let Geometry::Extrusion { curve_segments, .. } = &mut self.geometry {
            *curve_segments = segments.max(1);
        }
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The extruded outline, if this solid is an extrusion.
    pub fn profile(&self) -> Option<&Profile> {
        match &self.geometry {
            Geometry::Extrusion { profile, .. } => Some(profile),
            _ => None,
        }
    }

    /// Logical size in local space, ignoring bevels.
    pub fn extent(&self) -> Vec3 {
        match &self.geometry {
            Geometry::Extrusion { profile, depth, .. } => {
                Vec3::new(profile.width(), profile.height(), *depth)
            }
            Geometry::Revolution {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let diameter = 2.0 * radius_top.max(*radius_bottom);
                Vec3::new(diameter, *height, diameter)
            }
            Geometry::Box {
                width,
                height,
                depth,
            } => Vec3::new(*width, *height, *depth),
        }
    }

    /// Axis-aligned bounds of the logical extent after placement.
    pub fn placed_bounds(&self) -> (Vec3, Vec3) {
        let half = self.extent() * 0.5;
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { -half.x } else { half.x },
                if i & 2 == 0 { -half.y } else { half.y },
                if i & 4 == 0 { -half.z } else { half.z },
            );
            let p = self.transform.transform_point(corner);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Triangulates the solid in its local space.
    pub fn tessellate(&self) -> RawGeometry {
        match &self.geometry {
            Geometry::Extrusion {
                profile,
                depth,
                bevel,
                curve_segments,
            } => tessellate_extrusion(profile, *depth, *bevel, *curve_segments),
            Geometry::Revolution {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => tessellate_revolution(*radius_top, *radius_bottom, *height, *segments),
            Geometry::Box {
                width,
                height,
                depth,
            } => tessellate_box(Vec3::new(*width, *height, *depth)),
        }
    }

    /// Triangulates the solid and moves it to its placement.
    pub fn tessellate_placed(&self) -> RawGeometry {
        let mut geometry = self.tessellate();
        geometry.transform(&self.transform);
        geometry
    }
}

/// One cross-section ring of an extrusion wall.
struct Ring {
    inset: f32,
    z: f32,
    /// Weight of the outline normal versus the ±Z cap normal.
    side: f32,
    cap: f32,
}

fn tessellate_extrusion(
    profile: &Profile,
    depth: f32,
    bevel: Option<Bevel>,
    curve_segments: u32,
) -> RawGeometry {
    let points = profile.flatten(curve_segments);
    let normals = outline_normals(&points);
    let n = points.len();
    let half = depth * 0.5;

    let rings = match bevel {
        None => vec![
            Ring {
                inset: 0.0,
                z: half,
                side: 1.0,
                cap: 0.0,
            },
            Ring {
                inset: 0.0,
                z: -half,
                side: 1.0,
                cap: 0.0,
            },
        ],
        Some(bevel) => {
            let steps = bevel.segments;
            let front = (0..=steps).map(|k| {
                let theta = FRAC_PI_2 * k as f32 / steps as f32;
                Ring {
                    inset: bevel.size * (1.0 - theta.sin()),
                    z: half - bevel.thickness * (1.0 - theta.cos()),
                    side: theta.sin(),
                    cap: theta.cos(),
                }
            });
            let back = (0..=steps).rev().map(|k| {
                let theta = FRAC_PI_2 * k as f32 / steps as f32;
                Ring {
                    inset: bevel.size * (1.0 - theta.sin()),
                    z: -(half - bevel.thickness * (1.0 - theta.cos())),
                    side: theta.sin(),
                    cap: -theta.cos(),
                }
            });
            front.chain(back).collect()
        }
    };

    let (min, max) = profile.bounds();
    let span = (max - min).max(Vec2::splat(f32::EPSILON));
    let cap_uv = |p: Vec2| {
        let t = (p - min) / span;
        [t.x, t.y]
    };

    let mut geometry = RawGeometry::default();

    // Side wall, ring by ring from front (+Z) to back (-Z).
    let wall_base = geometry.vertex_count() as u32;
    let ring_count = rings.len();
    for (r, ring) in rings.iter().enumerate() {
        let v = r as f32 / (ring_count - 1) as f32;
        for (i, (&p, &normal)) in points.iter().zip(&normals).enumerate() {
            let xy = p - normal * ring.inset;
            let position = Vec3::new(xy.x, xy.y, ring.z);
            let shading =
                Vec3::new(normal.x * ring.side, normal.y * ring.side, ring.cap).normalize_or_zero();
            geometry.push(position, shading, [i as f32 / n as f32, v]);
        }
    }
    for r in 0..ring_count - 1 {
        let upper = wall_base + (r * n) as u32;
        let lower = upper + n as u32;
        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            geometry.triangle(lower + i, lower + j, upper + j);
            geometry.triangle(lower + i, upper + j, upper + i);
        }
    }

    // Flat caps use the outermost rings' outline.
    let (front_inset, front_z) = (rings[0].inset, rings[0].z);
    let (back_inset, back_z) = (rings[ring_count - 1].inset, rings[ring_count - 1].z);
    for (inset, z, normal) in [(front_inset, front_z, Vec3::Z), (back_inset, back_z, Vec3::NEG_Z)] {
        let outline: Vec<Vec2> = points
            .iter()
            .zip(&normals)
            .map(|(&p, &outward)| p - outward * inset)
            .collect();
        let centroid = outline.iter().copied().sum::<Vec2>() / n as f32;

        let center = geometry.push(centroid.extend(z), normal, cap_uv(centroid));
        let first = geometry.vertex_count() as u32;
        for &p in &outline {
            geometry.push(p.extend(z), normal, cap_uv(p));
        }
        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            if normal.z > 0.0 {
                geometry.triangle(center, first + i, first + j);
            } else {
                geometry.triangle(center, first + j, first + i);
            }
        }
    }

    geometry
}

/// Outward unit normals at each vertex of a counter-clockwise polygon.
fn outline_normals(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let here = points[i];
            let next = points[(i + 1) % n];
            let edge_in = (here - prev).normalize_or_zero();
            let edge_out = (next - here).normalize_or_zero();
            // outward side of a CCW edge (dx, dy) is (dy, -dx)
            let outward = |d: Vec2| Vec2::new(d.y, -d.x);
            (outward(edge_in) + outward(edge_out)).normalize_or_zero()
        })
        .collect()
}

fn tessellate_revolution(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> RawGeometry {
    let half = height * 0.5;
    let mut geometry = RawGeometry::default();

    let around = |k: u32| {
        let theta = TAU * k as f32 / segments as f32;
        (theta.sin(), theta.cos())
    };

    let side_base = geometry.vertex_count() as u32;
    for k in 0..=segments {
        let (s, c) = around(k);
        let normal = Vec3::new(s * height, radius_bottom - radius_top, c * height).normalize();
        let u = k as f32 / segments as f32;
        geometry.push(Vec3::new(radius_top * s, half, radius_top * c), normal, [u, 0.0]);
        geometry.push(
            Vec3::new(radius_bottom * s, -half, radius_bottom * c),
            normal,
            [u, 1.0],
        );
    }
    for k in 0..segments {
        let top = side_base + 2 * k;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        geometry.triangle(top, bottom, next_top);
        geometry.triangle(bottom, next_bottom, next_top);
    }

    for (radius, y, normal) in [(radius_top, half, Vec3::Y), (radius_bottom, -half, Vec3::NEG_Y)] {
        if radius <= 0.0 {
            continue;
        }
        let center = geometry.push(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]);
        let first = geometry.vertex_count() as u32;
        for k in 0..segments {
            let (s, c) = around(k);
            geometry.push(
                Vec3::new(radius * s, y, radius * c),
                normal,
                [0.5 + 0.5 * s, 0.5 + 0.5 * c],
            );
        }
        for k in 0..segments {
            let a = first + k;
            let b = first + (k + 1) % segments;
            if normal.y > 0.0 {
                geometry.triangle(center, a, b);
            } else {
                geometry.triangle(center, b, a);
            }
        }
    }

    geometry
}

fn tessellate_box(size: Vec3) -> RawGeometry {
    // Each face has its own vertices for correct normals
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // Front face (Z+)
        ([ 0.0,  0.0,  1.0], [[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]]),
        // Back face (Z-)
        ([ 0.0,  0.0, -1.0], [[ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5]]),
        // Top face (Y+)
        ([ 0.0,  1.0,  0.0], [[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]]),
        // Bottom face (Y-)
        ([ 0.0, -1.0,  0.0], [[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]]),
        // Right face (X+)
        ([ 1.0,  0.0,  0.0], [[ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5]]),
        // Left face (X-)
        ([-1.0,  0.0,  0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5]]),
    ];
    const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut geometry = RawGeometry::default();
    for (normal, corners) in faces {
        let first = geometry.vertex_count() as u32;
        for (corner, uv) in corners.iter().zip(UVS) {
            geometry.push(Vec3::from(*corner) * size, Vec3::from(normal), uv);
        }
        geometry.triangle(first, first + 1, first + 2);
        geometry.triangle(first + 2, first + 3, first);
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, MaterialLibrary, MaterialSpec};
    use approx::assert_relative_eq;

    fn material() -> MaterialId {
        MaterialLibrary::new().add(MaterialSpec::new(Color::WHITE))
    }

    /// Every triangle's geometric normal agrees with its vertex normals.
    fn assert_outward(geometry: &RawGeometry) {
        for tri in geometry.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| geometry.vertices[i as usize]);
            let pa = Vec3::from(a.position);
            let face = (Vec3::from(b.position) - pa).cross(Vec3::from(c.position) - pa);
            if face.length() < 1e-9 {
                continue;
            }
            let shading = Vec3::from(a.normal) + Vec3::from(b.normal) + Vec3::from(c.normal);
            assert!(
                face.dot(shading) > 0.0,
                "triangle {tri:?} faces inward: {face} vs {shading}"
            );
        }
    }

    #[test]
    fn extrusion_is_centered_on_depth_axis() {
        let profile = Profile::rounded_rect(7.0, 15.0, 0.7).unwrap();
        let solid = Solid::extrude(profile, 0.8, None, material()).unwrap();
        let mesh = solid.tessellate();

        assert!(mesh.center().abs_diff_eq(Vec3::ZERO, 1e-5));
        assert!(mesh.size().abs_diff_eq(Vec3::new(7.0, 15.0, 0.8), 1e-5));
        assert_outward(&mesh);
    }

    #[test]
    fn bevel_stays_inside_logical_extent() {
        let profile = Profile::rounded_rect(7.0, 15.0, 0.7).unwrap();
        let bevel = Bevel::new(0.15, 0.15, 16);
        let solid = Solid::extrude(profile, 0.8, Some(bevel), material()).unwrap();

        assert_eq!(solid.extent(), Vec3::new(7.0, 15.0, 0.8));
        let mesh = solid.tessellate();
        assert!(mesh.size().abs_diff_eq(solid.extent(), 1e-5));
        assert_outward(&mesh);
    }

    #[test]
    fn bevel_must_fit() {
        let profile = Profile::rounded_rect(1.0, 1.0, 0.1).unwrap();
        let thick = Bevel::new(0.3, 0.05, 4);
        assert!(Solid::extrude(profile.clone(), 0.5, Some(thick), material()).is_err());
        let wide = Bevel::new(0.05, 0.5, 4);
        assert!(Solid::extrude(profile, 0.5, Some(wide), material()).is_err());
    }

    #[test]
    fn cylinder_is_centered_on_its_axis() {
        let solid = Solid::cylinder(0.55, 0.55, 0.12, 32, material()).unwrap();
        let mesh = solid.tessellate();
        assert!(mesh.center().abs_diff_eq(Vec3::ZERO, 1e-5));
        assert_relative_eq!(mesh.size().y, 0.12, epsilon = 1e-6);
        assert_relative_eq!(mesh.size().x, 1.1, epsilon = 1e-5);
        assert_outward(&mesh);
    }

    #[test]
    fn cone_omits_apex_cap() {
        let cone = Solid::cylinder(0.0, 0.12, 0.25, 8, material()).unwrap();
        let cylinder = Solid::cylinder(0.12, 0.12, 0.25, 8, material()).unwrap();
        // one cap fewer: 8 triangles and 9 vertices
        assert_eq!(
            cylinder.tessellate().triangle_count() - cone.tessellate().triangle_count(),
            8
        );
        assert_outward(&cone.tessellate());
    }

    #[test]
    fn degenerate_revolutions_are_rejected() {
        assert!(Solid::cylinder(0.0, 0.0, 1.0, 8, material()).is_err());
        assert!(Solid::cylinder(1.0, 1.0, 1.0, 2, material()).is_err());
        assert!(Solid::cylinder(1.0, 1.0, 0.0, 8, material()).is_err());
    }

    #[test]
    fn box_matches_dimensions() {
        let solid = Solid::cuboid(0.8, 0.25, 0.2, material()).unwrap();
        let mesh = solid.tessellate();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.size().abs_diff_eq(Vec3::new(0.8, 0.25, 0.2), 1e-6));
        assert_outward(&mesh);
        assert!(Solid::cuboid(1.0, -1.0, 1.0, material()).is_err());
    }

    #[test]
    fn placement_moves_bounds() {
        let lens = Solid::cylinder(0.5, 0.5, 0.2, 16, material())
            .unwrap()
            .rotated(Quat::from_rotation_x(FRAC_PI_2))
            .at(Vec3::new(1.0, 2.0, -3.0));

        let (min, max) = lens.placed_bounds();
        assert!(min.abs_diff_eq(Vec3::new(0.5, 1.5, -3.1), 1e-5));
        assert!(max.abs_diff_eq(Vec3::new(1.5, 2.5, -2.9), 1e-5));

        let mesh = lens.tessellate_placed();
        assert!(mesh.center().abs_diff_eq(Vec3::new(1.0, 2.0, -3.0), 1e-5));
    }
}
