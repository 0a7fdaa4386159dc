//! The assembled multi-part model and its builder.
//!
//! Each part is a `hecs` entity carrying a [`PartName`], a [`PartRole`] and a
//! [`Solid`]. Recoloring is a structural query over roles, never a string
//! comparison on names.
//!
//! # Example
//!
//! ```
//! use handset::*;
//!
//! let mut builder = ModelBuilder::new();
//! let paint = builder.material(MaterialSpec::new(Color::from_hex(0x4a90e2)));
//! let body = Solid::cuboid(7.0, 15.0, 0.8, paint).unwrap();
//! builder.add_part("body", PartRole::Body, body).unwrap();
//!
//! let mut model = builder.build();
//! model.set_part_group_color(PartGroup::BodyColored, ColorField::Base, Color::from_hex(0x2c2c2c));
//! assert_eq!(model.part_color("body").map(Color::to_hex), Some(0x2c2c2c));
//! ```

use std::collections::{BTreeSet, HashMap};

use glam::{EulerRot, Quat};
use hecs::{Entity, World};

use crate::error::BuildError;
use crate::geometry::RawGeometry;
use crate::material::{Color, ColorField, MaterialId, MaterialLibrary, MaterialSpec};
use crate::mesh::Transform;
use crate::solid::Solid;

/// Semantic role of a part, assigned at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartRole {
    Body,
    Screen,
    Island,
    FrontCamera,
    Sensor,
    Port,
    Logo,
    LogoCutout,
    CameraBar,
    Lens,
    Flash,
    Button,
}

/// Named sets of roles that share a palette color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartGroup {
    /// Parts painted in the finish color: body, camera bar, buttons.
    BodyColored,
    /// Logo elements.
    Accent,
}

impl PartGroup {
    pub fn contains(self, role: PartRole) -> bool {
        match self {
            PartGroup::BodyColored => matches!(
                role,
                PartRole::Body | PartRole::CameraBar | PartRole::Button
            ),
            PartGroup::Accent => matches!(role, PartRole::Logo),
        }
    }
}

/// Component holding a part's unique name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartName(pub String);

/// Aggregate orientation of the whole model, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Rotation around X.
    pub pitch: f32,
    /// Rotation around Y.
    pub yaw: f32,
}

impl Orientation {
    /// XYZ Euler rotation: pitch first, then yaw.
    pub fn quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Borrowed view of one part.
pub struct PartView<'a> {
    pub name: &'a str,
    pub role: PartRole,
    pub solid: hecs::Ref<'a, Solid>,
}

/// A tessellated part ready for the renderer, in model space.
#[derive(Clone, Debug)]
pub struct PartMesh {
    pub name: String,
    pub role: PartRole,
    pub material: MaterialId,
    pub geometry: RawGeometry,
}

/// Parts and materials shared by [`ModelBuilder`] and [`Model`].
#[derive(Default)]
struct Registry {
    world: World,
    order: Vec<(String, Entity)>,
    index: HashMap<String, Entity>,
    materials: MaterialLibrary,
}

impl Registry {
    fn get_part(&self, name: &str) -> Option<hecs::Ref<'_, Solid>> {
        let entity = *self.index.get(name)?;
        self.world.get::<&Solid>(entity).ok()
    }

    fn role(&self, name: &str) -> Option<PartRole> {
        let entity = *self.index.get(name)?;
        self.world.get::<&PartRole>(entity).ok().map(|role| *role)
    }
}

/// Collects named parts, then freezes them into a [`Model`].
#[derive(Default)]
pub struct ModelBuilder {
    registry: Registry,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material and returns its handle.
    pub fn material(&mut self, material: MaterialSpec) -> MaterialId {
        self.registry.materials.add(material)
    }

    /// Adds a part under a unique name.
    ///
    /// Fails with [`BuildError::DuplicateName`] if the name is taken, or with
    /// [`BuildError::InvalidGeometryParams`] if the solid's material was issued
    /// by a different builder or library.
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        role: PartRole,
        solid: Solid,
    ) -> Result<(), BuildError> {
        let name = name.into();
        if self.registry.index.contains_key(&name) {
            return Err(BuildError::DuplicateName(name));
        }
        if !self.registry.materials.contains(solid.material()) {
            return Err(BuildError::invalid(format!(
                "part '{name}' uses a material from another library"
            )));
        }

        tracing::trace!(part = %name, ?role, "adding part");
        let entity = self
            .registry
            .world
            .spawn((PartName(name.clone()), role, solid));
        self.registry.index.insert(name.clone(), entity);
        self.registry.order.push((name, entity));
        Ok(())
    }

    pub fn get_part(&self, name: &str) -> Option<hecs::Ref<'_, Solid>> {
        self.registry.get_part(name)
    }

    pub fn part_count(&self) -> usize {
        self.registry.order.len()
    }

    pub fn build(self) -> Model {
        tracing::info!(
            parts = self.registry.order.len(),
            materials = self.registry.materials.len(),
            "model assembled"
        );
        Model {
            registry: self.registry,
            orientation: Orientation::default(),
        }
    }
}

/// A rigid multi-part model.
///
/// Structure is fixed after [`ModelBuilder::build`]. Only material colors and
/// the aggregate orientation change afterwards.
pub struct Model {
    registry: Registry,
    orientation: Orientation,
}

impl Model {
    pub fn get_part(&self, name: &str) -> Option<hecs::Ref<'_, Solid>> {
        self.registry.get_part(name)
    }

    pub fn part_role(&self, name: &str) -> Option<PartRole> {
        self.registry.role(name)
    }

    pub fn contains_part(&self, name: &str) -> bool {
        self.registry.index.contains_key(name)
    }

    pub fn part_count(&self) -> usize {
        self.registry.order.len()
    }

    /// Parts in insertion order.
    pub fn parts(&self) -> impl Iterator<Item = PartView<'_>> {
        self.registry.order.iter().filter_map(|(name, entity)| {
            let role = *self.registry.world.get::<&PartRole>(*entity).ok()?;
            let solid = self.registry.world.get::<&Solid>(*entity).ok()?;
            Some(PartView {
                name: name.as_str(),
                role,
                solid,
            })
        })
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.registry.materials
    }

    /// The material a part is currently drawn with.
    pub fn part_material(&self, name: &str) -> Option<&MaterialSpec> {
        let id = self.get_part(name)?.material();
        self.registry.materials.get(id)
    }

    /// Shortcut for the base color of a part's material.
    pub fn part_color(&self, name: &str) -> Option<Color> {
        self.part_material(name).map(|material| material.base_color)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Model-to-world transform from the aggregate orientation.
    pub fn transform(&self) -> Transform {
        Transform::new().rotation(self.orientation.quat())
    }

    /// Recolors every material used by a part of `group`.
    ///
    /// Returns how many materials were written. An empty match is a no-op.
    pub fn set_part_group_color(
        &mut self,
        group: PartGroup,
        field: ColorField,
        color: Color,
    ) -> usize {
        self.set_color_where(|role| group.contains(role), field, color)
    }

    /// Recolors every material used by a part whose role satisfies `predicate`.
    ///
    /// Shared materials are written once. Returns how many were written.
    pub fn set_color_where(
        &mut self,
        predicate: impl Fn(PartRole) -> bool,
        field: ColorField,
        color: Color,
    ) -> usize {
        let targets: BTreeSet<MaterialId> = self
            .registry
            .world
            .query::<(&PartRole, &Solid)>()
            .iter()
            .filter(|(_, (role, _))| predicate(**role))
            .map(|(_, (_, solid))| solid.material())
            .collect();

        for &id in &targets {
            if let Some(material) = self.registry.materials.get_mut(id) {
                material.set_color(field, color);
            }
        }
        tracing::debug!(materials = targets.len(), ?field, "recolored parts");
        targets.len()
    }

    /// Tessellates every part at its placement, in insertion order.
    pub fn tessellate(&self) -> Vec<PartMesh> {
        self.parts()
            .map(|part| PartMesh {
                name: part.name.to_string(),
                role: part.role,
                material: part.solid.material(),
                geometry: part.solid.tessellate_placed(),
            })
            .collect()
    }
}
