//! Surface materials and the shared material library.
//!
//! Solids never own their material. They hold a [`MaterialId`] into the
//! model's [`MaterialLibrary`], so several parts can share one
//! [`MaterialSpec`] and a recolor touches all of them at once.

use std::sync::atomic::{AtomicU64, Ordering};

/// An RGBA color with linear `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Builds an opaque color from a `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Packs the RGB channels back into `0xRRGGBB`. Alpha is dropped.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
}

/// Self-illumination added on top of lit shading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emissive {
    pub color: Color,
    pub intensity: f32,
}

/// A physically based surface description handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialSpec {
    pub base_color: Color,
    /// 0 = dielectric, 1 = metal.
    pub metalness: f32,
    /// 0 = mirror, 1 = fully diffuse.
    pub roughness: f32,
    pub emissive: Option<Emissive>,
    /// Fraction of light passing through (glass).
    pub transmission: Option<f32>,
}

impl MaterialSpec {
    /// Creates a material with the given base color, no metalness and full roughness.
    pub fn new(base_color: Color) -> Self {
        Self {
            base_color,
            metalness: 0.0,
            roughness: 1.0,
            emissive: None,
            transmission: None,
        }
    }

    pub fn metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = Some(Emissive {
            color,
            intensity: intensity.max(0.0),
        });
        self
    }

    pub fn transmission(mut self, transmission: f32) -> Self {
        self.transmission = Some(transmission.clamp(0.0, 1.0));
        self
    }

    /// Writes `color` into the selected color field.
    ///
    /// Setting the emissive color of a non-emissive material turns emission on
    /// at full intensity.
    pub fn set_color(&mut self, field: ColorField, color: Color) {
        match field {
            ColorField::Base => self.base_color = color,
            ColorField::Emissive => match &mut self.emissive {
                Some(emissive) => emissive.color = color,
                None => {
                    self.emissive = Some(Emissive {
                        color,
                        intensity: 1.0,
                    })
                }
            },
        }
    }
}

/// Which color of a material a recolor writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorField {
    Base,
    Emissive,
}

/// Global counter tagging each [`MaterialLibrary`] so ids never cross libraries.
static NEXT_LIBRARY_ID: AtomicU64 = AtomicU64::new(1);

/// Type-safe handle to a material stored in a [`MaterialLibrary`].
///
/// Only resolves in the library that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId {
    library: u64,
    index: usize,
}

/// Append-only store of materials shared between parts.
#[derive(Clone, Debug)]
pub struct MaterialLibrary {
    id: u64,
    materials: Vec<MaterialSpec>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self {
            id: NEXT_LIBRARY_ID.fetch_add(1, Ordering::Relaxed),
            materials: Vec::new(),
        }
    }
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, material: MaterialSpec) -> MaterialId {
        self.materials.push(material);
        self.id_at(self.materials.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&MaterialSpec> {
        if id.library != self.id {
            return None;
        }
        self.materials.get(id.index)
    }

    pub(crate) fn get_mut(&mut self, id: MaterialId) -> Option<&mut MaterialSpec> {
        if id.library != self.id {
            return None;
        }
        self.materials.get_mut(id.index)
    }

    /// True if `id` was issued by this library.
    pub fn contains(&self, id: MaterialId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &MaterialSpec)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, material)| (self.id_at(i), material))
    }

    fn id_at(&self, index: usize) -> MaterialId {
        MaterialId {
            library: self.id,
            index,
        }
    }
}
