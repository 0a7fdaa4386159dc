//! Named color presets for the phone finish.

use crate::error::PaletteError;
use crate::material::{Color, ColorField};
use crate::model::{Model, PartGroup};

/// Finish colors of one preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    pub name: &'static str,
    /// Body, camera bar and buttons.
    pub body: Color,
    /// Logo.
    pub accent: Color,
}

const fn entry(name: &'static str, body: u32, accent: u32) -> PaletteEntry {
    PaletteEntry {
        name,
        body: Color::from_hex(body),
        accent: Color::from_hex(accent),
    }
}

/// Every known preset, in menu order.
pub static PALETTES: [PaletteEntry; 6] = [
    entry("blue", 0x4a90e2, 0x356a9a),
    entry("lavender", 0xc8b3e6, 0x9a82b8),
    entry("sage", 0xa8c69f, 0x7a9471),
    entry("black", 0x2c2c2c, 0x1a1a1a),
    entry("white", 0xe8e8e8, 0xcccccc),
    entry("bronze", 0xb87333, 0x8a5424),
];

/// Finds a preset by exact name.
pub fn lookup(name: &str) -> Result<&'static PaletteEntry, PaletteError> {
    PALETTES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| PaletteError::UnknownPalette(name.to_string()))
}

/// Paints the body group and the accent group of `model` with `entry`.
///
/// Returns the number of materials written.
pub fn apply(model: &mut Model, entry: &PaletteEntry) -> usize {
    let body = model.set_part_group_color(PartGroup::BodyColored, ColorField::Base, entry.body);
    let accent = model.set_part_group_color(PartGroup::Accent, ColorField::Base, entry.accent);
    tracing::info!(palette = entry.name, materials = body + accent, "palette applied");
    body + accent
}

/// Looks up `name` and applies it. The model is untouched on error.
pub fn apply_named(model: &mut Model, name: &str) -> Result<usize, PaletteError> {
    let entry = lookup(name)?;
    Ok(apply(model, entry))
}
