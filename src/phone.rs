//! The phone layout: every part placed from four top-level dimensions.
//!
//! The front (screen side) faces +Z, the back (camera side) faces -Z, the top
//! edge is +Y. Mounted parts sit on their parent surface through
//! [`mount_offset`], which keeps every visible face off its parent's plane.
//!
//! # Example
//!
//! ```
//! use handset::{PhoneDimensions, build_phone};
//!
//! let model = build_phone(&PhoneDimensions::default()).unwrap();
//! assert!(model.contains_part("body"));
//! assert!(model.contains_part("cameraBar"));
//! ```

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Quat, Vec3};
use tracing::instrument;

use crate::error::{BuildError, require_positive};
use crate::material::{Color, MaterialSpec};
use crate::model::{Model, ModelBuilder, PartRole};
use crate::profile::Profile;
use crate::solid::{Bevel, Solid};

/// Extra gap between a mounted part and its parent surface.
pub const MOUNT_CLEARANCE: f32 = 0.002;

const BODY_BEVEL: Bevel = Bevel {
    thickness: 0.15,
    size: 0.15,
    segments: 16,
};
const BODY_CURVE_SEGMENTS: u32 = 8;

const SCREEN_BORDER: f32 = 0.15;
const SCREEN_CORNER_INSET: f32 = 0.1;
const SCREEN_DEPTH: f32 = 0.05;

const ISLAND_WIDTH: f32 = 2.5;
const ISLAND_HEIGHT: f32 = 0.7;
const ISLAND_DEPTH: f32 = 0.1;
const ISLAND_FROM_TOP: f32 = 1.5;
/// Distance of the front camera and Face ID sensor from the island's center.
const ISLAND_SENSOR_SPREAD: f32 = 0.7;

const CAMERA_BAR_MARGIN: f32 = 0.5;
const CAMERA_BAR_HEIGHT: f32 = 2.5;
const CAMERA_BAR_DEPTH: f32 = 0.35;
const CAMERA_BAR_RADIUS: f32 = 0.4;
const CAMERA_BAR_FROM_TOP: f32 = 2.0;
const CAMERA_BAR_BEVEL: Bevel = Bevel {
    thickness: 0.04,
    size: 0.04,
    segments: 8,
};
/// Space between the bar's left edge and the first lens.
const CAMERA_BAR_PADDING: f32 = 0.65;

const LENS_COUNT: usize = 3;
const LENS_RADIUS: f32 = 0.55;
const LENS_DEPTH: f32 = 0.12;
const LENS_SPACING: f32 = 0.1;
const LENS_GLASS_SCALE: f32 = 0.85;
const LENS_GLASS_DEPTH_SCALE: f32 = 0.4;
const LIDAR_RADIUS: f32 = 0.22;
const LIDAR_DEPTH: f32 = 0.08;
const LIDAR_GAP: f32 = 0.13;
const FLASH_RADIUS: f32 = 0.3;
const FLASH_DEPTH: f32 = 0.1;
const FLASH_EDGE_PADDING: f32 = 0.5;

const PORT_WIDTH: f32 = 0.8;
const PORT_THICKNESS: f32 = 0.25;
const PORT_PROTRUSION: f32 = 0.05;
const CONNECTOR_SCALE: f32 = 0.6;
const CONNECTOR_PROTRUSION: f32 = 0.02;

const LOGO_RADIUS: f32 = 0.7;
const LOGO_DEPTH: f32 = 0.08;
/// Preferred height of the logo center above the body center.
const LOGO_RISE: f32 = 1.0;
/// Minimum gap between the top of the logo cluster and the camera bar.
const LOGO_BAR_CLEARANCE: f32 = 0.1;
const LOGO_BEVEL: Bevel = Bevel {
    thickness: 0.02,
    size: 0.02,
    segments: 8,
};
const BITE_RADIUS: f32 = 0.3;
const BITE_DEPTH: f32 = 0.02;
const BITE_OFFSET: (f32, f32) = (0.5, 0.15);
const LEAF_RADIUS: f32 = 0.12;
const LEAF_LENGTH: f32 = 0.25;
const LEAF_OFFSET: (f32, f32) = (0.1, 0.9);

const BUTTON_THICKNESS: f32 = 0.15;
const BUTTON_DEPTH: f32 = 0.3;
/// (name, length, distance from the top edge to the button's center, side)
const BUTTONS: [(&str, f32, f32, Side); 4] = [
    ("powerButton", 1.8, 5.0, Side::Right),
    ("volumeUp", 1.0, 4.0, Side::Left),
    ("volumeDown", 1.0, 5.5, Side::Left),
    ("actionButton", 0.8, 2.3, Side::Left),
];

const ROUND_SEGMENTS: u32 = 32;
const SMALL_ROUND_SEGMENTS: u32 = 16;
const LEAF_SEGMENTS: u32 = 8;

/// Reach of the tilted leaf from its center in any direction.
const LEAF_REACH: f32 = LEAF_RADIUS + LEAF_LENGTH * 0.5;
/// Height of the logo cluster's top above the logo center.
const LOGO_CLUSTER_TOP: f32 = LEAF_OFFSET.1 + LEAF_REACH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Top-level dimensions the whole layout is derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhoneDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub corner_radius: f32,
}

impl Default for PhoneDimensions {
    fn default() -> Self {
        Self {
            width: 7.0,
            height: 15.0,
            depth: 0.8,
            corner_radius: 0.7,
        }
    }
}

impl PhoneDimensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

/// Center-to-center distance between a parent surface and a part mounted on it.
///
/// Both half-depths are measured along the mount axis.
pub fn mount_offset(parent_half_depth: f32, own_half_depth: f32) -> f32 {
    parent_half_depth + own_half_depth + MOUNT_CLEARANCE
}

/// Width of the lens, lidar and flash row including the bar padding on both sides.
fn camera_row_width() -> f32 {
    let lenses = LENS_COUNT as f32 * 2.0 * LENS_RADIUS + (LENS_COUNT - 1) as f32 * LENS_SPACING;
    CAMERA_BAR_PADDING
        + lenses
        + LIDAR_GAP
        + 2.0 * LIDAR_RADIUS
        + LIDAR_GAP
        + 2.0 * FLASH_RADIUS
        + FLASH_EDGE_PADDING
}

/// Rotation that turns a Y-axis revolution to face along Z.
fn facing_z() -> Quat {
    Quat::from_rotation_x(FRAC_PI_2)
}

/// Builds the phone model from its top-level dimensions.
#[instrument]
pub fn build_phone(dims: &PhoneDimensions) -> Result<Model, BuildError> {
    require_positive("phone width", dims.width)?;
    require_positive("phone height", dims.height)?;
    require_positive("phone depth", dims.depth)?;
    let camera_bar_width = dims.width - 2.0 * CAMERA_BAR_MARGIN;
    require_positive("camera bar width", camera_bar_width)?;
    if camera_bar_width < camera_row_width() {
        return Err(BuildError::invalid(format!(
            "camera bar {camera_bar_width} wide cannot hold the lens row ({} needed)",
            camera_row_width()
        )));
    }
    if let Some((name, length, from_top, _)) = BUTTONS
        .iter()
        .find(|(_, length, from_top, _)| from_top + length * 0.5 >= dims.height)
    {
        return Err(BuildError::invalid(format!(
            "{name} ({length} long, {from_top} from the top) does not fit a {} tall body",
            dims.height
        )));
    }

    let mut builder = ModelBuilder::new();

    let half_w = dims.width * 0.5;
    let half_h = dims.height * 0.5;
    let half_d = dims.depth * 0.5;

    // Body
    let body_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x4a90e2))
            .metalness(0.9)
            .roughness(0.2),
    );
    let body = Solid::extrude(
        Profile::rounded_rect(dims.width, dims.height, dims.corner_radius)?,
        dims.depth,
        Some(BODY_BEVEL),
        body_paint,
    )?
    .curve_segments(BODY_CURVE_SEGMENTS);
    builder.add_part("body", PartRole::Body, body)?;

    // Front: screen, island and the sensors inside it
    let screen_paint = builder.material(MaterialSpec::new(Color::BLACK));
    let screen_z = mount_offset(half_d, SCREEN_DEPTH * 0.5);
    let screen = Solid::extrude(
        Profile::rounded_rect(
            dims.width - 2.0 * SCREEN_BORDER,
            dims.height - 2.0 * SCREEN_BORDER,
            (dims.corner_radius - SCREEN_CORNER_INSET).max(0.0),
        )?,
        SCREEN_DEPTH,
        None,
        screen_paint,
    )?
    .at(Vec3::new(0.0, 0.0, screen_z));
    builder.add_part("screen", PartRole::Screen, screen)?;

    let island_y = half_h - ISLAND_FROM_TOP;
    let island_z = screen_z + mount_offset(SCREEN_DEPTH * 0.5, ISLAND_DEPTH * 0.5);
    let island_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x050505))
            .metalness(0.3)
            .roughness(0.7),
    );
    let island = Solid::extrude(
        Profile::pill(ISLAND_WIDTH, ISLAND_HEIGHT, ISLAND_HEIGHT * 0.5)?,
        ISLAND_DEPTH,
        None,
        island_paint,
    )?
    .at(Vec3::new(0.0, island_y, island_z));
    builder.add_part("island", PartRole::Island, island)?;

    let front_camera_depth = 0.08;
    let front_camera_z = island_z + mount_offset(ISLAND_DEPTH * 0.5, front_camera_depth * 0.5);
    let front_camera_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x1a1a1a))
            .metalness(0.8)
            .roughness(0.2),
    );
    let front_camera = Solid::cylinder(0.15, 0.15, front_camera_depth, ROUND_SEGMENTS, front_camera_paint)?
        .rotated(facing_z())
        .at(Vec3::new(-ISLAND_SENSOR_SPREAD, island_y, front_camera_z));
    builder.add_part("frontCamera", PartRole::FrontCamera, front_camera)?;

    let front_lens_depth = 0.04;
    let front_lens_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x001133))
            .metalness(0.0)
            .roughness(0.0)
            .transmission(0.95),
    );
    let front_lens = Solid::cylinder(0.12, 0.12, front_lens_depth, ROUND_SEGMENTS, front_lens_paint)?
        .rotated(facing_z())
        .at(Vec3::new(
            -ISLAND_SENSOR_SPREAD,
            island_y,
            front_camera_z + mount_offset(front_camera_depth * 0.5, front_lens_depth * 0.5),
        ));
    builder.add_part("frontLens", PartRole::Lens, front_lens)?;

    let face_id_depth = 0.05;
    let face_id_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x0a0a0a))
            .metalness(0.6)
            .roughness(0.4)
            .emissive(Color::from_hex(0x330000), 0.3),
    );
    let face_id = Solid::cylinder(0.08, 0.08, face_id_depth, SMALL_ROUND_SEGMENTS, face_id_paint)?
        .rotated(facing_z())
        .at(Vec3::new(
            ISLAND_SENSOR_SPREAD,
            island_y,
            island_z + mount_offset(ISLAND_DEPTH * 0.5, face_id_depth * 0.5),
        ));
    builder.add_part("faceID", PartRole::Sensor, face_id)?;

    // Bottom edge: charging port, mounted along -Y
    let port_y = -mount_offset(half_h, PORT_PROTRUSION * 0.5);
    let port_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x1a1a1a))
            .metalness(0.7)
            .roughness(0.3),
    );
    let port = Solid::cuboid(PORT_WIDTH, PORT_PROTRUSION, PORT_THICKNESS, port_paint)?
        .at(Vec3::new(0.0, port_y, 0.0));
    builder.add_part("port", PartRole::Port, port)?;

    let connector_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x888888))
            .metalness(0.95)
            .roughness(0.05),
    );
    let connector = Solid::cuboid(
        PORT_WIDTH * CONNECTOR_SCALE,
        CONNECTOR_PROTRUSION,
        PORT_THICKNESS * CONNECTOR_SCALE * 0.5,
        connector_paint,
    )?
    .at(Vec3::new(
        0.0,
        port_y - mount_offset(PORT_PROTRUSION * 0.5, CONNECTOR_PROTRUSION * 0.5),
        0.0,
    ));
    builder.add_part("connector", PartRole::Port, connector)?;

    // Back: logo
    let logo_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x356a9a))
            .metalness(0.95)
            .roughness(0.05),
    );
    let logo_z = -mount_offset(half_d, LOGO_DEPTH * 0.5);
    let bar_bottom = half_h - CAMERA_BAR_FROM_TOP - CAMERA_BAR_HEIGHT * 0.5;
    let logo_y = LOGO_RISE.min(bar_bottom - LOGO_BAR_CLEARANCE - LOGO_CLUSTER_TOP);
    if logo_y - LOGO_RADIUS <= -half_h {
        return Err(BuildError::invalid(format!(
            "a {} tall body leaves no room for the logo below the camera bar",
            dims.height
        )));
    }
    let logo = Solid::extrude(Profile::circle(LOGO_RADIUS)?, LOGO_DEPTH, Some(LOGO_BEVEL), logo_paint)?
        .at(Vec3::new(0.0, logo_y, logo_z));
    builder.add_part("appleLogo", PartRole::Logo, logo)?;

    let bite_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x0a0a0a))
            .metalness(0.1)
            .roughness(0.9),
    );
    let bite = Solid::extrude(Profile::circle(BITE_RADIUS)?, BITE_DEPTH, None, bite_paint)?.at(Vec3::new(
        BITE_OFFSET.0,
        logo_y + BITE_OFFSET.1,
        logo_z - mount_offset(LOGO_DEPTH * 0.5, BITE_DEPTH * 0.5),
    ));
    builder.add_part("appleBite", PartRole::LogoCutout, bite)?;

    let leaf = Solid::cylinder(0.0, LEAF_RADIUS, LEAF_LENGTH, LEAF_SEGMENTS, logo_paint)?
        .rotated(Quat::from_rotation_z(FRAC_PI_4))
        .at(Vec3::new(
            LEAF_OFFSET.0,
            logo_y + LEAF_OFFSET.1,
            -mount_offset(half_d, LEAF_RADIUS),
        ));
    builder.add_part("appleLeaf", PartRole::Logo, leaf)?;

    // Back: camera bar and everything mounted on it
    let bar_y = half_h - CAMERA_BAR_FROM_TOP;
    let bar_z = -mount_offset(half_d, CAMERA_BAR_DEPTH * 0.5);
    let bar_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x4a90e2))
            .metalness(0.9)
            .roughness(0.2),
    );
    let bar = Solid::extrude(
        Profile::rounded_rect(camera_bar_width, CAMERA_BAR_HEIGHT, CAMERA_BAR_RADIUS)?,
        CAMERA_BAR_DEPTH,
        Some(CAMERA_BAR_BEVEL),
        bar_paint,
    )?
    .at(Vec3::new(0.0, bar_y, bar_z));
    builder.add_part("cameraBar", PartRole::CameraBar, bar)?;

    let lens_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x1a1a1a))
            .metalness(0.9)
            .roughness(0.05),
    );
    let glass_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x001122))
            .metalness(0.0)
            .roughness(0.0)
            .transmission(0.9),
    );
    let lens_z = bar_z - mount_offset(CAMERA_BAR_DEPTH * 0.5, LENS_DEPTH * 0.5);
    let glass_depth = LENS_DEPTH * LENS_GLASS_DEPTH_SCALE;
    let glass_z = lens_z - mount_offset(LENS_DEPTH * 0.5, glass_depth * 0.5);
    let first_lens_x = -camera_bar_width * 0.5 + CAMERA_BAR_PADDING + LENS_RADIUS;
    let lens_pitch = 2.0 * LENS_RADIUS + LENS_SPACING;
    let mut last_lens_x = first_lens_x;
    for i in 0..LENS_COUNT {
        let x = first_lens_x + lens_pitch * i as f32;
        last_lens_x = x;

        let lens = Solid::cylinder(LENS_RADIUS, LENS_RADIUS, LENS_DEPTH, ROUND_SEGMENTS, lens_paint)?
            .rotated(facing_z())
            .at(Vec3::new(x, bar_y, lens_z));
        builder.add_part(format!("lens{i}"), PartRole::Lens, lens)?;

        let glass_radius = LENS_RADIUS * LENS_GLASS_SCALE;
        let glass = Solid::cylinder(glass_radius, glass_radius, glass_depth, ROUND_SEGMENTS, glass_paint)?
            .rotated(facing_z())
            .at(Vec3::new(x, bar_y, glass_z));
        builder.add_part(format!("lensGlass{i}"), PartRole::Lens, glass)?;
    }

    let lidar_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x0a0a0a))
            .metalness(0.8)
            .roughness(0.3)
            .emissive(Color::from_hex(0x001100), 0.2),
    );
    let lidar = Solid::cylinder(LIDAR_RADIUS, LIDAR_RADIUS, LIDAR_DEPTH, ROUND_SEGMENTS, lidar_paint)?
        .rotated(facing_z())
        .at(Vec3::new(
            last_lens_x + LENS_RADIUS + LIDAR_GAP + LIDAR_RADIUS,
            bar_y,
            bar_z - mount_offset(CAMERA_BAR_DEPTH * 0.5, LIDAR_DEPTH * 0.5),
        ));
    builder.add_part("lidar", PartRole::Sensor, lidar)?;

    let flash_paint = builder.material(
        MaterialSpec::new(Color::WHITE)
            .metalness(0.3)
            .roughness(0.2)
            .emissive(Color::from_hex(0xffffcc), 0.5),
    );
    let flash = Solid::cylinder(FLASH_RADIUS, FLASH_RADIUS, FLASH_DEPTH, ROUND_SEGMENTS, flash_paint)?
        .rotated(facing_z())
        .at(Vec3::new(
            camera_bar_width * 0.5 - FLASH_EDGE_PADDING - FLASH_RADIUS,
            bar_y,
            bar_z - mount_offset(CAMERA_BAR_DEPTH * 0.5, FLASH_DEPTH * 0.5),
        ));
    builder.add_part("flash", PartRole::Flash, flash)?;

    // Side buttons, mounted along ±X
    let button_paint = builder.material(
        MaterialSpec::new(Color::from_hex(0x2a2a2a))
            .metalness(0.9)
            .roughness(0.3),
    );
    let button_x = mount_offset(half_w, BUTTON_THICKNESS * 0.5);
    for (name, length, from_top, side) in BUTTONS {
        let x = match side {
            Side::Left => -button_x,
            Side::Right => button_x,
        };
        let button = Solid::cuboid(BUTTON_THICKNESS, length, BUTTON_DEPTH, button_paint)?
            .at(Vec3::new(x, half_h - from_top, 0.0));
        builder.add_part(name, PartRole::Button, button)?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartGroup;
    use approx::assert_relative_eq;

    fn phone() -> Model {
        build_phone(&PhoneDimensions::default()).unwrap()
    }

    #[test]
    fn every_part_is_registered() {
        let model = phone();
        for name in [
            "body", "screen", "island", "frontCamera", "frontLens", "faceID", "port",
            "connector", "appleLogo", "appleBite", "appleLeaf", "cameraBar", "lens0",
            "lens1", "lens2", "lensGlass0", "lensGlass1", "lensGlass2", "lidar", "flash",
            "powerButton", "volumeUp", "volumeDown", "actionButton",
        ] {
            assert!(model.contains_part(name), "missing {name}");
        }
        assert_eq!(model.part_count(), 24);
    }

    #[test]
    fn lens_row_matches_hand_tuned_layout() {
        let model = phone();
        for (i, x) in [-1.8, -0.6, 0.6].into_iter().enumerate() {
            let lens = model.get_part(&format!("lens{i}")).unwrap();
            assert_relative_eq!(lens.transform().position.x, x, epsilon = 1e-5);
        }
        assert_relative_eq!(model.get_part("lidar").unwrap().transform().position.x, 1.5, epsilon = 1e-5);
        assert_relative_eq!(model.get_part("flash").unwrap().transform().position.x, 2.2, epsilon = 1e-5);
    }

    #[test]
    fn buttons_sit_outside_the_frame() {
        let model = phone();
        let (_, body_max) = model.get_part("body").unwrap().placed_bounds();
        let (power_min, _) = model.get_part("powerButton").unwrap().placed_bounds();
        assert!(power_min.x > body_max.x);
        assert_relative_eq!(
            model.get_part("powerButton").unwrap().transform().position.y,
            2.5,
            epsilon = 1e-5
        );
    }

    #[test]
    fn port_is_derived_from_height() {
        let tall = build_phone(&PhoneDimensions::new().height(20.0)).unwrap();
        let port_y = tall.get_part("port").unwrap().transform().position.y;
        assert!(port_y < -10.0);
        let (_, port_max) = tall.get_part("port").unwrap().placed_bounds();
        assert!(port_max.y < -10.0);
    }

    #[test]
    fn body_group_covers_body_bar_and_buttons() {
        let model = phone();
        let members: Vec<_> = model
            .parts()
            .filter(|p| PartGroup::BodyColored.contains(p.role))
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(
            members,
            ["body", "cameraBar", "powerButton", "volumeUp", "volumeDown", "actionButton"]
        );
    }

    #[test]
    fn logo_and_leaf_share_a_material() {
        let model = phone();
        assert_eq!(
            model.get_part("appleLogo").unwrap().material(),
            model.get_part("appleLeaf").unwrap().material()
        );
    }

    fn boxes_overlap(a: (Vec3, Vec3), b: (Vec3, Vec3)) -> bool {
        const EPS: f32 = 1e-5;
        (a.0.x < b.1.x - EPS && b.0.x < a.1.x - EPS)
            && (a.0.y < b.1.y - EPS && b.0.y < a.1.y - EPS)
            && (a.0.z < b.1.z - EPS && b.0.z < a.1.z - EPS)
    }

    #[test]
    fn no_parts_overlap_across_dimensions() {
        let variants = [
            PhoneDimensions::default(),
            PhoneDimensions::new().width(8.0),
            PhoneDimensions::new().height(8.0),
            PhoneDimensions::new().width(7.5).height(12.0),
            PhoneDimensions::new().depth(1.2),
            PhoneDimensions::new().corner_radius(0.3),
        ];
        for dims in variants {
            let model = build_phone(&dims).unwrap();
            let placed: Vec<_> = model
                .parts()
                .map(|p| (p.name.to_string(), p.solid.placed_bounds()))
                .collect();
            for (i, (a, a_bounds)) in placed.iter().enumerate() {
                for (b, b_bounds) in &placed[i + 1..] {
                    assert!(
                        !boxes_overlap(*a_bounds, *b_bounds),
                        "{a} overlaps {b} for {dims:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn camera_row_stays_on_the_bar() {
        let model = build_phone(&PhoneDimensions::new().width(8.0)).unwrap();
        let (bar_min, bar_max) = model.get_part("cameraBar").unwrap().placed_bounds();
        for name in ["lens0", "lens1", "lens2", "lidar", "flash"] {
            let (min, max) = model.get_part(name).unwrap().placed_bounds();
            assert!(min.x > bar_min.x && max.x < bar_max.x, "{name}");
            assert!(min.y > bar_min.y && max.y < bar_max.y, "{name}");
        }
    }

    #[test]
    fn logo_drops_below_a_lowered_camera_bar() {
        let model = build_phone(&PhoneDimensions::new().height(8.0)).unwrap();
        let (bar_min, _) = model.get_part("cameraBar").unwrap().placed_bounds();
        for name in ["appleLogo", "appleBite", "appleLeaf"] {
            let (_, max) = model.get_part(name).unwrap().placed_bounds();
            assert!(max.y < bar_min.y, "{name}");
        }
        // default height keeps the preferred logo position
        assert_relative_eq!(
            phone().get_part("appleLogo").unwrap().transform().position.y,
            LOGO_RISE
        );
    }

    #[test]
    fn layouts_that_cannot_fit_are_rejected() {
        assert!(matches!(
            build_phone(&PhoneDimensions::new().width(5.0)),
            Err(BuildError::InvalidGeometryParams { .. })
        ));
        assert!(matches!(
            build_phone(&PhoneDimensions::new().height(5.0)),
            Err(BuildError::InvalidGeometryParams { .. })
        ));
    }

    #[test]
    fn invalid_dimensions_fail_fast() {
        assert!(build_phone(&PhoneDimensions::new().corner_radius(4.0)).is_err());
        assert!(build_phone(&PhoneDimensions::new().depth(0.0)).is_err());
        assert!(build_phone(&PhoneDimensions::new().width(0.9)).is_err());
    }
}
