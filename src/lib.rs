//! # Handset
//!
//! **A procedural phone model with a damped, touch-friendly pose controller.**
//!
//! The phone is assembled from code: rounded-rectangle profiles are extruded
//! into solids, solids are registered as named parts, and the whole model is
//! turned by a pose controller that auto-rotates until the user grabs it.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use handset::*;
//!
//! fn main() -> Result<(), BuildError> {
//!     let model = build_phone(&PhoneDimensions::default())?;
//!     let mut viewer = Viewer::new(model, PoseConfig::default());
//!
//!     viewer.handle(&InputEvent::PointerDown(Vec2::new(200.0, 300.0)));
//!     viewer.handle(&InputEvent::PointerMove(Vec2::new(260.0, 300.0)));
//!     viewer.handle(&InputEvent::PointerUp);
//!     viewer.select_palette("lavender");
//!
//!     let frame = viewer.frame(Duration::from_millis(16));
//!     for part in frame.model.tessellate() {
//!         // hand part.geometry to a renderer, e.g. via GpuMesh::upload
//!         assert!(part.geometry.triangle_count() > 0);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - [`Profile`] builds closed 2D outlines.
//! - [`Solid`] extrudes or revolves them and tessellates to [`RawGeometry`].
//! - [`ModelBuilder`] / [`Model`] hold named parts with semantic [`PartRole`]s.
//! - [`build_phone`] is the concrete phone layout.
//! - [`PoseController`] turns [`InputEvent`]s and ticks into orientation and zoom.
//! - [`palette`] recolors part groups from named presets.
//! - [`Viewer`] ties it together for a host loop.

mod camera;
mod error;
mod geometry;
mod input;
mod material;
mod mesh;
mod model;
pub mod palette;
mod phone;
mod pose;
mod profile;
mod solid;
mod viewer;

pub use camera::Camera;
pub use error::{BuildError, PaletteError};
pub use geometry::RawGeometry;
pub use input::{EventTranslator, InputEvent, PIXELS_PER_LINE, wheel_delta};
pub use material::{Color, ColorField, Emissive, MaterialId, MaterialLibrary, MaterialSpec};
pub use mesh::{GpuMesh, Transform, Vertex3d};
pub use model::{
    Model, ModelBuilder, Orientation, PartGroup, PartMesh, PartName, PartRole, PartView,
};
pub use palette::PaletteEntry;
pub use phone::{MOUNT_CLEARANCE, PhoneDimensions, build_phone, mount_offset};
pub use pose::{PoseConfig, PoseController, PoseMode, PoseState};
pub use profile::{Profile, Segment};
pub use solid::{Bevel, DEFAULT_CURVE_SEGMENTS, Geometry, Solid};
pub use viewer::{FrameSnapshot, Renderer, Viewer};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
