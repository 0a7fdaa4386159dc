//! Single-threaded viewing session: model, pose and camera behind one handle.
//!
//! A host feeds [`InputEvent`]s and palette names in between frames and calls
//! [`Viewer::frame`] once per display refresh. The returned [`FrameSnapshot`]
//! is everything a renderer needs to draw that frame.
//!
//! ```
//! use std::time::Duration;
//! use handset::{InputEvent, PhoneDimensions, PoseConfig, Vec2, Viewer, build_phone};
//!
//! let model = build_phone(&PhoneDimensions::default()).unwrap();
//! let mut viewer = Viewer::new(model, PoseConfig::default());
//!
//! viewer.handle(&InputEvent::Wheel(-100.0));
//! assert!(viewer.select_palette("sage"));
//!
//! let frame = viewer.frame(Duration::from_millis(16));
//! assert_eq!(frame.camera_distance, 10.0);
//! ```

use std::time::Duration;

use glam::Quat;

use crate::camera::Camera;
use crate::input::InputEvent;
use crate::model::Model;
use crate::palette;
use crate::pose::{PoseConfig, PoseController, PoseMode};

/// What a renderer draws for one frame.
#[derive(Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// The model with this frame's orientation already applied.
    pub model: &'a Model,
    pub yaw: f32,
    pub pitch: f32,
    pub orientation: Quat,
    pub camera_distance: f32,
    /// Eye on +Z at `camera_distance`; carries the projection.
    pub camera: Camera,
    pub mode: PoseMode,
}

/// Draws frames produced by a [`Viewer`].
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>);
}

pub struct Viewer {
    model: Model,
    pose: PoseController,
    camera: Camera,
}

impl Viewer {
    pub fn new(model: Model, config: PoseConfig) -> Self {
        let pose = PoseController::new(config);
        let mut camera = Camera::new();
        camera.set_distance(pose.camera_distance());
        Self {
            model,
            pose,
            camera,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn pose(&self) -> &PoseController {
        &self.pose
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Routes one input event. Resizes only touch the projection.
    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                self.camera.set_viewport(*width, *height);
                tracing::debug!(width, height, aspect = self.camera.aspect, "viewport resized");
            }
            other => self.pose.handle(other),
        }
    }

    /// Applies a named color preset.
    ///
    /// Unknown names are logged and ignored. Returns whether a preset was applied.
    pub fn select_palette(&mut self, name: &str) -> bool {
        match palette::apply_named(&mut self.model, name) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(%err, "palette selection ignored");
                false
            }
        }
    }

    /// Advances the pose by one tick and returns the frame to draw.
    pub fn frame(&mut self, dt: Duration) -> FrameSnapshot<'_> {
        self.pose.tick(dt);
        let orientation = self.pose.orientation();
        self.model.set_orientation(orientation);
        self.camera.set_distance(self.pose.camera_distance());

        FrameSnapshot {
            model: &self.model,
            yaw: orientation.yaw,
            pitch: orientation.pitch,
            orientation: orientation.quat(),
            camera_distance: self.pose.camera_distance(),
            camera: self.camera,
            mode: self.pose.mode(),
        }
    }

    /// Produces a frame and hands it to `renderer`.
    pub fn render_frame(&mut self, dt: Duration, renderer: &mut impl Renderer) {
        let frame = self.frame(dt);
        renderer.render(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phone::{PhoneDimensions, build_phone};
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn viewer() -> Viewer {
        Viewer::new(build_phone(&PhoneDimensions::default()).unwrap(), PoseConfig::default())
    }

    #[derive(Default)]
    struct Recorder {
        yaws: Vec<f32>,
        parts: usize,
    }

    impl Renderer for Recorder {
        fn render(&mut self, frame: &FrameSnapshot<'_>) {
            self.yaws.push(frame.yaw);
            self.parts = frame.model.part_count();
        }
    }

    #[test]
    fn frames_apply_orientation_to_model() {
        let mut viewer = viewer();
        viewer.handle(&InputEvent::PointerDown(Vec2::ZERO));
        viewer.handle(&InputEvent::PointerMove(Vec2::new(0.0, 100.0)));

        let frame = viewer.frame(Duration::from_millis(16));
        assert_relative_eq!(frame.pitch, 0.05, epsilon = 1e-6);
        assert_eq!(frame.mode, PoseMode::Dragging);
        assert_eq!(viewer.model().orientation().pitch, viewer.pose().orientation().pitch);
    }

    #[test]
    fn resize_changes_projection_only() {
        let mut viewer = viewer();
        let geometry: Vec<_> = viewer.model().tessellate().into_iter().map(|m| m.geometry).collect();

        viewer.handle(&InputEvent::Resize { width: 800, height: 400 });
        assert_eq!(viewer.camera().aspect, 2.0);
        assert_eq!(viewer.pose().mode(), PoseMode::AutoRotating);

        let after: Vec<_> = viewer.model().tessellate().into_iter().map(|m| m.geometry).collect();
        assert_eq!(geometry, after);
    }

    #[test]
    fn unknown_palette_is_ignored() {
        let mut viewer = viewer();
        let before = viewer.model().part_color("body");
        assert!(!viewer.select_palette("neon"));
        assert_eq!(viewer.model().part_color("body"), before);
    }

    #[test]
    fn renderer_sees_every_frame() {
        let mut viewer = viewer();
        let mut recorder = Recorder::default();
        for _ in 0..3 {
            viewer.render_frame(Duration::from_millis(16), &mut recorder);
        }
        assert_eq!(recorder.yaws.len(), 3);
        assert!(recorder.yaws.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(recorder.parts, 24);
    }
}
