use glam::{Mat4, Vec3};

/// A perspective camera looking at the model from +Z.
///
/// Only the distance and the viewport aspect change at runtime. A resize
/// recomputes projection parameters and never touches model geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width over height.
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 15.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            aspect: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Places the eye on +Z, `distance` away from the target.
    pub fn set_distance(&mut self, distance: f32) {
        self.position = self.target + Vec3::Z * distance;
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Updates the aspect ratio. Zero-sized viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
