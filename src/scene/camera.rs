use glam::{Mat4, Vec3};

use crate::scene::transform::Transform;

/// Perspective camera.
///
/// Owns its transform; the view matrix is derived from it by
/// [`update_view_matrix`](Self::update_view_matrix).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view, radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub transform: Transform,

    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
}

impl PerspectiveCamera {
    /// `fov` is in degrees.
    #[must_use]
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            transform: Transform::new(),
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // glam's perspective_rh targets a [0, 1] depth range.
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    pub fn update_view_matrix(&mut self) {
        let world = Mat4::from_rotation_translation(self.transform.rotation, self.transform.position);
        self.view_matrix = world.inverse();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.update_view_matrix();
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target, Vec3::Y);
        self.update_view_matrix();
    }

    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Direction the camera looks along, in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.transform.rotation * Vec3::NEG_Z
    }
}
