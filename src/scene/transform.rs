use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};

/// Transform component
///
/// Wraps a node's TRS together with its cached local and world matrices.
/// The world matrix is written by [`Scene::update_world_matrices`](crate::scene::Scene::update_world_matrices).
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
        }
    }

    /// Builds a transform from glTF-style decomposed TRS arrays.
    #[must_use]
    pub fn from_trs(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        let mut transform = Self::new();
        transform.position = Vec3::from_array(translation);
        transform.rotation = Quat::from_array(rotation);
        transform.scale = Vec3::from_array(scale);
        transform.update_local_matrix();
        transform
    }

    /// Recomputes the local matrix from TRS and returns it.
    pub fn update_local_matrix(&mut self) -> Affine3A {
        self.local_matrix =
            Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.local_matrix
    }

    /// Replaces the rotation with a pure rotation of `angle` radians about +Y.
    pub fn set_rotation_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle);
    }

    /// Yaw component of the rotation, in radians.
    #[must_use]
    pub fn rotation_y(&self) -> f32 {
        let (y, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        y
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Orients the transform so its -Z axis points at `target`.
    ///
    /// `target` and `up` are in the parent's space. Degenerate inputs (target
    /// on the position, or forward parallel to `up`) leave the rotation as is.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };

        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
