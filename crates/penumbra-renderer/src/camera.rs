//! Perspective camera with a derived orthonormal basis

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// World up reference used by the camera and light view matrices.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined projection * view matrix.
    pub view_proj: [[f32; 4]; 4],
    /// View matrix.
    pub view: [[f32; 4]; 4],
    /// Projection matrix.
    pub proj: [[f32; 4]; 4],
    /// Camera world position (w = 1).
    pub eye: [f32; 4],
}

/// Perspective camera.
///
/// The basis vectors are derived by [`Camera::update`] and never settable on
/// their own, so they stay mutually orthogonal and unit length; incremental
/// rotation cannot accumulate drift.
pub struct Camera {
    /// Camera world position.
    pub position: Vec3,
    /// Unit forward vector (derived).
    forward: Vec3,
    /// Unit up vector (derived).
    up: Vec3,
    /// Unit right vector (derived).
    right: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::NEG_Z,
            up: WORLD_UP,
            right: Vec3::X,
            fov_degrees: 45.0,
            aspect,
            near: 0.1,
            far: 100.0,
        };
        camera.update(target);
        camera
    }

    /// Re-derive the orthonormal basis from the current position and a look
    /// target.
    ///
    /// `target` must differ from the camera position; a coincident target is
    /// a configuration error with no defined forward direction.
    pub fn update(&mut self, target: Vec3) {
        assert!(
            target != self.position,
            "camera target coincides with camera position"
        );
        self.forward = (target - self.position).normalize();
        self.right = self.forward.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.forward).normalize();
    }

    /// Update aspect ratio.
    pub fn update_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Unit forward vector.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit up vector.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right vector.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Right-handed view matrix along the current forward direction.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, WORLD_UP)
    }

    /// Perspective projection matrix (0..1 depth range).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Camera uniform data for the current state.
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_basis_orthonormal_after_update() {
        let mut camera = Camera::new(Vec3::new(9.0, 6.0, -9.0), Vec3::ZERO, 16.0 / 9.0);
        for target in [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, 2.0),
        ] {
            camera.update(target);
            let (f, r, u) = (camera.forward(), camera.right(), camera.up());
            assert!(f.dot(r).abs() < EPS);
            assert!(f.dot(u).abs() < EPS);
            assert!(r.dot(u).abs() < EPS);
            assert!((f.length() - 1.0).abs() < EPS);
            assert!((r.length() - 1.0).abs() < EPS);
            assert!((u.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_forward_points_at_target() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);
        camera.update(Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < EPS);
        assert!((camera.right() - Vec3::X).length() < EPS);
        assert!((camera.up() - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_view_matrix_centers_target() {
        let camera = Camera::new(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, 1.0);
        let view_target = camera.view_matrix().transform_point3(Vec3::ZERO);
        // The look target lands on the -Z view axis.
        assert!(view_target.x.abs() < EPS);
        assert!(view_target.y.abs() < EPS);
        assert!(view_target.z < 0.0);
    }

    #[test]
    fn test_update_is_pure_in_matrices() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.5);
        assert_eq!(
            camera.view_matrix().to_cols_array(),
            camera.view_matrix().to_cols_array()
        );
        assert_eq!(
            camera.projection_matrix().to_cols_array(),
            camera.projection_matrix().to_cols_array()
        );
    }

    #[test]
    #[should_panic(expected = "camera target coincides")]
    fn test_update_rejects_coincident_target() {
        let mut camera = Camera::new(Vec3::ONE, Vec3::ZERO, 1.0);
        camera.update(Vec3::ONE);
    }
}
