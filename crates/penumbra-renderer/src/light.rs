//! Directional light with an orthographic shadow frustum

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::WORLD_UP;

/// Light uniform buffer data, shared by the depth and lighting passes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Light-space transform (projection * view).
    pub light_space: [[f32; 4]; 4],
    /// Light world position (w = 1).
    pub position: [f32; 4],
    /// x: light width in shadow-map UV units, y: depth bias, z/w: unused.
    pub params: [f32; 4],
}

/// Directional light.
///
/// The projection is always orthographic: the light models a parallel
/// (infinitely distant) source, which is what makes a single planar shadow
/// map sufficient. Point and spot lights are out of scope.
pub struct DirectionalLight {
    /// Light world position.
    pub position: Vec3,
    /// Point the light looks at.
    pub target: Vec3,
    /// Orthographic half extent along the light's x axis.
    pub half_width: f32,
    /// Orthographic half extent along the light's y axis.
    pub half_height: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Physical light size driving the PCSS penumbra estimate. Not used by
    /// the matrix math.
    pub light_width: f32,
    /// Depth bias applied in the shadow comparison to suppress acne.
    pub shadow_bias: f32,
}

impl DirectionalLight {
    /// Create a directional light with the given frustum geometry.
    ///
    /// The view matrix degenerates when `position` equals `target` or the
    /// light direction is colinear with world up; callers keep the light
    /// away from those configurations by construction.
    pub fn new(
        position: Vec3,
        target: Vec3,
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            half_width,
            half_height,
            near,
            far,
            light_width: 50.0,
            shadow_bias: 0.003,
        }
    }

    /// Orthographic projection matrix (0..1 depth range).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -self.half_width,
            self.half_width,
            -self.half_height,
            self.half_height,
            self.near,
            self.far,
        )
    }

    /// View matrix looking from the light position toward its target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, WORLD_UP)
    }

    /// Combined light-space transform (projection * view).
    ///
    /// Recomputed on demand, never cached: position and target may change
    /// between frames and a stale transform would desynchronize the passes.
    pub fn light_space_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Light uniform data for the current state.
    ///
    /// The light width is rescaled from world units to shadow-map UV so the
    /// shader kernel math stays resolution-independent.
    pub fn uniform(&self) -> LightUniform {
        let light_space = self.light_space_matrix();
        let light_width_uv = self.light_width / (2.0 * self.half_width);

        LightUniform {
            light_space: light_space.to_cols_array_2d(),
            position: [self.position.x, self.position.y, self.position.z, 1.0],
            params: [light_width_uv, self.shadow_bias, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_light() -> DirectionalLight {
        DirectionalLight::new(
            Vec3::new(7.5, 7.5, 7.5),
            Vec3::new(-2.0, 0.0, -2.0),
            10.0,
            10.0,
            0.1,
            30.0,
        )
    }

    #[test]
    fn test_light_space_transform_is_deterministic() {
        let light = reference_light();
        // Both passes consume the same per-frame transform; recomputing it
        // must be bit-identical.
        assert_eq!(
            light.light_space_matrix().to_cols_array(),
            light.light_space_matrix().to_cols_array()
        );
        assert_eq!(
            light.light_space_matrix().to_cols_array_2d(),
            light.uniform().light_space
        );
    }

    #[test]
    fn test_orthographic_depth_range() {
        let light = reference_light();
        let proj = light.projection_matrix();
        // View-space z = -near maps to depth 0, z = -far to depth 1.
        let near_point = proj.project_point3(Vec3::new(0.0, 0.0, -light.near));
        let far_point = proj.project_point3(Vec3::new(0.0, 0.0, -light.far));
        assert!(near_point.z.abs() < 1e-6);
        assert!((far_point.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frustum_half_extents() {
        let light = reference_light();
        let proj = light.projection_matrix();
        let edge = proj.project_point3(Vec3::new(light.half_width, 0.0, -1.0));
        assert!((edge.x - 1.0).abs() < 1e-6);
        let edge = proj.project_point3(Vec3::new(0.0, -light.half_height, -1.0));
        assert!((edge.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_world_origin_inside_reference_frustum() {
        let light = reference_light();
        let ndc = light.light_space_matrix().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() <= 1.0);
        assert!(ndc.y.abs() <= 1.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
