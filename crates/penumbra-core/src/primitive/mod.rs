//! Primitive mesh generation
//!
//! Generates vertices, normals, and indices for the shapes the scene is
//! built from:
//! - Plane (unit ground quad, +Y normal)
//! - Box (unit cube with per-face normals)
//!
//! All primitives are unit-sized around the origin; object scale is applied
//! by the model transform at render time.

mod box_mesh;
mod plane;

pub use box_mesh::box_mesh;
pub use plane::plane_mesh;

/// Mesh data: vertices, normals, and triangle indices
pub type MeshData = (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<u32>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_mesh() {
        let (vertices, normals, indices) = plane_mesh();
        assert_eq!(vertices.len(), 4);
        assert_eq!(normals.len(), 4);
        assert_eq!(indices.len(), 6); // 2 triangles
        for n in &normals {
            assert_eq!(*n, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_box_mesh() {
        let (vertices, normals, indices) = box_mesh();
        assert_eq!(vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(normals.len(), 24);
        assert_eq!(indices.len(), 36); // 6 faces * 2 triangles * 3 indices
    }

    #[test]
    fn test_box_normals_unit_length() {
        let (_, normals, _) = box_mesh();
        for n in &normals {
            let len_sq = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
            assert!((len_sq - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_box_dimensions() {
        let (vertices, _, _) = box_mesh();
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in &vertices {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }
        for i in 0..3 {
            assert!((max[i] - min[i] - 2.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_indices_in_range() {
        for (vertices, _, indices) in [plane_mesh(), box_mesh()] {
            assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        }
    }
}
