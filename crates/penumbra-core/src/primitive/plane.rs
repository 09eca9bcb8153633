//! Ground plane mesh generation

use super::MeshData;

/// Generate a unit ground plane at y = 0.
///
/// Spans [-1, 1] in x and z with a +Y normal; 4 vertices, 2 triangles.
/// Winding is counter-clockwise seen from above.
pub fn plane_mesh() -> MeshData {
    let vertices = vec![
        [-1.0, 0.0, -1.0],
        [-1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 0.0, -1.0],
    ];
    let normals = vec![[0.0, 1.0, 0.0]; 4];
    let indices = vec![0, 1, 2, 0, 2, 3];

    (vertices, normals, indices)
}
