//! Penumbra core geometry
//!
//! CPU-side mesh data for the shadow-mapping viewer. The generators return
//! plain vertex/normal/index lists; turning them into GPU buffers is the
//! renderer's job.

pub mod primitive;

pub use primitive::{MeshData, box_mesh, plane_mesh};
