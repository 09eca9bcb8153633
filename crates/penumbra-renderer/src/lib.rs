//! Penumbra Renderer
//!
//! WGPU-based two-pass soft-shadow renderer.
//!
//! # Architecture
//!
//! Each frame runs the same two passes over the scene registry:
//!
//! 1. a depth pass that rasterizes the scene from the light's point of view
//!    into an offscreen moments target ([`ShadowTarget`]), and
//! 2. a lighting pass that rasterizes the scene from the camera, sampling
//!    the moments map to attenuate shadowed fragments (PCSS by default, a
//!    variance estimate in [`ShadowMode::Vssm`]).
//!
//! Both passes share a single light-space transform, written once per frame
//! into one uniform buffer.
//!
//! # Module Structure
//!
//! ```text
//! penumbra-renderer/
//! ├── camera.rs        # Perspective camera with derived basis
//! ├── light.rs         # Directional light and its orthographic frustum
//! ├── target.rs        # Offscreen moments/depth target (scoped passes)
//! ├── scene.rs         # Name-keyed registry of renderable objects
//! ├── mesh.rs          # Mesh pipelines (depth capture, PCSS, VSSM)
//! ├── vertex.rs        # Vertex formats
//! ├── config.rs        # Serializable renderer configuration
//! └── renderer/        # Per-frame orchestration
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod light;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod target;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use config::RendererConfig;
pub use light::{DirectionalLight, LightUniform};
pub use mesh::{MeshRenderer, ShadowMode};
pub use renderer::Renderer;
pub use scene::{Scene, SceneObject, Transform};
pub use target::ShadowTarget;
pub use vertex::MeshVertex;
