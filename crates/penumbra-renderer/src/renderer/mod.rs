//! Per-frame renderer orchestration.
//!
//! [`Renderer`] ties the components together and drives the two-pass
//! algorithm every frame:
//!
//! 1. upload the camera state (the caller has already advanced it),
//! 2. compute the light-space transform once and upload the light uniform,
//! 3. depth pass into the offscreen shadow target,
//! 4. lighting pass into the main target, sampling the moments map.
//!
//! The debug overlay and buffer presentation belong to the embedding
//! application; mutations they make are observed at the next frame's
//! uploads.

mod camera_controller;
mod gpu_resources;
mod lighting_system;
mod render_pass;

pub use camera_controller::CameraController;
pub use lighting_system::LightingSystem;

use glam::Vec3;

use penumbra_core::MeshData;

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::light::DirectionalLight;
use crate::mesh::{MeshRenderer, ShadowMode};
use crate::scene::{Scene, SceneObject};
use crate::target::{DEPTH_FORMAT, ShadowTarget};

/// Two-pass shadow-mapping renderer.
pub struct Renderer {
    camera_controller: CameraController,
    lighting_system: LightingSystem,
    mesh_renderer: MeshRenderer,
    scene: Scene,

    #[allow(dead_code)] // Held for GPU resource lifetime
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    #[allow(dead_code)] // Held for GPU resource lifetime
    msaa_texture: Option<wgpu::Texture>,
    msaa_view: Option<wgpu::TextureView>,

    clear_color: wgpu::Color,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Creates a renderer targeting `format` at the given viewport size.
    ///
    /// Any GPU resource or pipeline creation failure here is fatal; there
    /// is no degraded mode without depth-capture support.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let camera_controller = CameraController::new(device, width, height, &config.camera);

        let mesh_renderer = MeshRenderer::new(
            device,
            format,
            DEPTH_FORMAT,
            camera_controller.bind_group_layout(),
            camera_controller.buffer(),
        );

        let lighting_system =
            LightingSystem::new(device, &mesh_renderer, &config.light, &config.shadow);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height);
        let (msaa_texture, msaa_view) =
            match gpu_resources::create_msaa_texture(device, format, width, height) {
                Some((texture, view)) => (Some(texture), Some(view)),
                None => (None, None),
            };

        let [r, g, b, a] = config.viewport.background_color;
        let clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };

        tracing::info!(
            width,
            height,
            shadow_map = config.shadow.map_size,
            "renderer created"
        );

        Self {
            camera_controller,
            lighting_system,
            mesh_renderer,
            scene: Scene::new(),
            depth_texture,
            depth_view,
            msaa_texture,
            msaa_view,
            clear_color,
            format,
            width,
            height,
        }
    }

    // ========== Camera accessors ==========

    /// Get a reference to the camera.
    pub fn camera(&self) -> &Camera {
        self.camera_controller.camera()
    }

    /// Get a mutable reference to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_controller.camera_mut()
    }

    // ========== Light accessors ==========

    /// Get a reference to the directional light.
    pub fn light(&self) -> &DirectionalLight {
        self.lighting_system.light()
    }

    /// Get a mutable reference to the directional light.
    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        self.lighting_system.light_mut()
    }

    /// Get the offscreen shadow target.
    pub fn shadow_target(&self) -> &ShadowTarget {
        self.lighting_system.shadow_target()
    }

    // ========== Scene accessors ==========

    /// Get a reference to the scene registry.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get a mutable reference to the scene registry.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Upload mesh data and register it under `name`.
    ///
    /// Registration under an existing name leaves the existing object in
    /// place, matching the registry's first-writer-wins contract.
    pub fn add_object(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        mesh: &MeshData,
        color: [f32; 4],
    ) {
        if self.scene.contains(name) {
            tracing::debug!(name, "object already registered, keeping existing");
            return;
        }
        let object = SceneObject::new(
            device,
            self.mesh_renderer.object_bind_group_layout(),
            mesh,
            color,
        );
        self.scene.add(name, object);
    }

    /// Set an object's position and scale.
    pub fn set_object_transform(
        &mut self,
        queue: &wgpu::Queue,
        name: &str,
        position: Vec3,
        scale: Vec3,
    ) {
        if let Some(object) = self.scene.get_mut(name) {
            object.set_transform(queue, position, scale);
        }
    }

    /// Destroy every scene object.
    pub fn clear_objects(&mut self) {
        self.scene.clear();
    }

    /// Resizes the viewport-sized textures.
    ///
    /// The shadow target keeps its startup resolution.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera_controller.update_aspect(width, height);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        let (msaa_texture, msaa_view) =
            match gpu_resources::create_msaa_texture(device, self.format, width, height) {
                Some((texture, view)) => (Some(texture), Some(view)),
                None => (None, None),
            };
        self.msaa_texture = msaa_texture;
        self.msaa_view = msaa_view;
    }

    /// Returns the texture format used by the renderer.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Current viewport size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Render one frame: depth pass, then lighting pass.
    ///
    /// The caller advances the camera before this and presents afterwards.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
        mode: ShadowMode,
    ) {
        self.camera_controller.update(queue);
        // Light-space transform computed exactly once per frame; both
        // passes bind the buffer written here.
        self.lighting_system.update(queue);

        let shadow_params = render_pass::ShadowPassParams {
            lighting: &self.lighting_system,
            scene: &self.scene,
            mesh_renderer: &self.mesh_renderer,
        };
        render_pass::render_shadow_pass(encoder, &shadow_params);

        let main_params = render_pass::MainPassParams {
            lighting: &self.lighting_system,
            scene: &self.scene,
            mesh_renderer: &self.mesh_renderer,
            depth_view: &self.depth_view,
            msaa_view: self.msaa_view.as_ref(),
            clear_color: self.clear_color,
            mode,
        };
        render_pass::render_main_pass(encoder, view, &main_params);
    }
}
