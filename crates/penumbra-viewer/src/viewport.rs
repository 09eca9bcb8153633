//! Viewport rendering state

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use penumbra_renderer::{Renderer, RendererConfig, ShadowMode};

/// Number of boxes scattered over the ground plane.
const BOX_COUNT: u32 = 30;

/// Seed for the box field so every run shows the same scene.
const SCENE_SEED: u64 = 7;

/// Orbit flight of the camera around the scene origin.
struct Orbit {
    radius: f32,
    height: f32,
    theta_degrees: f32,
    speed_degrees: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            radius: 15.0,
            height: 6.0,
            theta_degrees: 0.0,
            speed_degrees: 15.0,
        }
    }
}

/// Render texture for the viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    /// The two-pass renderer.
    pub renderer: Renderer,
    /// Shadow algorithm for the next frame.
    pub mode: ShadowMode,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    render_texture: Option<RenderTexture>,
    orbit: Orbit,
}

/// Shared handle used by the UI and the render callback.
pub type SharedViewportState = Arc<Mutex<ViewportState>>;

impl ViewportState {
    /// Create the viewport state and populate the scene.
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        config: &RendererConfig,
    ) -> Self {
        let mut renderer = Renderer::new(&device, format, 800, 600, config);
        populate_scene(&mut renderer, &device, &queue);

        Self {
            renderer,
            mode: ShadowMode::default(),
            device,
            queue,
            render_texture: None,
            orbit: Orbit::default(),
        }
    }

    /// Advance the camera along its orbit and re-derive its basis.
    pub fn advance(&mut self, dt: f32) {
        self.orbit.theta_degrees += self.orbit.speed_degrees * dt;
        let theta = self.orbit.theta_degrees.to_radians();

        let camera = self.renderer.camera_mut();
        camera.position = Vec3::new(
            self.orbit.radius * theta.cos(),
            self.orbit.height,
            self.orbit.radius * theta.sin(),
        );
        camera.update(Vec3::ZERO);
    }

    /// Ensure the render texture matches the requested size.
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        let needs_recreate = self
            .render_texture
            .as_ref()
            .is_none_or(|t| t.width != width || t.height != height);

        if needs_recreate {
            if let Some(old) = self.render_texture.take() {
                egui_renderer.free_texture(&old.egui_texture_id);
            }

            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Viewport Render Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: self.renderer.format(),
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            });

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

            let egui_texture_id = egui_renderer.register_native_texture(
                &self.device,
                &view,
                wgpu::FilterMode::Linear,
            );

            self.renderer.resize(&self.device, width, height);

            self.render_texture = Some(RenderTexture {
                texture,
                view,
                egui_texture_id,
                width,
                height,
            });
        }

        self.render_texture.as_ref().unwrap().egui_texture_id
    }

    /// Render the two-pass frame into the viewport texture.
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &rt.view, &self.queue, self.mode);

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Register the reference scene: a ground plane and a field of boxes.
fn populate_scene(renderer: &mut Renderer, device: &wgpu::Device, queue: &wgpu::Queue) {
    renderer.add_object(
        device,
        "plane",
        &penumbra_core::plane_mesh(),
        [0.8, 0.8, 0.82, 1.0],
    );
    renderer.set_object_transform(queue, "plane", Vec3::ZERO, Vec3::splat(10.0));

    let mut rng = StdRng::seed_from_u64(SCENE_SEED);
    let box_mesh = penumbra_core::box_mesh();
    for i in 0..BOX_COUNT {
        let name = format!("box_{i}");
        let color = [
            0.4 + 0.4 * rng.gen_range(0.0..1.0),
            0.4 + 0.4 * rng.gen_range(0.0..1.0),
            0.4 + 0.4 * rng.gen_range(0.0..1.0),
            1.0,
        ];
        renderer.add_object(device, &name, &box_mesh, color);

        let position = Vec3::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(0.0..3.0),
            rng.gen_range(-4.0..4.0),
        );
        let scale = Vec3::new(
            rng.gen_range(0.3..0.5),
            rng.gen_range(0.3..0.5),
            rng.gen_range(0.3..0.5),
        );
        renderer.set_object_transform(queue, &name, position, scale);
    }

    tracing::debug!(objects = renderer.scene().len(), "scene populated");
}
