//! Render pass execution.
//!
//! Executes the two passes of the shadow-mapping pipeline: the depth pass
//! into the offscreen shadow target and the lighting pass into the main
//! target.

use crate::mesh::{MeshRenderer, ShadowMode};
use crate::scene::Scene;

use super::LightingSystem;

/// Depth pass parameters.
pub struct ShadowPassParams<'a> {
    /// Lighting system.
    pub lighting: &'a LightingSystem,
    /// Scene registry.
    pub scene: &'a Scene,
    /// Mesh renderer.
    pub mesh_renderer: &'a MeshRenderer,
}

/// Execute the depth-capture pass.
///
/// Runs even when the scene is empty so the moments attachment is always
/// cleared to the far-plane encoding for the frame.
pub fn render_shadow_pass(encoder: &mut wgpu::CommandEncoder, params: &ShadowPassParams<'_>) {
    let mut shadow_pass = params.lighting.shadow_target().begin(encoder);
    params
        .mesh_renderer
        .begin_shadow(&mut shadow_pass, params.lighting.shadow_light_bind_group());
    params.scene.draw(&mut shadow_pass);
}

/// Lighting pass parameters.
pub struct MainPassParams<'a> {
    /// Lighting system.
    pub lighting: &'a LightingSystem,
    /// Scene registry.
    pub scene: &'a Scene,
    /// Mesh renderer.
    pub mesh_renderer: &'a MeshRenderer,
    /// Depth view for the main target.
    pub depth_view: &'a wgpu::TextureView,
    /// MSAA view (if MSAA is enabled).
    pub msaa_view: Option<&'a wgpu::TextureView>,
    /// Clear color.
    pub clear_color: wgpu::Color,
    /// Shadow algorithm for this frame.
    pub mode: ShadowMode,
}

/// Execute the lighting pass.
pub fn render_main_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    params: &MainPassParams<'_>,
) {
    let color_attachment = if let Some(msaa_view) = params.msaa_view {
        // MSAA enabled: render to the multisample texture, resolve to output
        wgpu::RenderPassColorAttachment {
            view: msaa_view,
            resolve_target: Some(view),
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(params.clear_color),
                store: wgpu::StoreOp::Store,
            },
        }
    } else {
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(params.clear_color),
                store: wgpu::StoreOp::Store,
            },
        }
    };

    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Lighting Pass"),
        color_attachments: &[Some(color_attachment)],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    params.mesh_renderer.begin_main(
        &mut render_pass,
        params.mode,
        params.lighting.light_bind_group(),
    );
    params.scene.draw(&mut render_pass);
}
