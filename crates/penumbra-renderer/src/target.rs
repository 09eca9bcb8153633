//! Offscreen render target for the depth-capture pass

/// Texture format of the moments attachment: R stores light-space depth,
/// G stores depth squared.
pub const MOMENTS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rg32Float;

/// Depth attachment format shared by both passes.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen shadow target, sized independently of the presentation
/// surface and never resized at runtime.
///
/// Holds a depth attachment for hidden-surface removal within the depth
/// pass and a two-channel float color attachment storing depth moments for
/// the lighting pass to sample.
pub struct ShadowTarget {
    width: u32,
    height: u32,
    moments_texture: wgpu::Texture,
    moments_view: wgpu::TextureView,
    #[allow(dead_code)] // Held for GPU resource lifetime
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl ShadowTarget {
    /// Create a shadow target at the given resolution.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let moments_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Moments Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: MOMENTS_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let moments_view = moments_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Rg32Float is not filterable without extra device features; PCSS
        // does its own kernel filtering, so nearest sampling is enough.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Moments Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            width,
            height,
            moments_texture,
            moments_view,
            depth_texture,
            depth_view,
            sampler,
        }
    }

    /// Begin the depth-capture pass on this target.
    ///
    /// Both attachments are cleared (the moments attachment to white, so
    /// un-rasterized texels read as the far plane) and the viewport is set
    /// to the target's own resolution. Dropping the returned pass ends it;
    /// release happens on every exit path, so a failure while recording
    /// cannot leak target or viewport state into subsequent passes.
    /// Re-borrowing the encoder prevents nested passes on the same target.
    pub fn begin<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
    ) -> wgpu::RenderPass<'encoder> {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.moments_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_viewport(0.0, 0.0, self.width as f32, self.height as f32, 0.0, 1.0);
        render_pass
    }

    /// Target width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Moments texture (for readback or debugging).
    pub fn moments_texture(&self) -> &wgpu::Texture {
        &self.moments_texture
    }

    /// Moments texture view sampled by the lighting pass.
    pub fn moments_view(&self) -> &wgpu::TextureView {
        &self.moments_view
    }

    /// Sampler for the moments texture.
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}
