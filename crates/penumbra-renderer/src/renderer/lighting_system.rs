//! Lighting and shadow resources.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::config::{LightConfig, ShadowConfig};
use crate::light::DirectionalLight;
use crate::mesh::MeshRenderer;
use crate::target::ShadowTarget;

/// Manages the directional light, its uniform buffer, and the shadow target.
///
/// One uniform buffer carries the light-space transform for both passes, so
/// the depth pass and the lighting pass cannot observe different transforms
/// within a frame.
pub struct LightingSystem {
    light: DirectionalLight,
    light_buffer: wgpu::Buffer,
    shadow_target: ShadowTarget,
    /// Bind group for the lighting pass (uniform + moments map + sampler).
    light_bind_group: wgpu::BindGroup,
    /// Bind group for the depth pass (uniform only).
    shadow_light_bind_group: wgpu::BindGroup,
}

impl LightingSystem {
    /// Create the lighting system from its startup configuration.
    pub fn new(
        device: &wgpu::Device,
        mesh_renderer: &MeshRenderer,
        light_config: &LightConfig,
        shadow_config: &ShadowConfig,
    ) -> Self {
        let mut light = DirectionalLight::new(
            Vec3::from_array(light_config.position),
            Vec3::from_array(light_config.target),
            light_config.half_width,
            light_config.half_height,
            light_config.near_plane,
            light_config.far_plane,
        );
        light.light_width = light_config.light_width;
        light.shadow_bias = shadow_config.bias;

        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[light.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shadow_target =
            ShadowTarget::new(device, shadow_config.map_size, shadow_config.map_size);

        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Light Bind Group"),
            layout: mesh_renderer.light_bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(shadow_target.moments_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(shadow_target.sampler()),
                },
            ],
        });

        let shadow_light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Light Bind Group"),
            layout: mesh_renderer.shadow_light_bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        Self {
            light,
            light_buffer,
            shadow_target,
            light_bind_group,
            shadow_light_bind_group,
        }
    }

    /// Get a reference to the directional light.
    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Get a mutable reference to the directional light.
    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }

    /// Get the light bind group (for the lighting pass).
    pub fn light_bind_group(&self) -> &wgpu::BindGroup {
        &self.light_bind_group
    }

    /// Get the shadow light bind group (for the depth pass).
    pub fn shadow_light_bind_group(&self) -> &wgpu::BindGroup {
        &self.shadow_light_bind_group
    }

    /// Get the offscreen shadow target.
    pub fn shadow_target(&self) -> &ShadowTarget {
        &self.shadow_target
    }

    /// Write the light uniform to the GPU.
    ///
    /// This is the once-per-frame computation of the light-space transform;
    /// both passes read the buffer written here.
    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[self.light.uniform()]),
        );
    }
}
