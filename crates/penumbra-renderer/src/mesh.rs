//! Mesh pipelines for the depth-capture and lighting passes

use crate::constants::viewport::SAMPLE_COUNT;
use crate::target::MOMENTS_FORMAT;
use crate::vertex::MeshVertex;

/// Shadow algorithm used by the lighting pass.
///
/// Passed into the per-frame render call; there is no global toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowMode {
    /// Percentage-closer soft shadows.
    #[default]
    Pcss,
    /// Variance shadow map (Chebyshev bound over the depth moments).
    Vssm,
}

impl ShadowMode {
    /// Human-readable name for the debug overlay.
    pub fn label(self) -> &'static str {
        match self {
            ShadowMode::Pcss => "PCSS",
            ShadowMode::Vssm => "VSSM",
        }
    }

    /// The other algorithm.
    pub fn toggled(self) -> Self {
        match self {
            ShadowMode::Pcss => ShadowMode::Vssm,
            ShadowMode::Vssm => ShadowMode::Pcss,
        }
    }
}

/// Mesh renderer owning the depth-capture and lighting pipelines and the
/// bind group layouts shared with the rest of the renderer.
pub struct MeshRenderer {
    shadow_pipeline: wgpu::RenderPipeline,
    pcss_pipeline: wgpu::RenderPipeline,
    vssm_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    object_bind_group_layout: wgpu::BindGroupLayout,
    light_bind_group_layout: wgpu::BindGroupLayout,
    shadow_light_bind_group_layout: wgpu::BindGroupLayout,
}

impl MeshRenderer {
    /// Creates the mesh pipelines.
    ///
    /// Shader module or pipeline creation failure is fatal: wgpu reports a
    /// validation error with a readable diagnostic and there is no fallback
    /// pipeline to degrade to.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shadow.wgsl").into()),
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Camera Bind Group"),
            layout: camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Per-object bind group layout (model matrix + color), shared by
        // both passes at group 1.
        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Light + moments map bind group layout (group 2 of the lighting
        // pass). Rg32Float is not filterable on the base feature set, so
        // the sampler is non-filtering.
        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Light Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: false },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                        count: None,
                    },
                ],
            });

        // Depth pass binds the same light uniform without the map (group 0).
        let shadow_light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Shadow Light Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Lighting pipelines: camera, object, light+map.
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[
                camera_bind_group_layout,
                &object_bind_group_layout,
                &light_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let lighting_pipeline = |label: &str, entry_point: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(entry_point),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None, // ground plane is visible from below
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: SAMPLE_COUNT,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let pcss_pipeline = lighting_pipeline("PCSS Pipeline", "fs_pcss");
        let vssm_pipeline = lighting_pipeline("VSSM Pipeline", "fs_vssm");

        // Depth-capture pipeline: light at group 0, object at group 1,
        // moments written to the RG target. No MSAA on the shadow map.
        let shadow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shadow Pipeline Layout"),
                bind_group_layouts: &[&shadow_light_bind_group_layout, &object_bind_group_layout],
                push_constant_ranges: &[],
            });

        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shadow_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: MOMENTS_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            shadow_pipeline,
            pcss_pipeline,
            vssm_pipeline,
            camera_bind_group,
            object_bind_group_layout,
            light_bind_group_layout,
            shadow_light_bind_group_layout,
        }
    }

    /// Per-object bind group layout (group 1 of both passes).
    pub fn object_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_bind_group_layout
    }

    /// Light + moments map bind group layout (group 2 of the lighting pass).
    pub fn light_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.light_bind_group_layout
    }

    /// Light-only bind group layout (group 0 of the depth pass).
    pub fn shadow_light_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.shadow_light_bind_group_layout
    }

    /// Activate the depth-capture pipeline and its shared bind groups.
    ///
    /// Per-object state is bound by the scene draw that follows.
    pub fn begin_shadow(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        shadow_light_bind_group: &wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.shadow_pipeline);
        render_pass.set_bind_group(0, shadow_light_bind_group, &[]);
    }

    /// Activate the lighting pipeline for `mode` and its shared bind groups.
    pub fn begin_main(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        mode: ShadowMode,
        light_bind_group: &wgpu::BindGroup,
    ) {
        let pipeline = match mode {
            ShadowMode::Pcss => &self.pcss_pipeline,
            ShadowMode::Vssm => &self.vssm_pipeline,
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(2, light_bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_mode_toggle() {
        assert_eq!(ShadowMode::Pcss.toggled(), ShadowMode::Vssm);
        assert_eq!(ShadowMode::Vssm.toggled(), ShadowMode::Pcss);
        assert_eq!(ShadowMode::default(), ShadowMode::Pcss);
    }

    #[test]
    fn test_shadow_mode_labels() {
        assert_eq!(ShadowMode::Pcss.label(), "PCSS");
        assert_eq!(ShadowMode::Vssm.label(), "VSSM");
    }
}
