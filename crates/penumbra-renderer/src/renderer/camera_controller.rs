//! Camera GPU state management.

use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::config::CameraConfig;

/// Owns the camera and its uniform buffer.
pub struct CameraController {
    camera: Camera,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraController {
    /// Create the camera from its startup configuration.
    pub fn new(device: &wgpu::Device, width: u32, height: u32, config: &CameraConfig) -> Self {
        let aspect = width as f32 / height as f32;
        let mut camera = Camera::new(config.position.into(), config.target.into(), aspect);
        camera.fov_degrees = config.fov_degrees;
        camera.near = config.near_plane;
        camera.far = config.far_plane;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        Self {
            camera,
            buffer,
            bind_group_layout,
        }
    }

    /// Write the current camera state to the GPU.
    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.camera.uniform()]));
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn update_aspect(&mut self, width: u32, height: u32) {
        self.camera.update_aspect(width, height);
    }

    /// Get a reference to the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get a mutable reference to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Camera bind group layout (group 0 of the lighting pass).
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Camera uniform buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
