//! Scene registry of renderable objects

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use penumbra_core::MeshData;

use crate::vertex::MeshVertex;

/// Local transform of a renderable object: translation and non-uniform
/// scale. The model matrix is always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Non-uniform scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix: translate(position) * scale(scale).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale)
    }
}

/// Per-object uniform buffer data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Model transformation matrix.
    pub model: [[f32; 4]; 4],
    /// Object color (RGBA).
    pub color: [f32; 4],
}

/// A renderable object: GPU geometry plus a local transform.
///
/// The vertex and index buffers are created together from one immutable
/// vertex/index list and dropped together; the index count is fixed at
/// creation. Only the transform (and color) mutate afterwards.
pub struct SceneObject {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform: Transform,
    color: [f32; 4],
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    /// Upload mesh data and create the per-object uniform resources.
    pub fn new(
        device: &wgpu::Device,
        object_layout: &wgpu::BindGroupLayout,
        mesh: &MeshData,
        color: [f32; 4],
    ) -> Self {
        let (positions, normals, indices) = mesh;

        let vertices: Vec<MeshVertex> = positions
            .iter()
            .zip(normals.iter())
            .map(|(&position, &normal)| MeshVertex { position, normal })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let transform = Transform::default();
        let uniform = ObjectUniform {
            model: transform.model_matrix().to_cols_array_2d(),
            color,
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            transform,
            color,
            uniform_buffer,
            bind_group,
        }
    }

    /// Current transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Derived model matrix.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.model_matrix()
    }

    /// Number of indices in the geometry.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Set position and scale, rewriting the object's uniform buffer.
    pub fn set_transform(&mut self, queue: &wgpu::Queue, position: Vec3, scale: Vec3) {
        self.transform = Transform { position, scale };
        self.write_uniform(queue);
    }

    /// Set the object color, rewriting the object's uniform buffer.
    pub fn set_color(&mut self, queue: &wgpu::Queue, color: [f32; 4]) {
        self.color = color;
        self.write_uniform(queue);
    }

    fn write_uniform(&self, queue: &wgpu::Queue) {
        let uniform = ObjectUniform {
            model: self.transform.model_matrix().to_cols_array_2d(),
            color: self.color,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Bind the object's geometry and uniforms and issue the indexed draw.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Name-keyed owning store with first-writer-wins insertion.
///
/// Insertion under a present name is a deliberate no-op, not an error, so
/// setup code can register redundantly without existence checks.
pub struct NamedStore<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for NamedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NamedStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert `value` under `name` unless the name is already taken.
    pub fn add(&mut self, name: impl Into<String>, value: T) {
        self.entries.entry(name.into()).or_insert(value);
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Look up an entry by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Drop every entry. Safe to call on an empty store.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Name-keyed collection of scene objects fed to both render passes.
#[derive(Default)]
pub struct Scene {
    objects: NamedStore<SceneObject>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            objects: NamedStore::new(),
        }
    }

    /// Register an object under `name`. A second registration under the
    /// same name leaves the existing object untouched.
    pub fn add(&mut self, name: impl Into<String>, object: SceneObject) {
        self.objects.add(name, object);
    }

    /// Look up an object by name.
    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    /// Look up an object by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.get_mut(name)
    }

    /// Whether an object is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains(name)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Draw every object into the active render pass.
    ///
    /// The caller has already set the pipeline and all non-per-object bind
    /// groups; this only binds per-object state. Iteration order is
    /// unspecified; the depth test resolves occlusion.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for object in self.objects.values() {
            object.draw(render_pass);
        }
    }

    /// Destroy every object. Idempotent: clearing an empty scene is a no-op.
    pub fn clear(&mut self) {
        if !self.objects.is_empty() {
            tracing::debug!("clearing {} scene objects", self.objects.len());
        }
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut store = NamedStore::new();
        store.add("plane", 1);
        store.add("plane", 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("plane"), Some(&1));
    }

    #[test]
    fn test_add_distinct_names() {
        let mut store = NamedStore::new();
        store.add("box_0", 0);
        store.add("box_1", 1);
        assert_eq!(store.len(), 2);
        assert!(store.contains("box_0"));
        assert!(store.contains("box_1"));
    }

    #[test]
    fn test_clear_twice_is_safe() {
        let mut store = NamedStore::new();
        store.add("plane", 1);
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_model_matrix_composition() {
        let transform = Transform {
            position: Vec3::new(3.0, 0.0, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        // Local (1,0,0) scaled by (2,1,1) then translated by (3,0,0).
        let mapped = transform.model_matrix().transform_point3(Vec3::X);
        assert!((mapped - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let transform = Transform {
            position: Vec3::new(0.0, 1.0, 0.0),
            scale: Vec3::splat(10.0),
        };
        let mapped = transform.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 1.0));
        assert!((mapped - Vec3::new(10.0, 1.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(
            Transform::default().model_matrix().to_cols_array(),
            Mat4::IDENTITY.to_cols_array()
        );
    }
}
