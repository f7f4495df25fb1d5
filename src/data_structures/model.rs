//! Renderer-facing model data: vertices, meshes, resolved textures.
//!
//! A [`LoadedModel`] is the output of
//! [`load_model`](crate::resources::load_model). It owns an ordered list of
//! [`RenderableMesh`]es and the model-wide texture cache. The GPU texture
//! type is generic so the pipeline stays independent of the texture loader
//! backing it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use wgpu::util::DeviceExt;

/// Vertex types that can describe their GPU buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// A fully-resolved model vertex, flattened for GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 11]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Semantic label of a resolved texture, as the renderer binds them.
///
/// The four labels are fixed; [`label`](Self::label) yields the uniform-name
/// convention (`texture_diffuse`, `texture_specular`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureKind {
    pub fn label(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Normal => "texture_normal",
            TextureKind::Height => "texture_height",
        }
    }
}

/// A decoded and uploaded texture, shared across every mesh that references
/// its source path.
///
/// `path` is the raw reference string from the material and doubles as the
/// deduplication key in [`LoadedModel::loaded_textures`]. The handle itself
/// lives behind an [`Arc`] so it is released exactly once, when the last
/// mesh or cache entry referencing it drops.
#[derive(Debug)]
pub struct ResolvedTexture<T> {
    pub texture: Arc<T>,
    pub kind: TextureKind,
    pub path: String,
}

// Manual impl: sharing the handle must not require `T: Clone`.
impl<T> Clone for ResolvedTexture<T> {
    fn clone(&self) -> Self {
        Self {
            texture: Arc::clone(&self.texture),
            kind: self.kind,
            path: self.path.clone(),
        }
    }
}

/// One renderer-ready mesh: flattened vertices, triangle indices and the
/// textures that apply to it.
///
/// `indices` holds three entries per triangle, in face order. Immutable once
/// built.
#[derive(Clone, Debug)]
pub struct RenderableMesh<T> {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub textures: Vec<ResolvedTexture<T>>,
}

impl<T> RenderableMesh<T> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Upload the vertex and index data into GPU buffers.
    ///
    /// This is the handoff point to the renderer, which issues one indexed
    /// draw per mesh with the mesh's textures bound by their
    /// [`TextureKind::label`].
    pub fn to_gpu(&self, device: &wgpu::Device) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        GpuMesh {
            vertex_buffer,
            index_buffer,
            num_elements: self.indices.len() as u32,
        }
    }
}

/// GPU-side buffers for one mesh.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

/// A fully-loaded model: meshes in traversal order plus the texture cache.
#[derive(Clone, Debug)]
pub struct LoadedModel<T> {
    pub meshes: Vec<RenderableMesh<T>>,
    /// Model-wide texture cache, keyed by the raw source path string. At most
    /// one entry per distinct path per load.
    pub loaded_textures: HashMap<String, ResolvedTexture<T>>,
    /// Directory the model file was loaded from; texture references resolve
    /// relative to it.
    pub directory: PathBuf,
    /// Stored for the renderer's gamma handling; the pipeline itself does not
    /// interpret it.
    pub gamma_correction: bool,
}
