//! meshport
//!
//! A small library for turning imported 3D scene graphs into renderer-ready
//! meshes. One call — [`load_model`] — parses a model file through a
//! pluggable [`SceneImporter`], walks the resulting node tree in pre-order,
//! flattens every mesh into vertex/index lists and resolves its material's
//! textures through a pluggable [`TextureUpload`] loader, decoding each
//! distinct texture file at most once per model.
//!
//! High-level modules
//! - `data_structures`: scene-side and model-side data types plus the WGPU
//!   texture wrapper
//! - `error`: the `ImportError` / `DecodeError` taxonomy
//! - `resources`: the conversion pipeline, the OBJ and glTF importer
//!   backends and the WGPU texture loader
//!
//! Rendering itself is out of scope: a renderer consumes
//! [`LoadedModel::meshes`], issuing one indexed-triangle draw per mesh with
//! its textures bound by their [`TextureKind`] label.

pub mod data_structures;
pub mod error;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use data_structures::model::{
    GpuMesh, LoadedModel, ModelVertex, RenderableMesh, ResolvedTexture, TextureKind, Vertex,
};
pub use data_structures::scene::{
    ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene, MaterialSlot,
};
pub use error::{DecodeError, ImportError};
pub use resources::{
    ImportFlags, MAX_NODE_DEPTH, SceneImporter, TextureUpload, load_model,
};
pub use resources::gltf::GltfImporter;
pub use resources::obj::ObjImporter;
pub use resources::texture::WgpuTextureLoader;
