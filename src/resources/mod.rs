//! Model loading: the scene-to-renderable-mesh conversion pipeline.
//!
//! This module contains all logic for converting an imported scene graph
//! into renderer-ready meshes: the traversal, vertex/index extraction and
//! the model-wide texture deduplication. The importer backends live in
//! `obj` and `gltf`, the WGPU texture loader in `texture`, tangent
//! generation in `mesh`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::data_structures::model::{
    LoadedModel, ModelVertex, RenderableMesh, ResolvedTexture, TextureKind,
};
use crate::data_structures::scene::{
    ImportedMaterial, ImportedMesh, ImportedScene, MaterialSlot,
};
use crate::error::{DecodeError, ImportError};

pub mod gltf;
pub mod mesh;
pub mod obj;
pub mod texture;

/// Post-processing directives passed to a [`SceneImporter`].
#[derive(Clone, Copy, Debug)]
pub struct ImportFlags {
    /// Split every polygon into triangles so faces always carry 3 indices.
    pub triangulate: bool,
    /// Flip the V texture-coordinate axis during import.
    pub flip_v: bool,
    /// Guarantee tangent/bitangent arrays on every vertex, computing them
    /// from UVs where the source format lacks them.
    pub compute_tangents: bool,
}

impl Default for ImportFlags {
    fn default() -> Self {
        Self {
            triangulate: true,
            flip_v: true,
            compute_tangents: true,
        }
    }
}

/// Parses a model file into an [`ImportedScene`].
///
/// On success the scene's node tree must be fully populated, faces must be
/// triples when `flags.triangulate` is set, and tangent/bitangent arrays
/// must be present on every vertex when `flags.compute_tangents` is set.
pub trait SceneImporter {
    fn parse(&self, path: &Path, flags: ImportFlags) -> Result<ImportedScene, ImportError>;
}

/// Decodes an image file and uploads it as a GPU texture handle.
///
/// The handle type is up to the implementation; see
/// [`WgpuTextureLoader`](texture::WgpuTextureLoader) for the WGPU-backed one.
pub trait TextureUpload {
    type Texture;

    fn decode_and_upload(&mut self, path: &Path) -> Result<Self::Texture, DecodeError>;
}

/// Maximum node depth the traversal accepts before the scene is rejected.
///
/// Hand-authored scenes are a few levels deep; a chain anywhere near this
/// limit means a malformed or hostile file, so it becomes an
/// [`ImportError::DepthExceeded`] instead of unbounded stack growth.
pub const MAX_NODE_DEPTH: usize = 256;

/// Fixed resolution order for material texture slots, including the
/// height-slot/ambient-slot relabeling (see [`MaterialSlot`]).
const SLOT_ORDER: [(MaterialSlot, TextureKind); 4] = [
    (MaterialSlot::Diffuse, TextureKind::Diffuse),
    (MaterialSlot::Specular, TextureKind::Specular),
    (MaterialSlot::Height, TextureKind::Normal),
    (MaterialSlot::Ambient, TextureKind::Height),
];

/// Load a model file into a [`LoadedModel`].
///
/// The importer is invoked with triangulation, V-flip and tangent
/// computation enabled, and the resulting scene graph is walked in pre-order
/// (a node's meshes before its children, siblings in array order). Each
/// imported mesh becomes one [`RenderableMesh`]; textures are decoded at
/// most once per distinct source path across the whole model.
///
/// `gamma_correction` is stored on the result for the renderer and not
/// otherwise interpreted.
///
/// Fails with [`ImportError`] when the importer rejects the file, flags the
/// scene as incomplete, or produces no root node; this is the only top-level
/// failure mode. A texture that fails to decode is logged and skipped, and
/// the mesh keeps whatever textures did resolve — callers must treat empty
/// texture slots as expected and supply a fallback at render time.
pub fn load_model<I, U>(
    path: &str,
    gamma_correction: bool,
    importer: &I,
    textures: &mut U,
) -> Result<LoadedModel<U::Texture>, ImportError>
where
    I: SceneImporter,
    U: TextureUpload,
{
    let scene = importer.parse(Path::new(path), ImportFlags::default())?;
    if scene.incomplete {
        return Err(ImportError::IncompleteScene {
            path: PathBuf::from(path),
        });
    }
    let root = scene.root.as_ref().ok_or_else(|| ImportError::MissingRoot {
        path: PathBuf::from(path),
    })?;

    // Everything before the last path separator; texture references resolve
    // relative to it. Empty when the path has no separator.
    let directory = Path::new(path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut model = LoadedModel {
        meshes: Vec::new(),
        loaded_textures: HashMap::new(),
        directory,
        gamma_correction,
    };

    // Explicit worklist instead of recursion so a pathological node chain
    // cannot blow the call stack. Children are pushed in reverse, keeping
    // the pop order pre-order with siblings in array order.
    let mut stack = vec![(root, 1usize)];
    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_NODE_DEPTH {
            return Err(ImportError::DepthExceeded {
                limit: MAX_NODE_DEPTH,
            });
        }
        for &mesh_index in &node.mesh_indices {
            let Some(mesh) = scene.meshes.get(mesh_index) else {
                log::warn!(
                    "node `{}` references mesh {mesh_index} but the scene only has {}",
                    node.name,
                    scene.meshes.len()
                );
                continue;
            };
            let converted = convert_mesh(
                mesh,
                &scene,
                &mut model.loaded_textures,
                &model.directory,
                textures,
            );
            model.meshes.push(converted);
        }
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    Ok(model)
}

/// Convert one imported mesh into its renderer-ready form.
fn convert_mesh<U: TextureUpload>(
    mesh: &ImportedMesh,
    scene: &ImportedScene,
    cache: &mut HashMap<String, ResolvedTexture<U::Texture>>,
    directory: &Path,
    loader: &mut U,
) -> RenderableMesh<U::Texture> {
    let mut vertices = Vec::with_capacity(mesh.vertex_count());
    for i in 0..mesh.vertex_count() {
        vertices.push(ModelVertex {
            position: mesh.positions[i],
            // First texture-coordinate channel, or the explicit (0,0) default.
            tex_coords: mesh
                .tex_coords
                .as_ref()
                .and_then(|uv| uv.get(i).copied())
                .unwrap_or([0.0, 0.0]),
            normal: mesh.normals.get(i).copied().unwrap_or_default(),
            tangent: mesh.tangents.get(i).copied().unwrap_or_default(),
            bitangent: mesh.bitangents.get(i).copied().unwrap_or_default(),
        });
    }

    let mut indices = Vec::with_capacity(mesh.faces.len() * 3);
    for face in &mesh.faces {
        indices.extend_from_slice(face);
    }

    let mut textures = Vec::new();
    if let Some(material_index) = mesh.material {
        if let Some(material) = scene.materials.get(material_index) {
            for (slot, kind) in SLOT_ORDER {
                load_material_textures(material, slot, kind, cache, directory, loader, &mut textures);
            }
        } else {
            log::warn!(
                "mesh `{}` references material {material_index} but the scene only has {}",
                mesh.name,
                scene.materials.len()
            );
        }
    }

    RenderableMesh {
        name: mesh.name.clone(),
        vertices,
        indices,
        textures,
    }
}

/// Resolve every texture a material declares under one slot, reusing cached
/// entries by exact path string.
///
/// The raw reference string is the only dedup key; `./brick.png` and
/// `brick.png` load twice. A cache hit reuses the existing handle together
/// with the label it was first resolved under. A failed decode is logged and
/// the reference dropped.
fn load_material_textures<U: TextureUpload>(
    material: &ImportedMaterial,
    slot: MaterialSlot,
    kind: TextureKind,
    cache: &mut HashMap<String, ResolvedTexture<U::Texture>>,
    directory: &Path,
    loader: &mut U,
    out: &mut Vec<ResolvedTexture<U::Texture>>,
) {
    for path in material.texture_paths(slot) {
        if let Some(existing) = cache.get(path) {
            out.push(existing.clone());
            continue;
        }
        match loader.decode_and_upload(&directory.join(path)) {
            Ok(handle) => {
                let resolved = ResolvedTexture {
                    texture: std::sync::Arc::new(handle),
                    kind,
                    path: path.clone(),
                };
                cache.insert(path.clone(), resolved.clone());
                out.push(resolved);
            }
            Err(e) => {
                log::warn!(
                    "skipping {} texture `{path}` of material `{}`: {e}",
                    kind.label(),
                    material.name
                );
            }
        }
    }
}
