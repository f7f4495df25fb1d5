//! Importer-facing scene representation.
//!
//! A [`SceneImporter`](crate::resources::SceneImporter) parses a model file
//! into this format; the conversion pipeline in [`crate::resources`] only
//! ever reads it. The shapes mirror what common importers hand out: a node
//! tree referencing a flat mesh array, meshes referencing a flat material
//! array, and materials holding texture file paths per semantic slot.

/// An imported scene: flat mesh/material arrays plus the node tree.
///
/// `root` is optional and `incomplete` can be set because importers report
/// both conditions for broken files; the pipeline converts either into an
/// [`ImportError`](crate::error::ImportError) before touching any mesh.
#[derive(Clone, Debug, Default)]
pub struct ImportedScene {
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
    pub root: Option<ImportedNode>,
    pub incomplete: bool,
}

/// A node in the imported scene graph.
///
/// Forms a tree (the import formats don't allow cycles). `mesh_indices`
/// point into [`ImportedScene::meshes`].
#[derive(Clone, Debug, Default)]
pub struct ImportedNode {
    pub name: String,
    pub mesh_indices: Vec<usize>,
    pub children: Vec<ImportedNode>,
}

/// One imported mesh: per-vertex attribute arrays plus triangular faces.
///
/// All attribute arrays are indexed by the same vertex index. `tex_coords`
/// holds the first texture-coordinate channel only and is `None` when the
/// source has none. Faces are index triples by construction; the triangulate
/// import directive guarantees importers never have to split polygons here.
#[derive(Clone, Debug, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub tangents: Vec<[f32; 3]>,
    pub bitangents: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
    /// Index into [`ImportedScene::materials`], if the mesh has a material.
    pub material: Option<usize>,
}

impl ImportedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Texture semantic slots as importers declare them.
///
/// These are the *source* slots. The pipeline maps them onto
/// [`TextureKind`](crate::data_structures::model::TextureKind) labels, with
/// `Height` becoming `texture_normal` and `Ambient` becoming
/// `texture_height` — OBJ-style assets store normal maps in the height slot
/// and height maps in the ambient slot, and that convention is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Diffuse,
    Specular,
    Height,
    Ambient,
}

/// Texture file-path references grouped by semantic slot.
///
/// Paths are relative to the model file's directory.
#[derive(Clone, Debug, Default)]
pub struct ImportedMaterial {
    pub name: String,
    pub diffuse: Vec<String>,
    pub specular: Vec<String>,
    pub height: Vec<String>,
    pub ambient: Vec<String>,
}

impl ImportedMaterial {
    /// The texture paths this material declares under `slot`, in declaration
    /// order.
    pub fn texture_paths(&self, slot: MaterialSlot) -> &[String] {
        match slot {
            MaterialSlot::Diffuse => &self.diffuse,
            MaterialSlot::Specular => &self.specular,
            MaterialSlot::Height => &self.height,
            MaterialSlot::Ambient => &self.ambient,
        }
    }
}
