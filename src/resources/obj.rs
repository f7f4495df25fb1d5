//! Wavefront OBJ scene importer backed by `tobj`.

use std::path::Path;

use crate::data_structures::scene::{
    ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene,
};
use crate::error::ImportError;
use crate::resources::mesh::compute_tangents;
use crate::resources::{ImportFlags, SceneImporter};

/// [`SceneImporter`] for OBJ files.
///
/// OBJ has no node hierarchy, so every model in the file hangs off one
/// synthetic root node, in file order. The mtl texture maps fill the
/// importer slots the conventional way: `map_Kd` → diffuse, `map_Ks` →
/// specular, `map_Bump`/`bump` → height (normal maps travel in the height
/// slot for OBJ assets), `map_Ka` → ambient.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjImporter;

impl SceneImporter for ObjImporter {
    fn parse(&self, path: &Path, flags: ImportFlags) -> Result<ImportedScene, ImportError> {
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: flags.triangulate,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| ImportError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // A broken or absent mtl only costs the materials, not the geometry.
        let materials = match materials {
            Ok(materials) => materials.into_iter().map(convert_material).collect(),
            Err(e) => {
                log::warn!("could not load materials for `{}`: {e}", path.display());
                Vec::new()
            }
        };

        let meshes: Vec<ImportedMesh> = models
            .into_iter()
            .map(|model| convert_model(model, flags))
            .collect();

        let root = ImportedNode {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mesh_indices: (0..meshes.len()).collect(),
            children: Vec::new(),
        };

        Ok(ImportedScene {
            meshes,
            materials,
            root: Some(root),
            incomplete: false,
        })
    }
}

fn convert_material(material: tobj::Material) -> ImportedMaterial {
    ImportedMaterial {
        name: material.name,
        diffuse: material.diffuse_texture.into_iter().collect(),
        specular: material.specular_texture.into_iter().collect(),
        height: material.normal_texture.into_iter().collect(),
        ambient: material.ambient_texture.into_iter().collect(),
    }
}

fn convert_model(model: tobj::Model, flags: ImportFlags) -> ImportedMesh {
    let mesh = model.mesh;
    let vertex_count = mesh.positions.len() / 3;

    let positions: Vec<[f32; 3]> = (0..vertex_count)
        .map(|i| {
            [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ]
        })
        .collect();

    // Normals may be absent or shorter than the vertex list in sloppy
    // exports; missing entries become zero vectors.
    let normals: Vec<[f32; 3]> = (0..vertex_count)
        .map(|i| {
            [
                mesh.normals.get(i * 3).copied().unwrap_or(0.0),
                mesh.normals.get(i * 3 + 1).copied().unwrap_or(0.0),
                mesh.normals.get(i * 3 + 2).copied().unwrap_or(0.0),
            ]
        })
        .collect();

    let tex_coords: Option<Vec<[f32; 2]>> = if mesh.texcoords.is_empty() {
        None
    } else {
        Some(
            (0..vertex_count)
                .map(|i| {
                    let u = mesh.texcoords.get(i * 2).copied().unwrap_or(0.0);
                    let v = mesh.texcoords.get(i * 2 + 1).copied().unwrap_or(0.0);
                    if flags.flip_v { [u, 1.0 - v] } else { [u, v] }
                })
                .collect(),
        )
    };

    let faces: Vec<[u32; 3]> = mesh
        .indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let (tangents, bitangents) = match (&tex_coords, flags.compute_tangents) {
        (Some(uvs), true) => compute_tangents(&positions, uvs, &faces),
        _ => (
            vec![[0.0; 3]; vertex_count],
            vec![[0.0; 3]; vertex_count],
        ),
    };

    ImportedMesh {
        name: model.name,
        positions,
        normals,
        tex_coords,
        tangents,
        bitangents,
        faces,
        material: mesh.material_id,
    }
}
