//! glTF 2.0 scene importer backed by the `gltf` crate.

use std::ops::Range;
use std::path::Path;

use cgmath::Vector3;

use crate::data_structures::scene::{
    ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene,
};
use crate::error::ImportError;
use crate::resources::mesh::compute_tangents;
use crate::resources::{ImportFlags, MAX_NODE_DEPTH, SceneImporter};

/// [`SceneImporter`] for glTF/glb files.
///
/// Only buffers are resolved up front; images are never decoded here — the
/// conversion pipeline's texture cache is keyed by file path, so all this
/// importer extracts from a texture reference is its URI. Embedded
/// buffer-view images (common in glb) carry no path and are skipped with a
/// warning.
///
/// glTF meshes hold one or more primitives; each primitive becomes one
/// [`ImportedMesh`], and a node referencing the glTF mesh references the
/// whole run of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct GltfImporter;

impl SceneImporter for GltfImporter {
    fn parse(&self, path: &Path, flags: ImportFlags) -> Result<ImportedScene, ImportError> {
        let gltf::Gltf { document, blob } =
            gltf::Gltf::open(path).map_err(|e| ImportError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob).map_err(|e| {
            ImportError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let materials = document.materials().map(convert_material).collect();

        // Flatten primitives into the mesh array, remembering which run of
        // converted meshes each glTF mesh turned into.
        let mut meshes = Vec::new();
        let mut mesh_ranges: Vec<Range<usize>> = Vec::new();
        for mesh in document.meshes() {
            let start = meshes.len();
            for primitive in mesh.primitives() {
                if let Some(converted) = convert_primitive(&mesh, &primitive, &buffers, flags) {
                    meshes.push(converted);
                }
            }
            mesh_ranges.push(start..meshes.len());
        }

        let scene = document.default_scene().or_else(|| document.scenes().next());
        let root = match scene {
            Some(scene) => {
                let roots: Vec<ImportedNode> = scene
                    .nodes()
                    .map(|node| build_node(node, &mesh_ranges, 1))
                    .collect::<Result<_, _>>()?;
                if roots.len() == 1 {
                    roots.into_iter().next()
                } else {
                    // Several scene roots hang off one synthetic container.
                    Some(ImportedNode {
                        name: scene.name().unwrap_or("scene").to_string(),
                        mesh_indices: Vec::new(),
                        children: roots,
                    })
                }
            }
            None => None,
        };

        Ok(ImportedScene {
            meshes,
            materials,
            root,
            incomplete: false,
        })
    }
}

fn build_node(
    node: gltf::Node,
    mesh_ranges: &[Range<usize>],
    depth: usize,
) -> Result<ImportedNode, ImportError> {
    if depth > MAX_NODE_DEPTH {
        return Err(ImportError::DepthExceeded {
            limit: MAX_NODE_DEPTH,
        });
    }
    let mesh_indices = node
        .mesh()
        .and_then(|mesh| mesh_ranges.get(mesh.index()).cloned())
        .map(|range| range.collect())
        .unwrap_or_default();
    let children = node
        .children()
        .map(|child| build_node(child, mesh_ranges, depth + 1))
        .collect::<Result<_, _>>()?;
    Ok(ImportedNode {
        name: node.name().unwrap_or("node").to_string(),
        mesh_indices,
        children,
    })
}

fn convert_material(material: gltf::Material) -> ImportedMaterial {
    let pbr = material.pbr_metallic_roughness();
    ImportedMaterial {
        name: material.name().unwrap_or("material").to_string(),
        diffuse: pbr
            .base_color_texture()
            .and_then(|info| image_uri(info.texture()))
            .into_iter()
            .collect(),
        specular: pbr
            .metallic_roughness_texture()
            .and_then(|info| image_uri(info.texture()))
            .into_iter()
            .collect(),
        // Normal maps travel in the height slot; the pipeline relabels them.
        height: material
            .normal_texture()
            .and_then(|info| image_uri(info.texture()))
            .into_iter()
            .collect(),
        ambient: material
            .occlusion_texture()
            .and_then(|info| image_uri(info.texture()))
            .into_iter()
            .collect(),
    }
}

/// The file path behind a texture reference, if it has one.
fn image_uri(texture: gltf::Texture) -> Option<String> {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => Some(uri.to_string()),
        gltf::image::Source::Uri { .. } => {
            log::warn!("skipping data-URI image, the texture cache is path-keyed");
            None
        }
        gltf::image::Source::View { .. } => {
            log::warn!("skipping embedded buffer-view image, the texture cache is path-keyed");
            None
        }
    }
}

fn convert_primitive(
    mesh: &gltf::Mesh,
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    flags: ImportFlags,
) -> Option<ImportedMesh> {
    let name = format!(
        "{}.{}",
        mesh.name().unwrap_or("mesh"),
        primitive.index()
    );

    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::warn!(
            "skipping primitive `{name}`: mode {:?} is not triangles",
            primitive.mode()
        );
        return None;
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let positions: Vec<[f32; 3]> = match reader.read_positions() {
        Some(iter) => iter.collect(),
        None => {
            log::warn!("skipping primitive `{name}`: no positions");
            return None;
        }
    };
    let vertex_count = positions.len();

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|iter| iter.collect())
        .unwrap_or_else(|| vec![[0.0; 3]; vertex_count]);

    let tex_coords: Option<Vec<[f32; 2]>> = reader.read_tex_coords(0).map(|uvs| {
        uvs.into_f32()
            .map(|[u, v]| if flags.flip_v { [u, 1.0 - v] } else { [u, v] })
            .collect()
    });

    // Non-indexed primitives draw vertices in order.
    let indices: Vec<u32> = reader
        .read_indices()
        .map(|read| read.into_u32().collect())
        .unwrap_or_else(|| (0..vertex_count as u32).collect());
    let faces: Vec<[u32; 3]> = indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let (tangents, bitangents) = match reader.read_tangents() {
        Some(iter) => {
            // glTF tangents are vec4; w carries the bitangent's handedness.
            let mut tangents = Vec::with_capacity(vertex_count);
            let mut bitangents = Vec::with_capacity(vertex_count);
            for (i, tangent) in iter.enumerate() {
                let t = Vector3::new(tangent[0], tangent[1], tangent[2]);
                let normal: Vector3<f32> =
                    normals.get(i).copied().unwrap_or([0.0; 3]).into();
                tangents.push(t.into());
                bitangents.push((normal.cross(t) * tangent[3]).into());
            }
            tangents.resize(vertex_count, [0.0; 3]);
            bitangents.resize(vertex_count, [0.0; 3]);
            (tangents, bitangents)
        }
        None => match (&tex_coords, flags.compute_tangents) {
            (Some(uvs), true) => compute_tangents(&positions, uvs, &faces),
            _ => (vec![[0.0; 3]; vertex_count], vec![[0.0; 3]; vertex_count]),
        },
    };

    Some(ImportedMesh {
        name,
        positions,
        normals,
        tex_coords,
        tangents,
        bitangents,
        faces,
        material: primitive.material().index(),
    })
}
