#![allow(dead_code)]

use std::path::Path;

use meshport::{
    DecodeError, ImportError, ImportFlags, ImportedMaterial, ImportedMesh, ImportedNode,
    ImportedScene, SceneImporter, TextureUpload,
};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Importer that hands back a pre-built scene, ignoring the path.
pub struct FixedSceneImporter(pub ImportedScene);

impl SceneImporter for FixedSceneImporter {
    fn parse(&self, _path: &Path, _flags: ImportFlags) -> Result<ImportedScene, ImportError> {
        Ok(self.0.clone())
    }
}

/// Importer that always rejects the file with the given diagnostic.
pub struct FailingImporter(pub &'static str);

impl SceneImporter for FailingImporter {
    fn parse(&self, path: &Path, _flags: ImportFlags) -> Result<ImportedScene, ImportError> {
        Err(ImportError::Parse {
            path: path.to_path_buf(),
            message: self.0.to_string(),
        })
    }
}

/// Texture loader that returns numbered fake handles and records every
/// successful decode. Paths containing one of the `fail` fragments error
/// out like a missing/corrupt file would.
pub struct CountingTextureLoader {
    pub decoded: Vec<String>,
    pub fail: Vec<&'static str>,
    next_handle: u32,
}

impl CountingTextureLoader {
    pub fn new() -> Self {
        Self {
            decoded: Vec::new(),
            fail: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn failing_on(fragment: &'static str) -> Self {
        let mut loader = Self::new();
        loader.fail.push(fragment);
        loader
    }
}

impl TextureUpload for CountingTextureLoader {
    type Texture = u32;

    fn decode_and_upload(&mut self, path: &Path) -> Result<u32, DecodeError> {
        let display = path.display().to_string();
        if self.fail.iter().any(|fragment| display.contains(fragment)) {
            return Err(DecodeError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such texture"),
            });
        }
        self.decoded.push(display);
        let handle = self.next_handle;
        self.next_handle += 1;
        Ok(handle)
    }
}

/// A single triangle with UVs, normals and a tangent frame.
pub fn triangle_mesh(name: &str, material: Option<usize>) -> ImportedMesh {
    ImportedMesh {
        name: name.to_string(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        tex_coords: Some(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
        tangents: vec![[1.0, 0.0, 0.0]; 3],
        bitangents: vec![[0.0, 1.0, 0.0]; 3],
        faces: vec![[0, 1, 2]],
        material,
    }
}

pub fn diffuse_material(name: &str, texture_path: &str) -> ImportedMaterial {
    ImportedMaterial {
        name: name.to_string(),
        diffuse: vec![texture_path.to_string()],
        ..Default::default()
    }
}

pub fn leaf_node(name: &str, mesh_indices: Vec<usize>) -> ImportedNode {
    ImportedNode {
        name: name.to_string(),
        mesh_indices,
        children: Vec::new(),
    }
}
