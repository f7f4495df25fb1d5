use std::path::Path;

use meshport::{GltfImporter, ImportError, ImportFlags, SceneImporter, load_model};

use crate::common::test_utils::{CountingTextureLoader, init_logs};

mod common;

const FIXTURE: &str = "tests/fixtures/triangle.gltf";

#[test]
fn parses_triangle_gltf() {
    init_logs();
    let scene = GltfImporter
        .parse(Path::new(FIXTURE), ImportFlags::default())
        .unwrap();

    assert_eq!(scene.meshes.len(), 1);
    let mesh = &scene.meshes[0];
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    assert_eq!(
        mesh.positions,
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
    );
    // V is flipped on import.
    assert_eq!(
        mesh.tex_coords.as_deref(),
        Some(&[[0.0, 1.0], [1.0, 1.0], [0.0, 0.0]][..])
    );
    assert_eq!(mesh.material, Some(0));
    // No tangent accessor in the fixture, so they are computed from UVs.
    assert_eq!(mesh.tangents, vec![[1.0, 0.0, 0.0]; 3]);

    // The base-color texture URI lands in the diffuse slot.
    assert_eq!(scene.materials.len(), 1);
    assert_eq!(scene.materials[0].diffuse, vec!["brick.png".to_string()]);

    let root = scene.root.as_ref().unwrap();
    assert_eq!(root.name, "tri");
    assert_eq!(root.mesh_indices, vec![0]);
}

#[test]
fn gltf_loads_end_to_end() {
    init_logs();
    let mut textures = CountingTextureLoader::new();

    let model = load_model(FIXTURE, false, &GltfImporter, &mut textures).unwrap();

    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.meshes[0].vertices.len(), 3);
    assert_eq!(model.meshes[0].indices, vec![0, 1, 2]);
    assert_eq!(model.meshes[0].textures.len(), 1);
    assert_eq!(model.meshes[0].textures[0].kind.label(), "texture_diffuse");
    assert_eq!(model.loaded_textures.len(), 1);
    assert_eq!(
        textures.decoded,
        vec![Path::new("tests/fixtures").join("brick.png").display().to_string()]
    );
}

#[test]
fn missing_gltf_is_an_import_error() {
    init_logs();
    let err = GltfImporter
        .parse(Path::new("tests/fixtures/no_such_model.gltf"), ImportFlags::default())
        .err()
        .expect("missing file must fail to parse");
    assert!(matches!(err, ImportError::Parse { .. }), "{err}");
}
