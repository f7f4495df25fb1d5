use std::sync::Arc;

use meshport::{
    ImportedMaterial, ImportedNode, ImportedScene, TextureKind, load_model,
};

use crate::common::test_utils::{
    CountingTextureLoader, FixedSceneImporter, diffuse_material, init_logs, leaf_node,
    triangle_mesh,
};

mod common;

#[test]
fn shared_texture_path_decodes_once_and_shares_the_handle() {
    init_logs();
    // Two child nodes, each with its own mesh, both meshes on the same
    // material and texture path.
    let scene = ImportedScene {
        meshes: vec![triangle_mesh("left", Some(0)), triangle_mesh("right", Some(0))],
        materials: vec![diffuse_material("brick", "brick.png")],
        root: Some(ImportedNode {
            name: "root".to_string(),
            mesh_indices: Vec::new(),
            children: vec![leaf_node("a", vec![0]), leaf_node("b", vec![1])],
        }),
        incomplete: false,
    };
    let mut textures = CountingTextureLoader::new();

    let model = load_model("model.obj", false, &FixedSceneImporter(scene), &mut textures).unwrap();

    assert_eq!(model.meshes.len(), 2);
    assert_eq!(model.loaded_textures.len(), 1);
    assert_eq!(textures.decoded.len(), 1, "one decode for two references");
    assert!(Arc::ptr_eq(
        &model.meshes[0].textures[0].texture,
        &model.meshes[1].textures[0].texture,
    ));
}

#[test]
fn slots_resolve_in_fixed_order_with_remapped_labels() {
    init_logs();
    let material = ImportedMaterial {
        name: "full".to_string(),
        diffuse: vec!["d.png".to_string()],
        specular: vec!["s.png".to_string()],
        height: vec!["n.png".to_string()],
        ambient: vec!["h.png".to_string()],
    };
    let scene = ImportedScene {
        meshes: vec![triangle_mesh("tri", Some(0))],
        materials: vec![material],
        root: Some(leaf_node("root", vec![0])),
        incomplete: false,
    };
    let mut textures = CountingTextureLoader::new();

    let model = load_model("model.obj", false, &FixedSceneImporter(scene), &mut textures).unwrap();

    let labels: Vec<&str> = model.meshes[0]
        .textures
        .iter()
        .map(|t| t.kind.label())
        .collect();
    assert_eq!(
        labels,
        vec![
            "texture_diffuse",
            "texture_specular",
            "texture_normal",
            "texture_height"
        ]
    );
    // The height slot feeds the normal label and the ambient slot the height
    // label; the paths pin the remapping down.
    assert_eq!(model.meshes[0].textures[2].path, "n.png");
    assert_eq!(model.meshes[0].textures[3].path, "h.png");
}

#[test]
fn cache_hit_under_another_slot_keeps_the_first_label() {
    init_logs();
    let material = ImportedMaterial {
        name: "reused".to_string(),
        diffuse: vec!["shared.png".to_string()],
        specular: vec!["shared.png".to_string()],
        ..Default::default()
    };
    let scene = ImportedScene {
        meshes: vec![triangle_mesh("tri", Some(0))],
        materials: vec![material],
        root: Some(leaf_node("root", vec![0])),
        incomplete: false,
    };
    let mut textures = CountingTextureLoader::new();

    let model = load_model("model.obj", false, &FixedSceneImporter(scene), &mut textures).unwrap();

    assert_eq!(textures.decoded.len(), 1);
    assert_eq!(model.meshes[0].textures.len(), 2);
    assert_eq!(model.meshes[0].textures[0].kind, TextureKind::Diffuse);
    // The specular reference reuses the cached entry, label included.
    assert_eq!(model.meshes[0].textures[1].kind, TextureKind::Diffuse);
}

#[test]
fn decode_failure_skips_the_slot_but_the_load_succeeds() {
    init_logs();
    let material = ImportedMaterial {
        name: "partial".to_string(),
        diffuse: vec!["ok.png".to_string()],
        height: vec!["corrupt.png".to_string()],
        ..Default::default()
    };
    let scene = ImportedScene {
        meshes: vec![triangle_mesh("tri", Some(0))],
        materials: vec![material],
        root: Some(leaf_node("root", vec![0])),
        incomplete: false,
    };
    let mut textures = CountingTextureLoader::failing_on("corrupt");

    let model = load_model("model.obj", false, &FixedSceneImporter(scene), &mut textures).unwrap();

    let mesh = &model.meshes[0];
    assert_eq!(mesh.textures.len(), 1, "the failed slot is simply absent");
    assert_eq!(mesh.textures[0].path, "ok.png");
    assert_eq!(model.loaded_textures.len(), 1);
}

#[test]
fn path_strings_are_not_canonicalized() {
    init_logs();
    // `./brick.png` and `brick.png` point at the same file but the cache
    // key is the exact reference string.
    let scene = ImportedScene {
        meshes: vec![
            triangle_mesh("a", Some(0)),
            triangle_mesh("b", Some(1)),
        ],
        materials: vec![
            diffuse_material("plain", "brick.png"),
            diffuse_material("dotted", "./brick.png"),
        ],
        root: Some(leaf_node("root", vec![0, 1])),
        incomplete: false,
    };
    let mut textures = CountingTextureLoader::new();

    let model = load_model("model.obj", false, &FixedSceneImporter(scene), &mut textures).unwrap();

    assert_eq!(model.loaded_textures.len(), 2);
    assert_eq!(textures.decoded.len(), 2);
}
