//! Tangent/bitangent generation for source formats that don't carry them
//! (OBJ always, glTF sometimes). Normal mapping needs both per vertex.

use cgmath::{Vector2, Vector3};

/// Compute per-vertex tangents and bitangents from positions, UVs and the
/// triangle list.
///
/// Each triangle's tangent frame is solved from its edge/UV deltas and
/// accumulated on its three vertices, then averaged over the number of
/// triangles touching each vertex. Degenerate UV triangles and vertices no
/// triangle references contribute zero vectors.
pub fn compute_tangents(
    positions: &[[f32; 3]],
    tex_coords: &[[f32; 2]],
    faces: &[[u32; 3]],
) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    let mut tangents = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];
    let mut bitangents = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];
    let mut triangles_included = vec![0u32; positions.len()];

    for face in faces {
        let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];

        let pos0: Vector3<f32> = positions[i0].into();
        let pos1: Vector3<f32> = positions[i1].into();
        let pos2: Vector3<f32> = positions[i2].into();

        let uv0: Vector2<f32> = tex_coords[i0].into();
        let uv1: Vector2<f32> = tex_coords[i1].into();
        let uv2: Vector2<f32> = tex_coords[i2].into();

        let delta_pos1 = pos1 - pos0;
        let delta_pos2 = pos2 - pos0;
        let delta_uv1 = uv1 - uv0;
        let delta_uv2 = uv2 - uv0;

        // Solving
        //     delta_pos1 = delta_uv1.x * T + delta_uv1.y * B
        //     delta_pos2 = delta_uv2.x * T + delta_uv2.y * B
        // for T and B.
        let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
        if det.abs() <= f32::EPSILON {
            // Degenerate UV mapping, no usable tangent frame on this face.
            continue;
        }
        let r = 1.0 / det;
        let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
        // Flipped to keep right-handed normal maps working with the WGPU
        // texture coordinate system.
        let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * -r;

        for &i in &[i0, i1, i2] {
            tangents[i] += tangent;
            bitangents[i] += bitangent;
            triangles_included[i] += 1;
        }
    }

    // Average the per-face contributions.
    for (i, n) in triangles_included.into_iter().enumerate() {
        if n > 0 {
            let denom = 1.0 / n as f32;
            tangents[i] *= denom;
            bitangents[i] *= denom;
        }
    }

    (
        tangents.into_iter().map(Into::into).collect(),
        bitangents.into_iter().map(Into::into).collect(),
    )
}
