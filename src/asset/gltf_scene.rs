use crate::animation::{AnimationClip, Interpolation, Track, TrackValues};
use crate::asset::types::{AssetNode, CpuMesh, SceneAsset};
use crate::error::ViewerError;
use gltf::animation::util::ReadOutputs;
use gltf::mesh::util::ReadIndices;
use nalgebra_glm as glm;

/// Decode a `.glb` / `.gltf` byte slice into a [`SceneAsset`]
pub fn parse_scene(bytes: &[u8], name: &str) -> Result<SceneAsset, ViewerError> {
    let (doc, buffers, _images) = gltf::import_slice(bytes)?;

    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or_else(|| ViewerError::EmptyAsset(name.to_string()))?;

    // One CpuMesh per primitive; gltf mesh index -> primitive mesh indices
    let mut meshes: Vec<CpuMesh> = Vec::new();
    let mut primitives_of: Vec<Vec<usize>> = Vec::new();
    for mesh in doc.meshes() {
        let mut ids = Vec::new();
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U32(it)) => it.collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals = compute_vertex_normals(&positions, &indices);
            let base_color = prim
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            ids.push(meshes.len());
            meshes.push(CpuMesh {
                name: mesh.name().unwrap_or("mesh").to_string(),
                positions,
                normals,
                indices,
                base_color,
            });
        }
        primitives_of.push(ids);
    }

    let nodes = doc
        .nodes()
        .map(|n| {
            let (translation, rotation, scale) = n.transform().decomposed();
            AssetNode {
                name: n.name().unwrap_or("node").to_string(),
                translation,
                rotation,
                scale,
                children: n.children().map(|c| c.index()).collect(),
                meshes: n
                    .mesh()
                    .map(|m| primitives_of[m.index()].clone())
                    .unwrap_or_default(),
            }
        })
        .collect();

    let mut clips = Vec::new();
    for (index, anim) in doc.animations().enumerate() {
        let mut tracks = Vec::new();
        for channel in anim.channels() {
            let reader = channel.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(inputs) = reader.read_inputs() else {
                continue;
            };
            let times: Vec<f32> = inputs.collect();
            let Some(outputs) = reader.read_outputs() else {
                continue;
            };
            let cubic = channel.sampler().interpolation() == gltf::animation::Interpolation::CubicSpline;
            let values = match outputs {
                ReadOutputs::Translations(it) => {
                    TrackValues::Translation(keyframe_values(it.map(|v| glm::make_vec3(&v)), cubic))
                }
                ReadOutputs::Rotations(it) => TrackValues::Rotation(keyframe_values(
                    it.into_f32().map(|[x, y, z, w]| glm::quat_normalize(&glm::quat(x, y, z, w))),
                    cubic,
                )),
                ReadOutputs::Scales(it) => {
                    TrackValues::Scale(keyframe_values(it.map(|v| glm::make_vec3(&v)), cubic))
                }
                ReadOutputs::MorphTargetWeights(_) => continue,
            };
            let interpolation = match channel.sampler().interpolation() {
                gltf::animation::Interpolation::Step => Interpolation::Step,
                _ => Interpolation::Linear,
            };
            tracks.push(Track {
                node: channel.target().node().index(),
                times,
                values,
                interpolation,
            });
        }
        let clip_name = anim
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("clip{index}"));
        clips.push(AnimationClip::new(&clip_name, tracks));
    }

    Ok(SceneAsset {
        name: name.to_string(),
        nodes,
        roots: scene.nodes().map(|n| n.index()).collect(),
        meshes,
        clips,
    })
}

/// Cubic-spline outputs come as (in-tangent, value, out-tangent) triples;
/// keep only the values and play them back linearly.
fn keyframe_values<T>(it: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        it.skip(1).step_by(3).collect()
    } else {
        it.collect()
    }
}

/// Smooth per-vertex normals, each face weighted by its area
pub fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![glm::vec3(0.0, 0.0, 0.0); positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = glm::make_vec3(&positions[a]);
        let pb = glm::make_vec3(&positions[b]);
        let pc = glm::make_vec3(&positions[c]);
        let face = glm::cross(&(pc - pb), &(pa - pb));
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }
    sums.into_iter()
        .map(|n| {
            let len = glm::length(&n);
            if len > 0.0 {
                let n = n / len;
                [n.x, n.y, n.z]
            } else {
                [0.0, 0.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_of_ccw_triangle_face_positive_z() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn shared_vertex_normal_is_averaged() {
        // Two faces folded 90 degrees along the x axis
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
        ];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2, 0, 1, 3]);
        let shared = normals[0];
        let expected = 1.0 / 2.0_f32.sqrt();
        assert!((shared[1] - expected).abs() < 1e-5);
        assert!((shared[2] - expected).abs() < 1e-5);
    }

    #[test]
    fn cubic_outputs_keep_middle_of_each_triple() {
        let values = keyframe_values([0, 1, 2, 3, 4, 5].into_iter(), true);
        assert_eq!(values, vec![1, 4]);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(parse_scene(b"not a model", "junk").is_err());
    }
}
