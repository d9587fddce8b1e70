use crate::animation::AnimationClip;

/// Triangle mesh kept on the CPU for upload and picking
#[derive(Debug, Clone)]
pub struct CpuMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

impl CpuMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles as position triples; any with an out-of-range index are skipped
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }
}

#[derive(Debug, Clone)]
pub struct AssetNode {
    pub name: String,
    pub translation: [f32; 3],
    /// Quaternion, xyzw order
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub children: Vec<usize>,
    pub meshes: Vec<usize>,
}

impl Default for AssetNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
            children: Vec::new(),
            meshes: Vec::new(),
        }
    }
}

/// Everything the viewer needs from a decoded glTF file
#[derive(Debug, Clone, Default)]
pub struct SceneAsset {
    pub name: String,
    pub nodes: Vec<AssetNode>,
    pub roots: Vec<usize>,
    pub meshes: Vec<CpuMesh>,
    pub clips: Vec<AnimationClip>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadProgress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Percentage for the progress log; an unknown total counts as complete
    pub fn percent(&self) -> f64 {
        match self.total {
            Some(total) if total > 0 => self.loaded as f64 / total as f64 * 100.0,
            _ => 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_skip_indices_past_the_vertex_list() {
        let mesh = CpuMesh {
            name: "quad".into(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            normals: Vec::new(),
            indices: vec![0, 1, 9, 0, 2, 3],
            base_color: [1.0; 4],
        };
        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles, vec![[[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]]);
    }
}
