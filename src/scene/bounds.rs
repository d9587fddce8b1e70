use super::node::{NodeId, SceneGraph};
use nalgebra_glm as glm;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: glm::Vec3,
    pub max: glm::Vec3,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: glm::vec3(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: glm::vec3(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand(&mut self, p: &glm::Vec3) {
        self.min = glm::min2(&self.min, p);
        self.max = glm::max2(&self.max, p);
    }

    pub fn center(&self) -> glm::Vec3 {
        if self.is_empty() {
            return glm::vec3(0.0, 0.0, 0.0);
        }
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> glm::Vec3 {
        if self.is_empty() {
            return glm::vec3(0.0, 0.0, 0.0);
        }
        self.max - self.min
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f32 {
        glm::length(&self.size())
    }

    /// World-space bounds of every mesh vertex under `root`.
    /// World matrices must be current.
    pub fn from_subtree(graph: &SceneGraph, root: NodeId) -> Self {
        let mut bounds = Self::empty();
        for (node, mesh) in graph.mesh_instances(root) {
            let world = graph.world_matrix(node);
            for p in &graph.meshes[mesh].positions {
                let v = world * glm::vec4(p[0], p[1], p[2], 1.0);
                bounds.expand(&glm::vec3(v.x, v.y, v.z));
            }
        }
        bounds
    }
}
