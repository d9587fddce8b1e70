use super::node::{NodeId, SceneGraph};
use nalgebra_glm as glm;

const EPSILON: f32 = 1e-7;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: glm::Vec3,
    pub direction: glm::Vec3,
}

impl Ray {
    pub fn new(origin: glm::Vec3, direction: glm::Vec3) -> Self {
        Self {
            origin,
            direction: glm::normalize(&direction),
        }
    }

    /// Ray through normalized device coordinates (x right, y up, both in [-1, 1])
    /// for a projection with a [0, 1] depth range.
    pub fn from_ndc(ndc: glm::Vec2, inverse_view_proj: &glm::Mat4) -> Self {
        let unproject = |z: f32| {
            let v = inverse_view_proj * glm::vec4(ndc.x, ndc.y, z, 1.0);
            glm::vec3(v.x / v.w, v.y / v.w, v.z / v.w)
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        Self::new(near, far - near)
    }

    /// Möller–Trumbore intersection; both faces count as hits
    pub fn intersect_triangle(&self, a: &glm::Vec3, b: &glm::Vec3, c: &glm::Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let h = glm::cross(&self.direction, &edge2);
        let det = glm::dot(&edge1, &h);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = inv_det * glm::dot(&s, &h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = glm::cross(&s, &edge1);
        let v = inv_det * glm::dot(&self.direction, &q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = inv_det * glm::dot(&edge2, &q);
        (t > EPSILON).then_some(t)
    }

    /// Nearest hit distance against every mesh under `root`
    pub fn cast(&self, graph: &SceneGraph, root: NodeId) -> Option<f32> {
        let mut nearest: Option<f32> = None;
        for (node, mesh) in graph.mesh_instances(root) {
            let world = graph.world_matrix(node);
            let to_world = |p: &[f32; 3]| {
                let v = world * glm::vec4(p[0], p[1], p[2], 1.0);
                glm::vec3(v.x, v.y, v.z)
            };
            for [a, b, c] in graph.meshes[mesh].triangles() {
                if let Some(t) = self.intersect_triangle(&to_world(&a), &to_world(&b), &to_world(&c)) {
                    nearest = Some(nearest.map_or(t, |n| n.min(t)));
                }
            }
        }
        nearest
    }
}
