use crate::asset::{CpuMesh, SceneAsset};
use nalgebra_glm as glm;

pub type NodeId = usize;

/// Local translation / rotation / scale of a node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(translation: glm::Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        glm::translation(&self.translation)
            * glm::quat_to_mat4(&glm::quat_normalize(&self.rotation))
            * glm::scaling(&self.scale)
    }

    /// Rotation from Euler angles applied in X, then Y, then Z order
    pub fn set_euler_xyz(&mut self, x: f32, y: f32, z: f32) {
        let qx = glm::quat_angle_axis(x, &glm::vec3(1.0, 0.0, 0.0));
        let qy = glm::quat_angle_axis(y, &glm::vec3(0.0, 1.0, 0.0));
        let qz = glm::quat_angle_axis(z, &glm::vec3(0.0, 0.0, 1.0));
        self.rotation = qx * qy * qz;
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = glm::vec3(s, s, s);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub local: Transform,
    /// Pose the node returns to when no animation drives it
    pub rest: Transform,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub meshes: Vec<usize>,
    world: glm::Mat4,
}

/// Flat node arena; parents are always stored before their children
pub struct SceneGraph {
    nodes: Vec<Node>,
    pub meshes: Vec<CpuMesh>,
}

impl SceneGraph {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        let root = Node {
            name: "scene".to_string(),
            local: Transform::identity(),
            rest: Transform::identity(),
            parent: None,
            children: Vec::new(),
            meshes: Vec::new(),
            world: glm::identity(),
        };
        Self {
            nodes: vec![root],
            meshes: Vec::new(),
        }
    }

    pub fn add_node(&mut self, name: &str, parent: NodeId, local: Transform) -> NodeId {
        let id = self.nodes.len();
        let parent_world = self.nodes[parent].world;
        self.nodes.push(Node {
            name: name.to_string(),
            world: parent_world * local.matrix(),
            rest: local.clone(),
            local,
            parent: Some(parent),
            children: Vec::new(),
            meshes: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Recompute world matrices in one pass over the arena
    pub fn update_world_matrices(&mut self) {
        for id in 0..self.nodes.len() {
            let local = self.nodes[id].local.matrix();
            self.nodes[id].world = match self.nodes[id].parent {
                Some(p) => self.nodes[p].world * local,
                None => local,
            };
        }
    }

    pub fn world_matrix(&self, id: NodeId) -> glm::Mat4 {
        self.nodes[id].world
    }

    pub fn world_position(&self, id: NodeId) -> glm::Vec3 {
        let m = self.nodes[id].world;
        glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }

    /// Depth-first list of `root` and all of its descendants
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// (node, mesh index) pairs for every mesh under `root`
    pub fn mesh_instances(&self, root: NodeId) -> Vec<(NodeId, usize)> {
        self.subtree(root)
            .into_iter()
            .flat_map(|id| self.nodes[id].meshes.iter().map(move |&m| (id, m)))
            .collect()
    }

    /// Copy the asset hierarchy under `parent`.
    ///
    /// Returns the scene id of every asset node, indexed by asset node index,
    /// so animation tracks can be retargeted. Nodes the scene roots never
    /// reach map to `None`.
    pub fn instantiate(&mut self, asset: &SceneAsset, parent: NodeId) -> Vec<Option<NodeId>> {
        let mesh_offset = self.meshes.len();
        self.meshes.extend(asset.meshes.iter().cloned());

        let mut map = vec![None; asset.nodes.len()];
        let mut stack: Vec<(usize, NodeId)> =
            asset.roots.iter().rev().map(|&r| (r, parent)).collect();
        while let Some((index, parent_id)) = stack.pop() {
            let Some(source) = asset.nodes.get(index) else {
                continue;
            };
            if map[index].is_some() {
                continue;
            }
            let [x, y, z, w] = source.rotation;
            let local = Transform {
                translation: glm::make_vec3(&source.translation),
                rotation: glm::quat(x, y, z, w),
                scale: glm::make_vec3(&source.scale),
            };
            let id = self.add_node(&source.name, parent_id, local);
            self.nodes[id].meshes = source.meshes.iter().map(|m| m + mesh_offset).collect();
            map[index] = Some(id);
            for &child in source.children.iter().rev() {
                stack.push((child, id));
            }
        }
        map
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
