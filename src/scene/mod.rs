// Scene graph: node hierarchy, bounds and picking

pub mod bounds;
pub mod node;
pub mod raycast;

pub use bounds::Aabb;
pub use node::{Node, NodeId, SceneGraph, Transform};
pub use raycast::Ray;
