// wgpu scene renderer with an egui pass on top

mod render;
pub mod renderer;
pub mod uniforms;
pub mod vertex;

pub use renderer::Renderer;
pub use uniforms::{CameraUniform, LightsUniform, ModelUniform, clear_color, srgb_to_linear};
pub use vertex::Vertex;
