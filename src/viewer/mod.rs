// Viewer state: camera, hover ease, pointer rotation, layout and the overlay buttons

pub mod camera;
pub mod controller;
pub mod hover;
pub mod layout;
pub mod overlay;
pub mod rotation;

pub use camera::{CameraPose, CameraState};
pub use controller::{ModelHandle, ViewerController, ViewerEvent};
pub use hover::{HoverDirection, HoverEase};
pub use layout::{Debounce, Viewport, responsive_scale, screen_y_to_world_y};
pub use overlay::{ButtonBar, resolve_link};
pub use rotation::PointerRotation;
