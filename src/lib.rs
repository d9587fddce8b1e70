pub mod animation;
pub mod app;
pub mod asset;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod ui;
pub mod viewer;

/// Application name for the confy settings files
pub const CONFY_APP_NAME: &str = "logo-viewer";

pub use error::ViewerError;
