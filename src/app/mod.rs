// Window application: winit handler, per-frame driving of the viewer

pub mod app;
pub mod handler;

pub use app::{App, EventResponse};
pub use handler::AppHandler;
