use logo_viewer::app::AppHandler;
use logo_viewer::settings::Settings;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut settings = Settings::load();

    // Parse command line arguments
    if let Some(model_path) = std::env::args().nth(1) {
        settings.scene.model_path = model_path;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler::new(settings, tokio::runtime::Runtime::new()?);
    event_loop.run_app(&mut handler)?;

    if let Some(err) = handler.error.take() {
        return Err(err);
    }
    Ok(())
}
