use crate::app::app::App;
use crate::settings::Settings;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct AppHandler {
    pub app: Option<App>,
    pub settings: Settings,
    pub runtime: Runtime,
    /// Startup failure, reported once the event loop returns
    pub error: Option<anyhow::Error>,
}

impl AppHandler {
    pub fn new(settings: Settings, runtime: Runtime) -> Self {
        Self {
            app: None,
            settings,
            runtime,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<App> {
        let window_attrs = Window::default_attributes()
            .with_title("Logo Viewer")
            .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let runtime_handle = self.runtime.handle().clone();
        let app = self
            .runtime
            .block_on(App::new(window, runtime_handle, self.settings.clone()))?;
        Ok(app)
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(app) => self.app = Some(app),
            Err(err) => {
                log::error!("failed to start viewer: {err:#}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            if app.frame() {
                event_loop.exit();
            }
            app.window.request_redraw();
        }
    }
}
