use crate::asset::{AssetLoad, AssetSource};
use crate::error::ViewerError;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::ui::Ui;
use crate::viewer::{ViewerController, ViewerEvent, Viewport};
use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use nalgebra_glm as glm;
use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    controller: ViewerController,
    egui_state: State,
    ui: Ui,
    load: Option<AssetLoad>,
    last_frame: Instant,
}

/// Window size in logical pixels
fn logical_viewport(window: &Window) -> Viewport {
    let size = window.inner_size().to_logical::<f32>(window.scale_factor());
    Viewport::new(size.width, size.height)
}

impl App {
    pub async fn new(
        window: Arc<Window>,
        runtime: tokio::runtime::Handle,
        settings: Settings,
    ) -> Result<Self, ViewerError> {
        let renderer = Renderer::new(window.clone(), &settings.scene).await?;

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let source = AssetSource::parse(&settings.scene.model_path);
        log::info!("loading model from {}", source.display_name());
        let load = AssetLoad::spawn(&runtime, source);

        let ui = Ui::new(settings.scene.background_color);
        let controller = ViewerController::new(settings, logical_viewport(&window));

        Ok(Self {
            window,
            renderer,
            controller,
            egui_state,
            ui,
            load: Some(load),
            last_frame: Instant::now(),
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        let egui_response = self.egui_state.on_window_event(&self.window, event);

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if !egui_response.consumed
                    && event.logical_key
                        == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
                self.controller.on_resize(logical_viewport(&self.window));
            }
            winit::event::WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.window.scale_factor());
                self.controller.on_pointer_move(glm::vec2(logical.x, logical.y));
            }
            winit::event::WindowEvent::CursorLeft { .. } => {
                self.controller.on_pointer_leave();
            }
            _ => {}
        }

        EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        }
    }

    /// Hand a finished load to the controller and the GPU
    fn poll_load(&mut self) {
        let Some(load) = self.load.as_mut() else {
            return;
        };
        let Some(result) = load.poll() else {
            return;
        };
        self.load = None;
        match result {
            Ok(asset) => {
                self.controller.on_asset_loaded(asset);
                self.renderer.upload_scene(self.controller.graph());
            }
            Err(err) => self.controller.on_asset_failed(&err),
        }
    }

    /// Run one frame. Returns true when the viewer should close.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.poll_load();

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();
        let mut ui_response = None;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            ui_response = Some(self.ui.show(ctx, self.controller.buttons()));
        });

        if let Some(ui_response) = ui_response {
            if let Some(index) = ui_response.left {
                self.controller.on_button_leave(index);
            }
            if let Some(index) = ui_response.entered {
                self.controller.on_button_enter(index);
            }
            if let Some(index) = ui_response.clicked {
                self.controller.on_button_click(index);
            }
            self.controller.set_reference_top(ui_response.bar_top);
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let mut exit = false;
        for event in self.controller.tick(dt) {
            match event {
                ViewerEvent::ButtonsRevealed => log::debug!("buttons revealed"),
                ViewerEvent::ResizeSurface(viewport) => {
                    log::debug!("resize settled at {}x{}", viewport.width, viewport.height);
                    self.renderer.resize(self.window.inner_size());
                }
                ViewerEvent::Navigate(target) => {
                    log::info!("opening {target}");
                    if let Err(err) = webbrowser::open(&target) {
                        log::error!("failed to open {target}: {err}");
                    }
                    exit = true;
                }
            }
        }

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let size = self.window.inner_size();
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        match self.renderer.render(
            self.controller.graph(),
            self.controller.camera(),
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.renderer.reconfigure(),
            Err(err) => log::warn!("render error: {err:?}"),
        }

        exit
    }
}
