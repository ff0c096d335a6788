//! Main application handler for the viewer

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::error::InitError;
use super::renderer::Renderer;
use super::renderer::texture::SceneTextures;
use super::state::RunState;
use super::window::window_attributes_from_config;
use crate::scene::SceneLayout;

/// Everything that lives on the GPU side of the window
///
/// Fields drop top to bottom: textures go before the renderer that created
/// them, and the renderer goes before the window its surface points at.
pub struct GraphicsContext {
    textures: SceneTextures,
    renderer: Renderer,
    window: Arc<Window>,
}

/// Main viewer application
pub struct App {
    config: AppConfig,
    layout: SceneLayout,
    context: Option<GraphicsContext>,
    state: RunState,
    init_error: Option<InitError>,
    frames: u64,
}

impl App {
    /// Creates a new application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting viewer");
        info!(?config.window, "Window configuration");

        let layout = SceneLayout::new(config.window.width, config.window.height);

        Self {
            config,
            layout,
            context: None,
            state: RunState::default(),
            init_error: None,
            frames: 0,
        }
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the viewer until the window is closed
    ///
    /// Returns the first initialization failure, if any; a normal close
    /// returns `Ok`.
    pub fn run(mut self) -> Result<(), InitError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self)?;

        match self.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Creates the window, the renderer bound to it, and the scene textures
    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<GraphicsContext, InitError> {
        let window = event_loop.create_window(window_attributes_from_config(&self.config.window))?;
        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );
        let window = Arc::new(window);

        // winit's event loop is synchronous; drive wgpu's async setup to completion here
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        let renderer =
            runtime.block_on(Renderer::new(window.clone(), self.config.window.vsync))?;
        info!("Renderer initialized successfully");

        if self.config.decoder.formats.is_empty() {
            return Err(InitError::NoDecoderFormats);
        }
        info!(formats = ?self.config.decoder.formats, "Image decoder ready");

        let textures = SceneTextures::load(&renderer, &self.config.assets, &self.config.decoder);

        Ok(GraphicsContext {
            textures,
            renderer,
            window,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(context) = &mut self.context else {
            return;
        };

        match context.renderer.draw(&self.layout, &context.textures) {
            Ok(()) => {
                self.frames += 1;
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                let size = context.window.inner_size();
                context.renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                self.state = RunState::Quit;
                event_loop.exit();
            }
            Err(e) => {
                error!(error = %e, "Render error");
            }
        }
    }

    /// Releases textures, then the renderer, then the window
    fn shutdown(&mut self) {
        if let Some(GraphicsContext {
            textures,
            renderer,
            window,
        }) = self.context.take()
        {
            drop(textures);
            drop(renderer);
            drop(window);
            info!(frames = self.frames, "Shutdown complete");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_some() || self.init_error.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(context) => {
                context.window.request_redraw();
                self.context = Some(context);
            }
            Err(e) => {
                error!(error = %e, "Initialization failed");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.state.is_running() {
            return;
        }
        if let Some(context) = &self.context {
            context.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.state = self.state.on_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.context {
                    context.renderer.resize(new_size);
                }
            }
            // A redraw already queued when the close arrived still presents;
            // about_to_wait stops requesting new ones once the state is Quit
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_is_running_without_graphics() {
        let app = App::new(AppConfig::default());
        assert!(app.state().is_running());
        assert!(app.context.is_none());
        assert!(app.init_error.is_none());
    }

    #[test]
    fn test_layout_follows_configured_window() {
        let mut config = AppConfig::default();
        config.window.width = 1024;
        config.window.height = 768;

        let app = App::new(config);
        assert_eq!(app.layout().top.x, (1024 - 400) / 2);
        assert_eq!(app.layout().bottom.y, 768 - 250);
    }

    #[test]
    fn test_shutdown_without_context_is_noop() {
        let mut app = App::new(AppConfig::default());
        app.shutdown();
        app.shutdown();
        assert!(app.context.is_none());
    }
}
