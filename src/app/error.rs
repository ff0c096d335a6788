use thiserror::Error;

use super::renderer::RendererError;

/// Fatal startup failures. Any of these aborts the program before the render
/// loop starts.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("windowing subsystem could not initialize: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window could not be created: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("renderer could not be created: {0}")]
    Renderer(#[from] RendererError),

    #[error("async runtime could not be created: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("image decoder could not initialize: no image formats are enabled")]
    NoDecoderFormats,
}
