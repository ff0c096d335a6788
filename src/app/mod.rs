//! Viewer application module
//!
//! Handles windowing, rendering, and the quit-only event loop.

pub mod config;
mod error;
pub mod renderer;
mod runner;
pub mod state;
mod window;

pub use config::{AppConfig, AssetConfig, DecoderConfig, ImageKind, LoggingConfig, WindowConfig};
pub use error::InitError;
pub use renderer::texture::{SceneTextures, Texture, TextureError, decode_image};
pub use runner::{App, GraphicsContext};
pub use state::RunState;
pub use window::window_attributes_from_config;
