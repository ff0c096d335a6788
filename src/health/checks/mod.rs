//! Built-in health checks

pub mod assets;
pub mod build_info;
pub mod config;
pub mod graphics_backend;
pub mod scene_layout;

pub use assets::AssetsCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use graphics_backend::GraphicsBackendCheck;
pub use scene_layout::SceneLayoutCheck;
