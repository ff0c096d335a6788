//! Triptych
//!
//! Shows a background image with two overlays in a window, built with winit
//! and wgpu.

/// Viewer application - windowing, rendering, and texture loading
pub mod app;

/// Build-time information (git SHA, build timestamp, compiler, etc.)
pub mod build_info;

/// Startup health checks
pub mod health;

/// Scene layout - destination rectangles for each image
pub mod scene;
