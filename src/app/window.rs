//! Window configuration and management

use super::config::WindowConfig;
use winit::dpi::LogicalSize;
use winit::window::WindowAttributes;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_visible(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_carry_title_and_size() {
        let attrs = window_attributes_from_config(&WindowConfig::default());

        assert_eq!(attrs.title, "2D Rendering");
        assert_eq!(
            attrs.inner_size,
            Some(LogicalSize::new(800u32, 600u32).into())
        );
        assert!(attrs.resizable);
        assert!(attrs.visible);
    }
}
