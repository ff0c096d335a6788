//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.
//! Every field has a default, so running without any config file shows the
//! stock 800x600 composition.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether to synchronize presentation with the display refresh
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "2D Rendering".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

/// Image files for each part of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Overlay drawn near the top edge
    pub top: PathBuf,
    /// Overlay drawn near the bottom edge
    pub bottom: PathBuf,
    /// Image stretched over the whole window
    pub background: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            top: PathBuf::from("./Assets/view1.jpeg"),
            bottom: PathBuf::from("./Assets/view2.jpeg"),
            background: PathBuf::from("./Assets/view3.jpeg"),
        }
    }
}

/// Image container formats the decoder is allowed to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn format(self) -> image::ImageFormat {
        match self {
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Image decoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Formats accepted by the texture loader
    pub formats: Vec<ImageKind>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            formats: vec![ImageKind::Png, ImageKind::Jpeg],
        }
    }
}

impl DecoderConfig {
    /// Returns true if files detected as `format` may be decoded
    pub fn accepts(&self, format: image::ImageFormat) -> bool {
        self.formats.iter().any(|kind| kind.format() == format)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Scene images
    pub assets: AssetConfig,
    /// Decoder settings
    pub decoder: DecoderConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            assets: AssetConfig::default(),
            decoder: DecoderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_WINDOW__TITLE=Demo)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(profile, Self::environment())
    }

    /// APP_-prefixed environment source
    ///
    /// `__` separates nested fields (APP_WINDOW__WIDTH=1024) and list fields
    /// take comma-separated values (APP_DECODER__FORMATS=png,jpeg).
    fn environment() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("decoder.formats")
            .try_parsing(true)
    }

    fn load_with_env(profile: &str, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        let config = builder
            .add_source(env)
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "2D Rendering");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert!(config.window.vsync);
        assert_eq!(config.assets.top, PathBuf::from("./Assets/view1.jpeg"));
        assert_eq!(config.assets.bottom, PathBuf::from("./Assets/view2.jpeg"));
        assert_eq!(
            config.assets.background,
            PathBuf::from("./Assets/view3.jpeg")
        );
    }

    #[test]
    fn test_decoder_accepts_png_and_jpeg_by_default() {
        let decoder = DecoderConfig::default();
        assert!(decoder.accepts(image::ImageFormat::Png));
        assert!(decoder.accepts(image::ImageFormat::Jpeg));
        assert!(!decoder.accepts(image::ImageFormat::Gif));
    }

    #[test]
    fn test_png_only_decoder_rejects_jpeg() {
        let decoder = DecoderConfig {
            formats: vec![ImageKind::Png],
        };
        assert!(!decoder.accepts(image::ImageFormat::Jpeg));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[window]\ntitle = \"Gallery\"\n\n[decoder]\nformats = [\"png\"]\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.window.title, "Gallery");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.decoder.formats, vec![ImageKind::Png]);
        assert_eq!(config.assets, AssetConfig::default());
    }

    #[test]
    fn test_load_missing_profile_falls_back_to_defaults() {
        let config = AppConfig::load("no-such-profile").unwrap();
        assert_eq!(config.profile, "no-such-profile");
        assert_eq!(config.window.height, 600);
    }

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_env_overrides_decoder_formats_list() {
        let config = AppConfig::load_with_env(
            "no-such-profile",
            env_source(&[
                ("APP_DECODER__FORMATS", "png"),
                ("APP_WINDOW__TITLE", "Gallery, framed"),
                ("APP_WINDOW__WIDTH", "1024"),
            ]),
        )
        .unwrap();

        assert_eq!(config.decoder.formats, vec![ImageKind::Png]);
        assert_eq!(config.window.title, "Gallery, framed");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn test_env_formats_accept_comma_separated_values() {
        let config = AppConfig::load_with_env(
            "no-such-profile",
            env_source(&[("APP_DECODER__FORMATS", "jpeg,png")]),
        )
        .unwrap();

        assert_eq!(
            config.decoder.formats,
            vec![ImageKind::Jpeg, ImageKind::Png]
        );
    }
}
