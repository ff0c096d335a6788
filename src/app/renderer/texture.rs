//! Image decoding and texture upload
//!
//! Loading is split in two steps. [`decode_image`] turns a file into an RGBA
//! surface on the CPU and [`Texture::from_image`] uploads that surface to the
//! GPU. The surface is owned by the loader and dropped once the upload has
//! been attempted.

use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use thiserror::Error;
use tracing::{debug, error, info};

use super::Renderer;
use super::sprite::SpriteRenderer;
use crate::app::config::{AssetConfig, DecoderConfig};
use crate::scene::Slot;

/// Failure to turn an image file into a texture
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("unable to load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unable to load image {}: {format:?} decoding is not enabled", path.display())]
    UnsupportedFormat {
        path: PathBuf,
        format: image::ImageFormat,
    },

    #[error("unable to create texture from {}: image has no pixels", path.display())]
    Empty { path: PathBuf },

    #[error(
        "unable to create texture from {}: {width}x{height} exceeds the device limit of {max}",
        path.display()
    )]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },
}

/// Decodes an image file into an RGBA surface
///
/// The container format is sniffed from the file contents, not the extension,
/// and must be one of the formats enabled in `decoder`.
pub fn decode_image(path: &Path, decoder: &DecoderConfig) -> Result<RgbaImage, TextureError> {
    let decode_err = |source: image::ImageError| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(e.into()))?;

    if let Some(format) = reader.format()
        && !decoder.accepts(format)
    {
        return Err(TextureError::UnsupportedFormat {
            path: path.to_path_buf(),
            format,
        });
    }

    Ok(reader.decode().map_err(decode_err)?.to_rgba8())
}

/// Checks that a surface can become a 2D texture on a device with the given
/// limit: neither side may be zero or exceed `max`
pub fn check_dimensions(path: &Path, surface: &RgbaImage, max: u32) -> Result<(), TextureError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }
    if width > max || height > max {
        return Err(TextureError::TooLarge {
            path: path.to_path_buf(),
            width,
            height,
            max,
        });
    }
    Ok(())
}

/// An immutable GPU texture ready to be drawn by the sprite pipeline
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Decodes `path` and uploads it, releasing the decoded surface afterwards
    pub fn load(
        renderer: &Renderer,
        path: &Path,
        decoder: &DecoderConfig,
    ) -> Result<Self, TextureError> {
        let surface = decode_image(path, decoder)?;
        check_dimensions(path, &surface, renderer.max_texture_dimension())?;

        let label = path.display().to_string();
        let texture = Self::from_image(
            renderer.device(),
            renderer.queue(),
            renderer.sprite_renderer(),
            &surface,
            &label,
        );

        debug!(path = %label, texture.width = texture.width, texture.height = texture.height, "Texture uploaded");
        Ok(texture)
    }

    /// Uploads an RGBA surface and binds it for the sprite pipeline
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sprites: &SpriteRenderer,
        surface: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = surface.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            surface.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = sprites.bind_texture(device, &view, label);

        Self {
            texture,
            view,
            bind_group,
            width,
            height,
        }
    }
}

/// The three scene textures; a slot whose image failed to load stays empty
#[derive(Default)]
pub struct SceneTextures {
    background: Option<Texture>,
    top: Option<Texture>,
    bottom: Option<Texture>,
}

impl SceneTextures {
    /// Loads every scene image, logging and skipping the ones that fail
    pub fn load(renderer: &Renderer, assets: &AssetConfig, decoder: &DecoderConfig) -> Self {
        let load = |slot: Slot, path: &Path| match Texture::load(renderer, path, decoder) {
            Ok(texture) => Some(texture),
            Err(e) => {
                error!(?slot, error = %e, "Texture unavailable, slot will not be drawn");
                None
            }
        };

        let top = load(Slot::Top, &assets.top);
        let bottom = load(Slot::Bottom, &assets.bottom);
        let background = load(Slot::Background, &assets.background);

        let textures = Self {
            background,
            top,
            bottom,
        };
        info!(loaded = textures.loaded_count(), "Scene textures loaded");
        textures
    }

    pub fn get(&self, slot: Slot) -> Option<&Texture> {
        match slot {
            Slot::Background => self.background.as_ref(),
            Slot::Top => self.top.as_ref(),
            Slot::Bottom => self.bottom.as_ref(),
        }
    }

    pub fn loaded_count(&self) -> usize {
        Slot::DRAW_ORDER
            .iter()
            .filter(|slot| self.get(**slot).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_surface_is_rejected() {
        let surface = RgbaImage::new(4096, 16);
        let err = check_dimensions(Path::new("wide.png"), &surface, 2048).unwrap_err();

        assert!(matches!(
            err,
            TextureError::TooLarge {
                width: 4096,
                height: 16,
                max: 2048,
                ..
            }
        ));
        assert!(err.to_string().contains("wide.png"));
    }

    #[test]
    fn test_surface_at_limit_is_accepted() {
        let surface = RgbaImage::new(2048, 2048);
        assert!(check_dimensions(Path::new("square.png"), &surface, 2048).is_ok());
    }

    #[test]
    fn test_zero_sized_surface_is_empty() {
        let surface = RgbaImage::new(0, 4);
        let err = check_dimensions(Path::new("blank.png"), &surface, 2048).unwrap_err();

        assert!(matches!(err, TextureError::Empty { .. }));
        assert!(err.to_string().contains("blank.png"));
    }

    #[test]
    fn test_empty_scene_has_nothing_to_draw() {
        let textures = SceneTextures::default();
        assert_eq!(textures.loaded_count(), 0);
        assert!(textures.get(Slot::Background).is_none());
    }

    #[test]
    fn test_decode_error_names_path() {
        let err = decode_image(
            Path::new("./Assets/does-not-exist.jpeg"),
            &DecoderConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("does-not-exist.jpeg"));
    }
}
