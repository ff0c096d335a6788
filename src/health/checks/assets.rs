//! Scene image health check

use std::path::PathBuf;

use crate::app::{AppConfig, DecoderConfig, decode_image};
use crate::health::check::{CheckResult, SystemCheck};
use crate::scene::Slot;

/// Checks that each scene image exists and decodes with the enabled formats
///
/// A missing image only blanks its slot, so unavailable images are warnings.
pub struct AssetsCheck {
    images: Vec<(Slot, PathBuf)>,
    decoder: DecoderConfig,
}

impl AssetsCheck {
    pub fn new(images: Vec<(Slot, PathBuf)>, decoder: DecoderConfig) -> Self {
        Self { images, decoder }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let assets = &config.assets;
        Self::new(
            vec![
                (Slot::Top, assets.top.clone()),
                (Slot::Bottom, assets.bottom.clone()),
                (Slot::Background, assets.background.clone()),
            ],
            config.decoder.clone(),
        )
    }
}

impl SystemCheck for AssetsCheck {
    fn name(&self) -> &'static str {
        "Assets"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Decodes every scene image without touching the GPU")
    }

    fn check(&self) -> CheckResult {
        if self.decoder.formats.is_empty() {
            return CheckResult::fail("Image decoder has no formats enabled");
        }

        let mut details = Vec::new();
        let mut unavailable = 0;

        for (slot, path) in &self.images {
            match decode_image(path, &self.decoder) {
                Ok(surface) => details.push(format!(
                    "✓ {:?}: {} ({}x{})",
                    slot,
                    path.display(),
                    surface.width(),
                    surface.height()
                )),
                Err(e) => {
                    unavailable += 1;
                    details.push(format!("⚠ {:?}: {}", slot, e));
                }
            }
        }

        if unavailable == 0 {
            CheckResult::pass(format!("{} images decoded", self.images.len())).with_details(details)
        } else {
            CheckResult::warn(format!(
                "{} of {} images unavailable",
                unavailable,
                self.images.len()
            ))
            .with_details(details)
        }
    }
}
