//! Scene layout health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::scene::{
    BOTTOM_OFFSET, OVERLAY_HEIGHT, OVERLAY_WIDTH, SceneLayout, TOP_MARGIN, clamp_to_i32,
};

/// Checks the overlay placement for a window size
pub struct SceneLayoutCheck {
    width: u32,
    height: u32,
}

impl SceneLayoutCheck {
    /// Checks the stock 800x600 window
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            width: config.window.width,
            height: config.window.height,
        }
    }
}

impl Default for SceneLayoutCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SceneLayoutCheck {
    fn name(&self) -> &'static str {
        "Scene Layout"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates overlay placement for the configured window size")
    }

    fn check(&self) -> CheckResult {
        let layout = SceneLayout::new(self.width, self.height);
        let details = vec![
            format!("Window: {}x{}", layout.width, layout.height),
            format!("Top: {:?}", layout.top),
            format!("Bottom: {:?}", layout.bottom),
        ];

        // Odd widths truncate, leaving the overlays half a pixel left of center
        let centered = [layout.top, layout.bottom]
            .iter()
            .all(|rect| (rect.center_x2() - layout.width as i64).abs() <= 1);
        let anchored = layout.top.y == TOP_MARGIN
            && layout.bottom.y
                == clamp_to_i32(i64::from(layout.height) - i64::from(BOTTOM_OFFSET));

        if !centered || !anchored {
            return CheckResult::fail("Overlays are misplaced").with_details(details);
        }

        let fits = layout.width >= OVERLAY_WIDTH
            && i64::from(layout.height)
                >= i64::from(TOP_MARGIN) + i64::from(OVERLAY_HEIGHT) + i64::from(BOTTOM_OFFSET);
        if !fits {
            return CheckResult::warn("Overlays overlap or leave the window").with_details(details);
        }

        CheckResult::pass("Overlays centered and anchored").with_details(details)
    }
}
