//! Scene layout
//!
//! The composition is a background stretched over the whole window plus two
//! fixed-size overlays, one near the top edge and one near the bottom edge,
//! both horizontally centered.

/// Width of each overlay in logical pixels
pub const OVERLAY_WIDTH: u32 = 400;
/// Height of each overlay in logical pixels
pub const OVERLAY_HEIGHT: u32 = 200;
/// Distance from the top edge of the window to the top overlay
pub const TOP_MARGIN: i32 = 50;
/// Distance from the bottom edge of the window to the top of the bottom overlay
pub const BOTTOM_OFFSET: i32 = 250;

/// Integer destination rectangle in window coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center, in half-pixels to stay exact for odd widths
    pub fn center_x2(&self) -> i64 {
        2 * self.x as i64 + self.width as i64
    }

    /// Maps this rectangle from a `from` coordinate space onto a `to` space,
    /// scaling each axis independently.
    pub fn scaled(&self, from: (u32, u32), to: (u32, u32)) -> ScreenRect {
        let sx = to.0 as f32 / from.0.max(1) as f32;
        let sy = to.1 as f32 / from.1.max(1) as f32;
        ScreenRect {
            x: self.x as f32 * sx,
            y: self.y as f32 * sy,
            width: self.width as f32 * sx,
            height: self.height as f32 * sy,
        }
    }
}

/// Floating-point rectangle in physical surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Which of the three images a draw refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Background,
    Top,
    Bottom,
}

impl Slot {
    /// Slots in painter's order
    pub const DRAW_ORDER: [Slot; 3] = [Slot::Background, Slot::Top, Slot::Bottom];
}

/// Narrows a coordinate to `i32`, saturating at the type's bounds
pub fn clamp_to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Destination rectangles for every slot, computed once from the window size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub width: u32,
    pub height: u32,
    pub background: Rect,
    pub top: Rect,
    pub bottom: Rect,
}

impl SceneLayout {
    /// Lays the scene out for a window of `width` x `height` logical pixels
    pub fn new(width: u32, height: u32) -> Self {
        let x = clamp_to_i32((i64::from(width) - i64::from(OVERLAY_WIDTH)) / 2);

        Self {
            width,
            height,
            background: Rect::new(0, 0, width, height),
            top: Rect::new(x, TOP_MARGIN, OVERLAY_WIDTH, OVERLAY_HEIGHT),
            bottom: Rect::new(
                x,
                clamp_to_i32(i64::from(height) - i64::from(BOTTOM_OFFSET)),
                OVERLAY_WIDTH,
                OVERLAY_HEIGHT,
            ),
        }
    }

    pub fn rect(&self, slot: Slot) -> Rect {
        match slot {
            Slot::Background => self.background,
            Slot::Top => self.top,
            Slot::Bottom => self.bottom,
        }
    }

    /// Maps every slot onto a surface of `surface` physical pixels, in draw order
    pub fn to_surface(&self, surface: (u32, u32)) -> [(Slot, ScreenRect); 3] {
        Slot::DRAW_ORDER.map(|slot| {
            (
                slot,
                self.rect(slot).scaled((self.width, self.height), surface),
            )
        })
    }
}
