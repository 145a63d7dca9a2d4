//! Non-geometric display attributes carried by every region.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Style attribute bundle.
///
/// Copied verbatim from a source region onto every region derived from it,
/// so a rotated selection looks and groups exactly like the original.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoiStyle {
    /// Display name (e.g. the label shown in a region list)
    #[serde(default)]
    pub name: Option<String>,
    /// Outline color; `None` uses the host's default selection color
    #[serde(default)]
    pub stroke_color: Option<Color>,
    /// Interior fill; `None` means unfilled
    #[serde(default)]
    pub fill_color: Option<Color>,
    /// Outline width in pixels (0 = thinnest the host can draw)
    #[serde(default)]
    pub stroke_width: f64,
    /// Stack position the region is attached to (0 = all positions)
    #[serde(default)]
    pub position: u32,
    /// Group index (0 = no group)
    #[serde(default)]
    pub group: u32,
}

impl RoiStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every attribute is at its default
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
