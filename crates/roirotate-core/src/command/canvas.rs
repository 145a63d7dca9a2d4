//! Canvas sizing for regions loaded from disk.
//!
//! A loaded region may lie partly outside the open image, or no image may be
//! open at all. In both cases a blank 8-bit canvas is created that holds the
//! region's pixel bounds plus a small margin.

use crate::geometry::Bounds;
use image::GrayImage;
use tracing::debug;

/// Extra pixels added right of and below the region.
pub const CANVAS_MARGIN: u32 = 10;

/// Canvas size `(width, height)` needed to display a region with `bounds`.
///
/// Sizes beyond `u32::MAX` saturate.
pub fn canvas_size_for(bounds: &Bounds) -> (u32, u32) {
    let (x, y, w, h) = bounds.to_pixel_bounds();
    (extent(x, w), extent(y, h))
}

fn extent(start: i64, length: i64) -> u32 {
    let far = start.saturating_add(length).max(0);
    u32::try_from(far)
        .unwrap_or(u32::MAX)
        .saturating_add(CANVAS_MARGIN)
}

/// Blank canvas for a loaded region, or `None` if the open image fits it.
///
/// `current_image` is the `(width, height)` of the open image, if any.
pub fn canvas_for_loaded_roi(
    bounds: &Bounds,
    current_image: Option<(u32, u32)>,
) -> Option<GrayImage> {
    let (x, y, w, h) = bounds.to_pixel_bounds();
    let (right, bottom) = (x.saturating_add(w), y.saturating_add(h));

    if let Some((img_w, img_h)) = current_image {
        if img_w as i64 >= right && img_h as i64 >= bottom {
            return None;
        }
    }

    let (width, height) = canvas_size_for(bounds);
    debug!(width, height, "creating blank canvas for loaded region");
    Some(GrayImage::new(width, height))
}
