//! Rotation center resolution.

use crate::geometry::Point;
use crate::roi::Roi;

/// Where a rotation pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenterMode {
    /// The region's own rotation center (sticky center or bounds center).
    #[default]
    Region,
    /// The center of the image the region lives on.
    Image { width: u32, height: u32 },
}

/// Resolve the pivot for rotating `roi`.
///
/// With `use_image_center` the pivot is `(image_width / 2, image_height / 2)`
/// whatever the region's shape. Otherwise it is the region's own rotation
/// center: a single representative point, never an average over vertices.
pub fn resolve_center(
    roi: &Roi,
    use_image_center: bool,
    image_width: u32,
    image_height: u32,
) -> Point {
    let mode = if use_image_center {
        CenterMode::Image {
            width: image_width,
            height: image_height,
        }
    } else {
        CenterMode::Region
    };
    resolve(roi, mode)
}

/// Resolve the pivot for `roi` under the given mode.
pub fn resolve(roi: &Roi, mode: CenterMode) -> Point {
    match mode {
        CenterMode::Region => roi.rotation_center(),
        CenterMode::Image { width, height } => {
            Point::new(width as f64 / 2.0, height as f64 / 2.0)
        }
    }
}
