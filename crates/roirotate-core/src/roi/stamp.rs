//! Image-stamp regions.
//!
//! An image stamp is a raster overlay placed at a fixed position. Its
//! rotation is intrinsic metadata applied when the raster is drawn, so
//! rotating a stamp changes its angle in place instead of producing new
//! coordinates.

use super::RoiError;
use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ImageStampRaw")]
pub struct ImageStamp {
    /// Top-left corner of the unrotated raster
    origin: Point,
    /// Raster width in pixels
    width: u32,
    /// Raster height in pixels
    height: u32,
    /// Intrinsic rotation in degrees, normalized to [0, 360)
    angle: f64,
}

#[derive(Deserialize)]
struct ImageStampRaw {
    origin: Point,
    width: u32,
    height: u32,
    #[serde(default)]
    angle: f64,
}

impl TryFrom<ImageStampRaw> for ImageStamp {
    type Error = RoiError;

    fn try_from(raw: ImageStampRaw) -> Result<Self, Self::Error> {
        if !raw.angle.is_finite() {
            return Err(RoiError::NonFiniteCoordinate);
        }
        let mut stamp = ImageStamp::new(raw.origin, raw.width, raw.height)?;
        stamp.rotate(raw.angle);
        Ok(stamp)
    }
}

impl ImageStamp {
    pub fn new(origin: Point, width: u32, height: u32) -> Result<Self, RoiError> {
        if !origin.is_finite() {
            return Err(RoiError::NonFiniteCoordinate);
        }
        Ok(Self {
            origin,
            width,
            height,
            angle: 0.0,
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current intrinsic angle in degrees (positive = clockwise on screen).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.origin.x,
            self.origin.y,
            self.width as f64,
            self.height as f64,
        )
    }

    /// Rotate the raster about its own center by adding to the stored angle.
    pub fn rotate(&mut self, angle_degrees: f64) {
        self.angle = (self.angle + angle_degrees).rem_euclid(360.0);
    }
}
