//! Region rotation: center resolution and the shape rotator.
//!
//! Rotating a region is a two-step flow:
//! 1. Pick the pivot with [`resolve_center`] (image center or the region's
//!    own rotation center)
//! 2. Rotate with [`rotate_about`], or use [`rotate`] to do both and keep
//!    the pivot as the new region's sticky rotation center
//!
//! # Coordinate System
//!
//! - Angles are in degrees, positive = clockwise on screen
//! - Origin is top-left corner, Y grows downward

mod center;
mod rotator;

pub use center::{resolve, resolve_center, CenterMode};
pub use rotator::{
    composite_transform, rotate, rotate_about, rotate_point, rotate_shape, rotated, rotated_kind,
    RotateOutcome,
};
