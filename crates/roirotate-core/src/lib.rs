//! RoiRotate Core - Region-of-interest rotation library
//!
//! This crate provides the region model (lines, points, polygons, rectangles,
//! ovals, composite outlines and image stamps) and the engine that rotates a
//! region by an arbitrary angle about a chosen center, plus the interactive
//! rotate-selection command built on top of it.

pub mod command;
pub mod geometry;
pub mod roi;
pub mod rotate;

pub use command::{CommandError, CommandOutcome, RotateSelection, RotateSettings};
pub use geometry::{Bounds, Point};
pub use roi::{
    CompositeShape, Geometry, ImageStamp, PolygonKind, Roi, RoiError, RoiKind, RoiStyle, Shape,
};
pub use rotate::{resolve_center, rotate, rotate_about, rotated, RotateOutcome};
