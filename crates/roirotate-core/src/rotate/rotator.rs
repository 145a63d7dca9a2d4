//! Shape rotation.
//!
//! # Sign Convention
//!
//! Angles are in degrees and a positive angle turns the region clockwise on
//! screen (Y grows downward). Each vertex is rotated in polar form:
//!
//! ```text
//! theta  = -angle * PI / 180
//! dx     = x - cx
//! dy     = cy - y               (flip Y to math convention)
//! radius = sqrt(dx² + dy²)
//! a      = atan2(dy, dx)
//! x'     = cx + radius * cos(a + theta)
//! y'     = cy - radius * sin(a + theta)   (flip Y back)
//! ```
//!
//! which equals the screen-space clockwise rotation matrix
//! `[cos φ, -sin φ; sin φ, cos φ]` with `φ = angle * PI / 180`. Composite
//! outlines use that matrix directly through a `lyon` transform.

use crate::geometry::Point;
use crate::roi::{
    CompositeShape, Line, PointSet, Polygon, PolygonKind, Roi, RoiKind, Shape,
};
use crate::rotate::center::{resolve, CenterMode};
use lyon::math::{vector, Angle, Transform};
use tracing::debug;

/// Result of rotating a region.
#[derive(Debug, Clone)]
#[must_use]
pub enum RotateOutcome {
    /// A new region replaces the original, which is left untouched.
    Replaced(Roi),
    /// The region rotated itself in place (image stamps); there is no
    /// replacement to install.
    RotatedInPlace,
}

impl RotateOutcome {
    /// The replacement region, if one was produced.
    pub fn into_replacement(self) -> Option<Roi> {
        match self {
            RotateOutcome::Replaced(roi) => Some(roi),
            RotateOutcome::RotatedInPlace => None,
        }
    }

    pub fn is_in_place(&self) -> bool {
        matches!(self, RotateOutcome::RotatedInPlace)
    }
}

/// Rotate a single point about `center`.
#[inline]
pub fn rotate_point(p: Point, angle_degrees: f64, center: Point) -> Point {
    let theta = -angle_degrees * std::f64::consts::PI / 180.0;
    let dx = p.x - center.x;
    let dy = center.y - p.y;
    let radius = (dx * dx + dy * dy).sqrt();
    let a = dy.atan2(dx);
    Point::new(
        center.x + radius * (a + theta).cos(),
        center.y - radius * (a + theta).sin(),
    )
}

fn rotate_points(points: &[Point], angle_degrees: f64, center: Point) -> Vec<Point> {
    points
        .iter()
        .map(|&p| rotate_point(p, angle_degrees, center))
        .collect()
}

/// Kind a region of `kind` takes after rotation.
///
/// `vertex_count` is the number of vertices its outline yields; it only
/// matters for rectangles, where more than 4 marks a rounded rectangle.
///
/// | input                  | output     |
/// |------------------------|------------|
/// | rectangle (4 vertices) | polygon    |
/// | rounded rectangle      | freehand   |
/// | oval, traced           | freehand   |
/// | anything else          | unchanged  |
pub fn rotated_kind(kind: RoiKind, vertex_count: usize) -> RoiKind {
    match kind {
        RoiKind::Rectangle if vertex_count > 4 => RoiKind::Freehand,
        RoiKind::Rectangle => RoiKind::Polygon,
        RoiKind::Oval | RoiKind::Traced => RoiKind::Freehand,
        RoiKind::Polygon
        | RoiKind::Freehand
        | RoiKind::Polyline
        | RoiKind::Freeline
        | RoiKind::Angle
        | RoiKind::Line
        | RoiKind::Point
        | RoiKind::Composite
        | RoiKind::ImageStamp => kind,
    }
}

/// Polygon kind for a rotated rectangle, oval or polygon-family region.
fn rotated_polygon_kind(kind: RoiKind, vertex_count: usize) -> PolygonKind {
    // These inputs always land in the polygon family
    rotated_kind(kind, vertex_count)
        .polygon_kind()
        .unwrap_or(PolygonKind::Freehand)
}

fn rotate_into_polygon(
    kind: RoiKind,
    vertices: &[Point],
    angle_degrees: f64,
    center: Point,
) -> Shape {
    Shape::Polygon(Polygon::from_trusted(
        rotated_polygon_kind(kind, vertices.len()),
        rotate_points(vertices, angle_degrees, center),
    ))
}

/// Affine transform rotating a composite outline about `center`.
///
/// The outline is stored relative to its bounds origin, so the transform
/// first translates by `origin` into image coordinates and then rotates by
/// `+angle` radians (the negated polar `theta`) about `center`.
pub fn composite_transform(angle_degrees: f64, center: Point, origin: Point) -> Transform {
    let (cx, cy) = (center.x as f32, center.y as f32);
    Transform::translation(origin.x as f32, origin.y as f32)
        .then_translate(vector(-cx, -cy))
        .then_rotate(Angle::radians(angle_degrees.to_radians() as f32))
        .then_translate(vector(cx, cy))
}

fn rotate_composite(shape: &CompositeShape, angle_degrees: f64, center: Point) -> CompositeShape {
    let transform = composite_transform(angle_degrees, center, shape.origin());
    CompositeShape::normalized(shape.outline().clone().transformed(&transform))
}

/// Rotate a shape about `center`, producing a new shape.
///
/// Point-set shapes rotate vertex by vertex; composites are transformed as
/// a whole. The output kind follows [`rotated_kind`].
pub fn rotate_shape(shape: &Shape, angle_degrees: f64, center: Point) -> Shape {
    match shape {
        Shape::Composite(composite) => {
            Shape::Composite(rotate_composite(composite, angle_degrees, center))
        }
        Shape::Line(line) => Shape::Line(Line {
            start: rotate_point(line.start, angle_degrees, center),
            end: rotate_point(line.end, angle_degrees, center),
        }),
        Shape::Points(points) => Shape::Points(PointSet::from_trusted(rotate_points(
            points.points(),
            angle_degrees,
            center,
        ))),
        Shape::Polygon(polygon) => rotate_into_polygon(
            polygon.kind().roi_kind(),
            polygon.vertices(),
            angle_degrees,
            center,
        ),
        Shape::Rectangle(rect) => {
            rotate_into_polygon(RoiKind::Rectangle, &rect.vertices(), angle_degrees, center)
        }
        Shape::Oval(oval) => {
            rotate_into_polygon(RoiKind::Oval, &oval.vertices(), angle_degrees, center)
        }
    }
}

/// Rotate a region about `center` without touching it.
///
/// Returns `None` for image stamps, whose rotation is intrinsic and must go
/// through [`rotate_about`]. The result carries the style of `roi` but no
/// sticky rotation center.
pub fn rotated(roi: &Roi, angle_degrees: f64, center: Point) -> Option<Roi> {
    let shape = roi.shape()?;
    debug!(
        kind = ?shape.kind(),
        angle_degrees,
        center_x = center.x,
        center_y = center.y,
        "rotating region"
    );
    let mut out = Roi::from_shape(rotate_shape(shape, angle_degrees, center));
    out.copy_attributes(roi);
    Some(out)
}

/// Rotate a region about an explicit center.
///
/// Coordinate-based regions produce a replacement and `roi` is not
/// modified. Image stamps rotate in place and report
/// [`RotateOutcome::RotatedInPlace`].
pub fn rotate_about(roi: &mut Roi, angle_degrees: f64, center: Point) -> RotateOutcome {
    if let Some(replacement) = rotated(roi, angle_degrees, center) {
        return RotateOutcome::Replaced(replacement);
    }
    roi.rotate_intrinsic(angle_degrees);
    debug!(angle_degrees, "image stamp rotated in place");
    RotateOutcome::RotatedInPlace
}

/// Rotate a region about its own rotation center.
///
/// The resolved center is attached to the replacement as its sticky
/// rotation center, so repeated calls keep pivoting around the same point.
pub fn rotate(roi: &mut Roi, angle_degrees: f64) -> RotateOutcome {
    let center = resolve(roi, CenterMode::Region);
    match rotate_about(roi, angle_degrees, center) {
        RotateOutcome::Replaced(mut replacement) => {
            replacement.set_rotation_center(center);
            RotateOutcome::Replaced(replacement)
        }
        RotateOutcome::RotatedInPlace => RotateOutcome::RotatedInPlace,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
