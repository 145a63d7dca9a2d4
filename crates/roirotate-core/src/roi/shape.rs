//! Vertex-addressable region shapes.
//!
//! Lines, point sets and polygons store their vertices directly. Rectangles
//! and ovals are stored as bounds and expose a polygonal outline on demand:
//! a plain rectangle yields its 4 corners, while rounded rectangles and ovals
//! yield a sampled outline with more than 4 vertices.

use super::{RoiError, RoiKind};
use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Minimum number of vertices used to sample an oval outline.
const MIN_OVAL_VERTICES: usize = 16;

/// Upper limit on sampled oval vertices.
const MAX_OVAL_VERTICES: usize = 4096;

/// Minimum number of segments per rounded rectangle corner.
const MIN_CORNER_SEGMENTS: usize = 4;

/// Upper limit on segments per rounded rectangle corner.
const MAX_CORNER_SEGMENTS: usize = 1024;

fn check_finite(points: &[Point]) -> Result<(), RoiError> {
    if points.iter().all(Point::is_finite) {
        Ok(())
    } else {
        Err(RoiError::NonFiniteCoordinate)
    }
}

fn check_bounds(bounds: &Bounds) -> Result<(), RoiError> {
    if !bounds.is_finite() {
        return Err(RoiError::NonFiniteCoordinate);
    }
    if bounds.width < 0.0 || bounds.height < 0.0 {
        return Err(RoiError::InvalidSize {
            width: bounds.width,
            height: bounds.height,
        });
    }
    Ok(())
}

/// Straight line between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineRaw")]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

#[derive(Deserialize)]
struct LineRaw {
    start: Point,
    end: Point,
}

impl TryFrom<LineRaw> for Line {
    type Error = RoiError;

    fn try_from(raw: LineRaw) -> Result<Self, Self::Error> {
        Line::new(raw.start, raw.end)
    }
}

impl Line {
    pub fn new(start: Point, end: Point) -> Result<Self, RoiError> {
        check_finite(&[start, end])?;
        Ok(Self { start, end })
    }

    /// Build a line from an extracted point sequence of exactly 2 points.
    pub fn from_points(points: &[Point]) -> Result<Self, RoiError> {
        match points {
            [start, end] => Self::new(*start, *end),
            _ => Err(RoiError::LineEndpoints(points.len())),
        }
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}

/// Unconnected collection of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointSetRaw")]
pub struct PointSet {
    points: Vec<Point>,
}

#[derive(Deserialize)]
struct PointSetRaw {
    points: Vec<Point>,
}

impl TryFrom<PointSetRaw> for PointSet {
    type Error = RoiError;

    fn try_from(raw: PointSetRaw) -> Result<Self, Self::Error> {
        PointSet::new(raw.points)
    }
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Result<Self, RoiError> {
        if points.is_empty() {
            return Err(RoiError::EmptyVertices(RoiKind::Point));
        }
        check_finite(&points)?;
        Ok(Self { points })
    }

    /// Wrap points already known to be finite and non-empty.
    pub(crate) fn from_trusted(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Category of a polygon-family region.
///
/// The closed kinds (`Polygon`, `Freehand`, `Traced`) enclose an area; the
/// open kinds (`Polyline`, `Freeline`, `Angle`) are vertex paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolygonKind {
    /// Straight-edged polygon drawn vertex by vertex
    Polygon,
    /// Free-form closed outline
    Freehand,
    /// Outline produced by tracing a pixel boundary
    Traced,
    /// Segmented open line
    Polyline,
    /// Free-form open line
    Freeline,
    /// Three-point angle measurement
    Angle,
}

impl PolygonKind {
    pub fn roi_kind(self) -> RoiKind {
        match self {
            PolygonKind::Polygon => RoiKind::Polygon,
            PolygonKind::Freehand => RoiKind::Freehand,
            PolygonKind::Traced => RoiKind::Traced,
            PolygonKind::Polyline => RoiKind::Polyline,
            PolygonKind::Freeline => RoiKind::Freeline,
            PolygonKind::Angle => RoiKind::Angle,
        }
    }

    /// Returns true for kinds whose outline is implicitly closed.
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            PolygonKind::Polygon | PolygonKind::Freehand | PolygonKind::Traced
        )
    }
}

/// Ordered vertex sequence of a polygon-family kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRaw")]
pub struct Polygon {
    kind: PolygonKind,
    vertices: Vec<Point>,
}

#[derive(Deserialize)]
struct PolygonRaw {
    kind: PolygonKind,
    vertices: Vec<Point>,
}

impl TryFrom<PolygonRaw> for Polygon {
    type Error = RoiError;

    fn try_from(raw: PolygonRaw) -> Result<Self, Self::Error> {
        Polygon::new(raw.kind, raw.vertices)
    }
}

impl Polygon {
    pub fn new(kind: PolygonKind, vertices: Vec<Point>) -> Result<Self, RoiError> {
        if vertices.is_empty() {
            return Err(RoiError::EmptyVertices(kind.roi_kind()));
        }
        check_finite(&vertices)?;
        Ok(Self { kind, vertices })
    }

    /// Wrap vertices already known to be finite and non-empty.
    pub(crate) fn from_trusted(kind: PolygonKind, vertices: Vec<Point>) -> Self {
        Self { kind, vertices }
    }

    pub fn kind(&self) -> PolygonKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Axis-aligned rectangle, optionally with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleRaw")]
pub struct Rectangle {
    bounds: Bounds,
    /// Diameter of the corner arcs (0 = square corners)
    corner_diameter: f64,
}

#[derive(Deserialize)]
struct RectangleRaw {
    bounds: Bounds,
    #[serde(default)]
    corner_diameter: f64,
}

impl TryFrom<RectangleRaw> for Rectangle {
    type Error = RoiError;

    fn try_from(raw: RectangleRaw) -> Result<Self, Self::Error> {
        Rectangle::rounded(raw.bounds, raw.corner_diameter)
    }
}

impl Rectangle {
    pub fn new(bounds: Bounds) -> Result<Self, RoiError> {
        Self::rounded(bounds, 0.0)
    }

    pub fn rounded(bounds: Bounds, corner_diameter: f64) -> Result<Self, RoiError> {
        check_bounds(&bounds)?;
        if !corner_diameter.is_finite() {
            return Err(RoiError::NonFiniteCoordinate);
        }
        Ok(Self {
            bounds,
            corner_diameter: corner_diameter.max(0.0),
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn corner_diameter(&self) -> f64 {
        self.corner_diameter
    }

    /// Effective corner radius, limited by half the shorter side.
    fn corner_radius(&self) -> f64 {
        let half_min = self.bounds.width.min(self.bounds.height) / 2.0;
        (self.corner_diameter / 2.0).min(half_min).max(0.0)
    }

    pub fn is_rounded(&self) -> bool {
        self.corner_radius() > 0.0
    }

    /// Outline vertices in clockwise screen order.
    ///
    /// Square corners give exactly the 4 corners starting at the top-left.
    /// Rounded corners give each quarter arc sampled as a polyline.
    pub fn vertices(&self) -> Vec<Point> {
        let r = self.corner_radius();
        if r <= 0.0 {
            return self.bounds.corners().to_vec();
        }

        let b = &self.bounds;
        let segments = corner_segments(r);
        // Arc centers with their start angles, clockwise from the top-right
        let corners = [
            (Point::new(b.right() - r, b.y + r), -FRAC_PI_2),
            (Point::new(b.right() - r, b.bottom() - r), 0.0),
            (Point::new(b.x + r, b.bottom() - r), FRAC_PI_2),
            (Point::new(b.x + r, b.y + r), PI),
        ];

        let mut vertices = Vec::with_capacity(4 * (segments + 1));
        for (center, start) in corners {
            for i in 0..=segments {
                let t = start + FRAC_PI_2 * i as f64 / segments as f64;
                vertices.push(Point::new(center.x + r * t.cos(), center.y + r * t.sin()));
            }
        }
        vertices
    }
}

/// Segment count for a quarter arc of the given radius (about 2 px per segment).
fn corner_segments(radius: f64) -> usize {
    let arc_length = FRAC_PI_2 * radius;
    ((arc_length / 2.0).ceil() as usize).clamp(MIN_CORNER_SEGMENTS, MAX_CORNER_SEGMENTS)
}

/// Axis-aligned ellipse inscribed in its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OvalRaw")]
pub struct Oval {
    bounds: Bounds,
}

#[derive(Deserialize)]
struct OvalRaw {
    bounds: Bounds,
}

impl TryFrom<OvalRaw> for Oval {
    type Error = RoiError;

    fn try_from(raw: OvalRaw) -> Result<Self, Self::Error> {
        Oval::new(raw.bounds)
    }
}

impl Oval {
    pub fn new(bounds: Bounds) -> Result<Self, RoiError> {
        check_bounds(&bounds)?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Sampled outline, clockwise from the topmost point.
    ///
    /// Vertex count grows with the perimeter (about one vertex per 2 px)
    /// and never drops below 16.
    pub fn vertices(&self) -> Vec<Point> {
        let center = self.bounds.center();
        let rx = self.bounds.width / 2.0;
        let ry = self.bounds.height / 2.0;
        let n = oval_vertex_count(rx, ry);

        (0..n)
            .map(|i| {
                let t = -FRAC_PI_2 + 2.0 * PI * i as f64 / n as f64;
                Point::new(center.x + rx * t.cos(), center.y + ry * t.sin())
            })
            .collect()
    }
}

/// Vertex count for an ellipse, from Ramanujan's perimeter approximation.
fn oval_vertex_count(rx: f64, ry: f64) -> usize {
    let h = (3.0 * rx + ry) * (rx + 3.0 * ry);
    let perimeter = PI * (3.0 * (rx + ry) - h.max(0.0).sqrt());
    ((perimeter / 2.0).ceil() as usize).clamp(MIN_OVAL_VERTICES, MAX_OVAL_VERTICES)
}
