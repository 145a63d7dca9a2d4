//! Region-of-interest model.
//!
//! A [`Roi`] couples a geometry with a style bundle and an optional sticky
//! rotation center. The geometry is a closed set of representation kinds:
//!
//! - **Point-set kinds** ([`Shape::Line`], [`Shape::Points`],
//!   [`Shape::Polygon`], [`Shape::Rectangle`], [`Shape::Oval`]) expose an
//!   ordered vertex sequence
//! - **Composite** ([`Shape::Composite`]) is an arbitrary outline that can
//!   only be transformed as a whole
//! - **Image stamp** ([`Geometry::ImageStamp`]) carries its rotation as
//!   metadata and is rotated in place

mod composite;
mod shape;
mod stamp;
mod style;

pub use composite::{CompositeShape, FLATTEN_TOLERANCE};
pub use shape::{Line, Oval, PointSet, Polygon, PolygonKind, Rectangle};
pub use stamp::ImageStamp;
pub use style::{Color, RoiStyle};

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for region construction.
#[derive(Debug, Error)]
pub enum RoiError {
    /// A coordinate or size was NaN or infinite.
    #[error("Coordinates must be finite")]
    NonFiniteCoordinate,

    /// A line was built from the wrong number of points.
    #[error("A line needs exactly 2 endpoints, got {0}")]
    LineEndpoints(usize),

    /// A point-set kind was built with no vertices.
    #[error("{0:?} region needs at least one vertex")]
    EmptyVertices(RoiKind),

    /// The kind cannot be built from a bare vertex list.
    #[error("{0:?} region cannot be constructed from vertices")]
    NotVertexConstructible(RoiKind),

    /// Negative width or height.
    #[error("Invalid region size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// Representation kind tag.
///
/// Rounded rectangles share the `Rectangle` tag; they are told apart by the
/// number of vertices their outline yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoiKind {
    Rectangle,
    Oval,
    Polygon,
    Freehand,
    Traced,
    Line,
    Polyline,
    Freeline,
    Angle,
    Composite,
    Point,
    ImageStamp,
}

impl RoiKind {
    /// Polygon-family category for kinds stored as a [`Polygon`].
    pub fn polygon_kind(self) -> Option<PolygonKind> {
        match self {
            RoiKind::Polygon => Some(PolygonKind::Polygon),
            RoiKind::Freehand => Some(PolygonKind::Freehand),
            RoiKind::Traced => Some(PolygonKind::Traced),
            RoiKind::Polyline => Some(PolygonKind::Polyline),
            RoiKind::Freeline => Some(PolygonKind::Freeline),
            RoiKind::Angle => Some(PolygonKind::Angle),
            RoiKind::Rectangle
            | RoiKind::Oval
            | RoiKind::Line
            | RoiKind::Composite
            | RoiKind::Point
            | RoiKind::ImageStamp => None,
        }
    }
}

/// Geometry that rotates into new coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Points(PointSet),
    Polygon(Polygon),
    Rectangle(Rectangle),
    Oval(Oval),
    Composite(CompositeShape),
}

impl Shape {
    pub fn kind(&self) -> RoiKind {
        match self {
            Shape::Line(_) => RoiKind::Line,
            Shape::Points(_) => RoiKind::Point,
            Shape::Polygon(p) => p.kind().roi_kind(),
            Shape::Rectangle(_) => RoiKind::Rectangle,
            Shape::Oval(_) => RoiKind::Oval,
            Shape::Composite(_) => RoiKind::Composite,
        }
    }

    /// Ordered vertex sequence as a float polygon.
    ///
    /// Rectangles and ovals yield their outline; composites yield their
    /// flattened subpaths one after another.
    pub fn vertices(&self) -> Vec<Point> {
        match self {
            Shape::Line(line) => line.endpoints().to_vec(),
            Shape::Points(points) => points.points().to_vec(),
            Shape::Polygon(polygon) => polygon.vertices().to_vec(),
            Shape::Rectangle(rect) => rect.vertices(),
            Shape::Oval(oval) => oval.vertices(),
            Shape::Composite(composite) => composite.vertices(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Line(line) => Bounds::enclosing(&line.endpoints()),
            Shape::Points(points) => Bounds::enclosing(points.points()),
            Shape::Polygon(polygon) => Bounds::enclosing(polygon.vertices()),
            Shape::Rectangle(rect) => rect.bounds(),
            Shape::Oval(oval) => oval.bounds(),
            Shape::Composite(composite) => composite.bounds(),
        }
    }
}

/// Region geometry: either a rotatable shape or an image stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Shape(Shape),
    ImageStamp(ImageStamp),
}

/// A region of interest.
///
/// Deserialization runs the same checks as the constructors, so a region
/// read from JSON or JavaScript is as valid as one built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RoiRaw")]
pub struct Roi {
    geometry: Geometry,
    pub style: RoiStyle,
    /// Sticky pivot for repeated rotations
    rotation_center: Option<Point>,
}

#[derive(Deserialize)]
struct RoiRaw {
    geometry: Geometry,
    #[serde(default)]
    style: RoiStyle,
    #[serde(default)]
    rotation_center: Option<Point>,
}

impl TryFrom<RoiRaw> for Roi {
    type Error = RoiError;

    fn try_from(raw: RoiRaw) -> Result<Self, Self::Error> {
        if raw.rotation_center.is_some_and(|c| !c.is_finite()) {
            return Err(RoiError::NonFiniteCoordinate);
        }
        Ok(Self {
            geometry: raw.geometry,
            style: raw.style,
            rotation_center: raw.rotation_center,
        })
    }
}

impl Roi {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            style: RoiStyle::default(),
            rotation_center: None,
        }
    }

    pub fn from_shape(shape: Shape) -> Self {
        Self::new(Geometry::Shape(shape))
    }

    /// Build a point-set region of the given kind from vertices.
    ///
    /// Supported for lines (exactly 2 points), point collections and the
    /// polygon family. Rectangles, ovals, composites and image stamps are
    /// defined by other parameters and yield
    /// [`RoiError::NotVertexConstructible`].
    pub fn from_vertices(kind: RoiKind, vertices: Vec<Point>) -> Result<Self, RoiError> {
        let shape = match kind {
            RoiKind::Line => Shape::Line(Line::from_points(&vertices)?),
            RoiKind::Point => Shape::Points(PointSet::new(vertices)?),
            RoiKind::Polygon
            | RoiKind::Freehand
            | RoiKind::Traced
            | RoiKind::Polyline
            | RoiKind::Freeline
            | RoiKind::Angle => {
                let Some(polygon_kind) = kind.polygon_kind() else {
                    return Err(RoiError::NotVertexConstructible(kind));
                };
                Shape::Polygon(Polygon::new(polygon_kind, vertices)?)
            }
            RoiKind::Rectangle | RoiKind::Oval | RoiKind::Composite | RoiKind::ImageStamp => {
                return Err(RoiError::NotVertexConstructible(kind));
            }
        };
        Ok(Self::from_shape(shape))
    }

    pub fn line(start: Point, end: Point) -> Result<Self, RoiError> {
        Ok(Self::from_shape(Shape::Line(Line::new(start, end)?)))
    }

    pub fn points(points: Vec<Point>) -> Result<Self, RoiError> {
        Ok(Self::from_shape(Shape::Points(PointSet::new(points)?)))
    }

    pub fn polygon(kind: PolygonKind, vertices: Vec<Point>) -> Result<Self, RoiError> {
        Ok(Self::from_shape(Shape::Polygon(Polygon::new(kind, vertices)?)))
    }

    pub fn rectangle(bounds: Bounds) -> Result<Self, RoiError> {
        Ok(Self::from_shape(Shape::Rectangle(Rectangle::new(bounds)?)))
    }

    pub fn rounded_rectangle(bounds: Bounds, corner_diameter: f64) -> Result<Self, RoiError> {
        Ok(Self::from_shape(Shape::Rectangle(Rectangle::rounded(
            bounds,
            corner_diameter,
        )?)))
    }

    pub fn oval(bounds: Bounds) -> Result<Self, RoiError> {
        Ok(Self::from_shape(Shape::Oval(Oval::new(bounds)?)))
    }

    pub fn composite(shape: CompositeShape) -> Self {
        Self::from_shape(Shape::Composite(shape))
    }

    pub fn image_stamp(stamp: ImageStamp) -> Self {
        Self::new(Geometry::ImageStamp(stamp))
    }

    /// Builder-style style assignment.
    pub fn with_style(mut self, style: RoiStyle) -> Self {
        self.style = style;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Apply a rotation that the region stores as metadata.
    ///
    /// Only image stamps rotate intrinsically; returns false (and leaves the
    /// region untouched) for every coordinate-based shape.
    pub fn rotate_intrinsic(&mut self, angle_degrees: f64) -> bool {
        match &mut self.geometry {
            Geometry::ImageStamp(stamp) => {
                stamp.rotate(angle_degrees);
                true
            }
            Geometry::Shape(_) => false,
        }
    }

    /// The rotatable shape, or `None` for image stamps.
    pub fn shape(&self) -> Option<&Shape> {
        match &self.geometry {
            Geometry::Shape(shape) => Some(shape),
            Geometry::ImageStamp(_) => None,
        }
    }

    pub fn kind(&self) -> RoiKind {
        match &self.geometry {
            Geometry::Shape(shape) => shape.kind(),
            Geometry::ImageStamp(_) => RoiKind::ImageStamp,
        }
    }

    /// Vertex sequence; an image stamp yields the corners of its raster.
    pub fn vertices(&self) -> Vec<Point> {
        match &self.geometry {
            Geometry::Shape(shape) => shape.vertices(),
            Geometry::ImageStamp(stamp) => stamp.bounds().corners().to_vec(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match &self.geometry {
            Geometry::Shape(shape) => shape.bounds(),
            Geometry::ImageStamp(stamp) => stamp.bounds(),
        }
    }

    /// Copy the style bundle of `source` onto this region.
    pub fn copy_attributes(&mut self, source: &Roi) {
        self.style = source.style.clone();
    }

    /// Pivot used when rotating around the region itself.
    ///
    /// This is the sticky center when one is set, otherwise the center of
    /// the region's bounds.
    pub fn rotation_center(&self) -> Point {
        self.rotation_center.unwrap_or_else(|| self.bounds().center())
    }

    /// The sticky center, if one has been attached.
    pub fn sticky_rotation_center(&self) -> Option<Point> {
        self.rotation_center
    }

    pub fn set_rotation_center(&mut self, center: Point) {
        self.rotation_center = Some(center);
    }

    pub fn clear_rotation_center(&mut self) {
        self.rotation_center = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled() -> RoiStyle {
        RoiStyle {
            name: Some("cell-1".to_string()),
            stroke_color: Some(Color::YELLOW),
            fill_color: None,
            stroke_width: 2.0,
            position: 4,
            group: 2,
        }
    }

    #[test]
    fn test_from_vertices_line() {
        let roi = Roi::from_vertices(
            RoiKind::Line,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
        )
        .unwrap();
        assert_eq!(roi.kind(), RoiKind::Line);
        assert_eq!(roi.vertices().len(), 2);
    }

    #[test]
    fn test_from_vertices_polygon_family() {
        let verts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
        ];
        for kind in [
            RoiKind::Polygon,
            RoiKind::Freehand,
            RoiKind::Traced,
            RoiKind::Polyline,
            RoiKind::Freeline,
            RoiKind::Angle,
        ] {
            let roi = Roi::from_vertices(kind, verts.clone()).unwrap();
            assert_eq!(roi.kind(), kind);
            assert_eq!(roi.vertices(), verts);
        }
    }

    #[test]
    fn test_from_vertices_rejects_bounds_kinds() {
        for kind in [
            RoiKind::Rectangle,
            RoiKind::Oval,
            RoiKind::Composite,
            RoiKind::ImageStamp,
        ] {
            let err = Roi::from_vertices(kind, vec![Point::new(0.0, 0.0)]).unwrap_err();
            assert!(matches!(err, RoiError::NotVertexConstructible(k) if k == kind));
        }
    }

    #[test]
    fn test_polygon_kind_mapping_is_consistent() {
        for kind in [
            PolygonKind::Polygon,
            PolygonKind::Freehand,
            PolygonKind::Traced,
            PolygonKind::Polyline,
            PolygonKind::Freeline,
            PolygonKind::Angle,
        ] {
            assert_eq!(kind.roi_kind().polygon_kind(), Some(kind));
        }
        assert_eq!(RoiKind::Rectangle.polygon_kind(), None);
    }

    #[test]
    fn test_rotation_center_defaults_to_bounds_center() {
        let roi = Roi::rectangle(Bounds::new(0.0, 0.0, 10.0, 4.0)).unwrap();
        assert_eq!(roi.sticky_rotation_center(), None);
        assert_eq!(roi.rotation_center(), Point::new(5.0, 2.0));
    }

    #[test]
    fn test_sticky_rotation_center() {
        let mut roi = Roi::rectangle(Bounds::new(0.0, 0.0, 10.0, 4.0)).unwrap();
        roi.set_rotation_center(Point::new(1.0, 1.0));
        assert_eq!(roi.rotation_center(), Point::new(1.0, 1.0));

        roi.clear_rotation_center();
        assert_eq!(roi.rotation_center(), Point::new(5.0, 2.0));
    }

    #[test]
    fn test_copy_attributes() {
        let source = Roi::oval(Bounds::new(0.0, 0.0, 4.0, 4.0))
            .unwrap()
            .with_style(styled());
        let mut dest = Roi::points(vec![Point::new(1.0, 1.0)]).unwrap();
        assert!(dest.style.is_default());

        dest.copy_attributes(&source);
        assert_eq!(dest.style, source.style);
    }

    #[test]
    fn test_stamp_kind_and_vertices() {
        let stamp = ImageStamp::new(Point::new(2.0, 3.0), 4, 5).unwrap();
        let roi = Roi::image_stamp(stamp);
        assert_eq!(roi.kind(), RoiKind::ImageStamp);
        assert!(roi.shape().is_none());
        assert_eq!(roi.vertices().len(), 4);
        assert_eq!(roi.bounds(), Bounds::new(2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn test_rotate_intrinsic_only_for_stamps() {
        let mut stamp = Roi::image_stamp(ImageStamp::new(Point::new(0.0, 0.0), 8, 8).unwrap());
        assert!(stamp.rotate_intrinsic(20.0));
        match stamp.geometry() {
            Geometry::ImageStamp(s) => assert!((s.angle() - 20.0).abs() < 1e-12),
            Geometry::Shape(_) => panic!("stamp changed kind"),
        }

        let mut rect = Roi::rectangle(Bounds::new(0.0, 0.0, 2.0, 2.0)).unwrap();
        assert!(!rect.rotate_intrinsic(20.0));
        assert_eq!(rect.vertices(), Bounds::new(0.0, 0.0, 2.0, 2.0).corners().to_vec());
    }

    #[test]
    fn test_rounded_rectangle_keeps_rectangle_kind() {
        let roi = Roi::rounded_rectangle(Bounds::new(0.0, 0.0, 30.0, 30.0), 10.0).unwrap();
        assert_eq!(roi.kind(), RoiKind::Rectangle);
        assert!(roi.vertices().len() > 4);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut roi = Roi::rounded_rectangle(Bounds::new(1.0, 2.0, 30.0, 20.0), 6.0)
            .unwrap()
            .with_style(styled());
        roi.set_rotation_center(Point::new(3.0, 4.0));

        let json = serde_json::to_string(&roi).unwrap();
        let back: Roi = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), RoiKind::Rectangle);
        assert_eq!(back.vertices(), roi.vertices());
        assert_eq!(back.style, roi.style);
        assert_eq!(back.sticky_rotation_center(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_deserialize_defaults_style_and_center() {
        let json = r#"{"geometry":{"Shape":{"Points":{"points":[{"x":1.0,"y":2.0}]}}}}"#;
        let roi: Roi = serde_json::from_str(json).unwrap();
        assert!(roi.style.is_default());
        assert_eq!(roi.sticky_rotation_center(), None);
    }

    #[test]
    fn test_deserialize_rejects_invalid_geometry() {
        let cases = [
            (
                r#"{"geometry":{"Shape":{"Polygon":{"kind":"Polygon","vertices":[]}}}}"#,
                "Polygon region needs at least one vertex",
            ),
            (
                r#"{"geometry":{"Shape":{"Points":{"points":[]}}}}"#,
                "Point region needs at least one vertex",
            ),
            (
                r#"{"geometry":{"Shape":{"Rectangle":{"bounds":{"x":0.0,"y":0.0,"width":-10.0,"height":-5.0}}}}}"#,
                "Invalid region size -10x-5",
            ),
            (
                r#"{"geometry":{"Shape":{"Oval":{"bounds":{"x":0.0,"y":0.0,"width":4.0,"height":-1.0}}}}}"#,
                "Invalid region size 4x-1",
            ),
        ];
        for (json, message) in cases {
            let err = serde_json::from_str::<Roi>(json).unwrap_err();
            assert!(err.to_string().contains(message), "{}: {}", json, err);
        }
    }

    #[test]
    fn test_point_bounds_center_is_the_point() {
        let roi = Roi::points(vec![Point::new(5.0, 5.0)]).unwrap();
        assert_eq!(roi.rotation_center(), Point::new(5.0, 5.0));
    }
}
