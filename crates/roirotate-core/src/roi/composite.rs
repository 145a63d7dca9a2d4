//! Composite (arbitrary outline) regions.
//!
//! A composite region is a `lyon` path that may contain several disjoint
//! subpaths, holes and curved segments. It is not vertex addressable, so it
//! is always transformed as a whole.
//!
//! The outline is stored relative to the top-left corner of its own bounding
//! box; `origin` holds that corner in image coordinates. Any transform that
//! works in image coordinates must therefore first translate the outline by
//! `origin`.

use super::{RoiError, RoiKind};
use crate::geometry::{Bounds, Point};
use lyon::algorithms::aabb::bounding_box;
use lyon::math::{point, Transform};
use lyon::path::iterator::PathIterator;
use lyon::path::{Event, Path};
use serde::{Deserialize, Serialize};

/// Flattening tolerance (pixels) used when extracting vertices.
pub const FLATTEN_TOLERANCE: f32 = 0.1;

/// Arbitrary outline region.
///
/// Coordinates are held in `f32`, as `lyon` stores them. Far from the
/// origin this limits precision: at x = 20000 one ulp is about 0.002 px,
/// so a rotation followed by its inverse may be off by that much.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CompositeShapeRaw")]
pub struct CompositeShape {
    /// Bounding box origin in image coordinates
    origin: Point,
    /// Outline relative to `origin`
    outline: Path,
}

#[derive(Deserialize)]
struct CompositeShapeRaw {
    origin: Point,
    outline: Path,
}

impl TryFrom<CompositeShapeRaw> for CompositeShape {
    type Error = RoiError;

    fn try_from(raw: CompositeShapeRaw) -> Result<Self, Self::Error> {
        if !raw.origin.is_finite() {
            return Err(RoiError::NonFiniteCoordinate);
        }
        check_outline(&raw.outline)?;
        Ok(Self {
            origin: raw.origin,
            outline: raw.outline,
        })
    }
}

fn check_outline(path: &Path) -> Result<(), RoiError> {
    if path.iter().next().is_none() {
        return Err(RoiError::EmptyVertices(RoiKind::Composite));
    }
    let bb = bounding_box(path.iter());
    let finite = [bb.min.x, bb.min.y, bb.max.x, bb.max.y]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(RoiError::NonFiniteCoordinate);
    }
    Ok(())
}

impl CompositeShape {
    /// Wrap an outline given in image coordinates.
    pub fn from_path(path: Path) -> Result<Self, RoiError> {
        check_outline(&path)?;
        Ok(Self::normalized(path))
    }

    /// Build a composite from closed polygons (outer outlines and holes).
    ///
    /// Polygons with no vertices are skipped.
    pub fn from_polygons(polygons: &[Vec<Point>]) -> Result<Self, RoiError> {
        let mut builder = Path::builder();
        let mut any = false;
        for polygon in polygons {
            let Some((first, rest)) = polygon.split_first() else {
                continue;
            };
            if !polygon.iter().all(Point::is_finite) {
                return Err(RoiError::NonFiniteCoordinate);
            }
            builder.begin(point(first.x as f32, first.y as f32));
            for p in rest {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            builder.end(true);
            any = true;
        }
        if !any {
            return Err(RoiError::EmptyVertices(RoiKind::Composite));
        }
        Ok(Self::normalized(builder.build()))
    }

    /// Re-anchor an absolute outline at its own bounding box.
    pub(crate) fn normalized(path: Path) -> Self {
        let bb = bounding_box(path.iter());
        let origin = Point::new(bb.min.x as f64, bb.min.y as f64);
        let outline = path.transformed(&Transform::translation(-bb.min.x, -bb.min.y));
        Self { origin, outline }
    }

    /// Bounding box origin in image coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Outline relative to [`Self::origin`].
    pub fn outline(&self) -> &Path {
        &self.outline
    }

    /// Outline in image coordinates.
    pub fn absolute_outline(&self) -> Path {
        self.outline.clone().transformed(&Transform::translation(
            self.origin.x as f32,
            self.origin.y as f32,
        ))
    }

    pub fn bounds(&self) -> Bounds {
        let bb = bounding_box(self.outline.iter());
        Bounds::new(
            self.origin.x + bb.min.x as f64,
            self.origin.y + bb.min.y as f64,
            (bb.max.x - bb.min.x) as f64,
            (bb.max.y - bb.min.y) as f64,
        )
    }

    /// Number of disjoint subpaths (outer outlines plus holes).
    pub fn subpath_count(&self) -> usize {
        self.outline
            .iter()
            .filter(|event| matches!(event, Event::Begin { .. }))
            .count()
    }

    /// Flattened subpaths in image coordinates.
    pub fn subpaths(&self) -> Vec<Vec<Point>> {
        let outline = self.absolute_outline();
        let mut polygons = Vec::new();
        let mut current = Vec::new();

        for event in outline.iter().flattened(FLATTEN_TOLERANCE) {
            match event {
                Event::Begin { at } => {
                    current.clear();
                    current.push(Point::new(at.x as f64, at.y as f64));
                }
                Event::Line { to, .. } => {
                    current.push(Point::new(to.x as f64, to.y as f64));
                }
                Event::End { .. } => {
                    if !current.is_empty() {
                        polygons.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            }
        }

        polygons
    }

    /// All flattened vertices, subpath after subpath.
    pub fn vertices(&self) -> Vec<Point> {
        self.subpaths().into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::math::Box2D;
    use lyon::path::Winding;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        Bounds::new(x, y, size, size).corners().to_vec()
    }

    #[test]
    fn test_outline_is_relative_to_bounds() {
        let shape = CompositeShape::from_polygons(&[square(10.0, 20.0, 5.0)]).unwrap();
        assert_eq!(shape.origin(), Point::new(10.0, 20.0));

        let bb = bounding_box(shape.outline().iter());
        assert!(bb.min.x.abs() < 1e-6);
        assert!(bb.min.y.abs() < 1e-6);

        let b = shape.bounds();
        assert!((b.x - 10.0).abs() < 1e-6);
        assert!((b.y - 20.0).abs() < 1e-6);
        assert!((b.width - 5.0).abs() < 1e-6);
        assert!((b.height - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_subpaths() {
        let shape =
            CompositeShape::from_polygons(&[square(0.0, 0.0, 4.0), square(10.0, 10.0, 4.0)])
                .unwrap();
        assert_eq!(shape.subpath_count(), 2);

        let b = shape.bounds();
        assert!((b.width - 14.0).abs() < 1e-6);
        assert!((b.height - 14.0).abs() < 1e-6);

        let subpaths = shape.subpaths();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[0].len(), 4);
        assert!((subpaths[1][0].x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_absolute_outline_round_trips_position() {
        let shape = CompositeShape::from_polygons(&[square(3.0, 7.0, 2.0)]).unwrap();
        let abs = shape.absolute_outline();
        let bb = bounding_box(abs.iter());
        assert!((bb.min.x - 3.0).abs() < 1e-6);
        assert!((bb.min.y - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_curved_outline_flattens() {
        let mut builder = Path::builder();
        builder.add_ellipse(
            point(50.0, 50.0),
            lyon::math::vector(20.0, 10.0),
            lyon::math::Angle::radians(0.0),
            Winding::Positive,
        );
        let shape = CompositeShape::from_path(builder.build()).unwrap();

        let b = shape.bounds();
        assert!((b.center().x - 50.0).abs() < 0.5);
        assert!((b.center().y - 50.0).abs() < 0.5);
        assert!(shape.vertices().len() > 8);
    }

    #[test]
    fn test_rectangle_with_hole() {
        let mut builder = Path::builder();
        builder.add_rectangle(
            &Box2D::new(point(0.0, 0.0), point(20.0, 20.0)),
            Winding::Positive,
        );
        builder.add_rectangle(
            &Box2D::new(point(5.0, 5.0), point(15.0, 15.0)),
            Winding::Negative,
        );
        let shape = CompositeShape::from_path(builder.build()).unwrap();
        assert_eq!(shape.subpath_count(), 2);
        assert_eq!(shape.vertices().len(), 8);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            CompositeShape::from_polygons(&[vec![]]),
            Err(RoiError::EmptyVertices(RoiKind::Composite))
        ));
        assert!(matches!(
            CompositeShape::from_path(Path::new()),
            Err(RoiError::EmptyVertices(RoiKind::Composite))
        ));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let shape = CompositeShape::from_polygons(&[square(3.0, 4.0, 6.0)]).unwrap();
        let json = serde_json::to_string(&shape).unwrap();
        let back: CompositeShape = serde_json::from_str(&json).unwrap();
        assert_eq!(back.origin(), shape.origin());
        assert_eq!(back.vertices(), shape.vertices());
    }

    #[test]
    fn test_deserialize_rejects_empty_outline() {
        let json = serde_json::json!({
            "origin": { "x": 0.0, "y": 0.0 },
            "outline": serde_json::to_value(Path::new()).unwrap(),
        });
        let err = serde_json::from_value::<CompositeShape>(json).unwrap_err();
        assert!(err.to_string().contains("at least one vertex"), "{}", err);
    }

    #[test]
    fn test_non_finite_rejected() {
        let poly = vec![Point::new(0.0, 0.0), Point::new(f64::INFINITY, 1.0), Point::new(1.0, 1.0)];
        assert!(matches!(
            CompositeShape::from_polygons(&[poly]),
            Err(RoiError::NonFiniteCoordinate)
        ));
    }
}
