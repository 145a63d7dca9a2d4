//! WASM bindings for region rotation.
//!
//! This module exposes center resolution and rotation to JavaScript. Regions
//! are passed as plain objects (see `types`), so an image stamp that rotates
//! in place comes back as an updated copy with `replaced: false`.

use crate::types::{flatten_points, roi_from_js, to_js, JsPoint, JsRotateResult};
use roirotate_core::rotate::{self, RotateOutcome};
use roirotate_core::{Point, Roi};
use wasm_bindgen::prelude::*;

/// Rotate `roi` about `center`, or about its own center when `center` is `None`.
pub(crate) fn rotate_value(
    mut roi: Roi,
    angle_degrees: f64,
    center: Option<Point>,
) -> JsRotateResult {
    let outcome = match center {
        Some(center) => rotate::rotate_about(&mut roi, angle_degrees, center),
        None => rotate::rotate(&mut roi, angle_degrees),
    };
    match outcome {
        RotateOutcome::Replaced(rotated) => JsRotateResult {
            roi: rotated,
            replaced: true,
        },
        RotateOutcome::RotatedInPlace => JsRotateResult {
            roi,
            replaced: false,
        },
    }
}

fn check_finite(values: &[f64]) -> Result<(), JsValue> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(JsValue::from_str("Angle and center must be finite"))
    }
}

fn rotate_js(
    roi: JsValue,
    angle_degrees: f64,
    center: Option<Point>,
) -> Result<JsValue, JsValue> {
    let roi = roi_from_js(roi)?;
    let result = rotate_value(roi, angle_degrees, center);
    if !result.replaced {
        web_sys::console::debug_1(&JsValue::from_str("roirotate: image stamp rotated in place"));
    }
    to_js(&result)
}

/// Rotate a region about an explicit center.
///
/// # Arguments
///
/// * `roi` - Region object
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise on screen)
/// * `center_x`, `center_y` - Pivot in image coordinates
///
/// # Returns
///
/// `{ roi, replaced }` where `replaced` is false for image stamps, which
/// rotate in place and should not be installed as a new selection.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const { roi: rotated, replaced } = rotate_roi(selection, 30, 50, 50);
/// if (replaced) setSelection(rotated);
/// ```
#[wasm_bindgen]
pub fn rotate_roi(
    roi: JsValue,
    angle_degrees: f64,
    center_x: f64,
    center_y: f64,
) -> Result<JsValue, JsValue> {
    check_finite(&[angle_degrees, center_x, center_y])?;
    rotate_js(roi, angle_degrees, Some(Point::new(center_x, center_y)))
}

/// Rotate a region about its own rotation center.
///
/// The center is stored on the result as its sticky rotation center, so
/// repeated calls keep pivoting around the same point.
#[wasm_bindgen]
pub fn rotate_roi_own_center(roi: JsValue, angle_degrees: f64) -> Result<JsValue, JsValue> {
    check_finite(&[angle_degrees])?;
    rotate_js(roi, angle_degrees, None)
}

/// Resolve the rotation center for a region.
///
/// With `use_image_center` the image center is returned; otherwise the
/// region's sticky center or the center of its bounds.
#[wasm_bindgen]
pub fn resolve_center(
    roi: JsValue,
    use_image_center: bool,
    image_width: u32,
    image_height: u32,
) -> Result<JsPoint, JsValue> {
    let roi = roi_from_js(roi)?;
    Ok(rotate::resolve_center(&roi, use_image_center, image_width, image_height).into())
}

/// Representation kind of a region (e.g. `"Rectangle"`, `"Composite"`).
#[wasm_bindgen]
pub fn roi_kind(roi: JsValue) -> Result<String, JsValue> {
    let roi = roi_from_js(roi)?;
    Ok(format!("{:?}", roi.kind()))
}

/// Region vertices as a flat `Float64Array` (`[x0, y0, x1, y1, ...]`).
#[wasm_bindgen]
pub fn roi_vertices(roi: JsValue) -> Result<js_sys::Float64Array, JsValue> {
    let roi = roi_from_js(roi)?;
    let flat = flatten_points(&roi.vertices());
    Ok(js_sys::Float64Array::from(flat.as_slice()))
}


/// WASM-specific tests that require JsValue.
///
/// These tests pass regions through `serde_wasm_bindgen` and can only run on
/// wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use roirotate_core::Bounds;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn square_js() -> JsValue {
        let roi = Roi::rectangle(Bounds::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        to_js(&roi).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_rotate_roi_round_trip() {
        let out = rotate_roi(square_js(), 90.0, 5.0, 5.0).unwrap();
        let result: JsRotateResult = serde_wasm_bindgen::from_value(out).unwrap();
        assert!(result.replaced);
        assert_eq!(result.roi.vertices().len(), 4);
    }

    #[wasm_bindgen_test]
    fn test_rotate_roi_rejects_nan() {
        assert!(rotate_roi(square_js(), f64::NAN, 0.0, 0.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_roi_data() {
        assert!(rotate_roi_own_center(JsValue::from_str("not a roi"), 10.0).is_err());
    }

    /// Walk a chain of property names on a JS object.
    fn get_path(value: &JsValue, path: &[&str]) -> JsValue {
        path.iter().fold(value.clone(), |v, key| {
            js_sys::Reflect::get(&v, &JsValue::from_str(key)).unwrap()
        })
    }

    fn error_text(err: JsValue) -> String {
        err.as_string().unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_nan_coordinate_rejected() {
        let line = Roi::line(Point::new(0.0, 0.0), Point::new(4.0, 0.0)).unwrap();
        let value = to_js(&line).unwrap();
        let start = get_path(&value, &["geometry", "Shape", "Line", "start"]);
        js_sys::Reflect::set(&start, &JsValue::from_str("x"), &JsValue::from_f64(f64::NAN))
            .unwrap();

        let err = rotate_roi_own_center(value, 10.0).unwrap_err();
        assert!(error_text(err).contains("Coordinates must be finite"));
    }

    #[wasm_bindgen_test]
    fn test_empty_polygon_rejected() {
        let polygon = Roi::polygon(
            roirotate_core::PolygonKind::Polygon,
            vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0)],
        )
        .unwrap();
        let value = to_js(&polygon).unwrap();
        let shape = get_path(&value, &["geometry", "Shape", "Polygon"]);
        js_sys::Reflect::set(&shape, &JsValue::from_str("vertices"), &js_sys::Array::new())
            .unwrap();

        let err = roi_kind(value).unwrap_err();
        assert!(error_text(err).contains("needs at least one vertex"));
    }

    #[wasm_bindgen_test]
    fn test_resolve_center() {
        let c = resolve_center(square_js(), false, 100, 100).unwrap();
        assert_eq!((c.x(), c.y()), (5.0, 5.0));

        let c = resolve_center(square_js(), true, 100, 40).unwrap();
        assert_eq!((c.x(), c.y()), (50.0, 20.0));
    }

    #[wasm_bindgen_test]
    fn test_roi_kind_and_vertices() {
        assert_eq!(roi_kind(square_js()).unwrap(), "Rectangle");
        assert_eq!(roi_vertices(square_js()).unwrap().length(), 8);
    }
}
