//! WASM-compatible wrapper types for regions.
//!
//! Regions cross the boundary as plain JavaScript objects that mirror the
//! serde layout of the core `Roi` type. This module handles the conversion
//! and the small result types handed back to JavaScript.

use roirotate_core::{Point, Roi};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// A point handed to JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsPoint {
    x: f64,
    y: f64,
}

#[wasm_bindgen]
impl JsPoint {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64) -> JsPoint {
        JsPoint { x, y }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.y
    }
}

impl From<Point> for JsPoint {
    fn from(p: Point) -> Self {
        JsPoint { x: p.x, y: p.y }
    }
}

impl From<JsPoint> for Point {
    fn from(p: JsPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Result of a rotation, serialized back to JavaScript.
///
/// `replaced` is false when the region rotated in place (image stamps);
/// `roi` then holds the same region with its updated angle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsRotateResult {
    pub roi: Roi,
    pub replaced: bool,
}

/// Parse a region from a JavaScript object.
pub(crate) fn roi_from_js(value: JsValue) -> Result<Roi, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid ROI data: {}", e)))
}

/// Serialize a value for JavaScript.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Flatten points into `[x0, y0, x1, y1, ...]`.
pub(crate) fn flatten_points(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
