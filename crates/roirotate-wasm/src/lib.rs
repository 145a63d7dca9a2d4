//! RoiRotate WASM - WebAssembly bindings for region rotation
//!
//! This crate exposes the roirotate-core rotation engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `rotate` - Center resolution and rotation bindings
//! - `types` - WASM-compatible wrapper types and region conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { rotate_roi_own_center, roi_kind } from '@roirotate/wasm';
//!
//! await init();
//!
//! const { roi, replaced } = rotate_roi_own_center(selection, 15);
//! console.log(`Rotated into a ${roi_kind(roi)}`);
//! ```

use wasm_bindgen::prelude::*;

mod rotate;
mod types;

pub use rotate::{resolve_center, roi_kind, roi_vertices, rotate_roi, rotate_roi_own_center};
pub use types::{JsPoint, JsRotateResult};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
