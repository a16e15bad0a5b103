//! WASM bindings for region extraction.
//!
//! The browser side owns the asynchronous parts of a crop (offscreen
//! canvas, image decode); this binding supplies the pixel-exact region copy
//! the element-level operation in `vibestudio-core` is built on.

use vibestudio_core::{CropRect, Raster};
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// Extract a sub-region of a raster as a new raster.
///
/// The rect is in local pixel coordinates and must lie fully inside the
/// source bounds; out-of-bounds or zero-extent rects are rejected rather
/// than clamped. This is a direct pixel copy, not a resample.
#[wasm_bindgen]
pub fn crop_region(
    image: &JsRaster,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
) -> Result<JsRaster, JsValue> {
    let rect = CropRect::new(left, top, width, height);
    crop_region_inner(&image.to_raster(), rect)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e))
}

/// Validated core of [`crop_region`], shared with the native test suite.
fn crop_region_inner(source: &Raster, rect: CropRect) -> Result<Raster, String> {
    if !rect.is_within(source.width, source.height) {
        return Err(format!(
            "crop region {rect:?} is invalid for {}x{} source",
            source.width, source.height
        ));
    }
    let mut out = Raster::solid(rect.width, rect.height, [0, 0, 0, 0]);
    out.copy_region_from(source, &rect);
    Ok(out)
}
