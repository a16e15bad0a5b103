//! WASM bindings for the filter pipeline.
//!
//! The front end hands over the current bitmap plus a filter request object
//! (`{kind, params}`); the binding renders the filtered pixels and returns
//! them for the canvas layer to install on the element's graphics handle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use vibestudio_core::filter::{render_with_rng, Filter, FilterSpec};
use vibestudio_core::Raster;
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// Render a raster through a filter request.
///
/// `spec` is a `{kind, params}` object, e.g.
/// `{kind: "blur", params: {blur: 0.5}}`. Omitted params fall back to the
/// documented defaults; `{kind: "none"}` returns the unfiltered pixels.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const filtered = apply_filter(raster, { kind: "grayscale" });
/// ctx.putImageData(new ImageData(filtered.pixels(), filtered.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_filter(image: &JsRaster, spec: JsValue) -> Result<JsRaster, JsValue> {
    let spec: FilterSpec = serde_wasm_bindgen::from_value(spec)
        .map_err(|e| JsValue::from_str(&format!("invalid filter spec: {e}")))?;
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    Ok(JsRaster::from_raster(apply_filter_inner(
        &image.to_raster(),
        &spec,
        seed,
    )))
}

/// Seeded core of [`apply_filter`], shared with the native test suite.
fn apply_filter_inner(source: &Raster, spec: &FilterSpec, seed: u64) -> Raster {
    let filters: Vec<Filter> = Filter::from_spec(spec).into_iter().collect();
    render_with_rng(source, &filters, &mut StdRng::seed_from_u64(seed))
}
