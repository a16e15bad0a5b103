//! WASM bindings for image decoding and encoding.

use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// Decode PNG or JPEG bytes into an RGBA raster.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const raster = decode_image(bytes);
/// console.log(`Decoded ${raster.width}x${raster.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    vibestudio_core::decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a raster to PNG bytes (lossless).
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    vibestudio_core::encode::encode_png(&image.to_raster())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
