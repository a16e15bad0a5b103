//! Vibe Studio WASM - WebAssembly bindings for the design-canvas image core
//!
//! This crate exposes the raster-level operations of `vibestudio-core` to
//! the JavaScript/TypeScript front end. The element model and the
//! asynchronous crop orchestration stay in core; the browser side calls
//! these bindings with raw pixel buffers taken from the canvas.
//!
//! # Module Structure
//!
//! - `filter` - Render a bitmap through a filter request
//! - `crop` - Pixel-exact region extraction
//! - `codec` - PNG/JPEG decode and PNG encode
//! - `types` - WASM-compatible wrapper types for raster data
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_filter } from '@vibestudio/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const raster = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const filtered = apply_filter(raster, { kind: "grayscale" });
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod crop;
mod filter;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_png};
pub use crop::crop_region;
pub use filter::apply_filter;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
