//! WASM-compatible wrapper types for raster data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! raster type, handling the conversion between Rust and JavaScript data
//! representations.

use vibestudio_core::Raster;
use wasm_bindgen::prelude::*;

/// A raster wrapper for JavaScript.
///
/// Wraps the core `Raster` type and provides a JavaScript-friendly
/// interface for accessing dimensions and RGBA pixel data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a
/// copy is made to JavaScript memory as a `Uint8Array`. For
/// performance-critical code, keep the raster in WASM memory and only
/// extract pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory,
/// but this is optional as wasm-bindgen's finalizer handles cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    /// Get the raster width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data, in the layout
    /// `CanvasRenderingContext2D.putImageData` expects.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to immediately release a large raster.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    /// Create a JsRaster from a core Raster.
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Convert back to a core Raster.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_creation() {
        let raster = JsRaster::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(raster.width(), 100);
        assert_eq!(raster.height(), 50);
        assert_eq!(raster.byte_length(), 20000);
    }

    #[test]
    fn test_js_raster_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 255]; // 2 RGBA pixels
        let raster = JsRaster::new(2, 1, pixels.clone());
        assert_eq!(raster.pixels(), pixels);
    }

    #[test]
    fn test_from_raster() {
        let core = Raster::solid(20, 10, [1, 2, 3, 4]);
        let js = JsRaster::from_raster(core);
        assert_eq!(js.width(), 20);
        assert_eq!(js.height(), 10);
        assert_eq!(js.byte_length(), 800);
    }

    #[test]
    fn test_to_raster_round_trip() {
        let core = Raster::solid(5, 5, [9, 8, 7, 255]);
        let js = JsRaster::from_raster(core.clone());
        assert_eq!(js.to_raster(), core);
    }
}
