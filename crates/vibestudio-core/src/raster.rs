//! Raster pixel buffers and crop regions.
//!
//! A [`Raster`] is the decoded-bitmap stand-in for the canvas library's
//! image object: RGBA pixel data plus dimensions, in the image's local
//! pixel coordinate space with the origin at the top-left corner.

use serde::{Deserialize, Serialize};

/// RGBA color value, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Number of bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A rectangular sub-region of an image in local pixel coordinates.
///
/// Used by the crop operation to describe which part of the source bitmap
/// to extract. A rect is only meaningful relative to a specific raster;
/// use [`CropRect::is_within`] to check it against that raster's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge offset in pixels.
    pub left: u32,
    /// Top edge offset in pixels.
    pub top: u32,
    /// Region width in pixels (must be > 0).
    pub width: u32,
    /// Region height in pixels (must be > 0).
    pub height: u32,
}

impl CropRect {
    /// Create a new crop rect.
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check whether this rect is a valid sub-region of a `width x height`
    /// image: both extents non-zero and `left + width`, `top + height`
    /// within the image bounds.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self
                .left
                .checked_add(self.width)
                .is_some_and(|right| right <= width)
            && self
                .top
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= height)
    }
}

/// A decoded bitmap with RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Raster from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for codec processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the RGBA value at (x, y). Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Copy a region of `src` into this raster at origin (0, 0).
    ///
    /// This is a direct pixel-region copy, not a resample: row `y` of this
    /// raster receives row `rect.top + y` of the source starting at column
    /// `rect.left`. The destination must be sized exactly to the rect and
    /// the rect must lie within the source bounds; both are validated by
    /// the crop operation before this is reached.
    pub fn copy_region_from(&mut self, src: &Raster, rect: &CropRect) {
        debug_assert!(rect.is_within(src.width, src.height), "rect out of bounds");
        debug_assert_eq!(self.width, rect.width, "destination width mismatch");
        debug_assert_eq!(self.height, rect.height, "destination height mismatch");

        // Copy pixel data row by row for efficiency
        for y in 0..rect.height {
            let src_y = rect.top + y;
            let src_start =
                (src_y as usize * src.width as usize + rect.left as usize) * BYTES_PER_PIXEL;
            let src_end = src_start + rect.width as usize * BYTES_PER_PIXEL;
            let dst_start = y as usize * rect.width as usize * BYTES_PER_PIXEL;
            let dst_end = dst_start + rect.width as usize * BYTES_PER_PIXEL;

            self.pixels[dst_start..dst_end].copy_from_slice(&src.pixels[src_start..src_end]);
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (4u32..=64, 4u32..=64)
    }

    fn test_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v.wrapping_add(1), v.wrapping_add(2), 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    proptest! {
        /// Property: Any in-bounds rect copies pixel-exactly from the offset.
        #[test]
        fn prop_copy_region_pixel_exact(
            (width, height) in dimensions_strategy(),
            left_frac in 0.0f64..0.9,
            top_frac in 0.0f64..0.9,
        ) {
            let src = test_raster(width, height);
            let left = (left_frac * width as f64) as u32;
            let top = (top_frac * height as f64) as u32;
            let rect = CropRect::new(left, top, width - left, height - top);
            prop_assert!(rect.is_within(width, height));

            let mut dst = Raster::solid(rect.width, rect.height, [0, 0, 0, 0]);
            dst.copy_region_from(&src, &rect);

            for y in 0..rect.height {
                for x in 0..rect.width {
                    prop_assert_eq!(dst.pixel(x, y), src.pixel(left + x, top + y));
                }
            }
        }

        /// Property: A rect is within bounds iff its edges fit.
        #[test]
        fn prop_rect_validity(
            (width, height) in dimensions_strategy(),
            left in 0u32..=80,
            top in 0u32..=80,
            rect_w in 0u32..=80,
            rect_h in 0u32..=80,
        ) {
            let rect = CropRect::new(left, top, rect_w, rect_h);
            let expected = rect_w > 0
                && rect_h > 0
                && left + rect_w <= width
                && top + rect_h <= height;
            prop_assert_eq!(rect.is_within(width, height), expected);
        }
    }
}
