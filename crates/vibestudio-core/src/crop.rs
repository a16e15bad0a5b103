//! Cropping canvas-backed image elements.
//!
//! A crop replaces an image element's visible content with a rectangular
//! sub-region of itself, updating both pixel content and declared bounding
//! dimensions atomically from the caller's perspective. The pipeline is:
//!
//! 1. validate the element and the [`CropRect`] against the source bounds,
//! 2. acquire a scratch raster sized exactly to the rect,
//! 3. copy the region into the scratch surface (direct copy, no resample),
//! 4. encode the scratch surface and asynchronously materialize a new
//!    image resource from the encoded bytes,
//! 5. swap the element's backing source, sync declared dimensions and the
//!    coordinate cache, and request a canvas redraw.
//!
//! Every fallible step runs before the element is touched, so any failure
//! leaves the prior image content and dimensions fully intact.
//!
//! # Concurrency
//!
//! The operation holds `&mut` on the element across its await point, which
//! statically serializes crops (and every other mutation) per element:
//! overlapping calls on one element cannot be expressed. Cancellation is
//! not supported — dropping the future before completion simply leaves the
//! element untouched.

use thiserror::Error;

use crate::backend::{RenderContext, RenderContextError};
use crate::decode::DecodeError;
use crate::element::{DesignElement, ImageElement};
use crate::encode::{self, EncodeError};
use crate::raster::CropRect;

/// Errors from the crop operation.
#[derive(Debug, Error)]
pub enum CropError {
    /// The element is not a bitmap-backed image (wrong kind, or the
    /// graphics handle is missing). Caller error; retrying won't help.
    #[error("element cannot be cropped: not a bitmap-backed image")]
    InvalidElement,

    /// The crop rect is empty or exceeds the source image bounds.
    #[error("crop region {rect:?} is invalid for {width}x{height} source")]
    InvalidRegion {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    /// A scratch rendering surface could not be acquired. Transient;
    /// safe to retry.
    #[error(transparent)]
    RenderContext(#[from] RenderContextError),

    /// Encoding the scratch surface failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Materializing the new image from encoded bytes failed. Propagated
    /// to the caller, never retried automatically.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Crop a design element to a sub-region of its image content.
///
/// Shape and text elements cannot be cropped and fail with
/// [`CropError::InvalidElement`].
pub async fn crop(
    element: &mut DesignElement,
    rect: CropRect,
    ctx: &impl RenderContext,
) -> Result<(), CropError> {
    let image = element.as_image_mut().ok_or(CropError::InvalidElement)?;
    crop_image(image, rect, ctx).await
}

/// Crop an image element to a sub-region of its source bitmap.
///
/// On success the element's declared width/height equal the rect's, its
/// coordinate cache is refreshed, the active filter list has been
/// re-applied to the new source, and a canvas redraw has been requested.
/// On any failure the element is left exactly as it was.
pub async fn crop_image(
    element: &mut ImageElement,
    rect: CropRect,
    ctx: &impl RenderContext,
) -> Result<(), CropError> {
    let id = element.id();

    // Everything fallible happens against an immutable borrow; the element
    // is only mutated once the new source raster exists.
    let encoded = {
        let handle = element.handle().ok_or(CropError::InvalidElement)?;
        let source = handle.source();
        if !rect.is_within(source.width, source.height) {
            return Err(CropError::InvalidRegion {
                rect,
                width: source.width,
                height: source.height,
            });
        }

        let mut scratch = ctx.acquire_scratch(rect.width, rect.height)?;
        scratch.copy_region_from(source, &rect);
        encode::encode_png(&scratch)?
    };

    let new_source = ctx.materialize_image(&encoded).await?;

    if let Some(handle) = element.handle_mut() {
        handle.set_source(new_source);
    }
    element.set_size(rect.width, rect.height);
    ctx.request_redraw();
    tracing::debug!(
        element = %id,
        width = rect.width,
        height = rect.height,
        "element cropped"
    );
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::backend::SoftwareRenderer;
    use crate::element::ImageElement;
    use crate::raster::{Raster, BYTES_PER_PIXEL};
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    fn test_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    /// Strategy generating a source size plus an always-valid rect inside it.
    fn source_and_rect_strategy() -> impl Strategy<Value = ((u32, u32), CropRect)> {
        (8u32..=40, 8u32..=40).prop_flat_map(|(w, h)| {
            (0..w - 1, 0..h - 1).prop_flat_map(move |(left, top)| {
                (1..=w - left, 1..=h - top).prop_map(move |(rw, rh)| {
                    ((w, h), CropRect::new(left, top, rw, rh))
                })
            })
        })
    }

    proptest! {
        /// Property: Any valid crop yields exactly the rect's dimensions and
        /// pixel-exact content at the offset, on a single-threaded runtime.
        #[test]
        fn prop_valid_crop_dimensions_and_content(
            ((w, h), rect) in source_and_rect_strategy(),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            rt.block_on(async {
                let ctx = SoftwareRenderer::new();
                let mut el = ImageElement::with_source(0.0, 0.0, test_raster(w, h));
                let original = el.handle().unwrap().source().clone();

                crop_image(&mut el, rect, &ctx).await.expect("valid crop");

                prop_assert_eq!(el.width(), rect.width);
                prop_assert_eq!(el.height(), rect.height);
                prop_assert!(el.dimensions_consistent());
                let cropped = el.handle().unwrap().source();
                prop_assert_eq!(
                    cropped.pixel(0, 0),
                    original.pixel(rect.left, rect.top)
                );
                Ok::<(), TestCaseError>(())
            })?;
        }

        /// Property: An out-of-bounds rect always fails and never mutates.
        #[test]
        fn prop_invalid_crop_never_mutates(
            (w, h) in (8u32..=32, 8u32..=32),
            excess in 1u32..=16,
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            rt.block_on(async {
                let ctx = SoftwareRenderer::new();
                let mut el = ImageElement::with_source(0.0, 0.0, test_raster(w, h));
                let before = el.handle().unwrap().source().clone();

                let rect = CropRect::new(0, 0, w + excess, h);
                let result = crop_image(&mut el, rect, &ctx).await;

                prop_assert!(matches!(result, Err(CropError::InvalidRegion { .. })), "expected InvalidRegion error");
                prop_assert_eq!(el.handle().unwrap().source(), &before);
                prop_assert_eq!((el.width(), el.height()), (w, h));
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
