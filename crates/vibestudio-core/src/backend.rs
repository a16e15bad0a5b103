//! Render-context capability traits and the software implementation.
//!
//! The canvas library behind the design surface is an external collaborator.
//! This module defines the narrow capability set the element operations
//! actually need — requesting a redraw, acquiring an offscreen scratch
//! surface, and materializing an image from encoded bytes — and provides
//! [`SoftwareRenderer`], the in-process implementation used natively and by
//! the test suite.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::raster::Raster;

/// Errors acquiring a scratch rendering surface.
///
/// These are transient resource failures; retrying after the pressure
/// subsides is safe.
#[derive(Debug, Error)]
pub enum RenderContextError {
    /// Scratch dimensions must be non-zero.
    #[error("scratch surface dimensions must be non-zero, got {width}x{height}")]
    InvalidScratchSize { width: u32, height: u32 },

    /// The requested surface exceeds the renderer's scratch budget.
    #[error("scratch surface {width}x{height} exceeds the budget of {budget} pixels")]
    ScratchBudgetExceeded { width: u32, height: u32, budget: u64 },
}

/// The owning canvas of a design element.
pub trait Canvas {
    /// Schedule a full redraw of the canvas.
    ///
    /// Idempotent and safe to call even when nothing visually changed.
    fn request_redraw(&self);
}

/// Rendering capabilities needed by the crop operation.
#[async_trait]
pub trait RenderContext: Canvas {
    /// Acquire an offscreen scratch raster of exactly `width x height`
    /// pixels, cleared to transparent black.
    fn acquire_scratch(&self, width: u32, height: u32) -> Result<Raster, RenderContextError>;

    /// Construct a new image resource from encoded pixel data.
    ///
    /// Asynchronous: decoding does not complete synchronously on the
    /// canvas platform this mirrors. Fails with [`DecodeError`] when the
    /// bytes cannot be decoded.
    async fn materialize_image(&self, encoded: &[u8]) -> Result<Raster, DecodeError>;
}

/// In-process renderer backed by the crate's own codecs.
///
/// Tracks redraw requests in an atomic counter so callers (and tests) can
/// observe them, and enforces an optional scratch pixel budget that models
/// the platform's offscreen-surface limits.
#[derive(Debug, Default)]
pub struct SoftwareRenderer {
    scratch_budget: Option<u64>,
    redraws: AtomicU64,
}

impl SoftwareRenderer {
    /// Create a renderer with no scratch budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that refuses scratch surfaces larger than
    /// `budget` pixels.
    pub fn with_scratch_budget(budget: u64) -> Self {
        Self {
            scratch_budget: Some(budget),
            redraws: AtomicU64::new(0),
        }
    }

    /// Number of redraws requested so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraws.load(Ordering::Relaxed)
    }
}

impl Canvas for SoftwareRenderer {
    fn request_redraw(&self) {
        self.redraws.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("canvas redraw requested");
    }
}

#[async_trait]
impl RenderContext for SoftwareRenderer {
    fn acquire_scratch(&self, width: u32, height: u32) -> Result<Raster, RenderContextError> {
        if width == 0 || height == 0 {
            return Err(RenderContextError::InvalidScratchSize { width, height });
        }
        let pixels = width as u64 * height as u64;
        if let Some(budget) = self.scratch_budget {
            if pixels > budget {
                return Err(RenderContextError::ScratchBudgetExceeded {
                    width,
                    height,
                    budget,
                });
            }
        }
        Ok(Raster::solid(width, height, [0, 0, 0, 0]))
    }

    async fn materialize_image(&self, encoded: &[u8]) -> Result<Raster, DecodeError> {
        decode::decode_image(encoded)
    }
}
