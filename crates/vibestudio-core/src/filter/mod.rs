//! Image filters for canvas-backed design elements.
//!
//! A filter request arrives from the front end as a [`FilterSpec`]: a kind
//! plus a mapping of named numeric options. The pipeline resolves the spec
//! into a concrete [`Filter`] (substituting documented defaults for omitted
//! options), installs it as the element's single active filter, recomputes
//! the rendered pixels, and requests a canvas redraw.
//!
//! Filters are mutually exclusive by design: applying a new filter always
//! replaces any previously active one, and [`FilterKind::None`] clears the
//! list entirely. There is no compositing of multiple filters.

mod apply;

pub use apply::{blur_radius, render, render_with_rng};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::backend::Canvas;
use crate::element::ImageElement;

/// Default blur strength when the request omits the `blur` option.
pub const DEFAULT_BLUR: f32 = 0.5;
/// Default brightness offset when the request omits the `brightness` option.
pub const DEFAULT_BRIGHTNESS: f32 = 0.1;
/// Default contrast amount when the request omits the `contrast` option.
pub const DEFAULT_CONTRAST: f32 = 0.1;
/// Default saturation amount when the request omits the `saturation` option.
pub const DEFAULT_SATURATION: f32 = 0.1;
/// Default noise amount when the request omits the `noise` option.
pub const DEFAULT_NOISE: f32 = 100.0;
/// Default pixelation block size when the request omits the `blocksize` option.
pub const DEFAULT_PIXELATE_BLOCK_SIZE: u32 = 4;

/// The supported filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// No filter; clears the active filter list.
    None,
    Grayscale,
    Blur,
    Brightness,
    Contrast,
    Saturation,
    Noise,
    Pixelate,
}

/// A transient filter request: which transformation to apply and its
/// numeric options. Constructed per invocation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    /// Named numeric options; missing entries fall back to the documented
    /// defaults during resolution.
    #[serde(default)]
    pub params: HashMap<String, f32>,
}

impl FilterSpec {
    /// Create a spec with no explicit options.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            params: HashMap::new(),
        }
    }

    /// Builder-style option setter.
    pub fn with_param(mut self, name: &str, value: f32) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    fn param(&self, name: &str) -> Option<f32> {
        self.params.get(name).copied()
    }
}

/// A resolved, active filter with concrete parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Grayscale,
    Blur { value: f32 },
    Brightness { value: f32 },
    Contrast { value: f32 },
    Saturation { value: f32 },
    Noise { amount: f32 },
    Pixelate { block_size: u32 },
}

impl Filter {
    /// Resolve a spec into a concrete filter, substituting defaults for
    /// omitted options. Returns `None` for [`FilterKind::None`].
    pub fn from_spec(spec: &FilterSpec) -> Option<Self> {
        match spec.kind {
            FilterKind::None => None,
            FilterKind::Grayscale => Some(Filter::Grayscale),
            FilterKind::Blur => Some(Filter::Blur {
                value: spec.param("blur").unwrap_or(DEFAULT_BLUR),
            }),
            FilterKind::Brightness => Some(Filter::Brightness {
                value: spec.param("brightness").unwrap_or(DEFAULT_BRIGHTNESS),
            }),
            FilterKind::Contrast => Some(Filter::Contrast {
                value: spec.param("contrast").unwrap_or(DEFAULT_CONTRAST),
            }),
            FilterKind::Saturation => Some(Filter::Saturation {
                value: spec.param("saturation").unwrap_or(DEFAULT_SATURATION),
            }),
            FilterKind::Noise => Some(Filter::Noise {
                amount: spec.param("noise").unwrap_or(DEFAULT_NOISE),
            }),
            FilterKind::Pixelate => Some(Filter::Pixelate {
                block_size: spec
                    .param("blocksize")
                    .map(|v| v.max(1.0) as u32)
                    .unwrap_or(DEFAULT_PIXELATE_BLOCK_SIZE),
            }),
        }
    }

    /// The kind this filter was resolved from.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::Blur { .. } => FilterKind::Blur,
            Filter::Brightness { .. } => FilterKind::Brightness,
            Filter::Contrast { .. } => FilterKind::Contrast,
            Filter::Saturation { .. } => FilterKind::Saturation,
            Filter::Noise { .. } => FilterKind::Noise,
            Filter::Pixelate { .. } => FilterKind::Pixelate,
        }
    }
}

/// Apply a filter request to an image element and request a canvas redraw.
///
/// Replaces the element's entire active-filter list with at most one filter
/// resolved from the spec, recomputes the rendered pixel data, then asks the
/// owning canvas for a full redraw. An element with no graphics handle is
/// not yet materialized; the call is a silent no-op and leaves all element
/// state unchanged.
///
/// There is no return value: success is observable only through the
/// element's rendered state.
pub fn apply(element: &mut ImageElement, spec: &FilterSpec, canvas: &impl Canvas) {
    let id = element.id();
    let Some(handle) = element.handle_mut() else {
        tracing::debug!(element = %id, kind = ?spec.kind, "filter skipped: no graphics handle");
        return;
    };

    match Filter::from_spec(spec) {
        Some(filter) => handle.set_filters(vec![filter]),
        None => handle.clear_filters(),
    }
    handle.apply_filters();
    canvas.request_redraw();
    tracing::debug!(element = %id, kind = ?spec.kind, "filter applied");
}
