//! Vibe Studio Core - Design-canvas image pipeline
//!
//! This crate provides the image processing core behind the Vibe Studio
//! design tool: the element model for objects placed on the canvas, the
//! filter pipeline for canvas-backed images, the asynchronous crop
//! operation, and the raster/codec plumbing both are built on.
//!
//! The canvas renderer itself is an external collaborator; the
//! [`backend::Canvas`] and [`backend::RenderContext`] traits capture the
//! narrow capability set these operations need from it, and
//! [`backend::SoftwareRenderer`] implements them in-process.

pub mod backend;
pub mod crop;
pub mod decode;
pub mod element;
pub mod encode;
pub mod filter;
pub mod raster;

pub use backend::{Canvas, RenderContext, RenderContextError, SoftwareRenderer};
pub use crop::{crop, crop_image, CropError};
pub use decode::{decode_image, DecodeError};
pub use element::{
    Coords, DesignElement, ElementId, ElementKind, ImageElement, ImageHandle, Point, ShapeElement,
    TextElement,
};
pub use encode::{encode_png, EncodeError};
pub use filter::{Filter, FilterKind, FilterSpec};
pub use raster::{CropRect, Raster, Rgba};
