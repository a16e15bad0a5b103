//! Design-canvas elements and their graphics handles.
//!
//! A [`DesignElement`] is anything placed on the design canvas: a vector
//! shape, a text run, or a bitmap image. Every element carries a unique id,
//! a position, declared pixel dimensions, and a cached corner-coordinate box
//! that canvas-side consumers (hit testing, selection handles) read.
//!
//! Image elements additionally own an optional [`ImageHandle`] — the
//! graphics handle through which their pixels are rendered and manipulated.
//! A missing handle means the element exists but its bitmap has not been
//! materialized yet.
//!
//! # Dimension Invariant
//!
//! An element's declared width/height always match its handle's rendered
//! dimensions after any transformation. The filter and crop operations keep
//! this in sync; [`ImageElement::dimensions_consistent`] checks it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filter::{self, Filter};
use crate::raster::{Raster, Rgba};

/// Unique identifier for a design element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The kind of payload a design element renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Vector path geometry.
    Shape,
    /// A text run.
    Text,
    /// A bitmap image.
    Image,
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Cached corner coordinates of an element's axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Coords {
    fn from_frame(x: f32, y: f32, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            top_left: Point::new(x, y),
            top_right: Point::new(x + w, y),
            bottom_right: Point::new(x + w, y + h),
            bottom_left: Point::new(x, y + h),
        }
    }
}

/// The graphics handle backing an image element.
///
/// Holds the raw pixel element (the decoded bitmap `source`), the `rendered`
/// pixel data the canvas draws (the source passed through the active filter
/// list), and the filter list itself. This is the only mutable rendering
/// state an element owns.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    source: Raster,
    rendered: Raster,
    filters: Vec<Filter>,
}

impl ImageHandle {
    /// Wrap a decoded bitmap. The rendered state starts as an unfiltered copy.
    pub fn new(source: Raster) -> Self {
        let rendered = source.clone();
        Self {
            source,
            rendered,
            filters: Vec::new(),
        }
    }

    /// The raw pixel element (decoded bitmap source, pre-filter).
    pub fn source(&self) -> &Raster {
        &self.source
    }

    /// The pixel data the canvas draws.
    pub fn rendered(&self) -> &Raster {
        &self.rendered
    }

    /// Rendered width in pixels.
    pub fn width(&self) -> u32 {
        self.rendered.width
    }

    /// Rendered height in pixels.
    pub fn height(&self) -> u32 {
        self.rendered.height
    }

    /// The active filter list.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Replace the active filter list. Does not recompute pixels; call
    /// [`ImageHandle::apply_filters`] afterwards.
    pub fn set_filters(&mut self, filters: Vec<Filter>) {
        self.filters = filters;
    }

    /// Empty the active filter list. Does not recompute pixels.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Recompute rendered pixel data from the source through the active
    /// filter list.
    pub fn apply_filters(&mut self) {
        self.rendered = filter::render(&self.source, &self.filters);
    }

    /// Deterministic variant of [`ImageHandle::apply_filters`] for tests of
    /// RNG-dependent filters.
    pub fn apply_filters_with_rng<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rendered = filter::render_with_rng(&self.source, &self.filters, rng);
    }

    /// Swap the backing bitmap. The active filter list survives and is
    /// re-applied to the new source.
    pub fn set_source(&mut self, source: Raster) {
        self.source = source;
        self.apply_filters();
    }
}

/// A vector shape placed on the canvas.
#[derive(Debug, Clone)]
pub struct ShapeElement {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
    /// Path vertices in element-local coordinates.
    pub path: Vec<Point>,
    pub fill: Rgba,
    coords: Coords,
}

impl ShapeElement {
    /// Create a rectangular shape.
    pub fn rect(x: f32, y: f32, width: u32, height: u32, fill: Rgba) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            id: ElementId::new(),
            x,
            y,
            width,
            height,
            path: vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
            fill,
            coords: Coords::from_frame(x, y, width, height),
        }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn update_coords(&mut self) {
        self.coords = Coords::from_frame(self.x, self.y, self.width, self.height);
    }
}

/// A text run placed on the canvas.
#[derive(Debug, Clone)]
pub struct TextElement {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: u32,
    pub height: u32,
    pub content: String,
    pub font_size: f32,
    pub fill: Rgba,
    coords: Coords,
}

impl TextElement {
    pub fn new(
        x: f32,
        y: f32,
        width: u32,
        height: u32,
        content: impl Into<String>,
        font_size: f32,
        fill: Rgba,
    ) -> Self {
        Self {
            id: ElementId::new(),
            x,
            y,
            width,
            height,
            content: content.into(),
            font_size,
            fill,
            coords: Coords::from_frame(x, y, width, height),
        }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn update_coords(&mut self) {
        self.coords = Coords::from_frame(self.x, self.y, self.width, self.height);
    }
}

/// A bitmap image placed on the canvas.
///
/// The image operations of this crate ([`crate::filter::apply`] and
/// [`crate::crop::crop`]) work on this specialization.
#[derive(Debug, Clone)]
pub struct ImageElement {
    id: ElementId,
    pub x: f32,
    pub y: f32,
    width: u32,
    height: u32,
    handle: Option<ImageHandle>,
    coords: Coords,
}

impl ImageElement {
    /// Create an image element whose bitmap has not been materialized yet.
    ///
    /// Declared dimensions come from the layout; the handle is attached
    /// later via [`ImageElement::set_handle`].
    pub fn placeholder(x: f32, y: f32, width: u32, height: u32) -> Self {
        Self {
            id: ElementId::new(),
            x,
            y,
            width,
            height,
            handle: None,
            coords: Coords::from_frame(x, y, width, height),
        }
    }

    /// Create an image element backed by a decoded bitmap. Declared
    /// dimensions are taken from the bitmap.
    pub fn with_source(x: f32, y: f32, source: Raster) -> Self {
        let (width, height) = (source.width, source.height);
        Self {
            id: ElementId::new(),
            x,
            y,
            width,
            height,
            handle: Some(ImageHandle::new(source)),
            coords: Coords::from_frame(x, y, width, height),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Declared width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn handle(&self) -> Option<&ImageHandle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut ImageHandle> {
        self.handle.as_mut()
    }

    /// Attach a materialized bitmap, syncing declared dimensions to it.
    pub fn set_handle(&mut self, handle: ImageHandle) {
        self.width = handle.width();
        self.height = handle.height();
        self.handle = Some(handle);
        self.update_coords();
    }

    /// Set the declared dimensions and refresh the coordinate cache.
    ///
    /// Callers are responsible for keeping the handle's rendered dimensions
    /// in step (the dimension invariant).
    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.update_coords();
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Recompute the cached corner coordinates from position and dimensions.
    pub fn update_coords(&mut self) {
        self.coords = Coords::from_frame(self.x, self.y, self.width, self.height);
    }

    /// Check the dimension invariant: declared width/height match the
    /// handle's rendered dimensions (vacuously true without a handle).
    pub fn dimensions_consistent(&self) -> bool {
        self.handle
            .as_ref()
            .is_none_or(|h| h.width() == self.width && h.height() == self.height)
    }
}

/// Anything placed on the design canvas.
#[derive(Debug, Clone)]
pub enum DesignElement {
    Shape(ShapeElement),
    Text(TextElement),
    Image(ImageElement),
}

impl DesignElement {
    pub fn id(&self) -> ElementId {
        match self {
            DesignElement::Shape(s) => s.id,
            DesignElement::Text(t) => t.id,
            DesignElement::Image(i) => i.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            DesignElement::Shape(_) => ElementKind::Shape,
            DesignElement::Text(_) => ElementKind::Text,
            DesignElement::Image(_) => ElementKind::Image,
        }
    }

    /// Position of the top-left corner in canvas coordinates.
    pub fn position(&self) -> Point {
        match self {
            DesignElement::Shape(s) => Point::new(s.x, s.y),
            DesignElement::Text(t) => Point::new(t.x, t.y),
            DesignElement::Image(i) => Point::new(i.x, i.y),
        }
    }

    /// Declared (width, height) in pixels.
    pub fn size(&self) -> (u32, u32) {
        match self {
            DesignElement::Shape(s) => (s.width, s.height),
            DesignElement::Text(t) => (t.width, t.height),
            DesignElement::Image(i) => (i.width, i.height),
        }
    }

    pub fn coords(&self) -> Coords {
        match self {
            DesignElement::Shape(s) => s.coords(),
            DesignElement::Text(t) => t.coords(),
            DesignElement::Image(i) => i.coords(),
        }
    }

    /// Move the element and refresh its coordinate cache.
    pub fn set_position(&mut self, x: f32, y: f32) {
        match self {
            DesignElement::Shape(s) => {
                s.x = x;
                s.y = y;
                s.update_coords();
            }
            DesignElement::Text(t) => {
                t.x = x;
                t.y = y;
                t.update_coords();
            }
            DesignElement::Image(i) => {
                i.x = x;
                i.y = y;
                i.update_coords();
            }
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            DesignElement::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageElement> {
        match self {
            DesignElement::Image(i) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_raster(width: u32, height: u32) -> Raster {
        Raster::solid(width, height, [128, 64, 192, 255])
    }

    #[test]
    fn test_element_ids_unique() {
        let a = ShapeElement::rect(0.0, 0.0, 10, 10, [0, 0, 0, 255]);
        let b = ShapeElement::rect(0.0, 0.0, 10, 10, [0, 0, 0, 255]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_image_with_source_dimensions() {
        let el = ImageElement::with_source(5.0, 7.0, test_raster(40, 30));
        assert_eq!(el.width(), 40);
        assert_eq!(el.height(), 30);
        assert!(el.dimensions_consistent());
    }

    #[test]
    fn test_placeholder_has_no_handle() {
        let el = ImageElement::placeholder(0.0, 0.0, 100, 100);
        assert!(el.handle().is_none());
        assert!(el.dimensions_consistent());
    }

    #[test]
    fn test_set_handle_syncs_dimensions() {
        let mut el = ImageElement::placeholder(0.0, 0.0, 100, 100);
        el.set_handle(ImageHandle::new(test_raster(25, 35)));
        assert_eq!(el.width(), 25);
        assert_eq!(el.height(), 35);
        assert!(el.dimensions_consistent());
        assert_eq!(el.coords().bottom_right, Point::new(25.0, 35.0));
    }

    #[test]
    fn test_coords_follow_position() {
        let mut el = DesignElement::Image(ImageElement::with_source(0.0, 0.0, test_raster(10, 20)));
        el.set_position(3.0, 4.0);
        let coords = el.coords();
        assert_eq!(coords.top_left, Point::new(3.0, 4.0));
        assert_eq!(coords.bottom_right, Point::new(13.0, 24.0));
    }

    #[test]
    fn test_handle_set_source_reapplies_filters() {
        let mut handle = ImageHandle::new(test_raster(8, 8));
        handle.set_filters(vec![Filter::Grayscale]);
        handle.apply_filters();
        let [r, g, b, _] = handle.rendered().pixel(0, 0);
        assert!(r == g && g == b, "grayscale output should be neutral");

        handle.set_source(Raster::solid(4, 4, [200, 10, 10, 255]));
        assert_eq!(handle.width(), 4);
        assert_eq!(handle.filters().len(), 1, "filter list survives the swap");
        let [r, g, b, _] = handle.rendered().pixel(0, 0);
        assert!(r == g && g == b, "filters re-applied to the new source");
    }

    #[test]
    fn test_handle_seeded_filter_application() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut a = ImageHandle::new(test_raster(8, 8));
        let mut b = ImageHandle::new(test_raster(8, 8));
        a.set_filters(vec![Filter::Noise { amount: 100.0 }]);
        b.set_filters(vec![Filter::Noise { amount: 100.0 }]);

        a.apply_filters_with_rng(&mut StdRng::seed_from_u64(5));
        b.apply_filters_with_rng(&mut StdRng::seed_from_u64(5));
        assert_eq!(a.rendered(), b.rendered());
    }

    #[test]
    fn test_kind_accessors() {
        let shape = DesignElement::Shape(ShapeElement::rect(0.0, 0.0, 5, 5, [0, 0, 0, 255]));
        let text = DesignElement::Text(TextElement::new(
            0.0,
            0.0,
            50,
            16,
            "hello",
            12.0,
            [0, 0, 0, 255],
        ));
        let image = DesignElement::Image(ImageElement::placeholder(0.0, 0.0, 5, 5));

        assert_eq!(shape.kind(), ElementKind::Shape);
        assert_eq!(text.kind(), ElementKind::Text);
        assert_eq!(image.kind(), ElementKind::Image);
        assert!(shape.as_image().is_none());
        assert!(image.as_image().is_some());
    }
}
