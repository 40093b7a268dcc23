use crate::content::ContentStream;
use crate::geometry::{effective_extent, Orientation};
use crate::page_size::PageSize;
use crate::text::FontSpec;
use std::collections::HashMap;

/// A single page in a document.
///
/// Pages are created through [`Document::add_page`](crate::Document::add_page)
/// with a default Letter portrait extent, then mutated through setters and a
/// [`DrawingContext`](crate::DrawingContext) until the document is saved.
///
/// The content stream is created lazily by the first drawing call; a page
/// that was never drawn on serializes without one.
#[derive(Debug, Clone)]
pub struct Page {
    width: f64,
    height: f64,
    orientation: Orientation,
    content: Option<ContentStream>,
    fonts: Vec<FontSpec>,
    font_index: HashMap<FontSpec, usize>,
}

impl Page {
    pub(crate) fn new(size: PageSize, orientation: Orientation) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            orientation,
            content: None,
            fonts: Vec::new(),
            font_index: HashMap::new(),
        }
    }

    /// Apply a page size preset, replacing both dimensions.
    pub fn set_size(&mut self, size: PageSize) {
        let (width, height) = size.dimensions();
        self.width = width;
        self.height = height;
    }

    /// Change the page orientation.
    ///
    /// Landscape makes the larger preset dimension the effective width;
    /// setting it twice is a no-op.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Effective width in points, after orientation.
    pub fn width(&self) -> f64 {
        effective_extent(self.width, self.height, self.orientation).0
    }

    /// Effective height in points, after orientation.
    pub fn height(&self) -> f64 {
        effective_extent(self.width, self.height, self.orientation).1
    }

    /// Font resources in first-registration order.
    pub fn fonts(&self) -> &[FontSpec] {
        &self.fonts
    }

    /// The page's instruction log, if any drawing call created one.
    pub fn content(&self) -> Option<&ContentStream> {
        self.content.as_ref()
    }

    /// Register a font resource, deduplicating by value.
    ///
    /// Repeated registrations of an equal (family, size, style) triple
    /// return the index of the existing entry.
    pub(crate) fn register_font(&mut self, font: &FontSpec) -> usize {
        if let Some(&index) = self.font_index.get(font) {
            return index;
        }
        let index = self.fonts.len();
        self.fonts.push(font.clone());
        self.font_index.insert(font.clone(), index);
        index
    }

    pub(crate) fn content_mut(&mut self) -> &mut ContentStream {
        self.content.get_or_insert_with(ContentStream::new)
    }
}
