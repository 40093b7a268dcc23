//! # vellum-pdf
//!
//! A pure Rust PDF document-construction and serialization engine.
//!
//! Callers build an in-memory document of pages, draw text onto each page
//! through a [`DrawingContext`], and serialize the result to any
//! [`std::io::Write`] sink as a structurally valid PDF: signature header,
//! numbered objects, cross-reference table, trailer.
//!
//! ## Quick Start
//!
//! ```rust
//! use vellum_pdf::{Color, Document, DrawingContext, FontSpec, TextAnchor};
//!
//! # fn main() -> vellum_pdf::Result<()> {
//! let mut doc = Document::new();
//! doc.set_title("Hello");
//!
//! let page = doc.add_page();
//! let mut gfx = DrawingContext::new(page);
//! gfx.draw_text(
//!     "Hello, PDF!",
//!     &FontSpec::new("Helvetica", 24.0),
//!     Color::black(),
//!     TextAnchor::point(72.0, 720.0),
//! )?;
//!
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.starts_with(b"%PDF-"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Rectangle-anchored text
//!
//! Placing text inside a rectangle needs a text-measurement capability;
//! [`StandardFontMetrics`] covers the standard Type 1 fonts:
//!
//! ```rust
//! use vellum_pdf::{
//!     Color, Document, DrawingContext, FontSpec, Orientation, PageSize, Rect,
//!     StandardFontMetrics, TextAnchor, TextLayout,
//! };
//!
//! # fn main() -> vellum_pdf::Result<()> {
//! let metrics = StandardFontMetrics::new();
//! let mut doc = Document::new();
//!
//! let page = doc.add_page_sized(PageSize::Statement, Orientation::Landscape);
//! let bounds = Rect::from_position_and_size(0.0, 0.0, page.width(), page.height());
//! let mut gfx = DrawingContext::with_measurer(page, &metrics);
//! gfx.draw_text(
//!     "Statement (landscape)",
//!     &FontSpec::new("Times", 25.0),
//!     Color::dark_red(),
//!     TextAnchor::rect(bounds, TextLayout::CENTER),
//! )?;
//!
//! doc.to_bytes()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`document`] - document construction and saving
//! - [`page`] - pages, presets, per-page font resources
//! - [`drawing`] - the drawing context and text anchors
//! - [`content`] - the typed content-instruction log
//! - [`text`] - font specs, encoding, and text measurement
//! - [`objects`] - the typed object tree the serializer encodes
//! - [`writer`] - low-level PDF writing

pub mod content;
pub mod document;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod objects;
pub mod page;
pub mod page_size;
pub mod text;
pub mod writer;

pub use document::{Document, DocumentMetadata};
pub use drawing::{DrawingContext, HorizontalAlign, TextAnchor, TextLayout, VerticalAlign};
pub use error::{Error, Result};
pub use geometry::{effective_extent, Orientation, Point, Rect};
pub use graphics::Color;
pub use page::Page;
pub use page_size::PageSize;
pub use text::{FontSpec, FontStyle, StandardFontMetrics, TextMeasurer, TextSize};
pub use writer::DocumentWriter;

/// Current version of vellum-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_add_page_default_extent() {
        let mut doc = Document::new();
        let page = doc.add_page();
        assert_eq!(page.width(), 612.0);
        assert_eq!(page.height(), 792.0);
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }
}
