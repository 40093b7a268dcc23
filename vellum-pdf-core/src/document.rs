use crate::error::Result;
use crate::geometry::Orientation;
use crate::page::Page;
use crate::page_size::PageSize;
use crate::writer::DocumentWriter;
use chrono::{DateTime, Utc};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// A document under construction: an ordered sequence of pages plus
/// metadata.
///
/// Object identifiers are not assigned while the document is being built;
/// the serializer assigns them in a deterministic walk when a save begins.
/// Until then, pages can be freely mutated through the handles returned by
/// [`add_page`](Document::add_page).
///
/// A document is an exclusively-owned resource while it is being built:
/// `save_to` borrows it shared, so the borrow checker rules out structural
/// mutation during an in-progress save.
///
/// # Example
///
/// ```rust
/// use vellum_pdf::{Color, Document, DrawingContext, FontSpec, TextAnchor};
///
/// # fn main() -> vellum_pdf::Result<()> {
/// let mut doc = Document::new();
/// let page = doc.add_page();
/// let mut gfx = DrawingContext::new(page);
/// gfx.draw_text(
///     "Testy Test Test",
///     &FontSpec::new("Arial", 12.0),
///     Color::black(),
///     TextAnchor::point(12.0, 12.0),
/// )?;
///
/// let bytes = doc.to_bytes()?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
    pub(crate) metadata: DocumentMetadata,
}

/// Metadata serialized into the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the file
    pub producer: Option<String>,
    /// Creation date. Never defaulted: output must not depend on the wall
    /// clock.
    pub creation_date: Option<DateTime<Utc>>,
    /// Modification date. Never defaulted, as above.
    pub modification_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: None,
            producer: Some(format!("vellum-pdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: None,
            modification_date: None,
        }
    }
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page and returns a handle to it.
    ///
    /// Never fails; the page starts as Letter portrait.
    pub fn add_page(&mut self) -> &mut Page {
        self.add_page_sized(PageSize::Letter, Orientation::Portrait)
    }

    /// Appends a page with the given preset and orientation.
    pub fn add_page_sized(&mut self, size: PageSize, orientation: Orientation) -> &mut Page {
        self.pages.push(Page::new(size, orientation));
        self.pages.last_mut().expect("page was just pushed")
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The pages, in insertion order (which is also output order).
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable handle to the page at `index`.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    /// Sets the document author.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    /// Sets the document subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    /// Sets the document keywords.
    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.metadata.keywords = Some(keywords.into());
    }

    /// Sets the creator (software that created the original document).
    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.metadata.creator = Some(creator.into());
    }

    /// Sets the producer (software that produced the file).
    pub fn set_producer(&mut self, producer: impl Into<String>) {
        self.metadata.producer = Some(producer.into());
    }

    /// Sets the creation date.
    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
    }

    /// Sets the modification date.
    pub fn set_modification_date(&mut self, date: DateTime<Utc>) {
        self.metadata.modification_date = Some(date);
    }

    /// Serializes the document into the given sink.
    ///
    /// The sink is acquired and released by the caller; this method only
    /// writes (and flushes) into it.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) when the sink rejects a write, in
    /// which case the sink contents must be assumed incomplete.
    /// [`Error::InternalConsistency`](crate::Error::InternalConsistency)
    /// when a DOM invariant is broken; detected before any byte is written.
    pub fn save_to<W: Write>(&self, sink: W) -> Result<()> {
        DocumentWriter::new(sink).write_document(self)
    }

    /// Serializes the document into a byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Serializes the document to a file.
    ///
    /// Convenience over [`save_to`](Document::save_to) that creates the
    /// file and wraps it in a buffered writer.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.save_to(BufWriter::new(file))?;
        debug!(path = %path.as_ref().display(), pages = self.pages.len(), "document saved");
        Ok(())
    }
}
