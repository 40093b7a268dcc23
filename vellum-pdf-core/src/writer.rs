//! Document serialization
//!
//! The writer turns a finished [`Document`] into the file format: signature
//! header, numbered object bodies, cross-reference table, trailer. The whole
//! object plan is built and validated before the first byte is written, so a
//! broken DOM can never leave a truncated file behind.

use crate::content::format_number;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::objects::{Dictionary, Object, ObjectId};
use crate::text::FontSpec;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::io::Write;
use tracing::debug;

/// Streaming writer over any byte sink.
pub struct DocumentWriter<W: Write> {
    sink: W,
    offsets: Vec<u64>,
    position: u64,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            offsets: Vec::new(),
            position: 0,
        }
    }

    /// Serialize `document` into the sink.
    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        let plan = ObjectPlan::build(document)?;
        plan.validate()?;

        self.write_header()?;
        for (id, object) in &plan.objects {
            self.offsets.push(self.position);
            self.write_object(*id, object)?;
        }

        let xref_position = self.position;
        self.write_xref()?;
        self.write_trailer(plan.catalog_id, plan.info_id, xref_position)?;
        self.sink.flush()?;

        debug!(
            objects = plan.objects.len(),
            bytes = self.position,
            "document serialized"
        );
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary marker comment so transports treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Null => self.write_bytes(b"null")?,
            Object::Boolean(b) => self.write_bytes(if *b { b"true" } else { b"false" })?,
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_number(*f).as_bytes())?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                for &byte in s.as_bytes() {
                    match byte {
                        b'(' => self.write_bytes(b"\\(")?,
                        b')' => self.write_bytes(b"\\)")?,
                        b'\\' => self.write_bytes(b"\\\\")?,
                        _ => self.write_bytes(&[byte])?,
                    }
                }
                self.write_bytes(b")")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(item)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => {
                self.write_bytes(b"<<")?;
                for (key, value) in dict.entries() {
                    self.write_bytes(b"\n/")?;
                    self.write_bytes(key.as_bytes())?;
                    self.write_bytes(b" ")?;
                    self.write_object_value(value)?;
                }
                self.write_bytes(b"\n>>")?;
            }
            Object::Stream(dict, data) => {
                self.write_object_value(&Object::Dictionary(dict.clone()))?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => {
                let reference = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(reference.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        self.write_bytes(b"xref\n")?;

        // Identifiers are sequential from 1, so the recorded offsets are
        // already in entry order: one subsection covers everything.
        let header = format!("0 {}\n", self.offsets.len() + 1);
        self.write_bytes(header.as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        let entries: Vec<u64> = self.offsets.clone();
        for offset in entries {
            let entry = format!("{offset:010} 00000 n \n");
            self.write_bytes(entry.as_bytes())?;
        }
        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let mut trailer = Dictionary::new();
        trailer.set("Size", Object::Integer(self.offsets.len() as i64 + 1));
        trailer.set("Root", Object::Reference(catalog_id));
        trailer.set("Info", Object::Reference(info_id));

        self.write_bytes(b"trailer\n")?;
        self.write_object_value(&Object::Dictionary(trailer))?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.sink.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }
}

/// The fully-encoded object set for one save, in identifier order.
struct ObjectPlan {
    objects: Vec<(ObjectId, Object)>,
    catalog_id: ObjectId,
    info_id: ObjectId,
}

impl ObjectPlan {
    /// Assign identifiers and encode every object body.
    ///
    /// The walk is fixed: catalog (1), page tree (2), then per page its
    /// page object, content stream, and any font resources not already
    /// assigned for an earlier page; the info dictionary comes last. The
    /// same document therefore always yields the same plan.
    fn build(document: &Document) -> Result<Self> {
        let catalog_id = ObjectId::new(1, 0);
        let pages_id = ObjectId::new(2, 0);
        let mut next_number = 3u32;
        let mut allocate = || {
            let id = ObjectId::new(next_number, 0);
            next_number += 1;
            id
        };

        let mut objects: Vec<(ObjectId, Object)> = vec![
            (catalog_id, Object::Null),
            (pages_id, Object::Null),
        ];
        let mut page_ids = Vec::with_capacity(document.page_count());
        // Font resources value-equal across pages share one object; the
        // first page to register a spec determines its identifier.
        let mut font_ids: IndexMap<FontSpec, ObjectId> = IndexMap::new();

        for page in document.pages() {
            let page_id = allocate();
            page_ids.push(page_id);

            let content_id = match page.content() {
                Some(content) => {
                    if let Some(max) = content.max_font_index() {
                        if max >= page.fonts().len() {
                            return Err(Error::InternalConsistency(format!(
                                "content stream references font resource {max} but page has {}",
                                page.fonts().len()
                            )));
                        }
                    }
                    Some(allocate())
                }
                None => None,
            };

            let mut new_fonts = Vec::new();
            let mut font_refs = Vec::with_capacity(page.fonts().len());
            for font in page.fonts() {
                let id = match font_ids.get(font) {
                    Some(&id) => id,
                    None => {
                        let id = allocate();
                        font_ids.insert(font.clone(), id);
                        new_fonts.push((id, font));
                        id
                    }
                };
                font_refs.push(id);
            }

            objects.push((page_id, encode_page(page, pages_id, content_id, &font_refs)));
            if let Some(content_id) = content_id {
                let data = page
                    .content()
                    .expect("content id was allocated for this page")
                    .encode()?;
                let mut stream_dict = Dictionary::new();
                stream_dict.set("Length", Object::Integer(data.len() as i64));
                objects.push((content_id, Object::Stream(stream_dict, data)));
            }
            for (id, font) in new_fonts {
                objects.push((id, encode_font(font)));
            }
        }

        let info_id = allocate();
        objects.push((info_id, encode_info(document)));

        objects[0].1 = encode_catalog(pages_id);
        objects[1].1 = encode_page_tree(&page_ids);

        Ok(Self {
            objects,
            catalog_id,
            info_id,
        })
    }

    /// Referential-integrity pre-pass.
    ///
    /// Confirms identifiers are sequential and unique and that every
    /// reference in every body points at an assigned identifier. Runs
    /// before any byte is written.
    fn validate(&self) -> Result<()> {
        for (index, (id, _)) in self.objects.iter().enumerate() {
            let expected = index as u32 + 1;
            if id.number() != expected || id.generation() != 0 {
                return Err(Error::InternalConsistency(format!(
                    "object {} assigned out of sequence (expected {expected})",
                    id
                )));
            }
        }

        let count = self.objects.len() as u32;
        for (id, object) in &self.objects {
            validate_references(object, count).map_err(|dangling| {
                Error::InternalConsistency(format!(
                    "object {id} holds dangling reference {dangling}"
                ))
            })?;
        }
        Ok(())
    }
}

fn validate_references(object: &Object, count: u32) -> std::result::Result<(), ObjectId> {
    match object {
        Object::Reference(id) => {
            if id.number() == 0 || id.number() > count || id.generation() != 0 {
                return Err(*id);
            }
        }
        Object::Array(items) => {
            for item in items {
                validate_references(item, count)?;
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.entries() {
                validate_references(value, count)?;
            }
        }
        Object::Stream(dict, _) => {
            for (_, value) in dict.entries() {
                validate_references(value, count)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn encode_catalog(pages_id: ObjectId) -> Object {
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name("Catalog".to_string()));
    catalog.set("Pages", Object::Reference(pages_id));
    Object::Dictionary(catalog)
}

fn encode_page_tree(page_ids: &[ObjectId]) -> Object {
    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name("Pages".to_string()));
    pages.set(
        "Kids",
        Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
    );
    pages.set("Count", Object::Integer(page_ids.len() as i64));
    Object::Dictionary(pages)
}

fn encode_page(
    page: &crate::page::Page,
    parent_id: ObjectId,
    content_id: Option<ObjectId>,
    font_refs: &[ObjectId],
) -> Object {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name("Page".to_string()));
    dict.set("Parent", Object::Reference(parent_id));
    dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page.width()),
            Object::Real(page.height()),
        ]),
    );
    if let Some(content_id) = content_id {
        dict.set("Contents", Object::Reference(content_id));
    }
    if !font_refs.is_empty() {
        let mut font_dict = Dictionary::new();
        for (index, &id) in font_refs.iter().enumerate() {
            font_dict.set(format!("F{index}"), Object::Reference(id));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));
        dict.set("Resources", Object::Dictionary(resources));
    }
    Object::Dictionary(dict)
}

fn encode_font(font: &FontSpec) -> Object {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name("Font".to_string()));
    dict.set("Subtype", Object::Name("Type1".to_string()));
    dict.set("BaseFont", Object::Name(font.base_font().to_string()));
    // Symbolic fonts carry their own built-in encoding
    if !font.is_symbolic() {
        dict.set("Encoding", Object::Name("WinAnsiEncoding".to_string()));
    }
    Object::Dictionary(dict)
}

fn encode_info(document: &Document) -> Object {
    let metadata = &document.metadata;
    let mut info = Dictionary::new();
    if let Some(ref title) = metadata.title {
        info.set("Title", Object::String(title.clone()));
    }
    if let Some(ref author) = metadata.author {
        info.set("Author", Object::String(author.clone()));
    }
    if let Some(ref subject) = metadata.subject {
        info.set("Subject", Object::String(subject.clone()));
    }
    if let Some(ref keywords) = metadata.keywords {
        info.set("Keywords", Object::String(keywords.clone()));
    }
    if let Some(ref creator) = metadata.creator {
        info.set("Creator", Object::String(creator.clone()));
    }
    if let Some(ref producer) = metadata.producer {
        info.set("Producer", Object::String(producer.clone()));
    }
    if let Some(date) = metadata.creation_date {
        info.set("CreationDate", Object::String(format_pdf_date(date)));
    }
    if let Some(date) = metadata.modification_date {
        info.set("ModDate", Object::String(format_pdf_date(date)));
    }
    Object::Dictionary(info)
}

/// Format a date as a PDF date string (D:YYYYMMDDHHmmSS+00'00).
fn format_pdf_date(date: DateTime<Utc>) -> String {
    format!("{}+00'00", date.format("D:%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{DrawingContext, TextAnchor};
    use crate::geometry::Orientation;
    use crate::graphics::Color;
    use crate::page_size::PageSize;

    fn document_with_text() -> Document {
        let mut doc = Document::new();
        let page = doc.add_page();
        let mut gfx = DrawingContext::new(page);
        gfx.draw_text(
            "hello",
            &FontSpec::new("Helvetica", 12.0),
            Color::black(),
            TextAnchor::point(72.0, 720.0),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_header() {
        let mut buffer = Vec::new();
        let mut writer = DocumentWriter::new(&mut buffer);
        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.7\n"));
        assert_eq!(buffer.len(), 15);
        assert_eq!(&buffer[9..14], &[b'%', 0xE2, 0xE3, 0xCF, 0xD3]);
    }

    #[test]
    fn test_write_object_value_primitives() {
        let cases: Vec<(Object, &[u8])> = vec![
            (Object::Null, b"null"),
            (Object::Boolean(true), b"true"),
            (Object::Integer(-7), b"-7"),
            (Object::Real(25.0), b"25"),
            (Object::Real(0.5), b"0.5"),
            (Object::Name("Catalog".into()), b"/Catalog"),
            (Object::String("a(b)".into()), b"(a\\(b\\))"),
            (Object::Reference(ObjectId::new(3, 0)), b"3 0 R"),
        ];

        for (object, expected) in cases {
            let mut buffer = Vec::new();
            DocumentWriter::new(&mut buffer)
                .write_object_value(&object)
                .unwrap();
            assert_eq!(buffer, expected, "encoding {object:?}");
        }
    }

    #[test]
    fn test_write_array_and_dictionary() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name("Page".to_string()));
        dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(612.0),
                Object::Real(792.0),
            ]),
        );

        let mut buffer = Vec::new();
        DocumentWriter::new(&mut buffer)
            .write_object_value(&Object::Dictionary(dict))
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "<<\n/Type /Page\n/MediaBox [0 0 612 792]\n>>");
    }

    #[test]
    fn test_plan_identifier_order() {
        let doc = document_with_text();
        let plan = ObjectPlan::build(&doc).unwrap();

        // catalog, page tree, page, content, font, info
        let numbers: Vec<u32> = plan.objects.iter().map(|(id, _)| id.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(plan.catalog_id.number(), 1);
        assert_eq!(plan.info_id.number(), 6);
    }

    #[test]
    fn test_plan_empty_page_has_no_content_object() {
        let mut doc = Document::new();
        doc.add_page();
        let plan = ObjectPlan::build(&doc).unwrap();

        // catalog, page tree, page, info
        assert_eq!(plan.objects.len(), 4);
        let page_body = &plan.objects[2].1;
        let dict = page_body.as_dict().unwrap();
        assert!(!dict.contains_key("Contents"));
        assert!(!dict.contains_key("Resources"));
    }

    #[test]
    fn test_plan_shares_fonts_across_pages() {
        let mut doc = Document::new();
        for _ in 0..2 {
            let page = doc.add_page();
            let mut gfx = DrawingContext::new(page);
            gfx.draw_text(
                "shared",
                &FontSpec::new("Times", 25.0),
                Color::black(),
                TextAnchor::point(10.0, 10.0),
            )
            .unwrap();
        }

        let plan = ObjectPlan::build(&doc).unwrap();
        let font_objects = plan
            .objects
            .iter()
            .filter(|(_, body)| {
                body.as_dict()
                    .and_then(|d| d.get("Type"))
                    .and_then(Object::as_name)
                    == Some("Font")
            })
            .count();
        assert_eq!(font_objects, 1);
    }

    #[test]
    fn test_validate_rejects_dangling_reference() {
        let plan = ObjectPlan {
            objects: vec![(
                ObjectId::new(1, 0),
                encode_catalog(ObjectId::new(9, 0)),
            )],
            catalog_id: ObjectId::new(1, 0),
            info_id: ObjectId::new(1, 0),
        };

        assert!(matches!(
            plan.validate(),
            Err(Error::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_sequence_identifiers() {
        let plan = ObjectPlan {
            objects: vec![(ObjectId::new(2, 0), Object::Null)],
            catalog_id: ObjectId::new(2, 0),
            info_id: ObjectId::new(2, 0),
        };

        assert!(matches!(
            plan.validate(),
            Err(Error::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_write_document_structure() {
        let doc = document_with_text();
        let bytes = doc.to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.starts_with("%PDF-1.7\n"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Type /Pages"));
        assert!(text.contains("/Type /Page"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(text.contains("xref"));
        assert!(text.contains("trailer"));
        assert!(text.contains("startxref"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_landscape_media_box() {
        let mut doc = Document::new();
        doc.add_page_sized(PageSize::Statement, Orientation::Landscape);
        let bytes = doc.to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox [0 0 612 396]"));
    }

    #[test]
    fn test_stream_length_matches_data() {
        let doc = document_with_text();
        let plan = ObjectPlan::build(&doc).unwrap();
        let stream = plan
            .objects
            .iter()
            .find_map(|(_, body)| match body {
                Object::Stream(dict, data) => Some((dict, data)),
                _ => None,
            })
            .expect("document has a content stream");

        assert_eq!(
            stream.0.get("Length").and_then(Object::as_integer),
            Some(stream.1.len() as i64)
        );
    }

    #[test]
    fn test_format_pdf_date() {
        use chrono::TimeZone;

        let date = Utc.with_ymd_and_hms(2023, 12, 25, 15, 30, 45).unwrap();
        assert_eq!(format_pdf_date(date), "D:20231225153045+00'00");
    }

    #[test]
    fn test_info_dictionary_contents() {
        use chrono::TimeZone;

        let mut doc = Document::new();
        doc.set_title("Test Title");
        doc.set_author("Test Author");
        doc.set_creation_date(Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap());

        let bytes = doc.to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Test Title)"));
        assert!(text.contains("/Author (Test Author)"));
        assert!(text.contains("/CreationDate (D:20230101120000+00'00)"));
        assert!(text.contains("/Producer (vellum-pdf v"));
    }
}
