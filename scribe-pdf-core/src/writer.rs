//! PDF serialization: turns a laid-out [`Document`] into the final byte
//! stream.
//!
//! The output is a conventional PDF 1.7 body: catalog, page tree, one
//! content stream per page, info dictionary, xref table and trailer. Byte
//! positions are tracked as objects are written so the xref table can be
//! emitted in a single pass. Every write goes straight to the sink; a
//! rejected write surfaces as `EmissionFailure` and nothing further is
//! emitted.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::document::Document;
use crate::error::Result;
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::page::{DrawOp, PageBuffer};
use crate::text::encode_win_ansi;

pub struct PdfWriter<W: Write> {
    writer: W,
    xref_positions: HashMap<ObjectId, u64>,
    current_position: u64,
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            xref_positions: HashMap::new(),
            current_position: 0,
        }
    }

    /// Serializes `document` in page order: header, catalog, page tree,
    /// per-page content streams, info dictionary, xref and trailer.
    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        self.write_header()?;

        let catalog_id = self.write_catalog()?;
        let _pages_id = self.write_pages(document)?;
        let info_id = self.write_info(document)?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(catalog_id, info_id, xref_position)?;

        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary comment so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_catalog(&mut self) -> Result<ObjectId> {
        let catalog_id = ObjectId::new(1, 0);
        let pages_id = ObjectId::new(2, 0);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name("Catalog".to_string()));
        catalog.set("Pages", Object::Reference(pages_id));

        self.write_object(catalog_id, Object::Dictionary(catalog))?;
        Ok(catalog_id)
    }

    // Object numbering: 1 catalog, 2 page tree, then a (page, content)
    // pair per page, then the info dictionary. All sequential, so the
    // xref table has no gaps and repeat runs produce identical bytes.
    fn write_pages(&mut self, document: &Document) -> Result<ObjectId> {
        let pages_id = ObjectId::new(2, 0);
        let first_page = 3u32;

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name("Pages".to_string()));
        pages_dict.set("Count", Object::Integer(document.pages().len() as i64));

        let kids = (0..document.pages().len())
            .map(|i| Object::Reference(ObjectId::new(first_page + i as u32 * 2, 0)))
            .collect();
        pages_dict.set("Kids", Object::Array(kids));

        self.write_object(pages_id, Object::Dictionary(pages_dict))?;

        for (i, page) in document.pages().iter().enumerate() {
            let page_id = ObjectId::new(first_page + i as u32 * 2, 0);
            let content_id = ObjectId::new(first_page + i as u32 * 2 + 1, 0);

            self.write_page(page_id, pages_id, content_id, page)?;
            self.write_page_content(content_id, page)?;
        }

        Ok(pages_id)
    }

    fn write_page(
        &mut self,
        page_id: ObjectId,
        parent_id: ObjectId,
        content_id: ObjectId,
        page: &PageBuffer,
    ) -> Result<()> {
        let spec = page.spec();

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name("Page".to_string()));
        page_dict.set("Parent", Object::Reference(parent_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(spec.width()),
                Object::Real(spec.height()),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));

        // Only the faces this page actually draws with go into its
        // resources. The standard faces need no embedding, just a name
        // and the encoding the strings were emitted in.
        let mut font_dict = Dictionary::new();
        for font in page.fonts_used() {
            let mut font_entry = Dictionary::new();
            font_entry.set("Type", Object::Name("Font".to_string()));
            font_entry.set("Subtype", Object::Name("Type1".to_string()));
            font_entry.set("BaseFont", Object::Name(font.pdf_name().to_string()));
            font_entry.set("Encoding", Object::Name("WinAnsiEncoding".to_string()));
            font_dict.set(font.pdf_name(), Object::Dictionary(font_entry));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));
        page_dict.set("Resources", Object::Dictionary(resources));

        self.write_object(page_id, Object::Dictionary(page_dict))?;
        Ok(())
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &PageBuffer) -> Result<()> {
        let content = generate_content(page);

        let mut stream = Stream::new(content);
        stream.compress_flate()?;

        self.write_object(
            content_id,
            Object::Stream(stream.dictionary().clone(), stream.data().to_vec()),
        )?;
        Ok(())
    }

    fn write_info(&mut self, document: &Document) -> Result<ObjectId> {
        let info_id = ObjectId::new(3 + document.pages().len() as u32 * 2, 0);
        let info = document.info();

        let mut info_dict = Dictionary::new();
        if let Some(ref title) = info.title {
            info_dict.set("Title", Object::String(title.clone()));
        }
        if let Some(ref creator) = info.creator {
            info_dict.set("Creator", Object::String(creator.clone()));
        }
        if let Some(ref producer) = info.producer {
            info_dict.set("Producer", Object::String(producer.clone()));
        }
        if let Some(creation_date) = info.creation_date {
            info_dict.set("CreationDate", Object::String(format_pdf_date(creation_date)));
        }

        self.write_object(info_id, Object::Dictionary(info_dict))?;
        Ok(info_id)
    }

    fn write_object(&mut self, id: ObjectId, object: Object) -> Result<()> {
        self.xref_positions.insert(id, self.current_position);

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(&object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(
                format!("{f:.6}")
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .as_bytes(),
            )?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                self.write_bytes(&escape_literal_string(&encode_win_ansi(s)))?;
                self.write_bytes(b")")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
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
                let ref_str = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(ref_str.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        self.write_bytes(b"xref\n")?;

        let mut entries: Vec<_> = self
            .xref_positions
            .iter()
            .map(|(id, pos)| (*id, *pos))
            .collect();
        entries.sort_by_key(|(id, _)| id.number());

        let max_obj_num = entries.iter().map(|(id, _)| id.number()).max().unwrap_or(0);

        self.write_bytes(format!("0 {}\n", max_obj_num + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        for obj_num in 1..=max_obj_num {
            if let Some((_, position)) = entries.iter().find(|(id, _)| id.number() == obj_num) {
                self.write_bytes(format!("{position:010} {:05} n \n", 0).as_bytes())?;
            } else {
                self.write_bytes(b"0000000000 00000 f \n")?;
            }
        }

        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(|id| id.number())
            .max()
            .unwrap_or(0);

        let mut trailer = Dictionary::new();
        trailer.set("Size", Object::Integer((max_obj_num + 1) as i64));
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
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Translate a page's draw operations into content stream operators.
fn generate_content(page: &PageBuffer) -> Vec<u8> {
    let mut content = String::new();

    for op in page.ops() {
        match op {
            DrawOp::TextRun {
                x,
                y,
                font,
                size,
                text,
            } => {
                content.push_str("BT\n");
                writeln!(content, "/{} {} Tf", font.pdf_name(), size).unwrap();
                writeln!(content, "{x:.2} {y:.2} Td").unwrap();
                content.push('(');
                for byte in escape_literal_string(&encode_win_ansi(text)) {
                    content.push(byte as char);
                }
                content.push_str(") Tj\n");
                content.push_str("ET\n");
            }
            DrawOp::Rule { x1, x2, y, width } => {
                writeln!(content, "{width:.2} w").unwrap();
                writeln!(content, "{x1:.2} {y:.2} m").unwrap();
                writeln!(content, "{x2:.2} {y:.2} l").unwrap();
                content.push_str("S\n");
            }
        }
    }

    content.into_bytes()
}

/// Escape encoded bytes for a PDF literal string. Printable ASCII passes
/// through, delimiters and backslashes get a backslash escape, and
/// everything else becomes a three-digit octal escape.
fn escape_literal_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'(' => escaped.extend_from_slice(b"\\("),
            b')' => escaped.extend_from_slice(b"\\)"),
            b'\\' => escaped.extend_from_slice(b"\\\\"),
            b'\n' => escaped.extend_from_slice(b"\\n"),
            b'\r' => escaped.extend_from_slice(b"\\r"),
            b'\t' => escaped.extend_from_slice(b"\\t"),
            0x20..=0x7E => escaped.push(byte),
            _ => escaped.extend(format!("\\{byte:03o}").bytes()),
        }
    }
    escaped
}

/// Format a DateTime as a PDF date string (D:YYYYMMDDHHmmSS+00'00). The
/// input is already UTC so the offset is constant.
fn format_pdf_date(date: DateTime<Utc>) -> String {
    format!("{}+00'00", date.format("D:%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSpec;
    use crate::text::Font;
    use chrono::TimeZone;

    fn page_with_text(text: &str) -> PageBuffer {
        let mut page = PageBuffer::new(PageSpec::letter());
        page.push(DrawOp::TextRun {
            x: 72.0,
            y: 720.0,
            font: Font::Helvetica,
            size: 11.0,
            text: text.to_string(),
        });
        page
    }

    #[test]
    fn test_write_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.7\n"));
        assert_eq!(&buffer[9..], &[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);
    }

    #[test]
    fn test_write_catalog() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        let catalog_id = writer.write_catalog().unwrap();

        assert_eq!(catalog_id.number(), 1);
        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("1 0 obj"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Pages 2 0 R"));
        assert!(content.contains("endobj"));
    }

    #[test]
    fn test_write_document_structure() {
        let doc = Document::from_pages(vec![page_with_text("Hello."), page_with_text("World.")]);

        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_document(&doc).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.starts_with("%PDF-1.7\n"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Count 2"));
        assert!(content.contains("/Kids [3 0 R 5 0 R]"));
        assert!(content.contains("/MediaBox [0 0 612 792]"));
        assert!(content.contains("xref"));
        assert!(content.contains("trailer"));
        assert!(content.contains("%%EOF"));
    }

    #[test]
    fn test_page_resources_list_used_fonts_only() {
        let mut page = page_with_text("Body.");
        page.push(DrawOp::TextRun {
            x: 72.0,
            y: 700.0,
            font: Font::HelveticaBold,
            size: 12.0,
            text: "HEADER:".to_string(),
        });
        let doc = Document::from_pages(vec![page, page_with_text("Only body here.")]);

        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_document(&doc).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(content.contains("/Encoding /WinAnsiEncoding"));
        // Bold appears once: page 2 never uses it
        assert_eq!(content.matches("/BaseFont /Helvetica-Bold").count(), 1);
    }

    #[test]
    fn test_write_info_with_title_and_date() {
        let mut doc = Document::from_pages(vec![PageBuffer::new(PageSpec::letter())]);
        doc.set_title("PATHOLOGY REPORT");
        doc.set_creation_date(Utc.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap());

        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_document(&doc).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains("/Title (PATHOLOGY REPORT)"));
        assert!(content.contains("/Creator (scribe-pdf)"));
        assert!(content.contains("/Producer (scribe-pdf v"));
        assert!(content.contains("/CreationDate (D:20240315143000+00'00)"));
    }

    #[test]
    fn test_write_is_deterministic() {
        let doc = Document::from_pages(vec![page_with_text("Same bytes every time.")]);

        let mut first = Vec::new();
        PdfWriter::new_with_writer(&mut first)
            .write_document(&doc)
            .unwrap();
        let mut second = Vec::new();
        PdfWriter::new_with_writer(&mut second)
            .write_document(&doc)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_content_text_run() {
        let page = page_with_text("Marked anemia noted.");
        let content = String::from_utf8(generate_content(&page)).unwrap();

        assert!(content.contains("BT\n"));
        assert!(content.contains("/Helvetica 11 Tf\n"));
        assert!(content.contains("72.00 720.00 Td\n"));
        assert!(content.contains("(Marked anemia noted.) Tj\n"));
        assert!(content.contains("ET\n"));
    }

    #[test]
    fn test_generate_content_rule() {
        let mut page = PageBuffer::new(PageSpec::letter());
        page.push(DrawOp::Rule {
            x1: 72.0,
            x2: 540.0,
            y: 700.0,
            width: 1.0,
        });
        let content = String::from_utf8(generate_content(&page)).unwrap();

        assert!(content.contains("1.00 w\n"));
        assert!(content.contains("72.00 700.00 m\n"));
        assert!(content.contains("540.00 700.00 l\n"));
        assert!(content.contains("S\n"));
    }

    #[test]
    fn test_escape_literal_string() {
        assert_eq!(escape_literal_string(b"plain"), b"plain");
        assert_eq!(escape_literal_string(b"a(b)c"), b"a\\(b\\)c");
        assert_eq!(escape_literal_string(b"back\\slash"), b"back\\\\slash");
        assert_eq!(escape_literal_string(&[0xE9]), b"\\351");
    }

    #[test]
    fn test_format_pdf_date() {
        let date = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_pdf_date(date), "D:20230101120000+00'00");
    }

    #[test]
    fn test_emission_failure_propagates() {
        struct ClosedSink;
        impl Write for ClosedSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "sink closed",
                ))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let doc = Document::from_pages(vec![PageBuffer::new(PageSpec::letter())]);
        let mut writer = PdfWriter::new_with_writer(ClosedSink);
        let err = writer.write_document(&doc).unwrap_err();
        assert!(matches!(err, crate::error::RenderError::EmissionFailure(_)));
    }
}
