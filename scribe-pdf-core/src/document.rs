use chrono::{DateTime, Utc};
use std::io::Write;

use crate::error::Result;
use crate::page::{DrawOp, PageBuffer};
use crate::style::{FOOTER_BASELINE, FOOTER_STYLE};
use crate::text::measure_text;
use crate::writer::PdfWriter;

/// Metadata written to the PDF info dictionary.
///
/// Dates are only ever set from caller-supplied values. The render path
/// never reads a clock, so the same input always serializes to the same
/// bytes.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    /// Date and time the document was created
    pub creation_date: Option<DateTime<Utc>>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: None,
            creator: Some("scribe-pdf".to_string()),
            producer: Some(format!("scribe-pdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: None,
        }
    }
}

/// A laid-out report: the ordered pages produced by the flow engine plus
/// info metadata.
///
/// # Example
///
/// ```rust
/// use scribe_pdf::{Document, FlowEngine, PageSpec};
///
/// let mut engine = FlowEngine::new(PageSpec::letter());
/// engine.flow_text("DIAGNOSIS:\nMarked anemia.")?;
///
/// let mut doc = Document::from_pages(engine.finish());
/// doc.stamp_footers();
/// let bytes = doc.to_bytes()?;
/// # Ok::<(), scribe_pdf::RenderError>(())
/// ```
pub struct Document {
    pub(crate) pages: Vec<PageBuffer>,
    pub(crate) info: DocumentInfo,
}

impl Document {
    /// Wraps the flow engine's output with default metadata.
    pub fn from_pages(pages: Vec<PageBuffer>) -> Self {
        Self {
            pages,
            info: DocumentInfo::default(),
        }
    }

    pub fn pages(&self) -> &[PageBuffer] {
        &self.pages
    }

    /// Gets the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.info.title = Some(title.into());
    }

    /// Sets the document creation date.
    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.info.creation_date = Some(date);
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// The pagination pass: appends one centered "Page i of N" run to every
    /// page, N being the now-final page count. Necessarily runs after the
    /// flow completes, and only ever appends; operations already on a page
    /// are not touched.
    pub fn stamp_footers(&mut self) {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", index + 1, total);
            let width = measure_text(&text, FOOTER_STYLE.font, FOOTER_STYLE.size);
            let x = (page.spec().width() - width) / 2.0;
            page.push(DrawOp::TextRun {
                x,
                y: FOOTER_BASELINE,
                font: FOOTER_STYLE.font,
                size: FOOTER_STYLE.size,
                text,
            });
        }
    }

    /// Serializes the document into `sink`, page by page, in order.
    ///
    /// # Errors
    ///
    /// Surfaces the sink's `io::Error` as `EmissionFailure` if a write is
    /// rejected mid-stream; bytes already flushed are left as they are.
    pub fn write<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = PdfWriter::new_with_writer(sink);
        writer.write_document(self)
    }

    /// Serializes the document into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Saves the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let mut writer = PdfWriter::new(path)?;
        writer.write_document(self)
    }
}
