//! # scribe-pdf
//!
//! A pure Rust layout engine that turns dictated clinical report text into
//! paginated PDF documents, with zero external PDF dependencies.
//!
//! The pipeline is small and deliberate: each input line is classified as
//! a section header, body prose or a blank paragraph break; the flow
//! engine places classified lines on fixed-geometry pages with a vertical
//! cursor, wrapping body text and breaking pages on overflow; once the
//! final page count is known a second pass stamps every page with a
//! "Page X of Y" footer; the writer serializes the pages into a PDF 1.7
//! byte stream.
//!
//! ## Quick Start
//!
//! ```rust
//! use scribe_pdf::render_report;
//!
//! # fn main() -> scribe_pdf::Result<()> {
//! let bytes = render_report(
//!     "PERIPHERAL BLOOD SMEARS:\nMarked anemia noted.",
//! )?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Assembling the pipeline by hand
//!
//! The stages are public for callers that want to inspect pages before
//! emission:
//!
//! ```rust
//! use scribe_pdf::{Document, FlowEngine, PageSpec};
//!
//! # fn main() -> scribe_pdf::Result<()> {
//! let mut engine = FlowEngine::new(PageSpec::letter());
//! engine.flow_text("DIAGNOSIS:\nPending review.")?;
//!
//! let mut doc = Document::from_pages(engine.finish());
//! doc.stamp_footers();
//! assert_eq!(doc.page_count(), 1);
//!
//! let bytes = doc.to_bytes()?;
//! # Ok(())
//! # }
//! ```
//!
//! A render is a pure function of its input text and layout constants:
//! the engine never reads a clock or shares state between renders, so the
//! same report always produces byte-identical output.

pub mod classify;
pub mod document;
pub mod error;
pub mod flow;
pub mod objects;
pub mod page;
pub mod render;
pub mod style;
pub mod text;
pub mod writer;

pub use classify::{classify_line, Role};
pub use document::{Document, DocumentInfo};
pub use error::{RenderError, Result};
pub use flow::{FlowEngine, FlowState, Letterhead};
pub use page::{DrawOp, Margins, PageBuffer, PageSpec};
pub use render::{
    render_report, render_report_to, render_report_with, suggested_filename, RenderOptions,
};
pub use style::TextStyle;
pub use text::Font;
pub use writer::PdfWriter;
