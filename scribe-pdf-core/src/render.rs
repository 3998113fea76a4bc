//! The one-call pipeline: classify and flow the report text, stamp the
//! page footers, emit the bytes.

use chrono::Utc;
use std::io::Write;
use tracing::info;

use crate::document::Document;
use crate::error::Result;
use crate::flow::{FlowEngine, Letterhead};
use crate::page::PageSpec;

/// Knobs for a single render. The default is a bare US Letter layout with
/// no letterhead, which keeps the output a pure function of the input
/// text.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub page: PageSpec,
    /// Title block drawn above the report content on page one. Carries
    /// its own timestamp so opting in does not make the render
    /// nondeterministic.
    pub letterhead: Option<Letterhead>,
}

/// Renders `report` with default options into a PDF byte buffer.
///
/// ```rust
/// use scribe_pdf::render_report;
///
/// let bytes = render_report("DIAGNOSIS:\nMarked anemia noted.")?;
/// assert!(bytes.starts_with(b"%PDF-1.7"));
/// # Ok::<(), scribe_pdf::RenderError>(())
/// ```
pub fn render_report(report: &str) -> Result<Vec<u8>> {
    render_report_with(report, &RenderOptions::default())
}

/// Renders `report` into a PDF byte buffer.
pub fn render_report_with(report: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    let document = lay_out(report, options)?;
    let bytes = document.to_bytes()?;
    info!(
        pages = document.page_count(),
        bytes = bytes.len(),
        "report rendered"
    );
    Ok(bytes)
}

/// Renders `report` straight into `sink`, page by page, in order.
///
/// If the sink rejects a write, the failure surfaces as
/// `EmissionFailure` and no further bytes are emitted; whatever the sink
/// already accepted is left alone.
pub fn render_report_to<W: Write>(sink: W, report: &str, options: &RenderOptions) -> Result<()> {
    let document = lay_out(report, options)?;
    document.write(sink)
}

fn lay_out(report: &str, options: &RenderOptions) -> Result<Document> {
    let mut engine = FlowEngine::new(options.page.clone());
    if let Some(letterhead) = &options.letterhead {
        engine.place_letterhead(letterhead)?;
    }
    engine.flow_text(report)?;

    let mut document = Document::from_pages(engine.finish());
    if let Some(letterhead) = &options.letterhead {
        document.set_title(letterhead.title.clone());
        document.set_creation_date(letterhead.generated_at);
    }
    document.stamp_footers();
    Ok(document)
}

/// The download filename for a render: the caller's name when one was
/// given, otherwise a current-timestamp default.
pub fn suggested_filename(explicit: Option<&str>) -> String {
    match explicit {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("medical-report-{}.pdf", Utc::now().timestamp_millis()),
    }
}
