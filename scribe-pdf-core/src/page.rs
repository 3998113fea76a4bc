use crate::text::Font;

/// Page margins in points (1/72 inch).
#[derive(Clone, Debug)]
pub struct Margins {
    /// Left margin
    pub left: f64,
    /// Right margin
    pub right: f64,
    /// Top margin
    pub top: f64,
    /// Bottom margin
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 72.0,   // 1 inch
            right: 72.0,  // 1 inch
            top: 72.0,    // 1 inch
            bottom: 72.0, // 1 inch
        }
    }
}

/// Fixed page geometry: outer size in points plus margins on all four
/// sides. Production reports use the Letter default; tests exercise
/// smaller specs to force page breaks cheaply.
#[derive(Clone, Debug)]
pub struct PageSpec {
    width: f64,
    height: f64,
    margins: Margins,
}

impl PageSpec {
    /// Creates a page spec with the given outer size and default margins.
    ///
    /// Points are 1/72 of an inch.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    /// US Letter (612 x 792 points).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// A4 (595 x 842 points).
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }

    /// Replaces the margins, consuming and returning the spec.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    /// Horizontal space available to draw operations.
    pub fn content_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    /// Vertical space available to draw operations.
    pub fn content_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::letter()
    }
}

/// One positioned draw operation.
///
/// Coordinates are PDF user space: origin at the bottom-left corner of the
/// page, y increasing upward. Text positions are baselines.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A run of text with its baseline starting at (x, y).
    TextRun {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        text: String,
    },
    /// A horizontal rule stroked from (x1, y) to (x2, y).
    Rule { x1: f64, x2: f64, y: f64, width: f64 },
}

/// A single output page: fixed geometry plus an append-only list of draw
/// operations.
///
/// The flow engine owns the buffer while content is being placed; once a
/// new page is opened the previous buffer is only ever appended to again by
/// the pagination pass, never rewritten.
#[derive(Clone, Debug)]
pub struct PageBuffer {
    spec: PageSpec,
    ops: Vec<DrawOp>,
}

impl PageBuffer {
    pub fn new(spec: PageSpec) -> Self {
        Self {
            spec,
            ops: Vec::new(),
        }
    }

    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// Appends a draw operation. There is deliberately no way to remove or
    /// reorder operations once pushed.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Distinct fonts referenced by this page, in first-use order.
    pub fn fonts_used(&self) -> Vec<Font> {
        let mut fonts = Vec::new();
        for op in &self.ops {
            if let DrawOp::TextRun { font, .. } = op {
                if !fonts.contains(font) {
                    fonts.push(*font);
                }
            }
        }
        fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins_one_inch() {
        let margins = Margins::default();
        assert_eq!(margins.left, 72.0);
        assert_eq!(margins.right, 72.0);
        assert_eq!(margins.top, 72.0);
        assert_eq!(margins.bottom, 72.0);
    }

    #[test]
    fn test_letter_dimensions() {
        let spec = PageSpec::letter();
        assert_eq!(spec.width(), 612.0);
        assert_eq!(spec.height(), 792.0);
    }

    #[test]
    fn test_a4_dimensions() {
        let spec = PageSpec::a4();
        assert_eq!(spec.width(), 595.0);
        assert_eq!(spec.height(), 842.0);
    }

    #[test]
    fn test_default_is_letter() {
        let spec = PageSpec::default();
        assert_eq!(spec.width(), 612.0);
        assert_eq!(spec.height(), 792.0);
    }

    #[test]
    fn test_letter_content_area() {
        let spec = PageSpec::letter();
        assert_eq!(spec.content_width(), 468.0);
        assert_eq!(spec.content_height(), 648.0);
    }

    #[test]
    fn test_with_margins() {
        let spec = PageSpec::new(200.0, 300.0).with_margins(Margins {
            left: 10.0,
            right: 20.0,
            top: 30.0,
            bottom: 40.0,
        });
        assert_eq!(spec.content_width(), 170.0);
        assert_eq!(spec.content_height(), 230.0);
    }

    #[test]
    fn test_page_buffer_appends_in_order() {
        let mut page = PageBuffer::new(PageSpec::letter());
        assert!(page.ops().is_empty());

        page.push(DrawOp::TextRun {
            x: 72.0,
            y: 720.0,
            font: Font::HelveticaBold,
            size: 12.0,
            text: "DIAGNOSIS:".to_string(),
        });
        page.push(DrawOp::Rule {
            x1: 72.0,
            x2: 540.0,
            y: 700.0,
            width: 1.0,
        });

        assert_eq!(page.ops().len(), 2);
        assert!(matches!(page.ops()[0], DrawOp::TextRun { .. }));
        assert!(matches!(page.ops()[1], DrawOp::Rule { .. }));
    }

    #[test]
    fn test_fonts_used_dedup_in_first_use_order() {
        let mut page = PageBuffer::new(PageSpec::letter());
        for (font, text) in [
            (Font::HelveticaBold, "DIAGNOSIS:"),
            (Font::Helvetica, "Marked anemia."),
            (Font::HelveticaBold, "COMMENT:"),
        ] {
            page.push(DrawOp::TextRun {
                x: 72.0,
                y: 700.0,
                font,
                size: 11.0,
                text: text.to_string(),
            });
        }

        assert_eq!(page.fonts_used(), vec![Font::HelveticaBold, Font::Helvetica]);
    }

    #[test]
    fn test_fonts_used_empty_page() {
        let page = PageBuffer::new(PageSpec::letter());
        assert!(page.fonts_used().is_empty());
    }
}
