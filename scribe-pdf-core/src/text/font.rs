/// Standard Type 1 faces used by the report layout.
///
/// Both are among the PDF base fonts, guaranteed to be available in every
/// reader, so nothing is embedded and pages reference them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica (sans-serif), used for body text, footers and the
    /// letterhead timestamp.
    Helvetica,
    /// Helvetica Bold, used for section headers and the letterhead title.
    HelveticaBold,
}

impl Font {
    /// Get the PDF name for this font. Doubles as the resource key the
    /// content streams reference it under.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}
