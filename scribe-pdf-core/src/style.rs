//! Typography constants for the report layout.
//!
//! Every font, size and gap rule lives here so the flow loop and the
//! pagination pass stay free of magic numbers.

use crate::classify::Role;
use crate::text::Font;

/// Typography for one role: face, point size and the extra leading below
/// each rendered line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub line_gap: f64,
}

impl TextStyle {
    /// Vertical distance consumed by one visual line of this style.
    pub fn line_advance(&self) -> f64 {
        self.size + self.line_gap
    }
}

/// Section headers: bold, slightly larger, looser leading.
pub const HEADER_STYLE: TextStyle = TextStyle {
    font: Font::HelveticaBold,
    size: 12.0,
    line_gap: 4.0,
};

/// Body prose.
pub const BODY_STYLE: TextStyle = TextStyle {
    font: Font::Helvetica,
    size: 11.0,
    line_gap: 3.0,
};

/// Page footer ("Page X of Y").
pub const FOOTER_STYLE: TextStyle = TextStyle {
    font: Font::Helvetica,
    size: 9.0,
    line_gap: 0.0,
};

/// Letterhead title line.
pub const LETTERHEAD_TITLE_STYLE: TextStyle = TextStyle {
    font: Font::HelveticaBold,
    size: 16.0,
    line_gap: 0.0,
};

/// Letterhead "Generated:" line.
pub const LETTERHEAD_META_STYLE: TextStyle = TextStyle {
    font: Font::Helvetica,
    size: 10.0,
    line_gap: 0.0,
};

/// Footer baseline height above the bottom page edge. Sits inside the
/// bottom margin band, which the flow engine never draws into.
pub const FOOTER_BASELINE: f64 = 50.0;

/// Gap above a header, in header line advances.
pub const HEADER_GAP_BEFORE: f64 = 0.5;

/// Breathing room below a header, in header line advances.
pub const HEADER_GAP_AFTER: f64 = 0.3;

/// Paragraph break for a blank line, in body line advances.
pub const BLANK_GAP: f64 = 0.5;

/// Style drawn for a role. Blank lines draw nothing; they take their gap
/// from the body style, so the lookup still answers for them.
pub fn style_for(role: Role) -> TextStyle {
    match role {
        Role::Header => HEADER_STYLE,
        Role::Body | Role::Blank => BODY_STYLE,
    }
}
