//! Line classification for dictated report text.
//!
//! Dictation transcripts arrive as plain text where section labels are
//! written in all caps and end with a colon ("DIAGNOSIS:", "GROSS/MICRO:").
//! Everything else is narrative body text, and empty lines separate
//! paragraphs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // All-caps label ending in a colon. Slashes allowed for compound
    // section names like "GROSS/MICROSCOPIC:".
    static ref SECTION_HEADER: Regex = Regex::new(r"^[A-Z\s/]+:$").unwrap();
}

/// Role assigned to a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Section label, rendered bold with extra space around it.
    Header,
    /// Narrative text, wrapped to the content width.
    Body,
    /// Empty line, rendered as a paragraph gap.
    Blank,
}

/// Classify a raw input line, returning its role and the trimmed text.
///
/// Leading and trailing whitespace never survives into the output; the
/// trimmed form is what the layout engine draws.
pub fn classify_line(raw: &str) -> (Role, &str) {
    let line = raw.trim();
    if line.is_empty() {
        (Role::Blank, line)
    } else if SECTION_HEADER.is_match(line) {
        (Role::Header, line)
    } else {
        (Role::Body, line)
    }
}
