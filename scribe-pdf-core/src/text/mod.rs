//! Fonts, character metrics, wrapping and string encoding for the layout
//! engine. Widths come from the Adobe AFM tables for the standard faces, so
//! measurement needs no font files at runtime.

mod encoding;
mod font;
mod metrics;

pub use encoding::encode_win_ansi;
pub use font::Font;
pub use metrics::{measure_char, measure_text, split_into_words, wrap_text};
