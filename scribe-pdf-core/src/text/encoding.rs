/// Encode Unicode text as WinAnsi (Windows-1252) bytes for PDF literal
/// strings. The standard faces are registered with WinAnsiEncoding, so this
/// is the byte form every text run is emitted in. Characters with no
/// WinAnsi code point degrade to a question mark.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut result = Vec::new();
    for ch in text.chars() {
        match ch as u32 {
            // ASCII range
            0x00..=0x7F => result.push(ch as u8),
            // Latin-1 Supplement that overlaps with Windows-1252
            0xA0..=0xFF => result.push(ch as u8),
            // Special mappings for Windows-1252
            0x20AC => result.push(0x80), // Euro sign
            0x201A => result.push(0x82), // Single low quotation mark
            0x0192 => result.push(0x83), // Latin small letter f with hook
            0x201E => result.push(0x84), // Double low quotation mark
            0x2026 => result.push(0x85), // Horizontal ellipsis
            0x2020 => result.push(0x86), // Dagger
            0x2021 => result.push(0x87), // Double dagger
            0x02C6 => result.push(0x88), // Circumflex accent
            0x2030 => result.push(0x89), // Per mille sign
            0x0160 => result.push(0x8A), // Latin capital letter S with caron
            0x2039 => result.push(0x8B), // Single left angle quotation mark
            0x0152 => result.push(0x8C), // Latin capital ligature OE
            0x017D => result.push(0x8E), // Latin capital letter Z with caron
            0x2018 => result.push(0x91), // Left single quotation mark
            0x2019 => result.push(0x92), // Right single quotation mark
            0x201C => result.push(0x93), // Left double quotation mark
            0x201D => result.push(0x94), // Right double quotation mark
            0x2022 => result.push(0x95), // Bullet
            0x2013 => result.push(0x96), // En dash
            0x2014 => result.push(0x97), // Em dash
            0x02DC => result.push(0x98), // Small tilde
            0x2122 => result.push(0x99), // Trade mark sign
            0x0161 => result.push(0x9A), // Latin small letter s with caron
            0x203A => result.push(0x9B), // Single right angle quotation mark
            0x0153 => result.push(0x9C), // Latin small ligature oe
            0x017E => result.push(0x9E), // Latin small letter z with caron
            0x0178 => result.push(0x9F), // Latin capital letter Y with diaeresis
            // Default: use question mark for unmapped characters
            _ => result.push(b'?'),
        }
    }
    result
}
