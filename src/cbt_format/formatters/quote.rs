//! Quoting helpers shared by the raw, JSON and protobuf formatters.

use std::fmt::Write;

/// Renders bytes as a double-quoted literal.
///
/// Printable UTF-8 is kept as-is, the usual control characters use their
/// short escapes, other control characters become `\xNN` (or `\uNNNN` outside
/// ASCII) and bytes that are not valid UTF-8 become `\xNN`.
pub fn quote_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    out.push('"');
    for chunk in data.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_escaped(&mut out, c);
        }
        for b in chunk.invalid() {
            let _ = write!(out, "\\x{:02x}", b);
        }
    }
    out.push('"');
    out
}

pub fn quote_str(s: &str) -> String {
    quote_bytes(s.as_bytes())
}

/// Lower-case hex pairs separated by single spaces: `48 65 6c`.
pub fn hex_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, b) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02x}", b);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\x07' => out.push_str("\\a"),
        '\x08' => out.push_str("\\b"),
        '\x0c' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0b' => out.push_str("\\v"),
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        ' ' => out.push(' '),
        c if c.is_ascii_control() => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c if c.is_control() || c.is_whitespace() || is_format_or_private(c) => {
            let cp = c as u32;
            if cp <= 0xFFFF {
                let _ = write!(out, "\\u{:04x}", cp);
            } else {
                let _ = write!(out, "\\U{:08x}", cp);
            }
        }
        c => out.push(c),
    }
}

/// Invisible format characters (general category Cf).
const FORMAT_CHARS: &[(u32, u32)] = &[
    (0x00ad, 0x00ad),
    (0x0600, 0x0605),
    (0x061c, 0x061c),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x0890, 0x0891),
    (0x08e2, 0x08e2),
    (0x180e, 0x180e),
    (0x200b, 0x200f),
    (0x202a, 0x202e),
    (0x2060, 0x2064),
    (0x2066, 0x206f),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
    (0x110bd, 0x110bd),
    (0x110cd, 0x110cd),
    (0x13430, 0x1343f),
    (0x1bca0, 0x1bca3),
    (0x1d173, 0x1d17a),
    (0xe0001, 0xe0001),
    (0xe0020, 0xe007f),
];

/// Format and private-use characters print nothing visible, so they are
/// escaped like control characters. Unassigned code points are not
/// detected and print as-is.
fn is_format_or_private(c: char) -> bool {
    let cp = c as u32;
    let private_use = matches!(cp, 0xe000..=0xf8ff | 0xf0000..=0xffffd | 0x100000..=0x10fffd);
    private_use
        || FORMAT_CHARS
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&cp))
}
