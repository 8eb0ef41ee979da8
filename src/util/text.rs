//! Text helpers for component source code.

/// Line ending used by the VBA editor for exported components.
pub const CRLF: &str = "\r\n";

/// Split `text` into lines, treating `\r\n`, a bare `\n` and a bare `\r` as
/// one boundary each.
///
/// Like `str::split`, a trailing boundary yields a trailing empty line, so
/// joining the result with any separator keeps the number of boundaries.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&text[start..]);

    lines
}

/// Rewrite every line boundary in `text` as `\r\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    split_lines(text).join(CRLF)
}
