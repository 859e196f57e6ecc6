//! Raw source extent of scalars.
//!
//! yaml-rust2 markers give us roughly where a scalar starts; how far it
//! runs depends on its style. Block scalars are marked at their first
//! content character and own every line indented past the indicator
//! line, quoted scalars run to the closing quote, and plain scalars may
//! fold across indented continuation lines.

use crate::node::ScalarStyle;
use tangle_source_map::leading_blank_width;

/// Compute the byte extent `[start, end)` of the scalar marked at `start`.
///
/// `value` is the parsed scalar value, used as a shortcut for plain
/// scalars (which appear verbatim) and as a fallback when the marker did
/// not land where the style says it should. Block scalar markers land on
/// the first content character rather than the `|`/`>` indicator, so
/// their extent start is rewound to the indicator on the key line.
pub(crate) fn scalar_extent(
    source: &str,
    start: usize,
    style: ScalarStyle,
    value: &str,
) -> (usize, usize) {
    if style.is_block() {
        let start = block_indicator_start(source, start).unwrap_or(start);
        return (start, block_end(source, start));
    }
    (start, scalar_end(source, start, style, value))
}

fn scalar_end(source: &str, start: usize, style: ScalarStyle, value: &str) -> usize {
    let bytes = source.as_bytes();
    if start >= bytes.len() {
        return bytes.len();
    }

    match style {
        ScalarStyle::SingleQuoted if bytes[start] == b'\'' => single_quoted_end(bytes, start),
        ScalarStyle::DoubleQuoted if bytes[start] == b'"' => double_quoted_end(bytes, start),
        ScalarStyle::Plain => plain_end(source, start, value),
        // Marker did not land on the opening quote; use the parsed length.
        _ => (start + value.len()).min(bytes.len()),
    }
}

/// Rewind from where a block scalar was marked to the `|`/`>` indicator
/// that introduced it.
///
/// The indicator sits at the end of the nearest non-blank line above the
/// content. Returns `None` when no such line carries one (truncated or
/// malformed input).
fn block_indicator_start(source: &str, from: usize) -> Option<usize> {
    if matches!(source.as_bytes().get(from), Some(b'|' | b'>')) {
        // Marker already on the indicator
        return Some(from);
    }
    let mut end = source[..from].rfind('\n')?;
    loop {
        let start = source[..end].rfind('\n').map_or(0, |i| i + 1);
        let line = &source[start..end];
        if !line.trim().is_empty() {
            return indicator_in_line(line).map(|i| start + i);
        }
        end = start.checked_sub(1)?;
    }
}

/// Byte index of the block header token within a key line: `|` or `>`,
/// optional chomping and indentation modifiers, then nothing but blanks
/// or a comment through the end of the line.
fn indicator_in_line(line: &str) -> Option<usize> {
    for (i, b) in line.bytes().enumerate().rev() {
        if b != b'|' && b != b'>' {
            continue;
        }
        let rest = line[i + 1..]
            .trim_start_matches(|c: char| c.is_ascii_digit() || c == '+' || c == '-')
            .trim_start();
        if rest.is_empty() || rest.starts_with('#') {
            return Some(i);
        }
    }
    None
}

fn single_quoted_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            // '' is an escaped quote inside a single-quoted scalar
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn double_quoted_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of a `|` or `>` block: every following line more indented than
/// the indicator's line belongs to the block. Interior blank lines are
/// kept, trailing blank lines are clipped.
fn block_end(source: &str, start: usize) -> usize {
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let indent = leading_blank_width(&source[line_start..]);

    let Some(header_len) = source[start..].find('\n') else {
        // Indicator with nothing after it
        return source.len();
    };
    let header_end = start + header_len;

    let mut end = header_end;
    let mut pos = header_end + 1;
    while pos < source.len() {
        let line_end = source[pos..].find('\n').map_or(source.len(), |i| pos + i);
        let line = &source[pos..line_end];
        if line.trim().is_empty() {
            // Tentative: only included if a content line follows
        } else if leading_blank_width(line) > indent {
            end = if line_end < source.len() {
                line_end + 1
            } else {
                line_end
            };
        } else {
            break;
        }
        pos = if line_end < source.len() {
            line_end + 1
        } else {
            source.len()
        };
    }
    end
}

/// End of a plain scalar: the first line's content, plus any folded
/// continuation lines indented past the line the scalar starts on.
fn plain_end(source: &str, start: usize, value: &str) -> usize {
    if value.is_empty() {
        // Empty plain scalars stand for null; their marker may already
        // point at the next token, so give them a zero-width span.
        return start;
    }

    let line_end = source[start..].find('\n').map_or(source.len(), |i| start + i);
    let first_line = &source[start..line_end];

    // Single-line values appear verbatim in the source. Matching the
    // value directly keeps flow terminators (`,`, `]`, `}`) out of the
    // span.
    if !value.contains('\n') && first_line.starts_with(value) {
        return start + value.len();
    }

    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let indent = leading_blank_width(&source[line_start..]);

    let mut end = start + line_content_len(first_line);
    let mut pos = if line_end < source.len() {
        line_end + 1
    } else {
        source.len()
    };
    while pos < source.len() {
        let le = source[pos..].find('\n').map_or(source.len(), |i| pos + i);
        let line = &source[pos..le];
        if line.trim().is_empty() {
            // Folded blank line, kept only if content follows
        } else if leading_blank_width(line) > indent {
            end = pos + line_content_len(line);
        } else {
            break;
        }
        pos = if le < source.len() { le + 1 } else { source.len() };
    }
    end
}

/// Byte length of a line's content: trailing whitespace dropped, and a
/// `#` comment (which must follow whitespace) cut off.
fn line_content_len(line: &str) -> usize {
    let bytes = line.as_bytes();
    let mut cut = bytes.len();
    for i in 1..bytes.len() {
        if bytes[i] == b'#' && (bytes[i - 1] == b' ' || bytes[i - 1] == b'\t') {
            cut = i;
            break;
        }
    }
    line[..cut].trim_end().len()
}
