//! Conversions between byte offsets and line/column coordinates

use crate::types::{Location, Range};

/// Convert a byte offset to a Location with line and column info
///
/// Returns None if the offset is out of bounds.
pub fn offset_to_location(source: &str, offset: usize) -> Option<Location> {
    if offset > source.len() {
        return None;
    }

    let mut row = 0;
    let mut column = 0;
    let mut current_offset = 0;

    for ch in source.chars() {
        if current_offset >= offset {
            break;
        }

        if ch == '\n' {
            row += 1;
            column = 0;
        } else {
            column += 1;
        }

        current_offset += ch.len_utf8();
    }

    Some(Location {
        offset,
        row,
        column,
    })
}

/// Convert line and column numbers to a byte offset
///
/// Line and column are 0-indexed. Returns None if out of bounds.
pub fn line_col_to_offset(source: &str, line: usize, col: usize) -> Option<usize> {
    let mut current_line = 0;
    let mut current_col = 0;
    let mut offset = 0;

    for ch in source.chars() {
        if current_line == line && current_col == col {
            return Some(offset);
        }

        if ch == '\n' {
            current_line += 1;
            current_col = 0;
        } else {
            current_col += 1;
        }

        offset += ch.len_utf8();
    }

    if current_line == line && current_col == col {
        return Some(offset);
    }

    None
}

/// Create a Range from start and end byte offsets, resolving full
/// line/column information for both endpoints
///
/// Returns None if either offset is out of bounds or the range is
/// inverted.
pub fn locate_range(source: &str, start: usize, end: usize) -> Option<Range> {
    if end < start {
        return None;
    }
    let start = offset_to_location(source, start)?;
    let end = offset_to_location(source, end)?;
    Some(Range { start, end })
}

/// Width in columns of a line's leading blank run
///
/// Tabs and spaces each count as one column. The run ends at the first
/// other character, so a blank line reports its full length.
pub fn leading_blank_width(line: &str) -> usize {
    line.bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_location_simple() {
        let source = "hello\nworld";

        let loc = offset_to_location(source, 0).unwrap();
        assert_eq!(loc.offset, 0);
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 0);

        let loc = offset_to_location(source, 3).unwrap();
        assert_eq!(loc.offset, 3);
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 3);

        // After the newline, beginning of the second line
        let loc = offset_to_location(source, 6).unwrap();
        assert_eq!(loc.offset, 6);
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 0);

        let loc = offset_to_location(source, 9).unwrap();
        assert_eq!(loc.offset, 9);
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_offset_to_location_out_of_bounds() {
        let source = "hello";
        assert!(offset_to_location(source, 100).is_none());
    }

    #[test]
    fn test_offset_to_location_end() {
        let source = "hello";
        let loc = offset_to_location(source, 5).unwrap();
        assert_eq!(loc.offset, 5);
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 5);
    }

    #[test]
    fn test_offset_to_location_multibyte() {
        // "é" is two bytes but one column
        let source = "é: x\nnext";
        let loc = offset_to_location(source, 2).unwrap();
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 1);

        let loc = offset_to_location(source, 6).unwrap();
        assert_eq!(loc.row, 1);
        assert_eq!(loc.column, 0);
    }

    #[test]
    fn test_line_col_to_offset_simple() {
        let source = "hello\nworld";

        assert_eq!(line_col_to_offset(source, 0, 0).unwrap(), 0);
        assert_eq!(line_col_to_offset(source, 0, 3).unwrap(), 3);
        assert_eq!(line_col_to_offset(source, 1, 0).unwrap(), 6);
        assert_eq!(line_col_to_offset(source, 1, 3).unwrap(), 9);
    }

    #[test]
    fn test_line_col_to_offset_out_of_bounds() {
        let source = "hello\nworld";
        assert!(line_col_to_offset(source, 10, 0).is_none());
        assert!(line_col_to_offset(source, 0, 100).is_none());
    }

    #[test]
    fn test_line_col_to_offset_end() {
        let source = "hello";
        assert_eq!(line_col_to_offset(source, 0, 5).unwrap(), 5);
    }

    #[test]
    fn test_roundtrip() {
        let source = "hello\nworld\ntest";

        for test_offset in [0, 3, 6, 10, 16] {
            let loc = offset_to_location(source, test_offset).unwrap();
            let back_to_offset = line_col_to_offset(source, loc.row, loc.column).unwrap();
            assert_eq!(test_offset, back_to_offset);
        }
    }

    #[test]
    fn test_locate_range() {
        let source = "line1\nline2\nline3";

        let range = locate_range(source, 6, 11).unwrap();
        assert_eq!(range.start.row, 1);
        assert_eq!(range.start.column, 0);
        assert_eq!(range.end.row, 1);
        assert_eq!(range.end.column, 5);
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn test_locate_range_rejects_inverted() {
        let source = "line1\nline2";
        assert!(locate_range(source, 8, 2).is_none());
        assert!(locate_range(source, 0, 100).is_none());
    }

    #[test]
    fn test_leading_blank_width() {
        assert_eq!(leading_blank_width("    code"), 4);
        assert_eq!(leading_blank_width("\t\tcode"), 2);
        assert_eq!(leading_blank_width(" \t code"), 3);
        assert_eq!(leading_blank_width("code"), 0);
        assert_eq!(leading_blank_width("   "), 3);
        assert_eq!(leading_blank_width(""), 0);
    }
}
