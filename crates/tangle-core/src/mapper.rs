//! Coordinate mapping between fragment-local and host-document positions.
//!
//! The dedented fragment is rectangular: every content line lost exactly
//! `indent_width` leading columns, and line `0` of the fragment is host line
//! `host_range.start_line`. Both directions are plain arithmetic.

use crate::fragment::CodeFragment;
use crate::types::{Position, Range};

/// Map a fragment-local position into host-document coordinates.
pub fn to_host(fragment: &CodeFragment, local: Position) -> Position {
    Position::new(
        fragment.host_range.start_line as u32 + local.line,
        local.character + fragment.indent_width as u32,
    )
}

/// Map a host-document position into fragment-local coordinates.
///
/// Returns `None` for positions outside the fragment's content rectangle:
/// lines before or after the content, or columns left of the stripped
/// indentation.
pub fn to_local(fragment: &CodeFragment, host: Position) -> Option<Position> {
    let line = (host.line as usize).checked_sub(fragment.host_range.start_line)?;
    if host.line as usize > fragment.host_range.end_line {
        return None;
    }
    let character = (host.character as usize).checked_sub(fragment.indent_width)?;
    Some(Position::new(line as u32, character as u32))
}

/// Map a fragment-local range into host coordinates, endpoint by endpoint.
pub fn range_to_host(fragment: &CodeFragment, local: Range) -> Range {
    Range::new(
        to_host(fragment, local.start),
        to_host(fragment, local.end),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::HostRange;

    fn fragment() -> CodeFragment {
        // Matches the extraction of:
        //   handler:
        //     code: |
        //       const x: number = "y";
        CodeFragment {
            ordinal: 0,
            source_text: "const x: number = \"y\";\n".to_string(),
            host_range: HostRange {
                start_line: 2,
                end_line: 2,
                start_offset: 19,
                end_offset: 46,
            },
            indent_width: 4,
        }
    }

    #[test]
    fn local_to_host_adds_line_and_indent() {
        let f = fragment();
        assert_eq!(to_host(&f, Position::new(0, 0)), Position::new(2, 4));
        assert_eq!(to_host(&f, Position::new(0, 18)), Position::new(2, 22));
    }

    #[test]
    fn host_to_local_inverts() {
        let f = fragment();
        assert_eq!(to_local(&f, Position::new(2, 4)), Some(Position::new(0, 0)));
        assert_eq!(
            to_local(&f, Position::new(2, 22)),
            Some(Position::new(0, 18))
        );
    }

    #[test]
    fn round_trip_holds_inside_the_fragment() {
        let f = fragment();
        for character in 0..23 {
            let local = Position::new(0, character);
            assert_eq!(to_local(&f, to_host(&f, local)), Some(local));
        }
    }

    #[test]
    fn positions_outside_the_rectangle_do_not_map() {
        let f = fragment();
        // Line before the content
        assert_eq!(to_local(&f, Position::new(1, 10)), None);
        // Line past the content
        assert_eq!(to_local(&f, Position::new(3, 0)), None);
        // Inside the stripped indentation
        assert_eq!(to_local(&f, Position::new(2, 3)), None);
    }

    #[test]
    fn ranges_map_endpoint_wise() {
        let f = fragment();
        let local = Range::new(Position::new(0, 18), Position::new(0, 21));
        let host = range_to_host(&f, local);
        assert_eq!(host.start, Position::new(2, 22));
        assert_eq!(host.end, Position::new(2, 25));
    }

    #[test]
    fn multi_line_fragment_maps_every_line_uniformly() {
        let f = CodeFragment {
            ordinal: 1,
            source_text: "if (a) {\n  b();\n}\n".to_string(),
            host_range: HostRange {
                start_line: 5,
                end_line: 7,
                start_offset: 60,
                end_offset: 90,
            },
            indent_width: 2,
        };
        assert_eq!(to_host(&f, Position::new(1, 2)), Position::new(6, 4));
        assert_eq!(to_host(&f, Position::new(2, 0)), Position::new(7, 2));
        assert_eq!(to_local(&f, Position::new(7, 2)), Some(Position::new(2, 0)));
    }
}
