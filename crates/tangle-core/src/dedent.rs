//! Dedentation of raw fragment content.

use tangle_source_map::leading_blank_width;

/// Result of stripping the common leading indentation from a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dedented {
    /// Text with `indent_width` leading columns removed from each line.
    pub text: String,
    /// Number of columns stripped per line.
    pub indent_width: usize,
}

/// Strip the common leading indentation from `raw`.
///
/// The indent width is the minimum leading run of spaces and tabs over the
/// non-blank lines, each character counting one column. Blank lines pass
/// through verbatim. Stripping stops at the first non-blank character, so a
/// line indented less than the minimum loses only its own blanks.
pub fn dedent(raw: &str) -> Dedented {
    let width = raw
        .split_inclusive('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_blank_width)
        .min();

    let Some(width) = width else {
        // No non-blank lines: nothing to measure, nothing to strip.
        return Dedented {
            text: raw.to_string(),
            indent_width: 0,
        };
    };

    let mut text = String::with_capacity(raw.len());
    for line in raw.split_inclusive('\n') {
        if line.trim().is_empty() {
            text.push_str(line);
        } else {
            let run = leading_blank_width(line);
            text.push_str(&line[run.min(width)..]);
        }
    }

    Dedented {
        text,
        indent_width: width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_uniform_indent() {
        let out = dedent("    const x = 1;\n    const y = 2;\n");
        assert_eq!(out.indent_width, 4);
        assert_eq!(out.text, "const x = 1;\nconst y = 2;\n");
    }

    #[test]
    fn width_is_minimum_over_non_blank_lines() {
        let out = dedent("    if (a) {\n      b();\n    }\n");
        assert_eq!(out.indent_width, 4);
        assert_eq!(out.text, "if (a) {\n  b();\n}\n");
    }

    #[test]
    fn blank_lines_pass_through_verbatim() {
        let out = dedent("  const a = 1;\n\n  const b = 2;\n");
        assert_eq!(out.indent_width, 2);
        assert_eq!(out.text, "const a = 1;\n\nconst b = 2;\n");
    }

    #[test]
    fn whitespace_only_lines_do_not_shrink_width() {
        // The middle line is blank (two spaces); it neither caps the width
        // nor gets stripped.
        let out = dedent("    a();\n  \n    b();\n");
        assert_eq!(out.indent_width, 4);
        assert_eq!(out.text, "a();\n  \nb();\n");
    }

    #[test]
    fn tabs_count_one_column_each() {
        let out = dedent("\tfirst();\n  second();\n");
        assert_eq!(out.indent_width, 1);
        assert_eq!(out.text, "first();\n second();\n");
    }

    #[test]
    fn zero_indent_line_pins_width() {
        let out = dedent("top();\n    nested();\n");
        assert_eq!(out.indent_width, 0);
        assert_eq!(out.text, "top();\n    nested();\n");
    }

    #[test]
    fn all_blank_input_is_unchanged() {
        let out = dedent("   \n\n");
        assert_eq!(out.indent_width, 0);
        assert_eq!(out.text, "   \n\n");
    }

    #[test]
    fn handles_missing_trailing_newline() {
        let out = dedent("  a();\n  b()");
        assert_eq!(out.indent_width, 2);
        assert_eq!(out.text, "a();\nb()");
    }
}
