//! The fragment model: embedded code blocks extracted from a host document.

use serde::{Deserialize, Serialize};

/// URI scheme for virtual fragment documents.
pub const VIRTUAL_SCHEME: &str = "tangle-ts";

/// Host-document coordinates of a fragment's content.
///
/// Lines index the content itself: `start_line` is the first line of code,
/// the one after a block scalar's `|`/`>` indicator line, and `end_line` is
/// the last content line (inclusive). Offsets are byte offsets into the host
/// text, `end_offset` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRange {
    pub start_line: usize,
    pub end_line: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// A code fragment detected inside a host document.
///
/// Identity within a document is positional: `ordinal` is the fragment's
/// index in document order, stable only for the detection pass that produced
/// it. Every pass rebuilds the fragment list wholesale; fragments are never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFragment {
    /// Index in document order within the detection pass.
    pub ordinal: usize,
    /// Dedented code text presented to the analysis engine.
    pub source_text: String,
    /// Where the raw content sits in the host document.
    pub host_range: HostRange,
    /// Columns stripped from each content line during dedentation.
    pub indent_width: usize,
}

impl CodeFragment {
    /// Virtual document URI for this fragment under the given host URI.
    pub fn virtual_uri(&self, host_uri: &str) -> String {
        virtual_uri(host_uri, self.ordinal)
    }
}

/// Build the virtual document URI for fragment `ordinal` of `host_uri`.
///
/// `file://` prefixes are stripped so the virtual path stays readable:
/// `tangle-ts:/work/app.yaml.block0.ts`. The `.ts` suffix lets engines pick
/// their grammar from the URI alone.
pub fn virtual_uri(host_uri: &str, ordinal: usize) -> String {
    let path = host_uri.strip_prefix("file://").unwrap_or(host_uri);
    format!("{VIRTUAL_SCHEME}:{path}.block{ordinal}.ts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_uri_strips_file_scheme() {
        assert_eq!(
            virtual_uri("file:///work/app.yaml", 0),
            "tangle-ts:/work/app.yaml.block0.ts"
        );
    }

    #[test]
    fn virtual_uri_keeps_plain_paths() {
        assert_eq!(
            virtual_uri("deploy/pipeline.yaml", 3),
            "tangle-ts:deploy/pipeline.yaml.block3.ts"
        );
    }

    #[test]
    fn fragment_uri_uses_its_ordinal() {
        let fragment = CodeFragment {
            ordinal: 2,
            source_text: "let x = 1;\n".to_string(),
            host_range: HostRange {
                start_line: 4,
                end_line: 4,
                start_offset: 40,
                end_offset: 51,
            },
            indent_width: 2,
        };
        assert_eq!(
            fragment.virtual_uri("file:///srv/jobs.yaml"),
            "tangle-ts:/srv/jobs.yaml.block2.ts"
        );
    }
}
