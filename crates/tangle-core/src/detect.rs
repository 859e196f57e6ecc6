//! Two-tier fragment detection over host text.
//!
//! The structural pass parses the host as YAML and inspects every scalar in
//! value position of a mapping entry. When the host does not parse (a live
//! editing session spends much of its time mid-edit), a fixed set of fallback
//! patterns scans the raw text instead, so diagnostics survive broken
//! documents. Which tier ran is part of the result, not control flow.

use once_cell::sync::Lazy;
use regex::Regex;
use tangle_source_map::{leading_blank_width, locate_range};
use tangle_yaml::{ScalarNode, YamlNode};
use tracing::debug;

use crate::dedent::dedent;
use crate::fragment::{CodeFragment, HostRange};
use crate::heuristic::looks_like_typescript;

/// Which detection tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionPass {
    /// The host parsed as YAML; fragments come from the spanned node tree.
    Structural,
    /// YAML parsing failed; fragments come from the fixed pattern set.
    Fallback,
}

/// Result of one detection pass over a host document.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Fragments in document order, with non-overlapping host ranges.
    pub fragments: Vec<CodeFragment>,
    /// The tier that produced them.
    pub pass: DetectionPass,
}

/// Detect embedded TypeScript fragments in `host_text`.
///
/// Pure function of its input: re-running it on identical text yields an
/// identical [`Detection`].
pub fn detect(host_text: &str) -> Detection {
    match tangle_yaml::parse(host_text) {
        Ok(root) => Detection {
            fragments: structural(host_text, &root),
            pass: DetectionPass::Structural,
        },
        // A host without any document node has no fragments either; only a
        // scan failure engages the fallback patterns.
        Err(tangle_yaml::Error::EmptyDocument) => Detection {
            fragments: Vec::new(),
            pass: DetectionPass::Structural,
        },
        Err(err) => {
            debug!(error = %err, "host did not parse as YAML, using fallback patterns");
            Detection {
                fragments: fallback(host_text),
                pass: DetectionPass::Fallback,
            }
        }
    }
}

fn structural(host: &str, root: &YamlNode) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    walk(host, root, &mut fragments);
    fragments
}

/// Depth-first walk emitting fragments in document order. Only scalars in
/// value position of a mapping entry are candidates; keys and bare sequence
/// items are not.
fn walk(host: &str, node: &YamlNode, fragments: &mut Vec<CodeFragment>) {
    match node {
        YamlNode::Mapping(mapping) => {
            for entry in &mapping.entries {
                match &entry.value {
                    YamlNode::Scalar(scalar) => consider(host, scalar, fragments),
                    value => walk(host, value, fragments),
                }
            }
        }
        YamlNode::Sequence(sequence) => {
            for item in &sequence.items {
                walk(host, item, fragments);
            }
        }
        YamlNode::Scalar(_) => {}
    }
}

fn consider(host: &str, scalar: &ScalarNode, fragments: &mut Vec<CodeFragment>) {
    if !looks_like_typescript(&scalar.value) {
        return;
    }
    let span = &scalar.span;
    let raw = &host[span.start.offset..span.end.offset];
    let content_start = if scalar.style.is_block() && !raw.starts_with(['|', '>']) {
        // The span carries no indicator line (none was found in the host);
        // every line of it is content. Rewind to the start of the first
        // line so dedent sees its indentation.
        host[..span.start.offset].rfind('\n').map_or(0, |i| i + 1)
    } else {
        // Content begins after the first line break in the raw span: that
        // skips the `|`/`>` indicator line of a block scalar and leaves a
        // plain or quoted scalar its continuation lines. A single-line
        // scalar has no content to extract.
        let Some(break_at) = raw.find('\n') else {
            return;
        };
        span.start.offset + break_at + 1
    };
    push_content(host, content_start, span.end.offset, fragments);
}

/// Turn the content region `[content_start, content_end)` into a fragment:
/// clip trailing blank lines, dedent, skip when nothing remains.
fn push_content(
    host: &str,
    content_start: usize,
    content_end: usize,
    fragments: &mut Vec<CodeFragment>,
) {
    let content_end = clip_trailing_blank(host, content_start, content_end);
    if content_end <= content_start {
        return;
    }
    let dedented = dedent(&host[content_start..content_end]);
    // Resolve lines from the first and the last content byte.
    let Some(lines) = locate_range(host, content_start, content_end - 1) else {
        return;
    };
    fragments.push(CodeFragment {
        ordinal: fragments.len(),
        source_text: dedented.text,
        host_range: HostRange {
            start_line: lines.start.row,
            end_line: lines.end.row,
            start_offset: content_start,
            end_offset: content_end,
        },
        indent_width: dedented.indent_width,
    });
}

/// Walk `end` back over trailing lines that hold only blanks.
fn clip_trailing_blank(host: &str, start: usize, end: usize) -> usize {
    let mut kept = start;
    let mut cursor = start;
    for line in host[start..end].split_inclusive('\n') {
        cursor += line.len();
        if !line.trim().is_empty() {
            kept = cursor;
        }
    }
    kept
}

/// Marker comment announcing a TypeScript block, followed on the next line
/// by a `key: |` (or `key: >`) indicator. The indented block below the match
/// is the fragment content, accepted without further checks.
static MARKED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*#[ \t]*tangle:[ \t]*(?:typescript|ts)[ \t]*\r?\n[ \t]*[^\s#][^:\n]*:[ \t]*[|>][0-9+\-]*[ \t]*(?:#[^\n]*)?\r?\n?",
    )
    .expect("invalid marker pattern")
});

/// A code-ish key (`code`, `script`, `source` or `handler` somewhere in it)
/// with a block scalar indicator. The block below is accepted only if it
/// still looks like TypeScript after dedenting.
static CODEISH_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*[\w.\-]*(?:code|script|source|handler)[\w.\-]*[ \t]*:[ \t]*[|>][0-9+\-]*[ \t]*(?:#[^\n]*)?\r?\n?",
    )
    .expect("invalid code key pattern")
});

/// Pattern-based detection for hosts that fail to parse.
///
/// Marker-announced blocks are collected first and always win; code-ish key
/// matches overlapping one are dropped, keeping fragment ranges disjoint.
fn fallback(host: &str) -> Vec<CodeFragment> {
    let mut accepted: Vec<(usize, usize)> = Vec::new();

    for m in MARKED_BLOCK.find_iter(host) {
        let matched = m.as_str();
        let key_line = match matched.find('\n') {
            Some(i) => &matched[i + 1..],
            None => matched,
        };
        if let Some(region) = indented_block(host, m.end(), leading_blank_width(key_line)) {
            accepted.push(region);
        }
    }

    for m in CODEISH_BLOCK.find_iter(host) {
        let baseline = leading_blank_width(m.as_str());
        let Some((start, end)) = indented_block(host, m.end(), baseline) else {
            continue;
        };
        if accepted.iter().any(|&(a, b)| start < b && a < end) {
            continue;
        }
        if !looks_like_typescript(&dedent(&host[start..end]).text) {
            continue;
        }
        accepted.push((start, end));
    }

    accepted.sort_unstable();
    let mut fragments = Vec::new();
    let mut last_end = 0;
    for (start, end) in accepted {
        if start < last_end {
            continue;
        }
        last_end = end;
        push_content(host, start, end, &mut fragments);
    }
    fragments
}

/// Scan the indented block starting at `after`: lines indented past
/// `baseline` belong to it, interior blank lines are tolerated. Returns the
/// content byte region, or `None` when no indented line follows.
fn indented_block(host: &str, after: usize, baseline: usize) -> Option<(usize, usize)> {
    let mut cursor = after;
    let mut end = after;
    for line in host[after..].split_inclusive('\n') {
        cursor += line.len();
        if line.trim().is_empty() {
            continue;
        }
        if leading_blank_width(line) <= baseline {
            break;
        }
        end = cursor;
    }
    (end > after).then_some((after, end))
}
