//! YAML parser that builds spanned node trees.

use crate::node::{MappingEntry, MappingNode, ScalarNode, ScalarStyle, SequenceNode, YamlNode};
use crate::scalar_span::scalar_extent;
use crate::{Error, Result};
use tangle_source_map::{line_col_to_offset, offset_to_location, Location, Range};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse YAML from a string, producing a spanned node tree.
///
/// This parses a single YAML document. If the input contains multiple
/// documents, only the first one will be parsed.
///
/// # Example
///
/// ```rust
/// use tangle_yaml::parse;
///
/// let doc = parse("title: My Document").unwrap();
/// assert!(doc.as_mapping().is_some());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or the input holds no
/// document at all.
pub fn parse(content: &str) -> Result<YamlNode> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = TreeBuilder::new(content);

    parser
        .load(&mut builder, false) // false = single document only
        .map_err(Error::from)?;

    builder.result()
}

/// Builder that implements MarkedEventReceiver to construct the tree.
struct TreeBuilder<'a> {
    /// The source text being parsed, used to resolve scalar extents
    source: &'a str,

    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    /// The completed root node
    root: Option<YamlNode>,
}

/// A collection being constructed during parsing.
enum BuildNode {
    Sequence {
        start: Location,
        items: Vec<YamlNode>,
    },

    Mapping {
        start: Location,
        entries: Vec<(YamlNode, Option<YamlNode>)>,
    },
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: Vec::new(),
            root: None,
        }
    }

    fn result(self) -> Result<YamlNode> {
        self.root.ok_or(Error::EmptyDocument)
    }

    /// Byte offset of a marker. Markers report 1-based lines, 0-based
    /// columns, and count characters, not bytes; slicing with
    /// `Marker::index()` goes wrong as soon as the source holds any
    /// multi-byte character, so resolve line/column against the source
    /// instead.
    fn marker_offset(&self, marker: &Marker) -> usize {
        line_col_to_offset(self.source, marker.line().saturating_sub(1), marker.col())
            .unwrap_or(self.source.len())
    }

    fn locate(&self, offset: usize) -> Location {
        offset_to_location(self.source, offset.min(self.source.len())).unwrap_or(Location {
            offset: 0,
            row: 0,
            column: 0,
        })
    }

    fn push_complete(&mut self, node: YamlNode) {
        let Some(parent) = self.stack.last_mut() else {
            // This is the root
            self.root = Some(node);
            return;
        };

        match parent {
            BuildNode::Sequence { items, .. } => {
                items.push(node);
            }
            BuildNode::Mapping { entries, .. } => {
                if let Some((_, value)) = entries.last_mut() {
                    if value.is_none() {
                        *value = Some(node);
                    } else {
                        // This is a new key
                        entries.push((node, None));
                    }
                } else {
                    // First key
                    entries.push((node, None));
                }
            }
        }
    }

    /// Span of a finished collection: first child start through last
    /// child end; empty collections get a zero-width span.
    fn collection_span(&self, start: Location, last_end: Option<Location>) -> Range {
        match last_end {
            Some(end) => Range { start, end },
            None => Range::point(start),
        }
    }
}

impl<'a> MarkedEventReceiver for TreeBuilder<'a> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing => {}

            Event::StreamStart => {}
            Event::StreamEnd => {}
            Event::DocumentStart => {}
            Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                let style = scalar_style(style);
                let marked = self.marker_offset(&marker);
                let (start, end) = scalar_extent(self.source, marked, style, &value);
                let span = Range {
                    start: self.locate(start),
                    end: self.locate(end),
                };

                self.push_complete(YamlNode::Scalar(ScalarNode { value, style, span }));
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                let start = self.locate(self.marker_offset(&marker));
                self.stack.push(BuildNode::Sequence {
                    start,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let build_node = self.stack.pop().expect("SequenceEnd without SequenceStart");

                if let BuildNode::Sequence { start, items } = build_node {
                    let last_end = items.last().map(|n| n.span().end);
                    let span = self.collection_span(start, last_end);
                    self.push_complete(YamlNode::Sequence(SequenceNode { items, span }));
                } else {
                    panic!("Expected Sequence build node");
                }
            }

            Event::MappingStart(_anchor_id, _tag) => {
                let start = self.locate(self.marker_offset(&marker));
                self.stack.push(BuildNode::Mapping {
                    start,
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => {
                let build_node = self.stack.pop().expect("MappingEnd without MappingStart");

                if let BuildNode::Mapping { start, entries } = build_node {
                    let entries: Vec<MappingEntry> = entries
                        .into_iter()
                        .map(|(key, value)| MappingEntry {
                            key,
                            value: value.expect("Mapping entry without value"),
                        })
                        .collect();

                    let last_end = entries.last().map(|e| e.value.span().end);
                    let span = self.collection_span(start, last_end);
                    self.push_complete(YamlNode::Mapping(MappingNode { entries, span }));
                } else {
                    panic!("Expected Mapping build node");
                }
            }

            Event::Alias(_anchor_id) => {
                // Anchors are not tracked; aliases resolve to empty scalars.
                let start = self.locate(self.marker_offset(&marker));
                self.push_complete(YamlNode::Scalar(ScalarNode {
                    value: String::new(),
                    style: ScalarStyle::Plain,
                    span: Range::point(start),
                }));
            }
        }
    }
}

fn scalar_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        TScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}
