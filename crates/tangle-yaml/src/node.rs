//! The spanned YAML node tree.

use serde::{Deserialize, Serialize};
use tangle_source_map::Range;

/// A YAML node with source span information.
///
/// The tree distinguishes exactly three shapes. Matching on it is meant
/// to be exhaustive; code that walks a document handles every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum YamlNode {
    Scalar(ScalarNode),
    Sequence(SequenceNode),
    Mapping(MappingNode),
}

/// Presentation style of a scalar in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl ScalarStyle {
    /// Block styles (`|` and `>`) introduce their content on the lines
    /// following the indicator.
    pub fn is_block(&self) -> bool {
        matches!(self, ScalarStyle::Literal | ScalarStyle::Folded)
    }
}

/// A scalar leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarNode {
    /// Parsed value: escapes resolved, block content assembled.
    pub value: String,
    pub style: ScalarStyle,
    /// Raw extent in the source, from the indicator or first character
    /// through the end of the scalar's text (exclusive).
    pub span: Range,
}

/// A sequence of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceNode {
    pub items: Vec<YamlNode>,
    /// Covers the first through the last item.
    pub span: Range,
}

/// A mapping, with entries in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingNode {
    pub entries: Vec<MappingEntry>,
    /// Covers the first key through the last value.
    pub span: Range,
}

/// One key/value pair of a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub key: YamlNode,
    pub value: YamlNode,
}

impl YamlNode {
    /// The source span of this node.
    pub fn span(&self) -> &Range {
        match self {
            YamlNode::Scalar(s) => &s.span,
            YamlNode::Sequence(s) => &s.span,
            YamlNode::Mapping(m) => &m.span,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, YamlNode::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match self {
            YamlNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceNode> {
        match self {
            YamlNode::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&MappingNode> {
        match self {
            YamlNode::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a mapping value by string key. Returns None for
    /// non-mappings and missing keys.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

impl MappingNode {
    /// Look up a value by string key, first match wins.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        self.entries
            .iter()
            .find(|e| e.key.as_scalar().is_some_and(|s| s.value == key))
            .map(|e| &e.value)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_accessors() {
        let doc = parse("title: My Document\nitems:\n  - 1\n  - 2\n").unwrap();

        assert!(!doc.is_scalar());
        let mapping = doc.as_mapping().unwrap();
        assert_eq!(mapping.entries.len(), 2);

        let title = doc.get("title").unwrap();
        assert!(title.is_scalar());
        assert_eq!(title.as_scalar().unwrap().value, "My Document");

        let items = doc.get("items").unwrap().as_sequence().unwrap();
        assert_eq!(items.items.len(), 2);
        assert_eq!(items.items[0].as_scalar().unwrap().value, "1");

        assert!(doc.get("missing").is_none());
        assert!(title.get("anything").is_none());
    }

    #[test]
    fn test_entries_preserve_document_order() {
        let doc = parse("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .entries
            .iter()
            .map(|e| e.key.as_scalar().unwrap().value.as_str())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_spans_are_ordered() {
        let doc = parse("a: 1\nb: 2\n").unwrap();
        let mapping = doc.as_mapping().unwrap();
        let first = mapping.entries[0].value.span();
        let second = mapping.entries[1].key.span();
        assert!(first.end.offset <= second.start.offset);
    }
}
