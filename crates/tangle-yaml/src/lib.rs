//! # tangle-yaml
//!
//! YAML parsing into a spanned node tree.
//!
//! Every node carries the byte range it occupies in the original source.
//! Scalar spans are computed style-aware: block scalars cover the
//! indicator through the last indented content line, quoted scalars run
//! to their closing quote, and plain scalars include folded continuation
//! lines. This makes it possible to slice a scalar's raw text back out
//! of the document, which is what embedded-code extraction needs.
//!
//! Scalar values are kept as strings; callers that care about YAML's
//! int/bool/null typing do their own interpretation.
//!
//! ## Example
//!
//! ```rust
//! use tangle_yaml::parse;
//!
//! let doc = parse("handler: |\n  const x = 1;\n").unwrap();
//! let scalar = doc.get("handler").unwrap().as_scalar().unwrap();
//! assert_eq!(scalar.value, "const x = 1;\n");
//! assert!(scalar.style.is_block());
//! ```

mod error;
mod node;
mod parser;
mod scalar_span;

pub use error::{Error, Result};
pub use node::{MappingEntry, MappingNode, ScalarNode, ScalarStyle, SequenceNode, YamlNode};
pub use parser::parse;
