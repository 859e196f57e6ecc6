//! Source locations for tangle
//!
//! This crate provides byte-offset based source locations and the
//! conversions between offsets and line/column coordinates that the
//! rest of the workspace relies on. Everything is 0-indexed: rows,
//! columns, and byte offsets alike.
//!
//! # Example
//!
//! ```rust
//! use tangle_source_map::*;
//!
//! let source = "key: value\nother: 1\n";
//!
//! // Resolve an offset to a full location
//! let loc = offset_to_location(source, 11).unwrap();
//! assert_eq!(loc.row, 1);
//! assert_eq!(loc.column, 0);
//!
//! // Build a range covering the second line
//! let range = locate_range(source, 11, 19).unwrap();
//! assert_eq!(range.start.row, 1);
//! assert_eq!(range.end.column, 8);
//! ```

pub mod types;
pub mod utils;

// Re-export main types
pub use types::{Location, Range};
pub use utils::{leading_blank_width, line_col_to_offset, locate_range, offset_to_location};
