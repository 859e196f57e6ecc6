//! TypeScript-likeness heuristic for candidate scalar values.
//!
//! Deliberately permissive: any single pattern hit accepts the text. Prose
//! values fall through all patterns and are rejected.

use once_cell::sync::Lazy;
use regex::Regex;

/// Declaration and module keywords, matched as whole words.
static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:const|let|var|function|class|interface|type|enum|namespace|import|export)\b",
    )
    .expect("invalid keyword pattern")
});

/// A type-annotation colon followed by a primitive type name, `x: number`.
static TYPE_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":\s*(?:string|number|boolean|any|void|unknown|never)\b")
        .expect("invalid type annotation pattern")
});

/// An `import ... from '...'` clause.
static IMPORT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\b[^;\n]*\bfrom\s*['"]"#).expect("invalid import pattern")
});

/// An identifier followed by angle-bracketed type arguments, `Map<string, T>`.
static GENERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*<[\w$][\w$<>,.\s\[\]]*>").expect("invalid generic pattern")
});

/// Does this text look like TypeScript?
pub fn looks_like_typescript(text: &str) -> bool {
    KEYWORD.is_match(text)
        || TYPE_ANNOTATION.is_match(text)
        || text.contains("=>")
        || IMPORT_FROM.is_match(text)
        || GENERIC.is_match(text)
}
