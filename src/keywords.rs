//! Reserved words of the emitted surface language, as read-only
//! configuration: a static set initialized once, never mutated.

use std::borrow::Cow;
use std::collections::HashSet;
use once_cell::sync::Lazy;

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "base", "bool", "break", "case", "catch", "class",
        "continue", "decimal", "default", "do", "double", "else", "event",
        "false", "finally", "float", "for", "foreach", "goto", "if", "in",
        "int", "internal", "long", "namespace", "new", "null", "object",
        "out", "override", "params", "private", "protected", "public",
        "readonly", "ref", "return", "static", "string", "switch", "this",
        "throw", "true", "try", "virtual", "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}

/// Escape an identifier that collides with a reserved word (`in` → `@in`).
/// Non-colliding names pass through unallocated.
pub fn escape(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}
